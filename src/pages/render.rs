/// Terminal rendering of list pages, record details and the report summary
use super::PageSpec;
use crate::domain::ReportSummary;
use crate::table::{display_value, headers, render_rows, ListState, PaginatedList};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, ContentArrangement, Table};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(titles: Vec<String>) -> Vec<Cell> {
    titles
        .into_iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

/// One list page: optional inline error, the table, and a paging footer
///
/// On error the last loaded page (if any) is still shown under the message.
pub fn render_list<T: Serialize + DeserializeOwned>(spec: &PageSpec<T>, list: &PaginatedList<T>) -> String {
    let mut out = String::new();
    out.push_str(spec.title);
    out.push('\n');

    if let ListState::Error { code, message } = list.state() {
        out.push_str(&format!("Error {}: {}\n", code, message));
    }

    let Some(page) = list.data() else {
        return out;
    };

    if page.items.is_empty() {
        out.push_str("No records match the current filters\n");
    } else {
        let mut table = base_table();
        table.set_header(header_cells(headers(&spec.columns)));
        for row in render_rows(&spec.columns, &page.items) {
            table.add_row(row);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out.push_str(&format!(
        "Page {} of {} · {} records · {} per page\n",
        page.page,
        page.total_pages().max(1),
        page.total,
        page.page_size
    ));
    out
}

/// Flatten nested objects into dotted field names
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, inner) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&name, inner, rows);
            }
        }
        other => rows.push((prefix.to_string(), display_value(Some(other)))),
    }
}

pub fn render_detail(title: &str, record: &Value) -> String {
    let mut rows = Vec::new();
    flatten("", record, &mut rows);

    let mut table = base_table();
    table.set_header(header_cells(vec!["Field".to_string(), "Value".to_string()]));
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).fg(Color::Cyan), Cell::new(value)]);
    }
    format!("{}\n{}\n", title, table)
}

pub fn render_summary(summary: &ReportSummary) -> String {
    let mut table = base_table();
    table.set_header(header_cells(vec!["Metric".to_string(), "Value".to_string()]));

    table.add_row(vec![
        Cell::new("Enterprises"),
        Cell::new(summary.enterprises_total),
    ]);
    for (status, count) in &summary.enterprises_by_status {
        table.add_row(vec![Cell::new(format!("  {}", status)), Cell::new(count)]);
    }
    table.add_row(vec![Cell::new("Import declarations"), Cell::new(summary.imports_total)]);
    for (status, count) in &summary.imports_by_status {
        table.add_row(vec![Cell::new(format!("  {}", status)), Cell::new(count)]);
    }

    let abnormal = Cell::new(summary.plants_abnormal);
    table.add_row(vec![
        Cell::new("Abnormal plants"),
        if summary.plants_abnormal > 0 {
            abnormal.fg(Color::Red)
        } else {
            abnormal
        },
    ]);
    table.add_row(vec![Cell::new("Open tasks"), Cell::new(summary.open_tasks)]);
    table.add_row(vec![Cell::new("Lab tests"), Cell::new(summary.lab_tests_total)]);
    table.add_row(vec![
        Cell::new("Lab pass rate"),
        Cell::new(format!("{:.1}%", summary.lab_pass_rate * 100.0)),
    ]);

    format!(
        "Report summary (generated {})\n{}\n",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        table
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_flattens_nested_fields() {
        let record = json!({
            "id": "ent-0001",
            "contact": {"name": "Lin", "phone": "555"},
            "licenseExpiresAt": null
        });
        let text = render_detail("Enterprises", &record);
        assert!(text.contains("contact.phone"));
        assert!(text.contains("licenseExpiresAt"));
        assert!(text.contains("ent-0001"));
    }

    #[test]
    fn test_summary_shows_pass_rate() {
        let summary = ReportSummary {
            enterprises_total: 2,
            enterprises_by_status: [("ACTIVE".to_string(), 2)].into_iter().collect(),
            imports_total: 0,
            imports_by_status: Default::default(),
            plants_abnormal: 0,
            open_tasks: 1,
            lab_tests_total: 4,
            lab_pass_rate: 0.75,
            generated_at: chrono::Utc::now(),
        };
        let text = render_summary(&summary);
        assert!(text.contains("75.0%"));
        assert!(text.contains("ACTIVE"));
    }
}
