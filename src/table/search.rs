/// Search-field descriptors and query payload construction
use crate::apis::QueryParams;
use crate::errors::ValidationError;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Select value meaning "no filter"
pub const ALL_MARKER: &str = "ALL";

/// Bounds a `DateRange` field expands into
pub const RANGE_START_PARAM: &str = "startDate";
pub const RANGE_END_PARAM: &str = "endDate";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFieldType {
    Text,
    Select { options: Vec<SelectOption> },
    Date,
    DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFieldDescriptor {
    pub field_type: SearchFieldType,
    pub name: String,
    pub label: String,
    pub required: bool,
}

impl SearchFieldDescriptor {
    fn new(field_type: SearchFieldType, name: &str, label: &str) -> Self {
        Self {
            field_type,
            name: name.to_string(),
            label: label.to_string(),
            required: false,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(SearchFieldType::Text, name, label)
    }

    /// Select field; an "All" option with the `ALL` marker is prepended
    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        let mut all = vec![SelectOption::new("All", ALL_MARKER)];
        all.extend(options);
        Self::new(SearchFieldType::Select { options: all }, name, label)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(SearchFieldType::Date, name, label)
    }

    pub fn date_range(name: &str, label: &str) -> Self {
        Self::new(SearchFieldType::DateRange, name, label)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_blank),
        _ => false,
    }
}

fn is_all_marker(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().eq_ignore_ascii_case(ALL_MARKER))
}

/// Turn raw form values into query parameters
///
/// Drops null values, blank strings and the `ALL` marker. Structured values
/// (arrays, objects) are dropped too; date ranges are expanded by
/// `SearchForm::submit` before reaching here.
pub fn build_search_payload(values: &Map<String, Value>) -> QueryParams {
    values
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) if !s.trim().is_empty() && !is_all_marker(value) => {
                    s.trim().to_string()
                }
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}

fn parse_date(field: &str, value: &Value) -> Result<Option<NaiveDate>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidField {
                field: field.to_string(),
                reason: format!("'{}' is not a YYYY-MM-DD date", s),
            }),
        other => Err(ValidationError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a date string, got {}", other),
        }),
    }
}

/// A page's search form: the field list plus submission rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub fields: Vec<SearchFieldDescriptor>,
}

impl SearchForm {
    pub fn new(fields: Vec<SearchFieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&SearchFieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate and expand raw values into the outbound query parameters
    ///
    /// Values for names the form does not declare pass straight through.
    pub fn submit(&self, values: &Map<String, Value>) -> Result<QueryParams, ValidationError> {
        let mut expanded = Map::new();

        for (key, value) in values {
            if self.field(key).is_none() {
                expanded.insert(key.clone(), value.clone());
            }
        }

        for field in &self.fields {
            let value = values.get(&field.name).cloned().unwrap_or(Value::Null);

            if field.required && (is_blank(&value) || is_all_marker(&value)) {
                return Err(ValidationError::MissingField {
                    field: field.name.clone(),
                });
            }

            match &field.field_type {
                SearchFieldType::Text => {
                    expanded.insert(field.name.clone(), value);
                }
                SearchFieldType::Select { options } => {
                    if let Value::String(selected) = &value {
                        let known = is_blank(&value)
                            || is_all_marker(&value)
                            || options.iter().any(|o| o.value.eq_ignore_ascii_case(selected.trim()));
                        if !known {
                            return Err(ValidationError::InvalidField {
                                field: field.name.clone(),
                                reason: format!("'{}' is not one of the options", selected),
                            });
                        }
                    }
                    expanded.insert(field.name.clone(), value);
                }
                SearchFieldType::Date => {
                    if let Some(date) = parse_date(&field.name, &value)? {
                        expanded.insert(
                            field.name.clone(),
                            Value::String(date.format(DATE_FORMAT).to_string()),
                        );
                    }
                }
                SearchFieldType::DateRange => {
                    let (start, end) = match &value {
                        Value::Null => (None, None),
                        Value::Array(bounds) if bounds.len() == 2 => (
                            parse_date(&field.name, &bounds[0])?,
                            parse_date(&field.name, &bounds[1])?,
                        ),
                        other => {
                            return Err(ValidationError::InvalidField {
                                field: field.name.clone(),
                                reason: format!("expected [start, end], got {}", other),
                            })
                        }
                    };

                    if let (Some(start), Some(end)) = (start, end) {
                        if start > end {
                            return Err(ValidationError::InvalidField {
                                field: field.name.clone(),
                                reason: format!("start {} is after end {}", start, end),
                            });
                        }
                    }
                    if let Some(start) = start {
                        expanded.insert(
                            RANGE_START_PARAM.to_string(),
                            Value::String(start.format(DATE_FORMAT).to_string()),
                        );
                    }
                    if let Some(end) = end {
                        expanded.insert(
                            RANGE_END_PARAM.to_string(),
                            Value::String(end.format(DATE_FORMAT).to_string()),
                        );
                    }
                }
            }
        }

        Ok(build_search_payload(&expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test values must be an object"),
        }
    }

    fn form() -> SearchForm {
        SearchForm::new(vec![
            SearchFieldDescriptor::text("keyword", "Keyword"),
            SearchFieldDescriptor::select(
                "status",
                "Status",
                vec![
                    SelectOption::new("Active", "ACTIVE"),
                    SelectOption::new("Suspended", "SUSPENDED"),
                ],
            ),
            SearchFieldDescriptor::date_range("registeredAt", "Registered"),
        ])
    }

    #[test]
    fn test_payload_drops_all_marker_and_nulls() {
        let payload = build_search_payload(&values(json!({
            "status": "ALL",
            "keyword": "x",
            "page": null,
        })));

        let expected: QueryParams = [("keyword".to_string(), "x".to_string())].into();
        assert_eq!(payload, expected);
    }

    #[test]
    fn test_payload_keeps_numbers_and_trims_text() {
        let payload = build_search_payload(&values(json!({
            "keyword": "  green  ",
            "page": 3,
            "level": "all",
            "type": "   ",
        })));

        assert_eq!(payload.get("keyword").map(String::as_str), Some("green"));
        assert_eq!(payload.get("page").map(String::as_str), Some("3"));
        assert!(!payload.contains_key("level"));
        assert!(!payload.contains_key("type"));
    }

    #[test]
    fn test_date_range_expands_to_bounds() {
        let payload = form()
            .submit(&values(json!({
                "keyword": "harbor",
                "status": "SUSPENDED",
                "registeredAt": ["2024-01-01", "2024-03-31"],
                "pageSize": 20,
            })))
            .expect("valid submission");

        assert_eq!(payload.get("startDate").map(String::as_str), Some("2024-01-01"));
        assert_eq!(payload.get("endDate").map(String::as_str), Some("2024-03-31"));
        assert_eq!(payload.get("pageSize").map(String::as_str), Some("20"));
        assert!(!payload.contains_key("registeredAt"));
    }

    #[test]
    fn test_open_ended_range_keeps_one_bound() {
        let payload = form()
            .submit(&values(json!({"registeredAt": [null, "2024-03-31"]})))
            .expect("open start");
        assert!(!payload.contains_key("startDate"));
        assert_eq!(payload.get("endDate").map(String::as_str), Some("2024-03-31"));
    }

    #[test]
    fn test_invalid_submissions_are_rejected() {
        let reversed = form().submit(&values(json!({
            "registeredAt": ["2024-05-01", "2024-03-31"],
        })));
        assert!(matches!(reversed, Err(ValidationError::InvalidField { .. })));

        let unknown_option = form().submit(&values(json!({"status": "DELETED"})));
        assert!(matches!(unknown_option, Err(ValidationError::InvalidField { .. })));

        let bad_date = form().submit(&values(json!({"registeredAt": ["01/02/2024", null]})));
        assert!(matches!(bad_date, Err(ValidationError::InvalidField { .. })));
    }

    #[test]
    fn test_required_field_missing() {
        let form = SearchForm::new(vec![SearchFieldDescriptor::text("sampleNo", "Sample").required()]);

        assert_eq!(
            form.submit(&values(json!({"sampleNo": "  "}))),
            Err(ValidationError::MissingField {
                field: "sampleNo".to_string()
            })
        );
        assert!(form.submit(&values(json!({"sampleNo": "S-1"}))).is_ok());
    }
}
