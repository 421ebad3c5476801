/// Column descriptors and nested field resolution
use crate::logger::{self, LogTag};
use serde::Serialize;
use serde_json::Value;

/// Where a column reads its value: a top-level field or a nested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIndex {
    Field(String),
    Path(Vec<String>),
}

impl DataIndex {
    pub fn field(name: &str) -> Self {
        DataIndex::Field(name.to_string())
    }

    pub fn path(segments: &[&str]) -> Self {
        DataIndex::Path(segments.iter().map(|s| s.to_string()).collect())
    }

    pub fn segments(&self) -> Vec<&str> {
        match self {
            DataIndex::Field(name) => vec![name.as_str()],
            DataIndex::Path(path) => path.iter().map(String::as_str).collect(),
        }
    }

    /// Dotted form, used as the default column key
    pub fn dotted(&self) -> String {
        self.segments().join(".")
    }
}

/// Walk `data_index` through `record`
///
/// Returns `None` as soon as a segment is missing or null, or when a
/// non-container is indexed. Array segments are numeric positions.
pub fn resolve_value<'a>(record: &'a Value, data_index: &DataIndex) -> Option<&'a Value> {
    let mut current = record;

    for segment in data_index.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }

    Some(current)
}

/// Default cell text for a resolved value
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| display_value(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(object) => object.to_string(),
    }
}

pub type CellRenderer<T> = Box<dyn Fn(Option<&Value>, &T) -> String + Send + Sync>;

pub struct ColumnDescriptor<T> {
    pub title: String,
    pub data_index: DataIndex,
    pub key: String,
    pub render: Option<CellRenderer<T>>,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(title: &str, data_index: DataIndex) -> Self {
        Self {
            title: title.to_string(),
            key: data_index.dotted(),
            data_index,
            render: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    /// Cell text for one record; `record_value` is the record's JSON form
    pub fn render_cell(&self, record: &T, record_value: &Value) -> String {
        let value = resolve_value(record_value, &self.data_index);
        match &self.render {
            Some(render) => render(value, record),
            None => display_value(value),
        }
    }
}

impl<T> std::fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("key", &self.key)
            .field("render", &self.render.is_some())
            .finish()
    }
}

pub fn headers<T>(columns: &[ColumnDescriptor<T>]) -> Vec<String> {
    columns.iter().map(|c| c.title.clone()).collect()
}

/// Render every record into one row of cell strings
pub fn render_rows<T: Serialize>(columns: &[ColumnDescriptor<T>], records: &[T]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let record_value = serde_json::to_value(record).unwrap_or_else(|e| {
                logger::warning(LogTag::Table, &format!("Record not serializable: {}", e));
                Value::Null
            });
            columns
                .iter()
                .map(|column| column.render_cell(record, &record_value))
                .collect()
        })
        .collect()
}
