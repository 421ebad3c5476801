//! Per-page list configuration and the console renderer
//!
//! Each resource page is a static `PageSpec`: its endpoint, its columns and its
//! search form. They are built once on first use and never mutated.

pub mod enterprises;
pub mod imports;
pub mod lab;
pub mod plants;
pub mod quarantine;
pub mod render;

use crate::apis::RequestDispatcher;
use crate::config::PaginationConfig;
use crate::domain::ListRecord;
use crate::errors::ValidationError;
use crate::table::{ColumnDescriptor, PaginatedList, SearchFieldType, SearchForm, SelectOption};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const SUMMARY_PATH: &str = "/api/reports/summary";

/// Static configuration of one list page
pub struct PageSpec<T: 'static> {
    pub title: &'static str,
    pub path: &'static str,
    pub columns: Vec<ColumnDescriptor<T>>,
    pub search: SearchForm,
}

impl<T> PageSpec<T> {
    pub fn detail_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Resource {
    Enterprises,
    Imports,
    Plants,
    Tasks,
    Lab,
}

impl Resource {
    pub fn title(&self) -> &'static str {
        match self {
            Resource::Enterprises => enterprises::PAGE.title,
            Resource::Imports => imports::PAGE.title,
            Resource::Plants => plants::PAGE.title,
            Resource::Tasks => quarantine::PAGE.title,
            Resource::Lab => lab::PAGE.title,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Enterprises => enterprises::PAGE.path,
            Resource::Imports => imports::PAGE.path,
            Resource::Plants => plants::PAGE.path,
            Resource::Tasks => quarantine::PAGE.path,
            Resource::Lab => lab::PAGE.path,
        }
    }

    pub fn search_form(&self) -> &'static SearchForm {
        match self {
            Resource::Enterprises => &enterprises::PAGE.search,
            Resource::Imports => &imports::PAGE.search,
            Resource::Plants => &plants::PAGE.search,
            Resource::Tasks => &quarantine::PAGE.search,
            Resource::Lab => &lab::PAGE.search,
        }
    }
}

/// Select options built from enum `(label, wire value)` pairs
pub(crate) fn choices<I>(pairs: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = (&'static str, &'static str)>,
{
    pairs
        .into_iter()
        .map(|(label, value)| SelectOption::new(label, value))
        .collect()
}

/// What a console user asked for, before it meets a page's search form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub keyword: Option<String>,
    /// Select values by field name (`status`, `type`, ...)
    pub selects: BTreeMap<String, String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
}

impl ListRequest {
    /// Raw form values: the range lands on the form's date-range field
    ///
    /// A select or date range the form does not declare is rejected rather
    /// than sent along and ignored by the backend.
    pub fn form_values(&self, form: &SearchForm) -> Result<Map<String, Value>, ValidationError> {
        let mut values = Map::new();
        if let Some(keyword) = &self.keyword {
            values.insert("keyword".to_string(), Value::String(keyword.clone()));
        }
        for (name, value) in &self.selects {
            let declared = form
                .field(name)
                .is_some_and(|f| matches!(f.field_type, SearchFieldType::Select { .. }));
            if !declared {
                return Err(ValidationError::InvalidField {
                    field: name.clone(),
                    reason: "this page has no such filter".to_string(),
                });
            }
            values.insert(name.clone(), Value::String(value.clone()));
        }

        if self.from.is_some() || self.to.is_some() {
            let field = form
                .fields
                .iter()
                .find(|f| f.field_type == SearchFieldType::DateRange)
                .ok_or_else(|| ValidationError::InvalidField {
                    field: "from/to".to_string(),
                    reason: "this page has no date range".to_string(),
                })?;
            let bound = |v: &Option<String>| v.clone().map(Value::String).unwrap_or(Value::Null);
            values.insert(
                field.name.clone(),
                Value::Array(vec![bound(&self.from), bound(&self.to)]),
            );
        }
        Ok(values)
    }
}

/// Load one page of `resource` and render it as a table
///
/// Request failures do not fail the call; they are rendered inline the way
/// the list shows them. Form validation errors are returned.
pub async fn list_table(
    resource: Resource,
    dispatcher: &RequestDispatcher,
    pagination: &PaginationConfig,
    request: &ListRequest,
) -> Result<String, ValidationError> {
    match resource {
        Resource::Enterprises => list_with(&enterprises::PAGE, dispatcher, pagination, request).await,
        Resource::Imports => list_with(&imports::PAGE, dispatcher, pagination, request).await,
        Resource::Plants => list_with(&plants::PAGE, dispatcher, pagination, request).await,
        Resource::Tasks => list_with(&quarantine::PAGE, dispatcher, pagination, request).await,
        Resource::Lab => list_with(&lab::PAGE, dispatcher, pagination, request).await,
    }
}

async fn list_with<T: ListRecord>(
    spec: &PageSpec<T>,
    dispatcher: &RequestDispatcher,
    pagination: &PaginationConfig,
    request: &ListRequest,
) -> Result<String, ValidationError> {
    let filters = spec.search.submit(&request.form_values(&spec.search)?)?;

    let mut list = PaginatedList::<T>::new(dispatcher.clone(), spec.path, pagination.clone())
        .with_filters(filters);
    if let Some(size) = request.page_size {
        list = list.with_page_size(size);
    }
    list.change_page(request.page.max(1)).await;

    Ok(render::render_list(spec, &list))
}

/// Drop cached reads a write to `resource` makes stale
///
/// Every resource feeds the report summary, so its entry goes too.
pub fn invalidate_after_write(resource: Resource, dispatcher: &RequestDispatcher) -> usize {
    dispatcher.invalidate(Some(resource.path())) + dispatcher.invalidate(Some(SUMMARY_PATH))
}

/// Fetch one record and render it as a field/value table
pub async fn detail_table(
    resource: Resource,
    dispatcher: &RequestDispatcher,
    id: &str,
) -> Result<String, crate::errors::RequestError> {
    let path = format!("{}/{}", resource.path(), id);
    let record: Value = dispatcher.get(&path, Default::default()).await?;
    Ok(render::render_detail(resource.title(), &record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_lands_on_date_range_field() {
        let request = ListRequest {
            keyword: Some("orchid".to_string()),
            from: Some("2024-01-01".to_string()),
            to: None,
            ..Default::default()
        };
        let values = request
            .form_values(Resource::Imports.search_form())
            .expect("imports declares a range");

        assert_eq!(values["keyword"], Value::String("orchid".to_string()));
        let range_field = Resource::Imports
            .search_form()
            .fields
            .iter()
            .find(|f| f.field_type == SearchFieldType::DateRange)
            .expect("imports page has a date range");
        assert_eq!(
            values[&range_field.name],
            serde_json::json!(["2024-01-01", null])
        );
    }

    #[test]
    fn test_every_page_submits_an_empty_form() {
        for resource in [
            Resource::Enterprises,
            Resource::Imports,
            Resource::Plants,
            Resource::Tasks,
            Resource::Lab,
        ] {
            let params = resource
                .search_form()
                .submit(&Map::new())
                .expect("no required fields");
            assert!(params.is_empty(), "{:?} produced {:?}", resource, params);
        }
    }

    #[test]
    fn test_undeclared_select_is_rejected() {
        let request = ListRequest {
            selects: [("status".to_string(), "SUSPENDED".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        assert!(matches!(
            request.form_values(Resource::Lab.search_form()),
            Err(ValidationError::InvalidField { ref field, .. }) if field == "status"
        ));
        assert!(request
            .form_values(Resource::Enterprises.search_form())
            .is_ok());
    }

    #[test]
    fn test_filter_from_another_page_is_rejected() {
        let request = ListRequest {
            selects: [("priority".to_string(), "URGENT".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        assert!(request
            .form_values(Resource::Enterprises.search_form())
            .is_err());
        assert!(request.form_values(Resource::Tasks.search_form()).is_ok());
    }
}
