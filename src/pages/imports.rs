use super::{choices, PageSpec};
use crate::domain::{ImportRecord, ImportStatus, RiskLevel};
use crate::table::{ColumnDescriptor, DataIndex, SearchFieldDescriptor, SearchForm};
use once_cell::sync::Lazy;

pub static PAGE: Lazy<PageSpec<ImportRecord>> = Lazy::new(|| PageSpec {
    title: "Import declarations",
    path: "/api/imports",
    columns: vec![
        ColumnDescriptor::new("Declaration", DataIndex::field("declarationNo")),
        ColumnDescriptor::new("Product", DataIndex::field("productName")),
        ColumnDescriptor::new("Enterprise", DataIndex::field("enterpriseName")),
        ColumnDescriptor::new("Origin", DataIndex::field("originCountry")),
        ColumnDescriptor::new("Quantity", DataIndex::field("quantity"))
            .with_render(|_, r: &ImportRecord| format!("{} {}", r.quantity, r.unit)),
        ColumnDescriptor::new("Risk", DataIndex::field("level"))
            .with_render(|_, r: &ImportRecord| r.risk_level.label().to_string()),
        ColumnDescriptor::new("Status", DataIndex::field("status"))
            .with_render(|_, r: &ImportRecord| r.status.label().to_string()),
        ColumnDescriptor::new("Declared", DataIndex::field("declaredAt")),
    ],
    search: SearchForm::new(vec![
        SearchFieldDescriptor::text("keyword", "Product or declaration no."),
        SearchFieldDescriptor::select(
            "status",
            "Status",
            choices(ImportStatus::ALL.iter().map(|s| (s.label(), s.as_str()))),
        ),
        SearchFieldDescriptor::select(
            "level",
            "Risk level",
            choices(RiskLevel::ALL.iter().map(|l| (l.label(), l.as_str()))),
        ),
        SearchFieldDescriptor::date_range("declaredAt", "Declared between"),
    ]),
});
