use super::{choices, PageSpec};
use crate::domain::{Enterprise, EnterpriseStatus, EnterpriseType};
use crate::table::{ColumnDescriptor, DataIndex, SearchFieldDescriptor, SearchForm};
use once_cell::sync::Lazy;

pub static PAGE: Lazy<PageSpec<Enterprise>> = Lazy::new(|| PageSpec {
    title: "Enterprises",
    path: "/api/enterprises",
    columns: vec![
        ColumnDescriptor::new("Code", DataIndex::field("code")),
        ColumnDescriptor::new("Name", DataIndex::field("name")),
        ColumnDescriptor::new("Type", DataIndex::field("type"))
            .with_render(|_, e: &Enterprise| e.enterprise_type.label().to_string()),
        ColumnDescriptor::new("Status", DataIndex::field("status"))
            .with_render(|_, e: &Enterprise| e.status.label().to_string()),
        ColumnDescriptor::new("Contact", DataIndex::path(&["contact", "name"])),
        ColumnDescriptor::new("Phone", DataIndex::path(&["contact", "phone"])),
        ColumnDescriptor::new("License expires", DataIndex::field("licenseExpiresAt")),
        ColumnDescriptor::new("Registered", DataIndex::field("registeredAt")),
    ],
    search: SearchForm::new(vec![
        SearchFieldDescriptor::text("keyword", "Name or code"),
        SearchFieldDescriptor::select(
            "status",
            "Status",
            choices(EnterpriseStatus::ALL.iter().map(|s| (s.label(), s.as_str()))),
        ),
        SearchFieldDescriptor::select(
            "type",
            "Type",
            choices(EnterpriseType::ALL.iter().map(|t| (t.label(), t.as_str()))),
        ),
        SearchFieldDescriptor::date_range("registeredAt", "Registered between"),
    ]),
});
