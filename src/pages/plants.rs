use super::{choices, PageSpec};
use crate::domain::{IsolationPlant, PlantStatus, RiskLevel};
use crate::table::{ColumnDescriptor, DataIndex, SearchFieldDescriptor, SearchForm};
use once_cell::sync::Lazy;

pub static PAGE: Lazy<PageSpec<IsolationPlant>> = Lazy::new(|| PageSpec {
    title: "Isolation plants",
    path: "/api/plants",
    columns: vec![
        ColumnDescriptor::new("Plant code", DataIndex::field("plantCode")),
        ColumnDescriptor::new("Variety", DataIndex::field("varietyName")),
        ColumnDescriptor::new("Site", DataIndex::field("isolationSite")),
        ColumnDescriptor::new("Stage", DataIndex::field("stage"))
            .with_render(|_, p: &IsolationPlant| p.stage.label().to_string()),
        ColumnDescriptor::new("Status", DataIndex::field("status"))
            .with_render(|_, p: &IsolationPlant| p.status.label().to_string()),
        ColumnDescriptor::new("Risk", DataIndex::field("level"))
            .with_render(|_, p: &IsolationPlant| p.risk_level.label().to_string()),
        // Missing inspection renders "-"
        ColumnDescriptor::new("Last inspection", DataIndex::path(&["lastInspection", "inspectedAt"])),
        ColumnDescriptor::new("Inspector", DataIndex::path(&["lastInspection", "inspector"])),
    ],
    search: SearchForm::new(vec![
        SearchFieldDescriptor::text("keyword", "Variety or plant code"),
        SearchFieldDescriptor::select(
            "status",
            "Status",
            choices(PlantStatus::ALL.iter().map(|s| (s.label(), s.as_str()))),
        ),
        SearchFieldDescriptor::select(
            "level",
            "Risk level",
            choices(RiskLevel::ALL.iter().map(|l| (l.label(), l.as_str()))),
        ),
        SearchFieldDescriptor::date_range("plantedAt", "Planted between"),
    ]),
});
