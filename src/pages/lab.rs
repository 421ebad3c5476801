use super::{choices, PageSpec};
use crate::domain::{LabConclusion, LabTest};
use crate::table::{ColumnDescriptor, DataIndex, SearchFieldDescriptor, SearchForm};
use once_cell::sync::Lazy;

pub static PAGE: Lazy<PageSpec<LabTest>> = Lazy::new(|| PageSpec {
    title: "Lab tests",
    path: "/api/lab/tests",
    columns: vec![
        ColumnDescriptor::new("Sample no.", DataIndex::field("sampleNo")),
        ColumnDescriptor::new("Sample", DataIndex::field("sampleName")),
        ColumnDescriptor::new("Test item", DataIndex::field("testItem")),
        ColumnDescriptor::new("Laboratory", DataIndex::path(&["laboratory", "name"])),
        ColumnDescriptor::new("Accredited", DataIndex::path(&["laboratory", "accredited"])),
        ColumnDescriptor::new("Result", DataIndex::field("resultValue")),
        ColumnDescriptor::new("Conclusion", DataIndex::field("conclusion"))
            .with_render(|_, t: &LabTest| t.conclusion.label().to_string()),
        ColumnDescriptor::new("Tested", DataIndex::field("testedAt")),
    ],
    search: SearchForm::new(vec![
        SearchFieldDescriptor::text("keyword", "Sample name or number"),
        SearchFieldDescriptor::select(
            "conclusion",
            "Conclusion",
            choices(LabConclusion::ALL.iter().map(|c| (c.label(), c.as_str()))),
        ),
        SearchFieldDescriptor::date_range("testedAt", "Tested between"),
    ]),
});
