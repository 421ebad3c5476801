use super::{choices, PageSpec};
use crate::domain::{Priority, QuarantineTask, TaskStatus};
use crate::table::{ColumnDescriptor, DataIndex, SearchFieldDescriptor, SearchForm};
use once_cell::sync::Lazy;

pub static PAGE: Lazy<PageSpec<QuarantineTask>> = Lazy::new(|| PageSpec {
    title: "Quarantine tasks",
    path: "/api/quarantine/tasks",
    columns: vec![
        ColumnDescriptor::new("Task no.", DataIndex::field("taskNo")),
        ColumnDescriptor::new("Title", DataIndex::field("title")),
        ColumnDescriptor::new("Inspector", DataIndex::path(&["inspector", "name"])),
        ColumnDescriptor::new("Department", DataIndex::path(&["inspector", "department"])),
        ColumnDescriptor::new("Priority", DataIndex::field("priority"))
            .with_render(|_, t: &QuarantineTask| t.priority.label().to_string()),
        ColumnDescriptor::new("Status", DataIndex::field("status"))
            .with_render(|_, t: &QuarantineTask| t.status.label().to_string()),
        ColumnDescriptor::new("Created", DataIndex::field("createdAt")),
        ColumnDescriptor::new("Deadline", DataIndex::field("deadline")),
    ],
    search: SearchForm::new(vec![
        SearchFieldDescriptor::text("keyword", "Title or task no."),
        SearchFieldDescriptor::select(
            "status",
            "Status",
            choices(TaskStatus::ALL.iter().map(|s| (s.label(), s.as_str()))),
        ),
        SearchFieldDescriptor::select(
            "priority",
            "Priority",
            choices(Priority::ALL.iter().map(|p| (p.label(), p.as_str()))),
        ),
        SearchFieldDescriptor::date_range("createdAt", "Created between"),
    ]),
});
