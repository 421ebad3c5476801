//! Paginated list contract
//!
//! Declarative column and search-field descriptors plus the pagination
//! state machine every list page is driven by.

pub mod columns;
pub mod pagination;
pub mod search;

pub use columns::{display_value, headers, render_rows, resolve_value, ColumnDescriptor, DataIndex};
pub use pagination::{ListEvent, ListState, PaginatedList};
pub use search::{
    build_search_payload, SearchFieldDescriptor, SearchFieldType, SearchForm, SelectOption,
    ALL_MARKER, DATE_FORMAT, RANGE_END_PARAM, RANGE_START_PARAM,
};
