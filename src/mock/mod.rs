//! In-memory backend data: seeded fixtures, list-query filtering and CRUD
//!
//! The axum routes in `webserver` are a thin envelope layer over `MockStore`.

pub mod filters;
pub mod fixtures;
pub mod store;

pub use filters::ListQuery;
pub use fixtures::Fixtures;
pub use store::{MockStore, StoredRecord};

use crate::errors::ErrorCode;

/// A business failure answered inside an HTTP 200 envelope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(label: &str, id: &str) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} '{}' not found", label, id),
        )
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn missing(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingParams,
            format!("Missing required field: {}", field),
        )
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessError, message)
    }
}
