//! Request layer
//!
//! - `request` - request descriptors and cache keys
//! - `envelope` - the `{ code, message, data }` wire envelope and page payloads
//! - `client` - the transport trait and its reqwest implementation
//! - `dispatcher` - cache-aware request execution

pub mod client;
pub mod dispatcher;
pub mod envelope;
pub mod request;

pub use client::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use dispatcher::{ErrorCallback, RequestDispatcher};
pub use envelope::{ApiEnvelope, PageData};
pub use request::{HttpMethod, QueryParams, RequestDescriptor};
