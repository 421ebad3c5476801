//! Mock REST backend
//!
//! Serves the seeded `MockStore` under `/api` using the `{ code, message, data }`
//! envelope. Every response is HTTP 200; failures are carried in `code`.

pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{build_app, start_server, ServerHandle};
pub use state::AppState;
