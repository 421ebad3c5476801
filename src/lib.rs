//! Quarantine records console
//!
//! Client-side core of a quarantine and inspection dashboard: a TTL request
//! cache, a cache-aware request dispatcher over the `{ code, message, data }`
//! envelope, and the declarative paginated-list contract. A seeded mock REST
//! backend (feature `web`) and a console front end sit on top.

pub mod apis;
pub mod cache;
pub mod config;
pub mod context;
pub mod domain;
pub mod errors;
pub mod logger;
pub mod mock;
pub mod pages;
pub mod table;

#[cfg(feature = "web")]
pub mod webserver;
