//! Differetmix API library.
//!
//! Tutorial-style HTTP routes (greetings, path parameters, validation,
//! pagination, uploads, custom errors) plus a product lookup against a
//! document store.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod routes;
pub mod security;
pub mod store;

pub use config::Settings;
pub use http::{ApiServer, AppState};
pub use lifecycle::Shutdown;
