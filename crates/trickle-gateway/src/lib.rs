//! # Trickle Gateway
//!
//! HTTP API over the assistant. Responses are JSON and gzip-compressed
//! when the client accepts it.

pub mod errors;
pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
