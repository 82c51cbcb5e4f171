//! # Trickle Core
//!
//! Shared building blocks for the Trickle workspace: configuration,
//! the error type, the data model exchanged between crates, and the
//! [`FallbackProvider`](traits::FallbackProvider) seam.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::TrickleConfig;
pub use error::{Result, TrickleError};
