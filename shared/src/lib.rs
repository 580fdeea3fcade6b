//! Shared types for the restaurant POS
//!
//! Domain models, request/response DTOs and the error system used by
//! pos-server and its clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
