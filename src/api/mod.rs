// src/api/mod.rs
// HTTP API surface: router, handlers, payload types, error responses.

pub mod error;
pub mod http;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use http::http_router;
