//! # ud-api
//!
//! REST API surface for UserDir RS: the `/v1/api/users` routes, their
//! handlers, the caller-identity extractor, and the error-to-response
//! mapping.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod representers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::AppState;
pub use routes::router;
