//! Jubilee API crate - axum HTTP server and route handlers.
//!
//! Exposes the agent over HTTP: a JSONRPC message entry point, the
//! well-known agent card, structured birthday and wish endpoints, the
//! webhook trigger for the daily check, and a health check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
