//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout, body limit)
//!     → route match on path; wrong method → 405 before anything else
//!     → middleware/access_control.rs (X-Password gate)
//!     → middleware/tracking.rs (metrics)
//!     → levels.rs / endpoints.rs (handler)
//!     → Send to client
//! ```

pub mod endpoints;
pub mod levels;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
