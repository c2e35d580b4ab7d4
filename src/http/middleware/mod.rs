//! Per-level middleware.
//!
//! Layered on each level route, outermost first:
//! ```text
//! access_control (X-Password gate) → tracking (metrics + outcome log) → handler
//! ```

pub mod access_control;
pub mod tracking;

pub use access_control::{require_password, PasswordGate, X_PASSWORD};
pub use tracking::track_level;
