//! Quest subsystem: the level chain and everything the levels verify.
//!
//! # Data Flow
//! ```text
//! QuestConfig
//!     → vault.rs (passwords + secrets, read-only after startup)
//!
//! Request to /level/N (after the X-Password gate in http::middleware):
//!     → http::levels handler for level N
//!         → transform.rs (reverse, base64, mask)
//!         → redirect.rs (chain-of-secrets walk)
//!         → schema.rs (JSON body validation)
//!     → response.rs (reward payload) or error.rs (QuestError)
//! ```
//!
//! # Design Decisions
//! - Every level is stateless; the redirect walk keeps its position in the query string
//! - Pure functions here, axum types only at the edges (error.rs, response.rs)

pub mod error;
pub mod level;
pub mod redirect;
pub mod response;
pub mod schema;
pub mod transform;
pub mod vault;

pub use error::QuestError;
pub use level::Level;
pub use redirect::{ChainStep, RedirectChain};
pub use response::{FinishResponse, PasswordResponse};
pub use schema::{FieldErrors, NumberPayload, SecretPayload};
pub use vault::Vault;

/// The number the guess_number level is waiting for.
pub const SECRET_NUMBER: i64 = 372;

/// Decoy handed out in the body by the header level.
pub const DECOY_PASSWORD: &str = "qwerty";
