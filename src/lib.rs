//! HTTP quest: a chain of password-gated HTTP challenges.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod quest;

pub use config::schema::QuestConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
