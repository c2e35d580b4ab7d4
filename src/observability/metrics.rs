//! Metrics collection and exposition.
//!
//! # Metrics
//! - `quest_level_attempts_total` (counter): requests that passed a level's password gate
//! - `quest_level_solved_total` (counter): requests that earned the level's reward
//!
//! Both carry a `level` label with the level name. Without an installed
//! exporter the macros are no-ops.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::quest::Level;

pub const LEVEL_ATTEMPTS: &str = "quest_level_attempts_total";
pub const LEVEL_SOLVED: &str = "quest_level_solved_total";

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!(LEVEL_ATTEMPTS, "Requests that passed a level's password gate");
    ::metrics::describe_counter!(LEVEL_SOLVED, "Requests that earned a level's reward");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_attempt(level: Level) {
    ::metrics::counter!(LEVEL_ATTEMPTS, "level" => level.name()).increment(1);
}

pub fn record_solved(level: Level) {
    ::metrics::counter!(LEVEL_SOLVED, "level" => level.name()).increment(1);
}
