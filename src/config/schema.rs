//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the quest server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the quest server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct QuestConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Unlock password of every level.
    pub passwords: PasswordConfig,

    /// Auxiliary secrets used by the redirect, robots and mask levels.
    pub secrets: SecretConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable output for development.
    #[default]
    Pretty,
    /// One JSON object per line for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Unlock passwords, one per level.
///
/// The password of level N is handed out as the reward of level N-1.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub plain: String,
    pub reverse: String,
    pub base64: String,
    pub header: String,
    pub delete: String,
    pub user_agent: String,
    pub accept_language: String,
    pub redirect: String,
    pub robots: String,
    pub guess_number: String,
    pub mask: String,
    /// Revealed through the mask level, so it must be as long as `secrets.mask`.
    pub finish: String,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            plain: "Bz7qKx2mWd".to_string(),
            reverse: "hT4pLs9aRe".to_string(),
            base64: "M3vYc8nQzu".to_string(),
            header: "x5WjeD1oFk".to_string(),
            delete: "Ra6tUg0bNs".to_string(),
            user_agent: "p9HcQw4LzE".to_string(),
            accept_language: "Ky2dVn8fTm".to_string(),
            redirect: "oJ7sXb3rGa".to_string(),
            robots: "e4NuPz6hCw".to_string(),
            guess_number: "Lq1mSy5vDj".to_string(),
            mask: "c8TfAr2kWx".to_string(),
            finish: "FnZuR0cT7bLqa2WmHx9v".to_string(),
        }
    }
}

/// Out-of-band secrets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretConfig {
    /// Tokens walked one redirect at a time by the redirect level.
    pub redirect_chain: Vec<String>,

    /// Secret published in robots.txt and checked by the robots level.
    pub robots: String,

    /// Ground truth compared position by position by the mask level.
    pub mask: String,
}

impl Default for SecretConfig {
    fn default() -> Self {
        let redirect_chain = [
            "itR6F7k4EA",
            "sNbQSNNMjQ",
            "8kwWsi3pos",
            "OGNqhAqqKR",
            "EQBJeRAjgZ",
            "1ISDOG1PmQ",
            "E1mlttngnT",
            "TdEW5CQfaD",
            "WECCgzfBg3",
            "D27AChlgXU",
            "aZsQKifS73",
            "d6B8h2m0WV",
            "NBzxKHhqf7",
            "a1pgijek8d",
            "z2K6Y09o0D",
            "n3ghhMg9Vk",
            "gIGp1dhqVp",
            "lZMctcrR0u",
            "aXdbPBjCRX",
            "lKTGjukENC",
        ];

        Self {
            redirect_chain: redirect_chain.iter().map(|s| s.to_string()).collect(),
            robots: "b8a1f3d2e9c4".to_string(),
            mask: "6fjeXUuve5Wm2nR6gsbQ".to_string(),
        }
    }
}
