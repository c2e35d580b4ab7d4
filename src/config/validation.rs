//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every level has a distinct, non-empty password
//! - Redirect chain is walkable: non-empty, no blank or repeated tokens
//! - Mask secret and finish password have the same length
//! - Addresses parse, limits are positive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: QuestConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::QuestConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("password for level `{0}` is empty")]
    EmptyPassword(&'static str),

    #[error("levels `{first}` and `{second}` share the same password")]
    DuplicatePassword {
        first: &'static str,
        second: &'static str,
    },

    #[error("secret `{0}` is empty")]
    EmptySecret(&'static str),

    #[error("redirect chain is empty")]
    EmptyRedirectChain,

    #[error("redirect chain token #{0} is empty")]
    EmptyRedirectToken(usize),

    #[error("redirect chain token `{0}` appears more than once")]
    DuplicateRedirectToken(String),

    #[error("mask secret has {secret} characters but finish password has {password}")]
    MaskLengthMismatch { secret: usize, password: usize },

    #[error("invalid {field} `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &QuestConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let passwords = &config.passwords;
    let named = [
        ("plain", &passwords.plain),
        ("reverse", &passwords.reverse),
        ("base64", &passwords.base64),
        ("header", &passwords.header),
        ("delete", &passwords.delete),
        ("user_agent", &passwords.user_agent),
        ("accept_language", &passwords.accept_language),
        ("redirect", &passwords.redirect),
        ("robots", &passwords.robots),
        ("guess_number", &passwords.guess_number),
        ("mask", &passwords.mask),
        ("finish", &passwords.finish),
    ];

    let mut seen: HashMap<&str, &'static str> = HashMap::new();
    for (level, password) in named {
        if password.is_empty() {
            errors.push(ValidationError::EmptyPassword(level));
            continue;
        }
        if let Some(first) = seen.insert(password.as_str(), level) {
            errors.push(ValidationError::DuplicatePassword {
                first,
                second: level,
            });
        }
    }

    let secrets = &config.secrets;
    if secrets.robots.is_empty() {
        errors.push(ValidationError::EmptySecret("robots"));
    }
    if secrets.mask.is_empty() {
        errors.push(ValidationError::EmptySecret("mask"));
    }

    if secrets.redirect_chain.is_empty() {
        errors.push(ValidationError::EmptyRedirectChain);
    }
    let mut tokens = HashMap::new();
    for (i, token) in secrets.redirect_chain.iter().enumerate() {
        if token.is_empty() {
            errors.push(ValidationError::EmptyRedirectToken(i));
        } else if tokens.insert(token.as_str(), i).is_some() {
            errors.push(ValidationError::DuplicateRedirectToken(token.clone()));
        }
    }

    let secret_len = secrets.mask.chars().count();
    let password_len = passwords.finish.chars().count();
    if secret_len != password_len {
        errors.push(ValidationError::MaskLengthMismatch {
            secret: secret_len,
            password: password_len,
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
