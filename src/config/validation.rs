//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check endpoint URL schemes and contract address encoding
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use alloy::primitives::Address;
use std::fmt;

use crate::bridge::connection::SUPPORTED_SCHEMES;
use crate::config::schema::BridgeConfig;

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let conn = &config.connection;

    if conn.rpc_url.trim().is_empty() {
        errors.push(ValidationError::new("connection.rpc_url", "must not be empty"));
    } else if conn.rpc_url.contains("://") {
        match url::Url::parse(&conn.rpc_url) {
            Ok(url) if !SUPPORTED_SCHEMES.contains(&url.scheme()) => errors.push(
                ValidationError::new(
                    "connection.rpc_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                ),
            ),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new("connection.rpc_url", e.to_string())),
        }
    }

    if conn.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "connection.connect_timeout_secs",
            "must be greater than zero",
        ));
    }
    if conn.call_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "connection.call_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.signer.private_key_env.trim().is_empty() {
        errors.push(ValidationError::new("signer.private_key_env", "must not be empty"));
    }

    let contracts = [
        ("contracts.factory", &config.contracts.factory),
        ("contracts.rollup", &config.contracts.rollup),
        ("contracts.inbox", &config.contracts.inbox),
        ("contracts.one_step_proof", &config.contracts.one_step_proof),
    ];
    for (field, value) in contracts {
        if let Some(raw) = value {
            if let Err(e) = raw.parse::<Address>() {
                errors.push(ValidationError::new(field, format!("invalid address: {}", e)));
            }
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{}' is not a socket address", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
