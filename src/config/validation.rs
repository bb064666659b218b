//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses as a socket address
//! - Check certificate paths are non-empty
//! - Check index file names are bare names, not paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to (e.g., "listener.bind_address").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!(
                "not a valid socket address: {:?}",
                config.listener.bind_address
            ),
        });
    }

    if config.listener.max_in_flight == 0 {
        errors.push(ValidationError {
            field: "listener.max_in_flight".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.tls.cert_path.is_empty() {
        errors.push(ValidationError {
            field: "tls.cert_path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.tls.key_path.is_empty() {
        errors.push(ValidationError {
            field: "tls.key_path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.content.root.is_empty() {
        errors.push(ValidationError {
            field: "content.root".into(),
            message: "must not be empty".into(),
        });
    }

    for name in &config.content.index_files {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            errors.push(ValidationError {
                field: "content.index_files".into(),
                message: format!("index file name must be a bare file name, got {:?}", name),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
