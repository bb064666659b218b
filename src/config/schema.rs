//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty config file (or no config file at
//! all) reproduces the stock behavior: HTTPS on port 8443, certificates
//! under `certs/`, content served from the process working directory.

use serde::{Deserialize, Serialize};

/// Root configuration for the static file server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, in-flight limit).
    pub listener: ListenerConfig,

    /// TLS certificate material paths.
    pub tls: TlsConfig,

    /// Content root and directory handling.
    pub content: ContentConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8443").
    pub bind_address: String,

    /// Maximum requests handled concurrently across all connections.
    pub max_in_flight: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8443".to_string(),
            max_in_flight: 10_000,
        }
    }
}

/// TLS configuration for the listener.
///
/// Both files are read exactly once at startup; there is no reload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "certs/fullchain.pem".to_string(),
            key_path: "certs/privkey.pem".to_string(),
        }
    }
}

/// Content serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory served as the content root.
    pub root: String,

    /// File names tried, in order, when a directory is requested.
    pub index_files: Vec<String>,

    /// Generate an HTML listing for directories with no index file.
    pub directory_listing: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            directory_listing: true,
        }
    }
}
