//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared with listener, TLS and content subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload or watch
//! - All fields have defaults so running with no config file works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ContentConfig, ListenerConfig, ServerConfig, TlsConfig};
