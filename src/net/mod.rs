//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (bind, fatal on failure)
//!     → tls.rs (load certificate material, fatal on failure)
//!     → axum-server (accept loop, TLS handshake per connection)
//!     → Hand off to HTTP layer
//!
//! Connection States:
//!     Accepted → Handshaking → {dropped on failure} → Active → Closed
//! ```
//!
//! # Design Decisions
//! - Bind and certificate errors are terminal; the operator fixes and restarts
//! - A failed handshake drops only that connection, never the listener
//! - TLS context is built once and shared read-only across all connections

pub mod listener;
pub mod tls;

pub use listener::{bind, ListenerError};
pub use tls::{load_tls_config, TlsError};
