//! TCP listener setup.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Report bind failures with enough context to fix the config
//!
//! The bound socket is handed to axum-server, which owns the accept loop
//! and spawns one task per accepted connection. A bind failure is fatal;
//! there is no retry or fallback address.

use std::net::{SocketAddr, TcpListener};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// Bind a listener on the configured address.
///
/// The socket is switched to non-blocking mode because axum-server converts
/// it into a tokio listener at serve time.
pub fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;

    let listener = TcpListener::bind(addr).map_err(ListenerError::Bind)?;
    listener.set_nonblocking(true).map_err(ListenerError::Bind)?;

    let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

    tracing::info!(
        address = %local_addr,
        "Listener bound"
    );

    Ok(listener)
}
