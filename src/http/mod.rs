//! HTTP layer subsystem.
//!
//! # Responsibilities
//! - Router construction and middleware wiring
//! - GET/HEAD dispatch to the content subsystem
//! - Error status mapping (404, 403, 405)
//!
//! # Design Decisions
//! - A single handler serves every path; there is no routing table
//! - Keep-alive and HTTP/1.1 semantics follow hyper's defaults
//! - No request timeouts; an idle client holds only its own task

pub mod server;

pub use server::HttpServer;
