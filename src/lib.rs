//! TLS-terminating static file server library.

pub mod config;
pub mod content;
pub mod http;
pub mod net;

pub use config::ServerConfig;
pub use http::HttpServer;
