//! Content serving subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → resolve.rs (decode, map onto root, classify)
//!     → file: stream bytes with inferred content-type
//!     → directory: index file if present, else index.rs listing
//!     → missing/denied: 404 / 403
//! ```
//!
//! # Design Decisions
//! - The root and index file list are fixed at startup and shared read-only
//! - Existence and permissions are checked per request, never cached

pub mod index;
pub mod resolve;

pub use index::render_listing;
pub use resolve::{resolve, Resolved};
