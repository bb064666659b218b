//! Request path to filesystem path translation.
//!
//! # Responsibilities
//! - Percent-decode the request path
//! - Map it onto the content root without ever escaping it
//! - Classify the result (file, directory, missing, forbidden)
//!
//! # Design Decisions
//! - `.` and `..` components are discarded, not resolved; a crafted path
//!   can therefore never name anything outside the root
//! - Directories requested without a trailing slash redirect to the slash
//!   form so relative links inside listings resolve correctly
//! - A trailing slash on a path naming a regular file is not found: the
//!   slash asserts "directory" and a file does not satisfy it

use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Outcome of resolving a request path against the content root.
#[derive(Debug)]
pub enum Resolved {
    /// A regular file to serve.
    File { path: PathBuf, metadata: Metadata },
    /// A directory, requested with a trailing slash.
    Directory { path: PathBuf },
    /// A directory requested without a trailing slash.
    Redirect { location: String },
    /// Nothing at that path (or an unservable special file).
    NotFound,
    /// The path exists but the process may not read it.
    Forbidden,
}

/// Resolve a raw (still percent-encoded) request path against `root`.
pub async fn resolve(root: &Path, request_path: &str) -> Resolved {
    let decoded = match urlencoding::decode(request_path) {
        Ok(s) => s,
        Err(_) => return Resolved::NotFound,
    };
    if decoded.contains('\0') {
        return Resolved::NotFound;
    }

    let mut path = root.to_path_buf();
    for component in decoded.split('/') {
        match component {
            "" | "." | ".." => continue,
            name => path.push(name),
        }
    }

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Resolved::Forbidden;
        }
        Err(_) => return Resolved::NotFound,
    };

    let trailing_slash = decoded.ends_with('/');
    if metadata.is_dir() {
        if trailing_slash {
            Resolved::Directory { path }
        } else {
            // Preserve the encoded form in the redirect target.
            Resolved::Redirect {
                location: format!("{}/", request_path),
            }
        }
    } else if metadata.is_file() {
        if trailing_slash {
            Resolved::NotFound
        } else {
            Resolved::File { path, metadata }
        }
    } else {
        // Sockets, fifos and the like are not servable.
        Resolved::NotFound
    }
}
