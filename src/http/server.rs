//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router dispatching every path to the content handler
//! - Wire up middleware (tracing, global in-flight limit)
//! - Serve over TLS via axum-server
//! - Answer GET/HEAD with file bytes, listings, or error statuses
//!
//! Connections are accepted by axum-server, which performs the TLS
//! handshake and runs each connection on its own task. A handshake
//! failure drops that connection only; the accept loop keeps going.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::content::{render_listing, resolve, Resolved};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentState>,
}

/// Read-only content settings shared by all connections.
pub struct ContentState {
    pub root: PathBuf,
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

/// HTTPS static file server.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState {
            content: Arc::new(ContentState {
                root: PathBuf::from(&config.content.root),
                index_files: config.content.index_files.clone(),
                directory_listing: config.content.directory_listing,
            }),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(serve_content))
            .route("/", any(serve_content))
            .with_state(state)
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_in_flight))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on a bound listener, terminating TLS with `tls`.
    ///
    /// Blocks until the process is externally terminated; there is no
    /// graceful shutdown path.
    pub async fn run(
        self,
        listener: std::net::TcpListener,
        tls: RustlsConfig,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.content.root,
            "HTTPS server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum_server::from_tcp_rustls(listener, tls).serve(app).await
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Main content handler.
/// Resolves the request path under the content root and answers GET/HEAD.
async fn serve_content(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        peer_addr = %addr,
        method = %method,
        path = %path,
        "Handling request"
    );

    let head_only = match method {
        Method::GET => false,
        Method::HEAD => true,
        _ => {
            let mut response =
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed\n").into_response();
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
            return response;
        }
    };

    // Stock conditional GET: If-Modified-Since is honored only when the
    // client sent no If-None-Match (we emit no ETags to match against).
    let if_modified_since = if request.headers().contains_key(header::IF_NONE_MATCH) {
        None
    } else {
        request
            .headers()
            .get(header::IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| httpdate::parse_http_date(s).ok())
    };

    let content = &state.content;
    match resolve(&content.root, &path).await {
        Resolved::File { path, metadata } => {
            serve_file(&path, &metadata, head_only, if_modified_since).await
        }
        Resolved::Directory { path: dir } => {
            // Index file short-circuits the listing.
            for name in &content.index_files {
                let candidate = dir.join(name);
                if let Ok(metadata) = tokio::fs::metadata(&candidate).await {
                    if metadata.is_file() {
                        return serve_file(&candidate, &metadata, head_only, if_modified_since)
                            .await;
                    }
                }
            }

            if !content.directory_listing {
                return not_found();
            }

            match render_listing(&dir, &path).await {
                Ok(html) => listing_response(html, head_only),
                Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => forbidden(),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Failed to read directory");
                    not_found()
                }
            }
        }
        Resolved::Redirect { location } => match HeaderValue::from_str(&location) {
            Ok(value) => {
                let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
                response.headers_mut().insert(header::LOCATION, value);
                response
            }
            Err(_) => not_found(),
        },
        Resolved::NotFound => not_found(),
        Resolved::Forbidden => forbidden(),
    }
}

/// Serve a regular file with inferred content-type and caching metadata.
async fn serve_file(
    path: &std::path::Path,
    metadata: &std::fs::Metadata,
    head_only: bool,
    if_modified_since: Option<std::time::SystemTime>,
) -> Response {
    if let (Some(since), Ok(modified)) = (if_modified_since, metadata.modified()) {
        if !modified_after(modified, since) {
            return StatusCode::NOT_MODIFIED.into_response();
        }
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    // HEAD reports the metadata length; GET reports the length of the
    // bytes actually read so header and body never disagree.
    let (body, length) = if head_only {
        (Body::empty(), metadata.len())
    } else {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let length = bytes.len() as u64;
                (Body::from(bytes), length)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return not_found(),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => return forbidden(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error\n")
                    .into_response();
            }
        }
    };

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    if let Ok(modified) = metadata.modified() {
        if let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(modified)) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
    response
}

/// Whether the file changed after the client's cached timestamp.
///
/// The mtime is truncated to whole seconds before comparing, since HTTP
/// dates carry no sub-second precision.
fn modified_after(modified: std::time::SystemTime, since: std::time::SystemTime) -> bool {
    use std::time::{Duration, UNIX_EPOCH};
    match modified.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => {
            let truncated = UNIX_EPOCH + Duration::from_secs(elapsed.as_secs());
            truncated > since
        }
        // Pre-epoch mtimes cannot be meaningfully compared; serve the file.
        Err(_) => true,
    }
}

/// Build the response for a rendered directory listing.
fn listing_response(html: String, head_only: bool) -> Response {
    let length = html.len();
    let body = if head_only {
        Body::empty()
    } else {
        Body::from(html)
    };

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found\n").into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Permission denied\n").into_response()
}
