//! TLS configuration and certificate loading.
//!
//! Certificate material is read exactly once at startup and shared,
//! read-only, by every connection for the process lifetime. Any problem
//! with the material is a fatal startup error; a handshake failure on an
//! individual connection is axum-server's to drop and never reaches here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Once;

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::TlsConfig;

static CRYPTO_PROVIDER: Once = Once::new();

/// Pick the process-level rustls crypto provider.
///
/// Feature unification can enable more than one rustls backend in the same
/// build, in which case rustls refuses to choose one on its own. Install
/// aws-lc-rs explicitly before any TLS config is built.
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Errors loading certificate material at startup.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("certificate file not found: {0}")]
    CertNotFound(String),

    #[error("private key file not found: {0}")]
    KeyNotFound(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificates found in {0}")]
    EmptyCertChain(String),

    #[error("no usable private key found in {0}")]
    NoPrivateKey(String),

    #[error("failed to build TLS config: {0}")]
    Build(std::io::Error),
}

/// Load TLS configuration from certificate chain and private key files.
///
/// Both files are validated as PEM before handing them to rustls so that
/// startup failures name the offending file rather than a generic TLS error.
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    install_crypto_provider();

    let cert_path = Path::new(&config.cert_path);
    let key_path = Path::new(&config.key_path);

    if !cert_path.exists() {
        return Err(TlsError::CertNotFound(config.cert_path.clone()));
    }
    if !key_path.exists() {
        return Err(TlsError::KeyNotFound(config.key_path.clone()));
    }

    validate_pem(cert_path, key_path, config)?;

    RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(TlsError::Build)
}

/// Check the certificate file holds at least one certificate and the key
/// file holds a recognized private key.
fn validate_pem(cert_path: &Path, key_path: &Path, config: &TlsConfig) -> Result<(), TlsError> {
    let cert_file = File::open(cert_path).map_err(|e| TlsError::Read {
        path: config.cert_path.clone(),
        source: e,
    })?;
    let certs: Vec<_> = rustls_pemfile::certs(&mut BufReader::new(cert_file))
        .collect::<Result<_, _>>()
        .map_err(|e| TlsError::Read {
            path: config.cert_path.clone(),
            source: e,
        })?;
    if certs.is_empty() {
        return Err(TlsError::EmptyCertChain(config.cert_path.clone()));
    }

    let key_file = File::open(key_path).map_err(|e| TlsError::Read {
        path: config.key_path.clone(),
        source: e,
    })?;
    let key = rustls_pemfile::private_key(&mut BufReader::new(key_file)).map_err(|e| {
        TlsError::Read {
            path: config.key_path.clone(),
            source: e,
        }
    })?;
    if key.is_none() {
        return Err(TlsError::NoPrivateKey(config.key_path.clone()));
    }

    Ok(())
}
