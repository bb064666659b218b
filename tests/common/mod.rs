//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tls_fileserver::config::ServerConfig;
use tls_fileserver::http::HttpServer;
use tls_fileserver::net;

/// Write a throwaway self-signed certificate pair into `dir`.
/// Returns (cert_path, key_path).
pub fn write_self_signed(dir: &Path) -> (PathBuf, PathBuf) {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".into()]).unwrap();
    let cert_path = dir.join("fullchain.pem");
    let key_path = dir.join("privkey.pem");
    std::fs::write(&cert_path, cert.cert.pem()).unwrap();
    std::fs::write(&key_path, cert.key_pair.serialize_pem()).unwrap();
    (cert_path, key_path)
}

/// Build a config serving `root` on an ephemeral localhost port with the
/// certificate pair from `cert_dir`.
pub fn test_config(root: &Path, cert_dir: &Path) -> ServerConfig {
    let (cert_path, key_path) = write_self_signed(cert_dir);
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.tls.cert_path = cert_path.to_string_lossy().into_owned();
    config.tls.key_path = key_path.to_string_lossy().into_owned();
    config.content.root = root.to_string_lossy().into_owned();
    config
}

/// Bind, load TLS material and spawn the server. Returns the bound address.
pub async fn start_server(config: ServerConfig) -> SocketAddr {
    let listener = net::bind(&config.listener).unwrap();
    let addr = listener.local_addr().unwrap();
    let tls = net::load_tls_config(&config.tls).await.unwrap();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, tls).await;
    });

    addr
}

/// HTTPS client that trusts the self-signed test certificate.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .unwrap()
}

/// Like [`client`], but without following redirects.
#[allow(dead_code)]
pub fn client_no_redirect() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Poll the server root until it answers, panicking after a bounded wait.
pub async fn wait_until_ready(client: &reqwest::Client, addr: SocketAddr) {
    for _ in 0..50 {
        if client
            .get(format!("https://{}/", addr))
            .send()
            .await
            .is_ok()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server did not become reachable on {}", addr);
}
