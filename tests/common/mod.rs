//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use turfdesk::api::ApiClient;
use turfdesk::config::{ApiConfig, CredentialProvider, NoCredentials, StaticCredentials};

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Base URL of a port nothing listens on.
pub fn dead_base_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

/// Client for `base_url`, with a bearer token when `token` is set.
pub fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    let credentials: Arc<dyn CredentialProvider> = match token {
        Some(token) => Arc::new(StaticCredentials::new(token)),
        None => Arc::new(NoCredentials),
    };
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config, credentials).expect("Failed to build client")
}

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
