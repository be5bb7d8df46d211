//! Shared fixtures for relay route tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, header};
use tempfile::TempDir;
use wm_axum::bootstrap::{CorsConfig, ServerConfig};
use wm_core::RelaySettings;

/// Write an executable shell script standing in for the wormhole tool.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-wormhole");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Server config serving `<dir>/files` with `tool` as the transfer binary.
pub fn test_config(dir: &TempDir, tool: &Path) -> ServerConfig {
    let mut relay = RelaySettings::with_defaults(dir.path().join("files"));
    relay.tool = tool.display().to_string();
    ServerConfig {
        relay,
        cors: CorsConfig::AllowAll,
    }
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
