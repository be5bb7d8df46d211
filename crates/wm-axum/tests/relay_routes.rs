//! Integration tests for the relay HTTP routes.
//!
//! Routes are driven in-process with `tower::ServiceExt::oneshot`; the
//! wormhole tool is replaced by a shell script.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use common::{json_post, test_config};
use wm_axum::bootstrap::{CorsConfig, bootstrap};
use wm_axum::routes::create_router;

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn router_with_tool(dir: &TempDir, tool: &std::path::Path) -> axum::Router {
    let ctx = bootstrap(&test_config(dir, tool)).unwrap();
    create_router(ctx, &CorsConfig::AllowAll)
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn bootstrap_creates_files_dir() {
    let dir = TempDir::new().unwrap();
    let _ = router_with_tool(&dir, &dir.path().join("unused"));
    assert!(dir.path().join("files").is_dir());
}

#[tokio::test]
async fn send_without_filename_fails_softly() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app.oneshot(json_post("/wormhole/send", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "filename missing");
}

#[cfg(unix)]
#[tokio::test]
async fn send_without_filename_never_spawns_tool() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("spawned");
    let tool = common::fake_tool(dir.path(), &format!("touch {}", marker.display()));
    let app = router_with_tool(&dir, &tool);

    let response = app.oneshot(json_post("/wormhole/send", "{}")).await.unwrap();

    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "filename missing");
    assert!(!marker.exists());
}

#[tokio::test]
async fn send_with_garbage_body_is_missing_filename() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(json_post("/wormhole/send", "not json"))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "filename missing");
}

#[tokio::test]
async fn send_unknown_file_names_it() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(json_post("/wormhole/send", r#"{"filename":"ghost.iso"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "file not found: ghost.iso");
}

#[tokio::test]
async fn send_rejects_path_traversal() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(json_post("/wormhole/send", r#"{"filename":"../secret"}"#))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert!(json["error"].as_str().unwrap().starts_with("invalid filename"));
}

#[tokio::test]
async fn receive_without_code_fails_softly() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(json_post("/wormhole/receive", r#"{"code":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "code missing");
}

#[cfg(unix)]
#[tokio::test]
async fn send_returns_code_printed_by_tool() {
    let dir = TempDir::new().unwrap();
    let tool = common::fake_tool(
        dir.path(),
        "echo 'Wormhole code is: 7-crypto-delta'\n\
         echo 'On the other computer, please run: wormhole receive 7-crypto-delta'\n\
         echo 'wormhole receive 9-ignored-later'",
    );
    let ctx = bootstrap(&test_config(&dir, &tool)).unwrap();
    std::fs::write(dir.path().join("files").join("movie.mkv"), b"frames").unwrap();
    let relay = ctx.relay.clone();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = app
        .oneshot(json_post("/wormhole/send", r#"{"filename":"movie.mkv"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["code"], "7-crypto-delta");

    relay.shutdown_all().await;
}

#[cfg(unix)]
#[tokio::test]
async fn receive_confirms_and_reports_exit() {
    let dir = TempDir::new().unwrap();
    let tool = common::fake_tool(
        dir.path(),
        "printf 'Receiving file (6 Bytes) into: movie.mkv\\nOK? (y/N): '\n\
         read answer\n\
         [ \"$answer\" = y ] || exit 1\n\
         echo 'Received file written to movie.mkv'",
    );
    let app = router_with_tool(&dir, &tool);

    let response = app
        .oneshot(json_post("/wormhole/receive", r#"{"code":"7-crypto-delta"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["confirmed"], true);
    assert_eq!(json["exitCode"], 0);
    assert_eq!(json["savedPath"], "movie.mkv");
}

#[cfg(unix)]
#[tokio::test]
async fn receive_ignores_exit_code_by_default() {
    let dir = TempDir::new().unwrap();
    let tool = common::fake_tool(dir.path(), "echo 'ERROR: transfer rejected' >&2\nexit 1");
    let app = router_with_tool(&dir, &tool);

    let response = app
        .oneshot(json_post("/wormhole/receive", r#"{"code":"1-node-orbit"}"#))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["exitCode"], 1);
    assert!(json.get("savedPath").is_none());
}

#[tokio::test]
async fn spawn_failure_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let ctx = bootstrap(&test_config(&dir, &dir.path().join("no-such-tool"))).unwrap();
    std::fs::write(dir.path().join("files").join("a.txt"), b"x").unwrap();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = app
        .oneshot(json_post("/wormhole/send", r#"{"filename":"a.txt"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["ok"], false);
    assert!(json["error"].as_str().unwrap().contains("failed to spawn"));
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let dir = TempDir::new().unwrap();
    let app = router_with_tool(&dir, &dir.path().join("unused"));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/wormhole/send")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn cors_origin_list_is_enforced() {
    let dir = TempDir::new().unwrap();
    let ctx = bootstrap(&test_config(&dir, &dir.path().join("unused"))).unwrap();
    let app = create_router(
        ctx,
        &CorsConfig::AllowOrigins(vec!["http://ui.test".to_string()]),
    );

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/wormhole/receive")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = app.clone().oneshot(preflight("http://ui.test")).await.unwrap();
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://ui.test"
    );

    let denied = app.oneshot(preflight("http://elsewhere.test")).await.unwrap();
    assert!(
        !denied
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}
