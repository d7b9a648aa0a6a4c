use super::models::NodeInfo;
use crate::config::Config;
use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::send_json;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

#[test]
fn test_node_info_reflects_config() {
    let config = Config::for_tests();
    let info = NodeInfo::from(&config);
    assert_eq!(info.app_name, "freegenes-api-test");
    assert_eq!(info.deployment, "test");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(
        (info.plate_default_height, info.plate_default_length),
        (16, 24)
    );
}

#[tokio::test]
async fn test_healthz() {
    let app = setup_test_app().await;

    let (status, body) = send_json(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint() {
    let app = setup_test_app().await;

    let (status, body) = send_json(&app, "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deployment"], "test");
    assert_eq!(body["plate_default_height"], 16);
    assert_eq!(body["plate_default_length"], 24);
}

#[tokio::test]
async fn test_docs_embed_every_resource() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/docs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    for path in [
        "/api/containers",
        "/api/plates",
        "/api/samples/{id}/lineage",
        "/api/orders/cart",
        "/api/imports/platemap",
    ] {
        assert!(html.contains(path), "Missing {path} in the API docs");
    }
}
