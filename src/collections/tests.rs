use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{create_test_part_with_gene_id, send_json};
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn create_collection(app: &axum::Router, name: &str, parent_id: Option<&str>) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/collections",
        Some(json!({ "name": name, "description": "", "parent_id": parent_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Collection create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

fn gene_ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|part| part["gene_id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_collection_parts_are_replaced() {
    let app = setup_test_app().await;
    let collection_id = create_collection(&app, "Open Yeast Collection", None).await;
    let (second, _) = create_test_part_with_gene_id(&app, "BBF10K_000002").await.unwrap();
    let (first, _) = create_test_part_with_gene_id(&app, "BBF10K_000001").await.unwrap();
    let (third, _) = create_test_part_with_gene_id(&app, "BBF10K_000003").await.unwrap();

    let uri = format!("/api/collections/{collection_id}/parts");
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "part_ids": [second, first] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Set parts failed: {body}");
    assert_eq!(gene_ids(&body), ["BBF10K_000001", "BBF10K_000002"]);

    let (status, body) = send_json(&app, "PUT", &uri, Some(json!({ "part_ids": [third] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_ids(&body), ["BBF10K_000003"]);

    let (status, body) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_ids(&body), ["BBF10K_000003"]);

    // Deleting the collection leaves its parts in place
    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/collections/{collection_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app, "GET", &format!("/api/parts/{third}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_collection_parts_reject_unknown_parts() {
    let app = setup_test_app().await;
    let collection_id = create_collection(&app, "Empty", None).await;
    let (part_id, _) = create_test_part_with_gene_id(&app, "BBF10K_000010").await.unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/collections/{collection_id}/parts"),
        Some(json!({ "part_ids": [part_id, Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'part_ids'")
    );

    let (_, body) = send_json(
        &app,
        "GET",
        &format!("/api/collections/{collection_id}/parts"),
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_collection_tags() {
    let app = setup_test_app().await;
    let collection_id = create_collection(&app, "Toolkit", None).await;
    let (_, tag) = send_json(&app, "POST", "/api/tags", Some(json!({ "tag": "moclo" }))).await;

    let uri = format!("/api/collections/{collection_id}/tags");
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "tag_ids": [tag["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Set tags failed: {body}");
    assert_eq!(body[0]["tag"], "moclo");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/collections/{}/tags", Uuid::new_v4()),
        Some(json!({ "tag_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_collection_cycle_is_a_validation_error() {
    let app = setup_test_app().await;
    let parent = create_collection(&app, "Parent", None).await;
    let child = create_collection(&app, "Child", Some(parent.as_str())).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/collections/{parent}"),
        Some(json!({ "parent_id": child })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Cycle accepted: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'parent_id'")
    );
}
