use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{create_test_part_with_gene_id, send_json};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_composite(app: &axum::Router) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/composite_parts",
        Some(json!({
            "name": "GFP expression unit",
            "composite_id": "BBF10K_C0001",
            "composite_type": "base_part",
            "sequence": "ATGC"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Composite create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_composite_parts_keep_assembly_order() {
    let app = setup_test_app().await;
    let composite_id = create_composite(&app).await;
    let (promoter, _) = create_test_part_with_gene_id(&app, "BBF10K_000300").await.unwrap();
    let (cds, _) = create_test_part_with_gene_id(&app, "BBF10K_000100").await.unwrap();
    let (terminator, _) = create_test_part_with_gene_id(&app, "BBF10K_000200").await.unwrap();

    let uri = format!("/api/composite_parts/{composite_id}/parts");
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "part_ids": [promoter, cds, terminator] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Set parts failed: {body}");

    let (status, body) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|part| part["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [promoter.as_str(), cds.as_str(), terminator.as_str()]);

    // Reordering replaces the positions
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "part_ids": [terminator, promoter] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], terminator.as_str());
    assert_eq!(body[1]["id"], promoter.as_str());
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_composite_parts_reject_repeated_parts() {
    let app = setup_test_app().await;
    let composite_id = create_composite(&app).await;
    let (part_id, _) = create_test_part_with_gene_id(&app, "BBF10K_000400").await.unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/composite_parts/{composite_id}/parts"),
        Some(json!({ "part_ids": [part_id, part_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/composite_parts/{}/parts", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_composite_sequence_is_validated() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/composite_parts",
        Some(json!({ "name": "bad", "composite_id": "BBF10K_C0002", "sequence": "ATGXX" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Invalid sequence accepted: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'sequence'")
    );

    let composite_id = create_composite(&app).await;
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/composite_parts/{composite_id}"),
        Some(json!({ "sequence": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
