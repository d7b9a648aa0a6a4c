use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{create_root_container, create_test_part, send_json};
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn create_operation(app: &axum::Router) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/operations",
        Some(json!({ "name": "Miniprep", "description": "Plasmid extraction run" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Operation creation failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_plan(app: &axum::Router, operation_id: &str, parent_id: Option<&str>) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/plans",
        Some(json!({
            "name": "Plan",
            "description": "Test plan",
            "status": "planned",
            "operation_id": operation_id,
            "parent_id": parent_id,
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Plan creation failed: {body}");
    body
}

#[tokio::test]
async fn test_plan_with_items() {
    let app = setup_test_app().await;
    let operation_id = create_operation(&app).await;
    let (container_id, _) = create_root_container(&app).await.unwrap();
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let (status, plan) = send_json(
        &app,
        "POST",
        "/api/plans",
        Some(json!({
            "name": "Pick colonies",
            "description": "Pick and grow",
            "status": "planned",
            "operation_id": operation_id,
            "items": [
                { "kind": "container", "item_id": container_id },
                { "kind": "part", "item_id": part_id },
                { "kind": "part", "item_id": part_id }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Create failed: {plan}");
    assert_eq!(plan["items"].as_array().unwrap().len(), 2);
    let plan_id = plan["id"].as_str().unwrap();

    // A part id is not a container
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/plans/{plan_id}/items"),
        Some(json!([{ "kind": "container", "item_id": part_id }])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/plans/{plan_id}/items/part/{part_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_json(&app, "GET", &format!("/api/plans/{plan_id}"), None).await;
    assert_eq!(
        body["items"],
        json!([{ "kind": "container", "item_id": container_id }])
    );
}

#[tokio::test]
async fn test_plan_requires_known_operation() {
    let app = setup_test_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/plans",
        Some(json!({
            "name": "Orphan",
            "description": "",
            "status": "planned",
            "operation_id": Uuid::new_v4(),
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plan_parent_cycle_is_rejected() {
    let app = setup_test_app().await;
    let operation_id = create_operation(&app).await;
    let parent = create_plan(&app, &operation_id, None).await;
    let parent_id = parent["id"].as_str().unwrap();
    let child = create_plan(&app, &operation_id, Some(parent_id)).await;
    let child_id = child["id"].as_str().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/plans/{parent_id}"),
        Some(json!({ "parent_id": child_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/plans?parent_id={parent_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_executed_plan_cannot_be_deleted() {
    let app = setup_test_app().await;
    let operation_id = create_operation(&app).await;
    let parent = create_plan(&app, &operation_id, None).await;
    let parent_id = parent["id"].as_str().unwrap();
    let child = create_plan(&app, &operation_id, Some(parent_id)).await;
    let child_id = child["id"].as_str().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/plans/{child_id}"),
        Some(json!({ "status": "executed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for id in [child_id, parent_id] {
        let (status, body) = send_json(&app, "DELETE", &format!("/api/plans/{id}"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "PROTECTED_RESOURCE");
    }

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/plans/{child_id}"),
        Some(json!({ "status": "trashed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "DELETE", &format!("/api/plans/{parent_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app, "GET", &format!("/api/plans/{child_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_plan_subtree_is_deleted_from_the_leaves_up() {
    let app = setup_test_app().await;
    let operation_id = create_operation(&app).await;
    let root = create_plan(&app, &operation_id, None).await;
    let root_id = root["id"].as_str().unwrap();
    let middle = create_plan(&app, &operation_id, Some(root_id)).await;
    let middle_id = middle["id"].as_str().unwrap();
    let leaf = create_plan(&app, &operation_id, Some(middle_id)).await;
    let leaf_id = leaf["id"].as_str().unwrap();
    let sibling = create_plan(&app, &operation_id, Some(root_id)).await;
    let sibling_id = sibling["id"].as_str().unwrap();

    let (status, body) = send_json(&app, "DELETE", &format!("/api/plans/{root_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT, "Subtree delete failed: {body}");

    for id in [root_id, middle_id, leaf_id, sibling_id] {
        let (status, _) = send_json(&app, "GET", &format!("/api/plans/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "Plan {id} survived");
    }
}
