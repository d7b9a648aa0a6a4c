use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::send_json;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_tag(app: &axum::Router, tag: &str) -> String {
    let (status, body) = send_json(app, "POST", "/api/tags", Some(json!({ "tag": tag }))).await;
    assert_eq!(status, StatusCode::CREATED, "Tag create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_author(app: &axum::Router) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/authors",
        Some(json!({
            "name": "Rosalind Franklin",
            "email": "rosalind@example.org",
            "affiliation": "King's College"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Author create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_author_tags_are_replaced() {
    let app = setup_test_app().await;
    let author_id = create_author(&app).await;
    let structural = create_tag(&app, "structural-biology").await;
    let imaging = create_tag(&app, "x-ray").await;

    let uri = format!("/api/authors/{author_id}/tags");
    let (status, body) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "tag_ids": [imaging, structural] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Set tags failed: {body}");
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["tag"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["structural-biology", "x-ray"]);

    // A second PUT replaces the first set
    let (status, body) =
        send_json(&app, "PUT", &uri, Some(json!({ "tag_ids": [imaging] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["tag"], "x-ray");

    // Deleting the tag detaches it
    let (status, _) = send_json(&app, "DELETE", &format!("/api/tags/{imaging}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send_json(&app, "GET", &uri, None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_author_tags_reject_unknown_tags() {
    let app = setup_test_app().await;
    let author_id = create_author(&app).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/authors/{author_id}/tags"),
        Some(json!({ "tag_ids": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/authors/{}/tags", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}
