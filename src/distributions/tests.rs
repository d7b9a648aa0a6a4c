use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{
    create_root_container, create_test_distribution, create_test_part_with_gene_id,
    create_test_plate, create_test_plateset, create_test_sample, plate_well_ids, send_json,
};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_distribution_plates_and_parts() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_a, _) = create_test_plate(&app, &root_id).await.unwrap();
    let (plate_b, _) = create_test_plate(&app, &root_id).await.unwrap();

    let (part_z, _) = create_test_part_with_gene_id(&app, "BBF10K_000200").await.unwrap();
    let (part_y, _) = create_test_part_with_gene_id(&app, "BBF10K_000100").await.unwrap();
    let wells_a = plate_well_ids(&app, &plate_a).await;
    let wells_b = plate_well_ids(&app, &plate_b).await;
    // The same part on both plates is reported once
    create_test_sample(&app, &part_z, &[wells_a[0].clone(), wells_b[0].clone()])
        .await
        .unwrap();
    create_test_sample(&app, &part_y, &wells_b[1..2]).await.unwrap();

    let (set_a, _) = create_test_plateset(&app, &[plate_a.clone()]).await.unwrap();
    let (set_b, body) = create_test_plateset(&app, &[plate_a.clone(), plate_b.clone()])
        .await
        .unwrap();
    assert_eq!(body["plate_ids"].as_array().unwrap().len(), 2);

    let (distribution_id, body) = create_test_distribution(&app, &[set_a, set_b])
        .await
        .expect("distribution creation should succeed");
    assert_eq!(body["plateset_ids"].as_array().unwrap().len(), 2);

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/distributions/{distribution_id}/plates"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2, "Plates are unique: {body}");

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/distributions/{distribution_id}/parts"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let gene_ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["gene_id"].as_str().unwrap())
        .collect();
    assert_eq!(gene_ids, vec!["BBF10K_000100", "BBF10K_000200"]);
}

#[tokio::test]
async fn test_membership_changes_leave_children_intact() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_id, _) = create_test_plate(&app, &root_id).await.unwrap();
    let (plateset_id, _) = create_test_plateset(&app, &[]).await.unwrap();
    let (distribution_id, _) = create_test_distribution(&app, &[]).await.unwrap();

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/platesets/{plateset_id}/plates"),
        Some(json!({ "plate_ids": [plate_id, plate_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Adding plates failed: {body}");
    assert_eq!(body["plate_ids"], json!([plate_id]));

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/distributions/{distribution_id}/platesets"),
        Some(json!({ "plateset_ids": [plateset_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Adding platesets failed: {body}");
    assert_eq!(body["plateset_ids"], json!([plateset_id]));

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/distributions/{distribution_id}/platesets"),
        Some(json!({ "plateset_ids": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/distributions/{distribution_id}/platesets/{plateset_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/distributions/{distribution_id}/platesets/{plateset_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting the plateset keeps its plate
    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/platesets/{plateset_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app, "GET", &format!("/api/plates/{plate_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/distributions/{distribution_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_plateset_plate_listing() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_id, _) = create_test_plate(&app, &root_id).await.unwrap();
    let (plateset_id, _) = create_test_plateset(&app, &[plate_id.clone()]).await.unwrap();

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/platesets/{plateset_id}/plates"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], plate_id);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/platesets/{plateset_id}/plates/{plate_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_json(&app, "GET", &format!("/api/platesets/{plateset_id}"), None).await;
    assert_eq!(body["plate_ids"], json!([]));

    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/api/platesets/{}/plates", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_plateset_rejects_unknown_plates() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_id, _) = create_test_plate(&app, &root_id).await.unwrap();

    // Create goes through the plateset's create hook
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/platesets",
        Some(json!({
            "name": "ghost set",
            "description": "",
            "plate_ids": [plate_id, Uuid::new_v4()]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Unknown plate accepted: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let (_, listed) = send_json(&app, "GET", "/api/platesets", None).await;
    assert!(listed.as_array().unwrap().is_empty(), "The failed create was rolled back");

    let (plateset_id, _) = create_test_plateset(&app, &[]).await.unwrap();
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/platesets/{plateset_id}/plates"),
        Some(json!({ "plate_ids": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'plate_ids'")
    );
}
