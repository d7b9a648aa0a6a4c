use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{
    create_root_container, create_test_distribution, create_test_part,
    create_test_part_with_gene_id, create_test_plate, create_test_plate_with_params,
    create_test_plateset, create_test_sample, plate_well_ids, send_json,
};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_part_crud() {
    let app = setup_test_app().await;

    let (part_id, body) = create_test_part_with_gene_id(&app, "BBF10K_000001")
        .await
        .expect("part creation should succeed");
    assert_eq!(body["gene_id"], "BBF10K_000001");
    assert_eq!(body["part_type"], "cds");
    assert_eq!(body["ip_check"], false);

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/parts/{part_id}"),
        Some(json!({ "status": "syn_checked", "barcode": "ACGTACGT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body}");
    assert_eq!(body["status"], "syn_checked");
    assert_eq!(body["barcode"], "ACGTACGT");

    let (status, _) = send_json(&app, "DELETE", &format!("/api/parts/{part_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, "GET", &format!("/api/parts/{part_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_part_sequences_must_be_dna() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/parts",
        Some(json!({
            "name": "bad promoter",
            "gene_id": "BBF10K_000002",
            "part_type": "promoter",
            "original_sequence": "ATGCNNN"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Non-DNA sequence: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'original_sequence'")
    );

    let (part_id, _) = create_test_part(&app).await.unwrap();
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/parts/{part_id}"),
        Some(json!({ "primer_forward": "atgc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Lower-case primer: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = send_json(&app, "GET", &format!("/api/parts/{part_id}"), None).await;
    assert!(body["primer_forward"].is_null());
}

#[tokio::test]
async fn test_part_with_samples_is_protected() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();
    create_test_sample(&app, &part_id, &[]).await.unwrap();

    let (status, body) =
        send_json(&app, "DELETE", &format!("/api/parts/{part_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT, "Part with samples: {body}");
    assert_eq!(body["error"]["code"], "PROTECTED_RESOURCE");

    let (status, _) = send_json(&app, "GET", &format!("/api/parts/{part_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_available_parts() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_id, _) = create_test_plate(&app, &root_id).await.unwrap();
    let wells = plate_well_ids(&app, &plate_id).await;

    let (shipped_id, _) = create_test_part_with_gene_id(&app, "BBF10K_000010").await.unwrap();
    let (other_id, _) = create_test_part_with_gene_id(&app, "BBF10K_000011").await.unwrap();
    let (_, _) = create_test_part_with_gene_id(&app, "BBF10K_000012").await.unwrap();
    create_test_sample(&app, &shipped_id, &wells[..1]).await.unwrap();
    create_test_sample(&app, &other_id, &wells[1..2]).await.unwrap();

    // Nothing is available until the plate is part of a distribution
    let (status, body) = send_json(&app, "GET", "/api/parts/available", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (plateset_id, _) = create_test_plateset(&app, &[plate_id]).await.unwrap();
    create_test_distribution(&app, &[plateset_id]).await.unwrap();

    let (_, body) = send_json(&app, "GET", "/api/parts/available", None).await;
    let gene_ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["gene_id"].as_str().unwrap())
        .collect();
    assert_eq!(gene_ids, vec!["BBF10K_000010", "BBF10K_000011"]);

    let (_, body) = send_json(
        &app,
        "GET",
        "/api/parts/available?gene_ids=BBF10K_000011,BBF10K_000012",
        None,
    )
    .await;
    let filtered = body.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], other_id);
}

#[tokio::test]
async fn test_available_parts_across_many_full_plates() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();

    // 28 plates of 26x48 hold more wells than a statement can bind parameters
    let mut plate_ids = Vec::new();
    for _ in 0..28 {
        let (plate_id, _) = create_test_plate_with_params(&app, &root_id, 26, 48)
            .await
            .unwrap();
        plate_ids.push(plate_id);
    }
    let last_wells = plate_well_ids(&app, plate_ids.last().unwrap()).await;
    assert_eq!(last_wells.len(), 26 * 48);

    let (part_id, _) = create_test_part_with_gene_id(&app, "BBF10K_000020").await.unwrap();
    create_test_sample(&app, &part_id, &last_wells[last_wells.len() - 1..])
        .await
        .unwrap();
    let (plateset_id, _) = create_test_plateset(&app, &plate_ids).await.unwrap();
    let (distribution_id, _) = create_test_distribution(&app, &[plateset_id]).await.unwrap();

    let (status, body) = send_json(&app, "GET", "/api/parts/available", None).await;
    assert_eq!(status, StatusCode::OK, "Availability failed: {body}");
    let available = body.as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0]["id"], part_id);

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/distributions/{distribution_id}/parts"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Distribution parts failed: {body}");
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_part_tags_are_replaced() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let mut tag_ids = Vec::new();
    for tag in ["promoter", "open-source"] {
        let (status, body) = send_json(&app, "POST", "/api/tags", Some(json!({ "tag": tag }))).await;
        assert_eq!(status, StatusCode::CREATED);
        tag_ids.push(body["id"].as_str().unwrap().to_string());
    }

    let uri = format!("/api/parts/{part_id}/tags");
    let (status, body) = send_json(&app, "PUT", &uri, Some(json!({ "tag_ids": tag_ids }))).await;
    assert_eq!(status, StatusCode::OK, "Tagging failed: {body}");
    let tags: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["tag"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["open-source", "promoter"]);

    let (status, body) =
        send_json(&app, "PUT", &uri, Some(json!({ "tag_ids": [tag_ids[0]] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(body[0]["tag"], "promoter");

    // Deleting the tag detaches it
    let (status, _) = send_json(&app, "DELETE", &format!("/api/tags/{}", tag_ids[0]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_part_tags_reject_unknown_ids() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/parts/{part_id}/tags"),
        Some(json!({ "tag_ids": [uuid::Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send_json(&app, "GET", &format!("/api/parts/{missing}/tags"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
