use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{
    create_root_container, create_test_part, create_test_plate, create_test_sample,
    plate_well_ids, send_json,
};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn part_and_wells(app: &axum::Router) -> (String, Vec<String>) {
    let (root_id, _) = create_root_container(app).await.unwrap();
    let (plate_id, _) = create_test_plate(app, &root_id).await.unwrap();
    let (part_id, _) = create_test_part(app).await.unwrap();
    (part_id, plate_well_ids(app, &plate_id).await)
}

#[tokio::test]
async fn test_sample_crud_with_wells() {
    let app = setup_test_app().await;
    let (part_id, wells) = part_and_wells(&app).await;

    let (sample_id, body) = create_test_sample(&app, &part_id, &wells[..2])
        .await
        .expect("sample creation should succeed");
    assert_eq!(body["part_id"], part_id);
    assert_eq!(body["outside_collaborator"], true);
    assert_eq!(body["well_ids"].as_array().unwrap().len(), 2);

    let (status, body) = send_json(&app, "GET", &format!("/api/samples/{sample_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evidence"], "ngs");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/samples/{sample_id}"),
        Some(json!({ "status": "mutated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body}");
    assert_eq!(body["status"], "mutated");

    // A well also knows which samples it holds
    let (status, body) = send_json(&app, "GET", &format!("/api/wells/{}", wells[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sample_ids"][0], sample_id);

    let (status, _) = send_json(&app, "DELETE", &format!("/api/samples/{sample_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, "GET", &format!("/api/samples/{sample_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sample_requires_exactly_one_reference() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/samples",
        Some(json!({ "evidence": "sanger", "well_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Unexpected: {body}");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/samples",
        Some(json!({
            "part_id": part_id,
            "composite_part_id": Uuid::new_v4(),
            "well_ids": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sample_indexes_must_be_dna() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/samples",
        Some(json!({
            "part_id": part_id,
            "index_forward": "ATGC",
            "index_reverse": "ATGX",
            "well_ids": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("index_reverse")
    );
}

#[tokio::test]
async fn test_unknown_well_is_rejected() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let err = create_test_sample(&app, &part_id, &[Uuid::new_v4().to_string()])
        .await
        .unwrap_err();
    assert!(err.contains("400 Bad Request"), "{err}");
    assert!(err.contains("'well_ids'"), "{err}");

    let (_, body) = send_json(&app, "GET", "/api/samples", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0, "Nothing should be persisted");
}

#[tokio::test]
async fn test_derivation_chain_and_lineage() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (id, _) = create_test_sample(&app, &part_id, &[]).await.unwrap();
        ids.push(id);
    }

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/samples/link_chain",
        Some(json!({ "sample_ids": ids })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Linking failed: {body}");
    assert!(body[0]["derived_from"].is_null());
    assert_eq!(body[1]["derived_from"], ids[0]);
    assert_eq!(body[2]["derived_from"], ids[1]);

    let (status, body) =
        send_json(&app, "GET", &format!("/api/samples/{}/lineage", ids[2]), None).await;
    assert_eq!(status, StatusCode::OK);
    let lineage: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(lineage, vec![ids[1].as_str(), ids[0].as_str()]);

    // The oldest sample cannot now derive from its own descendant
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/samples/{}", ids[0]),
        Some(json!({ "derived_from": ids[2] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Reversing the chain would close a loop
    let reversed: Vec<&String> = ids.iter().rev().collect();
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/samples/link_chain",
        Some(json!({ "sample_ids": reversed })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/samples?derived_from={}", ids[0]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_link_chain_rejects_short_or_duplicate_lists() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();
    let (id, _) = create_test_sample(&app, &part_id, &[]).await.unwrap();

    for sample_ids in [json!([id]), json!([id, id])] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/samples/link_chain",
            Some(json!({ "sample_ids": sample_ids })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/samples/link_chain",
        Some(json!({ "sample_ids": [id, Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_parent_sample_is_protected() {
    let app = setup_test_app().await;
    let (part_id, _) = create_test_part(&app).await.unwrap();
    let (parent_id, _) = create_test_sample(&app, &part_id, &[]).await.unwrap();

    let (status, child) = send_json(
        &app,
        "POST",
        "/api/samples",
        Some(json!({
            "part_id": part_id,
            "evidence": "derived",
            "derived_from": parent_id,
            "well_ids": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Child creation failed: {child}");

    let (status, body) =
        send_json(&app, "DELETE", &format!("/api/samples/{parent_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "PROTECTED_RESOURCE");

    let child_id = child["id"].as_str().unwrap();
    let (status, _) = send_json(&app, "DELETE", &format!("/api/samples/{child_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app, "DELETE", &format!("/api/samples/{parent_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_attach_wells_is_idempotent() {
    let app = setup_test_app().await;
    let (part_id, wells) = part_and_wells(&app).await;
    let (sample_id, _) = create_test_sample(&app, &part_id, &wells[..1]).await.unwrap();

    for _ in 0..2 {
        let (status, body) = send_json(
            &app,
            "POST",
            &format!("/api/samples/{sample_id}/wells"),
            Some(json!({ "well_ids": [wells[0], wells[1]] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "Attach failed: {body}");
        assert_eq!(body["well_ids"].as_array().unwrap().len(), 2);
    }

    let (status, body) =
        send_json(&app, "GET", &format!("/api/samples/{sample_id}/wells"), None).await;
    assert_eq!(status, StatusCode::OK);
    let addresses: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["address"].as_str().unwrap())
        .collect();
    assert_eq!(addresses, vec!["A1", "A2"]);
}
