use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{
    create_root_container, create_test_distribution, create_test_part_with_gene_id,
    create_test_plate, create_test_plateset, create_test_sample, plate_well_ids, send_json,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn gene_ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["gene_id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = setup_test_app().await;
    create_test_part_with_gene_id(&app, "BBF10K_000301").await.unwrap();
    create_test_part_with_gene_id(&app, "BBF10K_000302").await.unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/parts",
        Some(json!({
            "name": "GFP reporter",
            "description": "Superfolder green fluorescent protein",
            "gene_id": "BBF10K_000900",
            "part_type": "cds"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, "GET", "/api/search/parts?q=bbf10k_0003", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_ids(&body), vec!["BBF10K_000301", "BBF10K_000302"]);

    let (_, body) = send_json(&app, "GET", "/api/search/parts?q=GREEN", None).await;
    assert_eq!(gene_ids(&body), vec!["BBF10K_000900"]);

    let (_, body) = send_json(&app, "GET", "/api/search/parts", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_available_only() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (plate_id, _) = create_test_plate(&app, &root_id).await.unwrap();
    let wells = plate_well_ids(&app, &plate_id).await;

    let (shipped, _) = create_test_part_with_gene_id(&app, "BBF10K_000401").await.unwrap();
    create_test_part_with_gene_id(&app, "BBF10K_000402").await.unwrap();
    create_test_sample(&app, &shipped, &wells[..1]).await.unwrap();
    let (plateset_id, _) = create_test_plateset(&app, &[plate_id]).await.unwrap();
    create_test_distribution(&app, &[plateset_id]).await.unwrap();

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/search/parts?q=BBF10K_0004&available=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_ids(&body), vec!["BBF10K_000401"]);
}

#[tokio::test]
async fn test_search_matches_wildcards_literally() {
    let app = setup_test_app().await;
    for (name, gene_id) in [
        ("50% GC promoter", "BBF10K_000501"),
        ("500 bp spacer", "BBF10K_000502"),
        ("lacI_repressor", "BBF10K_000503"),
        ("lacIXrepressor", "BBF10K_000504"),
    ] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/parts",
            Some(json!({ "name": name, "gene_id": gene_id, "part_type": "cds" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "Create failed: {body}");
    }

    // q=50%
    let (status, body) = send_json(&app, "GET", "/api/search/parts?q=50%25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_ids(&body), vec!["BBF10K_000501"]);

    let (_, body) = send_json(&app, "GET", "/api/search/parts?q=laci_", None).await;
    assert_eq!(gene_ids(&body), vec!["BBF10K_000503"]);
}
