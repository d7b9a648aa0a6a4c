/// Shared helpers for creating test objects across the test suite
///
/// Objects follow the inventory hierarchy: Containers → Plates → Wells,
/// with Parts → Samples placed in wells, and Plates → Platesets → Distributions
/// → Orders on the shipping side.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

/// Extract response body as JSON for testing
pub async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    use axum::body::to_bytes;

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({"error": "Invalid JSON response"}))
    };
    (status, body)
}

/// Decimal fields serialize as strings; plain numbers are accepted too
pub fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => text.parse().ok(),
        Value::Number(number) => number.to_string().parse().ok(),
        _ => None,
    }
}

/// Send a request with an optional JSON body and return status plus parsed body
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    payload: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    extract_response_body(response).await
}

async fn create_or_fail(
    app: &axum::Router,
    uri: &str,
    payload: Value,
    what: &str,
) -> Result<(String, Value), String> {
    let (status, body) = send_json(app, "POST", uri, Some(payload)).await;
    if status == StatusCode::CREATED {
        let id = body["id"].as_str().unwrap().to_string();
        Ok((id, body))
    } else {
        Err(format!("Failed to create {what}: Status {status}, Body: {body}"))
    }
}

/// Create the single root container
pub async fn create_root_container(app: &axum::Router) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/containers",
        json!({
            "name": "lab",
            "container_type": "lab",
            "description": "Root of the lab"
        }),
        "root container",
    )
    .await
}

/// Create a container under `parent_id`
pub async fn create_test_container(
    app: &axum::Router,
    parent_id: &str,
    name: &str,
    container_type: &str,
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/containers",
        json!({
            "name": name,
            "container_type": container_type,
            "description": format!("Test {container_type}"),
            "parent_id": parent_id
        }),
        "container",
    )
    .await
}

/// Create a plate of the given dimensions in a container
pub async fn create_test_plate_with_params(
    app: &axum::Router,
    container_id: &str,
    height: i32,
    length: i32,
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/plates",
        json!({
            "name": format!("Plate {}", &Uuid::new_v4().to_string()[..8]),
            "plate_type": "glycerol_stock",
            "plate_form": "standard96",
            "status": "stocked",
            "height": height,
            "length": length,
            "container_id": container_id
        }),
        "plate",
    )
    .await
}

/// Create a small 2x3 plate in a container
pub async fn create_test_plate(
    app: &axum::Router,
    container_id: &str,
) -> Result<(String, Value), String> {
    create_test_plate_with_params(app, container_id, 2, 3).await
}

/// Create a coding part with a random gene id
pub async fn create_test_part(app: &axum::Router) -> Result<(String, Value), String> {
    let gene_id = format!("BBF10K_{}", &Uuid::new_v4().simple().to_string()[..6]);
    create_test_part_with_gene_id(app, &gene_id).await
}

pub async fn create_test_part_with_gene_id(
    app: &axum::Router,
    gene_id: &str,
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/parts",
        json!({
            "name": format!("Part {gene_id}"),
            "gene_id": gene_id,
            "part_type": "cds",
            "original_sequence": "ATGAAATAA"
        }),
        "part",
    )
    .await
}

/// Create a confirmed sample of a part, placed in the given wells
pub async fn create_test_sample(
    app: &axum::Router,
    part_id: &str,
    well_ids: &[String],
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/samples",
        json!({
            "part_id": part_id,
            "sample_type": "plasmid",
            "status": "confirmed",
            "evidence": "ngs",
            "well_ids": well_ids
        }),
        "sample",
    )
    .await
}

/// Well ids of a plate in address order
pub async fn plate_well_ids(app: &axum::Router, plate_id: &str) -> Vec<String> {
    let (status, body) = send_json(app, "GET", &format!("/api/plates/{plate_id}/wells"), None).await;
    assert_eq!(status, StatusCode::OK, "Failed to list wells: {body}");
    body.as_array()
        .unwrap()
        .iter()
        .map(|well| well["id"].as_str().unwrap().to_string())
        .collect()
}

/// Create a plateset holding the given plates
pub async fn create_test_plateset(
    app: &axum::Router,
    plate_ids: &[String],
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/platesets",
        json!({
            "name": format!("Plateset {}", &Uuid::new_v4().to_string()[..8]),
            "description": "Test plateset",
            "plate_ids": plate_ids
        }),
        "plateset",
    )
    .await
}

/// Create a distribution built from the given platesets
pub async fn create_test_distribution(
    app: &axum::Router,
    plateset_ids: &[String],
) -> Result<(String, Value), String> {
    create_or_fail(
        app,
        "/api/distributions",
        json!({
            "name": format!("Distribution {}", &Uuid::new_v4().to_string()[..8]),
            "description": "Test distribution",
            "plateset_ids": plateset_ids
        }),
        "distribution",
    )
    .await
}

/// Create an institution and an open MTA signed by it
pub async fn create_test_mta(app: &axum::Router) -> Result<(String, Value), String> {
    let (institution_id, _) = create_or_fail(
        app,
        "/api/institutions",
        json!({ "name": format!("Institute {}", &Uuid::new_v4().to_string()[..8]) }),
        "institution",
    )
    .await?;

    create_or_fail(
        app,
        "/api/mtas",
        json!({
            "mta_type": "open_mta",
            "institution_id": institution_id
        }),
        "mta",
    )
    .await
}
