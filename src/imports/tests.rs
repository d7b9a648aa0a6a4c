use crate::config::test_helpers::setup_test_app;
use crate::test_helpers::{
    create_root_container, create_test_part_with_gene_id, decimal_field, send_json,
};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

const PLATEMAP: &str = "Plate ID,Name,Well Location,Product type,Yield (ng)\n\
    PSHP001,BBF10K_000501,A1,Clonal Genes,1250\n\
    PSHP001,BBF10K_000502,B2,Clonal Genes,980\n\
    PSHP001,BBF10K_999999,C3,Clonal Genes,700\n\
    GLY001,BBF10K_000501,A1,Glycerol stock,\n";

fn assignment(vendor_id: &str, container_id: &str) -> Value {
    json!({
        "plate_vendor_id": vendor_id,
        "name": format!("Twist {vendor_id}"),
        "container_id": container_id,
        "plate_form": "standard96",
        "height": 8,
        "length": 12
    })
}

async fn plate_by_vendor_id(app: &axum::Router, vendor_id: &str) -> Value {
    let (status, plates) = send_json(
        app,
        "GET",
        &format!("/api/plates?filter={}", urlencode(&json!({ "plate_vendor_id": vendor_id }))),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = plates[0]["id"].as_str().unwrap();
    let (_, plate) = send_json(app, "GET", &format!("/api/plates/{id}"), None).await;
    plate
}

fn urlencode(value: &Value) -> String {
    value
        .to_string()
        .replace('%', "%25")
        .replace('{', "%7B")
        .replace('}', "%7D")
        .replace('"', "%22")
        .replace(':', "%3A")
        .replace(',', "%2C")
        .replace(' ', "%20")
}

#[tokio::test]
async fn test_platemap_import_creates_plates_and_fills_wells() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    let (part_a, _) = create_test_part_with_gene_id(&app, "BBF10K_000501").await.unwrap();
    create_test_part_with_gene_id(&app, "BBF10K_000502").await.unwrap();

    let (status, summary) = send_json(
        &app,
        "POST",
        "/api/imports/platemap",
        Some(json!({
            "csv": PLATEMAP,
            "plates": [assignment("PSHP001", &root_id), assignment("GLY001", &root_id)]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Import failed: {summary}");
    assert_eq!(
        summary,
        json!({
            "plates_created": 2,
            "plates_skipped": 0,
            "wells_filled": 3,
            "rows_ignored": 1
        })
    );

    let clonal = plate_by_vendor_id(&app, "PSHP001").await;
    assert_eq!(clonal["plate_type"], "plasmid_plate");
    assert_eq!(clonal["status"], "stocked");
    let wells = clonal["wells"].as_array().unwrap();
    assert_eq!(wells.len(), 96);
    let a1 = wells.iter().find(|w| w["address"] == "A1").unwrap();
    assert_eq!(a1["quantity"], 1250);
    assert_eq!(decimal_field(&a1["volume"]), Some(Decimal::ZERO));

    let glycerol = plate_by_vendor_id(&app, "GLY001").await;
    assert_eq!(glycerol["plate_type"], "glycerol_stock");
    let a1 = glycerol["wells"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["address"] == "A1")
        .unwrap();
    assert_eq!(decimal_field(&a1["volume"]), Some(Decimal::from(50)));
    assert_eq!(a1["media"], "glycerol_lb");

    let (status, samples) =
        send_json(&app, "GET", &format!("/api/samples?part_id={part_a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let samples = samples.as_array().unwrap();
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s["evidence"] == "twist_confirmed"));
    assert!(samples.iter().all(|s| s["vendor"] == "Twist"));
}

#[tokio::test]
async fn test_reimport_skips_known_plates() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    create_test_part_with_gene_id(&app, "BBF10K_000501").await.unwrap();

    let request = json!({
        "csv": PLATEMAP,
        "plates": [assignment("PSHP001", &root_id), assignment("GLY001", &root_id)]
    });
    let (status, _) = send_json(&app, "POST", "/api/imports/platemap", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = send_json(&app, "POST", "/api/imports/platemap", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["plates_created"], 0);
    assert_eq!(summary["plates_skipped"], 2);
    assert_eq!(summary["wells_filled"], 0);
    assert_eq!(summary["rows_ignored"], 4);
}

#[tokio::test]
async fn test_import_uses_default_dimensions() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();

    let (status, summary) = send_json(
        &app,
        "POST",
        "/api/imports/platemap",
        Some(json!({
            "csv": "Plate ID,Name,Well Location,Product type\nP384,BBF10K_000001,P24,Glycerol stock\n",
            "plates": [{
                "plate_vendor_id": "P384",
                "name": "Twist 384",
                "container_id": root_id,
                "plate_form": "standard384"
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Import failed: {summary}");
    assert_eq!(summary["plates_created"], 1);
    assert_eq!(summary["rows_ignored"], 1);

    let plate = plate_by_vendor_id(&app, "P384").await;
    assert_eq!(plate["height"], 16);
    assert_eq!(plate["length"], 24);
    assert_eq!(plate["wells"].as_array().unwrap().len(), 384);
}

#[tokio::test]
async fn test_import_with_unknown_container_writes_nothing() {
    let app = setup_test_app().await;
    create_root_container(&app).await.unwrap();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/imports/platemap",
        Some(json!({
            "csv": PLATEMAP,
            "plates": [assignment("PSHP001", &Uuid::new_v4().to_string())]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Unexpected: {body}");

    let (_, plates) = send_json(&app, "GET", "/api/plates", None).await;
    assert_eq!(plates.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_import_rejects_bad_csv() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/imports/platemap",
        Some(json!({ "csv": "not,a,platemap\n1,2,3\n", "plates": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_import_rejects_negative_yield() {
    let app = setup_test_app().await;
    let (root_id, _) = create_root_container(&app).await.unwrap();
    create_test_part_with_gene_id(&app, "BBF10K_000501").await.unwrap();

    let csv = "Plate ID,Name,Well Location,Product type,Yield (ng)\n\
               PSHP001,BBF10K_000501,A1,Clonal Genes,-40\n";
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/imports/platemap",
        Some(json!({ "csv": csv, "plates": [assignment("PSHP001", &root_id)] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Unexpected: {body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, plates) = send_json(&app, "GET", "/api/plates", None).await;
    assert_eq!(plates.as_array().unwrap().len(), 0);
}
