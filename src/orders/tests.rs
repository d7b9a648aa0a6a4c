use super::models::{ActiveModel, OrderStatus};
use super::services::map_cart_write_error;
use crate::config::test_helpers::{setup_test_app, setup_test_app_with_db};
use crate::test_helpers::{create_test_distribution, create_test_mta, send_json};
use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set, SqlErr};
use serde_json::json;
use uuid::Uuid;

async fn two_distributions(app: &axum::Router) -> (String, String) {
    let (first, _) = create_test_distribution(app, &[]).await.unwrap();
    let (second, _) = create_test_distribution(app, &[]).await.unwrap();
    (first, second)
}

#[tokio::test]
async fn test_order_requires_a_distribution() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "name": "empty order", "distribution_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "name": "ghost order", "distribution_ids": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'distribution_ids'")
    );
}

#[tokio::test]
async fn test_order_crud_strips_billing() {
    let app = setup_test_app().await;
    let (distribution_id, _) = create_test_distribution(&app, &[]).await.unwrap();

    let (status, order) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "name": "Staff order",
            "notes": "sticky note 12",
            "distribution_ids": [distribution_id],
            "transaction": { "tracking_number": "1Z", "billing": { "card": "4242" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Create failed: {order}");
    assert_eq!(order["status"], "cart");
    assert_eq!(order["distribution_ids"], json!([distribution_id]));
    assert_eq!(order["transaction"], json!({ "tracking_number": "1Z" }));
    let order_id = order["id"].as_str().unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/label"),
        Some(json!({ "label_url": "https://labels.example/1.pdf", "billing": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], json!({ "label_url": "https://labels.example/1.pdf" }));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}"),
        Some(json!({ "status": "shipped" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body}");
    assert_eq!(body["status"], "shipped");

    let (status, _) = send_json(&app, "DELETE", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The distribution outlives the order
    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/api/distributions/{distribution_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cart_add_and_remove() {
    let app = setup_test_app().await;
    let (first, second) = two_distributions(&app).await;

    let (status, cart) = send_json(
        &app,
        "POST",
        "/api/orders/cart",
        Some(json!({ "username": "ada", "distribution_id": first })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Add failed: {cart}");
    let cart_id = cart["id"].as_str().unwrap().to_string();
    assert_eq!(cart["username"], "ada");
    assert_eq!(cart["status"], "cart");

    // Adding the same distribution again is a no-op; a new one joins the same cart
    for distribution_id in [&first, &first, &second] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/orders/cart",
            Some(json!({ "username": "ada", "distribution_id": distribution_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], cart_id);
    }

    let (status, body) = send_json(&app, "GET", "/api/orders/cart?username=ada", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distribution_ids"].as_array().unwrap().len(), 2);

    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/api/orders/cart/{first}?username=ada"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distribution_ids"], json!([second]));

    // Removing the last distribution deletes the cart
    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/orders/cart/{second}?username=ada"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, "GET", &format!("/api/orders/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json(&app, "GET", "/api/orders/cart?username=ada", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_one_cart_per_user() {
    let app = setup_test_app().await;
    let (first, second) = two_distributions(&app).await;

    send_json(
        &app,
        "POST",
        "/api/orders/cart",
        Some(json!({ "username": "grace", "distribution_id": first })),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "name": "second cart",
            "username": "grace",
            "distribution_ids": [second]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("only one cart")
    );

    // Another user is unaffected
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "name": "linus cart",
            "username": "linus",
            "distribution_ids": [second]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_checkout_requires_mta() {
    let app = setup_test_app().await;
    let (distribution_id, _) = create_test_distribution(&app, &[]).await.unwrap();

    let (_, cart) = send_json(
        &app,
        "POST",
        "/api/orders/cart",
        Some(json!({ "username": "rosalind", "distribution_id": distribution_id })),
    )
    .await;
    let cart_id = cart["id"].as_str().unwrap();

    let (status, body) =
        send_json(&app, "POST", &format!("/api/orders/{cart_id}/checkout"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "BUSINESS_RULE_VIOLATION");

    let (mta_id, _) = create_test_mta(&app).await.unwrap();
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/orders/{cart_id}"),
        Some(json!({ "mta_id": mta_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send_json(&app, "POST", &format!("/api/orders/{cart_id}/checkout"), None).await;
    assert_eq!(status, StatusCode::OK, "Checkout failed: {body}");
    assert_eq!(body["status"], "awaiting_countersign");

    // A submitted order cannot be checked out twice
    let (status, _) =
        send_json(&app, "POST", &format!("/api/orders/{cart_id}/checkout"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // With the cart submitted, the user may open a new one
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/orders/cart",
        Some(json!({ "username": "rosalind", "distribution_id": distribution_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["id"], cart_id);
}

fn cart_row(username: &str) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Cart of {username}")),
        notes: Set(None),
        status: Set(OrderStatus::Cart),
        username: Set(Some(username.to_string())),
        mta_id: Set(None),
        transaction: Set(None),
        label: Set(None),
        created_at: Set(now),
        last_updated: Set(now),
    }
}

#[tokio::test]
async fn test_database_rejects_a_second_cart() {
    let (_app, db) = setup_test_app_with_db().await;

    cart_row("grace").insert(&db).await.unwrap();
    let err = cart_row("grace").insert(&db).await.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let mapped = map_cart_write_error(err, Some("grace"));
    assert_eq!(mapped.status(), StatusCode::BAD_REQUEST);
    assert!(mapped.to_string().contains("only one cart"));

    // Carts of other users and non-cart orders are not constrained
    cart_row("linus").insert(&db).await.unwrap();
    let mut shipped = cart_row("grace");
    shipped.status = Set(OrderStatus::Shipped);
    shipped.insert(&db).await.unwrap();
}
