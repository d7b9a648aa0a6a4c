use super::models::{Column, Entity as OrderEntity, Order, OrderCreate, OrderList, OrderStatus, OrderUpdate};
use super::services::{self, ShippingDocument};
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_orders, create_order))
        .routes(routes!(get_cart, add_to_cart))
        .routes(routes!(remove_from_cart))
        .routes(routes!(get_order, update_order, delete_order))
        .routes(routes!(checkout_order))
        .routes(routes!(attach_label))
        .routes(routes!(attach_transaction))
        .with_state(state.clone())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderFilter {
    pub username: Option<String>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CartOwner {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub username: String,
    pub distribution_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/",
    params(OrderFilter),
    responses((status = 200, description = "Orders, newest first", body = Vec<OrderList>)),
    tag = "orders"
)]
pub async fn list_orders(
    Query(filter): Query<OrderFilter>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<OrderList>>> {
    let mut query = OrderEntity::find().order_by_desc(Column::CreatedAt);
    if let Some(username) = filter.username {
        query = query.filter(Column::Username.eq(username));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status));
    }
    let orders = query.all(&state.db).await?;
    Ok(Json(orders.into_iter().map(OrderList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = OrderCreate,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "No distributions, unknown references, or a second cart for the user")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> BusinessResult<(StatusCode, Json<Order>)> {
    let Json(payload) = payload?;
    let order = services::create_order(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "The order with its distribution ids", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn get_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Order>> {
    services::ensure_exists(&state.db, id).await?;
    Ok(Json(Order::get_one(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Unknown MTA or a second cart for the user"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn update_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> BusinessResult<Json<Order>> {
    let Json(payload) = payload?;
    Ok(Json(services::update_order(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted; its distributions are kept"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn delete_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    services::delete_order(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/cart",
    params(CartOwner),
    responses(
        (status = 200, description = "The user's open cart", body = Order),
        (status = 404, description = "The user has no cart")
    ),
    tag = "orders"
)]
pub async fn get_cart(
    Query(owner): Query<CartOwner>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Order>> {
    Ok(Json(services::get_cart(&state.db, &owner.username).await?))
}

#[utoipa::path(
    post,
    path = "/cart",
    request_body = CartItem,
    responses(
        (status = 200, description = "Cart holding the distribution", body = Order),
        (status = 400, description = "Distribution does not exist")
    ),
    tag = "orders"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    item: Result<Json<CartItem>, JsonRejection>,
) -> BusinessResult<Json<Order>> {
    let Json(item) = item?;
    let cart = services::add_to_cart(&state.db, &item.username, item.distribution_id).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    delete,
    path = "/cart/{distribution_id}",
    params(
        ("distribution_id" = Uuid, Path, description = "Distribution ID"),
        CartOwner
    ),
    responses(
        (status = 200, description = "Remaining cart", body = Order),
        (status = 204, description = "The cart became empty and was deleted"),
        (status = 404, description = "No cart, or the distribution is not in it")
    ),
    tag = "orders"
)]
pub async fn remove_from_cart(
    Path(distribution_id): Path<Uuid>,
    Query(owner): Query<CartOwner>,
    State(state): State<AppState>,
) -> BusinessResult<Response> {
    let remaining = services::remove_from_cart(&state.db, &owner.username, distribution_id).await?;
    Ok(match remaining {
        Some(cart) => Json(cart).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/{id}/checkout",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order is awaiting countersignature", body = Order),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Order is not a cart or has no MTA")
    ),
    tag = "orders"
)]
pub async fn checkout_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Order>> {
    Ok(Json(services::checkout(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}/label",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Label stored without billing data", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn attach_label(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> BusinessResult<Json<Order>> {
    let Json(payload) = payload?;
    let order =
        services::attach_shipping_document(&state.db, id, ShippingDocument::Label, payload).await?;
    Ok(Json(order))
}

#[utoipa::path(
    put,
    path = "/{id}/transaction",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Transaction stored without billing data", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn attach_transaction(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> BusinessResult<Json<Order>> {
    let Json(payload) = payload?;
    let order =
        services::attach_shipping_document(&state.db, id, ShippingDocument::Transaction, payload)
            .await?;
    Ok(Json(order))
}
