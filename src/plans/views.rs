use super::models::{Column, Entity as PlanEntity, Plan, PlanCreate, PlanList, PlanStatus, PlanUpdate};
use super::plan_items::{PlanItem, PlanItemKind};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_plans, create_plan))
        .routes(routes!(get_plan, update_plan, delete_plan))
        .routes(routes!(add_plan_items))
        .routes(routes!(remove_plan_item))
        .with_state(state.clone())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PlanFilter {
    pub operation_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub status: Option<PlanStatus>,
}

#[utoipa::path(
    get,
    path = "/",
    params(PlanFilter),
    responses((status = 200, description = "Plans, oldest first", body = Vec<PlanList>)),
    tag = "plans"
)]
pub async fn list_plans(
    Query(filter): Query<PlanFilter>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PlanList>>> {
    let mut query = PlanEntity::find().order_by_asc(Column::CreatedAt);
    if let Some(operation_id) = filter.operation_id {
        query = query.filter(Column::OperationId.eq(operation_id));
    }
    if let Some(parent_id) = filter.parent_id {
        query = query.filter(Column::ParentId.eq(parent_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status));
    }
    let plans = query.all(&state.db).await?;
    Ok(Json(plans.into_iter().map(PlanList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = PlanCreate,
    responses(
        (status = 201, description = "Plan created with its items", body = Plan),
        (status = 400, description = "Unknown operation, parent plan or item")
    ),
    tag = "plans"
)]
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanCreate>, JsonRejection>,
) -> BusinessResult<(StatusCode, Json<Plan>)> {
    let Json(payload) = payload?;
    let plan = services::create_plan(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "The plan with its items", body = Plan),
        (status = 404, description = "Plan not found")
    ),
    tag = "plans"
)]
pub async fn get_plan(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Plan>> {
    services::ensure_exists(&state.db, id).await?;
    Ok(Json(Plan::get_one(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body = PlanUpdate,
    responses(
        (status = 200, description = "Plan updated", body = Plan),
        (status = 400, description = "Unknown operation, or a parent that would create a cycle"),
        (status = 404, description = "Plan not found")
    ),
    tag = "plans"
)]
pub async fn update_plan(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PlanUpdate>, JsonRejection>,
) -> BusinessResult<Json<Plan>> {
    let Json(payload) = payload?;
    Ok(Json(services::update_plan(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 204, description = "Plan and its sub-plans deleted"),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "The plan or one of its sub-plans was executed")
    ),
    tag = "plans"
)]
pub async fn delete_plan(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    services::delete_plan(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/items",
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body = Vec<PlanItem>,
    responses(
        (status = 200, description = "Plan with its updated items", body = Plan),
        (status = 400, description = "An item does not exist"),
        (status = 404, description = "Plan not found")
    ),
    tag = "plans"
)]
pub async fn add_plan_items(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    items: Result<Json<Vec<PlanItem>>, JsonRejection>,
) -> BusinessResult<Json<Plan>> {
    let Json(items) = items?;
    let txn = state.db.begin().await?;
    services::ensure_exists(&txn, id).await?;
    services::add_items(&txn, id, &items).await?;
    txn.commit().await?;

    Ok(Json(Plan::get_one(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}/items/{kind}/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Plan ID"),
        ("kind" = PlanItemKind, Path, description = "Kind of the referenced object"),
        ("item_id" = Uuid, Path, description = "ID of the referenced object")
    ),
    responses(
        (status = 204, description = "Item removed from the plan"),
        (status = 404, description = "The plan does not hold this item")
    ),
    tag = "plans"
)]
pub async fn remove_plan_item(
    Path((id, kind, item_id)): Path<(Uuid, PlanItemKind, Uuid)>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    services::remove_item(&state.db, id, PlanItem { kind, item_id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
