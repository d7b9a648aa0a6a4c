use super::composite_part_parts;
use super::models::{CompositePart, CompositePartCreate, CompositePartList, CompositePartUpdate};
use super::services::{ensure_exists, ordered_parts};
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::parts::models::PartList;
use crate::parts::services::{PartIds, set_parts};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(
    CompositePart,
    CompositePartCreate,
    CompositePartUpdate,
    CompositePartList,
    "composite_parts"
);

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_composite_part_parts, set_composite_part_parts))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

#[utoipa::path(
    get,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Composite part ID")),
    responses(
        (status = 200, description = "Parts of the composite in assembly order", body = Vec<PartList>),
        (status = 404, description = "Composite part not found")
    ),
    tag = "composite_parts"
)]
pub async fn get_composite_part_parts(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PartList>>> {
    ensure_exists(&state.db, id).await?;
    Ok(Json(ordered_parts(&state.db, id).await?))
}

/// Replaces the parts of a composite. The list order is the assembly order.
#[utoipa::path(
    put,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Composite part ID")),
    request_body = PartIds,
    responses(
        (status = 200, description = "Parts of the composite in assembly order", body = Vec<PartList>),
        (status = 400, description = "Unknown or repeated part id"),
        (status = 404, description = "Composite part not found")
    ),
    tag = "composite_parts"
)]
pub async fn set_composite_part_parts(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PartIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<PartList>>> {
    let Json(payload) = payload?;
    ensure_exists(&state.db, id).await?;
    set_parts::<composite_part_parts::Entity>(&state.db, id, &payload.part_ids).await?;
    Ok(Json(ordered_parts(&state.db, id).await?))
}
