use super::models::{Entity as PlateEntity, Plate, PlateCreate, PlateList, PlateUpdate};
use super::services::{generate_wells, plate_wells};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::state::AppState;
use crate::not_found;
use crate::wells::models::Well;
use axum::extract::{Path, State};
use axum::response::Json;
use sea_orm::{EntityTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(Plate, PlateCreate, PlateUpdate, PlateList, "plates");

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_plate_wells))
        .routes(routes!(regenerate_plate_wells))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WellGenerationResult {
    pub plate_id: Uuid,
    pub created: usize,
    pub total: usize,
}

/// Wells of a plate in address order
#[utoipa::path(
    get,
    path = "/{id}/wells",
    params(("id" = Uuid, Path, description = "Plate ID")),
    responses(
        (status = 200, description = "Wells of the plate", body = Vec<Well>),
        (status = 404, description = "Plate not found")
    ),
    tag = "plates"
)]
pub async fn get_plate_wells(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Well>>> {
    PlateEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("plate", id))?;

    let wells = plate_wells(&state.db, id).await?;
    Ok(Json(wells.into_iter().map(Into::into).collect()))
}

/// Runs well generation again. Plates that already have wells are unchanged.
#[utoipa::path(
    post,
    path = "/{id}/wells/generate",
    params(("id" = Uuid, Path, description = "Plate ID")),
    responses(
        (status = 200, description = "Generation result", body = WellGenerationResult),
        (status = 404, description = "Plate not found")
    ),
    tag = "plates"
)]
pub async fn regenerate_plate_wells(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<WellGenerationResult>> {
    let txn = state.db.begin().await?;
    let plate = PlateEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found!("plate", id))?;

    let created = generate_wells(&txn, &plate)
        .await
        .map_err(|e| e.to_business_error("plate"))?;
    let total = plate_wells(&txn, id).await?.len();
    txn.commit().await?;

    Ok(Json(WellGenerationResult {
        plate_id: id,
        created,
        total,
    }))
}
