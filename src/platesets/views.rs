use super::models::{
    Entity as PlatesetEntity, Plateset, PlatesetCreate, PlatesetList, PlatesetUpdate,
};
use super::services::{link_plates, plateset_plate_ids, unlink_plate};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::state::AppState;
use crate::not_found;
use crate::plates::models::{self as plates, PlateList};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(
    Plateset,
    PlatesetCreate,
    PlatesetUpdate,
    PlatesetList,
    "platesets"
);

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_plateset_plates, add_plateset_plates))
        .routes(routes!(remove_plateset_plate))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlateMembership {
    pub plate_ids: Vec<Uuid>,
}

#[utoipa::path(
    get,
    path = "/{id}/plates",
    params(("id" = Uuid, Path, description = "Plateset ID")),
    responses(
        (status = 200, description = "Plates in the plateset", body = Vec<PlateList>),
        (status = 404, description = "Plateset not found")
    ),
    tag = "platesets"
)]
pub async fn get_plateset_plates(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PlateList>>> {
    PlatesetEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("plateset", id))?;

    let plate_ids = plateset_plate_ids(&state.db, &[id]).await?;
    let models = plates::Entity::find()
        .filter(plates::Column::Id.is_in(plate_ids))
        .order_by_asc(plates::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(models.into_iter().map(PlateList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/plates",
    params(("id" = Uuid, Path, description = "Plateset ID")),
    request_body = PlateMembership,
    responses(
        (status = 200, description = "Plateset with its updated plates", body = Plateset),
        (status = 400, description = "A plate does not exist"),
        (status = 404, description = "Plateset not found")
    ),
    tag = "platesets"
)]
pub async fn add_plateset_plates(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PlateMembership>, JsonRejection>,
) -> BusinessResult<Json<Plateset>> {
    let Json(payload) = payload?;
    let txn = state.db.begin().await?;
    PlatesetEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found!("plateset", id))?;
    link_plates(&txn, id, &payload.plate_ids)
        .await
        .map_err(|e| e.to_business_error("plateset"))?;
    txn.commit().await?;

    Ok(Json(Plateset::get_one(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}/plates/{plate_id}",
    params(
        ("id" = Uuid, Path, description = "Plateset ID"),
        ("plate_id" = Uuid, Path, description = "Plate ID")
    ),
    responses(
        (status = 204, description = "Plate removed from the plateset; the plate itself is kept"),
        (status = 404, description = "The plate is not in this plateset")
    ),
    tag = "platesets"
)]
pub async fn remove_plateset_plate(
    Path((id, plate_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    if !unlink_plate(&state.db, id, plate_id).await? {
        return Err(not_found!("plateset plate", plate_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
