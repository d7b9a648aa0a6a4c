use super::models::{
    Distribution, DistributionCreate, DistributionList, DistributionUpdate,
    Entity as DistributionEntity,
};
use super::services::{distribution_parts, distribution_plates, link_platesets, unlink_plateset};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::state::AppState;
use crate::not_found;
use crate::parts::models::PartList;
use crate::plates::models::PlateList;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use crudcrate::CRUDResource;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(
    Distribution,
    DistributionCreate,
    DistributionUpdate,
    DistributionList,
    "distributions"
);

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(add_distribution_platesets))
        .routes(routes!(remove_distribution_plateset))
        .routes(routes!(get_distribution_plates))
        .routes(routes!(get_distribution_parts))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlatesetMembership {
    pub plateset_ids: Vec<Uuid>,
}

async fn ensure_exists(db: &DatabaseConnection, id: Uuid) -> BusinessResult<()> {
    DistributionEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("distribution", id))?;
    Ok(())
}

#[utoipa::path(
    post,
    path = "/{id}/platesets",
    params(("id" = Uuid, Path, description = "Distribution ID")),
    request_body = PlatesetMembership,
    responses(
        (status = 200, description = "Distribution with its updated platesets", body = Distribution),
        (status = 400, description = "A plateset does not exist"),
        (status = 404, description = "Distribution not found")
    ),
    tag = "distributions"
)]
pub async fn add_distribution_platesets(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PlatesetMembership>, JsonRejection>,
) -> BusinessResult<Json<Distribution>> {
    let Json(payload) = payload?;
    ensure_exists(&state.db, id).await?;

    let txn = state.db.begin().await?;
    link_platesets(&txn, id, &payload.plateset_ids)
        .await
        .map_err(|e| e.to_business_error("distribution"))?;
    txn.commit().await?;

    Ok(Json(Distribution::get_one(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}/platesets/{plateset_id}",
    params(
        ("id" = Uuid, Path, description = "Distribution ID"),
        ("plateset_id" = Uuid, Path, description = "Plateset ID")
    ),
    responses(
        (status = 204, description = "Plateset removed; the plateset itself is kept"),
        (status = 404, description = "The plateset is not in this distribution")
    ),
    tag = "distributions"
)]
pub async fn remove_distribution_plateset(
    Path((id, plateset_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    if !unlink_plateset(&state.db, id, plateset_id).await? {
        return Err(not_found!("distribution plateset", plateset_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/plates",
    params(("id" = Uuid, Path, description = "Distribution ID")),
    responses(
        (status = 200, description = "Plates of every plateset in the distribution", body = Vec<PlateList>),
        (status = 404, description = "Distribution not found")
    ),
    tag = "distributions"
)]
pub async fn get_distribution_plates(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PlateList>>> {
    ensure_exists(&state.db, id).await?;
    let plates = distribution_plates(&state.db, id).await?;
    Ok(Json(plates.into_iter().map(PlateList::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Distribution ID")),
    responses(
        (status = 200, description = "Unique parts in the distribution, by gene id", body = Vec<PartList>),
        (status = 404, description = "Distribution not found")
    ),
    tag = "distributions"
)]
pub async fn get_distribution_parts(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PartList>>> {
    ensure_exists(&state.db, id).await?;
    let parts = distribution_parts(&state.db, id).await?;
    Ok(Json(parts.into_iter().map(PartList::from).collect()))
}
