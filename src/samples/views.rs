use super::models::{Column, Entity as SampleEntity, Sample, SampleCreate, SampleList, SampleUpdate};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::wells::models::{self as wells, Well};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_samples, create_sample))
        .routes(routes!(link_sample_chain))
        .routes(routes!(get_sample, update_sample, delete_sample))
        .routes(routes!(get_sample_lineage))
        .routes(routes!(get_sample_wells, attach_sample_wells))
        .with_state(state.clone())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SampleFilter {
    pub part_id: Option<Uuid>,
    pub composite_part_id: Option<Uuid>,
    pub derived_from: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SampleChainRequest {
    /// Oldest sample first
    pub sample_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WellAttachRequest {
    pub well_ids: Vec<Uuid>,
}

#[utoipa::path(
    get,
    path = "/",
    params(SampleFilter),
    responses((status = 200, description = "Samples, newest first", body = Vec<SampleList>)),
    tag = "samples"
)]
pub async fn list_samples(
    Query(filter): Query<SampleFilter>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<SampleList>>> {
    let mut query = SampleEntity::find().order_by_desc(Column::CreatedAt);
    if let Some(part_id) = filter.part_id {
        query = query.filter(Column::PartId.eq(part_id));
    }
    if let Some(composite_part_id) = filter.composite_part_id {
        query = query.filter(Column::CompositePartId.eq(composite_part_id));
    }
    if let Some(derived_from) = filter.derived_from {
        query = query.filter(Column::DerivedFrom.eq(derived_from));
    }
    let samples = query.all(&state.db).await?;
    Ok(Json(samples.into_iter().map(SampleList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = SampleCreate,
    responses(
        (status = 201, description = "Sample created and linked to its wells", body = Sample),
        (status = 400, description = "Invalid index, reference or parent sample")
    ),
    tag = "samples"
)]
pub async fn create_sample(
    State(state): State<AppState>,
    payload: Result<Json<SampleCreate>, JsonRejection>,
) -> BusinessResult<(StatusCode, Json<Sample>)> {
    let Json(payload) = payload?;
    let sample = services::create_sample(&state.db, payload).await?;
    tracing::info!("Created sample {}", sample.id);
    Ok((StatusCode::CREATED, Json(sample)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Sample ID")),
    responses(
        (status = 200, description = "The sample with its well ids", body = Sample),
        (status = 404, description = "Sample not found")
    ),
    tag = "samples"
)]
pub async fn get_sample(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Sample>> {
    services::ensure_exists(&state.db, id).await?;
    Ok(Json(Sample::get_one(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Sample ID")),
    request_body = SampleUpdate,
    responses(
        (status = 200, description = "Sample updated", body = Sample),
        (status = 400, description = "Invalid index, reference or derivation"),
        (status = 404, description = "Sample not found")
    ),
    tag = "samples"
)]
pub async fn update_sample(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<SampleUpdate>, JsonRejection>,
) -> BusinessResult<Json<Sample>> {
    let Json(payload) = payload?;
    Ok(Json(services::update_sample(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Sample ID")),
    responses(
        (status = 204, description = "Sample deleted"),
        (status = 404, description = "Sample not found"),
        (status = 409, description = "Other samples derive from this sample")
    ),
    tag = "samples"
)]
pub async fn delete_sample(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<StatusCode> {
    services::delete_sample(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/lineage",
    params(("id" = Uuid, Path, description = "Sample ID")),
    responses(
        (status = 200, description = "Ancestors of the sample, parent first", body = Vec<SampleList>),
        (status = 404, description = "Sample not found")
    ),
    tag = "samples"
)]
pub async fn get_sample_lineage(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<SampleList>>> {
    let ancestors = services::lineage(&state.db, id).await?;
    Ok(Json(ancestors.into_iter().map(SampleList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/link_chain",
    request_body = SampleChainRequest,
    responses(
        (status = 200, description = "Each sample now derives from the previous one", body = Vec<SampleList>),
        (status = 400, description = "Fewer than two samples, duplicates, or a cycle"),
        (status = 404, description = "A sample does not exist")
    ),
    tag = "samples"
)]
pub async fn link_sample_chain(
    State(state): State<AppState>,
    payload: Result<Json<SampleChainRequest>, JsonRejection>,
) -> BusinessResult<Json<Vec<SampleList>>> {
    let Json(payload) = payload?;
    let linked = services::link_derivation_chain(&state.db, &payload.sample_ids).await?;
    Ok(Json(linked.into_iter().map(SampleList::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}/wells",
    params(("id" = Uuid, Path, description = "Sample ID")),
    responses(
        (status = 200, description = "Wells holding this sample", body = Vec<Well>),
        (status = 404, description = "Sample not found")
    ),
    tag = "samples"
)]
pub async fn get_sample_wells(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Well>>> {
    let sample = Sample::get_one(&state.db, id).await?;
    let models = wells::Entity::find()
        .filter(wells::Column::Id.is_in(sample.well_ids))
        .order_by_asc(wells::Column::Address)
        .all(&state.db)
        .await?;
    Ok(Json(models.into_iter().map(Well::from).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/wells",
    params(("id" = Uuid, Path, description = "Sample ID")),
    request_body = WellAttachRequest,
    responses(
        (status = 200, description = "Sample with its updated well ids", body = Sample),
        (status = 400, description = "A well does not exist"),
        (status = 404, description = "Sample not found")
    ),
    tag = "samples"
)]
pub async fn attach_sample_wells(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<WellAttachRequest>, JsonRejection>,
) -> BusinessResult<Json<Sample>> {
    let Json(payload) = payload?;
    let txn = state.db.begin().await?;
    services::ensure_exists(&txn, id).await?;
    services::attach_wells(&txn, id, &payload.well_ids).await?;
    txn.commit().await?;

    Ok(Json(Sample::get_one(&state.db, id).await?))
}
