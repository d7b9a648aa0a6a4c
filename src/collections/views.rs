use super::models::{
    Collection, CollectionCreate, CollectionList, CollectionUpdate, Entity as CollectionEntity,
};
use super::{collection_parts, collection_tags};
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::not_found;
use crate::parts::models::PartList;
use crate::parts::services::{PartIds, parts_of, set_parts};
use crate::tags::models::Tag;
use crate::tags::services::{TagIds, set_tags, tags_of};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use sea_orm::{DatabaseConnection, EntityTrait};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(
    Collection,
    CollectionCreate,
    CollectionUpdate,
    CollectionList,
    "collections"
);

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_collection_parts, set_collection_parts))
        .routes(routes!(get_collection_tags, set_collection_tags))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

async fn ensure_exists(db: &DatabaseConnection, id: Uuid) -> BusinessResult<()> {
    CollectionEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("collection", id))?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Parts in the collection", body = Vec<PartList>),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections"
)]
pub async fn get_collection_parts(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PartList>>> {
    ensure_exists(&state.db, id).await?;
    Ok(Json(parts_of::<collection_parts::Entity>(&state.db, id).await?))
}

/// Replaces the parts of a collection
#[utoipa::path(
    put,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = PartIds,
    responses(
        (status = 200, description = "Parts in the collection", body = Vec<PartList>),
        (status = 400, description = "Unknown or repeated part id"),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections"
)]
pub async fn set_collection_parts(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PartIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<PartList>>> {
    let Json(payload) = payload?;
    ensure_exists(&state.db, id).await?;
    set_parts::<collection_parts::Entity>(&state.db, id, &payload.part_ids).await?;
    Ok(Json(parts_of::<collection_parts::Entity>(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Tags of the collection", body = Vec<Tag>),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections"
)]
pub async fn get_collection_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Tag>>> {
    ensure_exists(&state.db, id).await?;
    Ok(Json(tags_of::<collection_tags::Entity>(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = TagIds,
    responses(
        (status = 200, description = "Tags of the collection", body = Vec<Tag>),
        (status = 400, description = "Unknown or repeated tag id"),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections"
)]
pub async fn set_collection_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<TagIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<Tag>>> {
    let Json(payload) = payload?;
    ensure_exists(&state.db, id).await?;
    Ok(Json(
        set_tags::<collection_tags::Entity>(&state.db, id, &payload.tag_ids).await?,
    ))
}
