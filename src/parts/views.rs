use super::models::{Entity as PartEntity, Part, PartCreate, PartList, PartUpdate};
use super::part_tags;
use super::services::available_parts;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::not_found;
use crate::tags::models::Tag;
use crate::tags::services::{TagIds, set_tags, tags_of};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use sea_orm::EntityTrait;
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

crate::checked_crud_handlers!(Part, PartCreate, PartUpdate, PartList, "parts");

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_available_parts))
        .routes(routes!(get_part_tags, set_part_tags))
        .with_state(state.clone());

    crud_router(state).merge(custom)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityFilter {
    /// Comma separated gene ids
    pub gene_ids: Option<String>,
}

#[utoipa::path(
    get,
    path = "/available",
    params(AvailabilityFilter),
    responses((status = 200, description = "Parts present in at least one distribution", body = Vec<PartList>)),
    tag = "parts"
)]
pub async fn get_available_parts(
    Query(filter): Query<AvailabilityFilter>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PartList>>> {
    let gene_ids: Option<Vec<String>> = filter.gene_ids.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|gene_id| !gene_id.is_empty())
            .map(String::from)
            .collect()
    });

    let parts = available_parts(&state.db, gene_ids.as_deref()).await?;
    Ok(Json(parts.into_iter().map(PartList::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Tags of the part", body = Vec<Tag>),
        (status = 404, description = "Part not found")
    ),
    tag = "parts"
)]
pub async fn get_part_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Tag>>> {
    PartEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("part", id))?;
    Ok(Json(tags_of::<part_tags::Entity>(&state.db, id).await?))
}

/// Replaces the tags of a part
#[utoipa::path(
    put,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Part ID")),
    request_body = TagIds,
    responses(
        (status = 200, description = "Tags of the part", body = Vec<Tag>),
        (status = 400, description = "Unknown or repeated tag id"),
        (status = 404, description = "Part not found")
    ),
    tag = "parts"
)]
pub async fn set_part_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<TagIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<Tag>>> {
    let Json(payload) = payload?;
    PartEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("part", id))?;
    Ok(Json(
        set_tags::<part_tags::Entity>(&state.db, id, &payload.tag_ids).await?,
    ))
}
