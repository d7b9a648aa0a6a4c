use super::models::{Entity as OrganismEntity, router as crudrouter};
use super::organism_tags;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use crate::not_found;
use crate::tags::models::Tag;
use crate::tags::services::{TagIds, set_tags, tags_of};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use sea_orm::EntityTrait;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let custom = OpenApiRouter::new()
        .routes(routes!(get_organism_tags, set_organism_tags))
        .with_state(state.clone());

    crudrouter(&state.db.clone()).merge(custom)
}

#[utoipa::path(
    get,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Organism ID")),
    responses(
        (status = 200, description = "Tags of the organism", body = Vec<Tag>),
        (status = 404, description = "Organism not found")
    ),
    tag = "organisms"
)]
pub async fn get_organism_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Tag>>> {
    OrganismEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("organism", id))?;
    Ok(Json(tags_of::<organism_tags::Entity>(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Organism ID")),
    request_body = TagIds,
    responses(
        (status = 200, description = "Tags of the organism", body = Vec<Tag>),
        (status = 400, description = "Unknown or repeated tag id"),
        (status = 404, description = "Organism not found")
    ),
    tag = "organisms"
)]
pub async fn set_organism_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<TagIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<Tag>>> {
    let Json(payload) = payload?;
    OrganismEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("organism", id))?;
    Ok(Json(
        set_tags::<organism_tags::Entity>(&state.db, id, &payload.tag_ids).await?,
    ))
}
