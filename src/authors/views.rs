use super::author_tags;
use super::models::{Entity as AuthorEntity, router as crudrouter};
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
        .routes(routes!(get_author_tags, set_author_tags))
        .with_state(state.clone());

    crudrouter(&state.db.clone()).merge(custom)
}

#[utoipa::path(
    get,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Tags of the author", body = Vec<Tag>),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn get_author_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<Tag>>> {
    AuthorEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("author", id))?;
    Ok(Json(tags_of::<author_tags::Entity>(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}/tags",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body = TagIds,
    responses(
        (status = 200, description = "Tags of the author", body = Vec<Tag>),
        (status = 400, description = "Unknown or repeated tag id"),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn set_author_tags(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<TagIds>, JsonRejection>,
) -> BusinessResult<Json<Vec<Tag>>> {
    let Json(payload) = payload?;
    AuthorEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| not_found!("author", id))?;
    Ok(Json(
        set_tags::<author_tags::Entity>(&state.db, id, &payload.tag_ids).await?,
    ))
}
