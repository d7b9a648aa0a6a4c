use super::models::{
    Column, Container, ContainerCreate, ContainerList, ContainerUpdate, Entity as ContainerEntity,
};
use super::services::{self, DeletionSummary};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::state::AppState;
use crate::plates::models::{self as plates, PlateList};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use crudcrate::CRUDResource;
use crudcrate::traits::MergeIntoActiveModel;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_containers, create_container))
        .routes(routes!(get_container_tree))
        .routes(routes!(get_container, update_container, delete_container))
        .routes(routes!(get_container_breadcrumb))
        .routes(routes!(get_container_plates))
        .with_state(state.clone())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ContainerFilter {
    /// Only return direct children of this container
    pub parent_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/",
    params(ContainerFilter),
    responses((status = 200, description = "Containers ordered by name", body = Vec<ContainerList>)),
    tag = "containers"
)]
pub async fn list_containers(
    Query(filter): Query<ContainerFilter>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<ContainerList>>> {
    let mut query = ContainerEntity::find().order_by_asc(Column::Name);
    if let Some(parent_id) = filter.parent_id {
        query = query.filter(Column::ParentId.eq(parent_id));
    }
    let containers = query.all(&state.db).await?;
    Ok(Json(containers.into_iter().map(ContainerList::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = ContainerCreate,
    responses(
        (status = 201, description = "Container created", body = Container),
        (status = 400, description = "Invalid name or a second root container")
    ),
    tag = "containers"
)]
pub async fn create_container(
    State(state): State<AppState>,
    payload: Result<Json<ContainerCreate>, JsonRejection>,
) -> BusinessResult<(StatusCode, Json<Container>)> {
    let Json(payload) = payload?;
    services::validate_name(&payload.name)?;
    match payload.parent_id {
        Some(parent_id) => {
            services::ensure_exists(&state.db, parent_id).await?;
        }
        None => services::ensure_no_other_root(&state.db, None).await?,
    }

    let container = Container::create(&state.db, payload)
        .await
        .map_err(services::map_container_write_error)?;
    tracing::info!("Created container {} ({})", container.name, container.id);
    Ok((StatusCode::CREATED, Json(container)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Container ID")),
    responses(
        (status = 200, description = "The container", body = Container),
        (status = 404, description = "Container not found")
    ),
    tag = "containers"
)]
pub async fn get_container(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Container>> {
    let model = services::ensure_exists(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Container ID")),
    request_body = ContainerUpdate,
    responses(
        (status = 200, description = "Container updated", body = Container),
        (status = 400, description = "Invalid name, or a parent that would create a cycle"),
        (status = 404, description = "Container not found")
    ),
    tag = "containers"
)]
pub async fn update_container(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<ContainerUpdate>, JsonRejection>,
) -> BusinessResult<Json<Container>> {
    let Json(payload) = payload?;
    let existing = services::ensure_exists(&state.db, id).await?;

    if let Some(Some(name)) = &payload.name {
        services::validate_name(name)?;
    }
    match payload.parent_id {
        Some(Some(parent_id)) => services::ensure_valid_parent(&state.db, id, parent_id).await?,
        Some(None) if existing.parent_id.is_some() => {
            services::ensure_no_other_root(&state.db, Some(id)).await?;
        }
        _ => {}
    }

    let updated = payload
        .merge_into_activemodel(existing.into_active_model())
        .map_err(|e| e.to_business_error("container"))?
        .update(&state.db)
        .await
        .map_err(services::map_container_write_error)?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Container ID")),
    responses(
        (status = 200, description = "Container subtree deleted; modules moved to the parent", body = DeletionSummary),
        (status = 404, description = "Container not found"),
        (status = 409, description = "The root container cannot be deleted")
    ),
    tag = "containers"
)]
pub async fn delete_container(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<DeletionSummary>> {
    let summary = services::delete_container(&state.db, id).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/{id}/breadcrumb",
    params(("id" = Uuid, Path, description = "Container ID")),
    responses(
        (status = 200, description = "Path from the root down to this container", body = Vec<ContainerList>),
        (status = 404, description = "Container not found")
    ),
    tag = "containers"
)]
pub async fn get_container_breadcrumb(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<ContainerList>>> {
    let path = services::breadcrumb(&state.db, id).await?;
    Ok(Json(path.into_iter().map(ContainerList::from).collect()))
}

#[utoipa::path(
    get,
    path = "/tree",
    responses(
        (status = 200, description = "Nested container hierarchy starting at the root"),
        (status = 404, description = "No root container exists yet")
    ),
    tag = "containers"
)]
pub async fn get_container_tree(
    State(state): State<AppState>,
) -> BusinessResult<Json<services::ContainerNode>> {
    Ok(Json(services::tree(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/plates",
    params(("id" = Uuid, Path, description = "Container ID")),
    responses(
        (status = 200, description = "Plates stored directly in this container", body = Vec<PlateList>),
        (status = 404, description = "Container not found")
    ),
    tag = "containers"
)]
pub async fn get_container_plates(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<PlateList>>> {
    services::ensure_exists(&state.db, id).await?;
    let plates = plates::Entity::find()
        .filter(plates::Column::ContainerId.eq(id))
        .order_by_asc(plates::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(plates.into_iter().map(PlateList::from).collect()))
}
