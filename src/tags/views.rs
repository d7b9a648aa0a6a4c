use super::models::{Tag, TagCreate, TagList, TagUpdate};
use crate::common::state::AppState;
use utoipa_axum::router::OpenApiRouter;

crate::checked_crud_handlers!(Tag, TagCreate, TagUpdate, TagList, "tags");

pub fn router(state: &AppState) -> OpenApiRouter {
    crud_router(state)
}
