use super::models::{Module, ModuleCreate, ModuleList, ModuleUpdate};
use crate::common::state::AppState;
use utoipa_axum::router::OpenApiRouter;

crate::checked_crud_handlers!(Module, ModuleCreate, ModuleUpdate, ModuleList, "modules");

pub fn router(state: &AppState) -> OpenApiRouter {
    crud_router(state)
}
