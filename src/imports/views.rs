use super::services::{ImportSummary, PlatemapImport, import_platemap};
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(import_vendor_platemap))
        .with_state(state.clone())
}

/// Imports a vendor platemap. Unknown plates listed in `plates` are created
/// with their wells; wells of rows naming a known part gene id are filled
/// and receive a vendor-confirmed sample.
#[utoipa::path(
    post,
    path = "/platemap",
    request_body = PlatemapImport,
    responses(
        (status = 200, description = "Import summary", body = ImportSummary),
        (status = 400, description = "Unreadable CSV, unknown container or invalid dimensions")
    ),
    tag = "imports"
)]
pub async fn import_vendor_platemap(
    State(state): State<AppState>,
    payload: Result<Json<PlatemapImport>, JsonRejection>,
) -> BusinessResult<Json<ImportSummary>> {
    let Json(payload) = payload?;
    let defaults = (
        state.config.plate_default_height,
        state.config.plate_default_length,
    );
    let summary = import_platemap(&state.db, defaults, payload).await?;
    Ok(Json(summary))
}
