use crate::common::state::AppState;
use crate::config::Config;
use crate::{
    authors, collections, composite_parts, containers, distributions, imports, institutions,
    modules, mtas, operations, orders, organisms, parts, plans, plates, platesets, protocols,
    samples, search, tags, wells,
};
use axum::{Router, extract::DefaultBodyLimit};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "FreeGenes API",
        description = "Inventory of DNA parts, lab containers, plates, wells and samples, and the distributions shipped from them"
    ))]
    struct ApiDoc;

    let app_state = AppState::new(db.clone(), config.clone());

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state)) // Root routes
        // Parts and their metadata
        .nest("/api/tags", tags::views::router(&app_state))
        .nest("/api/authors", authors::views::router(&app_state))
        .nest("/api/institutions", institutions::models::router(db))
        .nest("/api/organisms", organisms::views::router(&app_state))
        .nest("/api/parts", parts::views::router(&app_state))
        .nest(
            "/api/composite_parts",
            composite_parts::views::router(&app_state),
        )
        .nest("/api/collections", collections::views::router(&app_state))
        // Physical inventory
        .nest("/api/containers", containers::views::router(&app_state))
        .nest("/api/modules", modules::views::router(&app_state))
        .nest("/api/protocols", protocols::models::router(db))
        .nest("/api/plates", plates::views::router(&app_state))
        .nest("/api/wells", wells::models::router(db))
        .nest("/api/samples", samples::views::router(&app_state))
        // Shipping
        .nest("/api/platesets", platesets::views::router(&app_state))
        .nest(
            "/api/distributions",
            distributions::views::router(&app_state),
        )
        .nest("/api/mtas", mtas::models::router(db))
        .nest("/api/orders", orders::views::router(&app_state))
        // Lab work
        .nest("/api/operations", operations::models::router(db))
        .nest("/api/plans", plans::views::router(&app_state))
        .nest("/api/search", search::views::router(&app_state))
        .nest("/api/imports", imports::views::router(&app_state))
        .split_for_parts();

    router
        .merge(Scalar::with_url("/api/docs", api))
        .layer(DefaultBodyLimit::max(30 * 1024 * 1024))
}
