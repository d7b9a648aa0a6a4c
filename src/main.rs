mod common;
mod config;
mod routes;

mod authors;
mod collections;
mod composite_parts;
mod containers;
mod distributions;
mod imports;
mod institutions;
mod modules;
mod mtas;
mod operations;
mod orders;
mod organisms;
mod parts;
mod plans;
mod plates;
mod platesets;
mod protocols;
mod samples;
mod search;
mod tags;
mod wells;

#[cfg(test)]
mod test_helpers;

use crate::config::Config;
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("Starting server...");

    let config: Config = Config::from_env()?;

    let db: DatabaseConnection = Database::connect(config.db_url.as_str())
        .await
        .context("Could not connect to the database")?;
    db.ping().await.context("Database did not answer a ping")?;
    tracing::info!("Connected to the database");

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("DB migrations complete");

    tracing::info!(
        "Starting server {} ({} deployment) ...",
        config.app_name,
        config.deployment.to_uppercase()
    );

    let router = routes::build_router(&db, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Could not bind {}", config.bind_address))?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
