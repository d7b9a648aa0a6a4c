use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Partial unique indexes: at most one container without a parent, and at most
// one order per username in the `cart` status. Both statements are valid on
// PostgreSQL and SQLite.
const UP: [&str; 2] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_containers_single_root \
     ON containers ((parent_id IS NULL)) WHERE parent_id IS NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_orders_single_cart \
     ON orders (username) WHERE status = 'cart'",
];

const DOWN: [&str; 2] = [
    "DROP INDEX IF EXISTS idx_orders_single_cart",
    "DROP INDEX IF EXISTS idx_containers_single_root",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres | sea_orm::DatabaseBackend::Sqlite => {
                for statement in UP {
                    manager.get_connection().execute_unprepared(statement).await?;
                }
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".to_string()));
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres | sea_orm::DatabaseBackend::Sqlite => {
                for statement in DOWN {
                    manager.get_connection().execute_unprepared(statement).await?;
                }
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".to_string()));
            }
        }

        Ok(())
    }
}
