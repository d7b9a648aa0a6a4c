pub use sea_orm_migration::prelude::*;

mod m20251019_000001_create_inventory_schema;
mod m20251019_000002_create_orders_and_plans;
mod m20251019_000003_create_link_tables;
mod m20251019_000004_single_root_and_cart_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251019_000001_create_inventory_schema::Migration),
            Box::new(m20251019_000002_create_orders_and_plans::Migration),
            Box::new(m20251019_000003_create_link_tables::Migration),
            Box::new(m20251019_000004_single_root_and_cart_indexes::Migration),
        ]
    }
}
