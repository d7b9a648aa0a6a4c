use sea_orm_migration::prelude::*;

use super::m20251019_000001_create_inventory_schema::{Distributions, MaterialTransferAgreements};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::Name).string().not_null())
                    .col(ColumnDef::new(Orders::Notes).text())
                    .col(ColumnDef::new(Orders::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Orders::Username).string())
                    .col(ColumnDef::new(Orders::MtaId).uuid())
                    .col(ColumnDef::new(Orders::Transaction).json())
                    .col(ColumnDef::new(Orders::Label).json())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_mta_id")
                            .from(Orders::Table, Orders::MtaId)
                            .to(
                                MaterialTransferAgreements::Table,
                                MaterialTransferAgreements::Id,
                            )
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderDistributions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderDistributions::OrderId).uuid().not_null())
                    .col(
                        ColumnDef::new(OrderDistributions::DistributionId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrderDistributions::OrderId)
                            .col(OrderDistributions::DistributionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_distributions_order_id")
                            .from(OrderDistributions::Table, OrderDistributions::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_distributions_distribution_id")
                            .from(
                                OrderDistributions::Table,
                                OrderDistributions::DistributionId,
                            )
                            .to(Distributions::Table, Distributions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Operations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Operations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Operations::Name).string().not_null())
                    .col(ColumnDef::new(Operations::Description).text().not_null())
                    .col(
                        ColumnDef::new(Operations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Operations::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plans::Name).string().not_null())
                    .col(ColumnDef::new(Plans::Description).text().not_null())
                    .col(ColumnDef::new(Plans::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Plans::ParentId).uuid())
                    .col(ColumnDef::new(Plans::OperationId).uuid().not_null())
                    .col(
                        ColumnDef::new(Plans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Plans::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plans_parent_id")
                            .from(Plans::Table, Plans::ParentId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plans_operation_id")
                            .from(Plans::Table, Plans::OperationId)
                            .to(Operations::Table, Operations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlanItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlanItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PlanItems::PlanId).uuid().not_null())
                    .col(ColumnDef::new(PlanItems::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(PlanItems::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(PlanItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plan_items_plan_id")
                            .from(PlanItems::Table, PlanItems::PlanId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plan_items_unique")
                    .table(PlanItems::Table)
                    .col(PlanItems::PlanId)
                    .col(PlanItems::Kind)
                    .col(PlanItems::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_username")
                    .table(Orders::Table)
                    .col(Orders::Username)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlanItems::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(OrderDistributions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    Name,
    Notes,
    Status,
    Username,
    MtaId,
    Transaction,
    Label,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum OrderDistributions {
    Table,
    OrderId,
    DistributionId,
}

#[derive(DeriveIden)]
enum Operations {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Plans {
    Table,
    Id,
    Name,
    Description,
    Status,
    ParentId,
    OperationId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum PlanItems {
    Table,
    Id,
    PlanId,
    Kind,
    ItemId,
    CreatedAt,
}
