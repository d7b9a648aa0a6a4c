use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_distributions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub distribution_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::orders::models::Entity",
        from = "Column::OrderId",
        to = "crate::orders::models::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "crate::distributions::models::Entity",
        from = "Column::DistributionId",
        to = "crate::distributions::models::Column::Id",
        on_delete = "Restrict"
    )]
    Distributions,
}

impl ActiveModelBehavior for ActiveModel {}
