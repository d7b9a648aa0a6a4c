use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "distribution_platesets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub distribution_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub plateset_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::distributions::models::Entity",
        from = "Column::DistributionId",
        to = "crate::distributions::models::Column::Id",
        on_delete = "Cascade"
    )]
    Distributions,
    #[sea_orm(
        belongs_to = "crate::platesets::models::Entity",
        from = "Column::PlatesetId",
        to = "crate::platesets::models::Column::Id",
        on_delete = "Cascade"
    )]
    Platesets,
}

impl ActiveModelBehavior for ActiveModel {}
