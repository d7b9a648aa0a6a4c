use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sample_wells")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sample_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub well_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::samples::models::Entity",
        from = "Column::SampleId",
        to = "crate::samples::models::Column::Id",
        on_delete = "Cascade"
    )]
    Samples,
    #[sea_orm(
        belongs_to = "crate::wells::models::Entity",
        from = "Column::WellId",
        to = "crate::wells::models::Column::Id",
        on_delete = "Cascade"
    )]
    Wells,
}

impl ActiveModelBehavior for ActiveModel {}
