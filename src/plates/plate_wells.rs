use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plate_wells")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plate_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub well_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::plates::models::Entity",
        from = "Column::PlateId",
        to = "crate::plates::models::Column::Id",
        on_delete = "Cascade"
    )]
    Plates,
    #[sea_orm(
        belongs_to = "crate::wells::models::Entity",
        from = "Column::WellId",
        to = "crate::wells::models::Column::Id",
        on_delete = "Cascade"
    )]
    Wells,
}

impl ActiveModelBehavior for ActiveModel {}
