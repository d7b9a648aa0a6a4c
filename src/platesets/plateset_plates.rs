use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plateset_plates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plateset_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub plate_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::platesets::models::Entity",
        from = "Column::PlatesetId",
        to = "crate::platesets::models::Column::Id",
        on_delete = "Cascade"
    )]
    Platesets,
    #[sea_orm(
        belongs_to = "crate::plates::models::Entity",
        from = "Column::PlateId",
        to = "crate::plates::models::Column::Id",
        on_delete = "Cascade"
    )]
    Plates,
}

impl ActiveModelBehavior for ActiveModel {}
