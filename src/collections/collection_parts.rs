use crate::common::links::LinkTable;
use sea_orm::{Set, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "collection_parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub part_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::collections::models::Entity",
        from = "Column::CollectionId",
        to = "crate::collections::models::Column::Id",
        on_delete = "Cascade"
    )]
    Collections,
    #[sea_orm(
        belongs_to = "crate::parts::models::Entity",
        from = "Column::PartId",
        to = "crate::parts::models::Column::Id",
        on_delete = "Cascade"
    )]
    Parts,
}

impl ActiveModelBehavior for ActiveModel {}

impl LinkTable for Entity {
    type Link = ActiveModel;

    fn owner_column() -> Column {
        Column::CollectionId
    }

    fn member_column() -> Column {
        Column::PartId
    }

    fn link(owner_id: Uuid, member_id: Uuid, _position: i32) -> ActiveModel {
        ActiveModel {
            collection_id: Set(owner_id),
            part_id: Set(member_id),
        }
    }
}
