use crate::common::links::LinkTable;
use sea_orm::{Set, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "part_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub part_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::parts::models::Entity",
        from = "Column::PartId",
        to = "crate::parts::models::Column::Id",
        on_delete = "Cascade"
    )]
    Parts,
    #[sea_orm(
        belongs_to = "crate::tags::models::Entity",
        from = "Column::TagId",
        to = "crate::tags::models::Column::Id",
        on_delete = "Cascade"
    )]
    Tags,
}

impl ActiveModelBehavior for ActiveModel {}

impl LinkTable for Entity {
    type Link = ActiveModel;

    fn owner_column() -> Column {
        Column::PartId
    }

    fn member_column() -> Column {
        Column::TagId
    }

    fn link(owner_id: Uuid, member_id: Uuid, _position: i32) -> ActiveModel {
        ActiveModel {
            part_id: Set(owner_id),
            tag_id: Set(member_id),
        }
    }
}
