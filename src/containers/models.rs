use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ContainerType {
    #[sea_orm(string_value = "trash")]
    Trash,
    #[sea_orm(string_value = "lab")]
    Lab,
    #[sea_orm(string_value = "room")]
    Room,
    #[sea_orm(string_value = "bay")]
    Bay,
    #[sea_orm(string_value = "bench")]
    Bench,
    #[sea_orm(string_value = "desk")]
    Desk,
    #[sea_orm(string_value = "cabinet")]
    Cabinet,
    #[sea_orm(string_value = "robot")]
    Robot,
    #[sea_orm(string_value = "freezer")]
    Freezer,
    #[sea_orm(string_value = "fridge")]
    Fridge,
    #[sea_orm(string_value = "shelf")]
    Shelf,
    #[sea_orm(string_value = "rack")]
    Rack,
    #[sea_orm(string_value = "incubator")]
    Incubator,
    #[sea_orm(string_value = "shaking_incubator")]
    ShakingIncubator,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "containers")]
#[crudcrate(
    api_struct = "Container",
    name_singular = "container",
    name_plural = "containers",
    description = "Physical places that hold plates and modules, nested from the lab root down to a rack slot."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, enum_field)]
    pub container_type: ContainerType,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(fulltext)]
    pub description: String,
    #[crudcrate(sortable)]
    pub estimated_temperature: Option<Decimal>,
    pub x: Option<Decimal>,
    pub y: Option<Decimal>,
    pub z: Option<Decimal>,
    #[crudcrate(sortable, filterable)]
    pub parent_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Parent,
    #[sea_orm(has_many = "crate::plates::models::Entity")]
    Plates,
    #[sea_orm(has_many = "crate::modules::models::Entity")]
    Modules,
}

impl Related<crate::plates::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plates.def()
    }
}

impl Related<crate::modules::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
