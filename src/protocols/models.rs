use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "protocols")]
#[crudcrate(
    generate_router,
    api_struct = "Protocol",
    name_singular = "protocol",
    name_plural = "protocols",
    description = "Machine-readable protocols (opaque JSON) that produced a plate.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(sortable, filterable, fulltext)]
    pub description: String,
    pub data: serde_json::Value,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::plates::models::Entity")]
    Plates,
}

impl Related<crate::plates::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
