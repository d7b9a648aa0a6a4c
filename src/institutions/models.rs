use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "institutions")]
#[crudcrate(
    generate_router,
    api_struct = "Institution",
    name_singular = "institution",
    name_plural = "institutions",
    description = "Institutions that receive material. An institution that signed the master agreement can countersign orders.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, create_model = false, on_create = false)]
    pub signed_master: bool,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::mtas::models::Entity")]
    MaterialTransferAgreements,
}

impl Related<crate::mtas::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialTransferAgreements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
