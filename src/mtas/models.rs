use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum MtaType {
    #[sea_orm(string_value = "open_mta")]
    OpenMta,
    #[sea_orm(string_value = "ubmta")]
    Ubmta,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "material_transfer_agreements")]
#[crudcrate(
    generate_router,
    api_struct = "MaterialTransferAgreement",
    name_singular = "mta",
    name_plural = "mtas",
    description = "Material transfer agreements signed by an institution. An order needs one before checkout.",
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, enum_field)]
    pub mta_type: MtaType,
    pub agreement_file: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub institution_id: Uuid,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::institutions::models::Entity",
        from = "Column::InstitutionId",
        to = "crate::institutions::models::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Institutions,
}

impl Related<crate::institutions::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
