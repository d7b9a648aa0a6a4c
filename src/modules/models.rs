use super::schemas::validate_module_data;
use crate::common::errors::hook_validation_error;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{IntoActiveModel, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    #[sea_orm(string_value = "pipette")]
    Pipette,
    #[sea_orm(string_value = "tempdeck")]
    Tempdeck,
    #[sea_orm(string_value = "magdeck")]
    Magdeck,
    #[sea_orm(string_value = "incubator")]
    Incubator,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "modules")]
#[crudcrate(
    api_struct = "Module",
    name_singular = "module",
    name_plural = "modules",
    description = "Robot modules (pipettes, temperature and magnetic decks, incubators) housed in a container. The data object must match the schema of the module type.",
    fn_create = create_module,
    fn_update = update_module,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub container_id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub model_id: String,
    #[crudcrate(sortable, filterable, enum_field)]
    pub module_type: ModuleType,
    pub data: serde_json::Value,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::containers::models::Entity",
        from = "Column::ContainerId",
        to = "crate::containers::models::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Containers,
}

impl Related<crate::containers::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn create_module(
    db: &DatabaseConnection,
    create_data: ModuleCreate,
) -> Result<Module, DbErr> {
    validate_module_data(&create_data.module_type, &create_data.data)
        .map_err(|msg| hook_validation_error("data", &msg))?;

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(db).await?;
    Ok(inserted.into())
}

async fn update_module(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: ModuleUpdate,
) -> Result<Module, DbErr> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Module with id '{id}' not found")))?;

    // Validate the combination that will be stored
    let module_type = match &update_data.module_type {
        Some(Some(module_type)) => module_type.clone(),
        _ => existing.module_type.clone(),
    };
    let data = match &update_data.data {
        Some(Some(data)) => data.clone(),
        _ => existing.data.clone(),
    };
    validate_module_data(&module_type, &data)
        .map_err(|msg| hook_validation_error("data", &msg))?;

    let updated = update_data.merge_into_activemodel(existing.into_active_model())?;
    updated.update(db).await?;

    Module::get_one(db, id).await
}
