use crate::common::errors::{hook_protected_error, hook_validation_error};
use crate::common::validators::is_dna;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{IntoActiveModel, PaginatorTrait, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum CompositeType {
    #[sea_orm(string_value = "base_part")]
    BasePart,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "composite_parts")]
#[crudcrate(
    api_struct = "CompositePart",
    name_singular = "composite_part",
    name_plural = "composite_parts",
    description = "Virtual assemblies of an ordered list of parts. A composite part referenced by samples cannot be deleted.",
    fn_create = create_composite_part,
    fn_update = update_composite_part,
    fn_delete = delete_composite_part,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(fulltext)]
    pub description: Option<String>,
    #[crudcrate(sortable, filterable, fulltext)]
    pub composite_id: String,
    #[crudcrate(filterable, enum_field)]
    pub composite_type: Option<CompositeType>,
    #[sea_orm(column_type = "Text", nullable)]
    pub sequence: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::samples::models::Entity")]
    Samples,
}

impl Related<crate::samples::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Samples.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn check_sequence(sequence: Option<&str>) -> Result<(), DbErr> {
    match sequence {
        Some(seq) if !is_dna(seq) => Err(hook_validation_error(
            "sequence",
            "must only contain A, T, G or C",
        )),
        _ => Ok(()),
    }
}

async fn create_composite_part(
    db: &DatabaseConnection,
    create_data: CompositePartCreate,
) -> Result<CompositePart, DbErr> {
    check_sequence(create_data.sequence.as_deref())?;

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(db).await?;
    Ok(inserted.into())
}

async fn update_composite_part(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: CompositePartUpdate,
) -> Result<CompositePart, DbErr> {
    if let Some(Some(sequence)) = &update_data.sequence {
        check_sequence(Some(sequence))?;
    }

    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Composite part with id '{id}' not found")))?;

    let updated = update_data.merge_into_activemodel(existing.into_active_model())?;
    updated.update(db).await?;

    CompositePart::get_one(db, id).await
}

async fn delete_composite_part(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, DbErr> {
    let samples = crate::samples::models::Entity::find()
        .filter(crate::samples::models::Column::CompositePartId.eq(id))
        .count(db)
        .await?;
    if samples > 0 {
        return Err(hook_protected_error(&format!(
            "{samples} sample(s) still reference this composite part"
        )));
    }

    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!(
            "Composite part with id '{id}' not found"
        )));
    }
    tracing::info!("Deleted composite part {id}");
    Ok(id)
}
