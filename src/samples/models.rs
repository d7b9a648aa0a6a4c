use super::sample_wells;
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{QuerySelect, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    #[sea_orm(string_value = "plasmid")]
    Plasmid,
    #[sea_orm(string_value = "illumina_library")]
    IlluminaLibrary,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "mutated")]
    Mutated,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    #[sea_orm(string_value = "twist_confirmed")]
    TwistConfirmed,
    #[sea_orm(string_value = "ngs")]
    Ngs,
    #[sea_orm(string_value = "sanger")]
    Sanger,
    #[sea_orm(string_value = "nanopore")]
    Nanopore,
    #[sea_orm(string_value = "derived")]
    Derived,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "samples")]
#[crudcrate(
    api_struct = "Sample",
    name_singular = "sample",
    name_plural = "samples",
    description = "Physical samples of a part or composite part. A sample may derive from another sample; a sample that others derive from cannot be deleted.",
    fn_get_one = get_one_sample,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, enum_field)]
    pub sample_type: Option<SampleType>,
    #[crudcrate(sortable, filterable, enum_field)]
    pub status: Option<SampleStatus>,
    #[crudcrate(sortable, filterable, enum_field)]
    pub evidence: Option<Evidence>,
    #[crudcrate(sortable, filterable, fulltext)]
    pub vendor: Option<String>,
    #[crudcrate(filterable, create_model = false, on_create = true)]
    pub outside_collaborator: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub index_forward: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub index_reverse: Option<String>,
    #[crudcrate(filterable)]
    pub derived_from: Option<Uuid>,
    #[crudcrate(filterable)]
    pub part_id: Option<Uuid>,
    #[crudcrate(filterable)]
    pub composite_part_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, update_model = false)]
    pub well_ids: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::DerivedFrom",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    DerivedFrom,
    #[sea_orm(
        belongs_to = "crate::parts::models::Entity",
        from = "Column::PartId",
        to = "crate::parts::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Parts,
    #[sea_orm(
        belongs_to = "crate::composite_parts::models::Entity",
        from = "Column::CompositePartId",
        to = "crate::composite_parts::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    CompositeParts,
}

impl Related<crate::parts::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parts.def()
    }
}

impl Related<crate::composite_parts::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompositeParts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_sample(db: &DatabaseConnection, id: Uuid) -> Result<Sample, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Sample with id '{id}' not found")))?;

    let well_ids: Vec<Uuid> = sample_wells::Entity::find()
        .filter(sample_wells::Column::SampleId.eq(id))
        .select_only()
        .column(sample_wells::Column::WellId)
        .into_tuple()
        .all(db)
        .await?;

    let mut sample: Sample = model.into();
    sample.well_ids = well_ids;
    Ok(sample)
}
