use crate::common::errors::{hook_protected_error, hook_validation_error};
use crate::common::validators::first_non_dna;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{IntoActiveModel, PaginatorTrait, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PartType {
    #[sea_orm(string_value = "full_promoter")]
    FullPromoter,
    #[sea_orm(string_value = "promoter")]
    Promoter,
    #[sea_orm(string_value = "rbs")]
    Rbs,
    #[sea_orm(string_value = "cds")]
    Cds,
    #[sea_orm(string_value = "vector")]
    Vector,
    #[sea_orm(string_value = "partial_seq")]
    PartialSeq,
    #[sea_orm(string_value = "linear_dna")]
    LinearDna,
    #[sea_orm(string_value = "plasmid")]
    Plasmid,
    #[sea_orm(string_value = "terminator")]
    Terminator,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    #[sea_orm(string_value = "optimized")]
    Optimized,
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "sites_applied")]
    SitesApplied,
    #[sea_orm(string_value = "syn_checked")]
    SynChecked,
    #[sea_orm(string_value = "syn_checked_failed")]
    SynCheckedFailed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "parts")]
#[crudcrate(
    api_struct = "Part",
    name_singular = "part",
    name_plural = "parts",
    description = "Parts are virtual genetic elements (promoters, CDS, terminators, ...) identified by a gene id. Sequences, primers and barcodes may only contain A, T, G or C. A part referenced by samples cannot be deleted.",
    fn_create = create_part,
    fn_update = update_part,
    fn_delete = delete_part,
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
    pub gene_id: String,
    #[crudcrate(sortable, filterable, enum_field)]
    pub part_type: PartType,
    #[crudcrate(sortable, filterable, enum_field)]
    pub status: Option<PartStatus>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub original_sequence: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub optimized_sequence: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub synthesized_sequence: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub full_sequence: Option<String>,
    #[crudcrate(list_model = false)]
    pub genbank: Option<serde_json::Value>,
    pub vector: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub primer_forward: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub primer_reverse: Option<String>,
    #[crudcrate(filterable)]
    pub barcode: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(list_model = false)]
    pub translation: Option<String>,
    #[crudcrate(sortable, filterable, create_model = false, on_create = false)]
    pub ip_check: bool,
    #[crudcrate(sortable)]
    pub ip_check_date: Option<DateTime<Utc>>,
    pub ip_check_ref: Option<String>,
    #[crudcrate(filterable)]
    pub author_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::authors::models::Entity",
        from = "Column::AuthorId",
        to = "crate::authors::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Authors,
    #[sea_orm(has_many = "crate::samples::models::Entity")]
    Samples,
}

impl Related<crate::authors::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Authors.def()
    }
}

impl Related<crate::samples::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Samples.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn check_nucleotides<'a>(
    fields: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> Result<(), DbErr> {
    match first_non_dna(fields) {
        Some(field) => Err(hook_validation_error(
            field,
            "must only contain A, T, G or C",
        )),
        None => Ok(()),
    }
}

async fn create_part(db: &DatabaseConnection, create_data: PartCreate) -> Result<Part, DbErr> {
    check_nucleotides([
        ("original_sequence", create_data.original_sequence.as_deref()),
        ("optimized_sequence", create_data.optimized_sequence.as_deref()),
        ("synthesized_sequence", create_data.synthesized_sequence.as_deref()),
        ("full_sequence", create_data.full_sequence.as_deref()),
        ("primer_forward", create_data.primer_forward.as_deref()),
        ("primer_reverse", create_data.primer_reverse.as_deref()),
        ("barcode", create_data.barcode.as_deref()),
    ])?;

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(db).await?;
    Ok(inserted.into())
}

async fn update_part(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: PartUpdate,
) -> Result<Part, DbErr> {
    // Only fields present in the payload with a value need checking
    let incoming = |field: &Option<Option<String>>| -> Option<String> { field.clone().flatten() };
    let original = incoming(&update_data.original_sequence);
    let optimized = incoming(&update_data.optimized_sequence);
    let synthesized = incoming(&update_data.synthesized_sequence);
    let full = incoming(&update_data.full_sequence);
    let forward = incoming(&update_data.primer_forward);
    let reverse = incoming(&update_data.primer_reverse);
    let barcode = incoming(&update_data.barcode);
    check_nucleotides([
        ("original_sequence", original.as_deref()),
        ("optimized_sequence", optimized.as_deref()),
        ("synthesized_sequence", synthesized.as_deref()),
        ("full_sequence", full.as_deref()),
        ("primer_forward", forward.as_deref()),
        ("primer_reverse", reverse.as_deref()),
        ("barcode", barcode.as_deref()),
    ])?;

    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Part with id '{id}' not found")))?;

    let updated = update_data.merge_into_activemodel(existing.into_active_model())?;
    updated.update(db).await?;

    Part::get_one(db, id).await
}

/// Samples pin their part; links to tags, collections and composite parts go
/// with it
async fn delete_part(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, DbErr> {
    let samples = crate::samples::models::Entity::find()
        .filter(crate::samples::models::Column::PartId.eq(id))
        .count(db)
        .await?;
    if samples > 0 {
        return Err(hook_protected_error(&format!(
            "{samples} sample(s) still reference this part"
        )));
    }

    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Part with id '{id}' not found")));
    }
    tracing::info!("Deleted part {id}");
    Ok(id)
}
