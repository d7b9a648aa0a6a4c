use super::services::{insert_plate, plate_wells};
use crate::wells::models::Well;
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{TransactionTrait, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlateType {
    #[sea_orm(string_value = "archive_glycerol_stock")]
    ArchiveGlycerolStock,
    #[sea_orm(string_value = "plasmid_plate")]
    PlasmidPlate,
    #[sea_orm(string_value = "glycerol_stock")]
    GlycerolStock,
    #[sea_orm(string_value = "culture")]
    Culture,
    #[sea_orm(string_value = "distro")]
    Distro,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PlateForm {
    #[sea_orm(string_value = "standard96")]
    Standard96,
    #[sea_orm(string_value = "deep96")]
    Deep96,
    #[sea_orm(string_value = "standard384")]
    Standard384,
    #[sea_orm(string_value = "deep384")]
    Deep384,
    #[sea_orm(string_value = "pcrhardshell96")]
    Pcrhardshell96,
    #[sea_orm(string_value = "pcrstrip8")]
    Pcrstrip8,
    #[sea_orm(string_value = "agar96")]
    Agar96,
    #[sea_orm(string_value = "microcentrifuge2ml")]
    Microcentrifuge2ml,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlateStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "stocked")]
    Stocked,
    #[sea_orm(string_value = "trashed")]
    Trashed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "plates")]
#[crudcrate(
    api_struct = "Plate",
    name_singular = "plate",
    name_plural = "plates",
    description = "Plates sit in a container. Creating a plate generates one well per address of its height x length grid (rows A.., columns 1..). Dimensions cannot change after creation.",
    fn_get_one = get_one_plate,
    fn_create = create_plate,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, enum_field)]
    pub plate_type: PlateType,
    #[crudcrate(sortable, filterable, enum_field)]
    pub plate_form: PlateForm,
    #[crudcrate(sortable, filterable, enum_field)]
    pub status: PlateStatus,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable)]
    pub plate_vendor_id: Option<String>,
    #[crudcrate(sortable, filterable, create_model = false, on_create = 0)]
    pub thaw_count: i32,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(fulltext)]
    pub notes: Option<String>,
    #[crudcrate(update_model = false, sortable, filterable)]
    pub height: i32,
    #[crudcrate(update_model = false, sortable, filterable)]
    pub length: i32,
    #[crudcrate(sortable, filterable)]
    pub container_id: Uuid,
    #[crudcrate(filterable)]
    pub protocol_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, create_model = false, update_model = false)]
    pub wells: Vec<Well>,
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
    #[sea_orm(
        belongs_to = "crate::protocols::models::Entity",
        from = "Column::ProtocolId",
        to = "crate::protocols::models::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Protocols,
}

impl Related<crate::containers::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl Related<crate::protocols::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Protocols.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_plate(db: &DatabaseConnection, id: Uuid) -> Result<Plate, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Plate with id '{id}' not found")))?;

    let wells = plate_wells(db, id).await?;

    let mut plate: Plate = model.into();
    plate.wells = wells.into_iter().map(Into::into).collect();
    Ok(plate)
}

/// The plate row and its well grid are written in one transaction
async fn create_plate(db: &DatabaseConnection, create_data: PlateCreate) -> Result<Plate, DbErr> {
    let active_model: ActiveModel = create_data.into();

    let txn = db.begin().await?;
    let inserted = insert_plate(&txn, active_model).await?;
    txn.commit().await?;

    tracing::info!(
        "Created plate {} ({}x{}) with generated wells",
        inserted.id,
        inserted.height,
        inserted.length
    );

    get_one_plate(db, inserted.id).await
}
