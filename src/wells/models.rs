use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "wells")]
#[crudcrate(
    generate_router,
    api_struct = "Well",
    name_singular = "well",
    name_plural = "wells",
    description = "A single well of a plate. Wells are generated with their plate and hold samples.",
    fn_get_one = get_one_well,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub address: String,
    #[crudcrate(sortable, filterable)]
    pub volume: Decimal,
    #[crudcrate(sortable, filterable)]
    pub quantity: Option<i32>,
    #[crudcrate(filterable)]
    pub media: Option<String>,
    #[crudcrate(filterable)]
    pub organism_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, create_model = false, update_model = false)]
    pub sample_ids: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::organisms::models::Entity",
        from = "Column::OrganismId",
        to = "crate::organisms::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Organisms,
}

impl Related<crate::organisms::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_well(db: &DatabaseConnection, id: Uuid) -> Result<Well, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Well with id '{id}' not found")))?;

    let sample_ids = crate::samples::sample_wells::Entity::find()
        .filter(crate::samples::sample_wells::Column::WellId.eq(id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.sample_id)
        .collect();

    let mut well: Well = model.into();
    well.sample_ids = sample_ids;
    Ok(well)
}
