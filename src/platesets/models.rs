use super::services::{link_plates, plateset_plate_ids};
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::{TransactionTrait, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "platesets")]
#[crudcrate(
    api_struct = "Plateset",
    name_singular = "plateset",
    name_plural = "platesets",
    description = "A named group of plates. Deleting a plateset leaves its plates untouched.",
    fn_get_one = get_one_plateset,
    fn_create = create_plateset,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(fulltext)]
    pub description: String,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], list_model = false, update_model = false)]
    pub plate_ids: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<crate::plates::models::Entity> for Entity {
    fn to() -> RelationDef {
        super::plateset_plates::Relation::Plates.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::plateset_plates::Relation::Platesets.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_plateset(db: &DatabaseConnection, id: Uuid) -> Result<Plateset, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Plateset with id '{id}' not found")))?;

    let mut plateset: Plateset = model.into();
    plateset.plate_ids = plateset_plate_ids(db, &[id]).await?;
    Ok(plateset)
}

async fn create_plateset(
    db: &DatabaseConnection,
    create_data: PlatesetCreate,
) -> Result<Plateset, DbErr> {
    let plate_ids = create_data.plate_ids.clone();
    let active_model: ActiveModel = create_data.into();

    let txn = db.begin().await?;
    let inserted = active_model.insert(&txn).await?;
    link_plates(&txn, inserted.id, &plate_ids).await?;
    txn.commit().await?;

    get_one_plateset(db, inserted.id).await
}
