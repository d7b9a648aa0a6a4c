use crate::common::errors::hook_validation_error;
use crate::common::tree::creates_cycle;
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{IntoActiveModel, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "collections")]
#[crudcrate(
    api_struct = "Collection",
    name_singular = "collection",
    name_plural = "collections",
    description = "Named groupings of parts. Collections nest through an optional parent collection.",
    fn_update = update_collection,
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
    #[crudcrate(filterable)]
    pub parent_id: Option<Uuid>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

async fn update_collection(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: CollectionUpdate,
) -> Result<Collection, DbErr> {
    if let Some(Some(parent_id)) = update_data.parent_id {
        if creates_cycle::<Entity, _>(db, id, parent_id, Column::ParentId).await? {
            return Err(hook_validation_error(
                "parent_id",
                "would make the collection its own ancestor",
            ));
        }
    }

    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Collection with id '{id}' not found")))?;

    let updated = update_data.merge_into_activemodel(existing.into_active_model())?;
    updated.update(db).await?;

    Collection::get_one(db, id).await
}
