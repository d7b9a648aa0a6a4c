use crate::common::errors::hook_validation_error;
use crate::common::validators::normalize_tag;
use chrono::{DateTime, Utc};
use crudcrate::EntityToModels;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "tags")]
#[crudcrate(
    api_struct = "Tag",
    name_singular = "tag",
    name_plural = "tags",
    description = "Free-form labels for parts, authors, organisms and collections. Tags are normalised to lower-case, dash-separated words when created.",
    fn_create = create_tag,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable, fulltext)]
    pub tag: String,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

async fn create_tag(db: &DatabaseConnection, mut create_data: TagCreate) -> Result<Tag, DbErr> {
    create_data.tag = normalize_tag(&create_data.tag);
    if create_data.tag.is_empty() {
        return Err(hook_validation_error("tag", "is empty once normalised"));
    }

    let existing = Entity::find()
        .filter(Column::Tag.eq(create_data.tag.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(DbErr::Custom(format!(
            "Tag '{}' already exists",
            create_data.tag
        )));
    }

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(db).await?;
    Ok(inserted.into())
}
