use super::models::{Column, Entity, Tag};
use crate::common::errors::BusinessResult;
use crate::common::links::{LinkTable, ensure_members_exist, member_ids, replace_members};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TagIds {
    pub tag_ids: Vec<Uuid>,
}

/// Tags attached to `owner_id` through the link table `L`, by tag
pub async fn tags_of<L: LinkTable>(db: &DatabaseConnection, owner_id: Uuid) -> BusinessResult<Vec<Tag>> {
    let tags = Entity::find()
        .filter(Column::Id.in_subquery(member_ids::<L>(owner_id)))
        .order_by_asc(Column::Tag)
        .all(db)
        .await?;
    Ok(tags.into_iter().map(Tag::from).collect())
}

/// Replaces the tags of `owner_id`. The caller checks that the owner exists.
pub async fn set_tags<L: LinkTable>(
    db: &DatabaseConnection,
    owner_id: Uuid,
    tag_ids: &[Uuid],
) -> BusinessResult<Vec<Tag>> {
    let txn = db.begin().await?;
    ensure_members_exist::<Entity, _>(&txn, Column::Id, tag_ids, "tag_ids").await?;
    replace_members::<L, _>(&txn, owner_id, tag_ids).await?;
    txn.commit().await?;

    tracing::debug!("Owner {owner_id} now carries {} tag(s)", tag_ids.len());
    tags_of::<L>(db, owner_id).await
}
