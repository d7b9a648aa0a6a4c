use super::models::{Column, Entity, Model, PartList};
use crate::common::errors::BusinessResult;
use crate::common::links::{LinkTable, ensure_members_exist, member_ids, replace_members};
use crate::distributions::services::available_part_ids;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PartIds {
    pub part_ids: Vec<Uuid>,
}

/// Distinct parts with a sample on a plate of at least one distribution,
/// optionally restricted to the given gene ids. Ordered by gene id.
pub async fn available_parts<C>(db: &C, gene_ids: Option<&[String]>) -> Result<Vec<Model>, DbErr>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find()
        .filter(Column::Id.in_subquery(available_part_ids()))
        .order_by_asc(Column::GeneId);
    if let Some(gene_ids) = gene_ids {
        query = query.filter(Column::GeneId.is_in(gene_ids.iter().cloned()));
    }
    query.all(db).await
}

/// Parts attached to `owner_id` through the link table `L`, by gene id
pub async fn parts_of<L: LinkTable>(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> BusinessResult<Vec<PartList>> {
    let parts = Entity::find()
        .filter(Column::Id.in_subquery(member_ids::<L>(owner_id)))
        .order_by_asc(Column::GeneId)
        .all(db)
        .await?;
    Ok(parts.into_iter().map(PartList::from).collect())
}

/// Replaces the parts linked to `owner_id`, keeping their submitted order in
/// the link's position. The caller checks that the owner exists.
pub async fn set_parts<L: LinkTable>(
    db: &DatabaseConnection,
    owner_id: Uuid,
    part_ids: &[Uuid],
) -> BusinessResult<()> {
    let txn = db.begin().await?;
    ensure_members_exist::<Entity, _>(&txn, Column::Id, part_ids, "part_ids").await?;
    replace_members::<L, _>(&txn, owner_id, part_ids).await?;
    txn.commit().await?;
    tracing::debug!("Owner {owner_id} now links {} part(s)", part_ids.len());
    Ok(())
}
