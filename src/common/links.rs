use crate::common::errors::BusinessResult;
use crate::validation_error;
use sea_orm::sea_query::SelectStatement;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, QueryTrait,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Join table attaching member rows (tags, parts) to an owner row
pub trait LinkTable: EntityTrait {
    type Link: ActiveModelTrait<Entity = Self> + Send;

    fn owner_column() -> Self::Column;
    fn member_column() -> Self::Column;
    /// `position` is the member's index in the submitted list
    fn link(owner_id: Uuid, member_id: Uuid, position: i32) -> Self::Link;
}

/// `SELECT member FROM link WHERE owner = ?`, for use with `in_subquery`
pub fn member_ids<L: LinkTable>(owner_id: Uuid) -> SelectStatement {
    L::find()
        .select_only()
        .column(L::member_column())
        .filter(L::owner_column().eq(owner_id))
        .into_query()
}

/// Replaces every member of `owner_id`. Run it inside a transaction.
pub async fn replace_members<L, C>(db: &C, owner_id: Uuid, member_ids: &[Uuid]) -> Result<(), DbErr>
where
    L: LinkTable,
    C: ConnectionTrait,
{
    L::delete_many()
        .filter(L::owner_column().eq(owner_id))
        .exec(db)
        .await?;

    let links: Vec<L::Link> = member_ids
        .iter()
        .zip(0..)
        .map(|(member_id, position)| L::link(owner_id, *member_id, position))
        .collect();
    if !links.is_empty() {
        L::insert_many(links).exec(db).await?;
    }
    Ok(())
}

/// Rejects lists naming the same id twice or naming rows that do not exist
pub async fn ensure_members_exist<E, C>(
    db: &C,
    id_column: E::Column,
    ids: &[Uuid],
    field: &str,
) -> BusinessResult<()>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
    C: ConnectionTrait,
{
    let unique: HashSet<&Uuid> = ids.iter().collect();
    if unique.len() != ids.len() {
        return Err(validation_error!(field, "contains the same id more than once"));
    }
    if ids.is_empty() {
        return Ok(());
    }

    let found = E::find()
        .filter(id_column.is_in(ids.iter().copied()))
        .count(db)
        .await?;
    if usize::try_from(found).unwrap_or(0) != ids.len() {
        return Err(validation_error!(field, "one or more ids do not exist"));
    }
    Ok(())
}
