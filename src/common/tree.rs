use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait, QuerySelect};
use std::collections::HashSet;
use uuid::Uuid;

/// Walks the parent pointers of a self-referencing table starting at `start`,
/// nearest ancestor first. The walk stops at a root, at a dangling id, or
/// when it meets an id it has already visited.
pub async fn parent_chain<E, C>(
    db: &C,
    start: Uuid,
    parent_column: E::Column,
) -> Result<Vec<Uuid>, DbErr>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    let mut chain = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut current = start;

    loop {
        let parent: Option<Option<Uuid>> = E::find_by_id(current)
            .select_only()
            .column(parent_column)
            .into_tuple()
            .one(db)
            .await?;

        match parent.flatten() {
            Some(next) if visited.insert(next) => {
                chain.push(next);
                current = next;
            }
            Some(next) => {
                tracing::warn!("Cycle detected in parent chain of {start} at {next}");
                break;
            }
            None => break,
        }
    }

    Ok(chain)
}

/// True when pointing `id` at `new_parent` would make `id` its own ancestor.
pub async fn creates_cycle<E, C>(
    db: &C,
    id: Uuid,
    new_parent: Uuid,
    parent_column: E::Column,
) -> Result<bool, DbErr>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    if id == new_parent {
        return Ok(true);
    }
    let ancestors = parent_chain::<E, C>(db, new_parent, parent_column).await?;
    Ok(ancestors.contains(&id))
}
