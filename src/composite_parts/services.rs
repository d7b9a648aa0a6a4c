use super::composite_part_parts;
use super::models::Entity;
use crate::common::errors::BusinessResult;
use crate::not_found;
use crate::parts::models::{self as parts, PartList};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

pub async fn ensure_exists<C>(db: &C, id: Uuid) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("composite part", id))?;
    Ok(())
}

/// The parts of a composite in assembly order
pub async fn ordered_parts<C>(db: &C, composite_part_id: Uuid) -> BusinessResult<Vec<PartList>>
where
    C: ConnectionTrait,
{
    let parts = parts::Entity::find()
        .join(
            JoinType::InnerJoin,
            composite_part_parts::Relation::Parts.def().rev(),
        )
        .filter(composite_part_parts::Column::CompositePartId.eq(composite_part_id))
        .order_by_asc(composite_part_parts::Column::Position)
        .all(db)
        .await?;
    Ok(parts.into_iter().map(PartList::from).collect())
}
