use super::plateset_plates;
use crate::common::errors::hook_validation_error;
use crate::plates::models as plates;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    Set,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Plate ids held by any of the given platesets, without duplicates
pub async fn plateset_plate_ids<C>(db: &C, plateset_ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr>
where
    C: ConnectionTrait,
{
    let ids: Vec<Uuid> = plateset_plates::Entity::find()
        .filter(plateset_plates::Column::PlatesetId.is_in(plateset_ids.iter().copied()))
        .select_only()
        .column(plateset_plates::Column::PlateId)
        .distinct()
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids)
}

/// Adds plates to a plateset. Plates already in the set are skipped.
pub async fn link_plates<C>(db: &C, plateset_id: Uuid, plate_ids: &[Uuid]) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    let requested: HashSet<Uuid> = plate_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(0);
    }

    let found = plates::Entity::find()
        .filter(plates::Column::Id.is_in(requested.iter().copied()))
        .count(db)
        .await?;
    if usize::try_from(found).unwrap_or(0) != requested.len() {
        return Err(hook_validation_error("plate_ids", "one or more plates do not exist"));
    }

    let existing: HashSet<Uuid> = plateset_plate_ids(db, &[plateset_id])
        .await?
        .into_iter()
        .collect();
    let links: Vec<plateset_plates::ActiveModel> = requested
        .difference(&existing)
        .map(|plate_id| plateset_plates::ActiveModel {
            plateset_id: Set(plateset_id),
            plate_id: Set(*plate_id),
        })
        .collect();

    let added = links.len();
    if added > 0 {
        plateset_plates::Entity::insert_many(links).exec(db).await?;
    }
    Ok(added)
}

/// Removes a plate from a plateset. Returns false when it was not a member.
pub async fn unlink_plate<C>(db: &C, plateset_id: Uuid, plate_id: Uuid) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = plateset_plates::Entity::delete_many()
        .filter(plateset_plates::Column::PlatesetId.eq(plateset_id))
        .filter(plateset_plates::Column::PlateId.eq(plate_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
