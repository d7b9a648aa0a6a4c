use super::distribution_platesets;
use crate::common::errors::hook_validation_error;
use crate::parts::models as parts;
use crate::plates::models as plates;
use crate::plates::plate_wells;
use crate::platesets::{models as platesets, plateset_plates};
use crate::samples::{models as samples, sample_wells};
use sea_orm::sea_query::SelectStatement;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Plateset ids held by the given distributions
pub async fn distribution_plateset_ids<C>(
    db: &C,
    distribution_ids: &[Uuid],
) -> Result<Vec<Uuid>, DbErr>
where
    C: ConnectionTrait,
{
    plateset_ids_where(db, Some(distribution_ids)).await
}

async fn plateset_ids_where<C>(db: &C, distribution_ids: Option<&[Uuid]>) -> Result<Vec<Uuid>, DbErr>
where
    C: ConnectionTrait,
{
    let mut query = distribution_platesets::Entity::find();
    if let Some(ids) = distribution_ids {
        query = query.filter(distribution_platesets::Column::DistributionId.is_in(ids.iter().copied()));
    }
    query
        .select_only()
        .column(distribution_platesets::Column::PlatesetId)
        .distinct()
        .into_tuple()
        .all(db)
        .await
}

/// Adds platesets to a distribution. Platesets already present are skipped.
pub async fn link_platesets<C>(
    db: &C,
    distribution_id: Uuid,
    plateset_ids: &[Uuid],
) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    let requested: HashSet<Uuid> = plateset_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(0);
    }

    let found = platesets::Entity::find()
        .filter(platesets::Column::Id.is_in(requested.iter().copied()))
        .count(db)
        .await?;
    if usize::try_from(found).unwrap_or(0) != requested.len() {
        return Err(hook_validation_error(
            "plateset_ids",
            "one or more platesets do not exist",
        ));
    }

    let existing: HashSet<Uuid> = distribution_plateset_ids(db, &[distribution_id])
        .await?
        .into_iter()
        .collect();
    let links: Vec<distribution_platesets::ActiveModel> = requested
        .difference(&existing)
        .map(|plateset_id| distribution_platesets::ActiveModel {
            distribution_id: Set(distribution_id),
            plateset_id: Set(*plateset_id),
        })
        .collect();

    let added = links.len();
    if added > 0 {
        distribution_platesets::Entity::insert_many(links).exec(db).await?;
    }
    Ok(added)
}

/// Returns false when the plateset was not part of the distribution
pub async fn unlink_plateset<C>(
    db: &C,
    distribution_id: Uuid,
    plateset_id: Uuid,
) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = distribution_platesets::Entity::delete_many()
        .filter(distribution_platesets::Column::DistributionId.eq(distribution_id))
        .filter(distribution_platesets::Column::PlatesetId.eq(plateset_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Plate ids reachable through the platesets of one distribution, or of
/// every distribution when `distribution_id` is `None`
fn distributed_plate_ids(distribution_id: Option<Uuid>) -> SelectStatement {
    let mut platesets = distribution_platesets::Entity::find()
        .select_only()
        .column(distribution_platesets::Column::PlatesetId);
    if let Some(id) = distribution_id {
        platesets = platesets.filter(distribution_platesets::Column::DistributionId.eq(id));
    }

    plateset_plates::Entity::find()
        .select_only()
        .column(plateset_plates::Column::PlateId)
        .filter(plateset_plates::Column::PlatesetId.in_subquery(platesets.into_query()))
        .into_query()
}

/// Part ids of the samples sitting in any well of the plates `plate_ids` selects
fn part_ids_on_plates(plate_ids: SelectStatement) -> SelectStatement {
    let well_ids = plate_wells::Entity::find()
        .select_only()
        .column(plate_wells::Column::WellId)
        .filter(plate_wells::Column::PlateId.in_subquery(plate_ids))
        .into_query();
    let sample_ids = sample_wells::Entity::find()
        .select_only()
        .column(sample_wells::Column::SampleId)
        .filter(sample_wells::Column::WellId.in_subquery(well_ids))
        .into_query();

    samples::Entity::find()
        .select_only()
        .column(samples::Column::PartId)
        .filter(samples::Column::Id.in_subquery(sample_ids))
        .filter(samples::Column::PartId.is_not_null())
        .into_query()
}

/// Part ids present in at least one distribution, as a subquery. The whole
/// chain runs as one statement so its size does not grow with the inventory.
pub fn available_part_ids() -> SelectStatement {
    part_ids_on_plates(distributed_plate_ids(None))
}

/// Plates of a distribution, unwrapped through its platesets
pub async fn distribution_plates<C>(db: &C, distribution_id: Uuid) -> Result<Vec<plates::Model>, DbErr>
where
    C: ConnectionTrait,
{
    plates::Entity::find()
        .filter(plates::Column::Id.in_subquery(distributed_plate_ids(Some(distribution_id))))
        .order_by_asc(plates::Column::Name)
        .all(db)
        .await
}

/// Unique parts held by a distribution, ordered by gene id
pub async fn distribution_parts<C>(db: &C, distribution_id: Uuid) -> Result<Vec<parts::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let part_ids = part_ids_on_plates(distributed_plate_ids(Some(distribution_id)));
    parts::Entity::find()
        .filter(parts::Column::Id.in_subquery(part_ids))
        .order_by_asc(parts::Column::GeneId)
        .all(db)
        .await
}
