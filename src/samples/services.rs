use super::models::{ActiveModel, Column, Entity, Model, Sample, SampleCreate, SampleUpdate};
use super::sample_wells;
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::tree::{creates_cycle, parent_chain};
use crate::common::validators::first_non_dna;
use crate::wells::models as wells;
use crate::{not_found, protected, validation_error};
use chrono::Utc;
use crudcrate::CRUDResource;
use crudcrate::traits::MergeIntoActiveModel;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn check_indexes(index_forward: Option<&str>, index_reverse: Option<&str>) -> BusinessResult<()> {
    match first_non_dna([("index_forward", index_forward), ("index_reverse", index_reverse)]) {
        Some(field) => Err(validation_error!(field, "must only contain A, T, G or C")),
        None => Ok(()),
    }
}

/// A sample points at exactly one of a part or a composite part.
fn check_reference(part_id: Option<Uuid>, composite_part_id: Option<Uuid>) -> BusinessResult<()> {
    match (part_id, composite_part_id) {
        (Some(_), Some(_)) => Err(validation_error!(
            "part_id",
            "a sample references either a part or a composite part, not both"
        )),
        (None, None) => Err(validation_error!(
            "part_id",
            "a sample must reference a part or a composite part"
        )),
        _ => Ok(()),
    }
}

pub async fn ensure_exists<C>(db: &C, id: Uuid) -> BusinessResult<Model>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("sample", id))
}

/// `derived_from` must exist and, for an existing sample, may not be the
/// sample itself or one of its descendants.
async fn check_derivation<C>(db: &C, id: Option<Uuid>, derived_from: Uuid) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    if Entity::find_by_id(derived_from).one(db).await?.is_none() {
        return Err(validation_error!(
            "derived_from",
            format!("sample {derived_from} does not exist")
        ));
    }
    if let Some(id) = id {
        if creates_cycle::<Entity, _>(db, id, derived_from, Column::DerivedFrom).await? {
            return Err(validation_error!(
                "derived_from",
                "a sample cannot derive from itself or from one of its descendants"
            ));
        }
    }
    Ok(())
}

async fn ensure_wells_exist<C>(db: &C, well_ids: &[Uuid]) -> BusinessResult<()>
where
    C: ConnectionTrait,
{
    let unique: HashSet<Uuid> = well_ids.iter().copied().collect();
    let found = wells::Entity::find()
        .filter(wells::Column::Id.is_in(unique.iter().copied()))
        .count(db)
        .await?;
    if usize::try_from(found).unwrap_or(0) != unique.len() {
        return Err(validation_error!("well_ids", "one or more wells do not exist"));
    }
    Ok(())
}

/// Links wells to a sample, skipping links that already exist.
pub async fn attach_wells<C>(db: &C, sample_id: Uuid, well_ids: &[Uuid]) -> BusinessResult<usize>
where
    C: ConnectionTrait,
{
    if well_ids.is_empty() {
        return Ok(0);
    }
    ensure_wells_exist(db, well_ids).await?;

    let existing: HashSet<Uuid> = sample_wells::Entity::find()
        .filter(sample_wells::Column::SampleId.eq(sample_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.well_id)
        .collect();

    let mut seen = HashSet::new();
    let links: Vec<sample_wells::ActiveModel> = well_ids
        .iter()
        .copied()
        .filter(|well_id| !existing.contains(well_id) && seen.insert(*well_id))
        .map(|well_id| sample_wells::ActiveModel {
            sample_id: Set(sample_id),
            well_id: Set(well_id),
        })
        .collect();

    let added = links.len();
    if added > 0 {
        sample_wells::Entity::insert_many(links).exec(db).await?;
    }
    Ok(added)
}

pub async fn create_sample(db: &DatabaseConnection, payload: SampleCreate) -> BusinessResult<Sample> {
    check_indexes(payload.index_forward.as_deref(), payload.index_reverse.as_deref())?;
    check_reference(payload.part_id, payload.composite_part_id)?;
    if let Some(derived_from) = payload.derived_from {
        check_derivation(db, None, derived_from).await?;
    }

    let well_ids = payload.well_ids.clone();
    ensure_wells_exist(db, &well_ids).await?;
    let active_model: ActiveModel = payload.into();

    let txn = db.begin().await?;
    let inserted = active_model
        .insert(&txn)
        .await
        .map_err(|e| e.to_business_error("sample"))?;
    attach_wells(&txn, inserted.id, &well_ids).await?;
    txn.commit().await?;

    Ok(Sample::get_one(db, inserted.id).await?)
}

pub async fn update_sample(
    db: &DatabaseConnection,
    id: Uuid,
    payload: SampleUpdate,
) -> BusinessResult<Sample> {
    let existing = ensure_exists(db, id).await?;

    let index_forward = payload.index_forward.clone().flatten();
    let index_reverse = payload.index_reverse.clone().flatten();
    check_indexes(index_forward.as_deref(), index_reverse.as_deref())?;

    let part_id = payload.part_id.unwrap_or(existing.part_id);
    let composite_part_id = payload.composite_part_id.unwrap_or(existing.composite_part_id);
    check_reference(part_id, composite_part_id)?;

    if let Some(Some(derived_from)) = payload.derived_from {
        check_derivation(db, Some(id), derived_from).await?;
    }

    payload
        .merge_into_activemodel(existing.into_active_model())
        .map_err(|e| e.to_business_error("sample"))?
        .update(db)
        .await
        .map_err(|e| e.to_business_error("sample"))?;

    Ok(Sample::get_one(db, id).await?)
}

/// Samples that other samples derive from are protected.
pub async fn delete_sample(db: &DatabaseConnection, id: Uuid) -> BusinessResult<()> {
    ensure_exists(db, id).await?;

    let dependents = Entity::find()
        .filter(Column::DerivedFrom.eq(id))
        .count(db)
        .await?;
    if dependents > 0 {
        return Err(protected!(
            "sample",
            format!("{dependents} sample(s) derive from it")
        ));
    }

    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| e.to_business_error("sample"))?;
    tracing::info!("Deleted sample {id}");
    Ok(())
}

/// Takes sample ids ordered oldest to newest and makes each sample derive
/// from the one before it.
pub async fn link_derivation_chain(
    db: &DatabaseConnection,
    sample_ids: &[Uuid],
) -> BusinessResult<Vec<Model>> {
    let distinct: HashSet<Uuid> = sample_ids.iter().copied().collect();
    if sample_ids.len() < 2 || distinct.len() != sample_ids.len() {
        return Err(validation_error!(
            "sample_ids",
            "need at least two distinct samples, oldest first"
        ));
    }

    let txn = db.begin().await?;

    let found: HashMap<Uuid, Model> = Entity::find()
        .filter(Column::Id.is_in(sample_ids.iter().copied()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();
    if let Some(missing) = sample_ids.iter().find(|id| !found.contains_key(id)) {
        return Err(not_found!("sample", missing));
    }

    for pair in sample_ids.windows(2) {
        let (older, newer) = (pair[0], pair[1]);
        if creates_cycle::<Entity, _>(&txn, newer, older, Column::DerivedFrom).await? {
            return Err(validation_error!(
                "sample_ids",
                format!("linking {newer} to {older} would create a derivation cycle")
            ));
        }
        Entity::update(ActiveModel {
            id: Set(newer),
            derived_from: Set(Some(older)),
            last_updated: Set(Utc::now()),
            ..Default::default()
        })
        .exec(&txn)
        .await?;
    }

    let mut linked = Vec::with_capacity(sample_ids.len());
    for id in sample_ids {
        linked.push(ensure_exists(&txn, *id).await?);
    }
    txn.commit().await?;

    tracing::info!("Linked derivation chain of {} samples", linked.len());
    Ok(linked)
}

/// Ancestors of a sample, parent first.
pub async fn lineage<C>(db: &C, id: Uuid) -> BusinessResult<Vec<Model>>
where
    C: ConnectionTrait,
{
    ensure_exists(db, id).await?;
    let ancestor_ids = parent_chain::<Entity, _>(db, id, Column::DerivedFrom).await?;

    let mut by_id: HashMap<Uuid, Model> = Entity::find()
        .filter(Column::Id.is_in(ancestor_ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();

    Ok(ancestor_ids
        .iter()
        .filter_map(|ancestor| by_id.remove(ancestor))
        .collect())
}
