use super::models::{ActiveModel, Model};
use super::plate_wells;
use crate::common::errors::hook_validation_error;
use crate::wells::models as wells;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, QueryTrait, Set,
};
use uuid::Uuid;

pub const MAX_ROWS: i32 = 26;
pub const MAX_COLUMNS: i32 = 48;

/// Rows are lettered A..Z so a plate has at most 26 of them.
pub fn validate_dimensions(height: i32, length: i32) -> Result<(), DbErr> {
    if !(1..=MAX_ROWS).contains(&height) {
        return Err(hook_validation_error(
            "height",
            &format!("must be between 1 and {MAX_ROWS}, got {height}"),
        ));
    }
    if !(1..=MAX_COLUMNS).contains(&length) {
        return Err(hook_validation_error(
            "length",
            &format!("must be between 1 and {MAX_COLUMNS}, got {length}"),
        ));
    }
    Ok(())
}

/// Row-major addresses of a grid: "A1", "A2", ..., then "B1", ...
/// Callers validate the dimensions first.
pub fn well_addresses(height: i32, length: i32) -> Vec<String> {
    let rows = u8::try_from(height.clamp(0, MAX_ROWS)).unwrap_or(0);
    (0..rows)
        .flat_map(|row| {
            let letter = char::from(b'A' + row);
            (1..=length).map(move |column| format!("{letter}{column}"))
        })
        .collect()
}

/// Sorts "A2" before "A10"
pub fn address_sort_key(address: &str) -> (String, u32) {
    let split = address
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(address.len());
    let (row, column) = address.split_at(split);
    (row.to_ascii_uppercase(), column.parse().unwrap_or(0))
}

fn set_value<V>(value: &ActiveValue<V>) -> Option<V>
where
    V: Into<sea_orm::Value> + Clone,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.clone()),
        ActiveValue::NotSet => None,
    }
}

/// Validates the grid, inserts the plate and generates its wells.
/// Run it inside a transaction so a failed generation leaves no plate behind.
pub async fn insert_plate<C>(db: &C, plate: ActiveModel) -> Result<Model, DbErr>
where
    C: ConnectionTrait,
{
    let height = set_value(&plate.height)
        .ok_or_else(|| hook_validation_error("height", "is required"))?;
    let length = set_value(&plate.length)
        .ok_or_else(|| hook_validation_error("length", "is required"))?;
    validate_dimensions(height, length)?;

    let inserted = plate.insert(db).await?;
    generate_wells(db, &inserted).await?;
    Ok(inserted)
}

/// Creates one well per grid address and links it to the plate. A plate that
/// already has at least one well is left alone; returns the number of wells
/// created.
pub async fn generate_wells<C>(db: &C, plate: &Model) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    let existing = plate_wells::Entity::find()
        .filter(plate_wells::Column::PlateId.eq(plate.id))
        .count(db)
        .await?;
    if existing > 0 {
        tracing::debug!(
            "Plate {} already has {existing} wells, skipping generation",
            plate.id
        );
        return Ok(0);
    }

    validate_dimensions(plate.height, plate.length)?;

    let now = Utc::now();
    let new_wells: Vec<wells::ActiveModel> = well_addresses(plate.height, plate.length)
        .into_iter()
        .map(|address| wells::ActiveModel {
            id: Set(Uuid::new_v4()),
            address: Set(address),
            volume: Set(Decimal::ZERO),
            quantity: Set(None),
            media: Set(None),
            organism_id: Set(None),
            created_at: Set(now),
            last_updated: Set(now),
        })
        .collect();

    let links: Vec<plate_wells::ActiveModel> = new_wells
        .iter()
        .filter_map(|well| set_value(&well.id))
        .map(|well_id| plate_wells::ActiveModel {
            plate_id: Set(plate.id),
            well_id: Set(well_id),
        })
        .collect();

    let created = new_wells.len();
    wells::Entity::insert_many(new_wells).exec(db).await?;
    plate_wells::Entity::insert_many(links).exec(db).await?;

    Ok(created)
}

/// Wells of a plate in address order
pub async fn plate_wells<C>(db: &C, plate_id: Uuid) -> Result<Vec<wells::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let well_ids = plate_wells::Entity::find()
        .select_only()
        .column(plate_wells::Column::WellId)
        .filter(plate_wells::Column::PlateId.eq(plate_id))
        .into_query();

    let mut wells = wells::Entity::find()
        .filter(wells::Column::Id.in_subquery(well_ids))
        .all(db)
        .await?;
    wells.sort_by_key(|well| address_sort_key(&well.address));
    Ok(wells)
}
