use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::containers::models as containers;
use crate::parts::models as parts;
use crate::plates::models::{self as plates, PlateForm, PlateStatus, PlateType};
use crate::plates::services::{insert_plate, plate_wells};
use crate::samples::models::{self as samples, Evidence};
use crate::samples::sample_wells;
use crate::validation_error;
use crate::wells::models as wells;
use chrono::Utc;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

pub const TWIST_VENDOR: &str = "Twist";
const GLYCEROL_VOLUME_UL: i64 = 50;
const GLYCEROL_MEDIA: &str = "glycerol_lb";

/// One line of a vendor platemap
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlatemapRow {
    #[serde(rename = "Plate ID")]
    pub plate_vendor_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Well Location")]
    pub well_location: String,
    #[serde(rename = "Product type")]
    pub product_type: String,
    #[serde(rename = "Yield (ng)", default)]
    pub yield_ng: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    ClonalGenes,
    GlycerolStock,
}

impl ProductType {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "clonal genes" => Some(Self::ClonalGenes),
            "glycerol stock" => Some(Self::GlycerolStock),
            _ => None,
        }
    }

    pub fn plate_type(self) -> PlateType {
        match self {
            Self::ClonalGenes => PlateType::PlasmidPlate,
            Self::GlycerolStock => PlateType::GlycerolStock,
        }
    }
}

/// Where and how to create one vendor plate of the platemap
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlateAssignment {
    pub plate_vendor_id: String,
    pub name: String,
    pub container_id: Uuid,
    pub plate_form: PlateForm,
    pub height: Option<i32>,
    pub length: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlatemapImport {
    /// Platemap CSV with `Plate ID`, `Name`, `Well Location`, `Product type`
    /// and optionally `Yield (ng)` columns
    pub csv: String,
    pub plates: Vec<PlateAssignment>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub plates_created: usize,
    pub plates_skipped: usize,
    pub wells_filled: usize,
    pub rows_ignored: usize,
}

impl PlatemapRow {
    /// The yield rounded to whole nanograms, as stored in the well quantity
    pub fn quantity(&self) -> BusinessResult<Option<i32>> {
        let Some(yield_ng) = self.yield_ng else {
            return Ok(None);
        };
        if yield_ng.is_sign_negative() && !yield_ng.is_zero() {
            return Err(validation_error!(
                "Yield (ng)",
                format!("{} in well {} is negative", yield_ng, self.well_location)
            ));
        }
        i32::try_from(yield_ng.round()).map(Some).map_err(|_| {
            validation_error!(
                "Yield (ng)",
                format!("{} in well {} is too large", yield_ng, self.well_location)
            )
        })
    }
}

pub fn parse_platemap(text: &str) -> BusinessResult<Vec<PlatemapRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<PlatemapRow>().enumerate() {
        let row = record.map_err(|e| {
            validation_error!("csv", format!("row {} could not be read: {e}", line + 1))
        })?;
        row.quantity()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(validation_error!("csv", "the platemap has no rows"));
    }
    Ok(rows)
}

struct ImportedPlate {
    product: ProductType,
    wells_by_address: HashMap<String, wells::Model>,
}

/// Creates the plates of a platemap that are not known yet, then fills the
/// wells of rows whose name is the gene id of an existing part. Every write
/// happens in one transaction.
pub async fn import_platemap(
    db: &DatabaseConnection,
    default_dimensions: (i32, i32),
    request: PlatemapImport,
) -> BusinessResult<ImportSummary> {
    let rows = parse_platemap(&request.csv)?;
    let assignments: HashMap<&str, &PlateAssignment> = request
        .plates
        .iter()
        .map(|assignment| (assignment.plate_vendor_id.as_str(), assignment))
        .collect();

    // Plate ids in the order they first appear, each with its product type
    let mut vendor_plates: Vec<(&str, &str)> = Vec::new();
    for row in &rows {
        if !vendor_plates.iter().any(|(id, _)| *id == row.plate_vendor_id) {
            vendor_plates.push((row.plate_vendor_id.as_str(), row.product_type.as_str()));
        }
    }

    let mut summary = ImportSummary::default();
    let txn = db.begin().await?;

    let mut imported: HashMap<String, ImportedPlate> = HashMap::new();
    for (vendor_id, product_label) in vendor_plates {
        let known = plates::Entity::find()
            .filter(plates::Column::PlateVendorId.eq(vendor_id))
            .one(&txn)
            .await?;
        let (Some(product), None, Some(assignment)) = (
            ProductType::from_label(product_label),
            known,
            assignments.get(vendor_id),
        ) else {
            tracing::debug!("Skipping vendor plate {vendor_id}");
            summary.plates_skipped += 1;
            continue;
        };

        if containers::Entity::find_by_id(assignment.container_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(validation_error!(
                "container_id",
                format!(
                    "container {} for plate {vendor_id} does not exist",
                    assignment.container_id
                )
            ));
        }

        let now = Utc::now();
        let plate = plates::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(assignment.name.clone()),
            plate_type: Set(product.plate_type()),
            plate_form: Set(assignment.plate_form.clone()),
            status: Set(PlateStatus::Stocked),
            plate_vendor_id: Set(Some(vendor_id.to_string())),
            thaw_count: Set(0),
            notes: Set(None),
            height: Set(assignment.height.unwrap_or(default_dimensions.0)),
            length: Set(assignment.length.unwrap_or(default_dimensions.1)),
            container_id: Set(assignment.container_id),
            protocol_id: Set(None),
            created_at: Set(now),
            last_updated: Set(now),
        };
        let plate = insert_plate(&txn, plate)
            .await
            .map_err(|e| e.to_business_error("plate"))?;

        let wells_by_address = plate_wells(&txn, plate.id)
            .await?
            .into_iter()
            .map(|well| (well.address.clone(), well))
            .collect();
        tracing::info!("Imported vendor plate {vendor_id} as {}", plate.id);
        summary.plates_created += 1;
        imported.insert(
            vendor_id.to_string(),
            ImportedPlate {
                product,
                wells_by_address,
            },
        );
    }

    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    let part_ids: HashMap<String, Uuid> = parts::Entity::find()
        .filter(parts::Column::GeneId.is_in(names))
        .all(&txn)
        .await?
        .into_iter()
        .map(|part| (part.gene_id, part.id))
        .collect();

    for row in &rows {
        let address = row.well_location.to_ascii_uppercase();
        let target = imported.get_mut(&row.plate_vendor_id).and_then(|plate| {
            let product = plate.product;
            plate
                .wells_by_address
                .remove(&address)
                .map(|well| (product, well))
        });
        let (Some((product, well)), Some(part_id)) = (target, part_ids.get(&row.name)) else {
            summary.rows_ignored += 1;
            continue;
        };

        let well_id = well.id;
        let mut well = well.into_active_model();
        match product {
            ProductType::GlycerolStock => {
                well.volume = Set(Decimal::from(GLYCEROL_VOLUME_UL));
                well.media = Set(Some(GLYCEROL_MEDIA.to_string()));
            }
            ProductType::ClonalGenes => {
                // Dried DNA
                well.volume = Set(Decimal::ZERO);
                well.quantity = Set(row.quantity()?);
            }
        }
        well.last_updated = Set(Utc::now());
        well.update(&txn).await?;

        let now = Utc::now();
        let sample = samples::ActiveModel {
            id: Set(Uuid::new_v4()),
            sample_type: Set(None),
            status: Set(None),
            evidence: Set(Some(Evidence::TwistConfirmed)),
            vendor: Set(Some(TWIST_VENDOR.to_string())),
            outside_collaborator: Set(false),
            index_forward: Set(None),
            index_reverse: Set(None),
            derived_from: Set(None),
            part_id: Set(Some(*part_id)),
            composite_part_id: Set(None),
            created_at: Set(now),
            last_updated: Set(now),
        }
        .insert(&txn)
        .await?;

        sample_wells::ActiveModel {
            sample_id: Set(sample.id),
            well_id: Set(well_id),
        }
        .insert(&txn)
        .await?;
        summary.wells_filled += 1;
    }

    txn.commit().await?;
    tracing::info!(
        "Platemap import: {} plate(s) created, {} skipped, {} well(s) filled, {} row(s) ignored",
        summary.plates_created,
        summary.plates_skipped,
        summary.wells_filled,
        summary.rows_ignored
    );
    Ok(summary)
}
