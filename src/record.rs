use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReportError;

/// Land units offered when a cycle is created. Conversion to hectares
/// treats anything outside this list as already being in hectares.
pub const LAND_UNITS: [&str; 6] = [
    "Hectare",
    "Acre",
    "Bed (sq metre)",
    "Square Metres",
    "Square Feet",
    "Square Miles",
];

/// One planting/crop season.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Cycle {
    pub id: String,
    pub name: String,
    pub crop: String,
    pub land_quantity: f64,
    pub land_unit: String,
    pub date_planted: DateTime<Utc>,
    pub active: bool,
}

impl Cycle {
    pub fn new(
        name: &str,
        crop: &str,
        land_quantity: f64,
        land_unit: &str,
        date_planted: DateTime<Utc>,
    ) -> Self {
        Cycle {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            crop: crop.to_string(),
            land_quantity,
            land_unit: land_unit.to_string(),
            date_planted,
            active: true,
        }
    }

    /// Boundary validation applied when records enter the store. A land
    /// unit outside [`LAND_UNITS`] is tolerated (conversion falls back to
    /// identity) but logged.
    pub fn validate(&self) -> Result<(), ReportError> {
        if !(self.land_quantity > 0.0) {
            return Err(ReportError::fetch(
                "cycle",
                format!(
                    "cycle '{}' has non-positive land quantity {}",
                    self.name, self.land_quantity
                ),
            ));
        }
        if !LAND_UNITS.iter().any(|u| u.eq_ignore_ascii_case(&self.land_unit)) {
            log::warn!(
                "cycle '{}' uses unrecognized land unit '{}'; treating as hectares",
                self.name,
                self.land_unit
            );
        }
        Ok(())
    }
}

/// Kinds of consumable material tracked by the application.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum MaterialCategory {
    Chemical,
    Fertilizer,
    PlantMaterial,
    SoilAmendment,
}

/// Reference data consulted by identifier lookup during row assembly.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: MaterialCategory,
}

impl Material {
    pub fn new(name: &str, category: MaterialCategory) -> Self {
        Material {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
        }
    }
}

/// How much of a material was used in a specific cycle, at what cost.
/// Belongs to exactly one cycle; read-only to the report pipeline.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MaterialUsageEntry {
    pub id: String,
    pub cycle_id: String,
    pub material_id: String,
    pub purchase_id: String,
    pub quantity_used: f64,
    pub cost_per_unit: f64,
}

impl MaterialUsageEntry {
    pub fn new(
        cycle_id: &str,
        material_id: &str,
        purchase_id: &str,
        quantity_used: f64,
        cost_per_unit: f64,
    ) -> Self {
        MaterialUsageEntry {
            id: Uuid::new_v4().to_string(),
            cycle_id: cycle_id.to_string(),
            material_id: material_id.to_string(),
            purchase_id: purchase_id.to_string(),
            quantity_used,
            cost_per_unit,
        }
    }
}

/// A recorded purchase of some quantity of a material.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Purchase {
    pub id: String,
    pub material_id: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
}

impl Purchase {
    pub fn new(material_id: &str, quantity: f64, cost_per_unit: f64) -> Self {
        Purchase {
            id: Uuid::new_v4().to_string(),
            material_id: material_id.to_string(),
            quantity,
            cost_per_unit,
        }
    }
}
