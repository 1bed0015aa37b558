use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::record::{Cycle, Material, MaterialUsageEntry, Purchase};

/// Read side of the key-value persistence layer the report pipeline
/// consumes. The pipeline never writes; implementations are assumed to be
/// externally synchronized, so two reports generated concurrently over a
/// mutating store may observe different snapshots.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All cycles, in storage order.
    async fn cycles(&self) -> Result<Vec<Cycle>, ReportError>;

    /// Every usage entry recorded against the given cycle.
    async fn usage_by_cycle(&self, cycle_id: &str) -> Result<Vec<MaterialUsageEntry>, ReportError>;

    /// Material metadata by identifier.
    async fn material(&self, id: &str) -> Result<Material, ReportError>;

    /// Purchase record by identifier.
    async fn purchase(&self, id: &str) -> Result<Purchase, ReportError>;
}

/// A full point-in-time image of the record collections, as serialized to
/// and from JSON. This is both the CLI input format and the seed format
/// for [`InMemoryStore`].
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub cycles: Vec<Cycle>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub usage: Vec<MaterialUsageEntry>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

/// In-memory record store backed by plain collections. Cycle and usage
/// ordering follows insertion order; materials and purchases are looked up
/// by identifier.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    cycles: Vec<Cycle>,
    usage: Vec<MaterialUsageEntry>,
    materials: HashMap<String, Material>,
    purchases: HashMap<String, Purchase>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, validating cycles at the boundary.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, ReportError> {
        let mut store = Self::new();
        for cycle in snapshot.cycles {
            store.add_cycle(cycle)?;
        }
        for material in snapshot.materials {
            store.add_material(material);
        }
        for entry in snapshot.usage {
            store.add_usage(entry);
        }
        for purchase in snapshot.purchases {
            store.add_purchase(purchase);
        }
        Ok(store)
    }

    /// Load a JSON snapshot file.
    pub fn from_json_file(path: &Path) -> Result<Self, ReportError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;
        log::debug!(
            "loaded snapshot from {}: {} cycles, {} usage entries",
            path.display(),
            snapshot.cycles.len(),
            snapshot.usage.len()
        );
        Self::from_snapshot(snapshot)
    }

    pub fn add_cycle(&mut self, cycle: Cycle) -> Result<(), ReportError> {
        cycle.validate()?;
        self.cycles.push(cycle);
        Ok(())
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.id.clone(), material);
    }

    pub fn add_usage(&mut self, entry: MaterialUsageEntry) {
        self.usage.push(entry);
    }

    pub fn add_purchase(&mut self, purchase: Purchase) {
        self.purchases.insert(purchase.id.clone(), purchase);
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn cycles(&self) -> Result<Vec<Cycle>, ReportError> {
        Ok(self.cycles.clone())
    }

    async fn usage_by_cycle(&self, cycle_id: &str) -> Result<Vec<MaterialUsageEntry>, ReportError> {
        Ok(self
            .usage
            .iter()
            .filter(|entry| entry.cycle_id == cycle_id)
            .cloned()
            .collect())
    }

    async fn material(&self, id: &str) -> Result<Material, ReportError> {
        self.materials
            .get(id)
            .cloned()
            .ok_or_else(|| ReportError::missing("material", id))
    }

    async fn purchase(&self, id: &str) -> Result<Purchase, ReportError> {
        self.purchases
            .get(id)
            .cloned()
            .ok_or_else(|| ReportError::missing("purchase", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MaterialCategory;
    use chrono::{DateTime, Utc};

    fn planted() -> DateTime<Utc> {
        "2024-03-01T00:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn usage_lookup_filters_by_cycle_preserving_order() {
        let mut store = InMemoryStore::new();
        let cycle = Cycle::new("Plot A", "Tomato", 2.0, "Hectare", planted());
        let other = Cycle::new("Plot B", "Corn", 1.0, "Acre", planted());
        store.add_cycle(cycle.clone()).unwrap();
        store.add_cycle(other.clone()).unwrap();

        let first = MaterialUsageEntry::new(&cycle.id, "m1", "p1", 10.0, 5.0);
        let second = MaterialUsageEntry::new(&cycle.id, "m2", "p2", 4.0, 2.5);
        let unrelated = MaterialUsageEntry::new(&other.id, "m1", "p1", 1.0, 5.0);
        store.add_usage(first.clone());
        store.add_usage(unrelated);
        store.add_usage(second.clone());

        let listing = store.usage_by_cycle(&cycle.id).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, first.id);
        assert_eq!(listing[1].id, second.id);
    }

    #[tokio::test]
    async fn missing_material_is_a_fetch_failure() {
        let store = InMemoryStore::new();
        let err = store.material("nope").await.unwrap_err();
        assert!(matches!(err, ReportError::MissingRecord { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn snapshot_rejects_invalid_cycles() {
        let mut cycle = Cycle::new("Plot", "Corn", 1.0, "Hectare", planted());
        cycle.land_quantity = -1.0;
        let snapshot = StoreSnapshot {
            cycles: vec![cycle],
            ..Default::default()
        };
        assert!(InMemoryStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let cycle = Cycle::new("Plot", "Corn", 1.0, "Hectare", planted());
        let material = Material::new("Gypsum", MaterialCategory::SoilAmendment);
        let snapshot = StoreSnapshot {
            cycles: vec![cycle.clone()],
            materials: vec![material],
            ..Default::default()
        };
        let raw = serde_json::to_string(&snapshot).unwrap();
        let parsed: StoreSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.cycles.len(), 1);
        assert_eq!(parsed.cycles[0].id, cycle.id);
        assert_eq!(parsed.materials.len(), 1);
    }
}
