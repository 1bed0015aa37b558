use futures::future::try_join_all;

use crate::error::ReportError;
use crate::record::{Cycle, MaterialUsageEntry, Purchase};
use crate::store::RecordStore;
use crate::units::{normalize_to_hectares, round2};

/// Full column labels for the outflow report. The last two columns are
/// part of the fixed report layout but are not populated per row.
pub const OUTFLOW_HEADINGS: [&str; 9] = [
    "No.",
    "Crop",
    "Input Description",
    "Quantity per Ha. (1)",
    "Area Exploited In (Ha.s) (2)",
    "Price (in Soles)/Unit (3)",
    "Total Expenses (In Soles) (1x2x3=4)",
    "Beginning Month",
    "Beginning Year",
];

/// Short column codes, second header row.
pub const OUTFLOW_SHORT_HEADINGS: [&str; 9] = [
    "No.",
    "Crop",
    "Input Description",
    "QtyPerArea",
    "Area",
    "UnitCPrice",
    "Outflows",
    "Beginning Month",
    "Beginning Year",
];

/// Header row for the cycle inventory sheet.
pub const CYCLE_SHEET_HEADINGS: [&str; 7] = [
    "ID Number",
    "Cycle Name",
    "Crop Planted",
    "Land Quantity",
    "Units of land",
    "Date Planted",
    "Open",
];

/// A single spreadsheet cell as handed to the report builder.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl ToString) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// An assembled report: header rows first, then data rows. Built fresh per
/// generation and immutable once returned.
#[derive(Clone, Debug, Default)]
pub struct ReportTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn heading_row(labels: &[&str]) -> Vec<CellValue> {
    labels.iter().map(|label| CellValue::text(label)).collect()
}

/// Row fields derivable before material metadata has been resolved.
struct RowSkeleton {
    seq: usize,
    crop: String,
    material_id: String,
    quantity_per_area: f64,
    area_rounded: f64,
    cost_per_unit: f64,
    total_expense: f64,
}

/// Assembles report tables from record-store snapshots. Owns no persistent
/// state and caches nothing between invocations.
pub struct ReportGenerator<S> {
    store: S,
}

impl<S: RecordStore> ReportGenerator<S> {
    pub fn new(store: S) -> Self {
        ReportGenerator { store }
    }

    /// Generate the outflow report over every cycle in the store. No
    /// timeframe filter is applied; callers wanting a narrower window
    /// should select cycles themselves and use [`Self::outflow_report_for`].
    pub async fn outflow_report(&self) -> Result<ReportTable, ReportError> {
        let cycles = self.store.cycles().await?;
        self.outflow_report_for(&cycles).await
    }

    /// Generate the outflow report for the given cycles, in the order
    /// supplied. Fails whole: if any record fetch fails, or any cycle with
    /// usage has a zero land area, no table is returned.
    pub async fn outflow_report_for(&self, cycles: &[Cycle]) -> Result<ReportTable, ReportError> {
        // First barrier: fetch every cycle's usage entries concurrently.
        let usage_lists = try_join_all(
            cycles
                .iter()
                .map(|cycle| self.store.usage_by_cycle(&cycle.id)),
        )
        .await?;

        let mut skeletons = Vec::new();
        let mut seq = 1;
        for (cycle, usage) in cycles.iter().zip(&usage_lists) {
            let area_ha = normalize_to_hectares(cycle.land_quantity, &cycle.land_unit);
            for entry in usage {
                log::debug!("processing usage entry {} of cycle '{}'", entry.id, cycle.name);
                if area_ha == 0.0 {
                    return Err(ReportError::ZeroArea {
                        cycle: cycle.name.clone(),
                    });
                }
                let quantity_per_area = entry.quantity_used / area_ha; // (1)
                let area_rounded = round2(area_ha); // (2)
                // The published figures multiply the rounded area, not the
                // raw one; kept for compatibility with existing reports.
                let total_expense = quantity_per_area * area_rounded * entry.cost_per_unit; // 1 * 2 * 3
                skeletons.push(RowSkeleton {
                    seq,
                    crop: cycle.crop.clone(),
                    material_id: entry.material_id.clone(),
                    quantity_per_area,
                    area_rounded,
                    cost_per_unit: entry.cost_per_unit,
                    total_expense,
                });
                seq += 1;
            }
        }

        // Second barrier: resolve material display names concurrently.
        let materials = try_join_all(
            skeletons
                .iter()
                .map(|row| self.store.material(&row.material_id)),
        )
        .await?;

        let mut table = ReportTable::default();
        table.rows.push(heading_row(&OUTFLOW_HEADINGS));
        table.rows.push(heading_row(&OUTFLOW_SHORT_HEADINGS));
        for (row, material) in skeletons.iter().zip(materials) {
            table.rows.push(vec![
                CellValue::text(row.seq),
                CellValue::text(&row.crop),
                CellValue::text(&material.name),
                CellValue::text(format!("{:.2}", row.quantity_per_area)),
                CellValue::text(format!("{:.2}", row.area_rounded)),
                CellValue::Number(row.cost_per_unit),
                CellValue::Number(row.total_expense),
            ]);
        }
        Ok(table)
    }

    /// One row per stored cycle, for the cycle inventory sheet.
    pub async fn cycle_inventory(&self) -> Result<ReportTable, ReportError> {
        let cycles = self.store.cycles().await?;
        let mut table = ReportTable::default();
        table.rows.push(heading_row(&CYCLE_SHEET_HEADINGS));
        for cycle in cycles {
            table.rows.push(vec![
                CellValue::text(&cycle.id),
                CellValue::text(&cycle.name),
                CellValue::text(&cycle.crop),
                CellValue::Number(cycle.land_quantity),
                CellValue::text(&cycle.land_unit),
                CellValue::text(cycle.date_planted),
                CellValue::text(cycle.active),
            ]);
        }
        Ok(table)
    }

    /// Resolve the purchase record behind each usage entry, in entry order.
    /// All-or-nothing like the report barriers.
    pub async fn purchases_for(
        &self,
        usage: &[MaterialUsageEntry],
    ) -> Result<Vec<Purchase>, ReportError> {
        try_join_all(usage.iter().map(|entry| self.store.purchase(&entry.purchase_id))).await
    }
}
