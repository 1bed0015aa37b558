/*!
# AgriExpense Report Core

The report-data-aggregation core of an agricultural record-keeping
application, built in Rust.

## Overview

AgriExpense tracks planting cycles, material purchases (seeds, chemicals,
fertilizer, soil amendments), and material usage per cycle. This crate
implements the part that turns those stored records into spreadsheet
reports: it fetches record snapshots from an asynchronous record store,
joins cycles with their material-usage entries and material metadata,
normalizes land areas to hectares, derives per-row expense figures, and
hands the assembled table to the export and persistence boundaries.

## Architecture

### Record layer
- **Typed records** - Cycle, Material, MaterialUsageEntry, Purchase with
  named fields, validated when they enter the store
- **Record Store trait** - async read-only access (get-all, by foreign key,
  by id), with an in-memory implementation for the CLI and tests

### Aggregation pipeline
- **Unit Converter** - fixed conversion table from land units to hectares
- **Report Generator** - two-barrier fan-out aggregation: all per-cycle
  usage fetches complete before row derivation, all material lookups
  complete before the table is finalized; any failure rejects the whole
  report with no partial table
- **Cycle inventory and purchase resolution** - secondary table/listing
  builders over the same store

### Output layer
- **Export** - XLSX workbook assembly via rust_xlsxwriter, plus a
  comma-delimited alternate export and date-derived filenames
- **Persistence** - platform-capability switch: write into the
  `AgriExpense` directory on a device, or offer the bytes as a
  client-side download where no filesystem exists

## Modules

- **record**: typed record structs and boundary validation
- **store**: the `RecordStore` trait and `InMemoryStore`
- **units**: land-unit normalization to hectares
- **report**: the aggregation pipeline and `ReportTable`
- **export**: XLSX/CSV serialization and filename derivation
- **persist**: report directory management, save/list/delete/open
- **error**: the `ReportError` taxonomy

## Design Highlights

- Structured fan-out (join-all over immutable result lists) instead of
  callback-mutated accumulators
- Platform capabilities resolved once and passed explicitly, instead of
  ambient platform checks scattered through business logic
- All-or-nothing report generation: fetch and computation failures abort,
  persistence and viewer failures are recoverable and reported separately
*/

// Re-export all modules so they appear in the documentation
pub mod error;
pub mod export;
pub mod persist;
pub mod record;
pub mod report;
pub mod store;
pub mod units;

/// Re-export the main types to make the crate easier to use
pub use error::ReportError;
pub use persist::{PlatformCapabilities, SaveOutcome};
pub use record::{Cycle, Material, MaterialCategory, MaterialUsageEntry, Purchase};
pub use report::{CellValue, ReportGenerator, ReportTable};
pub use store::{InMemoryStore, RecordStore, StoreSnapshot};
