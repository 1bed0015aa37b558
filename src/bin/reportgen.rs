#![cfg(not(tarpaulin_include))]

use std::env;
use std::path::{Path, PathBuf};

use agriexpense::export::{report_filename, to_xlsx};
use agriexpense::persist::{save_report, PlatformCapabilities, SaveOutcome};
use agriexpense::report::ReportGenerator;
use agriexpense::store::InMemoryStore;

/// Generate the outflow report from a JSON record-store snapshot.
///
/// # Usage
/// `reportgen <snapshot.json> [storage-root] [--open]`
///
/// The storage root defaults to the current directory; the report lands
/// in `<storage-root>/AgriExpense/<date>.xlsx`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(snapshot_path) = args.get(1) else {
        eprintln!("usage: reportgen <snapshot.json> [storage-root] [--open]");
        std::process::exit(2);
    };
    let storage_root = args
        .get(2)
        .filter(|arg| *arg != "--open")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let open_after = args.iter().any(|arg| arg == "--open");

    let store = InMemoryStore::from_json_file(Path::new(snapshot_path))?;
    let generator = ReportGenerator::new(store);

    let table = generator.outflow_report().await?;
    log::info!("assembled outflow report with {} rows", table.len());

    let bytes = to_xlsx(&table)?;
    let filename = report_filename(chrono::Local::now().date_naive());

    let caps = PlatformCapabilities::Device { storage_root };
    match save_report(&caps, bytes, &filename)? {
        SaveOutcome::File(path) => {
            println!("report written to {}", path.display());
            if open_after {
                // Viewer failures do not invalidate the report itself.
                if let Err(err) = agriexpense::persist::open_report(&path) {
                    eprintln!("could not open report: {err}");
                }
            }
        }
        SaveOutcome::Download(artifact) => {
            println!(
                "report ready for download: {} ({} bytes)",
                artifact.filename,
                artifact.bytes.len()
            );
        }
    }

    Ok(())
}
