use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ReportError;
use crate::export::REPORT_MIME;

/// Logical directory reports are written under.
pub const REPORT_DIRECTORY: &str = "AgriExpense";

/// Where this process is allowed to put files, resolved once at startup
/// and passed explicitly to every persistence call.
#[derive(Clone, Debug)]
pub enum PlatformCapabilities {
    /// A writable filesystem rooted at the platform's storage directory.
    Device { storage_root: PathBuf },
    /// No filesystem; artifacts are offered to the caller as downloads.
    Browser,
}

/// An artifact handed back for client-side download when no filesystem
/// is available.
#[derive(Clone, Debug)]
pub struct DownloadArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// How a report artifact ended up being delivered.
#[derive(Clone, Debug)]
pub enum SaveOutcome {
    File(PathBuf),
    Download(DownloadArtifact),
}

/// Resolve (and create if absent) the report directory under the given
/// storage root. Reusing an existing directory is not an error.
pub fn ensure_report_dir(storage_root: &Path) -> io::Result<PathBuf> {
    let dir = storage_root.join(REPORT_DIRECTORY);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Persist a serialized report artifact.
///
/// On a device the artifact is written into the report directory,
/// replacing any file of the same name. In a browser context the bytes
/// are returned as a [`DownloadArtifact`] for the caller to serve.
/// Failures are reported through the `Result`; the report data itself
/// remains valid either way.
pub fn save_report(
    caps: &PlatformCapabilities,
    bytes: Vec<u8>,
    filename: &str,
) -> Result<SaveOutcome, ReportError> {
    match caps {
        PlatformCapabilities::Device { storage_root } => {
            log::info!("saving report on device...");
            let dir = ensure_report_dir(storage_root)?;
            let path = dir.join(filename);
            fs::write(&path, &bytes)?;
            log::info!("wrote {} bytes to {}", bytes.len(), path.display());
            Ok(SaveOutcome::File(path))
        }
        PlatformCapabilities::Browser => {
            log::info!("no filesystem available; offering report as download");
            Ok(SaveOutcome::Download(DownloadArtifact {
                filename: filename.to_string(),
                mime: REPORT_MIME,
                bytes,
            }))
        }
    }
}

/// List previously generated report files. Browsers keep nothing, so the
/// listing is empty there.
pub fn list_reports(caps: &PlatformCapabilities) -> Result<Vec<PathBuf>, ReportError> {
    match caps {
        PlatformCapabilities::Device { storage_root } => {
            let dir = ensure_report_dir(storage_root)?;
            let mut entries = Vec::new();
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    entries.push(entry.path());
                }
            }
            entries.sort();
            Ok(entries)
        }
        PlatformCapabilities::Browser => Ok(Vec::new()),
    }
}

/// Delete a previously generated report. Returns `false` when there was
/// nothing to delete.
pub fn delete_report(caps: &PlatformCapabilities, filename: &str) -> Result<bool, ReportError> {
    match caps {
        PlatformCapabilities::Device { storage_root } => {
            let path = storage_root.join(REPORT_DIRECTORY).join(filename);
            match fs::remove_file(&path) {
                Ok(()) => Ok(true),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
                Err(err) => Err(err.into()),
            }
        }
        PlatformCapabilities::Browser => Ok(false),
    }
}

/// Hand a saved report to the platform's default viewer. Failure here is
/// recoverable: the file still exists and the report data is unaffected.
pub fn open_report(path: &Path) -> Result<(), ReportError> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let status = Command::new(opener)
        .arg(path)
        .status()
        .map_err(|err| ReportError::OpenArtifact(err.to_string()))?;
    if status.success() {
        log::info!("successfully opened {}", path.display());
        Ok(())
    } else {
        Err(ReportError::OpenArtifact(format!(
            "{opener} exited with {status} for {}",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_dir_creation_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let first = ensure_report_dir(root.path()).unwrap();
        let second = ensure_report_dir(root.path()).unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with(REPORT_DIRECTORY));
        assert!(first.is_dir());
    }

    #[test]
    fn save_list_delete_round_trip_on_device() {
        let root = tempfile::tempdir().unwrap();
        let caps = PlatformCapabilities::Device {
            storage_root: root.path().to_path_buf(),
        };

        let outcome = save_report(&caps, b"report bytes".to_vec(), "report.xlsx").unwrap();
        let path = match outcome {
            SaveOutcome::File(path) => path,
            SaveOutcome::Download(_) => panic!("device save should write a file"),
        };
        assert_eq!(fs::read(&path).unwrap(), b"report bytes");

        let listing = list_reports(&caps).unwrap();
        assert_eq!(listing, vec![path]);

        assert!(delete_report(&caps, "report.xlsx").unwrap());
        assert!(!delete_report(&caps, "report.xlsx").unwrap());
        assert!(list_reports(&caps).unwrap().is_empty());
    }

    #[test]
    fn save_replaces_existing_file() {
        let root = tempfile::tempdir().unwrap();
        let caps = PlatformCapabilities::Device {
            storage_root: root.path().to_path_buf(),
        };
        save_report(&caps, b"old".to_vec(), "report.xlsx").unwrap();
        save_report(&caps, b"new".to_vec(), "report.xlsx").unwrap();
        let dir = ensure_report_dir(root.path()).unwrap();
        assert_eq!(fs::read(dir.join("report.xlsx")).unwrap(), b"new");
    }

    #[test]
    fn browser_save_falls_back_to_download() {
        let caps = PlatformCapabilities::Browser;
        let outcome = save_report(&caps, vec![1, 2, 3], "report.xlsx").unwrap();
        match outcome {
            SaveOutcome::Download(artifact) => {
                assert_eq!(artifact.filename, "report.xlsx");
                assert_eq!(artifact.mime, REPORT_MIME);
                assert_eq!(artifact.bytes, vec![1, 2, 3]);
            }
            SaveOutcome::File(_) => panic!("browser save should not touch the filesystem"),
        }
        assert!(list_reports(&caps).unwrap().is_empty());
        assert!(!delete_report(&caps, "report.xlsx").unwrap());
    }
}
