use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::snapshot::{FinalResult, OVERALL_KEY, RegionSnapshot};

#[cfg(unix)]
const EXPORT_FILE_MODE: u32 = 0o644;

/// Region id to snapshot, plus the cross-region totals under `overall`.
///
/// A region literally named `overall` is replaced by the totals.
#[must_use]
pub fn export_document(result: &FinalResult) -> BTreeMap<&str, &RegionSnapshot> {
    let mut document: BTreeMap<&str, &RegionSnapshot> = result.regions().into_iter().collect();
    if let Some(overall) = result.overall() {
        document.insert(OVERALL_KEY, overall);
    }
    document
}

/// Sibling file the export is staged in before being renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("export")));
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_file(path: &Path, json: &[u8]) -> AppResult<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(EXPORT_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(json).await?;
    file.flush().await?;
    Ok(())
}

/// Writes the export document to `path` as indented JSON.
///
/// The document is staged next to `path` and renamed over it, so a failed
/// write leaves no partial file behind. Returns `Ok(false)` without
/// touching the file system when there is nothing to export.
///
/// # Errors
///
/// Returns an error when serialization, the write, or the rename fails.
pub async fn write_export(path: &Path, result: &FinalResult) -> AppResult<bool> {
    if !result.has_results() {
        return Ok(false);
    }
    let json = serde_json::to_vec_pretty(&export_document(result))?;

    let staging = staging_path(path);
    let written = async {
        write_file(&staging, &json).await?;
        tokio::fs::rename(&staging, path).await?;
        Ok::<(), AppError>(())
    }
    .await;
    if let Err(err) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&staging).await
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::debug!(
                "Failed to remove staged export {}: {}",
                staging.display(),
                cleanup
            );
        }
        return Err(err);
    }
    Ok(true)
}

/// Exports the final result; failures are reported and otherwise ignored.
pub async fn export_results(path: &Path, result: &FinalResult) {
    match write_export(path, result).await {
        Ok(true) => tracing::info!("Results exported to {}", path.display()),
        Ok(false) => tracing::debug!("No results; skipping export to {}", path.display()),
        Err(err) => {
            tracing::error!("Failed to export results to {}: {}", path.display(), err);
            eprintln!("Failed to export results to {}: {}", path.display(), err);
        }
    }
}
