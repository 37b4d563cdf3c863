// src/fs.rs
//! Whole-file JSON writes.

use crate::error::{StoreError, StoreResult};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Serializes `value` as pretty JSON and replaces `path` with it.
///
/// The content goes to a sibling temp file first and is then renamed over
/// the destination, so a reader never sees a half-written file.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        let msg = format!("JSON serialization failed for {:?}: {}", path, e);
        log::error!("write_json_pretty: {}", msg);
        StoreError::Serialization(msg)
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            log::info!("Created data directory {:?}", parent);
        }
    }

    let tmp = path.with_extension("json.tmp");
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|e| {
            log::error!("Failed to open temp file {:?} for writing: {:?}", tmp, e);
            e
        })?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    drop(file);

    rename_with_fallback(&tmp, path)?;
    log::debug!("Wrote {} bytes to {:?}", json.len(), path);
    Ok(())
}

/// Renames `temp_path` over `destination`, removing the destination first
/// when the platform refuses to rename onto an existing file.
fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}
