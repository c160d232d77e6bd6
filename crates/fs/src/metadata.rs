use std::{
    fs::{self, Metadata},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    error::{FsError, FsResult},
    format::{format_size, format_timestamp},
    record::{FileInfo, FileRecord, FormattedTimestamps, Timestamps},
};

/// Stat `path` (following symlinks) and build its record.
///
/// Every call issues a fresh stat; a path that vanished or can't be read is
/// an error, never a record with default fields.
pub fn extract_record(path: &Path) -> FsResult<FileRecord> {
    let meta = fs::metadata(path).map_err(|e| FsError::stat(path, e))?;
    Ok(record_from_metadata(path.to_path_buf(), None, &meta))
}

/// Records for each path, in input order. The first failure aborts the batch.
pub fn files_info<P: AsRef<Path>>(paths: &[P]) -> FsResult<Vec<FileRecord>> {
    debug!("[files_info] {} paths", paths.len());
    paths.iter().map(|p| extract_record(p.as_ref())).collect()
}

/// Extended single-path lookup with display strings and type flags.
pub fn file_info(path: &Path) -> FsResult<FileInfo> {
    let meta = fs::metadata(path).map_err(|e| FsError::stat(path, e))?;
    let timestamps = timestamps(&meta);

    Ok(FileInfo {
        path: path.to_path_buf(),
        name: base_name(path),
        extension: extension_of(path),
        formatted: FormattedTimestamps {
            created: format_timestamp(&timestamps.created),
            modified: format_timestamp(&timestamps.modified),
            accessed: format_timestamp(&timestamps.accessed),
            changed: format_timestamp(&timestamps.changed),
        },
        timestamps,
        size: meta.len(),
        size_formatted: format_size(meta.len()),
        is_file: meta.is_file(),
        is_directory: meta.is_dir(),
        permissions: permissions(&meta),
    })
}

pub(crate) fn record_from_metadata(
    path: PathBuf,
    relative_path: Option<PathBuf>,
    meta: &Metadata,
) -> FileRecord {
    FileRecord {
        name: base_name(&path),
        extension: extension_of(&path),
        timestamps: timestamps(meta),
        size: meta.len(),
        relative_path,
        path,
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `a.tar.gz` -> `.gz`, `.bashrc` -> ``, `notes.` -> `.`
fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

pub(crate) fn timestamps(meta: &Metadata) -> Timestamps {
    let epoch = DateTime::<Utc>::from(UNIX_EPOCH);

    let modified = to_datetime(meta.modified().ok()).unwrap_or(epoch);
    let accessed = to_datetime(meta.accessed().ok()).unwrap_or(epoch);
    let changed = changed_time(meta).unwrap_or(modified);
    // Birth time is missing on some filesystems and kernels.
    let created = to_datetime(meta.created().ok()).unwrap_or(changed);

    Timestamps {
        created,
        modified,
        accessed,
        changed,
    }
}

fn to_datetime(t: Option<SystemTime>) -> Option<DateTime<Utc>> {
    t.map(DateTime::<Utc>::from)
}

#[cfg(unix)]
fn changed_time(meta: &Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    DateTime::from_timestamp(meta.ctime(), nanos)
}

#[cfg(not(unix))]
fn changed_time(_meta: &Metadata) -> Option<DateTime<Utc>> {
    None
}

#[cfg(unix)]
fn permissions(meta: &Metadata) -> Option<String> {
    use std::os::unix::fs::MetadataExt;

    Some(format!("{:o}", meta.mode()))
}

#[cfg(not(unix))]
fn permissions(_meta: &Metadata) -> Option<String> {
    None
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
