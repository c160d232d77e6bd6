use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Birth time, or `changed` where the platform doesn't record one
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    /// Inode change time (ctime) on Unix, `modified` elsewhere
    pub changed: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub path: PathBuf,
    /// Position under the scan root, no leading separator. Only set by folder scans.
    pub relative_path: Option<PathBuf>,
    /// Base name
    pub name: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
    pub timestamps: Timestamps,
    /// Size in bytes
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTimestamps {
    pub created: String,
    pub modified: String,
    pub accessed: String,
    pub changed: String,
}

/// Single-path "file info" answer: the plain record plus display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
    pub extension: String,
    pub timestamps: Timestamps,
    pub formatted: FormattedTimestamps,
    pub size: u64,
    pub size_formatted: String,
    pub is_file: bool,
    pub is_directory: bool,
    /// Raw `st_mode` in octal, e.g. `100644`. Not available off Unix.
    pub permissions: Option<String>,
}

/// One slice of a file returned by a chunked read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChunk {
    pub offset: u64,
    pub data: Vec<u8>,
    /// True once `offset + data.len()` reached the end of the file
    pub eof: bool,
}
