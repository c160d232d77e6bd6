use std::{
    fs::{self, DirEntry, Metadata, ReadDir},
    path::{Path, PathBuf},
};

use filedock_runtime::DEFAULT_MAX_DEPTH;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FsError, FsResult},
    metadata::record_from_metadata,
    record::FileRecord,
};

/// What the walker does with symbolic links found under the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymlinkPolicy {
    /// Resolve links like `stat` does: linked files are emitted and linked
    /// directories traversed. Links back to an ancestor are not entered.
    #[default]
    Follow,
    /// Neither emit nor traverse symlinks.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub symlinks: SymlinkPolicy,
    /// Deepest directory level below the root the scan may enter. `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            symlinks: SymlinkPolicy::Follow,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

#[cfg(unix)]
type DirId = (u64, u64);

#[cfg(not(unix))]
type DirId = PathBuf;

/// One open directory listing on the walk stack.
struct Frame {
    dir: PathBuf,
    relative: PathBuf,
    depth: usize,
    id: DirId,
    entries: ReadDir,
}

/// Collect a record for every regular file beneath `root`, at any depth.
///
/// Entries come out depth-first in the order the OS lists them; nothing is
/// sorted. Directories are walked but never emitted, and neither is the root.
/// Any listing or stat failure aborts the whole scan.
pub fn walk_folder(root: &Path, opts: &ScanOptions) -> FsResult<Vec<FileRecord>> {
    let root_meta = fs::metadata(root).map_err(|e| FsError::list_dir(root, e))?;
    let root_id = dir_id(root, &root_meta)?;

    let mut stack = vec![open_frame(root.to_path_buf(), PathBuf::new(), 0, root_id)?];
    let mut records = Vec::new();

    debug!("[walk] scanning {} with {:?}", root.display(), opts);

    while let Some(frame) = stack.last_mut() {
        let entry = match frame.entries.next() {
            None => {
                stack.pop();
                continue;
            }
            Some(Err(e)) => return Err(FsError::list_dir(&frame.dir, e)),
            Some(Ok(entry)) => entry,
        };

        let relative = frame.relative.join(entry.file_name());
        let depth = frame.depth + 1;
        let path = entry.path();

        let Some(meta) = stat_entry(&entry, &path, opts.symlinks)? else {
            continue;
        };

        if meta.is_file() {
            records.push(record_from_metadata(path, Some(relative), &meta));
        } else if meta.is_dir() {
            if let Some(limit) = opts.max_depth
                && depth > limit
            {
                return Err(FsError::DepthExceeded { path, limit });
            }

            let id = dir_id(&path, &meta)?;
            if stack.iter().any(|f| f.id == id) {
                debug!("[walk] {} links back to an ancestor, not entering", path.display());
                continue;
            }

            stack.push(open_frame(path, relative, depth, id)?);
        }
    }

    debug!("[walk] {} files under {}", records.len(), root.display());
    Ok(records)
}

fn open_frame(dir: PathBuf, relative: PathBuf, depth: usize, id: DirId) -> FsResult<Frame> {
    let entries = fs::read_dir(&dir).map_err(|e| FsError::list_dir(&dir, e))?;
    Ok(Frame {
        dir,
        relative,
        depth,
        id,
        entries,
    })
}

/// Metadata the walker acts on, or `None` when the policy says to skip the entry.
fn stat_entry(entry: &DirEntry, path: &Path, policy: SymlinkPolicy) -> FsResult<Option<Metadata>> {
    match policy {
        SymlinkPolicy::Follow => fs::metadata(path)
            .map(Some)
            .map_err(|e| FsError::stat(path, e)),
        SymlinkPolicy::Skip => {
            let meta = entry.metadata().map_err(|e| FsError::stat(path, e))?;
            if meta.is_symlink() {
                debug!("[walk] skipping symlink {}", path.display());
                return Ok(None);
            }
            Ok(Some(meta))
        }
    }
}

#[cfg(unix)]
fn dir_id(_path: &Path, meta: &Metadata) -> FsResult<DirId> {
    use std::os::unix::fs::MetadataExt;

    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
fn dir_id(path: &Path, _meta: &Metadata) -> FsResult<DirId> {
    fs::canonicalize(path).map_err(|e| FsError::stat(path, e))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
