use std::{
    fs::{self, File},
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use log::debug;

use crate::{
    error::{FsError, FsResult},
    record::FileChunk,
};

/// Read a whole file into memory.
///
/// With `limit` set, files larger than `limit` bytes are refused with
/// [`FsError::TooLarge`] before any data is read; use [`read_chunk`] for those.
pub fn read_file(path: &Path, limit: Option<u64>) -> FsResult<Vec<u8>> {
    if let Some(limit) = limit {
        let size = fs::metadata(path)
            .map_err(|e| FsError::read(path, e))?
            .len();
        if size > limit {
            return Err(FsError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let bytes = fs::read(path).map_err(|e| FsError::read(path, e))?;
    debug!("[read] {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read up to `len` bytes starting at `offset`.
///
/// Reading at or past the end returns an empty chunk with `eof` set.
pub fn read_chunk(path: &Path, offset: u64, len: u32) -> FsResult<FileChunk> {
    let mut file = File::open(path).map_err(|e| FsError::read(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| FsError::read(path, e))?
        .len();

    let mut data = Vec::new();
    if offset < size {
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| FsError::read(path, e))?;
        file.take(u64::from(len))
            .read_to_end(&mut data)
            .map_err(|e| FsError::read(path, e))?;
    }

    let eof = offset.saturating_add(data.len() as u64) >= size;
    Ok(FileChunk { offset, data, eof })
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
