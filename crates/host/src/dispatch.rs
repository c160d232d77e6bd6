use std::time::Instant;

use anyhow::Result;
use filedock_fs::{ScanOptions, file_info, files_info, read_chunk, read_file, walk_folder};
use filedock_protocol::{BridgeRequest, BridgeResponse};
use filedock_runtime::{DEFAULT_MAX_READ_BYTES, MAX_CHUNK_LEN};
use log::{debug, warn};

use crate::picker::Picker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOptions {
    pub scan: ScanOptions,
    /// Whole-file reads above this size are refused. `None` is unbounded.
    pub max_read_bytes: Option<u64>,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            max_read_bytes: Some(DEFAULT_MAX_READ_BYTES),
        }
    }
}

/// Executes bridge requests on behalf of the presentation side.
///
/// Stateless between calls: each request runs to completion on the calling
/// thread and failures come back as [`BridgeResponse::Error`].
pub struct Host {
    options: HostOptions,
    picker: Box<dyn Picker>,
}

impl Host {
    pub fn new(options: HostOptions, picker: Box<dyn Picker>) -> Self {
        Self { options, picker }
    }

    pub fn handle(&self, req: BridgeRequest) -> BridgeResponse {
        let op = req.name();
        let started = Instant::now();

        let resp = match self.execute(req) {
            Ok(resp) => resp,
            Err(e) => {
                warn!("[{op}] {e}");
                BridgeResponse::Error(e.to_string())
            }
        };

        debug!(
            "[{op}] {} in {:.2}ms",
            resp.kind(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        resp
    }

    fn execute(&self, req: BridgeRequest) -> Result<BridgeResponse> {
        let resp = match req {
            BridgeRequest::SelectFile => BridgeResponse::File(self.picker.pick_file()?),
            BridgeRequest::SelectFiles => BridgeResponse::Files(self.picker.pick_files()?),
            BridgeRequest::SelectFolder => BridgeResponse::Folder(self.picker.pick_folder()?),
            BridgeRequest::GetFolderFiles { root } => {
                BridgeResponse::FolderFiles(walk_folder(&root, &self.options.scan)?)
            }
            BridgeRequest::GetFileInfo { path } => BridgeResponse::FileInfo(file_info(&path)?),
            BridgeRequest::GetFilesInfo { paths } => BridgeResponse::FilesInfo(files_info(&paths)?),
            BridgeRequest::ReadFile { path } => {
                BridgeResponse::Bytes(read_file(&path, self.options.max_read_bytes)?)
            }
            BridgeRequest::ReadFileChunk { path, offset, len } => {
                BridgeResponse::Chunk(read_chunk(&path, offset, len.min(MAX_CHUNK_LEN))?)
            }
            BridgeRequest::Ping => BridgeResponse::Pong,
            BridgeRequest::Status => BridgeResponse::Status(self.status_line()),
        };
        Ok(resp)
    }

    fn status_line(&self) -> String {
        let depth = self
            .options
            .scan
            .max_depth
            .map_or_else(|| "unbounded".to_owned(), |d| d.to_string());
        let read_limit = self
            .options
            .max_read_bytes
            .map_or_else(|| "unbounded".to_owned(), |b| b.to_string());

        format!(
            "picker={}, symlinks={:?}, max_depth={}, max_read_bytes={}",
            self.picker.name(),
            self.options.scan.symlinks,
            depth,
            read_limit
        )
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
