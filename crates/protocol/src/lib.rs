//! Fixed operation set the privileged host exposes to the presentation side.
//!
//! One request variant per operation; the presentation side never gets a
//! handle or raw filesystem capability, only plain data back.

pub mod codec;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use filedock_fs::{FileChunk, FileInfo, FileRecord, FormattedTimestamps, Timestamps};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeRequest {
    /// Native single-file picker.
    SelectFile,
    /// Native multi-file picker.
    SelectFiles,
    /// Native folder picker.
    SelectFolder,
    /// Every regular file beneath `root`, flattened.
    GetFolderFiles { root: PathBuf },
    GetFileInfo { path: PathBuf },
    GetFilesInfo { paths: Vec<PathBuf> },
    /// Whole file as one buffer, subject to the host's read limit.
    ReadFile { path: PathBuf },
    ReadFileChunk { path: PathBuf, offset: u64, len: u32 },
    Ping,
    Status,
}

impl BridgeRequest {
    /// Operation name as shown in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeRequest::SelectFile => "select-file",
            BridgeRequest::SelectFiles => "select-files",
            BridgeRequest::SelectFolder => "select-folder",
            BridgeRequest::GetFolderFiles { .. } => "get-folder-files",
            BridgeRequest::GetFileInfo { .. } => "get-file-info",
            BridgeRequest::GetFilesInfo { .. } => "get-files-info",
            BridgeRequest::ReadFile { .. } => "read-file",
            BridgeRequest::ReadFileChunk { .. } => "read-file-chunk",
            BridgeRequest::Ping => "ping",
            BridgeRequest::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeResponse {
    /// `None` when the user cancelled the picker.
    File(Option<PathBuf>),
    /// Empty when the user cancelled the picker.
    Files(Vec<PathBuf>),
    /// `None` when the user cancelled the picker.
    Folder(Option<PathBuf>),
    FolderFiles(Vec<FileRecord>),
    FileInfo(FileInfo),
    FilesInfo(Vec<FileRecord>),
    Bytes(Vec<u8>),
    Chunk(FileChunk),
    Pong,
    Status(String),
    Error(String),
}

impl BridgeResponse {
    /// Variant name, for "unexpected response" diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeResponse::File(_) => "File",
            BridgeResponse::Files(_) => "Files",
            BridgeResponse::Folder(_) => "Folder",
            BridgeResponse::FolderFiles(_) => "FolderFiles",
            BridgeResponse::FileInfo(_) => "FileInfo",
            BridgeResponse::FilesInfo(_) => "FilesInfo",
            BridgeResponse::Bytes(_) => "Bytes",
            BridgeResponse::Chunk(_) => "Chunk",
            BridgeResponse::Pong => "Pong",
            BridgeResponse::Status(_) => "Status",
            BridgeResponse::Error(_) => "Error",
        }
    }
}
