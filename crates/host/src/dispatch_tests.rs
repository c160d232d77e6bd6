use super::*;
use crate::picker::HeadlessPicker;

use std::{
    fs::{create_dir, write},
    path::PathBuf,
};

use anyhow::bail;

/// Picker that answers every dialog with a fixed selection.
struct ScriptedPicker {
    selection: Vec<PathBuf>,
}

impl Picker for ScriptedPicker {
    fn name(&self) -> &str {
        "scripted"
    }

    fn pick_file(&self) -> Result<Option<PathBuf>> {
        Ok(self.selection.first().cloned())
    }

    fn pick_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.selection.clone())
    }

    fn pick_folder(&self) -> Result<Option<PathBuf>> {
        Ok(self.selection.first().cloned())
    }
}

struct BrokenPicker;

impl Picker for BrokenPicker {
    fn name(&self) -> &str {
        "broken"
    }

    fn pick_file(&self) -> Result<Option<PathBuf>> {
        bail!("file dialog unavailable")
    }

    fn pick_files(&self) -> Result<Vec<PathBuf>> {
        bail!("file dialog unavailable")
    }

    fn pick_folder(&self) -> Result<Option<PathBuf>> {
        bail!("file dialog unavailable")
    }
}

fn host_with(picker: Box<dyn Picker>) -> Host {
    Host::new(HostOptions::default(), picker)
}

#[test]
fn cancelled_pickers_return_sentinels() {
    let host = host_with(Box::new(HeadlessPicker));

    assert_eq!(host.handle(BridgeRequest::SelectFile), BridgeResponse::File(None));
    assert_eq!(host.handle(BridgeRequest::SelectFiles), BridgeResponse::Files(vec![]));
    assert_eq!(host.handle(BridgeRequest::SelectFolder), BridgeResponse::Folder(None));
}

#[test]
fn pickers_return_selection() {
    let a = PathBuf::from("/home/u/a.txt");
    let b = PathBuf::from("/home/u/b.txt");
    let host = host_with(Box::new(ScriptedPicker {
        selection: vec![a.clone(), b.clone()],
    }));

    assert_eq!(
        host.handle(BridgeRequest::SelectFile),
        BridgeResponse::File(Some(a.clone()))
    );
    assert_eq!(
        host.handle(BridgeRequest::SelectFiles),
        BridgeResponse::Files(vec![a.clone(), b])
    );
    assert_eq!(
        host.handle(BridgeRequest::SelectFolder),
        BridgeResponse::Folder(Some(a))
    );
}

#[test]
fn picker_failure_becomes_error_response() {
    let host = host_with(Box::new(BrokenPicker));

    match host.handle(BridgeRequest::SelectFiles) {
        BridgeResponse::Error(msg) => assert!(msg.contains("unavailable"), "got {msg}"),
        other => panic!("expected Error, got {other:?}"),
    }
}

#[test]
fn get_folder_files_scans_tree() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("a.txt"), b"a").expect("write a.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("b.txt"), b"b").expect("write b.txt");

    let host = host_with(Box::new(HeadlessPicker));
    let resp = host.handle(BridgeRequest::GetFolderFiles {
        root: root.to_path_buf(),
    });

    let BridgeResponse::FolderFiles(records) = resp else {
        panic!("expected FolderFiles, got {resp:?}");
    };
    let mut rel: Vec<PathBuf> = records
        .into_iter()
        .filter_map(|r| r.relative_path)
        .collect();
    rel.sort();
    assert_eq!(
        rel,
        vec![PathBuf::from("a.txt"), PathBuf::from("sub").join("b.txt")]
    );
}

#[test]
fn get_folder_files_on_missing_root_is_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let host = host_with(Box::new(HeadlessPicker));

    let resp = host.handle(BridgeRequest::GetFolderFiles {
        root: tmp.path().join("missing"),
    });

    match resp {
        BridgeResponse::Error(msg) => {
            assert!(msg.starts_with("cannot read folder"), "got {msg}");
            assert!(msg.contains("missing"), "got {msg}");
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[test]
fn get_files_info_returns_n_records_in_order() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths: Vec<PathBuf> = ["z.txt", "m.txt", "a.txt"]
        .iter()
        .map(|n| tmp.path().join(n))
        .collect();
    for p in &paths {
        write(p, b"x").expect("write file");
    }

    let host = host_with(Box::new(HeadlessPicker));
    let resp = host.handle(BridgeRequest::GetFilesInfo {
        paths: paths.clone(),
    });

    let BridgeResponse::FilesInfo(records) = resp else {
        panic!("expected FilesInfo, got {resp:?}");
    };
    let got: Vec<PathBuf> = records.into_iter().map(|r| r.path).collect();
    assert_eq!(got, paths);
}

#[test]
fn get_file_info_formats_size() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("big.bin");
    write(&path, vec![0u8; 1_048_576]).expect("write file");

    let host = host_with(Box::new(HeadlessPicker));
    let resp = host.handle(BridgeRequest::GetFileInfo { path });

    let BridgeResponse::FileInfo(info) = resp else {
        panic!("expected FileInfo, got {resp:?}");
    };
    assert_eq!(info.size_formatted, "1 MB");
    assert!(info.is_file);
}

#[test]
fn read_file_honours_limit() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("data.bin");
    write(&path, b"0123456789").expect("write file");

    let host = host_with(Box::new(HeadlessPicker));
    assert_eq!(
        host.handle(BridgeRequest::ReadFile { path: path.clone() }),
        BridgeResponse::Bytes(b"0123456789".to_vec())
    );

    let strict = Host::new(
        HostOptions {
            max_read_bytes: Some(4),
            ..HostOptions::default()
        },
        Box::new(HeadlessPicker),
    );
    match strict.handle(BridgeRequest::ReadFile { path: path.clone() }) {
        BridgeResponse::Error(msg) => assert!(msg.contains("read limit"), "got {msg}"),
        other => panic!("expected Error, got {other:?}"),
    }

    // Chunked reads still work on files over the limit.
    let resp = strict.handle(BridgeRequest::ReadFileChunk {
        path,
        offset: 8,
        len: u32::MAX,
    });
    let BridgeResponse::Chunk(chunk) = resp else {
        panic!("expected Chunk, got {resp:?}");
    };
    assert_eq!(chunk.data, b"89");
    assert!(chunk.eof);
}

#[test]
fn ping_and_status() {
    let host = host_with(Box::new(HeadlessPicker));

    assert_eq!(host.handle(BridgeRequest::Ping), BridgeResponse::Pong);

    match host.handle(BridgeRequest::Status) {
        BridgeResponse::Status(line) => {
            assert!(line.contains("picker=none"), "got {line}");
            assert!(line.contains("symlinks=Follow"), "got {line}");
            assert!(line.contains("max_depth=256"), "got {line}");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}
