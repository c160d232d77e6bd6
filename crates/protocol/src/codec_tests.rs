use super::*;
use crate::{BridgeRequest, BridgeResponse};

use std::{io::Cursor, path::PathBuf};

#[test]
fn request_survives_the_wire() {
    let req = BridgeRequest::GetFilesInfo {
        paths: vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.txt")],
    };

    let mut wire = Vec::new();
    write_message(&mut wire, &req).expect("write request");

    let len = u32::from_be_bytes(wire[..4].try_into().unwrap()) as usize;
    assert_eq!(len, wire.len() - 4, "length prefix covers the payload");

    let decoded: BridgeRequest = read_message(&mut Cursor::new(wire)).expect("read request");
    assert_eq!(decoded, req);
}

#[test]
fn scanned_records_survive_the_wire() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::create_dir(tmp.path().join("sub")).expect("create sub");
    std::fs::write(tmp.path().join("sub").join("n.md"), b"# note").expect("write note");

    let records =
        filedock_fs::walk_folder(tmp.path(), &Default::default()).expect("walk_folder");
    let resp = BridgeResponse::FolderFiles(records);

    let mut wire = Vec::new();
    write_message(&mut wire, &resp).expect("write response");
    let decoded: BridgeResponse = read_message(&mut Cursor::new(wire)).expect("read response");

    assert_eq!(decoded, resp);
}

#[test]
fn consecutive_messages_are_framed_independently() {
    let mut wire = Vec::new();
    write_message(&mut wire, &BridgeResponse::Pong).expect("write pong");
    write_message(&mut wire, &BridgeResponse::File(None)).expect("write cancelled pick");
    write_message(&mut wire, &BridgeResponse::Error("boom".into())).expect("write error");

    let mut cursor = Cursor::new(wire);
    let first: BridgeResponse = read_message(&mut cursor).expect("first");
    let second: BridgeResponse = read_message(&mut cursor).expect("second");
    let third: BridgeResponse = read_message(&mut cursor).expect("third");

    assert_eq!(first, BridgeResponse::Pong);
    assert_eq!(second, BridgeResponse::File(None));
    assert_eq!(third, BridgeResponse::Error("boom".into()));
    assert!(read_message::<_, BridgeResponse>(&mut cursor).is_err());
}

#[test]
fn oversized_length_prefix_is_rejected() {
    let len = (MAX_FRAME_LEN as u32) + 1;
    let mut wire = len.to_be_bytes().to_vec();
    wire.extend_from_slice(&[0u8; 16]);

    let err = read_message::<_, BridgeRequest>(&mut Cursor::new(wire)).expect_err("too big");
    assert!(err.to_string().contains("exceeds"), "got {err}");
}

#[test]
fn truncated_payload_is_an_error() {
    let mut wire = Vec::new();
    write_message(&mut wire, &BridgeRequest::Status).expect("write");
    wire.truncate(wire.len() - 1);
    wire[..4].copy_from_slice(&100u32.to_be_bytes());

    assert!(read_message::<_, BridgeRequest>(&mut Cursor::new(wire)).is_err());
}

#[test]
fn request_names_match_operation_table() {
    let cases = [
        (BridgeRequest::SelectFile, "select-file"),
        (BridgeRequest::SelectFiles, "select-files"),
        (BridgeRequest::SelectFolder, "select-folder"),
        (
            BridgeRequest::GetFolderFiles {
                root: PathBuf::from("/"),
            },
            "get-folder-files",
        ),
        (
            BridgeRequest::ReadFile {
                path: PathBuf::from("/x"),
            },
            "read-file",
        ),
        (BridgeRequest::Ping, "ping"),
    ];

    for (req, name) in cases {
        assert_eq!(req.name(), name);
    }
}

#[test]
fn encode_message_enforces_limit_without_writing() {
    let resp = BridgeResponse::Bytes(vec![7u8; 256]);

    let err = encode_message(&resp, 128).expect_err("over limit");
    assert!(err.to_string().contains("exceeds the 128 byte limit"), "got {err}");

    let payload = encode_message(&resp, 1024).expect("fits");
    let mut wire = Vec::new();
    write_frame(&mut wire, &payload).expect("write frame");
    let decoded: BridgeResponse = read_message(&mut Cursor::new(wire)).expect("read");
    assert_eq!(decoded, resp);
}

#[test]
fn byte_payload_envelope_stays_within_headroom() {
    let len = 100_000usize;
    let payload = encode_message(&BridgeResponse::Bytes(vec![0u8; len]), MAX_FRAME_LEN)
        .expect("encode");

    let envelope = payload.len() - len;
    assert!(
        (envelope as u64) <= MAX_FRAME_LEN as u64 - MAX_BYTES_PAYLOAD,
        "envelope of {envelope} bytes"
    );
}
