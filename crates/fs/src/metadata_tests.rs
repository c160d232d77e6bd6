use super::*;

use std::{
    fs::{create_dir, remove_file, write},
    io::ErrorKind,
    time::Duration,
};

#[test]
fn extension_of_cases() {
    let cases: &[(&str, &str)] = &[
        ("report.pdf", ".pdf"),
        ("archive.tar.gz", ".gz"),
        (".bashrc", ""),
        ("Makefile", ""),
        ("notes.", "."),
        ("dir/photo.JPG", ".JPG"),
    ];

    for (input, expected) in cases {
        assert_eq!(
            extension_of(Path::new(input)),
            *expected,
            "extension_of({input:?})"
        );
    }
}

#[test]
fn base_name_cases() {
    assert_eq!(base_name(Path::new("/a/b/c.txt")), "c.txt");
    assert_eq!(base_name(Path::new("c.txt")), "c.txt");
    assert_eq!(base_name(Path::new("/")), "");
}

#[test]
fn to_datetime_converts_system_time() {
    let cases: &[(Option<SystemTime>, Option<i64>)] = &[
        (None, None),
        (Some(UNIX_EPOCH), Some(0)),
        (Some(UNIX_EPOCH + Duration::from_secs(42)), Some(42)),
    ];

    for (input, expected) in cases {
        let got = to_datetime(*input).map(|d| d.timestamp());
        assert_eq!(got, *expected, "to_datetime({input:?})");
    }
}

#[test]
fn extract_record_for_regular_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("file.txt");
    write(&path, b"hello world").expect("write file");

    let rec = extract_record(&path).expect("extract_record");

    assert_eq!(rec.path, path);
    assert!(rec.relative_path.is_none());
    assert_eq!(rec.name, "file.txt");
    assert_eq!(rec.extension, ".txt");
    assert_eq!(rec.size, 11);
    assert!(rec.timestamps.modified.timestamp() > 0);
    assert!(rec.timestamps.accessed.timestamp() > 0);
    assert!(rec.timestamps.changed.timestamp() > 0);
    assert!(rec.timestamps.created.timestamp() > 0);
}

#[test]
fn extract_record_on_removed_path_is_stat_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("gone.txt");
    write(&path, b"x").expect("write file");
    remove_file(&path).expect("remove file");

    let err = extract_record(&path).expect_err("removed file must fail");

    assert!(matches!(err, FsError::Stat { .. }), "got {err:?}");
    assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    assert!(err.to_string().contains("gone.txt"), "got {err}");
}

#[test]
fn files_info_preserves_input_order() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    let names = ["c.md", "a.md", "b.md", "a.md"];
    for name in &names[..3] {
        write(root.join(name), name.as_bytes()).expect("write file");
    }

    let paths: Vec<PathBuf> = names.iter().map(|n| root.join(n)).collect();
    let records = files_info(&paths).expect("files_info");

    assert_eq!(records.len(), paths.len());
    let got: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(got, names);
}

#[test]
fn files_info_with_no_paths_is_empty() {
    let paths: Vec<PathBuf> = Vec::new();
    assert!(files_info(&paths).expect("files_info").is_empty());
}

#[test]
fn files_info_fails_on_any_missing_path() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let good = tmp.path().join("good.txt");
    write(&good, b"ok").expect("write file");

    let paths = vec![good, tmp.path().join("missing.txt")];
    let err = files_info(&paths).expect_err("missing path must fail the batch");
    assert!(err.to_string().contains("missing.txt"), "got {err}");
}

#[test]
fn file_info_for_file_has_display_fields() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("data.bin");
    write(&path, vec![0u8; 1536]).expect("write file");

    let info = file_info(&path).expect("file_info");

    assert_eq!(info.name, "data.bin");
    assert_eq!(info.extension, ".bin");
    assert_eq!(info.size, 1536);
    assert_eq!(info.size_formatted, "1.5 KB");
    assert!(info.is_file);
    assert!(!info.is_directory);
    assert_eq!(
        info.formatted.modified,
        format_timestamp(&info.timestamps.modified)
    );

    #[cfg(unix)]
    {
        let perms = info.permissions.expect("unix permissions");
        assert!(perms.starts_with("100"), "regular file mode, got {perms}");
    }
}

#[test]
fn file_info_for_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("sub");
    create_dir(&dir).expect("create dir");

    let info = file_info(&dir).expect("file_info");

    assert!(info.is_directory);
    assert!(!info.is_file);
    assert_eq!(info.name, "sub");
    assert_eq!(info.extension, "");

    #[cfg(unix)]
    assert!(info.permissions.expect("unix permissions").starts_with("40"));
}

#[test]
fn file_info_on_missing_path_is_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let err = file_info(&tmp.path().join("nope")).expect_err("must fail");
    assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
}
