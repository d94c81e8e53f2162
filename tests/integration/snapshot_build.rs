//! Snapshot construction against real trees

use super::test_utils::{create_dir, create_file, TreePair};
use dirdelta::{
    build_snapshot, DigestAlgorithm, MemorySink, Snapshot, SnapshotBuilder, SnapshotError,
};
use std::sync::Arc;

#[test]
fn test_same_tree_same_snapshot() {
    let pair = TreePair::new();
    create_file(&pair.old, "file1.txt", "content1");
    create_file(&pair.old, "dir1/file2.txt", "content2");

    let first = build_snapshot(&pair.old).unwrap();
    let second = build_snapshot(&pair.old).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_snapshots_of_equal_trees_at_different_roots_match() {
    let pair = TreePair::new();
    for root in [&pair.old, &pair.new] {
        create_file(root, "a/b/c.txt", "deep");
        create_file(root, "top.txt", "top");
        create_dir(root, "empty");
    }

    let old = build_snapshot(&pair.old).unwrap();
    let new = build_snapshot(&pair.new).unwrap();
    assert_eq!(old.files(), new.files());
    assert_eq!(old.dirs(), new.dirs());
    assert_ne!(old.root(), new.root());
}

#[test]
fn test_digests_are_lowercase_hex_sha256() {
    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "abc");

    let snapshot = build_snapshot(&pair.old).unwrap();
    assert_eq!(
        snapshot.digest("a.txt"),
        Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[test]
fn test_root_not_recorded() {
    let pair = TreePair::new();
    create_dir(&pair.old, "sub");
    let snapshot = build_snapshot(&pair.old).unwrap();
    assert!(!snapshot.contains_dir(""));
    assert!(!snapshot.contains_dir("."));
    assert_eq!(snapshot.dir_count(), 1);
}

#[test]
fn test_no_path_is_both_file_and_dir() {
    let pair = TreePair::new();
    create_file(&pair.old, "x/y/z.txt", "z");
    create_file(&pair.old, "x/w.txt", "w");

    let snapshot = build_snapshot(&pair.old).unwrap();
    for key in snapshot.files().keys() {
        assert!(!snapshot.contains_dir(key));
    }
}

#[test]
fn test_parallel_and_sequential_agree_for_both_algorithms() {
    let pair = TreePair::new();
    for i in 0..40 {
        create_file(&pair.old, &format!("d{}/f{}.bin", i % 5, i), &"x".repeat(i * 100));
    }

    for algorithm in [DigestAlgorithm::Sha256, DigestAlgorithm::Blake3] {
        let sequential = SnapshotBuilder::new(&pair.old)
            .with_algorithm(algorithm)
            .build()
            .unwrap();
        let parallel = SnapshotBuilder::new(&pair.old)
            .with_algorithm(algorithm)
            .parallel(Some(3))
            .build()
            .unwrap();
        assert_eq!(sequential, parallel);
        assert!(sequential.diff(&parallel).is_empty());
    }
}

#[test]
fn test_missing_root_reports_path() {
    let pair = TreePair::new();
    let missing = pair.old.join("nope");
    let err = build_snapshot(&missing).unwrap_err();
    assert!(err.to_string().contains("nope"), "{err}");
}

#[test]
fn test_debug_sink_is_observational() {
    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "a");
    create_dir(&pair.old, "d");

    let sink = Arc::new(MemorySink::new());
    let observed = SnapshotBuilder::new(&pair.old)
        .with_sink(sink.clone())
        .build()
        .unwrap();
    let silent: Snapshot = build_snapshot(&pair.old).unwrap();

    assert_eq!(observed, silent);
    let messages = sink.messages();
    assert!(messages.iter().any(|m| m.contains("handle file") && m.contains("a.txt")));
    assert!(messages.iter().any(|m| m.contains("handle dir")));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts_build() {
    use std::os::unix::fs::PermissionsExt;

    let pair = TreePair::new();
    create_file(&pair.old, "ok.txt", "fine");
    create_file(&pair.old, "secret.txt", "hidden");
    let secret = pair.old.join("secret.txt");
    std::fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read regardless of mode bits
    if std::fs::File::open(&secret).is_ok() {
        return;
    }

    let err = build_snapshot(&pair.old).unwrap_err();
    match err {
        SnapshotError::Open { path, .. } => assert_eq!(path, secret),
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_non_utf8_name_in_subdirectory_aborts_build() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "a");
    create_file(&pair.old, "z/ok.txt", "ok");
    let bad = pair.old.join("z").join(OsStr::from_bytes(b"bad\xff"));
    // Some filesystems refuse names that are not valid UTF-8
    if std::fs::write(&bad, "bad").is_err() {
        return;
    }

    let sink = Arc::new(MemorySink::new());
    let result = SnapshotBuilder::new(&pair.old)
        .with_sink(sink.clone())
        .build();

    match result {
        Err(SnapshotError::NonUtf8Path(path)) => assert_eq!(path, bad),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(snapshot) => panic!("expected failure, got {} files", snapshot.file_count()),
    }

    // Files reached before the failure were already hashed
    let messages = sink.messages();
    let hashed_a = messages
        .iter()
        .position(|m| *m == format!("handle file '{}'", pair.old.join("a.txt").display()))
        .unwrap();
    let entered_z = messages
        .iter()
        .position(|m| *m == format!("handle dir '{}'", pair.old.join("z").display()))
        .unwrap();
    assert!(hashed_a < entered_z, "{messages:?}");
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts_build() {
    use std::os::unix::fs::PermissionsExt;

    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "a");
    create_file(&pair.old, "locked/inner.txt", "inner");
    let locked = pair.old.join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list regardless of mode bits
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = build_snapshot(&pair.old);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(SnapshotError::Walk { path, .. }) => assert_eq!(path, locked),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected the walk to fail"),
    }
}

#[cfg(unix)]
#[test]
fn test_first_failure_in_walk_order_wins() {
    use std::os::unix::fs::PermissionsExt;

    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "a");
    create_file(&pair.old, "z/inner.txt", "inner");
    let first = pair.old.join("a.txt");
    let locked = pair.old.join("z");
    std::fs::set_permissions(&first, std::fs::Permissions::from_mode(0o000)).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    if std::fs::File::open(&first).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = build_snapshot(&pair.old);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(SnapshotError::Open { path, .. }) => assert_eq!(path, first),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected the build to fail"),
    }
}

#[cfg(unix)]
#[test]
fn test_fifo_is_skipped() {
    let pair = TreePair::new();
    create_file(&pair.old, "a.txt", "a");
    let fifo = pair.old.join("pipe");
    let status = std::process::Command::new("mkfifo").arg(&fifo).status();
    if !matches!(status, Ok(s) if s.success()) {
        return;
    }

    let snapshot = build_snapshot(&pair.old).unwrap();
    assert_eq!(snapshot.file_count(), 1);
    assert!(snapshot.digest("pipe").is_none());
    assert!(!snapshot.contains_dir("pipe"));
}
