use crate::harness::{Assertion, Scenario};
use vsh_core::VshError;

#[test]
fn test_roundtrip_without_commands() {
    Scenario::new("roundtrip_without_commands")
        .with_dir("docs")
        .with_dir("docs/empty")
        .with_dir("media")
        .with_file("docs/guide.md", b"# Guide\n")
        .with_file("media/logo.bin", &[0, 159, 146, 150, 255])
        .with_file("top.txt", b"top level")
        .closes()
        .assert_archive_unchanged()
        .run()
        .unwrap();
}

#[test]
fn test_roundtrip_after_exit() {
    Scenario::new("roundtrip_after_exit")
        .with_dir("a")
        .with_dir("a/b")
        .with_dir("a/b/c")
        .types("cd a")
        .types("ls")
        .types("exit")
        .closes()
        .assert_archive_unchanged()
        .run()
        .unwrap();
}

#[test]
fn test_new_empty_file_persisted() {
    Scenario::new("new_empty_file_persisted")
        .with_dir("keep")
        .types("touch fresh.txt")
        .types("exit")
        .closes()
        .assert(Assertion::ArchiveHasFile("fresh.txt".to_string()))
        .assert(Assertion::ArchiveHasDir("keep".to_string()))
        .run()
        .unwrap();
}

#[test]
fn test_corrupt_archive_fails_start() {
    let err = Scenario::new("corrupt_archive")
        .with_file("a.txt", b"a")
        .run_expecting_start_failure(b"this is not a gzip stream")
        .unwrap();

    assert!(matches!(err, VshError::ArchiveOpen { .. }));
    assert!(err.recovery_suggestion().is_some());
}
