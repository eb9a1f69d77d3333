//! Archive round trips through the real tar and the real working directory
//!
//! gzip stands in for qzip as the tar filter so these run on any host.

#![cfg(unix)]

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use qzipctl_core::application::ArchiveRunner;
use qzipctl_core::domain::{ArchiveJob, ArgumentVector};
use qzipctl_core::port::time_provider::SystemTimeProvider;
use qzipctl_core::port::CommandRunner;
use qzipctl_core::{QzipConfig, QzipError};
use qzipctl_infra_system::{ProcessWorkingDirectory, SubprocessExecutor};

fn executor() -> Arc<SubprocessExecutor> {
    Arc::new(SubprocessExecutor::new(Arc::new(SystemTimeProvider)))
}

fn archive_runner() -> ArchiveRunner {
    let config = QzipConfig {
        qzip_program: "gzip".to_string(),
        ..QzipConfig::default()
    };
    ArchiveRunner::new(executor(), Arc::new(ProcessWorkingDirectory), &config)
}

fn list_members(archive: &Path) -> Vec<String> {
    let args = ArgumentVector::from(vec![
        "-tzf".to_string(),
        archive.display().to_string(),
    ]);
    executor()
        .run("tar", &args)
        .expect("list archive")
        .combined
        .lines()
        .map(str::to_string)
        .collect()
}

/// /a/b/{x.txt,sub/y.txt} archived into /a/b/c/out.tgz
fn sibling_fixture(root: &Path) -> (PathBuf, PathBuf) {
    let data = root.join("a/b");
    common::write_file(&data.join("x.txt"), "x");
    common::write_file(&data.join("sub/y.txt"), "y");
    std::fs::create_dir_all(data.join("c")).unwrap();
    (data.clone(), data.join("c/out.tgz"))
}

#[test]
fn test_archive_contains_only_relative_paths() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let (data, archive) = sibling_fixture(tmp.path());
    let before = std::env::current_dir().unwrap();

    let job = ArchiveJob::compress([data.join("x.txt"), data.join("sub")], &archive);
    archive_runner().run(&job).expect("archive");

    assert_eq!(std::env::current_dir().unwrap(), before);
    let members = list_members(&archive);
    assert!(members.iter().all(|m| !m.starts_with('/')), "{:?}", members);
    assert!(members.contains(&"x.txt".to_string()));
    assert!(members.iter().any(|m| m == "sub/y.txt"));
}

#[test]
fn test_extract_with_destination_and_strip() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let (data, _) = sibling_fixture(tmp.path());
    let archive = tmp.path().join("tree.tar.gz");
    let runner = archive_runner();

    // Parent is a/, so members are b/x.txt, b/sub/y.txt, ...
    runner
        .run(&ArchiveJob::compress([&data], &archive))
        .expect("archive");

    let restore = tmp.path().join("restore");
    std::fs::create_dir_all(&restore).unwrap();
    runner
        .run(&ArchiveJob::extract(&archive, Some(restore.clone()), 1))
        .expect("extract");

    assert_eq!(std::fs::read_to_string(restore.join("x.txt")).unwrap(), "x");
    assert_eq!(std::fs::read_to_string(restore.join("sub/y.txt")).unwrap(), "y");
}

#[test]
fn test_relative_paths_use_caller_directory() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    sibling_fixture(tmp.path());
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();

    let result = archive_runner().run(&ArchiveJob::compress(["a/b/x.txt"], "out.tgz"));
    let after = std::env::current_dir().unwrap();
    std::env::set_current_dir(&original).unwrap();

    result.expect("archive");
    assert_eq!(after, tmp.path().canonicalize().unwrap());
    assert_eq!(list_members(&tmp.path().join("out.tgz")), vec!["x.txt"]);
}

#[test]
fn test_tool_failure_restores_directory() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let corrupt = tmp.path().join("corrupt.tgz");
    common::write_file(&corrupt, "this is not gzip data");
    let before = std::env::current_dir().unwrap();

    let result = archive_runner().run(&ArchiveJob::extract(&corrupt, None, 0));

    assert!(matches!(result, Err(QzipError::Execution(_))));
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_concurrent_archives_are_serialized() {
    let _serial = common::serial();
    let before = std::env::current_dir().unwrap();
    let runner = Arc::new(archive_runner());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let runner = runner.clone();
            std::thread::spawn(move || {
                let tmp = tempfile::tempdir().unwrap();
                let file = tmp.path().join(format!("data/file-{}.txt", i));
                common::write_file(&file, "payload");
                let archive = tmp.path().join(format!("out-{}.tgz", i));

                runner
                    .run(&ArchiveJob::compress([&file], &archive))
                    .expect("archive");
                (tmp, archive, format!("file-{}.txt", i))
            })
        })
        .collect();

    for handle in handles {
        let (_tmp, archive, member) = handle.join().unwrap();
        assert_eq!(list_members(&archive), vec![member]);
    }
    assert_eq!(std::env::current_dir().unwrap(), before);
}
