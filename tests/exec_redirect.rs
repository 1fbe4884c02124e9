// tests/exec_redirect.rs

mod common;
use crate::common::builders::{missing_program, sh};
use crate::common::{init_tracing, with_timeout};

use std::fs;

use procsync::errors::ExecError;
use procsync::exec::{
    execute_redirected, try_execute_redirected, CommandSpec, ExecOutcome, FailureKind,
    RedirectTarget,
};
use procsync::types::FileMode;

#[tokio::test]
async fn stdout_lands_in_target_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let target = RedirectTarget::new(&path);
    let outcome = with_timeout(execute_redirected(&target, &sh("printf hello"))).await;

    assert_eq!(outcome, ExecOutcome::Success);
    assert_eq!(fs::read(&path).unwrap(), b"hello");
}

#[tokio::test]
async fn existing_content_is_truncated() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "this is a much longer previous content\n").unwrap();

    let target = RedirectTarget::new(&path);
    let spec = CommandSpec::new("/bin/sh").args(["-c", "printf new"]);
    assert!(with_timeout(execute_redirected(&target, &spec)).await.is_success());

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
}

#[tokio::test]
async fn failing_command_still_writes_and_reports_failure() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let target = RedirectTarget::new(&path);
    let outcome = with_timeout(execute_redirected(&target, &sh("echo partial; exit 3"))).await;

    assert_eq!(outcome, ExecOutcome::Failed(FailureKind::NonZeroExit(3)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "partial\n");
}

#[tokio::test]
async fn unopenable_target_spawns_nothing() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = RedirectTarget::new(dir.path().join("missing-dir").join("out.txt"));
    let marker = dir.path().join("ran");

    let spec = sh(&format!("touch '{}'", marker.display()));
    match try_execute_redirected(&target, &spec).await {
        Err(ExecError::RedirectOpen { path, .. }) => assert_eq!(path, target.path()),
        other => panic!("expected RedirectOpen, got {other:?}"),
    }
    assert!(!marker.exists(), "child must not run without its redirect");

    assert_eq!(
        execute_redirected(&target, &spec).await,
        ExecOutcome::Failed(FailureKind::RedirectOpen)
    );
}

#[tokio::test]
async fn missing_program_with_redirect_fails() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = RedirectTarget::new(dir.path().join("out.txt"));

    let outcome = with_timeout(execute_redirected(&target, &missing_program(dir.path()))).await;
    assert_eq!(outcome, ExecOutcome::Failed(FailureKind::NotExecutable));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn target_descriptor_is_closed_after_return() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("closed.txt");

    let target = RedirectTarget::new(&path);
    assert!(execute_redirected(&target, &sh("printf x")).await.is_success());

    let canonical = fs::canonicalize(&path).unwrap();
    let still_open = fs::read_dir("/proc/self/fd")
        .unwrap()
        .filter_map(|entry| fs::read_link(entry.ok()?.path()).ok())
        .any(|link| link == canonical);
    assert!(!still_open, "redirect target is still open in this process");
}

#[cfg(unix)]
#[tokio::test]
async fn new_file_gets_requested_mode() {
    use std::os::unix::fs::PermissionsExt;

    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("private.txt");

    let target = RedirectTarget::new(&path).with_mode("600".parse::<FileMode>().unwrap());
    assert!(execute_redirected(&target, &sh("printf s")).await.is_success());

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
