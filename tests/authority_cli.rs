//! Integration tests for the scion-pki authority wrapper
//!
//! A fake shell script stands in for the real tool so exit codes, stderr
//! capture, argument conventions, and the call timeout can be exercised
//! without a PKI installation.

#![cfg(unix)]

use cert_renewer::error::RenewerError;
use cert_renewer::{Authority, ScionPkiAuthority};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-scion-pki");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn authority(bin: PathBuf) -> ScionPkiAuthority {
    ScionPkiAuthority::new(bin, Duration::from_secs(5))
}

#[tokio::test]
async fn test_zero_exit_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_tool(dir.path(), "echo 'certificate valid'; exit 0");

    authority(bin)
        .validate(Path::new("some.crt"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_nonzero_exit_captures_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_tool(dir.path(), "echo 'unknown issuer' >&2; exit 1");

    let err = authority(bin)
        .validate(Path::new("some.crt"))
        .await
        .unwrap_err();

    match err {
        RenewerError::Authority { operation, stderr } => {
            assert_eq!(operation, "validate");
            assert_eq!(stderr, "unknown issuer");
        }
        other => panic!("expected authority error, got: {}", other),
    }
}

#[tokio::test]
async fn test_renew_argument_convention() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("args.txt");
    let bin = fake_tool(
        dir.path(),
        &format!("printf '%s\\n' \"$@\" > '{}'", record.display()),
    );

    authority(bin)
        .renew(
            Path::new("live.crt"),
            Path::new("live.key"),
            Path::new("trc.json"),
            Path::new("staged.crt"),
            Path::new("staged.key"),
        )
        .await
        .unwrap();

    let args: Vec<String> = std::fs::read_to_string(&record)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(
        args,
        vec![
            "certificate",
            "renew",
            "live.crt",
            "live.key",
            "--out",
            "staged.crt",
            "--out-key",
            "staged.key",
            "--trc",
            "trc.json",
        ]
    );
}

#[tokio::test]
async fn test_verify_argument_convention() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("args.txt");
    let bin = fake_tool(
        dir.path(),
        &format!("printf '%s\\n' \"$@\" > '{}'", record.display()),
    );

    authority(bin)
        .verify(Path::new("staged.crt"), Path::new("trc.json"))
        .await
        .unwrap();

    let args: Vec<String> = std::fs::read_to_string(&record)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(
        args,
        vec!["certificate", "verify", "--trc", "trc.json", "staged.crt"]
    );
}

#[tokio::test]
async fn test_hung_tool_is_killed_after_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_tool(dir.path(), "sleep 60");

    let authority = ScionPkiAuthority::new(bin, Duration::from_millis(200));
    let started = std::time::Instant::now();
    let err = authority.validate(Path::new("some.crt")).await.unwrap_err();

    assert!(matches!(err, RenewerError::AuthorityTimeout { operation: "validate", .. }));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_missing_binary_is_authority_error() {
    let authority = authority(PathBuf::from("/nonexistent/scion-pki"));
    let err = authority.validate(Path::new("some.crt")).await.unwrap_err();

    match err {
        RenewerError::Authority { operation, stderr } => {
            assert_eq!(operation, "validate");
            assert!(stderr.contains("failed to launch"));
        }
        other => panic!("expected authority error, got: {}", other),
    }
}
