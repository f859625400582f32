//! Authority implementation shelling out to the scion-pki tool
//!
//! Each operation runs the tool to completion with captured stdout/stderr.
//! Calls are bounded by a timeout; a hung tool is killed and the run fails
//! instead of blocking forever.

use super::Authority;
use crate::error::{RenewerError, Result};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Invokes `scion-pki certificate <renew|validate|verify>` as subprocesses
pub struct ScionPkiAuthority {
    bin: PathBuf,
    timeout: Duration,
}

impl ScionPkiAuthority {
    pub fn new(bin: PathBuf, timeout: Duration) -> Self {
        Self { bin, timeout }
    }

    /// Run one authority subcommand to completion.
    ///
    /// Nonzero exit becomes an error carrying the captured stderr; stdout is
    /// only ever logged at debug level, never parsed.
    async fn run(&self, operation: &'static str, args: &[&OsStr]) -> Result<()> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            "Executing: {} {}",
            self.bin.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| RenewerError::AuthorityTimeout {
                operation,
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| RenewerError::Authority {
                operation,
                stderr: format!("failed to launch {}: {}", self.bin.display(), e),
            })?;

        if !output.status.success() {
            return Err(RenewerError::Authority {
                operation,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("{} output: {}", operation, stdout.trim());
        }
        Ok(())
    }
}

#[async_trait]
impl Authority for ScionPkiAuthority {
    async fn renew(
        &self,
        current_cert: &Path,
        current_key: &Path,
        trc: &Path,
        out_cert: &Path,
        out_key: &Path,
    ) -> Result<()> {
        self.run(
            "renew",
            &[
                OsStr::new("certificate"),
                OsStr::new("renew"),
                current_cert.as_os_str(),
                current_key.as_os_str(),
                OsStr::new("--out"),
                out_cert.as_os_str(),
                OsStr::new("--out-key"),
                out_key.as_os_str(),
                OsStr::new("--trc"),
                trc.as_os_str(),
            ],
        )
        .await
    }

    async fn validate(&self, cert: &Path) -> Result<()> {
        self.run(
            "validate",
            &[
                OsStr::new("certificate"),
                OsStr::new("validate"),
                OsStr::new("--type"),
                OsStr::new("chain"),
                cert.as_os_str(),
            ],
        )
        .await
    }

    async fn verify(&self, cert: &Path, trc: &Path) -> Result<()> {
        self.run(
            "verify",
            &[
                OsStr::new("certificate"),
                OsStr::new("verify"),
                OsStr::new("--trc"),
                trc.as_os_str(),
                cert.as_os_str(),
            ],
        )
        .await
    }
}
