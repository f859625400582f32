//! Renewal orchestration
//!
//! The state machine tying expiry evaluation, the authority capability, and
//! the final filesystem commit together:
//!
//! ```text
//! START -> EVALUATING -> { SKIPPED | STAGING -> RENEWING -> VALIDATING
//!                                    -> VERIFYING -> COMMITTING -> DONE }
//!                                    (any failure) -> FAILED
//! ```
//!
//! A failed run leaves the live certificate/key pair completely untouched;
//! staged files live in the temp directory and are removed on every abort
//! path. Only a validated and verified pair is ever promoted.

use crate::authority::Authority;
use crate::error::{RenewerError, Result};
use crate::expiry;
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Immutable inputs for one renewal run
#[derive(Debug, Clone)]
pub struct RenewalRequest {
    /// Path of the live certificate (PEM)
    pub cert_path: PathBuf,
    /// Path of the live private key
    pub key_path: PathBuf,
    /// Path of the trust-root configuration (TRC)
    pub trc_path: PathBuf,
    /// Renew if the certificate expires within this horizon
    pub renew_before: Duration,
}

/// Terminal outcome of a successful run
#[derive(Debug)]
pub enum RenewalOutcome {
    /// Certificate does not expire within the horizon; nothing was written
    Skipped { not_after: DateTime<Utc> },
    /// The live pair was replaced with a freshly validated one
    Renewed,
}

/// Temporary cert/key pair pending validation and commit.
///
/// Exclusively owned by the orchestrator for one run. Dropping it removes
/// both files; `promote` renames them over the live pair instead.
struct StagedCredential {
    cert: NamedTempFile,
    key: NamedTempFile,
}

impl StagedCredential {
    /// Allocate both staging files in the platform temp directory
    fn stage() -> Result<Self> {
        let cert = NamedTempFile::with_suffix(".crt").map_err(stage_error)?;
        let key = NamedTempFile::with_suffix(".key").map_err(stage_error)?;
        Ok(Self { cert, key })
    }

    fn cert_path(&self) -> &Path {
        self.cert.path()
    }

    fn key_path(&self) -> &Path {
        self.key.path()
    }

    /// Rename the staged files over the live pair, cert first then key.
    ///
    /// Each rename is atomic on its own, but the two are sequential: an
    /// interruption between them leaves a new cert paired with the old key.
    fn promote(self, cert_dest: &Path, key_dest: &Path) -> Result<()> {
        self.cert.persist(cert_dest).map_err(|e| {
            RenewerError::Filesystem {
                message: format!(
                    "failed to move staged certificate into {}: {}",
                    cert_dest.display(),
                    e.error
                ),
            }
        })?;
        self.key
            .persist(key_dest)
            .map_err(|e| RenewerError::Filesystem {
                message: format!(
                    "failed to move staged key into {}: {}",
                    key_dest.display(),
                    e.error
                ),
            })?;
        Ok(())
    }
}

fn stage_error(err: std::io::Error) -> RenewerError {
    RenewerError::Filesystem {
        message: format!("failed to create staging file: {}", err),
    }
}

/// Drives one renewal run against a given authority capability
pub struct Renewer<A: Authority> {
    request: RenewalRequest,
    authority: A,
}

impl<A: Authority> Renewer<A> {
    pub fn new(request: RenewalRequest, authority: A) -> Self {
        Self { request, authority }
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Run the state machine once
    pub async fn run(&self) -> Result<RenewalOutcome> {
        let req = &self.request;

        tracing::info!(
            "Checking cert {} to expire within {} days",
            req.cert_path.display(),
            req.renew_before.num_days()
        );
        let status = expiry::evaluate(&req.cert_path, req.renew_before)?;
        if !status.expires_soon {
            tracing::info!(
                "Cert is valid until {} ({} days), skipping renewal",
                status.not_after.format("%Y-%m-%d %H:%M:%S UTC"),
                status.days_remaining
            );
            return Ok(RenewalOutcome::Skipped {
                not_after: status.not_after,
            });
        }

        tracing::info!(
            "Cert expires {} ({} days), staging renewal",
            status.not_after.format("%Y-%m-%d %H:%M:%S UTC"),
            status.days_remaining
        );
        let staged = StagedCredential::stage()?;

        tracing::info!(
            "Renewing into cert {} and key {}",
            staged.cert_path().display(),
            staged.key_path().display()
        );
        self.authority
            .renew(
                &req.cert_path,
                &req.key_path,
                &req.trc_path,
                staged.cert_path(),
                staged.key_path(),
            )
            .await?;

        tracing::info!("Validating new cert");
        self.authority.validate(staged.cert_path()).await?;

        tracing::info!("Verifying new cert against TRC {}", req.trc_path.display());
        self.authority
            .verify(staged.cert_path(), &req.trc_path)
            .await?;

        tracing::info!("Committing staged cert and key over the live pair");
        staged.promote(&req.cert_path, &req.key_path)?;

        tracing::info!("Renewal done");
        Ok(RenewalOutcome::Renewed)
    }
}
