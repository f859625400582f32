//! Certificate expiry evaluation
//!
//! Decides whether a PEM-encoded X.509 certificate expires within a
//! configured horizon. Pure read-only check, no side effects.

use crate::error::{RenewerError, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::Path;
use x509_parser::prelude::*;

/// Outcome of an expiry evaluation
#[derive(Debug, Clone, Copy)]
pub struct ExpiryStatus {
    /// Whether the certificate will have expired by `now + horizon`
    pub expires_soon: bool,
    /// The certificate's notAfter timestamp
    pub not_after: DateTime<Utc>,
    /// Whole days until notAfter (negative if already expired)
    pub days_remaining: i64,
}

/// Evaluate whether the certificate at `cert_path` expires within `horizon`.
///
/// The deadline is `now + horizon`; the certificate "expires soon" iff that
/// deadline is strictly after its notAfter timestamp.
pub fn evaluate(cert_path: &Path, horizon: Duration) -> Result<ExpiryStatus> {
    let not_after = read_not_after(cert_path)?;
    let now = Utc::now();
    let deadline = now + horizon;

    Ok(ExpiryStatus {
        expires_soon: deadline > not_after,
        not_after,
        days_remaining: (not_after - now).num_days(),
    })
}

/// Convenience wrapper returning only the expires-soon decision
pub fn expires_soon(cert_path: &Path, horizon: Duration) -> Result<bool> {
    evaluate(cert_path, horizon).map(|s| s.expires_soon)
}

/// Read the notAfter timestamp from the first CERTIFICATE block in a PEM file
fn read_not_after(cert_path: &Path) -> Result<DateTime<Utc>> {
    let data = std::fs::read(cert_path).map_err(|e| RenewerError::Read {
        path: cert_path.display().to_string(),
        source: e,
    })?;

    let pems = ::pem::parse_many(&data).map_err(|e| RenewerError::Decode {
        path: cert_path.display().to_string(),
        message: e.to_string(),
    })?;

    let block = pems
        .into_iter()
        .find(|p| p.tag() == "CERTIFICATE")
        .ok_or_else(|| RenewerError::Decode {
            path: cert_path.display().to_string(),
            message: "file contains no CERTIFICATE block".to_string(),
        })?;

    let (_, cert) =
        X509Certificate::from_der(block.contents()).map_err(|e| RenewerError::Parse {
            path: cert_path.display().to_string(),
            message: format!("{:?}", e),
        })?;

    let ts = cert.validity().not_after.timestamp();
    Utc.timestamp_opt(ts, 0)
        .single()
        .ok_or_else(|| RenewerError::Parse {
            path: cert_path.display().to_string(),
            message: format!("notAfter timestamp {} is out of range", ts),
        })
}
