//! Certificate authority capability
//!
//! The renewal orchestrator depends on three opaque operations (renew,
//! validate, verify) provided by an external authority tool. The boundary is
//! a trait so any equivalent capability (in-process library, RPC, different
//! CLI) can be substituted without touching the state machine.

mod scion_pki;

pub use scion_pki::ScionPkiAuthority;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// The external renew/validate/verify capability
#[async_trait]
pub trait Authority: Send + Sync {
    /// Request a fresh certificate/key pair signed under the given trust
    /// root, written to the caller-supplied output paths.
    async fn renew(
        &self,
        current_cert: &Path,
        current_key: &Path,
        trc: &Path,
        out_cert: &Path,
        out_key: &Path,
    ) -> Result<()>;

    /// Structural check of the certificate against the current chain type
    async fn validate(&self, cert: &Path) -> Result<()>;

    /// Chain verification against the trust root
    async fn verify(&self, cert: &Path, trc: &Path) -> Result<()>;
}
