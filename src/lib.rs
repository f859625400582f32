//! cert-renewer library
//!
//! Automates X.509 certificate renewal:
//! - Evaluates whether the live certificate expires within a configured horizon
//! - Drives an external authority tool through renew, validate, and verify
//! - Atomically replaces the live certificate/key pair on success
//!
//! A failed run never leaves the live pair missing, partial, or invalid.

pub mod authority;
pub mod cli;
pub mod error;
pub mod expiry;
pub mod renewer;

// Re-export commonly used types
pub use authority::{Authority, ScionPkiAuthority};
pub use cli::Cli;
pub use error::{RenewerError, Result};
pub use renewer::{RenewalOutcome, RenewalRequest, Renewer};
