//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cert-renewer")]
#[command(version)]
#[command(
    about = "Checks the given certificate to expire within the configured deadline, and renews it via scion-pki",
    long_about = None
)]
pub struct Cli {
    /// The current TRC of the ISD
    #[arg(short = 't', long, value_name = "FILE")]
    pub trc: PathBuf,

    /// Input certificate
    #[arg(short = 'c', long, value_name = "FILE")]
    pub cert: PathBuf,

    /// Input key
    #[arg(short = 'k', long, value_name = "FILE")]
    pub key: PathBuf,

    /// Renew the certificate if it expires within this many days
    #[arg(short = 'd', long = "days", value_name = "DAYS")]
    pub renew_before_days: i64,

    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Authority tool used for renew/validate/verify
    #[arg(long, default_value = "scion-pki", value_name = "BIN")]
    pub authority_bin: PathBuf,

    /// Seconds to wait before a hung authority invocation is killed
    #[arg(long, default_value = "300", value_name = "SECONDS")]
    pub authority_timeout: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by tracing-subscriber's EnvFilter
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive())
    }
}
