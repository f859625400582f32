//! cert-renewer - Checks the given certificate to expire within the
//! configured deadline, and renews it via scion-pki
//!
//! Invoked once per execution (e.g. by a cron job); the expected
//! steady-state outcome on most runs is "not yet due, nothing to do".

use cert_renewer::authority::ScionPkiAuthority;
use cert_renewer::cli::Cli;
use cert_renewer::error::{RenewerError, Result};
use cert_renewer::renewer::{RenewalOutcome, RenewalRequest, Renewer};
use chrono::Duration;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the CLI level when set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_directive())),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    tracing::info!("Starting cert-renewer");

    if cli.renew_before_days < 0 {
        return Err(RenewerError::Config(format!(
            "renewal horizon must not be negative, got {} days",
            cli.renew_before_days
        )));
    }
    if cli.authority_timeout == 0 {
        return Err(RenewerError::Config(
            "authority timeout must be at least one second".to_string(),
        ));
    }

    let request = RenewalRequest {
        cert_path: cli.cert,
        key_path: cli.key,
        trc_path: cli.trc,
        renew_before: Duration::days(cli.renew_before_days),
    };
    let authority = ScionPkiAuthority::new(
        cli.authority_bin,
        std::time::Duration::from_secs(cli.authority_timeout),
    );

    if let RenewalOutcome::Skipped { not_after } = Renewer::new(request, authority).run().await? {
        tracing::debug!("Next expiry: {}", not_after.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}
