//! # Activity Probe Utility
//!
//! Looks up the balance and recent activity of one Solana address using the
//! same configuration the dashboard backend reads.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package activity-probe --bin activity_probe -- <ADDRESS> [--json] [--skip-health-check]
//! ```
//!
//! Configuration comes from the environment (or `.env`): `SOLANA_NETWORK`,
//! `HELIUS_API_KEY`, `SOLANA_RPC_URL`, `RPC_TIMEOUT_SECS`, `LOG_LEVEL`.
//! Logs go to stderr so `--json` output stays machine-readable.
//!
//! Exit status is 2 for caller mistakes (bad address, bad configuration) and
//! 1 for endpoint failures.

use clap::Parser;
use lib_core::{AppError, Config};
use lib_solana::{AddressActivityService, AddressSummary, SolanaClient};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Balance and recent activity for a Solana address
#[derive(Parser, Debug)]
#[command(name = "activity_probe")]
#[command(about = "Look up the balance and recent transactions of a Solana address")]
struct Args {
    /// Account address (base58)
    address: String,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Skip the endpoint health check before the lookup
    #[arg(long)]
    skip_health_check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(err) = init_tracing() {
        eprintln!("error: {:#}", err);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe_error(&err));
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = SolanaClient::from_config(&config)?;
    info!("Using {} ({})", client.network(), config.network);

    if !args.skip_health_check {
        client
            .health_check()
            .await
            .map_err(|e| AppError::EndpointUnavailable(format!("{:#}", e)))?;
        info!("RPC endpoint is healthy");
    }

    let service = AddressActivityService::new(Arc::new(client));
    let summary = service.fetch_summary(&args.address).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &AddressSummary) {
    println!("Address: {}", summary.address);
    println!("Balance: {} SOL ({} lamports)", summary.balance.sol, summary.balance.lamports);
    println!();

    if summary.activity.is_empty() {
        println!("No recent transactions.");
        return;
    }

    println!("Recent transactions:");
    for record in &summary.activity {
        let confirmation = record
            .confirmation
            .map(|c| c.as_str())
            .unwrap_or("unknown");
        let status = if record.failed { "failed" } else { "ok" };
        println!(
            "  {}  {:<9}  {:<6}  {}",
            record.observed_at, confirmation, status, record.signature
        );
    }
}

/// One-line error report, tagged with the error code when it is an `AppError`.
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => format!("error[{}]: {}", app_err.code(), app_err),
        None => format!("error: {:#}", err),
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AppError>() {
        Some(app_err) if app_err.is_client_error() => 2,
        _ => 1,
    }
}

/// Install a stderr fmt subscriber filtered by `LOG_LEVEL` (default `info`).
fn init_tracing() -> anyhow::Result<()> {
    let log_level = lib_utils::get_env_opt("LOG_LEVEL")
        .unwrap_or_else(|| "info".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))
}
