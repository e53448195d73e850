//! # agritrace CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! `serve` runs the shipment tracking API over an in-memory ledger;
//! `openapi` dumps the generated spec to stdout.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use agritrace_api::openapi::ApiDoc;
use agritrace_api::state::AppState;
use agritrace_engine::{ExecutorConfig, TransitionExecutor};
use agritrace_ledger::MemoryLedger;

/// Agritrace Stack CLI
///
/// Supply-chain shipment lifecycle tracking: farm, certification,
/// processing, distribution, retail, with regulator recalls.
#[derive(Parser, Debug)]
#[command(name = "agritrace", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the shipment tracking API server.
    Serve(ServeArgs),

    /// Print the OpenAPI spec to stdout.
    Openapi,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Upper bound, in seconds, on any single ledger gateway call.
    #[arg(long, default_value_t = 5)]
    gateway_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Openapi => {
            let spec = serde_json::to_string_pretty(&ApiDoc::openapi())?;
            println!("{spec}");
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let executor = TransitionExecutor::new(
        Arc::new(MemoryLedger::new()),
        ExecutorConfig {
            gateway_timeout: Duration::from_secs(args.gateway_timeout_secs),
        },
    );
    let app = agritrace_api::app(AppState::with_executor(Arc::new(executor)));

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    tracing::info!(addr = %args.addr, "agritrace API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Resolve on Ctrl-C so in-flight requests drain before exit.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_defaults() {
        let cli = Cli::try_parse_from(["agritrace", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.addr.port(), 8080);
                assert_eq!(args.gateway_timeout_secs, 5);
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn parses_custom_addr() {
        let cli =
            Cli::try_parse_from(["agritrace", "serve", "--addr", "127.0.0.1:9090"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.addr.port(), 9090),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn parses_openapi_dump() {
        let cli = Cli::try_parse_from(["agritrace", "openapi"]).unwrap();
        assert!(matches!(cli.command, Commands::Openapi));
    }
}
