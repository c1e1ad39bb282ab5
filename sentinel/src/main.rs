#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::Path;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use sentinel_config::Config;
use sentinel_server::tasks::AnalysisRequest;
use sentinel_server::{Invoker, Server, Task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    // Initialize telemetry
    let telemetry_guard = sentinel_telemetry::init(config.telemetry.as_ref(), &args.log_filter)?;
    tracing::debug!(exporting_traces = telemetry_guard.exporting(), "telemetry initialized");

    match args.command {
        None | Some(Command::Serve) => serve(&config, &args.config).await,
        Some(Command::Analyze { file }) => analyze(&config, &file).await,
    }
}

async fn serve(config: &Config, config_path: &Path) -> anyhow::Result<()> {
    tracing::info!(config_path = %config_path.display(), "starting sentinel");

    let server = Server::new(config)?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("sentinel stopped");
    Ok(())
}

/// Run the analysis task once and print the envelope to stdout
async fn analyze(config: &Config, file: &Path) -> anyhow::Result<()> {
    let contract_code = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read contract file {}", file.display()))?;

    let invoker = Invoker::from_config(config)?;
    let envelope = invoker.invoke(&AnalysisRequest { contract_code }.prompt()).await;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope.is_error() {
        anyhow::bail!("analysis of {} failed", file.display());
    }

    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
