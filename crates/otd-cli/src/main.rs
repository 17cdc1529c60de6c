mod schedule;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use otd_core::AppConfig;
use otd_history::HistoryClient;
use otd_pipeline::handle_invocation;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "otd")]
#[command(about = "Posts an illustrated \"on this day\" fact")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline once and print the invocation response (default)
    Run,
    /// Fetch and print today's fact without generating or posting anything
    Fact,
    /// Run the pipeline on a cron schedule until interrupted
    Schedule {
        /// Six-field cron expression with seconds, e.g. "0 0 9 * * *"
        #[arg(long)]
        cron: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = otd_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_once(&config).await,
        Commands::Fact => print_fact(&config).await,
        Commands::Schedule { cron } => run_scheduled(&cron, config).await,
    }
}

async fn run_once(config: &AppConfig) -> anyhow::Result<()> {
    let response = handle_invocation(config).await;
    println!("{}", serde_json::to_string(&response)?);

    if !response.is_success() {
        anyhow::bail!("pipeline run failed with status {}", response.status_code);
    }
    Ok(())
}

async fn print_fact(config: &AppConfig) -> anyhow::Result<()> {
    let client = HistoryClient::new(config.http_timeout_secs)?;
    match client.fetch_fact().await {
        Some(fact) => {
            println!("{fact}");
            Ok(())
        }
        None => anyhow::bail!("no historical fact available for today"),
    }
}

async fn run_scheduled(cron: &str, config: AppConfig) -> anyhow::Result<()> {
    let mut scheduler = schedule::build_scheduler(cron, Arc::new(config)).await?;
    tracing::info!(cron, "scheduler started");

    shutdown_signal().await?;
    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("received shutdown signal, stopping scheduler");
    Ok(())
}
