//! CLI for running a job sync or a single board fetch outside the server.
//!
//! Output is JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobsync_core::domains::boards::{http, BoardRegistry};
use jobsync_core::domains::jobs::get_jobs;
use jobsync_core::domains::sync::run_sync;
use jobsync_core::kernel::ServerDeps;
use jobsync_core::Config;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sync_jobs")]
#[command(about = "Sync job board postings into Notion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync batch over the job sources file
    Sync {
        /// Job sources file (defaults to JOB_SOURCES_PATH)
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Maximum sink operations in flight per source
        #[arg(long)]
        concurrency: Option<usize>,

        /// Stop starting new work after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Fetch current postings for one company and print them
    Fetch { board: String, company: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobsync_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            sources,
            concurrency,
            timeout,
        } => {
            let mut config = Config::from_env().context("Failed to load configuration")?;
            if let Some(path) = sources {
                config.sources_path = path;
            }
            if let Some(n) = concurrency {
                anyhow::ensure!(n > 0, "--concurrency must be at least 1");
                config.sync_concurrency = n;
            }
            if let Some(secs) = timeout {
                config.sync_timeout = Some(Duration::from_secs(secs));
            }

            let deps = ServerDeps::from_config(&config)?;
            let cancel = CancellationToken::new();
            let ctrl_c = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::info!("Interrupted, finishing in-flight work");
                        cancel.cancel();
                    }
                })
            };

            let report = run_sync(&deps, &cancel).await?;
            ctrl_c.abort();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Fetch { board, company } => {
            // Read-only; needs no Notion credentials
            let boards = BoardRegistry::with_defaults(http::build_client()?);
            let jobs = get_jobs(&boards, &board, &company).await?;
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
    }

    Ok(())
}
