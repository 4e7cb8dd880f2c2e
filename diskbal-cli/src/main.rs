//! diskbal CLI
//!
//! Command-line tool for planning disk rebalancing on storage nodes.
//!
//! # Commands
//! - `plan` - Compute and record a rebalancing plan for a node
//!
//! # Configuration
//! Environment: DISKBAL_OUTPUT_DIR, DISKBAL_DEFAULT_THRESHOLD,
//! DISKBAL_RPC_TIMEOUT

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use diskbal_cli::artifacts::ArtifactWriter;
use diskbal_cli::commands::plan::{self, PlanOptions};
use diskbal_cli::config::DiskBalConfig;
use diskbal_cli::connector::JsonFileConnector;
use diskbal_cli::node_client::HttpVolumePathFetcher;
use diskbal_core::planner::GreedyPlanner;

#[derive(Parser)]
#[command(name = "diskbal")]
#[command(about = "Disk balancer planning tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and record a rebalancing plan for a node
    Plan {
        /// Target node: IP, hostname, or node UUID
        node: String,

        /// Path to the cluster topology snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Output directory for plan artifacts (overrides environment)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Percentage skew to tolerate before balancing is considered
        #[arg(long)]
        threshold: Option<String>,

        /// Maximum bandwidth to use while copying; 0 keeps planner default
        #[arg(long, default_value = "0")]
        bandwidth: u64,

        /// Max errors to tolerate between two disks; 0 keeps planner default
        #[arg(long, default_value = "0")]
        maxerror: u64,

        /// Print the plan summary table
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = DiskBalConfig::from_env();

    match cli.command {
        Commands::Plan {
            node,
            snapshot,
            out,
            threshold,
            bandwidth,
            maxerror,
            verbose,
        } => {
            let output_dir = out.unwrap_or_else(|| config.output_dir.clone());

            info!(
                node = %node,
                snapshot = %snapshot.display(),
                output_dir = %output_dir.display(),
                "Starting plan command"
            );

            let connector = JsonFileConnector::new(snapshot);
            let fetcher = HttpVolumePathFetcher::new(config.rpc_timeout())?;
            let planner = GreedyPlanner::new();
            let writer = ArtifactWriter::new(output_dir);

            let opts = PlanOptions {
                node,
                threshold,
                bandwidth,
                max_error: maxerror,
                verbose,
            };

            let outcome = plan::run(&connector, &fetcher, &planner, &writer, &opts).await?;

            println!(
                "Cluster snapshot written to {}",
                style(outcome.before_path.display()).cyan()
            );
            match &outcome.plan_path {
                Some(path) => println!(
                    "Plan with {} step(s) written to {}",
                    style(outcome.steps).cyan(),
                    style(path.display()).cyan()
                ),
                None => println!(
                    "{}",
                    style(format!(
                        "No plan needed at threshold {}%",
                        outcome.threshold
                    ))
                    .green()
                ),
            }
            if let Some(report) = &outcome.report {
                print!("{}", report);
            }
        }
    }

    Ok(())
}
