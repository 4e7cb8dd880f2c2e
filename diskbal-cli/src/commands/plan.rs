//! Plan command
//!
//! Computes and records a rebalancing plan for one node. The flow is
//! strictly sequential and fail-fast: load the cluster snapshot, resolve
//! the threshold, locate the target node, annotate volume paths over RPC,
//! invoke the planner, apply operator limits, then write the "before"
//! snapshot unconditionally and the plan artifact only when it contains
//! at least one step.

use std::path::PathBuf;
use tracing::{debug, info};

use diskbal_core::constraints::apply_plan_params;
use diskbal_core::error::{DiskBalError, Result};
use diskbal_core::planner::Planner;
use diskbal_core::report::render_plan_report;
use diskbal_core::threshold::resolve_threshold;

use crate::artifacts::ArtifactWriter;
use crate::connector::ClusterConnector;
use crate::node_client::VolumePathFetcher;

/// Operator inputs for a plan run.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Target node: IP, hostname, or node UUID. Mandatory.
    pub node: String,
    /// Imbalance tolerance percentage; out-of-range or unparseable values
    /// silently fall back to the cluster default.
    pub threshold: Option<String>,
    /// Per-step bandwidth cap; 0 keeps the planner default.
    pub bandwidth: u64,
    /// Per-step tolerated disk errors; 0 keeps the planner default.
    pub max_error: u64,
    pub verbose: bool,
}

/// What a successful plan run produced.
#[derive(Debug)]
pub struct PlanOutcome {
    pub before_path: PathBuf,
    /// Set only when a plan artifact was written.
    pub plan_path: Option<PathBuf>,
    pub steps: usize,
    pub threshold: f64,
    /// Rendered report, when verbose and there is a plan to show.
    pub report: Option<String>,
}

/// Run the plan command end to end.
pub async fn run(
    connector: &dyn ClusterConnector,
    fetcher: &dyn VolumePathFetcher,
    planner: &dyn Planner,
    writer: &ArtifactWriter,
    opts: &PlanOptions,
) -> Result<PlanOutcome> {
    debug!("Processing plan command");

    if opts.node.trim().is_empty() {
        return Err(DiskBalError::InvalidArgument(
            "A node name is required to create a plan".to_string(),
        ));
    }

    let mut cluster = connector.load_cluster().await?;

    let threshold = resolve_threshold(opts.threshold.as_deref(), cluster.default_threshold);
    debug!(threshold, "Threshold percentage resolved");

    // Annotate volume paths in place so both artifacts carry them.
    let node = cluster
        .find_node_mut(&opts.node)
        .ok_or_else(|| DiskBalError::NodeNotFound(opts.node.clone()))?;
    let address = node.address();
    let paths = fetcher.fetch_volume_paths(&address).await?;
    node.apply_volume_paths(&paths);

    let node = cluster
        .find_node(&opts.node)
        .ok_or_else(|| DiskBalError::NodeNotFound(opts.node.clone()))?;

    let mut plans = planner.compute_plan(node, threshold);
    apply_plan_params(&mut plans, opts.bandwidth, opts.max_error);

    // The audit record of cluster state at planning time, written whether
    // or not any balancing is needed.
    let before_path = writer.before_path(&opts.node);
    writer.write(&before_path, &cluster.to_json()?).await?;

    let plan = plans.first();
    let steps = plan.map(|p| p.steps.len()).unwrap_or(0);

    let plan_path = match plan {
        Some(plan) if !plan.steps.is_empty() => {
            let path = writer.plan_path(&opts.node);
            info!(path = %path.display(), "Writing plan");
            writer.write(&path, &plan.to_json()?).await?;
            Some(path)
        }
        _ => {
            info!(
                node = %opts.node,
                threshold,
                "No plan generated, disk balancing not needed"
            );
            None
        }
    };

    let report = if opts.verbose && steps > 0 {
        Some(render_plan_report(&plans))
    } else {
        None
    };

    Ok(PlanOutcome {
        before_path,
        plan_path,
        steps,
        threshold,
        report,
    })
}
