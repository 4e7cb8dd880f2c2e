//! Balancing planner seam
//!
//! The orchestration layer is generic over `Planner` so tests can inject a
//! deterministic stub. `GreedyPlanner` is the default production binding:
//! per volume set it moves excess data from volumes above the ideal
//! utilization to volumes below it until every volume is within the
//! tolerated skew.

use tracing::{debug, info};

use crate::datamodel::{Node, Volume};
use crate::plan::{MoveStep, NodePlan, VolumeRef};

/// Capability of computing rebalancing plans for a node.
pub trait Planner {
    /// Compute plans at the given threshold percentage.
    ///
    /// The threshold has already been validated to lie in (0, 100].
    /// Returns one plan per node in scope; in single-node mode at most
    /// one entry. A plan with zero steps means no balancing is needed.
    fn compute_plan(&self, node: &Node, threshold: f64) -> Vec<NodePlan>;
}

/// Default greedy planner.
///
/// For each volume set, computes the set's ideal utilization and pairs the
/// most over-utilized volumes with the least utilized ones, moving just
/// enough bytes to bring both toward the ideal. Volumes already within
/// `threshold` percent of the ideal are left alone.
#[derive(Debug, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    pub fn new() -> Self {
        Self
    }

    fn plan_volume_set(
        &self,
        plan: &mut NodePlan,
        storage_type: &str,
        volumes: &[Volume],
        ideal: f64,
        tolerance: f64,
    ) {
        // Bytes above/below the ideal watermark per volume.
        let mut sources: Vec<(usize, u64)> = Vec::new();
        let mut sinks: Vec<(usize, u64)> = Vec::new();

        for (idx, vol) in volumes.iter().enumerate() {
            let ideal_used = (ideal * vol.capacity as f64) as u64;
            if vol.utilization() > ideal + tolerance {
                sources.push((idx, vol.used.saturating_sub(ideal_used)));
            } else if vol.used < ideal_used {
                sinks.push((idx, ideal_used - vol.used));
            }
        }

        // Most over-utilized first, emptiest destination first.
        sources.sort_by(|a, b| {
            volumes[b.0]
                .utilization()
                .partial_cmp(&volumes[a.0].utilization())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sinks.sort_by(|a, b| {
            volumes[a.0]
                .utilization()
                .partial_cmp(&volumes[b.0].utilization())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut sink_iter = sinks.into_iter();
        let mut current_sink = sink_iter.next();

        for (src_idx, mut excess) in sources {
            while excess > 0 {
                let Some((dst_idx, room)) = current_sink else {
                    debug!(storage_type, "No destination volumes left with room");
                    return;
                };

                let bytes = excess.min(room);
                if bytes > 0 {
                    plan.steps.push(MoveStep {
                        source: VolumeRef::from_volume(&volumes[src_idx]),
                        destination: VolumeRef::from_volume(&volumes[dst_idx]),
                        bytes_to_move: bytes,
                        bandwidth: 0,
                        max_disk_errors: 0,
                    });
                }

                excess -= bytes;
                if room - bytes == 0 {
                    current_sink = sink_iter.next();
                } else {
                    current_sink = Some((dst_idx, room - bytes));
                }
            }
        }
    }
}

impl Planner for GreedyPlanner {
    fn compute_plan(&self, node: &Node, threshold: f64) -> Vec<NodePlan> {
        let tolerance = threshold / 100.0;
        let mut plan = NodePlan::new(&node.hostname, &node.uuid, node.port);

        for (name, set) in &node.volume_sets {
            let ideal = set.ideal_utilization();
            self.plan_volume_set(&mut plan, name, &set.volumes, ideal, tolerance);
        }

        info!(
            node = %node.hostname,
            threshold,
            steps = plan.steps.len(),
            bytes = plan.total_bytes(),
            "Plan computed"
        );

        vec![plan]
    }
}
