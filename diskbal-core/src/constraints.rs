//! Plan constraint application
//!
//! Applies operator-supplied operational limits to planner output. Each
//! limit is set on every step of every plan; 0 means "no override" and
//! leaves the planner-chosen default untouched.

use tracing::debug;

use crate::plan::NodePlan;

/// Apply bandwidth and max-error overrides across all plan steps in place.
pub fn apply_plan_params(plans: &mut [NodePlan], bandwidth: u64, max_error: u64) {
    for plan in plans.iter_mut() {
        for step in &mut plan.steps {
            if bandwidth > 0 {
                debug!(bandwidth, "Setting step bandwidth");
                step.bandwidth = bandwidth;
            }
            if max_error > 0 {
                debug!(max_error, "Setting step max disk errors");
                step.max_disk_errors = max_error;
            }
        }
    }
}
