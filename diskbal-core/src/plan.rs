//! Rebalancing plans
//!
//! A plan is the ordered list of data moves computed for one node. Plans
//! are produced once by a planner, optionally adjusted by the operator's
//! bandwidth / max-error overrides, serialized, and discarded.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datamodel::Volume;
use crate::error::Result;

/// Identity of a volume as recorded inside a plan step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRef {
    pub uuid: Uuid,
    pub path: String,
    pub storage_type: String,
}

impl VolumeRef {
    pub fn from_volume(vol: &Volume) -> Self {
        Self {
            uuid: vol.uuid,
            path: vol.path.clone(),
            storage_type: vol.storage_type.clone(),
        }
    }
}

/// One planned data movement between two volumes.
///
/// `bandwidth` and `max_disk_errors` are the only fields mutated after
/// planning; 0 means "keep the planner default".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStep {
    pub source: VolumeRef,
    pub destination: VolumeRef,
    pub bytes_to_move: u64,
    #[serde(default)]
    pub bandwidth: u64,
    #[serde(default)]
    pub max_disk_errors: u64,
}

/// Plan for a single node. Zero steps means no balancing is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePlan {
    pub node_id: String,
    pub node_uuid: String,
    pub port: u16,
    pub steps: Vec<MoveStep>,
}

impl NodePlan {
    pub fn new(node_id: &str, node_uuid: &str, port: u16) -> Self {
        Self {
            node_id: node_id.to_string(),
            node_uuid: node_uuid.to_string(),
            port,
            steps: Vec::new(),
        }
    }

    /// Total bytes this plan would move.
    pub fn total_bytes(&self) -> u64 {
        self.steps.iter().map(|s| s.bytes_to_move).sum()
    }

    /// Serialize for the "plan" artifact.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
