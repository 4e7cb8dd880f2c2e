//! Cluster snapshot data model
//!
//! In-memory graph of the cluster state a plan is computed against:
//! Cluster -> Node -> VolumeSet -> Volume. Built once per run from a
//! persisted snapshot and read-only afterwards, except for the cosmetic
//! volume path annotation applied before reporting.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

/// One physical disk attached to a storage node.
///
/// The UUID is the stable identity; capacity and used space come from the
/// snapshot and are never recomputed here. The path is display-only and
/// filled in post-hoc from the node's volume-path mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub uuid: Uuid,
    pub storage_type: String,
    pub capacity: u64,
    pub used: u64,
    /// Human-readable mount path. Cosmetic only; never affects planning.
    #[serde(default)]
    pub path: String,
}

impl Volume {
    /// Fraction of capacity in use (1.0 for a zero-capacity volume).
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            1.0
        } else {
            self.used as f64 / self.capacity as f64
        }
    }
}

/// Volumes of one storage class on a single node.
///
/// Every volume belongs to exactly one set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSet {
    pub storage_type: String,
    pub volumes: Vec<Volume>,
}

impl VolumeSet {
    /// Ideal utilization across the set: total used over total capacity.
    pub fn ideal_utilization(&self) -> f64 {
        let capacity: u64 = self.volumes.iter().map(|v| v.capacity).sum();
        let used: u64 = self.volumes.iter().map(|v| v.used).sum();
        if capacity == 0 {
            0.0
        } else {
            used as f64 / capacity as f64
        }
    }
}

/// A storage cluster member and its volume sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub ip: String,
    pub hostname: String,
    pub uuid: String,
    pub port: u16,
    /// Keyed by storage type. Ordered so that plan computation and the
    /// serialized artifacts are reproducible across runs.
    pub volume_sets: BTreeMap<String, VolumeSet>,
}

impl Node {
    /// RPC address of the node.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }

    /// Annotate volumes with their physical paths.
    ///
    /// Volumes whose UUID is missing from the mapping keep an empty path;
    /// a volume may be newly added or not yet registered, so that is not
    /// an error. Applying the same mapping twice is a no-op.
    pub fn apply_volume_paths(&mut self, paths: &HashMap<Uuid, String>) {
        let mut annotated = 0usize;
        for set in self.volume_sets.values_mut() {
            for vol in &mut set.volumes {
                if let Some(path) = paths.get(&vol.uuid) {
                    vol.path = path.clone();
                    annotated += 1;
                }
            }
        }
        debug!(node = %self.hostname, annotated, "Volume paths applied");
    }
}

/// Point-in-time snapshot of the whole cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub nodes: Vec<Node>,
    /// Cluster-wide default imbalance tolerance percentage.
    pub default_threshold: f64,
}

impl Cluster {
    /// Locate a node by IP, hostname, or node UUID.
    pub fn find_node(&self, identifier: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.ip == identifier || n.hostname == identifier || n.uuid == identifier)
    }

    /// Mutable lookup with the same matching rules as [`find_node`].
    ///
    /// [`find_node`]: Cluster::find_node
    pub fn find_node_mut(&mut self, identifier: &str) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.ip == identifier || n.hostname == identifier || n.uuid == identifier)
    }

    /// Serialize the full snapshot for the "before" artifact.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
