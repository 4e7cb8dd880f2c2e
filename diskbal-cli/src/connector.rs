//! Cluster snapshot connector
//!
//! Seam through which the plan flow obtains the cluster topology. The
//! production binding reads a persisted JSON snapshot; tests substitute an
//! in-memory cluster.

use std::path::PathBuf;
use tracing::{debug, instrument};

use diskbal_core::datamodel::Cluster;
use diskbal_core::error::{DiskBalError, Result};

/// Source of the cluster topology snapshot.
#[async_trait::async_trait]
pub trait ClusterConnector {
    /// Load the in-memory cluster graph.
    async fn load_cluster(&self) -> Result<Cluster>;
}

/// Connector reading the snapshot from a JSON file.
pub struct JsonFileConnector {
    path: PathBuf,
}

impl JsonFileConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ClusterConnector for JsonFileConnector {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_cluster(&self) -> Result<Cluster> {
        let raw = tokio::fs::read_to_string(&self.path).await?;

        let cluster: Cluster = serde_json::from_str(&raw)
            .map_err(|e| DiskBalError::Parse(format!("invalid cluster snapshot: {}", e)))?;

        debug!(nodes = cluster.nodes.len(), "Cluster snapshot loaded");
        Ok(cluster)
    }
}
