//! Volume path RPC client
//!
//! Fetches the volume-UUID to physical-path mapping from a storage node.
//! The paths are cosmetic only; they make plans and reports human
//! readable and never affect balancing decisions. A failure here is still
//! fatal to the run: a plan artifact without paths is not auditable.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use diskbal_core::error::{DiskBalError, Result};

/// Capability of fetching a node's volume-path mapping.
#[async_trait::async_trait]
pub trait VolumePathFetcher {
    /// Fetch the UUID-to-path mapping from the node at `address`.
    async fn fetch_volume_paths(&self, address: &str) -> Result<HashMap<Uuid, String>>;
}

/// HTTP-backed fetcher querying the node's disk balancer endpoint.
pub struct HttpVolumePathFetcher {
    client: reqwest::Client,
}

impl HttpVolumePathFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DiskBalError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl VolumePathFetcher for HttpVolumePathFetcher {
    #[instrument(skip(self))]
    async fn fetch_volume_paths(&self, address: &str) -> Result<HashMap<Uuid, String>> {
        let url = format!("http://{}/diskbalancer/volume-paths", address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DiskBalError::Connectivity {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiskBalError::Connectivity {
                address: address.to_string(),
                message: format!("unexpected status {}", status),
            });
        }

        let raw = response.text().await.map_err(|e| DiskBalError::Connectivity {
            address: address.to_string(),
            message: e.to_string(),
        })?;

        let paths = parse_volume_paths(&raw)?;

        debug!(address, volumes = paths.len(), "Volume paths fetched");
        Ok(paths)
    }
}

/// Decode the node's payload into a UUID-to-path mapping.
fn parse_volume_paths(raw: &str) -> Result<HashMap<Uuid, String>> {
    serde_json::from_str(raw)
        .map_err(|e| DiskBalError::Parse(format!("invalid volume-path mapping: {}", e)))
}
