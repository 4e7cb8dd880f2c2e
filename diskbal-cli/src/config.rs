//! Runtime configuration
//!
//! Configuration loaded from environment variables with typed defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Tool configuration
#[derive(Debug, Clone)]
pub struct DiskBalConfig {
    /// Directory plan artifacts are written to
    pub output_dir: PathBuf,

    /// Cluster-wide default imbalance threshold percentage
    pub default_threshold: f64,

    /// Timeout for the volume-path RPC in seconds
    pub rpc_timeout_secs: u64,
}

impl Default for DiskBalConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("diskbalancer-plans"),
            default_threshold: 10.0,
            rpc_timeout_secs: 10,
        }
    }
}

impl DiskBalConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let output_dir = std::env::var("DISKBAL_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let default_threshold = std::env::var("DISKBAL_DEFAULT_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_threshold);

        let rpc_timeout_secs = std::env::var("DISKBAL_RPC_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rpc_timeout_secs);

        Self {
            output_dir,
            default_threshold,
            rpc_timeout_secs,
        }
    }

    /// Get RPC timeout as Duration
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}
