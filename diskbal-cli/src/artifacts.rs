//! Plan artifact writing
//!
//! Persists the pre-plan cluster snapshot and the computed plan as two
//! named files under the configured output directory. Each write is
//! whole-content and single-shot; there is no transactionality across the
//! two files.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use diskbal_core::error::Result;

/// Naming template for the pre-plan snapshot artifact.
pub const BEFORE_TEMPLATE: &str = "{node}.before.json";

/// Naming template for the plan artifact.
pub const PLAN_TEMPLATE: &str = "{node}.plan.json";

/// Writer for the plan run's durable artifacts.
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the "before" artifact for a node identifier.
    pub fn before_path(&self, node: &str) -> PathBuf {
        self.output_dir.join(BEFORE_TEMPLATE.replace("{node}", node))
    }

    /// Path of the "plan" artifact for a node identifier.
    pub fn plan_path(&self, node: &str) -> PathBuf {
        self.output_dir.join(PLAN_TEMPLATE.replace("{node}", node))
    }

    /// Write one artifact in full, creating the output directory if needed.
    #[instrument(skip(self, content))]
    pub async fn write(&self, path: &Path, content: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(path, content.as_bytes()).await?;

        info!(path = %path.display(), bytes = content.len(), "Artifact written");
        Ok(())
    }
}
