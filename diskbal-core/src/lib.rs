//! diskbal core library
//!
//! Data model and planning primitives for the disk balancer:
//! - Cluster/Node/VolumeSet/Volume snapshot graph
//! - Rebalancing plans and move steps
//! - Threshold resolution
//! - Plan constraint application (bandwidth / max-error overrides)
//! - Default greedy planner behind the `Planner` seam
//! - Human-readable plan reports

pub mod constraints;
pub mod datamodel;
pub mod error;
pub mod plan;
pub mod planner;
pub mod report;
pub mod threshold;

pub use error::{DiskBalError, Result};
