//! diskbal command-line tool
//!
//! Generates and records rebalancing plans for the disks of a storage
//! node. The plan flow loads a cluster snapshot, resolves the imbalance
//! threshold, annotates volumes with their physical paths over RPC,
//! invokes the planner, applies operator limits, and writes the snapshot
//! and plan artifacts.

pub mod artifacts;
pub mod commands;
pub mod config;
pub mod connector;
pub mod node_client;
