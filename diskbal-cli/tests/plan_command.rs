//! End-to-end tests for the plan command
//!
//! Runs the full plan flow against in-memory seams: a stub cluster
//! connector, a fixture volume-path fetcher, and the default greedy
//! planner.

use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use diskbal_cli::artifacts::ArtifactWriter;
use diskbal_cli::commands::plan::{run, PlanOptions};
use diskbal_cli::connector::ClusterConnector;
use diskbal_cli::node_client::VolumePathFetcher;
use diskbal_core::datamodel::{Cluster, Node, Volume, VolumeSet};
use diskbal_core::error::{DiskBalError, Result};
use diskbal_core::plan::NodePlan;
use diskbal_core::planner::{GreedyPlanner, Planner};

const MB: u64 = 1024 * 1024;

struct StubConnector {
    cluster: Cluster,
}

#[async_trait::async_trait]
impl ClusterConnector for StubConnector {
    async fn load_cluster(&self) -> Result<Cluster> {
        Ok(self.cluster.clone())
    }
}

struct FixtureFetcher {
    paths: HashMap<Uuid, String>,
}

#[async_trait::async_trait]
impl VolumePathFetcher for FixtureFetcher {
    async fn fetch_volume_paths(&self, _address: &str) -> Result<HashMap<Uuid, String>> {
        Ok(self.paths.clone())
    }
}

struct FailingFetcher;

#[async_trait::async_trait]
impl VolumePathFetcher for FailingFetcher {
    async fn fetch_volume_paths(&self, address: &str) -> Result<HashMap<Uuid, String>> {
        Err(DiskBalError::Connectivity {
            address: address.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

fn make_cluster(volumes: Vec<(Uuid, u64, u64)>) -> Cluster {
    let volumes = volumes
        .into_iter()
        .map(|(uuid, capacity, used)| Volume {
            uuid,
            storage_type: "DISK".to_string(),
            capacity,
            used,
            path: String::new(),
        })
        .collect();

    let mut volume_sets = BTreeMap::new();
    volume_sets.insert(
        "DISK".to_string(),
        VolumeSet {
            storage_type: "DISK".to_string(),
            volumes,
        },
    );

    Cluster {
        nodes: vec![Node {
            ip: "10.0.0.1".to_string(),
            hostname: "dn1.example.com".to_string(),
            uuid: "dn-uuid-1".to_string(),
            port: 9867,
            volume_sets,
        }],
        default_threshold: 10.0,
    }
}

fn make_opts(node: &str) -> PlanOptions {
    PlanOptions {
        node: node.to_string(),
        threshold: None,
        bandwidth: 0,
        max_error: 0,
        verbose: false,
    }
}

#[tokio::test]
async fn skewed_node_produces_both_artifacts_and_report() {
    let uuid_hot = Uuid::new_v4();
    let uuid_cold = Uuid::new_v4();

    // 90% vs 10% utilization, threshold 10.
    let connector = StubConnector {
        cluster: make_cluster(vec![
            (uuid_hot, 1000 * MB, 900 * MB),
            (uuid_cold, 1000 * MB, 100 * MB),
        ]),
    };
    let fetcher = FixtureFetcher {
        paths: [
            (uuid_hot, "/data/disk0".to_string()),
            (uuid_cold, "/data/disk1".to_string()),
        ]
        .into_iter()
        .collect(),
    };

    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let opts = PlanOptions {
        threshold: Some("10".to_string()),
        bandwidth: 100,
        verbose: true,
        ..make_opts("dn1.example.com")
    };

    let outcome = run(&connector, &fetcher, &GreedyPlanner::new(), &writer, &opts)
        .await
        .unwrap();

    assert_eq!(outcome.steps, 1);
    assert!(outcome.before_path.exists());
    let plan_path = outcome.plan_path.expect("plan artifact should be written");
    assert!(plan_path.exists());

    // Bandwidth override landed on the step.
    let plan_json = std::fs::read_to_string(&plan_path).unwrap();
    let plan: NodePlan = serde_json::from_str(&plan_json).unwrap();
    assert_eq!(plan.steps.len(), 1);
    assert_eq!(plan.steps[0].bandwidth, 100);
    assert_eq!(plan.steps[0].max_disk_errors, 0);
    assert_eq!(plan.steps[0].source.path, "/data/disk0");
    assert_eq!(plan.steps[0].destination.path, "/data/disk1");

    // One report row with both paths and a scaled size.
    let report = outcome.report.expect("verbose run should render a report");
    let rows: Vec<_> = report
        .lines()
        .filter(|l| l.contains("/data/disk0"))
        .collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("/data/disk1"));
    assert!(rows[0].contains("400.00 MB"));

    // The "before" artifact carries the annotated snapshot.
    let before_json = std::fs::read_to_string(&outcome.before_path).unwrap();
    let cluster: Cluster = serde_json::from_str(&before_json).unwrap();
    let volumes = &cluster.nodes[0].volume_sets["DISK"].volumes;
    assert!(volumes.iter().any(|v| v.path == "/data/disk0"));
}

#[tokio::test]
async fn balanced_node_writes_only_before_artifact() {
    let uuid_a = Uuid::new_v4();
    let uuid_b = Uuid::new_v4();

    // Both at 50%; nothing to do at threshold 10.
    let connector = StubConnector {
        cluster: make_cluster(vec![
            (uuid_a, 1000 * MB, 500 * MB),
            (uuid_b, 1000 * MB, 500 * MB),
        ]),
    };
    let fetcher = FixtureFetcher {
        paths: [
            (uuid_a, "/data/disk0".to_string()),
            (uuid_b, "/data/disk1".to_string()),
        ]
        .into_iter()
        .collect(),
    };

    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let opts = PlanOptions {
        threshold: Some("10".to_string()),
        verbose: true,
        ..make_opts("dn1.example.com")
    };

    let outcome = run(&connector, &fetcher, &GreedyPlanner::new(), &writer, &opts)
        .await
        .unwrap();

    assert_eq!(outcome.steps, 0);
    assert!(outcome.before_path.exists());
    assert!(outcome.plan_path.is_none());
    assert!(!writer.plan_path("dn1.example.com").exists());
    // No plan to show, even though verbose was requested.
    assert!(outcome.report.is_none());
}

#[tokio::test]
async fn empty_node_identifier_is_invalid_argument() {
    let connector = StubConnector {
        cluster: make_cluster(vec![]),
    };
    let fetcher = FixtureFetcher {
        paths: HashMap::new(),
    };
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let err = run(
        &connector,
        &fetcher,
        &GreedyPlanner::new(),
        &writer,
        &make_opts("  "),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DiskBalError::InvalidArgument(_)));
}

#[tokio::test]
async fn unknown_node_is_node_not_found() {
    let connector = StubConnector {
        cluster: make_cluster(vec![]),
    };
    let fetcher = FixtureFetcher {
        paths: HashMap::new(),
    };
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let err = run(
        &connector,
        &fetcher,
        &GreedyPlanner::new(),
        &writer,
        &make_opts("dn9.example.com"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DiskBalError::NodeNotFound(_)));
}

#[tokio::test]
async fn path_fetch_failure_aborts_before_any_artifact() {
    let connector = StubConnector {
        cluster: make_cluster(vec![(Uuid::new_v4(), 1000 * MB, 900 * MB)]),
    };
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let err = run(
        &connector,
        &FailingFetcher,
        &GreedyPlanner::new(),
        &writer,
        &make_opts("dn1.example.com"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DiskBalError::Connectivity { .. }));
    assert!(!writer.before_path("dn1.example.com").exists());
    assert!(!writer.plan_path("dn1.example.com").exists());
}

#[tokio::test]
async fn stub_planner_with_no_plans_still_writes_before_artifact() {
    struct EmptyPlanner;

    impl Planner for EmptyPlanner {
        fn compute_plan(&self, _node: &Node, _threshold: f64) -> Vec<NodePlan> {
            Vec::new()
        }
    }

    let connector = StubConnector {
        cluster: make_cluster(vec![(Uuid::new_v4(), 1000 * MB, 500 * MB)]),
    };
    let fetcher = FixtureFetcher {
        paths: HashMap::new(),
    };
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let opts = PlanOptions {
        verbose: true,
        ..make_opts("10.0.0.1")
    };

    let outcome = run(&connector, &fetcher, &EmptyPlanner, &writer, &opts)
        .await
        .unwrap();

    assert_eq!(outcome.steps, 0);
    assert!(outcome.before_path.exists());
    assert!(outcome.plan_path.is_none());
    assert!(outcome.report.is_none());
}

#[tokio::test]
async fn repeated_runs_produce_identical_artifacts() {
    let uuid_hot = Uuid::new_v4();
    let uuid_cold = Uuid::new_v4();

    let connector = StubConnector {
        cluster: make_cluster(vec![
            (uuid_hot, 1000 * MB, 900 * MB),
            (uuid_cold, 1000 * MB, 100 * MB),
        ]),
    };
    let fetcher = FixtureFetcher {
        paths: [
            (uuid_hot, "/data/disk0".to_string()),
            (uuid_cold, "/data/disk1".to_string()),
        ]
        .into_iter()
        .collect(),
    };
    let opts = make_opts("dn1.example.com");

    let mut artifacts = Vec::new();
    for _ in 0..2 {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        let outcome = run(&connector, &fetcher, &GreedyPlanner::new(), &writer, &opts)
            .await
            .unwrap();

        let before = std::fs::read_to_string(&outcome.before_path).unwrap();
        let plan = std::fs::read_to_string(outcome.plan_path.unwrap()).unwrap();
        artifacts.push((before, plan));
    }

    assert_eq!(artifacts[0], artifacts[1]);
}

#[tokio::test]
async fn out_of_range_threshold_uses_cluster_default() {
    let connector = StubConnector {
        cluster: make_cluster(vec![(Uuid::new_v4(), 1000 * MB, 500 * MB)]),
    };
    let fetcher = FixtureFetcher {
        paths: HashMap::new(),
    };
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let opts = PlanOptions {
        threshold: Some("250".to_string()),
        ..make_opts("dn1.example.com")
    };

    let outcome = run(&connector, &fetcher, &GreedyPlanner::new(), &writer, &opts)
        .await
        .unwrap();

    // Cluster default is 10.0; the out-of-range 250 is silently replaced.
    assert_eq!(outcome.threshold, 10.0);
}
