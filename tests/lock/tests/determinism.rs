//! Trace determinism: identical inputs give byte-identical canonical traces,
//! in-process and across processes.

use std::path::Path;
use std::process::Command;

use lock_tests::{eight_puzzle_goal, one_slide_from_goal};
use statespace_search::contract::GoalTest;
use statespace_search::discipline::BreadthFirst;
use statespace_search::policy::SearchPolicy;
use statespace_search::search::SearchEngine;
use statespace_search::trace::{ChildOutcome, SearchTrace};
use statespace_worlds::river_crossing::RiverCrossing;
use statespace_worlds::sliding_puzzle::SlidingPuzzle;

fn river_trace(policy: &SearchPolicy) -> SearchTrace {
    let world = RiverCrossing::classic();
    let mut engine = SearchEngine::new(
        &world,
        world.initial_state(),
        GoalTest::Domain,
        BreadthFirst::new(),
        policy,
    )
    .unwrap();
    engine.run().unwrap();
    engine.take_trace().unwrap()
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: TRACE-DETERMINISM-INPROC
// ---------------------------------------------------------------------------

#[test]
fn trace_bytes_identical_across_ten_runs() {
    let policy = SearchPolicy::graph().with_trace();
    let first = river_trace(&policy).to_canonical_json_bytes().unwrap();
    for _ in 1..10 {
        let other = river_trace(&policy).to_canonical_json_bytes().unwrap();
        assert_eq!(first, other, "trace bytes differ across runs");
    }
}

#[test]
fn trace_digest_depends_on_policy() {
    let graph = river_trace(&SearchPolicy::graph().with_trace());
    let bounded = river_trace(&SearchPolicy::graph().with_max_nodes(5).with_trace());
    assert_ne!(graph.digest().unwrap(), bounded.digest().unwrap());
}

#[test]
fn trace_content_matches_engine_counters() {
    let trace = river_trace(&SearchPolicy::graph().with_trace());
    let meta = &trace.metadata;
    assert_eq!(meta.total_expanded, 14);
    assert_eq!(meta.total_generated, 31);
    assert_eq!(meta.total_duplicates_suppressed, 16);
    assert_eq!(meta.discipline, "breadth_first");

    let suppressed = trace
        .expansions
        .iter()
        .flat_map(|e| &e.children)
        .filter(|c| c.outcome != ChildOutcome::Inserted)
        .count();
    assert_eq!(suppressed, 16);

    // Root first, no parent, cost 1 under breadth-first ordering.
    let root = &trace.expansions[0];
    assert_eq!(root.parent_id, None);
    assert_eq!(root.depth, 0);
    assert_eq!(root.cost, 1.0);

    // Expansion depths never decrease under breadth-first ordering.
    assert!(trace.expansions.windows(2).all(|w| w[0].depth <= w[1].depth));

    let json: serde_json::Value =
        serde_json::from_slice(&trace.to_canonical_json_bytes().unwrap()).unwrap();
    assert_eq!(json["metadata"]["outcome"]["type"], "solved");
    assert_eq!(json["metadata"]["mode"], "graph");
    assert_eq!(json["metadata"]["max_nodes"], -1);
}

#[test]
fn trace_absent_unless_requested() {
    let puzzle = SlidingPuzzle::new(eight_puzzle_goal());
    let mut engine = SearchEngine::new(
        &puzzle,
        one_slide_from_goal(),
        GoalTest::Domain,
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();
    engine.run().unwrap();
    assert!(engine.trace().is_none());
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: TRACE-DETERMINISM-CROSSPROC
// ---------------------------------------------------------------------------

/// Run `search_fixture` from `work_dir` with extra arguments; returns stdout.
fn run_fixture(work_dir: &Path, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(work_dir)
        .env_remove("RUST_LOG")
        .env_remove("LC_ALL")
        .env_remove("LANG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin} in {}: {e}", work_dir.display()));
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn field<'a>(stdout: &'a str, key: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .unwrap_or_else(|| panic!("missing {key}= in output:\n{stdout}"))
}

#[test]
fn crossproc_output_identical_across_env_variants() {
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let tmp = tempfile::tempdir().unwrap();

    let baseline = run_fixture(workspace_root, &["river"], &[]);
    let other_cwd = run_fixture(tmp.path(), &["river"], &[]);
    let other_env = run_fixture(
        tmp.path(),
        &["river"],
        &[("LC_ALL", "C"), ("RUST_LOG", "debug"), ("TZ", "UTC")],
    );

    assert_eq!(baseline, other_cwd, "output depends on working directory");
    assert_eq!(baseline, other_env, "output depends on environment");

    assert_eq!(field(&baseline, "outcome"), "solved");
    assert_eq!(field(&baseline, "solution_depth"), "11");
    assert!(field(&baseline, "trace_digest").starts_with("sha256:"));
}

#[test]
fn crossproc_digest_matches_inprocess_trace() {
    let stdout = run_fixture(Path::new(env!("CARGO_MANIFEST_DIR")), &["river"], &[]);
    let inproc = river_trace(&SearchPolicy::graph().with_trace());
    assert_eq!(field(&stdout, "trace_digest"), inproc.digest().unwrap());
    assert_eq!(field(&stdout, "expanded"), "14");
}

#[test]
fn crossproc_reads_policy_file() {
    let tmp = tempfile::tempdir().unwrap();
    let policy_path = tmp.path().join("policy.toml");
    std::fs::write(&policy_path, "mode = \"graph\"\nmax_nodes = 3\n").unwrap();

    let stdout = run_fixture(
        tmp.path(),
        &["unreachable", policy_path.to_str().unwrap()],
        &[],
    );
    assert_eq!(field(&stdout, "outcome"), "aborted_node_limit");
    assert_eq!(field(&stdout, "expanded"), "3");
    assert!(!stdout.contains("trace_digest="), "trace was not requested");
}

#[test]
fn crossproc_unknown_world_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_search_fixture"))
        .arg("atlantis")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown world"));
}
