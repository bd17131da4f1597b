//! Binary that runs one fixed search and prints deterministic output lines
//! for cross-process verification.
//!
//! Usage: `search_fixture [river|puzzle|unreachable] [POLICY.toml]`
//!
//! Without a policy file the run is an unbounded breadth-first graph search
//! with trace recording. Output: key=value lines on stdout; logs go to
//! stderr (`RUST_LOG`, default `warn`).

use std::error::Error;
use std::io::Write;
use std::process::ExitCode;

use lock_tests::{eight_puzzle_goal, one_slide_from_goal, parity_swapped_2x3};
use statespace_search::contract::{GoalTest, SearchDomain};
use statespace_search::discipline::BreadthFirst;
use statespace_search::policy::SearchPolicy;
use statespace_search::search::{AbortReason, Outcome, SearchEngine};
use statespace_worlds::river_crossing::{RiverCrossing, Transfer};
use statespace_worlds::sliding_puzzle::{Slide, SlidingPuzzle};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("search_fixture: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let world = args.next().unwrap_or_else(|| "river".to_owned());
    let policy = match args.next() {
        Some(path) => SearchPolicy::load(path)?,
        None => SearchPolicy::graph().with_trace(),
    };

    match world.as_str() {
        "river" => {
            let domain = RiverCrossing::classic();
            let initial = domain.initial_state();
            report(&world, &domain, initial, GoalTest::Domain, &policy, |t: &Transfer| {
                format!("M{}C{}", t.missionaries, t.cannibals)
            })
        }
        "puzzle" => {
            let domain = SlidingPuzzle::new(eight_puzzle_goal());
            report(&world, &domain, one_slide_from_goal(), GoalTest::Domain, &policy, |s: &Slide| {
                format!("{s:?}")
            })
        }
        "unreachable" => {
            let (initial, goal) = parity_swapped_2x3();
            let domain = SlidingPuzzle::new(goal);
            report(&world, &domain, initial, GoalTest::Domain, &policy, |s: &Slide| {
                format!("{s:?}")
            })
        }
        other => Err(format!("unknown world {other:?}; expected river, puzzle or unreachable").into()),
    }
}

fn report<D, F>(
    world: &str,
    domain: &D,
    initial: D::State,
    goal: GoalTest<D::State>,
    policy: &SearchPolicy,
    describe: F,
) -> Result<(), Box<dyn Error>>
where
    D: SearchDomain,
    F: Fn(&D::Action) -> String,
{
    let mut engine = SearchEngine::new(domain, initial, goal, BreadthFirst::new(), policy)?;
    let outcome = engine.run()?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "world={world}")?;
    writeln!(out, "mode={}", policy.mode.as_str())?;
    writeln!(out, "outcome={}", outcome_label(&outcome))?;
    writeln!(out, "expanded={}", engine.expanded_node_count())?;
    writeln!(out, "generated={}", engine.generated_node_count())?;
    writeln!(out, "duplicates_suppressed={}", engine.duplicates_suppressed())?;
    writeln!(out, "frontier_high_water={}", engine.frontier_high_water())?;
    if let Some(path) = engine.solution_path() {
        let actions: Vec<String> = path
            .iter()
            .filter_map(|step| step.action.map(&describe))
            .collect();
        writeln!(out, "solution_depth={}", actions.len())?;
        writeln!(out, "solution={}", actions.join(","))?;
    }
    if let Some(trace) = engine.trace() {
        writeln!(out, "trace_expansions={}", trace.expansions.len())?;
        writeln!(out, "trace_digest={}", trace.digest()?)?;
    }
    Ok(())
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Solved { .. } => "solved",
        Outcome::Exhausted => "exhausted",
        Outcome::Aborted(AbortReason::NodeLimit { .. }) => "aborted_node_limit",
        Outcome::Aborted(AbortReason::DepthLimit { .. }) => "aborted_depth_limit",
    }
}
