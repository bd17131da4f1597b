//! Shared helpers for statespace benchmark suites.

use statespace_search::contract::GoalTest;
use statespace_search::discipline::{BreadthFirst, Discipline};
use statespace_search::error::SearchError;
use statespace_search::policy::SearchPolicy;
use statespace_search::search::{Outcome, SearchEngine};
use statespace_worlds::sliding_puzzle::{Board, Slide, SlidingPuzzle};

/// A named sliding-puzzle workload.
pub struct Regime {
    pub name: &'static str,
    pub puzzle: SlidingPuzzle,
    pub start: Board,
    pub policy: SearchPolicy,
}

/// Summary of one benchmark run, returned so the optimizer keeps the work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub expanded: u64,
    pub generated: u64,
}

/// Walk `steps` slides away from `goal`, cycling through the legal slides
/// at each position. Deterministic for a given `goal` and `steps`.
#[must_use]
pub fn scrambled(goal: &Board, steps: usize) -> Board {
    let mut board = goal.clone();
    let mut previous: Option<Slide> = None;
    for i in 0..steps {
        let slides: Vec<Slide> = board
            .slides()
            .into_iter()
            .filter(|&s| Some(undo(s)) != previous)
            .collect();
        let slide = slides[(i * 7) % slides.len()];
        if let Some(next) = board.slide(slide) {
            board = next;
            previous = Some(slide);
        }
    }
    board
}

fn undo(slide: Slide) -> Slide {
    match slide {
        Slide::Up => Slide::Down,
        Slide::Down => Slide::Up,
        Slide::Left => Slide::Right,
        Slide::Right => Slide::Left,
    }
}

/// The benchmark workloads.
///
/// # Panics
///
/// Panics if a fixed board fails to build. Benchmark setup failures are fatal.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let goal_3x3 = Board::ordered(3, 3).expect("3x3 goal");
    let goal_2x3 = Board::ordered(2, 3).expect("2x3 goal");
    let swapped_2x3 = Board::new(2, 3, vec![2, 1, 3, 4, 5, 0]).expect("2x3 permutation");

    vec![
        Regime {
            name: "shallow_graph",
            puzzle: SlidingPuzzle::new(goal_3x3.clone()),
            start: scrambled(&goal_3x3, 8),
            policy: SearchPolicy::graph(),
        },
        Regime {
            name: "shallow_traced",
            puzzle: SlidingPuzzle::new(goal_3x3.clone()),
            start: scrambled(&goal_3x3, 8),
            policy: SearchPolicy::graph().with_trace(),
        },
        Regime {
            name: "budget_limited",
            puzzle: SlidingPuzzle::new(goal_3x3.clone()),
            start: scrambled(&goal_3x3, 30),
            policy: SearchPolicy::graph().with_max_nodes(2_000),
        },
        Regime {
            name: "exhaustive_dead_end",
            puzzle: SlidingPuzzle::new(goal_2x3),
            start: swapped_2x3,
            policy: SearchPolicy::graph(),
        },
    ]
}

/// Run `regime` with `discipline`.
///
/// # Errors
///
/// Propagates engine errors.
pub fn run_regime<C>(regime: &Regime, discipline: C) -> Result<RunSummary, SearchError>
where
    C: Discipline<Board, Slide>,
{
    let mut engine = SearchEngine::new(
        &regime.puzzle,
        regime.start.clone(),
        GoalTest::Domain,
        discipline,
        &regime.policy,
    )?;
    let outcome = engine.run()?;
    Ok(RunSummary {
        outcome,
        expanded: engine.expanded_node_count(),
        generated: engine.generated_node_count(),
    })
}

/// Run `regime` breadth-first.
///
/// # Errors
///
/// Propagates engine errors.
pub fn run_regime_bfs(regime: &Regime) -> Result<RunSummary, SearchError> {
    run_regime(regime, BreadthFirst::new())
}
