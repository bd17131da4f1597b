//! End-to-end scenarios over the bundled worlds: river crossing, a sliding
//! puzzle one move from its goal, and a parity-unreachable goal.

use lock_tests::{
    eight_puzzle_goal, one_slide_from_goal, one_slide_second_action, parity_swapped_2x3, replay,
};
use statespace_search::contract::{GoalTest, SearchDomain};
use statespace_search::discipline::{BreadthFirst, DepthFirst};
use statespace_search::policy::SearchPolicy;
use statespace_search::search::{EngineState, Outcome, SearchEngine};
use statespace_worlds::river_crossing::{RiverCrossing, Transfer};
use statespace_worlds::sliding_puzzle::{greedy, manhattan_distance, Slide, SlidingPuzzle};

// ---------------------------------------------------------------------------
// ACCEPTANCE: RIVER-CROSSING-BFS-TREE
// ---------------------------------------------------------------------------

#[test]
fn river_crossing_bfs_tree_mode_solves_at_depth_11() {
    let world = RiverCrossing::classic();
    let mut engine = SearchEngine::new(
        &world,
        world.initial_state(),
        GoalTest::Domain,
        BreadthFirst::new(),
        &SearchPolicy::tree(),
    )
    .unwrap();

    let outcome = engine.run().unwrap();
    assert!(outcome.is_solved(), "expected Solved, got {outcome:?}");
    assert_eq!(engine.state(), EngineState::Solved);
    assert_eq!(engine.solution_depth(), Some(11));

    let path = engine.solution_path().unwrap();
    assert_eq!(path.len(), 12, "root plus eleven crossings");
    assert_eq!(*path[0].state, world.initial_state());
    assert!(path[0].action.is_none());
    assert!(world.is_goal(path[11].state));

    let actions: Vec<&Transfer> = path.iter().filter_map(|s| s.action).collect();
    let end = replay(&world, &world.initial_state(), actions).unwrap();
    assert!(world.is_goal(&end));
}

#[test]
fn river_crossing_bfs_tree_mode_counts_are_locked() {
    let world = RiverCrossing::classic();
    let mut engine = SearchEngine::new(
        &world,
        world.initial_state(),
        GoalTest::Domain,
        BreadthFirst::new(),
        &SearchPolicy::tree(),
    )
    .unwrap();
    engine.run().unwrap();
    assert_eq!(engine.expanded_node_count(), 10_963);
    assert_eq!(engine.generated_node_count(), 25_243);
    assert_eq!(engine.duplicates_suppressed(), 0);
    assert_eq!(engine.node_count(), 25_243);
}

#[test]
fn river_crossing_graph_mode_finds_same_depth_with_far_less_work() {
    let world = RiverCrossing::classic();
    let mut engine = SearchEngine::new(
        &world,
        world.initial_state(),
        GoalTest::State(world.goal_state()),
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();
    assert!(engine.run().unwrap().is_solved());
    assert_eq!(engine.solution_depth(), Some(11));
    assert_eq!(engine.expanded_node_count(), 14);
    assert_eq!(engine.generated_node_count(), 31);
    assert_eq!(engine.duplicates_suppressed(), 16);
}

#[test]
fn river_crossing_depth_first_graph_mode_finds_a_valid_crossing() {
    let world = RiverCrossing::classic();
    let mut engine = SearchEngine::new(
        &world,
        world.initial_state(),
        GoalTest::Domain,
        DepthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();
    assert!(engine.run().unwrap().is_solved());
    let path = engine.solution_path().unwrap();
    let actions: Vec<&Transfer> = path.iter().filter_map(|s| s.action).collect();
    assert!(actions.len() >= 11, "no crossing is shorter than 11 trips");
    let end = replay(&world, &world.initial_state(), actions).unwrap();
    assert!(world.is_goal(&end));
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SLIDING-PUZZLE-ONE-MOVE
// ---------------------------------------------------------------------------

#[test]
fn sliding_puzzle_one_move_from_goal_expands_once() {
    let puzzle = SlidingPuzzle::new(eight_puzzle_goal());
    let mut engine = SearchEngine::new(
        &puzzle,
        one_slide_from_goal(),
        GoalTest::State(eight_puzzle_goal()),
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();

    assert!(engine.run().unwrap().is_solved());
    assert_eq!(engine.expanded_node_count(), 1);
    assert_eq!(engine.solution_depth(), Some(1));

    let path = engine.solution_path().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[1].action, Some(&Slide::Up));
    assert_eq!(*path[1].state, eight_puzzle_goal());
}

#[test]
fn goal_test_happens_at_pop_not_at_generation() {
    // The undoing slide is the second child, so the first child is expanded
    // before the goal is popped.
    let puzzle = SlidingPuzzle::new(eight_puzzle_goal());
    let mut engine = SearchEngine::new(
        &puzzle,
        one_slide_second_action(),
        GoalTest::Domain,
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();
    assert!(engine.run().unwrap().is_solved());
    assert_eq!(engine.expanded_node_count(), 2);
    assert_eq!(engine.solution_depth(), Some(1));
    let path = engine.solution_path().unwrap();
    assert_eq!(path[1].action, Some(&Slide::Left));
}

#[test]
fn greedy_manhattan_solves_shuffled_board() {
    let goal = eight_puzzle_goal();
    let mut start = goal.clone();
    for slide in [Slide::Down, Slide::Down, Slide::Right, Slide::Up, Slide::Right] {
        start = start.slide(slide).unwrap();
    }
    let puzzle = SlidingPuzzle::new(goal.clone());
    let mut engine = SearchEngine::new(
        &puzzle,
        start.clone(),
        GoalTest::Domain,
        greedy(goal.clone(), manhattan_distance),
        &SearchPolicy::graph(),
    )
    .unwrap();
    assert!(engine.run().unwrap().is_solved());
    assert_eq!(engine.solution_cost(), Some(0.0));

    let path = engine.solution_path().unwrap();
    let slides: Vec<&Slide> = path.iter().filter_map(|s| s.action).collect();
    assert_eq!(replay(&puzzle, &start, slides), Some(goal));
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: UNREACHABLE-GOAL-EXHAUSTS
// ---------------------------------------------------------------------------

#[test]
fn parity_unreachable_goal_exhausts_in_graph_mode() {
    let (initial, goal) = parity_swapped_2x3();
    assert!(!initial.is_solvable_to(&goal));

    let puzzle = SlidingPuzzle::new(goal.clone());
    let mut engine = SearchEngine::new(
        &puzzle,
        initial,
        GoalTest::State(goal),
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();

    assert_eq!(engine.run().unwrap(), Outcome::Exhausted);
    assert_eq!(engine.state(), EngineState::Exhausted);
    assert!(engine.solution_path().is_none());
    // Exactly one parity class of the 6! boards is reachable.
    assert_eq!(engine.expanded_node_count(), 360);
    assert_eq!(engine.explored_len(), 360);
    assert_eq!(engine.frontier_len(), 0);
}

#[test]
fn reachable_2x3_goal_is_solved_at_optimal_depth() {
    let (_, goal) = parity_swapped_2x3();
    let start = statespace_worlds::sliding_puzzle::Board::new(2, 3, vec![0, 1, 2, 3, 4, 5]).unwrap();
    assert!(start.is_solvable_to(&goal));

    let puzzle = SlidingPuzzle::new(goal);
    let mut engine = SearchEngine::new(
        &puzzle,
        start,
        GoalTest::Domain,
        BreadthFirst::new(),
        &SearchPolicy::graph(),
    )
    .unwrap();
    assert!(engine.run().unwrap().is_solved());
    assert_eq!(engine.solution_depth(), Some(15));
    assert_eq!(engine.expanded_node_count(), 269);
}
