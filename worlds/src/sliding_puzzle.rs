//! Sliding-tile puzzles on a `rows x cols` board.
//!
//! Tiles are numbered `1..rows*cols`; the hole is [`HOLE`]. A [`Slide`] is
//! named by the direction the moved tile travels: `Up` moves the tile below
//! the hole up into it, so the hole moves down.

use std::fmt;

use statespace_search::contract::SearchDomain;
use statespace_search::discipline::CostFn;

/// Value marking the empty cell.
pub const HOLE: u8 = 0;

/// Largest supported number of cells.
pub const MAX_CELLS: usize = 256;

/// Board construction failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions {rows}x{cols} must both be non-zero")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("board of {cells} cells exceeds the supported maximum of {MAX_CELLS}")]
    TooLarge { cells: usize },

    #[error("expected {expected} tiles for the board, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Tiles must be exactly `0..rows*cols`, each once.
    #[error("tile {tile} is out of range or repeated")]
    NotAPermutation { tile: u8 },
}

/// Direction a tile moves into the hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    /// Enumeration order used for action generation.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// A puzzle position, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<u8>,
    hole: usize,
}

impl Board {
    /// Build a board from row-major tiles.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the dimensions are zero or too large, the
    /// tile count does not match, or the tiles are not a permutation of
    /// `0..rows*cols`.
    pub fn new(rows: usize, cols: usize, tiles: Vec<u8>) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard { rows, cols });
        }
        let cells = rows * cols;
        if cells > MAX_CELLS {
            return Err(BoardError::TooLarge { cells });
        }
        if tiles.len() != cells {
            return Err(BoardError::SizeMismatch {
                expected: cells,
                actual: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            match seen.get_mut(usize::from(tile)) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(BoardError::NotAPermutation { tile }),
            }
        }
        let hole = tiles
            .iter()
            .position(|&t| t == HOLE)
            .ok_or(BoardError::NotAPermutation { tile: HOLE })?;

        Ok(Self {
            rows,
            cols,
            tiles,
            hole,
        })
    }

    /// The conventional goal: tiles in ascending order, hole last.
    ///
    /// # Errors
    ///
    /// As [`Board::new`] for bad dimensions.
    pub fn ordered(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let cells = rows * cols;
        if cells > MAX_CELLS {
            return Err(BoardError::TooLarge { cells });
        }
        let tiles = (1..cells)
            .filter_map(|t| u8::try_from(t).ok())
            .chain(std::iter::once(HOLE))
            .collect();
        Self::new(rows, cols, tiles)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major tiles.
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Tile at `(row, col)`, if on the board.
    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.rows && col < self.cols).then(|| self.tiles[row * self.cols + col])
    }

    /// `(row, col)` of the hole.
    #[must_use]
    pub fn hole(&self) -> (usize, usize) {
        (self.hole / self.cols, self.hole % self.cols)
    }

    /// Cell the hole moves to under `slide`, if it stays on the board.
    fn hole_target(&self, slide: Slide) -> Option<usize> {
        let (row, col) = self.hole();
        let (row, col) = match slide {
            Slide::Up => (row + 1, col),
            Slide::Down => (row.checked_sub(1)?, col),
            Slide::Left => (row, col + 1),
            Slide::Right => (row, col.checked_sub(1)?),
        };
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Slides applicable to this board, in [`Slide::ALL`] order.
    #[must_use]
    pub fn slides(&self) -> Vec<Slide> {
        Slide::ALL
            .into_iter()
            .filter(|&s| self.hole_target(s).is_some())
            .collect()
    }

    /// The board after `slide`, or `None` if no tile can move that way.
    #[must_use]
    pub fn slide(&self, slide: Slide) -> Option<Self> {
        let target = self.hole_target(slide)?;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.hole, target);
        Some(Self {
            rows: self.rows,
            cols: self.cols,
            tiles,
            hole: target,
        })
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Whether `goal` is reachable from this board by slides.
    ///
    /// Reachable exactly when the parity of the tile permutation (hole
    /// included) matches the parity of the hole's Manhattan displacement.
    /// Boards of different dimensions are never mutually reachable.
    #[must_use]
    pub fn is_solvable_to(&self, goal: &Self) -> bool {
        if !self.same_shape(goal) {
            return false;
        }

        let mut goal_index = vec![0usize; self.tiles.len()];
        for (index, &tile) in goal.tiles.iter().enumerate() {
            goal_index[usize::from(tile)] = index;
        }
        let permutation: Vec<usize> = self
            .tiles
            .iter()
            .map(|&tile| goal_index[usize::from(tile)])
            .collect();

        let mut visited = vec![false; permutation.len()];
        let mut cycles = 0usize;
        for start in 0..permutation.len() {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = permutation[i];
            }
        }
        let permutation_odd = (permutation.len() - cycles) % 2 == 1;

        let (hr, hc) = self.hole();
        let (gr, gc) = goal.hole();
        let hole_odd = (hr.abs_diff(gr) + hc.abs_diff(gc)) % 2 == 1;

        permutation_odd == hole_odd
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols) {
            for &tile in row {
                if tile == HOLE {
                    write!(f, "   ")?;
                } else {
                    write!(f, "{tile:>3}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Sliding puzzle domain with a fixed goal board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingPuzzle {
    goal: Board,
}

impl SlidingPuzzle {
    #[must_use]
    pub fn new(goal: Board) -> Self {
        Self { goal }
    }

    #[must_use]
    pub fn goal(&self) -> &Board {
        &self.goal
    }
}

impl SearchDomain for SlidingPuzzle {
    type State = Board;
    type Action = Slide;

    fn valid_actions(&self, state: &Board) -> Vec<Slide> {
        state.slides()
    }

    /// An inapplicable slide leaves the board unchanged.
    fn apply(&self, state: &Board, action: &Slide) -> Board {
        state.slide(*action).unwrap_or_else(|| state.clone())
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }
}

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// Number of tiles (hole excluded) not in their goal cell.
///
/// A board shaped differently from `goal` scores `u32::MAX`.
#[must_use]
pub fn misplaced_tiles(board: &Board, goal: &Board) -> u32 {
    if !board.same_shape(goal) {
        return u32::MAX;
    }
    let count = board
        .tiles
        .iter()
        .zip(&goal.tiles)
        .filter(|&(&tile, &want)| tile != HOLE && tile != want)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Sum over tiles (hole excluded) of the grid distance to the goal cell.
///
/// A board shaped differently from `goal` scores `u32::MAX`.
#[must_use]
pub fn manhattan_distance(board: &Board, goal: &Board) -> u32 {
    if !board.same_shape(goal) {
        return u32::MAX;
    }
    let mut goal_index = vec![0usize; goal.tiles.len()];
    for (index, &tile) in goal.tiles.iter().enumerate() {
        goal_index[usize::from(tile)] = index;
    }

    let cols = board.cols;
    let total: usize = board
        .tiles
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != HOLE)
        .map(|(index, &tile)| {
            let want = goal_index[usize::from(tile)];
            (index / cols).abs_diff(want / cols) + (index % cols).abs_diff(want % cols)
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Greedy best-first discipline: a node's cost is `heuristic(board, goal)`.
pub fn greedy(
    goal: Board,
    heuristic: fn(&Board, &Board) -> u32,
) -> CostFn<impl Fn(f64, &Slide, &Board) -> f64> {
    CostFn::new(move |_parent: f64, _slide: &Slide, board: &Board| {
        f64::from(heuristic(board, &goal))
    })
}
