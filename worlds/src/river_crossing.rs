//! Missionaries and cannibals.
//!
//! Everyone starts on the left bank with the boat. The boat carries between
//! one and `boat_size` people across per trip. A bank where missionaries are
//! present and outnumbered by cannibals is invalid, and transfers producing
//! one are never offered. Goal: the left bank is empty.

use std::fmt;

use statespace_search::contract::SearchDomain;

/// Which side of the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Head counts on the left bank and the boat's position; the right bank is
/// implied by the totals of the [`RiverCrossing`] it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiverState {
    pub left_missionaries: u32,
    pub left_cannibals: u32,
    pub boat: Bank,
}

impl fmt::Display for RiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left(m={}, c={}) boat={:?}",
            self.left_missionaries, self.left_cannibals, self.boat
        )
    }
}

/// Carry this many people from the boat's bank to the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transfer {
    pub missionaries: u32,
    pub cannibals: u32,
}

/// A river crossing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiverCrossing {
    pub missionaries: u32,
    pub cannibals: u32,
    pub boat_size: u32,
}

impl RiverCrossing {
    /// Three missionaries, three cannibals, a boat for two.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            boat_size: 2,
        }
    }

    /// Everyone on the left bank with the boat.
    #[must_use]
    pub fn initial_state(&self) -> RiverState {
        RiverState {
            left_missionaries: self.missionaries,
            left_cannibals: self.cannibals,
            boat: Bank::Left,
        }
    }

    /// Everyone across, boat on the right.
    #[must_use]
    pub fn goal_state(&self) -> RiverState {
        RiverState {
            left_missionaries: 0,
            left_cannibals: 0,
            boat: Bank::Right,
        }
    }

    /// `(missionaries, cannibals)` standing on `bank` in `state`.
    #[must_use]
    pub fn on_bank(&self, state: &RiverState, bank: Bank) -> (u32, u32) {
        match bank {
            Bank::Left => (state.left_missionaries, state.left_cannibals),
            Bank::Right => (
                self.missionaries - state.left_missionaries,
                self.cannibals - state.left_cannibals,
            ),
        }
    }

    /// No bank has its missionaries outnumbered.
    #[must_use]
    pub fn is_safe(&self, state: &RiverState) -> bool {
        [Bank::Left, Bank::Right].into_iter().all(|bank| {
            let (m, c) = self.on_bank(state, bank);
            m == 0 || m >= c
        })
    }

    fn carry(state: &RiverState, transfer: &Transfer) -> RiverState {
        let (left_missionaries, left_cannibals) = match state.boat {
            Bank::Left => (
                state.left_missionaries - transfer.missionaries,
                state.left_cannibals - transfer.cannibals,
            ),
            Bank::Right => (
                state.left_missionaries + transfer.missionaries,
                state.left_cannibals + transfer.cannibals,
            ),
        };
        RiverState {
            left_missionaries,
            left_cannibals,
            boat: state.boat.opposite(),
        }
    }
}

impl SearchDomain for RiverCrossing {
    type State = RiverState;
    type Action = Transfer;

    /// Missionaries in the outer loop, cannibals in the inner one, each from
    /// zero up to what the boat's bank and the boat allow.
    fn valid_actions(&self, state: &RiverState) -> Vec<Transfer> {
        let (here_m, here_c) = self.on_bank(state, state.boat);
        let max_m = here_m.min(self.boat_size);
        let max_c = here_c.min(self.boat_size);

        let mut actions = Vec::new();
        for missionaries in 0..=max_m {
            for cannibals in 0..=max_c {
                let aboard = missionaries + cannibals;
                if aboard == 0 || aboard > self.boat_size {
                    continue;
                }
                let transfer = Transfer {
                    missionaries,
                    cannibals,
                };
                if self.is_safe(&Self::carry(state, &transfer)) {
                    actions.push(transfer);
                }
            }
        }
        actions
    }

    fn apply(&self, state: &RiverState, action: &Transfer) -> RiverState {
        Self::carry(state, action)
    }

    fn is_goal(&self, state: &RiverState) -> bool {
        state.left_missionaries == 0 && state.left_cannibals == 0
    }
}
