//! Contains [`SingleSolutionResult`] for solves that produce one board.

use crate::prelude::*;

/// How a single-solution search ended: with a board, with an exhausted
/// search space, or cut short by cancellation.
#[derive(Clone)]
pub enum SingleSolutionResult {
    /// The search space was exhausted without finding a solution.
    None,
    /// A solution was found.
    Solved(Box<Board>),
    /// The cancellation token tripped before anything was found.
    Canceled,
}

impl SingleSolutionResult {
    pub fn is_none(&self) -> bool {
        matches!(self, SingleSolutionResult::None)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SingleSolutionResult::Solved(_))
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, SingleSolutionResult::Canceled)
    }

    /// The solved board, when one was found.
    pub fn board(&self) -> Option<&Board> {
        match self {
            SingleSolutionResult::Solved(board) => Some(board),
            _ => None,
        }
    }
}

impl std::fmt::Display for SingleSolutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingleSolutionResult::Solved(board) => write!(f, "{}", board),
            SingleSolutionResult::None => write!(f, "No solution"),
            SingleSolutionResult::Canceled => write!(f, "Canceled"),
        }
    }
}
