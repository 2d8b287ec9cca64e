//! Contains [`TrueCandidatesCountResult`] for the true-candidates solve.

use crate::prelude::*;

/// The union of all solutions, with per-candidate solution counts.
#[derive(Clone)]
pub enum TrueCandidatesCountResult {
    /// No completion exists.
    None,
    /// The union board of all solutions, plus the number of solutions each
    /// candidate appears in, capped at the requested maximum. A solved
    /// union board means the puzzle is unique.
    Candidates(Box<Board>, Vec<usize>),
    /// The cancellation token tripped before the sweep finished.
    Canceled,
}

impl TrueCandidatesCountResult {
    pub fn is_none(&self) -> bool {
        matches!(self, TrueCandidatesCountResult::None)
    }

    pub fn is_candidates(&self) -> bool {
        matches!(self, TrueCandidatesCountResult::Candidates(_, _))
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, TrueCandidatesCountResult::Canceled)
    }

    /// The union board, when the sweep completed with solutions.
    pub fn board(&self) -> Option<&Board> {
        match self {
            TrueCandidatesCountResult::Candidates(board, _) => Some(board),
            _ => None,
        }
    }

    /// The per-candidate counts, when the sweep completed with solutions.
    pub fn candidate_counts(&self) -> Option<&[usize]> {
        match self {
            TrueCandidatesCountResult::Candidates(_, counts) => Some(counts),
            _ => None,
        }
    }
}
