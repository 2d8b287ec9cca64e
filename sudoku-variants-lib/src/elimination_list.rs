//! Contains [`EliminationList`] for accumulating eliminated candidates.

use crate::prelude::*;
use itertools::Itertools;
use std::{collections::BTreeSet, fmt::Display};

/// A sorted set of candidates to eliminate, with a compact human-readable
/// [`Display`] used throughout logical step descriptions.
///
/// Use [`EliminationList::execute`] to apply the eliminations to a board.
#[derive(Clone, Debug, Default)]
pub struct EliminationList {
    candidates: BTreeSet<CandidateIndex>,
}

impl EliminationList {
    /// Creates an empty elimination list.
    pub fn new() -> EliminationList {
        EliminationList { candidates: BTreeSet::new() }
    }

    /// Gets the number of candidates in the list.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Gets the candidates in the list.
    pub fn candidates(&self) -> &BTreeSet<CandidateIndex> {
        &self.candidates
    }

    /// Returns true if the list contains the given candidate.
    pub fn contains(&self, candidate: CandidateIndex) -> bool {
        self.candidates.contains(&candidate)
    }

    /// Iterates the candidates in the list.
    pub fn iter(&self) -> impl Iterator<Item = CandidateIndex> + '_ {
        self.candidates.iter().copied()
    }

    /// Adds a candidate to the list.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::prelude::*;
    /// let cu = CellUtility::new(9);
    /// let mut elims = EliminationList::new();
    /// elims.add(cu.cell(3, 4).candidate(3));
    /// assert_eq!(elims.to_string(), "-3r4c5");
    /// ```
    pub fn add(&mut self, candidate: CandidateIndex) {
        self.candidates.insert(candidate);
    }

    /// Adds all the given candidates to the list.
    pub fn add_all(&mut self, candidates: &[CandidateIndex]) {
        self.candidates.extend(candidates.iter());
    }

    /// Adds a candidate to the list by cell and value.
    pub fn add_cell_value(&mut self, cell: CellIndex, value: usize) {
        self.add(cell.candidate(value));
    }

    /// Removes a candidate from the list.
    /// Returns true if the candidate was present.
    pub fn remove(&mut self, candidate: CandidateIndex) -> bool {
        self.candidates.remove(&candidate)
    }

    /// Executes the eliminations on a board through the kernel.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::prelude::*;
    /// let mut board = Board::default();
    /// let cu = CellUtility::new(board.size());
    ///
    /// let mut elims = EliminationList::new();
    /// elims.add(cu.cell(0, 0).candidate(1));
    /// elims.add(cu.cell(3, 4).candidate(3));
    ///
    /// assert!(elims.execute(&mut board).is_changed());
    /// assert!(!board.has_candidate(cu.cell(0, 0).candidate(1)));
    /// assert!(!board.has_candidate(cu.cell(3, 4).candidate(3)));
    ///
    /// // Eliminating everything from a cell makes the board invalid.
    /// for value in 1..=9 {
    ///     elims.add(cu.cell(0, 0).candidate(value));
    /// }
    /// assert!(elims.execute(&mut board).is_invalid());
    /// ```
    pub fn execute(&self, board: &mut Board) -> LogicResult {
        let mut result = LogicResult::None;
        for &candidate in self.candidates.iter() {
            if board.has_candidate(candidate) {
                if board.clear_candidate(candidate) {
                    result = result.combine(LogicResult::Changed);
                } else {
                    return LogicResult::Invalid;
                }
            }
        }

        result
    }
}

impl From<BTreeSet<CandidateIndex>> for EliminationList {
    fn from(candidates: BTreeSet<CandidateIndex>) -> Self {
        Self { candidates }
    }
}

impl FromIterator<CandidateIndex> for EliminationList {
    fn from_iter<I>(iter: I) -> EliminationList
    where
        I: IntoIterator<Item = CandidateIndex>,
    {
        EliminationList { candidates: iter.into_iter().collect() }
    }
}

impl Display for EliminationList {
    /// Formats as a semicolon-separated list grouped by value, for example
    /// `-1r1c1;-2r12c1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.candidates.is_empty() {
            return write!(f, "No eliminations");
        }

        let board_size = self.candidates.iter().next().map(|c| c.size()).unwrap_or(9);
        let cu = CellUtility::new(board_size);
        let mut cells_by_value: Vec<Vec<CellIndex>> = vec![vec![]; board_size];
        for &candidate in self.candidates.iter() {
            let (cell, value) = candidate.cell_index_and_value();
            cells_by_value[value - 1].push(cell);
        }

        let mut descs: Vec<String> = Vec::new();
        for value in 1..=board_size {
            if !cells_by_value[value - 1].is_empty() {
                cells_by_value[value - 1].sort();
                descs.push(format!("-{}{}", value, cu.compact_name(&cells_by_value[value - 1])));
            }
        }

        write!(f, "{}", descs.iter().join(";"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let cu = CellUtility::new(9);
        let mut elims = EliminationList::new();
        assert_eq!(elims.to_string(), "No eliminations");

        elims.add(cu.cell(0, 0).candidate(1));
        elims.add(cu.cell(0, 1).candidate(1));
        elims.add(cu.cell(0, 2).candidate(1));
        assert_eq!(elims.to_string(), "-1r1c123");

        elims.add(cu.cell(1, 0).candidate(2));
        assert_eq!(elims.to_string(), "-1r1c123;-2r2c1");
    }

    #[test]
    fn test_add_remove() {
        let cu = CellUtility::new(9);
        let mut elims = EliminationList::new();
        let candidate = cu.cell(3, 4).candidate(3);

        elims.add_cell_value(cu.cell(3, 4), 3);
        assert!(elims.contains(candidate));
        assert_eq!(elims.len(), 1);

        assert!(elims.remove(candidate));
        assert!(!elims.remove(candidate));
        assert!(elims.is_empty());
    }
}
