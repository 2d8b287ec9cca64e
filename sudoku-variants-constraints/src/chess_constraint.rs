//! Contains the [`ChessConstraint`] struct for chess-move constraints.

use sudoku_variants_lib::prelude::*;

/// A [`Constraint`] for rules of the form "cells a chess move apart cannot
/// hold the same value": anti-king, anti-knight, and friends.
///
/// The constraint only reports which cells see each other; the engine turns
/// that into same-value weak links, and cell forcing, chains, and the rest
/// of the techniques pick them up from there.
#[derive(Debug)]
pub struct ChessConstraint {
    specific_name: String,
    offsets: Vec<(isize, isize)>,
}

impl ChessConstraint {
    /// Creates a new [`ChessConstraint`] with arbitrary offsets.
    pub fn new(specific_name: &str, offsets: Vec<(isize, isize)>) -> Self {
        Self { specific_name: specific_name.to_owned(), offsets }
    }

    /// Creates a new [`ChessConstraint`] from one offset expanded to all its
    /// reflections and rotations.
    pub fn from_symmetric_offset(specific_name: &str, offset: (isize, isize)) -> Self {
        let mut offsets = vec![offset, (offset.1, offset.0)];
        if offset.0 != 0 {
            offsets.push((-offset.0, offset.1));
            offsets.push((offset.1, -offset.0));
        }
        if offset.1 != 0 {
            offsets.push((offset.0, -offset.1));
            offsets.push((-offset.1, offset.0));
        }
        if offset.0 != 0 && offset.1 != 0 {
            offsets.push((-offset.0, -offset.1));
            offsets.push((-offset.1, -offset.0));
        }
        Self::new(specific_name, offsets)
    }

    /// The standard "anti-king" constraint.
    pub fn anti_king() -> Self {
        Self::from_symmetric_offset("Anti-King", (1, 1))
    }

    /// The standard "anti-knight" constraint.
    pub fn anti_knight() -> Self {
        Self::from_symmetric_offset("Anti-Knight", (1, 2))
    }

    /// An anti-taxicab constraint: cells at the given taxicab distance must
    /// differ.
    pub fn anti_taxicab(distance: usize) -> Self {
        let distance = distance as isize;
        let mut offsets = Vec::new();
        for row_offset in -distance..=distance {
            for column_offset in -distance..=distance {
                if row_offset == 0 || column_offset == 0 {
                    continue;
                }
                if row_offset.abs() + column_offset.abs() == distance {
                    offsets.push((row_offset, column_offset));
                }
            }
        }

        Self::new(&format!("Anti-Taxicab {}", distance), offsets)
    }
}

impl Constraint for ChessConstraint {
    fn name(&self) -> &str {
        &self.specific_name
    }

    fn seen_cells(&self, _board: &Board, cell: CellIndex) -> Vec<CellIndex> {
        self.offsets
            .iter()
            .filter_map(|&(row_offset, column_offset)| cell.offset(row_offset, column_offset))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::orthogonal_pairs_constraint::OrthogonalPairsConstraint;
    use crate::standard_pair_type::StandardPairType;

    #[test]
    fn test_anti_knight_links() {
        let solver = SolverBuilder::default()
            .with_constraint(Arc::new(ChessConstraint::anti_knight()))
            .build()
            .unwrap();
        let cu = solver.cell_utility();
        let board_data = solver.board().data();

        // r5c5 is a knight's move from r3c4, so they cannot share a value.
        for value in 1..=9 {
            assert!(board_data.has_weak_link(
                cu.cell(4, 4).candidate(value),
                cu.cell(2, 3).candidate(value)
            ));
        }
        // r5c5 and r3c3 share only the box rules.
        assert!(!board_data.has_weak_link(cu.cell(4, 4).candidate(1), cu.cell(2, 2).candidate(1)));
    }

    fn miracle_builder() -> SolverBuilder {
        SolverBuilder::default()
            .with_constraint(Arc::new(ChessConstraint::anti_king()))
            .with_constraint(Arc::new(ChessConstraint::anti_knight()))
            .with_constraint(Arc::new(OrthogonalPairsConstraint::from_standard_markers(
                9,
                "Nonconsecutive",
                &[],
                &[StandardPairType::Diff(1)],
            )))
    }

    #[test]
    fn test_miracle_grid_count() {
        // With anti-king, anti-knight, and nonconsecutive rules, an empty
        // grid has exactly 72 completions.
        let solver = miracle_builder().build().unwrap();
        let count = solver.find_solution_count(0, None, Cancellation::default());
        assert_eq!(count, SolutionCountResult::exact(72));
    }

    #[test]
    fn test_miracle_puzzle() {
        // Two givens pin the grid down to a single solution.
        let solver = {
            let builder = miracle_builder();
            let cu = CellUtility::new(9);
            builder.with_given(cu.cell(4, 2), 1).with_given(cu.cell(5, 6), 2).build().unwrap()
        };
        let cu = solver.cell_utility();

        let count = solver.find_solution_count(0, None, Cancellation::default());
        assert_eq!(count, SolutionCountResult::exact(1));

        let result = solver.find_first_solution(Cancellation::default());
        let board = result.board().expect("the miracle puzzle has a solution");
        assert_eq!(board.cell(cu.cell(4, 2)).value(), 1);
        assert_eq!(board.cell(cu.cell(5, 6)).value(), 2);

        // The same puzzle falls to the logical engine alone.
        let mut solver = solver;
        let logical = solver.run_logical_solve(Cancellation::default());
        assert!(logical.is_solved(), "logical solve stalled:\n{}", logical);
        assert_eq!(solver.board().to_string(), board.to_string());
    }
}
