//! Contains the [`DiagonalPairsConstraint`] struct for constraints on which
//! value combinations diagonally adjacent cells may hold.

use crate::standard_pair_type::StandardPairType;
use sudoku_variants_lib::prelude::*;

/// A [`Constraint`] forbidding the given pair predicates on every pair of
/// diagonally adjacent cells.
///
/// The diagonal counterpart of the negative form of
/// [`crate::orthogonal_pairs_constraint::OrthogonalPairsConstraint`]; the
/// usual instance is the diagonal-nonconsecutive rule,
/// `Diff(1)`.
#[derive(Debug)]
pub struct DiagonalPairsConstraint {
    specific_name: String,
    forbidden: Vec<StandardPairType>,
}

impl DiagonalPairsConstraint {
    pub fn new(specific_name: &str, forbidden: Vec<StandardPairType>) -> Self {
        Self { specific_name: specific_name.to_owned(), forbidden }
    }

    /// The standard diagonal-nonconsecutive constraint.
    pub fn nonconsecutive() -> Self {
        Self::new("Diagonal Nonconsecutive", vec![StandardPairType::Diff(1)])
    }
}

impl Constraint for DiagonalPairsConstraint {
    fn name(&self) -> &str {
        &self.specific_name
    }

    fn get_weak_links(&self, board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
        let size = board.size();
        let cu = board.cell_utility();

        // For each value, the partners it may not sit next to diagonally.
        let mut forbidden_partners = vec![ValueMask::new(); size];
        for pair_type in &self.forbidden {
            let pairs = pair_type.candidate_pairs(size);
            for value in 1..=size {
                forbidden_partners[value - 1] =
                    forbidden_partners[value - 1] | pairs[value - 1].without(value);
            }
        }

        let mut result = Vec::new();
        for cell0 in cu.all_cells() {
            for cell1 in cell0.diagonally_adjacent_cells() {
                if cell0 > cell1 {
                    continue;
                }
                for value in 1..=size {
                    for other_value in forbidden_partners[value - 1] {
                        result.push((cell0.candidate(value), cell1.candidate(other_value)));
                        result.push((cell1.candidate(value), cell0.candidate(other_value)));
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_diagonal_nonconsecutive_links() {
        let cu = CellUtility::new(9);
        let solver = SolverBuilder::default()
            .with_constraint(Arc::new(DiagonalPairsConstraint::nonconsecutive()))
            .with_given(cu.cell(4, 4), 5)
            .build()
            .unwrap();

        // Diagonal neighbors of the 5 lose 4 and 6.
        for cell in cu.cell(4, 4).diagonally_adjacent_cells() {
            assert!(!solver.board().cell(cell).has(4), "{} should not allow 4", cell);
            assert!(!solver.board().cell(cell).has(6), "{} should not allow 6", cell);
        }
        // Orthogonal neighbors only lose the 5 itself.
        assert!(solver.board().cell(cu.cell(4, 5)).has(4));
        assert!(solver.board().cell(cu.cell(4, 5)).has(6));
    }

    #[test]
    fn test_diagonal_nonconsecutive_puzzle() {
        let givens =
            "500000000000000000004000000000080000010200000000956000000000080008304000000000290";
        let solution =
            "572869431981432765634175829365781942819243657427956318246597183198324576753618294";

        let solver = SolverBuilder::default()
            .with_constraint(Arc::new(DiagonalPairsConstraint::nonconsecutive()))
            .with_givens_string(givens)
            .build()
            .unwrap();

        let result = solver.find_first_solution(Cancellation::default());
        assert!(result.is_solved());
        assert_eq!(result.board().unwrap().to_string(), solution);

        let count = solver.find_solution_count(0, None, Cancellation::default());
        assert_eq!(count, SolutionCountResult::exact(1));
    }
}
