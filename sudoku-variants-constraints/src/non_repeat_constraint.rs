//! Contains the [`NonRepeatConstraint`] struct for groups of cells which
//! cannot repeat values.

use sudoku_variants_lib::prelude::*;

/// A [`Constraint`] for a plain group of cells in which values cannot
/// repeat: diagonals, extra regions, and similar.
///
/// When the group has as many cells as the board has values, it is also a
/// full house, and every house-based technique applies to it.
#[derive(Debug)]
pub struct NonRepeatConstraint {
    specific_name: String,
    kind: HouseKind,
    cells: Vec<CellIndex>,
}

impl NonRepeatConstraint {
    pub fn new(specific_name: &str, kind: HouseKind, cells: Vec<CellIndex>) -> Self {
        Self { specific_name: specific_name.to_owned(), kind, cells }
    }

    /// The positive diagonal, from the bottom-left corner to the top-right.
    pub fn from_diagonalp(size: usize) -> Self {
        let cu = CellUtility::new(size);
        let cells = (0..size).map(|i| cu.cell(size - i - 1, i)).collect();
        Self::new("Diagonal+", HouseKind::Diagonal, cells)
    }

    /// The negative diagonal, from the top-left corner to the bottom-right.
    pub fn from_diagonaln(size: usize) -> Self {
        let cu = CellUtility::new(size);
        let cells = (0..size).map(|i| cu.cell(i, i)).collect();
        Self::new("Diagonal-", HouseKind::Diagonal, cells)
    }

    /// An extra region of arbitrary cells.
    pub fn extra_region(index: usize, cells: Vec<CellIndex>) -> Self {
        Self::new(&format!("Extra Region {}", index + 1), HouseKind::Extra, cells)
    }
}

impl Constraint for NonRepeatConstraint {
    fn name(&self) -> &str {
        self.specific_name.as_str()
    }

    fn get_weak_links(&self, board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
        let size = board.size();
        if self.cells.len() > 1 && self.cells.len() <= size {
            weak_links_for_nonrepeat(size, self.cells.iter().copied())
        } else {
            Vec::new()
        }
    }

    fn get_houses(&self, size: usize) -> Vec<House> {
        if self.cells.len() == size {
            vec![House::new(self.specific_name.as_str(), self.kind, &self.cells)]
        } else {
            Vec::new()
        }
    }

    fn split_to_primitives(&self, _size: usize) -> Vec<ConstraintPrimitive> {
        vec![ConstraintPrimitive::new("nonrepeat", &self.cells)]
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_diagonals_form_houses() {
        let size = 9;
        let solver = SolverBuilder::new(size)
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonalp(size)))
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(size)))
            .build()
            .unwrap();
        assert_eq!(solver.board().houses().len(), 29);
    }

    #[test]
    fn test_diagonal_propagation() {
        let size = 9;
        let cu = CellUtility::new(size);
        let solver = SolverBuilder::new(size)
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(size)))
            .with_given(cu.cell(0, 0), 5)
            .build()
            .unwrap();

        // The 5 on r1c1 rules 5 out along the whole negative diagonal.
        for i in 1..size {
            assert!(!solver.board().cell(cu.cell(i, i)).has(5));
        }
        // An off-diagonal cell outside r1c1's houses keeps it.
        assert!(solver.board().cell(cu.cell(4, 5)).has(5));
    }

    #[test]
    fn test_duplicate_diagonals_are_dropped() {
        let size = 9;
        let solver = SolverBuilder::new(size)
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(size)))
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(size)))
            .build()
            .unwrap();
        // Identical primitives, so the second registration is ignored.
        assert_eq!(solver.board().constraints().len(), 1);
    }
}
