//! Contains the [`KillerCageConstraint`] struct for killer cages.

use sudoku_variants_lib::prelude::*;

/// A [`Constraint`] for a killer cage: a group of non-repeating cells,
/// usually with a required sum.
///
/// The sum reasoning is [`SumCellsHelper`]; the cage itself only contributes
/// the non-repeat links, a full house when the cage spans every value, and
/// the final sum validation.
#[derive(Debug)]
pub struct KillerCageConstraint {
    specific_name: String,
    cells: Vec<CellIndex>,
    sum: Option<usize>,
}

impl KillerCageConstraint {
    pub fn new(cells: Vec<CellIndex>, sum: Option<usize>) -> Self {
        let specific_name = match sum {
            Some(sum) => format!("Killer Cage {} at {}", sum, cells[0]),
            None => format!("Killer Cage at {}", cells[0]),
        };
        Self { specific_name, cells, sum }
    }

    fn solved_sum(&self, board: &Board) -> Option<usize> {
        let mut total = 0;
        for &cell in &self.cells {
            let mask = board.cell(cell);
            if !mask.is_solved() {
                return None;
            }
            total += mask.value();
        }
        Some(total)
    }
}

impl Constraint for KillerCageConstraint {
    fn name(&self) -> &str {
        &self.specific_name
    }

    fn init_board(&self, board: &mut Board) -> LogicResult {
        match self.sum {
            Some(sum) => SumCellsHelper::new(board, &self.cells).init(board, &[sum]),
            None => LogicResult::None,
        }
    }

    fn enforce(&self, board: &Board, cell: CellIndex, _value: usize) -> LogicResult {
        if !self.cells.contains(&cell) {
            return LogicResult::None;
        }

        let Some(sum) = self.sum else {
            return LogicResult::None;
        };

        match self.solved_sum(board) {
            Some(total) if total != sum => LogicResult::Invalid,
            _ => LogicResult::None,
        }
    }

    fn step_logic(
        &self,
        board: &mut Board,
        desc: Option<&mut LogicalStepDescList>,
        _is_brute_forcing: bool,
    ) -> LogicResult {
        match self.sum {
            Some(sum) => SumCellsHelper::new(board, &self.cells).step_logic(board, &[sum], desc),
            None => LogicResult::None,
        }
    }

    fn get_weak_links(&self, board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
        weak_links_for_nonrepeat(board.size(), self.cells.iter().copied())
    }

    fn get_houses(&self, size: usize) -> Vec<House> {
        if self.cells.len() == size {
            vec![House::new(&self.specific_name, HouseKind::Extra, &self.cells)]
        } else {
            Vec::new()
        }
    }

    fn cells_must_contain(&self, board: &Board, value: usize) -> Vec<CellIndex> {
        if self.sum.is_none() {
            return Vec::new();
        }
        self.cells_must_contain_by_running_logic(board, &self.cells, value)
    }

    fn split_to_primitives(&self, _size: usize) -> Vec<ConstraintPrimitive> {
        let mut primitives = vec![ConstraintPrimitive::new("nonrepeat", &self.cells)];
        if let Some(sum) = self.sum {
            primitives.push(ConstraintPrimitive::new(&format!("sum{}", sum), &self.cells));
        }
        primitives
    }
}
