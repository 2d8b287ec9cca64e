use crate::logical_step::all_naked_singles::AllNakedSingles;
use crate::logical_step::hidden_single::HiddenSingle;
use crate::logical_step::pointing::Pointing;
use crate::logical_step::simple_cell_forcing::SimpleCellForcing;
use crate::prelude::*;

/// Tries each candidate on a cloned board and runs the cheap propagation
/// subset (singles, pointing, cell forcing); if that collapses into a
/// contradiction, the candidate is eliminated from the real board.
///
/// This is the most expensive technique and runs last. Cells flagged as
/// powerful by constraints are tried first, then the rest in order of fewest
/// candidates.
#[derive(Debug)]
pub struct ContradictionSearch;

impl ContradictionSearch {
    fn propagate(board: &mut Board) -> bool {
        loop {
            if AllNakedSingles.run(board, false).is_invalid() {
                return false;
            }
            match HiddenSingle.run(board, false) {
                LogicalStepResult::Invalid(_) => return false,
                LogicalStepResult::Changed(_) => continue,
                LogicalStepResult::None => {}
            }
            match Pointing.run(board, false) {
                LogicalStepResult::Invalid(_) => return false,
                LogicalStepResult::Changed(_) => continue,
                LogicalStepResult::None => {}
            }
            match SimpleCellForcing.run(board, false) {
                LogicalStepResult::Invalid(_) => return false,
                LogicalStepResult::Changed(_) => continue,
                LogicalStepResult::None => return true,
            }
        }
    }
}

impl LogicalStep for ContradictionSearch {
    fn name(&self) -> &'static str {
        "Contradiction"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();

        let mut cells: Vec<CellIndex> = board_data
            .powerful_cells()
            .iter()
            .copied()
            .filter(|&cell| !board.cell(cell).is_solved())
            .collect();

        let mut rest: Vec<(usize, CellIndex)> = board
            .all_cell_masks()
            .filter(|(cell, mask)| !mask.is_solved() && !cells.contains(cell))
            .map(|(cell, mask)| (mask.count(), cell))
            .collect();
        rest.sort();
        cells.extend(rest.into_iter().map(|(_, cell)| cell));

        for cell in cells {
            for value in board.cell(cell) {
                let mut test_board = board.clone();
                let contradiction = if !test_board.set_solved(cell, value) {
                    true
                } else {
                    !Self::propagate(&mut test_board)
                };

                if contradiction {
                    let candidate = cell.candidate(value);
                    let desc = generate_description.then(|| {
                        let mut elims = EliminationList::new();
                        elims.add(candidate);
                        LogicalStepDesc::from_elims(
                            &format!("Setting {} causes a contradiction", candidate),
                            &elims,
                        )
                    });
                    return if board.clear_value(cell, value) {
                        LogicalStepResult::Changed(desc)
                    } else {
                        LogicalStepResult::Invalid(desc)
                    };
                }
            }
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contradiction_found() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Restrict r1c1 and r1c2 to {1,2}. Any other cell of row 1 set to 1
        // or 2 would strip the pair bare, so those candidates die under
        // trial propagation.
        assert!(board.keep_mask(cu.cell(0, 0), ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cu.cell(0, 1), ValueMask::from_values(&[1, 2])).is_changed());

        let result = ContradictionSearch.run(&mut board, true);
        assert!(result.is_changed());
    }

    #[test]
    fn test_no_contradiction_on_clean_board() {
        let mut board = Board::default();
        assert!(ContradictionSearch.run(&mut board, true).is_none());
    }
}
