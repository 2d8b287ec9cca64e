use crate::prelude::*;

/// A "Hidden Single" is a value that can appear in only one cell of a house.
///
/// The per-house candidate counters make the scan cheap: a count of one is
/// either an already placed value or a hidden single, and a count of zero
/// means the house can no longer hold the value at all.
///
/// Constraints participate through [`Constraint::cells_must_contain`]: when
/// a constraint proves a value is forced into a single cell, that cell is
/// placed here as well.
#[derive(Debug)]
pub struct HiddenSingle;

impl LogicalStep for HiddenSingle {
    fn name(&self) -> &'static str {
        "Hidden Single"
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();
        let size = board.size();

        for (house_index, house) in board_data.houses().iter().enumerate() {
            for value in 1..=size {
                match board.house_candidate_count(house_index, value) {
                    0 => {
                        let desc = generate_description
                            .then(|| format!("{} has nowhere to place {}", house, value).into());
                        return LogicalStepResult::Invalid(desc);
                    }
                    1 => {
                        let Some(cell) = house
                            .cells()
                            .iter()
                            .copied()
                            .find(|&cell| board.cell(cell).has(value))
                        else {
                            continue;
                        };

                        if board.cell(cell).is_solved() {
                            continue;
                        }

                        if board.set_solved(cell, value) {
                            let desc = generate_description
                                .then(|| format!("In {}: {}={}", house, cell, value).into());
                            return LogicalStepResult::Changed(desc);
                        } else {
                            let desc = generate_description.then(|| {
                                format!("In {}: {} cannot be set to {}", house, cell, value).into()
                            });
                            return LogicalStepResult::Invalid(desc);
                        }
                    }
                    _ => {}
                }
            }
        }

        // Constraint-forced placements: a value that must land in exactly
        // one of a constraint's cells.
        for constraint in board_data.constraints() {
            for value in 1..=size {
                let cells = constraint.cells_must_contain(board, value);
                if cells.len() == 1 {
                    let cell = cells[0];
                    if board.cell(cell).is_solved() {
                        continue;
                    }
                    if board.set_solved(cell, value) {
                        let desc = generate_description.then(|| {
                            format!("{} requires {}={}", constraint.name(), cell, value).into()
                        });
                        return LogicalStepResult::Changed(desc);
                    } else {
                        let desc = generate_description.then(|| {
                            format!("{} cannot place {}={}", constraint.name(), cell, value).into()
                        });
                        return LogicalStepResult::Invalid(desc);
                    }
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
    fn test_hidden_single() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        assert!(HiddenSingle.run(&mut board, true).is_none());

        // Clear 9 from all cells in row 1 except r1c1.
        board.clear_candidates((1..=8).map(|col| cu.cell(0, col).candidate(9)));

        let result = HiddenSingle.run(&mut board, true);
        assert!(result.is_changed());
        assert!(result.description().is_some());
        assert_eq!(result.to_string(), "In Row 1: r1c1=9");
    }

    #[test]
    fn test_hidden_single_invalid() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Clear 9 from every cell in row 1. The row can no longer hold a 9.
        board.clear_candidates((0..=8).map(|col| cu.cell(0, col).candidate(9)));

        let result = HiddenSingle.run(&mut board, true);
        assert!(result.is_invalid());
        assert_eq!(result.to_string(), "Row 1 has nowhere to place 9");
    }
}
