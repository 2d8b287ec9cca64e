use crate::prelude::*;

/// Locked candidates: when every remaining position for a value in one house
/// falls inside another house, the value is eliminated from the rest of that
/// other house. Covers both the "pointing" and "claiming" directions.
///
/// Cheap enough to run during brute force, where it prunes far more than it
/// costs.
#[derive(Debug)]
pub struct Pointing;

impl LogicalStep for Pointing {
    fn name(&self) -> &'static str {
        "Pointing"
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();
        let size = board.size();
        let cu = board.cell_utility();

        for (house_index, house) in board_data.houses().iter().enumerate() {
            for value in 1..=size {
                let count = board.house_candidate_count(house_index, value);
                if count < 2 || count > size / 2 {
                    continue;
                }

                let cells = board.cells_with_candidate_in_house(house, value);
                if cells.iter().any(|&cell| board.cell(cell).is_solved()) {
                    continue;
                }

                // Houses containing every one of those cells.
                let mut shared: Vec<usize> = board
                    .house_ids_for_cell(cells[0])
                    .iter()
                    .copied()
                    .filter(|&other_index| other_index != house_index)
                    .collect();
                for &cell in &cells[1..] {
                    let ids = board.house_ids_for_cell(cell);
                    shared.retain(|other_index| ids.contains(other_index));
                }

                for other_index in shared {
                    let other_house = &board_data.houses()[other_index];
                    let mut elims = EliminationList::new();
                    for &cell in other_house.cells() {
                        if !house.contains(cell) && board.cell(cell).has(value) {
                            elims.add(cell.candidate(value));
                        }
                    }

                    if elims.is_empty() {
                        continue;
                    }

                    let desc = generate_description.then(|| {
                        LogicalStepDesc::from_elims(
                            &format!(
                                "{}s in {} are confined to {}",
                                value,
                                house,
                                cu.compact_name(&cells)
                            ),
                            &elims,
                        )
                    });

                    return match elims.execute(board) {
                        LogicResult::Invalid => LogicalStepResult::Invalid(desc),
                        _ => LogicalStepResult::Changed(desc),
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
    fn test_pointing_pair() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Remove 5 from every box 1 cell except r1c1 and r1c2.
        for cell in [cu.cell(0, 2), cu.cell(1, 0), cu.cell(1, 1), cu.cell(1, 2), cu.cell(2, 0), cu.cell(2, 1), cu.cell(2, 2)] {
            assert!(board.clear_value(cell, 5));
        }

        // Box 1's 5s now live in r1c1 and r1c2, both in row 1.
        let result = Pointing.run(&mut board, true);
        assert!(result.is_changed());

        for col in 3..9 {
            assert!(!board.cell(cu.cell(0, col)).has(5), "5 should be gone from r1c{}", col + 1);
        }
        assert!(board.cell(cu.cell(0, 0)).has(5));
        assert!(board.cell(cu.cell(0, 1)).has(5));
    }

    #[test]
    fn test_no_pointing_on_clean_board() {
        let mut board = Board::default();
        assert!(Pointing.run(&mut board, true).is_none());
    }
}
