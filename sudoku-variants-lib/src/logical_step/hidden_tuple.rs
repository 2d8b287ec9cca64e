use crate::prelude::*;
use itertools::Itertools;

const TUPLE_NAMES: [&str; 4] = ["Pair", "Triple", "Quadruple", "Quintuple"];

/// A "Hidden Tuple" is a set of k values within a house which between them
/// fit into only k cells. Every other candidate is eliminated from those
/// cells.
///
/// Sizes 2 through 5 are checked, smallest first.
#[derive(Debug)]
pub struct HiddenTuple;

impl LogicalStep for HiddenTuple {
    fn name(&self) -> &'static str {
        "Hidden Tuple"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();
        let size = board.size();
        let cu = board.cell_utility();

        for tuple_size in 2..=5usize {
            for house in board_data.houses() {
                // Positions of each unplaced value as a bit set over the
                // house's cell slots.
                let mut positions = vec![0u32; size + 1];
                for (slot, &cell) in house.cells().iter().enumerate() {
                    let mask = board.cell(cell);
                    if mask.is_solved() {
                        continue;
                    }
                    for value in mask {
                        positions[value] |= 1 << slot;
                    }
                }

                let candidate_values: Vec<usize> = (1..=size)
                    .filter(|&value| {
                        let count = positions[value].count_ones() as usize;
                        count >= 2 && count <= tuple_size
                    })
                    .collect();

                if candidate_values.len() < tuple_size {
                    continue;
                }

                for combination in candidate_values.iter().combinations(tuple_size) {
                    let combined_positions = combination
                        .iter()
                        .fold(0u32, |acc, &&value| acc | positions[value]);
                    if combined_positions.count_ones() as usize != tuple_size {
                        continue;
                    }

                    let value_mask: ValueMask =
                        combination.iter().map(|&&value| value).collect();

                    let mut elims = EliminationList::new();
                    for (slot, &cell) in house.cells().iter().enumerate() {
                        if combined_positions & (1 << slot) == 0 {
                            continue;
                        }
                        for value in board.cell(cell) & !value_mask {
                            elims.add(cell.candidate(value));
                        }
                    }

                    if elims.is_empty() {
                        continue;
                    }

                    let desc = generate_description.then(|| {
                        let cells: Vec<CellIndex> = house
                            .cells()
                            .iter()
                            .enumerate()
                            .filter(|&(slot, _)| combined_positions & (1 << slot) != 0)
                            .map(|(_, &cell)| cell)
                            .collect();
                        LogicalStepDesc::from_elims(
                            &format!(
                                "{} {} in {} within {}",
                                TUPLE_NAMES[tuple_size - 2],
                                value_mask,
                                cu.compact_name(&cells),
                                house
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
    fn test_hidden_pair() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Remove 1 and 2 from every cell of row 1 except r1c1 and r1c5.
        for col in [1, 2, 3, 5, 6, 7, 8] {
            assert!(board.clear_value(cu.cell(0, col), 1));
            assert!(board.clear_value(cu.cell(0, col), 2));
        }

        let result = HiddenTuple.run(&mut board, true);
        assert!(result.is_changed());

        // r1c1 and r1c5 now hold only {1,2}.
        assert_eq!(board.cell(cu.cell(0, 0)), ValueMask::from_values(&[1, 2]));
        assert_eq!(board.cell(cu.cell(0, 4)), ValueMask::from_values(&[1, 2]));

        let desc = result.to_string();
        assert!(desc.starts_with("Pair 1,2 in r1c15 within Row 1"), "{}", desc);
    }

    #[test]
    fn test_no_hidden_tuple_on_clean_board() {
        let mut board = Board::default();
        assert!(HiddenTuple.run(&mut board, true).is_none());
    }
}
