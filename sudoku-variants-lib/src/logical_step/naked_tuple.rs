use crate::prelude::*;
use itertools::Itertools;

const TUPLE_NAMES: [&str; 4] = ["Pair", "Triple", "Quadruple", "Quintuple"];

/// A "Naked Tuple" is a set of k cells within a house whose candidates unite
/// to exactly k values. Those values are locked into the set and eliminated
/// from the rest of the house.
///
/// Sizes 2 through 5 are checked, smallest first.
#[derive(Debug)]
pub struct NakedTuple;

impl LogicalStep for NakedTuple {
    fn name(&self) -> &'static str {
        "Naked Tuple"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();
        let cu = board.cell_utility();

        for tuple_size in 2..=5usize {
            for house in board_data.houses() {
                let unsolved: Vec<(CellIndex, ValueMask)> = house
                    .cells()
                    .iter()
                    .map(|&cell| (cell, board.cell(cell)))
                    .filter(|(_, mask)| !mask.is_solved())
                    .collect();

                if unsolved.len() <= tuple_size {
                    continue;
                }

                for combination in unsolved.iter().combinations(tuple_size) {
                    let combined = combination
                        .iter()
                        .fold(ValueMask::new(), |acc, entry| acc | entry.1);
                    if combined.count() != tuple_size {
                        continue;
                    }

                    let mut elims = EliminationList::new();
                    for &(cell, mask) in unsolved.iter() {
                        if combination.iter().any(|entry| entry.0 == cell) {
                            continue;
                        }
                        for value in mask & combined {
                            elims.add(cell.candidate(value));
                        }
                    }

                    if elims.is_empty() {
                        continue;
                    }

                    let desc = generate_description.then(|| {
                        let cells: Vec<CellIndex> =
                            combination.iter().map(|entry| entry.0).collect();
                        LogicalStepDesc::from_elims(
                            &format!(
                                "{} {} in {} within {}",
                                TUPLE_NAMES[tuple_size - 2],
                                combined,
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
    fn test_naked_pair() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Two cells in row 1 restricted to {1,2}.
        assert!(board.keep_mask(cu.cell(0, 0), ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cu.cell(0, 4), ValueMask::from_values(&[1, 2])).is_changed());

        let result = NakedTuple.run(&mut board, true);
        assert!(result.is_changed());

        // 1 and 2 are gone from the rest of row 1.
        for col in [1, 2, 3, 5, 6, 7, 8] {
            assert!(!board.cell(cu.cell(0, col)).has(1));
            assert!(!board.cell(cu.cell(0, col)).has(2));
        }
        // The pair itself is untouched.
        assert_eq!(board.cell(cu.cell(0, 0)), ValueMask::from_values(&[1, 2]));
        assert_eq!(board.cell(cu.cell(0, 4)), ValueMask::from_values(&[1, 2]));

        let desc = result.to_string();
        assert!(desc.starts_with("Pair 1,2 in r1c15 within Row 1"), "{}", desc);
    }

    #[test]
    fn test_no_tuple_on_clean_board() {
        let mut board = Board::default();
        assert!(NakedTuple.run(&mut board, true).is_none());
    }
}
