use crate::prelude::*;
use itertools::Itertools;

const FISH_NAMES: [&str; 3] = ["X-Wing", "Swordfish", "Jellyfish"];

/// Fishes over rows and columns for a single value: when n base lines hold
/// the value in only n cover lines, the value is eliminated from the rest of
/// the cover lines. Sizes 2 (X-Wing) through 4 (Jellyfish) are checked, in
/// both orientations.
#[derive(Debug)]
pub struct Fish;

impl Fish {
    // Positions of the value per line; `transposed` swaps the roles of rows
    // and columns. Lines containing the placed value report no positions.
    fn line_positions(board: &Board, value: usize, transposed: bool) -> Vec<u32> {
        let size = board.size();
        let cu = board.cell_utility();
        let mut positions = vec![0u32; size];

        for line in 0..size {
            let mut line_mask = 0u32;
            let mut placed = false;
            for slot in 0..size {
                let cell = if transposed { cu.cell(slot, line) } else { cu.cell(line, slot) };
                let mask = board.cell(cell);
                if mask.has(value) {
                    if mask.is_solved() {
                        placed = true;
                        break;
                    }
                    line_mask |= 1 << slot;
                }
            }
            if !placed {
                positions[line] = line_mask;
            }
        }

        positions
    }

    fn find_fish(
        &self,
        board: &mut Board,
        value: usize,
        fish_size: usize,
        transposed: bool,
        generate_description: bool,
    ) -> LogicalStepResult {
        let size = board.size();
        let cu = board.cell_utility();
        let positions = Self::line_positions(board, value, transposed);

        let base_lines: Vec<usize> = (0..size)
            .filter(|&line| {
                let count = positions[line].count_ones() as usize;
                count >= 2 && count <= fish_size
            })
            .collect();

        if base_lines.len() < fish_size {
            return LogicalStepResult::None;
        }

        for combination in base_lines.iter().combinations(fish_size) {
            let cover = combination.iter().fold(0u32, |acc, &&line| acc | positions[line]);
            if cover.count_ones() as usize != fish_size {
                continue;
            }

            let mut elims = EliminationList::new();
            for line in 0..size {
                if combination.iter().any(|&&base| base == line) {
                    continue;
                }
                let extra = positions[line] & cover;
                for slot in 0..size {
                    if extra & (1 << slot) != 0 {
                        let cell =
                            if transposed { cu.cell(slot, line) } else { cu.cell(line, slot) };
                        elims.add(cell.candidate(value));
                    }
                }
            }

            if elims.is_empty() {
                continue;
            }

            let desc = generate_description.then(|| {
                let base_names = combination.iter().map(|&&line| line + 1).join(",");
                let cover_names = (0..size).filter(|&slot| cover & (1 << slot) != 0).map(|slot| slot + 1).join(",");
                let (base_kind, cover_kind) =
                    if transposed { ("columns", "rows") } else { ("rows", "columns") };
                LogicalStepDesc::from_elims(
                    &format!(
                        "{}: {} in {} {} and {} {}",
                        FISH_NAMES[fish_size - 2],
                        value,
                        base_kind,
                        base_names,
                        cover_kind,
                        cover_names
                    ),
                    &elims,
                )
            });

            return match elims.execute(board) {
                LogicResult::Invalid => LogicalStepResult::Invalid(desc),
                _ => LogicalStepResult::Changed(desc),
            };
        }

        LogicalStepResult::None
    }
}

impl LogicalStep for Fish {
    fn name(&self) -> &'static str {
        "Fish"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let size = board.size();

        for fish_size in 2..=4usize {
            for value in 1..=size {
                for transposed in [false, true] {
                    let result =
                        self.find_fish(board, value, fish_size, transposed, generate_description);
                    if !result.is_none() {
                        return result;
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
    fn test_x_wing() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Confine 5 in rows 1 and 5 to columns 2 and 7.
        for row in [0, 4] {
            for col in 0..9 {
                if col != 1 && col != 6 {
                    assert!(board.clear_value(cu.cell(row, col), 5));
                }
            }
        }

        let result = Fish.run(&mut board, true);
        assert!(result.is_changed());

        // 5 is eliminated from the rest of columns 2 and 7.
        for row in [1, 2, 3, 5, 6, 7, 8] {
            assert!(!board.cell(cu.cell(row, 1)).has(5), "5 should be gone from r{}c2", row + 1);
            assert!(!board.cell(cu.cell(row, 6)).has(5), "5 should be gone from r{}c7", row + 1);
        }
        assert!(board.cell(cu.cell(0, 1)).has(5));
        assert!(board.cell(cu.cell(4, 6)).has(5));

        let desc = result.to_string();
        assert!(desc.starts_with("X-Wing: 5 in rows 1,5 and columns 2,7"), "{}", desc);
    }

    #[test]
    fn test_no_fish_on_clean_board() {
        let mut board = Board::default();
        assert!(Fish.run(&mut board, true).is_none());
    }
}
