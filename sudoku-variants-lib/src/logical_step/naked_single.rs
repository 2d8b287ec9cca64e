use crate::prelude::*;

/// A "Naked Single" is a cell reduced to one candidate, which is placed.
///
/// The kernel promotes singletons during propagation, so during logical
/// solves this step chiefly reports cells that have run out of candidates
/// with a readable description.
#[derive(Debug)]
pub struct NakedSingle;

impl LogicalStep for NakedSingle {
    fn name(&self) -> &'static str {
        "Naked Single"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        for cell in board.all_cells() {
            let mask = board.cell(cell);
            if mask.is_solved() {
                continue;
            }

            if mask.is_empty() {
                let desc = generate_description
                    .then(|| format!("{} has no candidates", cell).into());
                return LogicalStepResult::Invalid(desc);
            }

            if mask.is_single() {
                let value = mask.value();
                if board.set_solved(cell, value) {
                    let desc =
                        generate_description.then(|| format!("{}={}", cell, value).into());
                    return LogicalStepResult::Changed(desc);
                } else {
                    let desc = generate_description
                        .then(|| format!("{} cannot be set to {}", cell, value).into());
                    return LogicalStepResult::Invalid(desc);
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
    fn test_naked_single_reports_dead_cell() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        assert!(NakedSingle.run(&mut board, true).is_none());

        assert!(board.keep_mask(cu.cell(0, 0), ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cu.cell(0, 0), ValueMask::from_values(&[3, 4])).is_invalid());

        let result = NakedSingle.run(&mut board, true);
        assert!(result.is_invalid());
        assert_eq!(result.to_string(), "r1c1 has no candidates");
    }
}
