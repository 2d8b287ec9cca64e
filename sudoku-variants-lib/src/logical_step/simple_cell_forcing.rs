use crate::prelude::*;

/// "Simple Cell Forcing" is when every candidate remaining in a cell has a
/// weak link to the same candidate elsewhere. Whatever the cell turns out to
/// be, that candidate is false, so it is eliminated.
///
/// This is where constraint-supplied weak links pay off: any rule encoded as
/// links participates without its own step logic.
#[derive(Debug)]
pub struct SimpleCellForcing;

impl LogicalStep for SimpleCellForcing {
    fn name(&self) -> &'static str {
        "Simple Cell Forcing"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let size = board.size();
        let cu = board.cell_utility();
        let board_data = board.data();

        for cell in board.all_cells() {
            let mask = board.cell(cell);
            if mask.is_solved() {
                continue;
            }

            // Whatever this cell turns out to be, the common links die.
            let elim_set = CandidateLinks::common_of(
                size,
                mask.into_iter().map(|value| board_data.weak_links_for(cu.candidate(cell, value))),
            );
            if elim_set.is_empty() {
                continue;
            }

            let elims = elim_set.to_elimination_list(board);
            if !elims.is_empty() {
                let desc = generate_description
                    .then(|| LogicalStepDesc::from_elims(&cell.to_string(), &elims));

                if !board.clear_candidates(elims.iter()) {
                    return LogicalStepResult::Invalid(desc);
                }
                return LogicalStepResult::Changed(desc);
            }
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug)]
    struct ExtraWeakLinksConstraint;

    impl Constraint for ExtraWeakLinksConstraint {
        fn name(&self) -> &str {
            "Test Extra Weak Links"
        }

        fn get_weak_links(&self, board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
            let cu = board.cell_utility();
            let candidate_1r1c2 = cu.cell(0, 1).candidate(1);
            (2..=8).map(|value| (cu.cell(0, 0).candidate(value), candidate_1r1c2)).collect()
        }
    }

    #[test]
    fn test_cell_forcing() {
        let mut board = Board::new(9, &[], &[Arc::new(ExtraWeakLinksConstraint)]);
        let cu = board.cell_utility();

        // 1r1c2 is linked from 2-8 in r1c1, but 9r1c1 is not linked to it,
        // so no forcing yet.
        let result = SimpleCellForcing.run(&mut board, true);
        assert!(result.is_none());

        // Remove 9 from r1c1; now every r1c1 candidate kills 1r1c2.
        assert!(board.clear_candidate(cu.cell(0, 0).candidate(9)));

        let result = SimpleCellForcing.run(&mut board, true);
        assert!(result.is_changed());
        assert!(!board.cell(cu.cell(0, 1)).has(1));
        assert_eq!(result.to_string(), "r1c1 => -1r1c2");
    }
}
