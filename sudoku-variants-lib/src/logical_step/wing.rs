use crate::prelude::*;

/// Wing patterns: XY-Wing, XYZ-Wing, and W-Wing.
///
/// All three reduce to the same closing move: a small pattern proves that at
/// least one of two (or three) candidates is true, so anything weakly linked
/// to all of them is eliminated. Working through the link graph means the
/// eliminations automatically respect variant constraints, not just rows,
/// columns, and boxes.
#[derive(Debug)]
pub struct Wing;

impl Wing {
    // Candidates weakly linked to every candidate in `pattern`, intersected
    // with what is still on the board.
    fn common_eliminations(board: &Board, pattern: &[CandidateIndex]) -> EliminationList {
        let board_data = board.data();
        CandidateLinks::common_of(
            board.size(),
            pattern.iter().map(|&candidate| board_data.weak_links_for(candidate)),
        )
        .to_elimination_list(board)
    }

    fn apply(
        board: &mut Board,
        kind: &str,
        pattern: &[CandidateIndex],
        cells: &[CellIndex],
        generate_description: bool,
    ) -> Option<LogicalStepResult> {
        let elims = Self::common_eliminations(board, pattern);
        if elims.is_empty() {
            return None;
        }

        let cu = CellUtility::new(board.size());
        let desc = generate_description.then(|| {
            LogicalStepDesc::from_elims(&format!("{} in {}", kind, cu.compact_name(cells)), &elims)
        });

        Some(match elims.execute(board) {
            LogicResult::Invalid => LogicalStepResult::Invalid(desc),
            _ => LogicalStepResult::Changed(desc),
        })
    }

    fn find_xy_wing(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let bivalue: Vec<(CellIndex, ValueMask)> = board
            .all_cell_masks()
            .filter(|(_, mask)| !mask.is_solved() && mask.count() == 2)
            .collect();

        for &(pivot, pivot_mask) in &bivalue {
            for &(pincer0, pincer0_mask) in &bivalue {
                if pincer0 == pivot
                    || !board.is_exclusive(pivot, pincer0)
                    || (pincer0_mask & pivot_mask).count() != 1
                    || pincer0_mask == pivot_mask
                {
                    continue;
                }
                let shared0 = (pincer0_mask & pivot_mask).value();
                let spare = pincer0_mask.without(shared0).value();
                if pivot_mask.has(spare) {
                    continue;
                }

                let other_pivot_value = pivot_mask.without(shared0).value();
                for &(pincer1, pincer1_mask) in &bivalue {
                    if pincer1 == pivot || pincer1 == pincer0 || !board.is_exclusive(pivot, pincer1)
                    {
                        continue;
                    }
                    if pincer1_mask != ValueMask::from_values(&[other_pivot_value, spare]) {
                        continue;
                    }

                    let pattern = [pincer0.candidate(spare), pincer1.candidate(spare)];
                    if let Some(result) = Self::apply(
                        board,
                        "XY-Wing",
                        &pattern,
                        &[pivot, pincer0, pincer1],
                        generate_description,
                    ) {
                        return result;
                    }
                }
            }
        }

        LogicalStepResult::None
    }

    fn find_xyz_wing(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let trivalue: Vec<(CellIndex, ValueMask)> = board
            .all_cell_masks()
            .filter(|(_, mask)| !mask.is_solved() && mask.count() == 3)
            .collect();
        let bivalue: Vec<(CellIndex, ValueMask)> = board
            .all_cell_masks()
            .filter(|(_, mask)| !mask.is_solved() && mask.count() == 2)
            .collect();

        for &(pivot, pivot_mask) in &trivalue {
            for &(pincer0, pincer0_mask) in &bivalue {
                if !board.is_exclusive(pivot, pincer0)
                    || (pincer0_mask & pivot_mask) != pincer0_mask
                {
                    continue;
                }

                for &(pincer1, pincer1_mask) in &bivalue {
                    if pincer1 == pincer0
                        || !board.is_exclusive(pivot, pincer1)
                        || (pincer1_mask & pivot_mask) != pincer1_mask
                        || pincer1_mask == pincer0_mask
                    {
                        continue;
                    }

                    let shared = pincer0_mask & pincer1_mask;
                    if shared.count() != 1 {
                        continue;
                    }
                    let value = shared.value();

                    let pattern = [
                        pivot.candidate(value),
                        pincer0.candidate(value),
                        pincer1.candidate(value),
                    ];
                    if let Some(result) = Self::apply(
                        board,
                        "XYZ-Wing",
                        &pattern,
                        &[pivot, pincer0, pincer1],
                        generate_description,
                    ) {
                        return result;
                    }
                }
            }
        }

        LogicalStepResult::None
    }

    fn find_w_wing(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();

        let bivalue: Vec<(CellIndex, ValueMask)> = board
            .all_cell_masks()
            .filter(|(_, mask)| !mask.is_solved() && mask.count() == 2)
            .collect();

        for (index0, &(cell0, mask0)) in bivalue.iter().enumerate() {
            for &(cell1, mask1) in bivalue.iter().skip(index0 + 1) {
                if mask0 != mask1 || board.is_exclusive(cell0, cell1) {
                    continue;
                }

                for bridge_value in mask0 {
                    let keep_value = mask0.without(bridge_value).value();

                    // A strong link on the bridge value whose ends see the
                    // two pair cells.
                    for (house_index, house) in board_data.houses().iter().enumerate() {
                        if board.house_candidate_count(house_index, bridge_value) != 2 {
                            continue;
                        }
                        let ends = board.cells_with_candidate_in_house(house, bridge_value);
                        if ends.len() != 2 {
                            continue;
                        }
                        if ends.contains(&cell0) || ends.contains(&cell1) {
                            continue;
                        }

                        let sees = |from: CellIndex, to: CellIndex| {
                            board_data.has_weak_link(
                                from.candidate(bridge_value),
                                to.candidate(bridge_value),
                            )
                        };
                        let connected = (sees(ends[0], cell0) && sees(ends[1], cell1))
                            || (sees(ends[0], cell1) && sees(ends[1], cell0));
                        if !connected {
                            continue;
                        }

                        let pattern = [cell0.candidate(keep_value), cell1.candidate(keep_value)];
                        if let Some(result) = Self::apply(
                            board,
                            "W-Wing",
                            &pattern,
                            &[cell0, cell1],
                            generate_description,
                        ) {
                            return result;
                        }
                    }
                }
            }
        }

        LogicalStepResult::None
    }
}

impl LogicalStep for Wing {
    fn name(&self) -> &'static str {
        "Wing"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let result = self.find_xy_wing(board, generate_description);
        if !result.is_none() {
            return result;
        }

        let result = self.find_xyz_wing(board, generate_description);
        if !result.is_none() {
            return result;
        }

        self.find_w_wing(board, generate_description)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_xy_wing() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Pivot r1c1 {1,2}, pincers r1c5 {2,3} and r3c3 {1,3}.
        assert!(board.keep_mask(cu.cell(0, 0), ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cu.cell(0, 4), ValueMask::from_values(&[2, 3])).is_changed());
        assert!(board.keep_mask(cu.cell(2, 2), ValueMask::from_values(&[1, 3])).is_changed());

        let result = Wing.run(&mut board, true);
        assert!(result.is_changed());

        // r3c5 sees both pincers, so its 3 is gone.
        assert!(!board.cell(cu.cell(2, 4)).has(3));
        // The pincers keep theirs.
        assert!(board.cell(cu.cell(0, 4)).has(3));
        assert!(board.cell(cu.cell(2, 2)).has(3));
    }

    #[test]
    fn test_no_wing_on_clean_board() {
        let mut board = Board::default();
        assert!(Wing.run(&mut board, true).is_none());
    }
}
