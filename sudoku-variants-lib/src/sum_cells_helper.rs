//! Contains [`SumCellsHelper`] for reasoning about cell groups whose values
//! must sum to one of a set of totals.
//!
//! This is the workhorse behind killer cages, arrows, little killers, and
//! every other additive constraint: enumerate the feasible digit
//! combinations, union what each cell can still be, and cut the board down
//! with [`Board::keep_mask`].

use crate::prelude::*;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Enumerates digit combinations over a fixed cell group.
///
/// Cells that share a house must receive different digits; the helper
/// captures those pairs once at construction from the board's exclusivity
/// matrix. Everything else is recomputed from the live board on each call,
/// so the helper itself stays immutable and freely shareable between board
/// clones.
#[derive(Debug, Clone)]
pub struct SumCellsHelper {
    cells: Vec<CellIndex>,
    // Bit i of entry j is set when cells[i] and cells[j] cannot repeat.
    exclusive_pairs: Vec<u32>,
}

impl SumCellsHelper {
    /// Creates a helper for the given cells on the given board.
    pub fn new(board: &Board, cells: &[CellIndex]) -> Self {
        let cells = cells.to_vec();
        let mut exclusive_pairs = vec![0u32; cells.len()];
        for (index0, index1) in (0..cells.len()).tuple_combinations() {
            if board.is_exclusive(cells[index0], cells[index1]) {
                exclusive_pairs[index1] |= 1 << index0;
                exclusive_pairs[index0] |= 1 << index1;
            }
        }
        Self { cells, exclusive_pairs }
    }

    /// Gets the cells this helper covers.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// The smallest and largest sums reachable with the current candidates,
    /// ignoring repeat restrictions. A cheap bound for early-out checks.
    pub fn sum_range(&self, board: &Board) -> (usize, usize) {
        let mut min_sum = 0;
        let mut max_sum = 0;
        for &cell in &self.cells {
            let mask = board.cell(cell);
            if mask.is_empty() {
                return (0, 0);
            }
            min_sum += mask.min();
            max_sum += mask.max();
        }
        (min_sum, max_sum)
    }

    /// Enumerates every reachable sum given the current candidates, in
    /// ascending order. Recomputed from the board on each call.
    pub fn possible_sums(&self, board: &Board) -> Vec<usize> {
        let mut sums = BTreeSet::new();
        let state = self.enumeration_state(board, &[]);
        if let Some(mut state) = state {
            state.collect_sums = true;
            self.enumerate(&mut state, 0, 0);
            sums.extend(state.sums);
        }
        sums.into_iter().collect()
    }

    /// One-shot candidate reduction: keep only digits that participate in
    /// some combination summing to a member of `sums`.
    pub fn init(&self, board: &mut Board, sums: &[usize]) -> LogicResult {
        self.restrict(board, sums, None)
    }

    /// Incremental form of [`SumCellsHelper::init`] that records its
    /// eliminations for the solve path.
    pub fn step_logic(
        &self,
        board: &mut Board,
        sums: &[usize],
        desc: Option<&mut LogicalStepDescList>,
    ) -> LogicResult {
        self.restrict(board, sums, desc)
    }

    fn restrict(
        &self,
        board: &mut Board,
        sums: &[usize],
        desc: Option<&mut LogicalStepDescList>,
    ) -> LogicResult {
        let Some(mut state) = self.enumeration_state(board, sums) else {
            return LogicResult::Invalid;
        };

        self.enumerate(&mut state, 0, 0);

        let keeps = state.keeps;
        if keeps.iter().any(|mask| mask.is_empty()) {
            return LogicResult::Invalid;
        }

        let mut result = LogicResult::None;
        let mut elims = EliminationList::new();
        for (index, &cell) in self.cells.iter().enumerate() {
            let before = board.cell(cell);
            for value in before.unsolved() & !keeps[index] {
                elims.add(cell.candidate(value));
            }
            match board.keep_mask(cell, keeps[index]) {
                LogicResult::Invalid => return LogicResult::Invalid,
                other => result = result.combine(other),
            }
        }

        if result.is_changed() {
            if let Some(desc) = desc {
                let cu = board.cell_utility();
                desc.push(LogicalStepDesc::from_elims(
                    &format!("Sum over {}", cu.compact_name(&self.cells)),
                    &elims,
                ));
            }
        }

        result
    }

    fn enumeration_state(&self, board: &Board, sums: &[usize]) -> Option<EnumerationState> {
        let count = self.cells.len();
        let mut masks = Vec::with_capacity(count);
        let mut suffix_min = vec![0usize; count + 1];
        let mut suffix_max = vec![0usize; count + 1];

        for &cell in &self.cells {
            let mask = board.cell(cell).unsolved();
            if mask.is_empty() {
                return None;
            }
            masks.push(mask);
        }

        for index in (0..count).rev() {
            suffix_min[index] = suffix_min[index + 1] + masks[index].min();
            suffix_max[index] = suffix_max[index + 1] + masks[index].max();
        }

        let mut targets = sums.to_vec();
        targets.sort_unstable();

        Some(EnumerationState {
            masks,
            suffix_min,
            suffix_max,
            target_min: targets.first().copied().unwrap_or(0),
            target_max: targets.last().copied().unwrap_or(usize::MAX),
            targets,
            chosen: vec![0; count],
            keeps: vec![ValueMask::new(); count],
            sums: Vec::new(),
            collect_sums: false,
        })
    }

    // Depth-first over candidate digits with a running sum window. The
    // scratch vectors live in the state, so the recursion itself does not
    // allocate.
    fn enumerate(&self, state: &mut EnumerationState, index: usize, sum: usize) {
        if index == state.masks.len() {
            if state.collect_sums {
                state.sums.push(sum);
            } else if state.targets.binary_search(&sum).is_ok() {
                for (slot, &value) in state.chosen.iter().enumerate() {
                    state.keeps[slot] = state.keeps[slot].with(value);
                }
            }
            return;
        }

        // Window pruning: the remaining cells bound what the total can
        // still become.
        if !state.collect_sums {
            if sum + state.suffix_min[index] > state.target_max {
                return;
            }
            if sum + state.suffix_max[index] < state.target_min {
                return;
            }
        }

        let mut allowed = state.masks[index];
        let mut exclusive = self.exclusive_pairs[index];
        while exclusive != 0 {
            let other = exclusive.trailing_zeros() as usize;
            exclusive &= exclusive - 1;
            if other < index {
                allowed = allowed.without(state.chosen[other]);
            }
        }

        for value in allowed {
            state.chosen[index] = value;
            self.enumerate(state, index + 1, sum + value);
        }
        state.chosen[index] = 0;
    }
}

struct EnumerationState {
    masks: Vec<ValueMask>,
    suffix_min: Vec<usize>,
    suffix_max: Vec<usize>,
    target_min: usize,
    target_max: usize,
    targets: Vec<usize>,
    chosen: Vec<usize>,
    keeps: Vec<ValueMask>,
    sums: Vec<usize>,
    collect_sums: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_restricts_candidates() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];
        let helper = SumCellsHelper::new(&board, &cells);

        // Two cells in one row summing to 3 can only be {1,2}.
        assert_eq!(helper.init(&mut board, &[3]), LogicResult::Changed);
        assert_eq!(board.cell(cells[0]).unsolved(), ValueMask::from_values(&[1, 2]));
        assert_eq!(board.cell(cells[1]).unsolved(), ValueMask::from_values(&[1, 2]));
    }

    #[test]
    fn test_uniqueness_respected() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];
        let helper = SumCellsHelper::new(&board, &cells);

        // Sum 4 in one row cannot be 2+2, so it must be {1,3}.
        assert_eq!(helper.init(&mut board, &[4]), LogicResult::Changed);
        assert_eq!(board.cell(cells[0]).unsolved(), ValueMask::from_values(&[1, 3]));
        assert_eq!(board.cell(cells[1]).unsolved(), ValueMask::from_values(&[1, 3]));
    }

    #[test]
    fn test_non_exclusive_cells_may_repeat() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        // Opposite corners share no house.
        let cells = [cu.cell(0, 0), cu.cell(8, 8)];
        let helper = SumCellsHelper::new(&board, &cells);

        assert_eq!(helper.init(&mut board, &[4]), LogicResult::Changed);
        // 2+2 is allowed here.
        assert_eq!(board.cell(cells[0]).unsolved(), ValueMask::from_values(&[1, 2, 3]));
        assert_eq!(board.cell(cells[1]).unsolved(), ValueMask::from_values(&[1, 2, 3]));
    }

    #[test]
    fn test_possible_sums() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];

        assert!(board.keep_mask(cells[0], ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cells[1], ValueMask::from_values(&[2, 3])).is_changed());

        let helper = SumCellsHelper::new(&board, &cells);
        // 1+2, 1+3, 2+3 are reachable; 2+2 is not (same row).
        assert_eq!(helper.possible_sums(&board), vec![3, 4, 5]);
    }

    #[test]
    fn test_impossible_sum_is_invalid() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];
        let helper = SumCellsHelper::new(&board, &cells);

        assert_eq!(helper.init(&mut board, &[40]), LogicResult::Invalid);
    }

    #[test]
    fn test_sum_range() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)];
        let helper = SumCellsHelper::new(&board, &cells);

        assert_eq!(helper.sum_range(&board), (3, 27));

        assert!(board.keep_mask(cells[0], ValueMask::from_values(&[4, 5])).is_changed());
        assert_eq!(helper.sum_range(&board), (6, 23));
    }
}
