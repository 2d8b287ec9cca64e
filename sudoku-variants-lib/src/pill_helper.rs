//! Contains [`PillHelper`] for cell groups read as a multi-digit decimal
//! number ("pills"), as used by arrow circles.

use crate::prelude::*;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Enumerates the decimal values a pill can take.
///
/// A pill is an ordered list of cells whose values, concatenated left to
/// right, form a decimal integer. Cell values are always in 1..=size, so no
/// digit position can hold a zero and no component has a leading zero.
/// Cells sharing a house must take different values, mirroring
/// [`SumCellsHelper`].
#[derive(Debug, Clone)]
pub struct PillHelper {
    cells: Vec<CellIndex>,
    exclusive_pairs: Vec<u32>,
}

impl PillHelper {
    /// Creates a helper for the given pill cells, in reading order.
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

    /// Gets the pill cells in reading order.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Appends a cell value to a running pill total: values of 10 and above
    /// shift by as many decimal digits as they occupy.
    pub fn append_digit(total: usize, value: usize) -> usize {
        let mut shift = 10;
        while shift <= value {
            shift *= 10;
        }
        total * shift + value
    }

    /// Enumerates every value the pill can currently take, in ascending
    /// order.
    pub fn possible_values(&self, board: &Board) -> Vec<usize> {
        let mut values = BTreeSet::new();
        let masks = self.cell_masks(board);
        if !masks.iter().any(|mask| mask.is_empty()) {
            let mut chosen = vec![0usize; self.cells.len()];
            self.enumerate(&masks, &mut chosen, 0, 0, &mut |total, _| {
                values.insert(total);
            });
        }
        values.into_iter().collect()
    }

    /// Keeps only the digit assignments whose pill value is in `allowed`,
    /// intersecting each pill cell with what survives.
    pub fn restrict_by_values(&self, board: &mut Board, allowed: &[usize]) -> LogicResult {
        let masks = self.cell_masks(board);
        if masks.iter().any(|mask| mask.is_empty()) {
            return LogicResult::Invalid;
        }

        let mut allowed_sorted = allowed.to_vec();
        allowed_sorted.sort_unstable();

        let mut keeps = vec![ValueMask::new(); self.cells.len()];
        let mut chosen = vec![0usize; self.cells.len()];
        self.enumerate(&masks, &mut chosen, 0, 0, &mut |total, chosen| {
            if allowed_sorted.binary_search(&total).is_ok() {
                for (slot, &value) in chosen.iter().enumerate() {
                    keeps[slot] = keeps[slot].with(value);
                }
            }
        });

        if keeps.iter().any(|mask| mask.is_empty()) {
            return LogicResult::Invalid;
        }

        let mut result = LogicResult::None;
        for (index, &cell) in self.cells.iter().enumerate() {
            match board.keep_mask(cell, keeps[index]) {
                LogicResult::Invalid => return LogicResult::Invalid,
                other => result = result.combine(other),
            }
        }

        result
    }

    fn cell_masks(&self, board: &Board) -> Vec<ValueMask> {
        self.cells.iter().map(|&cell| board.cell(cell).unsolved()).collect()
    }

    fn enumerate(
        &self,
        masks: &[ValueMask],
        chosen: &mut Vec<usize>,
        index: usize,
        total: usize,
        visit: &mut impl FnMut(usize, &[usize]),
    ) {
        if index == masks.len() {
            visit(total, chosen);
            return;
        }

        let mut allowed = masks[index];
        let mut exclusive = self.exclusive_pairs[index];
        while exclusive != 0 {
            let other = exclusive.trailing_zeros() as usize;
            exclusive &= exclusive - 1;
            if other < index {
                allowed = allowed.without(chosen[other]);
            }
        }

        for value in allowed {
            chosen[index] = value;
            self.enumerate(masks, chosen, index + 1, Self::append_digit(total, value), visit);
        }
        chosen[index] = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_append_digit() {
        assert_eq!(PillHelper::append_digit(0, 7), 7);
        assert_eq!(PillHelper::append_digit(1, 7), 17);
        assert_eq!(PillHelper::append_digit(12, 3), 123);
        // A two-digit cell value occupies two decimal positions.
        assert_eq!(PillHelper::append_digit(1, 12), 112);
    }

    #[test]
    fn test_possible_values() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];

        assert!(board.keep_mask(cells[0], ValueMask::from_values(&[1, 2])).is_changed());
        assert!(board.keep_mask(cells[1], ValueMask::from_values(&[2, 7])).is_changed());

        let helper = PillHelper::new(&board, &cells);
        // 22 is excluded because the cells share a row.
        assert_eq!(helper.possible_values(&board), vec![12, 17, 27]);
    }

    #[test]
    fn test_restrict_by_values() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];
        let helper = PillHelper::new(&board, &cells);

        assert_eq!(helper.restrict_by_values(&mut board, &[17]), LogicResult::Changed);
        assert!(board.cell(cells[0]).is_solved());
        assert_eq!(board.cell(cells[0]).value(), 1);
        assert!(board.cell(cells[1]).is_solved());
        assert_eq!(board.cell(cells[1]).value(), 7);
    }

    #[test]
    fn test_restrict_invalid() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cells = [cu.cell(0, 0), cu.cell(0, 1)];
        let helper = PillHelper::new(&board, &cells);

        // No two-cell pill on a 9x9 board can read as 11 (repeat in a row).
        assert_eq!(helper.restrict_by_values(&mut board, &[11]), LogicResult::Invalid);
    }
}
