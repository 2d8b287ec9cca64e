//! Contains [`CellIndex`] for representing the location of a specific cell.

use crate::prelude::*;

/// The location of a cell on a board.
///
/// Cells are numbered in row-major order, so a 9x9 grid has cells 0 to 80.
/// The index is tied to a board size rather than a specific board instance.
#[derive(Clone, Copy, Debug)]
pub struct CellIndex {
    index: usize,
    size: usize,
}

impl CellIndex {
    /// Creates a new instance from a linear cell index.
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// Creates a new instance from a row and column index.
    pub fn from_rc(row: usize, column: usize, size: usize) -> Self {
        Self { index: row * size + column, size }
    }

    /// Gets the linear index of the cell.
    pub fn index(self) -> usize {
        self.index
    }

    /// Gets the size of the grid this index belongs to.
    pub fn size(self) -> usize {
        self.size
    }

    /// Gets the row of the cell.
    pub fn row(self) -> usize {
        self.index / self.size
    }

    /// Gets the column of the cell.
    pub fn column(self) -> usize {
        self.index % self.size
    }

    /// Gets the row and column of the cell.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::cell_index::CellIndex;
    /// assert_eq!(CellIndex::new(0, 9).rc(), (0, 0));
    /// assert_eq!(CellIndex::new(9, 9).rc(), (1, 0));
    /// assert_eq!(CellIndex::new(80, 9).rc(), (8, 8));
    /// ```
    pub fn rc(self) -> (usize, usize) {
        (self.row(), self.column())
    }

    /// Gets the [`CandidateIndex`] of a value in this cell.
    pub fn candidate(self, value: usize) -> CandidateIndex {
        CandidateIndex::from_cv(self, value)
    }

    /// Gets the cell offset from this one by the given number of rows and
    /// columns, or `None` if that lands outside the grid.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::cell_index::CellIndex;
    /// let cell = CellIndex::from_rc(0, 0, 9);
    /// assert_eq!(cell.offset(1, 2), Some(CellIndex::from_rc(1, 2, 9)));
    /// assert_eq!(cell.offset(-1, 0), None);
    /// assert_eq!(cell.offset(0, 9), None);
    /// ```
    pub fn offset(self, row_offset: isize, column_offset: isize) -> Option<CellIndex> {
        let (row, column) = self.rc();
        let row = row as isize + row_offset;
        let column = column as isize + column_offset;
        if row < 0 || column < 0 || row >= self.size as isize || column >= self.size as isize {
            None
        } else {
            Some(Self::from_rc(row as usize, column as usize, self.size))
        }
    }

    /// Gets the taxicab distance between two cells.
    pub fn taxicab_distance(self, other: Self) -> usize {
        let (row1, column1) = self.rc();
        let (row2, column2) = other.rc();
        (row1 as isize - row2 as isize).unsigned_abs()
            + (column1 as isize - column2 as isize).unsigned_abs()
    }

    /// Determines if the other cell shares an edge with this one.
    pub fn is_orthogonally_adjacent(self, other: Self) -> bool {
        self.taxicab_distance(other) == 1
    }

    /// Determines if the other cell touches this one diagonally.
    pub fn is_diagonally_adjacent(self, other: Self) -> bool {
        let (row1, column1) = self.rc();
        let (row2, column2) = other.rc();
        (row1 as isize - row2 as isize).abs() == 1
            && (column1 as isize - column2 as isize).abs() == 1
    }

    /// Determines if the other cell shares an edge or corner with this one.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.is_orthogonally_adjacent(other) || self.is_diagonally_adjacent(other)
    }

    /// Returns the cells sharing an edge with this one, in index order.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::cell_index::CellIndex;
    /// let cell = CellIndex::from_rc(0, 0, 9);
    /// assert_eq!(
    ///     cell.orthogonally_adjacent_cells(),
    ///     vec![CellIndex::from_rc(0, 1, 9), CellIndex::from_rc(1, 0, 9)]
    /// );
    /// ```
    pub fn orthogonally_adjacent_cells(self) -> Vec<Self> {
        let mut cells: Vec<Self> = [(-1, 0), (0, -1), (0, 1), (1, 0)]
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect();
        cells.sort();
        cells
    }

    /// Returns the cells touching this one diagonally, in index order.
    pub fn diagonally_adjacent_cells(self) -> Vec<Self> {
        let mut cells: Vec<Self> = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect();
        cells.sort();
        cells
    }

    /// Returns all cells sharing an edge or corner with this one, in index
    /// order.
    pub fn adjacent_cells(self) -> Vec<Self> {
        let mut cells: Vec<Self> = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ]
        .iter()
        .filter_map(|&(dr, dc)| self.offset(dr, dc))
        .collect();
        cells.sort();
        cells
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let (row, column) = self.rc();
        write!(f, "r{}c{}", row + 1, column + 1)
    }
}

impl Eq for CellIndex {}

impl PartialEq for CellIndex {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Ord for CellIndex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl PartialOrd for CellIndex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for CellIndex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cell_index() {
        assert_eq!(CellIndex::from_rc(0, 0, 9).index(), 0);
        assert_eq!(CellIndex::from_rc(1, 0, 9).index(), 9);
        assert_eq!(CellIndex::from_rc(1, 1, 16).index(), 17);
        assert_eq!(CellIndex::from_rc(8, 8, 9).index(), 80);
        assert_eq!(CellIndex::new(40, 9).rc(), (4, 4));
        assert_eq!(CellIndex::new(40, 9).to_string(), "r5c5");
    }

    #[test]
    fn test_offsets() {
        let cu = crate::cell_utility::CellUtility::new(9);
        assert_eq!(cu.cell(4, 4).offset(1, 2), Some(cu.cell(5, 6)));
        assert_eq!(cu.cell(4, 4).offset(-2, -1), Some(cu.cell(2, 3)));
        assert_eq!(cu.cell(0, 4).offset(-1, 0), None);
        assert_eq!(cu.cell(8, 8).offset(0, 1), None);
    }

    #[test]
    fn test_adjacency() {
        let cu = crate::cell_utility::CellUtility::new(9);
        assert!(cu.cell(0, 0).is_orthogonally_adjacent(cu.cell(0, 1)));
        assert!(!cu.cell(0, 0).is_orthogonally_adjacent(cu.cell(1, 1)));
        assert!(cu.cell(0, 0).is_diagonally_adjacent(cu.cell(1, 1)));
        assert!(!cu.cell(0, 0).is_diagonally_adjacent(cu.cell(0, 1)));
        assert_eq!(
            cu.cell(4, 4).orthogonally_adjacent_cells(),
            vec![cu.cell(3, 4), cu.cell(4, 3), cu.cell(4, 5), cu.cell(5, 4)]
        );
        assert_eq!(
            cu.cell(4, 4).diagonally_adjacent_cells(),
            vec![cu.cell(3, 3), cu.cell(3, 5), cu.cell(5, 3), cu.cell(5, 5)]
        );
        assert_eq!(cu.cell(0, 0).adjacent_cells(), vec![cu.cell(0, 1), cu.cell(1, 0), cu.cell(1, 1)]);
    }
}
