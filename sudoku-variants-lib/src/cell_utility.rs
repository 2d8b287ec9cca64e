//! Contains [`CellUtility`] which has methods for working with cells of a
//! specific board size.

use crate::prelude::*;
use itertools::Itertools;

/// A utility for creating and naming cells and candidates.
///
/// Most of these operations need the board size; storing it here avoids
/// passing it to every call.
#[derive(Copy, Clone, Debug)]
pub struct CellUtility {
    size: usize,
}

impl CellUtility {
    /// Creates a new instance for the given board size.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Gets the size of the board.
    pub fn size(self) -> usize {
        self.size
    }

    /// Gets the number of cells in the board.
    pub fn cell_count(self) -> usize {
        self.size * self.size
    }

    /// Gets the number of candidates in the board.
    pub fn candidate_count(self) -> usize {
        self.cell_count() * self.size
    }

    /// Creates a [`CellIndex`] from a row and column index.
    pub fn cell(self, row: usize, column: usize) -> CellIndex {
        CellIndex::new(row * self.size + column, self.size)
    }

    /// Creates a [`CellIndex`] from a linear index.
    pub fn cell_index(self, index: usize) -> CellIndex {
        CellIndex::new(index, self.size)
    }

    /// Creates a [`CandidateIndex`] from a cell and value.
    pub fn candidate(self, cell: CellIndex, value: usize) -> CandidateIndex {
        CandidateIndex::from_cv(cell, value)
    }

    /// Creates a [`CandidateIndex`] from a linear index.
    pub fn candidate_index(self, index: usize) -> CandidateIndex {
        CandidateIndex::new(index, self.size)
    }

    /// Iterates all cells of the board in row-major order.
    pub fn all_cells(self) -> impl Iterator<Item = CellIndex> {
        (0..self.cell_count()).map(move |i| self.cell_index(i))
    }

    /// Iterates all candidates of the board in index order.
    pub fn all_candidates(self) -> impl Iterator<Item = CandidateIndex> {
        (0..self.candidate_count()).map(move |i| self.candidate_index(i))
    }

    /// Parses a string of semicolon-separated cell groups.
    ///
    /// Each group is one or more sub-groups of the form `r<rows>c<cols>`
    /// written back to back, where `<rows>` and `<cols>` are comma-separated
    /// lists of 1-based indices or `-` ranges:
    /// * `r2c3` - the single cell at row 2, column 3
    /// * `r1-4c5` - four cells, rows 1 through 4 of column 5
    /// * `r1,3c2-4` - six cells in rows 1 and 3
    /// * `r1c1r2c2` - two individual cells
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::cell_utility::CellUtility;
    /// let cu = CellUtility::new(9);
    /// let groups = cu.parse_cell_groups("r2c3;r3c4r4c5").unwrap();
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0], vec![cu.cell(1, 2)]);
    /// assert_eq!(groups[1], vec![cu.cell(2, 3), cu.cell(3, 4)]);
    /// ```
    pub fn parse_cell_groups(self, text: &str) -> Result<Vec<Vec<CellIndex>>, SolverError> {
        text.split(';')
            .map(|group| group.trim())
            .filter(|group| !group.is_empty())
            .map(|group| self.parse_cells(group))
            .collect()
    }

    /// Parses a single cell group string. See [`CellUtility::parse_cell_groups`].
    pub fn parse_cells(self, text: &str) -> Result<Vec<CellIndex>, SolverError> {
        let err = || SolverError::InvalidCellGroup(text.to_owned());
        if !text.is_ascii() {
            return Err(err());
        }

        let lowered = text.to_ascii_lowercase();
        if !lowered.starts_with('r') {
            return Err(err());
        }

        let mut cells = Vec::new();
        for sub_group in lowered.split('r').filter(|s| !s.is_empty()) {
            let (rows_text, cols_text) = sub_group.split_once('c').ok_or_else(err)?;
            let rows = self.parse_index_list(rows_text).ok_or_else(err)?;
            let cols = self.parse_index_list(cols_text).ok_or_else(err)?;
            for &row in &rows {
                for &col in &cols {
                    cells.push(self.cell(row - 1, col - 1));
                }
            }
        }

        if cells.is_empty() {
            return Err(err());
        }

        Ok(cells)
    }

    // 1-based comma list with ranges, e.g. "1,3-5". None on any invalid or
    // out-of-bounds entry.
    fn parse_index_list(self, text: &str) -> Option<Vec<usize>> {
        let mut indexes = Vec::new();
        for entry in text.split(',') {
            match entry.split_once('-') {
                Some((start, end)) => {
                    let start: usize = start.parse().ok()?;
                    let end: usize = end.parse().ok()?;
                    let (start, end) = (start.min(end), start.max(end));
                    indexes.extend(start..=end);
                }
                None => indexes.push(entry.parse().ok()?),
            }
        }
        if indexes.iter().any(|&i| i == 0 || i > self.size) {
            return None;
        }
        Some(indexes)
    }

    /// Returns the candidate pairs for each value within a group of cells
    /// that cannot repeat values.
    ///
    /// Passing a non-repeating group generates exactly the weak link pairs
    /// that group induces.
    pub fn candidate_pairs(self, cells: &[CellIndex]) -> Vec<(CandidateIndex, CandidateIndex)> {
        let mut result = Vec::new();
        for value in 1..=self.size {
            for pair in cells.iter().combinations(2) {
                result.push((self.candidate(*pair[0], value), self.candidate(*pair[1], value)));
            }
        }
        result
    }

    /// Generates a compact description of a group of cells.
    ///
    /// Cells sharing a row become `r1c123`; cells sharing a column become
    /// `r123c1`; anything else is grouped into a comma-separated list of row
    /// or column groups, whichever reads shorter.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::cell_utility::CellUtility;
    /// let cu = CellUtility::new(9);
    /// let cells = vec![cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)];
    /// assert_eq!(cu.compact_name(&cells), "r1c123");
    /// ```
    pub fn compact_name(self, cells: &[CellIndex]) -> String {
        let cell_separator = if self.size <= 9 { "" } else { "," };

        if cells.is_empty() {
            return String::new();
        }
        if cells.len() == 1 {
            return cells[0].to_string();
        }

        let cells: Vec<(usize, usize)> = cells.iter().sorted().map(|cell| cell.rc()).collect();

        let first_row = cells[0].0;
        if cells.iter().all(|cell| cell.0 == first_row) {
            return format!(
                "r{}c{}",
                first_row + 1,
                cells.iter().map(|cell| cell.1 + 1).sorted().join(cell_separator)
            );
        }

        let first_col = cells[0].1;
        if cells.iter().all(|cell| cell.1 == first_col) {
            return format!(
                "r{}c{}",
                cells.iter().map(|cell| cell.0 + 1).sorted().join(cell_separator),
                first_col + 1
            );
        }

        let by_row = self.compact_name_grouped(&cells, cell_separator, false);
        let by_col = self.compact_name_grouped(&cells, cell_separator, true);
        if by_row.len() < by_col.len() {
            by_row
        } else {
            by_col
        }
    }

    // Groups cells by row (or by column when transposed), merging groups
    // with identical contents.
    fn compact_name_grouped(
        self,
        cells: &[(usize, usize)],
        cell_separator: &str,
        transpose: bool,
    ) -> String {
        let mut per_line: Vec<Vec<usize>> = vec![vec![]; self.size];
        for &(row, col) in cells {
            let (line, entry) = if transpose { (col, row) } else { (row, col) };
            per_line[line].push(entry + 1);
        }
        for line in per_line.iter_mut() {
            line.sort();
        }

        let mut groups: Vec<String> = Vec::new();
        for i in 0..self.size {
            if per_line[i].is_empty() {
                continue;
            }

            let mut lines_in_group = vec![i + 1];
            for j in i + 1..self.size {
                if per_line[j] == per_line[i] {
                    lines_in_group.push(j + 1);
                    per_line[j].clear();
                }
            }

            let lines = lines_in_group.iter().join(cell_separator);
            let entries = per_line[i].iter().join(cell_separator);
            if transpose {
                groups.push(format!("r{}c{}", entries, lines));
            } else {
                groups.push(format!("r{}c{}", lines, entries));
            }
        }

        groups.join(",")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_cell_groups() {
        let cu = CellUtility::new(9);
        let cu10 = CellUtility::new(10);

        assert_eq!(cu.parse_cell_groups(""), Ok(vec![]));
        assert_eq!(cu.parse_cell_groups("r1c1"), Ok(vec![vec![cu.cell(0, 0)]]));
        assert_eq!(cu.parse_cell_groups("R1C1"), Ok(vec![vec![cu.cell(0, 0)]]));
        assert_eq!(cu10.parse_cell_groups("r10c10"), Ok(vec![vec![cu10.cell(9, 9)]]));
        assert_eq!(
            cu.parse_cell_groups("r1-3c1-2"),
            Ok(vec![vec![
                cu.cell(0, 0),
                cu.cell(0, 1),
                cu.cell(1, 0),
                cu.cell(1, 1),
                cu.cell(2, 0),
                cu.cell(2, 1)
            ]])
        );
        assert_eq!(
            cu.parse_cell_groups("r1c1r2c2"),
            Ok(vec![vec![cu.cell(0, 0), cu.cell(1, 1)]])
        );
        assert_eq!(
            cu.parse_cell_groups("r1,3c1-2"),
            Ok(vec![vec![cu.cell(0, 0), cu.cell(0, 1), cu.cell(2, 0), cu.cell(2, 1)]])
        );
        assert_eq!(
            cu.parse_cell_groups("r1c1;r2c2"),
            Ok(vec![vec![cu.cell(0, 0)], vec![cu.cell(1, 1)]])
        );
        assert!(cu.parse_cell_groups("x").is_err());
        assert!(cu.parse_cell_groups("x1c1").is_err());
        assert!(cu.parse_cell_groups("r0c1").is_err());
        assert!(cu.parse_cell_groups("r1c").is_err());
        assert!(cu.parse_cell_groups("r1-10c1").is_err());
    }

    #[test]
    fn test_compact_name() {
        let cu = CellUtility::new(9);
        assert_eq!(cu.compact_name(&[]), "");
        assert_eq!(cu.compact_name(&[cu.cell(0, 0)]), "r1c1");
        assert_eq!(cu.compact_name(&[cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)]), "r1c123");
        assert_eq!(cu.compact_name(&[cu.cell(0, 0), cu.cell(1, 0), cu.cell(2, 0)]), "r123c1");
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2), cu.cell(1, 0), cu.cell(2, 0)]),
            "r123c1,r1c23"
        );
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 0), cu.cell(1, 1), cu.cell(2, 2)]),
            "r1c1,r2c2,r3c3"
        );
    }
}
