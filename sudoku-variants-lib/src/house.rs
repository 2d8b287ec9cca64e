//! Contains [`House`] for representing a named group of cells which must
//! hold a permutation of the values 1..N.

use crate::cell_index::CellIndex;

/// The origin of a house, used when techniques want to treat rows, columns,
/// and boxes differently from constraint-supplied groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseKind {
    Row,
    Column,
    Box,
    Extra,
    Diagonal,
    Custom,
}

/// A *house* is a group of N cells, where N is the size of the board, in
/// which every value 1..N appears exactly once.
///
/// Rows, columns, and boxes are houses; constraints can contribute more
/// (diagonals, extra regions, killer cages of size N, and so on).
#[derive(Debug, Clone)]
pub struct House {
    name: String,
    kind: HouseKind,
    cells: Vec<CellIndex>,
}

impl House {
    /// Creates a new house with the given name, kind, and cells.
    /// The cells are stored in index order.
    pub fn new(name: &str, kind: HouseKind, cells: &[CellIndex]) -> House {
        let mut cells = cells.to_vec();
        cells.sort();

        House { name: name.to_string(), kind, cells }
    }

    /// Gets the name of the house.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the kind of the house.
    pub fn kind(&self) -> HouseKind {
        self.kind
    }

    /// Gets the cells that make up the house.
    pub fn cells(&self) -> &Vec<CellIndex> {
        &self.cells
    }

    /// Returns true if the house contains the given cell.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }
}

impl std::fmt::Display for House {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cell_utility::CellUtility;

    #[test]
    fn test_house() {
        let cu = CellUtility::new(9);
        let house = House::new("Row 1", HouseKind::Row, &[cu.cell(0, 2), cu.cell(0, 0), cu.cell(0, 1)]);
        assert_eq!(house.name(), "Row 1");
        assert_eq!(house.kind(), HouseKind::Row);
        assert_eq!(house.cells(), &vec![cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)]);
        assert!(house.contains(cu.cell(0, 1)));
        assert!(!house.contains(cu.cell(1, 0)));
    }
}
