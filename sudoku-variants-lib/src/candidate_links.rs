//! Link sets over the candidate space: [`CandidateLinks`] rows of the weak
//! link graph, and [`StrongLinks`] derived on demand for chain reasoning.

use crate::prelude::*;
use bitvec::prelude::*;

/// One row of the candidate link graph, stored as a bit set over all
/// candidates.
///
/// Besides backing the weak link adjacency, rows are combined by techniques:
/// intersecting the rows of several candidates yields everything implied
/// false by all of them, which is the closing move of cell forcing, wings,
/// and chain eliminations.
#[derive(Clone, Debug)]
pub struct CandidateLinks {
    links: BitVec,
    size: usize,
}

impl CandidateLinks {
    /// Creates an empty link set for a board of the given size.
    pub fn new(size: usize) -> Self {
        let num_candidates = size * size * size;
        Self { links: bitvec!(0; num_candidates), size }
    }

    /// Intersects several link rows: the candidates linked from every one
    /// of them. An empty row iterator yields an empty set.
    pub fn common_of<'a>(
        size: usize,
        rows: impl Iterator<Item = &'a CandidateLinks>,
    ) -> CandidateLinks {
        let mut common: Option<CandidateLinks> = None;
        for row in rows {
            match common.as_mut() {
                None => common = Some(row.clone()),
                Some(links) => links.intersect(row),
            }
        }
        common.unwrap_or_else(|| CandidateLinks::new(size))
    }

    /// Returns true if the candidate is linked.
    pub fn is_linked(&self, candidate: CandidateIndex) -> bool {
        self.links[candidate.index()]
    }

    /// Returns true if there are no links at all.
    pub fn is_empty(&self) -> bool {
        self.links.not_any()
    }

    /// Sets the link status for the given candidate.
    ///
    /// Returns true if the status changed.
    pub fn set(&mut self, candidate: CandidateIndex, value: bool) -> bool {
        if self.is_linked(candidate) == value {
            return false;
        }

        self.links.set(candidate.index(), value);

        true
    }

    /// Intersects this link set with another.
    pub fn intersect(&mut self, other: &Self) {
        self.links &= &other.links;
    }

    /// Iterates the linked candidates in index order.
    pub fn links(&self) -> impl Iterator<Item = CandidateIndex> + '_ {
        let cu = CellUtility::new(self.size);
        self.links.iter_ones().map(move |index| cu.candidate_index(index))
    }

    /// Iterates the linked candidates that are still on the board.
    pub fn live_links<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = CandidateIndex> + 'a {
        self.links().filter(move |&candidate| board.has_candidate(candidate))
    }

    /// Collects the live links into an elimination list.
    pub fn to_elimination_list(&self, board: &Board) -> EliminationList {
        self.live_links(board).collect()
    }
}

/// Strong links: candidate pairs of which at least one must be true.
///
/// Never stored on the board; derived from the current state whenever a
/// chain-style technique runs. Two sources feed it: bivalue cells, and
/// houses whose candidate counter for a value sits at exactly two.
#[derive(Debug)]
pub struct StrongLinks {
    partners_by_candidate: Vec<Vec<CandidateIndex>>,
}

impl StrongLinks {
    /// Derives the strong links of the board's current state.
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let board_data = board.data();
        let mut partners_by_candidate: Vec<Vec<CandidateIndex>> =
            vec![Vec::new(); board.num_candidates()];

        for (cell, mask) in board.all_cell_masks() {
            if !mask.is_solved() && mask.count() == 2 {
                let low = cell.candidate(mask.min());
                let high = cell.candidate(mask.max());
                partners_by_candidate[low.index()].push(high);
                partners_by_candidate[high.index()].push(low);
            }
        }

        for (house_index, house) in board_data.houses().iter().enumerate() {
            for value in 1..=size {
                if board.house_candidate_count(house_index, value) != 2 {
                    continue;
                }
                let cells = board.cells_with_candidate_in_house(house, value);
                if cells.len() == 2 {
                    let first = cells[0].candidate(value);
                    let second = cells[1].candidate(value);
                    partners_by_candidate[first.index()].push(second);
                    partners_by_candidate[second.index()].push(first);
                }
            }
        }

        // A pair can arrive from several houses at once.
        for partners in partners_by_candidate.iter_mut() {
            partners.sort();
            partners.dedup();
        }

        Self { partners_by_candidate }
    }

    /// The strong partners of a candidate, in index order.
    pub fn partners(&self, candidate: CandidateIndex) -> &[CandidateIndex] {
        &self.partners_by_candidate[candidate.index()]
    }

    /// Returns true if the candidate participates in any strong link.
    pub fn has_any(&self, candidate: CandidateIndex) -> bool {
        !self.partners_by_candidate[candidate.index()].is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_links() {
        let cu = CellUtility::new(9);
        let mut links = CandidateLinks::new(9);
        assert!(links.is_empty());

        let candidate = cu.candidate(cu.cell(0, 0), 1);
        assert!(links.set(candidate, true));
        assert!(!links.set(candidate, true));
        assert!(links.is_linked(candidate));
        assert!(!links.is_empty());
        assert_eq!(links.links().collect::<Vec<_>>(), vec![candidate]);
    }

    #[test]
    fn test_common_of() {
        let cu = CellUtility::new(9);
        let shared = cu.candidate(cu.cell(4, 4), 5);
        let only_first = cu.candidate(cu.cell(0, 0), 1);

        let mut first = CandidateLinks::new(9);
        first.set(shared, true);
        first.set(only_first, true);
        let mut second = CandidateLinks::new(9);
        second.set(shared, true);

        let common = CandidateLinks::common_of(9, [&first, &second].into_iter());
        assert!(common.is_linked(shared));
        assert!(!common.is_linked(only_first));

        let empty = CandidateLinks::common_of(9, std::iter::empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_live_links() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let gone = cu.cell(0, 0).candidate(1);
        let present = cu.cell(0, 0).candidate(2);

        let mut links = CandidateLinks::new(9);
        links.set(gone, true);
        links.set(present, true);

        assert!(board.clear_candidate(gone));
        assert_eq!(links.live_links(&board).collect::<Vec<_>>(), vec![present]);

        let elims = links.to_elimination_list(&board);
        assert_eq!(elims.len(), 1);
        assert!(elims.contains(present));
    }

    #[test]
    fn test_strong_links_from_bivalue_cell() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cell = cu.cell(4, 4);

        assert!(board.keep_mask(cell, ValueMask::from_values(&[3, 7])).is_changed());

        let strong = StrongLinks::from_board(&board);
        assert_eq!(strong.partners(cell.candidate(3)), &[cell.candidate(7)]);
        assert_eq!(strong.partners(cell.candidate(7)), &[cell.candidate(3)]);
        assert!(!strong.has_any(cu.cell(0, 0).candidate(1)));
    }

    #[test]
    fn test_strong_links_from_bilocation() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        // Row 1 holds its 9 only in r1c1 and r1c5.
        board.clear_candidates((1..=8).filter(|&col| col != 4).map(|col| cu.cell(0, col).candidate(9)));

        let strong = StrongLinks::from_board(&board);
        let first = cu.cell(0, 0).candidate(9);
        let second = cu.cell(0, 4).candidate(9);
        assert!(strong.partners(first).contains(&second));
        assert!(strong.partners(second).contains(&first));
    }
}
