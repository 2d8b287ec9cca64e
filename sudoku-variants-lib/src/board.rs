//! Contains [`Board`] which holds the solve state of a puzzle and the
//! propagation kernel that mutates it.

use bitvec::bitvec;
use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::prelude::*;
use std::{collections::HashMap, sync::Arc};

/// The state of a puzzle: one candidate mask per cell, per-house candidate
/// counters, and shared immutable metadata.
///
/// All mutation goes through the kernel operations ([`Board::set_solved`],
/// [`Board::clear_value`], [`Board::keep_mask`], [`Board::add_weak_link`]),
/// which cascade along the weak link graph, keep the counters coherent, and
/// run every constraint's `enforce` after each placement. Contradictions are
/// reported through return values; the board is never left with stale
/// counters.
///
/// Cloning a board shares the metadata through an [`Arc`], which makes the
/// clone-per-branch pattern of the brute force search cheap. The metadata is
/// copied on write if a clone later adds weak links, so clones stay
/// independent. Use [`Board::deep_clone`] to force a metadata copy up front.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<ValueMask>,
    candidate_counts: Vec<u16>,
    solved_count: usize,
    version: u64,
    data: Arc<BoardData>,
}

/// Immutable board metadata: size, houses, weak links, exclusivity, and the
/// constraint list. Shared between board clones.
#[derive(Clone, Debug)]
pub struct BoardData {
    size: usize,
    num_cells: usize,
    num_candidates: usize,
    all_values_mask: ValueMask,
    houses: Vec<Arc<House>>,
    houses_by_cell: Vec<Vec<Arc<House>>>,
    house_ids_by_cell: Vec<Vec<usize>>,
    powerful_cells: Vec<CellIndex>,
    weak_links: Vec<CandidateLinks>,
    total_weak_links: usize,
    exclusive_cells: Vec<BitVec>,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl Board {
    /// Creates a new board and reaches the initial link fixpoint.
    ///
    /// `regions` assigns each cell a box id; pass an empty slice for default
    /// boxes, or an all-equal vector for no boxes at all.
    pub fn new(size: usize, regions: &[usize], constraints: &[Arc<dyn Constraint>]) -> Board {
        let mut data = BoardData::new(size, regions, constraints.to_vec());
        data.init_sudoku_weak_links();

        let num_houses = data.houses.len();
        let mut board = Board {
            cells: vec![data.all_values_mask; data.num_cells],
            candidate_counts: vec![size as u16; num_houses * size],
            solved_count: 0,
            version: 0,
            data: Arc::new(data),
        };

        board.init_constraint_links();
        board.init_exclusive_cells();

        board
    }

    /// Clones the board including its metadata, severing all sharing with
    /// the original.
    pub fn deep_clone(&self) -> Board {
        Board {
            cells: self.cells.clone(),
            candidate_counts: self.candidate_counts.clone(),
            solved_count: self.solved_count,
            version: self.version,
            data: Arc::new(BoardData::clone(&self.data)),
        }
    }

    pub fn solved_count(&self) -> usize {
        self.solved_count
    }

    pub fn is_solved(&self) -> bool {
        self.solved_count == self.data.num_cells
    }

    /// Counts up every mutation applied to this board, so techniques can
    /// compare against a cached version instead of re-deriving state.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn data(&self) -> Arc<BoardData> {
        self.data.clone()
    }

    pub fn size(&self) -> usize {
        self.data.size
    }

    pub fn num_cells(&self) -> usize {
        self.data.num_cells
    }

    pub fn num_candidates(&self) -> usize {
        self.data.num_candidates
    }

    pub fn all_values_mask(&self) -> ValueMask {
        self.data.all_values_mask
    }

    pub fn houses(&self) -> &[Arc<House>] {
        &self.data.houses
    }

    pub fn houses_for_cell(&self, cell: CellIndex) -> &[Arc<House>] {
        &self.data.houses_by_cell[cell.index()]
    }

    pub fn house_ids_for_cell(&self, cell: CellIndex) -> &[usize] {
        &self.data.house_ids_by_cell[cell.index()]
    }

    pub fn total_weak_links(&self) -> usize {
        self.data.total_weak_links
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.data.constraints
    }

    pub fn cell(&self, cell: CellIndex) -> ValueMask {
        self.cells[cell.index()]
    }

    pub fn cell_utility(&self) -> CellUtility {
        CellUtility::new(self.size())
    }

    pub fn all_cells(&self) -> impl Iterator<Item = CellIndex> {
        self.cell_utility().all_cells()
    }

    pub fn all_cell_masks(&self) -> impl Iterator<Item = (CellIndex, ValueMask)> + '_ {
        self.all_cells().map(move |cell| (cell, self.cell(cell)))
    }

    pub fn has_candidate(&self, candidate: CandidateIndex) -> bool {
        let (cell, value) = candidate.cell_index_and_value();
        self.cell(cell).has(value)
    }

    /// Returns true if the candidate's cell has been solved to exactly that
    /// value.
    pub fn is_candidate_true(&self, candidate: CandidateIndex) -> bool {
        let (cell, value) = candidate.cell_index_and_value();
        let mask = self.cell(cell);
        mask.is_solved() && mask.value() == value
    }

    /// The number of cells of the given house in which the value is still a
    /// candidate. Maintained incrementally by the kernel.
    pub fn house_candidate_count(&self, house_index: usize, value: usize) -> usize {
        self.candidate_counts[house_index * self.data.size + value - 1] as usize
    }

    /// The cells of the given house in which the value is still a candidate.
    pub fn cells_with_candidate_in_house(&self, house: &House, value: usize) -> Vec<CellIndex> {
        house
            .cells()
            .iter()
            .copied()
            .filter(|&cell| self.cell(cell).has(value))
            .collect()
    }

    /// Removes a candidate value from a cell.
    ///
    /// Removing the last value reports a contradiction by returning false.
    /// Removing the second-to-last value promotes the survivor through a
    /// recursive [`Board::set_solved`], so propagation runs to a local
    /// fixpoint before this returns.
    pub fn clear_value(&mut self, cell: CellIndex, value: usize) -> bool {
        let mask = self.cells[cell.index()];
        if !mask.has(value) {
            return true;
        }

        let new_mask = mask.without(value);
        self.cells[cell.index()] = new_mask;
        self.version += 1;
        self.decrement_candidate_counts(cell, value);

        if new_mask.is_empty() {
            return false;
        }

        if !new_mask.is_solved() && new_mask.is_single() {
            return self.set_solved(cell, new_mask.value());
        }

        true
    }

    /// Removes a candidate. See [`Board::clear_value`].
    pub fn clear_candidate(&mut self, candidate: CandidateIndex) -> bool {
        let (cell, value) = candidate.cell_index_and_value();
        self.clear_value(cell, value)
    }

    /// Removes several candidates, reporting whether the board is still
    /// valid afterwards.
    pub fn clear_candidates(&mut self, candidates: impl Iterator<Item = CandidateIndex>) -> bool {
        let mut valid = true;
        for candidate in candidates {
            if !self.clear_candidate(candidate) {
                valid = false;
            }
        }
        valid
    }

    /// Intersects a cell with the given mask, cascading each removed value.
    pub fn keep_mask(&mut self, cell: CellIndex, mask: ValueMask) -> LogicResult {
        let remove = self.cells[cell.index()].unsolved() & !mask;
        if remove.is_empty() {
            return LogicResult::None;
        }

        for value in remove {
            if !self.clear_value(cell, value) {
                return LogicResult::Invalid;
            }
        }

        LogicResult::Changed
    }

    /// Fixes a cell to a value and propagates all consequences: every weak
    /// link of the placed candidate is eliminated, then every constraint's
    /// `enforce` runs once, in registration order, aborting on the first
    /// violation.
    ///
    /// Setting a cell to the value it is already fixed to is a no-op that
    /// returns true and leaves the board bit-identical. Setting a value that
    /// is not a candidate returns false.
    pub fn set_solved(&mut self, cell: CellIndex, value: usize) -> bool {
        let mask = self.cells[cell.index()];
        if !mask.has(value) {
            tracing::debug!(cell = %cell, value, "rejected set of a non-candidate value");
            return false;
        }
        if mask.is_solved() {
            return mask.value() == value;
        }

        self.cells[cell.index()] = ValueMask::from_value(value).solved();
        self.solved_count += 1;
        self.version += 1;
        for other in mask.without(value) {
            self.decrement_candidate_counts(cell, other);
        }

        let data = self.data.clone();
        let placed = cell.candidate(value);
        for candidate in data.weak_links_for(placed).links() {
            if !self.clear_candidate(candidate) {
                return false;
            }
        }

        for constraint in data.constraints() {
            if constraint.enforce(self, cell, value).is_invalid() {
                return false;
            }
        }

        true
    }

    /// Adds a weak link between two candidates.
    ///
    /// Idempotent, and symmetric in effect: both directions are stored. If
    /// one endpoint is already placed the other is eliminated immediately.
    /// Linking a candidate to itself eliminates it.
    pub fn add_weak_link(&mut self, candidate0: CandidateIndex, candidate1: CandidateIndex) -> bool {
        if candidate0 == candidate1 {
            return self.clear_candidate(candidate0);
        }
        if self.data.has_weak_link(candidate0, candidate1) {
            return true;
        }

        Arc::make_mut(&mut self.data).add_link_pair(candidate0, candidate1);
        self.version += 1;

        if self.is_candidate_true(candidate0) {
            return self.clear_candidate(candidate1);
        }
        if self.is_candidate_true(candidate1) {
            return self.clear_candidate(candidate0);
        }

        true
    }

    /// Picks the branch cell for the search: the unset cell with the fewest
    /// remaining candidates above one, ties broken by lowest cell index.
    pub fn best_branch_cell(&self) -> Option<CellIndex> {
        let mut best: Option<(usize, CellIndex)> = None;
        for (cell, mask) in self.all_cell_masks() {
            if mask.is_solved() {
                continue;
            }
            let count = mask.count();
            if count <= 1 {
                continue;
            }
            if best.map_or(true, |(best_count, _)| count < best_count) {
                best = Some((count, cell));
                if count == 2 {
                    break;
                }
            }
        }
        best.map(|(_, cell)| cell)
    }

    /// Serializes the candidate state: one character per candidate, `.` when
    /// eliminated and the value character when present.
    ///
    /// Loading this string into a fresh solver of the same shape reproduces
    /// the same candidate state, modulo propagation of singles.
    pub fn candidate_string(&self) -> String {
        let size = self.size();
        let mut result = String::with_capacity(self.num_candidates());
        for cell in self.all_cells() {
            let mask = self.cell(cell);
            for value in 1..=size {
                if mask.has(value) {
                    result.push(value_to_char(value));
                } else {
                    result.push('.');
                }
            }
        }
        result
    }

    pub fn is_exclusive(&self, cell1: CellIndex, cell2: CellIndex) -> bool {
        self.data.is_exclusive(cell1, cell2)
    }

    /// Returns true if no value can repeat anywhere within the given cells.
    pub fn is_grouped(&self, cells: &[CellIndex]) -> bool {
        cells
            .iter()
            .tuple_combinations()
            .all(|(cell0, cell1)| self.is_exclusive(*cell0, *cell1))
    }

    fn decrement_candidate_counts(&mut self, cell: CellIndex, value: usize) {
        let size = self.data.size;
        let house_ids = &self.data.house_ids_by_cell[cell.index()];
        let counts = &mut self.candidate_counts;
        for &house_id in house_ids {
            let index = house_id * size + value - 1;
            counts[index] = counts[index].saturating_sub(1);
        }
    }

    fn init_constraint_links(&mut self) {
        let mut pairs: Vec<(CandidateIndex, CandidateIndex)> = Vec::new();
        {
            let data = self.data.clone();
            let size = self.size();
            for constraint in data.constraints() {
                for cell in self.all_cells() {
                    for other in constraint.seen_cells(self, cell) {
                        if other != cell {
                            for value in 1..=size {
                                pairs.push((cell.candidate(value), other.candidate(value)));
                            }
                        }
                    }
                }
                pairs.extend(constraint.get_weak_links(self));
            }
        }

        for (candidate0, candidate1) in pairs {
            // A failure here leaves an empty cell behind, which the builder
            // reports as an impossible puzzle.
            let _ = self.add_weak_link(candidate0, candidate1);
        }
    }

    fn init_exclusive_cells(&mut self) {
        let size = self.size();
        let cu = self.cell_utility();

        let mut exclusive_pairs = Vec::new();
        for (index0, index1) in (0..self.num_cells()).tuple_combinations() {
            let cell0 = cu.cell_index(index0);
            let cell1 = cu.cell_index(index1);
            let exclusive = (1..=size).all(|value| {
                self.data
                    .has_weak_link(cell0.candidate(value), cell1.candidate(value))
            });
            if exclusive {
                exclusive_pairs.push((index0, index1));
            }
        }

        let data = Arc::make_mut(&mut self.data);
        for (index0, index1) in exclusive_pairs {
            data.exclusive_cells[index0].set(index1, true);
            data.exclusive_cells[index1].set(index0, true);
        }
    }
}

impl BoardData {
    fn new(size: usize, regions: &[usize], constraints: Vec<Arc<dyn Constraint>>) -> BoardData {
        let all_values_mask = ValueMask::from_all_values(size);
        let num_cells = size * size;
        let num_candidates = size * num_cells;
        let houses = Self::create_houses(size, regions, &constraints);
        let (houses_by_cell, house_ids_by_cell) = Self::create_houses_by_cell(size, &houses);
        let weak_links = vec![CandidateLinks::new(size); num_candidates];
        let exclusive_cells = vec![bitvec![0; num_cells]; num_cells];
        let powerful_cells = constraints
            .iter()
            .flat_map(|constraint| constraint.powerful_cells())
            .unique()
            .collect();

        BoardData {
            size,
            num_cells,
            num_candidates,
            all_values_mask,
            houses,
            houses_by_cell,
            house_ids_by_cell,
            powerful_cells,
            weak_links,
            total_weak_links: 0,
            exclusive_cells,
            constraints,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn all_values_mask(&self) -> ValueMask {
        self.all_values_mask
    }

    pub fn houses(&self) -> &[Arc<House>] {
        &self.houses
    }

    pub fn weak_links_for(&self, candidate: CandidateIndex) -> &CandidateLinks {
        &self.weak_links[candidate.index()]
    }

    pub fn total_weak_links(&self) -> usize {
        self.total_weak_links
    }

    pub fn powerful_cells(&self) -> &[CellIndex] {
        &self.powerful_cells
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }

    pub fn has_weak_link(&self, candidate0: CandidateIndex, candidate1: CandidateIndex) -> bool {
        self.weak_links[candidate0.index()].is_linked(candidate1)
    }

    pub fn is_exclusive(&self, cell1: CellIndex, cell2: CellIndex) -> bool {
        self.exclusive_cells[cell1.index()][cell2.index()]
    }

    fn add_link_pair(&mut self, candidate0: CandidateIndex, candidate1: CandidateIndex) {
        if self.weak_links[candidate0.index()].set(candidate1, true) {
            self.total_weak_links += 1;
        }
        if self.weak_links[candidate1.index()].set(candidate0, true) {
            self.total_weak_links += 1;
        }
    }

    fn init_sudoku_weak_links(&mut self) {
        let size = self.size;
        let cu = CellUtility::new(size);

        // Candidates within one cell exclude each other.
        for cell in cu.all_cells() {
            for value0 in 1..=size {
                for value1 in (value0 + 1)..=size {
                    self.add_link_pair(cell.candidate(value0), cell.candidate(value1));
                }
            }
        }

        // A value placed in a house excludes it from the rest of the house.
        for house in self.houses.clone() {
            for (candidate0, candidate1) in cu.candidate_pairs(house.cells()) {
                self.add_link_pair(candidate0, candidate1);
            }
        }
    }

    fn create_houses(
        size: usize,
        regions: &[usize],
        constraints: &[Arc<dyn Constraint>],
    ) -> Vec<Arc<House>> {
        let cu = CellUtility::new(size);
        let num_cells = size * size;
        let regions = if regions.len() == num_cells {
            regions.to_vec()
        } else {
            default_regions(size)
        };

        let mut houses: Vec<Arc<House>> = Vec::new();

        for row in 0..size {
            let cells: Vec<CellIndex> = (0..size).map(|col| cu.cell(row, col)).collect();
            houses.push(Arc::new(House::new(
                &format!("Row {}", row + 1),
                HouseKind::Row,
                &cells,
            )));
        }

        for col in 0..size {
            let cells: Vec<CellIndex> = (0..size).map(|row| cu.cell(row, col)).collect();
            houses.push(Arc::new(House::new(
                &format!("Column {}", col + 1),
                HouseKind::Column,
                &cells,
            )));
        }

        let mut cells_by_region: HashMap<usize, Vec<CellIndex>> = HashMap::new();
        for cell in cu.all_cells() {
            cells_by_region.entry(regions[cell.index()]).or_default().push(cell);
        }

        // Only complete regions form houses, and duplicates of a row or
        // column are skipped.
        for (&region, cells) in cells_by_region.iter().sorted_by_key(|(&region, _)| region) {
            if cells.len() == size {
                let house = House::new(&format!("Box {}", region + 1), HouseKind::Box, cells);
                if !houses.iter().any(|existing| existing.cells() == house.cells()) {
                    houses.push(Arc::new(house));
                }
            }
        }

        for constraint in constraints.iter() {
            for house in constraint.get_houses(size) {
                if !houses.iter().any(|existing| existing.cells() == house.cells()) {
                    houses.push(Arc::new(house));
                }
            }
        }

        houses
    }

    fn create_houses_by_cell(
        size: usize,
        houses: &[Arc<House>],
    ) -> (Vec<Vec<Arc<House>>>, Vec<Vec<usize>>) {
        let num_cells = size * size;
        let mut houses_by_cell: Vec<Vec<Arc<House>>> = vec![Vec::new(); num_cells];
        let mut house_ids_by_cell: Vec<Vec<usize>> = vec![Vec::new(); num_cells];
        for (house_id, house) in houses.iter().enumerate() {
            for cell in house.cells().iter() {
                houses_by_cell[cell.index()].push(house.clone());
                house_ids_by_cell[cell.index()].push(house_id);
            }
        }
        (houses_by_cell, house_ids_by_cell)
    }
}

impl Default for Board {
    /// Creates an empty 9x9 board with standard boxes and no extra
    /// constraints.
    fn default() -> Self {
        Board::new(9, &[], &[])
    }
}

impl std::hash::Hash for Board {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in self.all_cells() {
            let mask = self.cell(cell);
            if mask.is_single() {
                write!(f, "{}", value_to_char(mask.value()))?;
            } else {
                write!(f, ".")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_counts_coherent(board: &Board) {
        for (house_id, house) in board.houses().iter().enumerate() {
            for value in 1..=board.size() {
                let scanned = house
                    .cells()
                    .iter()
                    .filter(|&&cell| board.cell(cell).has(value))
                    .count();
                assert_eq!(
                    board.house_candidate_count(house_id, value),
                    scanned,
                    "count mismatch for value {} in {}",
                    value,
                    house
                );
            }
        }
    }

    #[test]
    fn test_board9() {
        let board = Board::default();
        assert_eq!(board.size(), 9);
        assert_eq!(board.num_cells(), 81);
        assert_eq!(board.num_candidates(), 729);
        assert_eq!(board.houses().len(), 27);
        assert_eq!(board.total_weak_links(), ((board.size() - 1) * 4 - 4) * board.num_candidates());
        assert_counts_coherent(&board);
    }

    #[test]
    fn test_board16() {
        let board = Board::new(16, &[], &[]);
        assert_eq!(board.size(), 16);
        assert_eq!(board.num_cells(), 256);
        assert_eq!(board.num_candidates(), 4096);
        assert_eq!(board.houses().len(), 48);
        assert_eq!(board.total_weak_links(), ((board.size() - 1) * 4 - 6) * board.num_candidates());
    }

    #[test]
    fn test_set_solved_propagates() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        assert!(board.set_solved(cu.cell(0, 0), 5));
        assert!(board.cell(cu.cell(0, 0)).is_solved());
        assert_eq!(board.solved_count(), 1);

        // Peers lost the candidate.
        assert!(!board.cell(cu.cell(0, 8)).has(5));
        assert!(!board.cell(cu.cell(8, 0)).has(5));
        assert!(!board.cell(cu.cell(2, 2)).has(5));
        // Unrelated cells kept it.
        assert!(board.cell(cu.cell(8, 8)).has(5));

        assert_counts_coherent(&board);
    }

    #[test]
    fn test_set_solved_idempotent() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        assert!(board.set_solved(cu.cell(4, 4), 7));
        let before = board.clone();
        let version = board.version();

        // Re-setting the fixed value changes nothing.
        assert!(board.set_solved(cu.cell(4, 4), 7));
        assert_eq!(board, before);
        assert_eq!(board.version(), version);

        // A different value is not a candidate anymore.
        assert!(!board.set_solved(cu.cell(4, 4), 8));
    }

    #[test]
    fn test_clear_value_promotes_singleton() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cell = cu.cell(0, 0);

        for value in 1..=8 {
            assert!(board.clear_value(cell, value));
        }

        // The survivor was placed and propagated without any logic step.
        assert!(board.cell(cell).is_solved());
        assert_eq!(board.cell(cell).value(), 9);
        assert!(!board.cell(cu.cell(0, 5)).has(9));
        assert_counts_coherent(&board);
    }

    #[test]
    fn test_keep_mask() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cell = cu.cell(2, 3);

        assert!(board.keep_mask(cell, ValueMask::from_values(&[2, 4, 6])).is_changed());
        assert_eq!(board.cell(cell), ValueMask::from_values(&[2, 4, 6]));
        assert!(board.keep_mask(cell, ValueMask::from_values(&[2, 4, 6])).is_none());
        assert!(board.keep_mask(cell, ValueMask::from_values(&[8])).is_invalid());
        assert_counts_coherent(&board);
    }

    #[test]
    fn test_add_weak_link() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let candidate0 = cu.cell(0, 0).candidate(1);
        let candidate1 = cu.cell(8, 8).candidate(2);

        let links_before = board.total_weak_links();
        assert!(board.add_weak_link(candidate0, candidate1));
        assert_eq!(board.total_weak_links(), links_before + 2);

        // Idempotent.
        assert!(board.add_weak_link(candidate1, candidate0));
        assert_eq!(board.total_weak_links(), links_before + 2);

        // Placing one endpoint eliminates the other.
        assert!(board.set_solved(cu.cell(0, 0), 1));
        assert!(!board.cell(cu.cell(8, 8)).has(2));

        // A link added after the placement is applied immediately.
        let candidate2 = cu.cell(8, 7).candidate(3);
        assert!(board.add_weak_link(candidate0, candidate2));
        assert!(!board.cell(cu.cell(8, 7)).has(3));
        assert_counts_coherent(&board);
    }

    #[test]
    fn test_clone_independence() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let original = board.clone();

        assert!(board.set_solved(cu.cell(0, 0), 5));
        assert!(board.add_weak_link(cu.cell(5, 5).candidate(1), cu.cell(6, 6).candidate(1)));

        // The clone saw none of it.
        assert!(!original.cell(cu.cell(0, 0)).is_solved());
        assert!(original.cell(cu.cell(0, 8)).has(5));
        assert!(!original
            .data()
            .has_weak_link(cu.cell(5, 5).candidate(1), cu.cell(6, 6).candidate(1)));
        assert_counts_coherent(&original);
    }

    #[test]
    fn test_best_branch_cell() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        assert_eq!(board.best_branch_cell(), Some(cu.cell(0, 0)));

        assert!(board.keep_mask(cu.cell(4, 4), ValueMask::from_values(&[1, 2, 3])).is_changed());
        assert_eq!(board.best_branch_cell(), Some(cu.cell(4, 4)));

        assert!(board.keep_mask(cu.cell(6, 6), ValueMask::from_values(&[4, 5])).is_changed());
        assert_eq!(board.best_branch_cell(), Some(cu.cell(6, 6)));
    }

    #[test]
    fn test_exclusivity() {
        let board = Board::default();
        let cu = board.cell_utility();

        // Row, box, and column pairs are exclusive; everything else is not.
        assert!(board.is_exclusive(cu.cell(0, 0), cu.cell(0, 8)));
        assert!(board.is_exclusive(cu.cell(0, 0), cu.cell(1, 1)));
        assert!(board.is_exclusive(cu.cell(0, 0), cu.cell(8, 0)));
        assert!(!board.is_exclusive(cu.cell(0, 0), cu.cell(1, 8)));

        assert!(board.is_grouped(&[cu.cell(0, 0), cu.cell(0, 5), cu.cell(0, 8)]));
        assert!(!board.is_grouped(&[cu.cell(0, 0), cu.cell(0, 5), cu.cell(1, 8)]));

        // Every cell of a plain board sits in a row, a column, and a box.
        assert_eq!(board.houses_for_cell(cu.cell(4, 4)).len(), 3);
    }

    #[test]
    fn test_candidate_string_shape() {
        let board = Board::default();
        let s = board.candidate_string();
        assert_eq!(s.len(), 729);
        assert!(s.starts_with("123456789"));
    }
}
