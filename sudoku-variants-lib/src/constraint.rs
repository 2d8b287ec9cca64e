//! Contains the [`Constraint`] trait for defining the behavior of variant
//! constraints.

use crate::prelude::*;

/// One primitive building block of a constraint, used for subsumption checks
/// between constraint instances.
///
/// Two constraints which split into the same primitives are duplicates: the
/// solver keeps the first and drops the rest at build time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintPrimitive {
    kind: String,
    cells: Vec<CellIndex>,
}

impl ConstraintPrimitive {
    /// Creates a new primitive of the given kind over the given cells.
    /// The cells are stored in index order.
    pub fn new(kind: &str, cells: &[CellIndex]) -> Self {
        let mut cells = cells.to_vec();
        cells.sort();
        Self { kind: kind.to_owned(), cells }
    }

    /// Gets the kind tag of this primitive.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Gets the cells this primitive covers.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }
}

/// Constraints define extra rules beyond the standard Sudoku rules.
///
/// One instance represents one independent clue (one cage, one arrow, one
/// chess rule). Instances are immutable once the solver is built: they
/// observe the board and mutate it only through the kernel
/// ([`Board::set_solved`], [`Board::clear_value`], [`Board::keep_mask`],
/// [`Board::add_weak_link`]), which keeps house counters and the link graph
/// consistent.
///
/// Every method except [`Constraint::name`] is optional. Simple "cells that
/// see each other" constraints only need [`Constraint::seen_cells`]; the
/// engine derives the same-value weak links automatically. Most others
/// express themselves entirely through [`Constraint::get_weak_links`], with
/// [`Constraint::step_logic`] reserved for logic that links cannot encode.
pub trait Constraint: std::fmt::Debug + Send + Sync {
    /// The name of this constraint instance, such as "Killer Cage at r1c1".
    fn name(&self) -> &str;

    /// Called during solver construction, after the link graph exists, so
    /// the constraint can make its one-shot candidate reductions.
    ///
    /// This is called on every constraint repeatedly until all of them
    /// return [`LogicResult::None`], so it must be idempotent.
    ///
    /// Return [`LogicResult::Invalid`] if the constraint can never be
    /// satisfied on this board.
    fn init_board(&self, _board: &mut Board) -> LogicResult {
        LogicResult::None
    }

    /// Called immediately after a value has been set on the board.
    ///
    /// The job of this method is only to decide whether the placement
    /// violates the constraint. **Avoid logic here**: no search, no
    /// eliminations, just direct rule validation. All weak links are applied
    /// before this is called, and anything else belongs in
    /// [`Constraint::step_logic`].
    ///
    /// Return [`LogicResult::Invalid`] on a violation; any other value is
    /// treated as "no violation".
    fn enforce(&self, _board: &Board, _cell: CellIndex, _value: usize) -> LogicResult {
        LogicResult::None
    }

    /// Performs a single step of deduction for this constraint.
    ///
    /// When `is_brute_forcing` is true the result will never be shown to a
    /// user; only run deductions that prune the search tree more cheaply
    /// than guessing would. When false, record every elimination in `desc`
    /// (when provided) with a human-readable explanation.
    ///
    /// Track changes yourself and return an accurate [`LogicResult`].
    fn step_logic(
        &self,
        _board: &mut Board,
        _desc: Option<&mut LogicalStepDescList>,
        _is_brute_forcing: bool,
    ) -> LogicResult {
        LogicResult::None
    }

    /// For "cell A sees cell B" constraints: every cell whose value must
    /// differ from the given cell. The engine turns these into same-value
    /// weak links automatically.
    fn seen_cells(&self, _board: &Board, _cell: CellIndex) -> Vec<CellIndex> {
        Vec::new()
    }

    /// A weak link is a relationship between candidates A and B, possibly in
    /// different cells, equivalent to `A implies not B`.
    ///
    /// Weak links are symmetric, so only one of `(A, B)` / `(B, A)` needs to
    /// be returned (returning both is harmless). Returning a link from a
    /// candidate to itself marks that candidate as impossible and it is
    /// eliminated immediately.
    ///
    /// Group uniqueness links (same cell, same value in a shared house) are
    /// generated by the engine; constraints should only return the *extra*
    /// implications their rule adds. Cell forcing and region forcing then
    /// fall out of the link graph without any constraint-specific logic.
    ///
    /// This is called once at build time and again whenever the board has
    /// changed materially during a logical solve, because some constraints
    /// derive links from the remaining candidates.
    fn get_weak_links(&self, _board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
        Vec::new()
    }

    /// Some constraints create new houses: an extra region, a killer cage of
    /// size N, a full-length renban. Returning them here makes every
    /// house-based technique (singles, tuples, fishes) apply to them.
    fn get_houses(&self, _size: usize) -> Vec<House> {
        Vec::new()
    }

    /// Returns the cells of this constraint which must contain the given
    /// value, if the constraint can cheaply prove the value is forced into a
    /// small set. An empty result means "no information", not "nowhere".
    fn cells_must_contain(&self, _board: &Board, _value: usize) -> Vec<CellIndex> {
        Vec::new()
    }

    /// Expresses this constraint as a conjunction of primitives for
    /// duplicate detection. An empty result opts out of subsumption checks.
    fn split_to_primitives(&self, _size: usize) -> Vec<ConstraintPrimitive> {
        Vec::new()
    }

    /// Cells whose value disproportionately constrains this rule, tried
    /// first by contradiction search.
    fn powerful_cells(&self) -> Vec<CellIndex> {
        Vec::new()
    }

    /// Helper for implementing [`Constraint::cells_must_contain`] by running
    /// this constraint's own logic: the value must be in one of `cells` if
    /// removing it from all of them makes [`Constraint::step_logic`] report
    /// a contradiction.
    fn cells_must_contain_by_running_logic(
        &self,
        board: &Board,
        cells: &[CellIndex],
        value: usize,
    ) -> Vec<CellIndex> {
        let mut result = Vec::new();

        for &cell in cells {
            let mask = board.cell(cell);
            if mask.is_single() || !mask.has(value) {
                continue;
            }

            result.push(cell);
        }

        if !result.is_empty() {
            let mut board_clone = board.clone();
            for &cell in &result {
                board_clone.clear_value(cell, value);
            }

            let mut logic_result = LogicResult::Changed;
            while logic_result == LogicResult::Changed {
                logic_result = self.step_logic(&mut board_clone, None, false);
            }

            if logic_result != LogicResult::Invalid {
                result.clear();
            }
        }

        result
    }

    /// Helper for implementing [`Constraint::get_weak_links`] by running
    /// this constraint's own logic: each candidate of each cell is set on a
    /// cloned board, and every candidate it removes from the other cells
    /// becomes a weak link.
    fn get_weak_links_by_running_logic(
        &self,
        board: &Board,
        cells: &[CellIndex],
    ) -> Vec<(CandidateIndex, CandidateIndex)> {
        let mut result = Vec::new();

        for &cell in cells {
            let orig_mask = board.cell(cell);
            if orig_mask.is_single() {
                continue;
            }

            for value in orig_mask {
                let candidate = cell.candidate(value);

                let mut board_clone = board.clone();
                if !board_clone.set_solved(cell, value) {
                    result.push((candidate, candidate));
                    continue;
                }

                let mut logic_result = LogicResult::Changed;
                while logic_result == LogicResult::Changed {
                    logic_result = self.step_logic(&mut board_clone, None, false);
                }

                if logic_result == LogicResult::Invalid {
                    result.push((candidate, candidate));
                    continue;
                }

                for &other_cell in cells.iter() {
                    if other_cell == cell {
                        continue;
                    }

                    let orig_other = board.cell(other_cell).unsolved();
                    let new_other = board_clone.cell(other_cell).unsolved();
                    for other_value in orig_other & !new_other {
                        result.push((candidate, other_cell.candidate(other_value)));
                    }
                }
            }
        }

        result
    }
}
