//! Contains the [`SolverBuilder`] struct for assembling a [`Solver`].

use itertools::Itertools;

use crate::prelude::*;

use std::collections::HashMap;
use std::sync::Arc;

/// The names of the logical steps that can be switched off per solve.
pub const DISABLEABLE_LOGIC: [&str; 5] =
    ["tuples", "pointing", "fishes", "wings", "contradictions"];

/// Builds a [`Solver`] from a size, regions, givens, candidates,
/// constraints, and a logical step pipeline.
///
/// Input errors (bad string lengths, unknown flags) are collected as the
/// builder is configured and reported together by [`SolverBuilder::build`].
#[derive(Clone)]
pub struct SolverBuilder {
    size: usize,
    regions: Vec<usize>,
    logical_steps: Vec<Arc<dyn LogicalStep>>,
    constraints: Vec<Arc<dyn Constraint>>,
    givens: Vec<(CellIndex, usize)>,
    candidates: Vec<(CellIndex, ValueMask)>,
    disabled_logic: Vec<String>,
    custom_info: HashMap<String, String>,
    errors: Vec<SolverError>,
}

impl SolverBuilder {
    /// Creates a new builder for the given board size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            regions: Vec::new(),
            logical_steps: Vec::new(),
            constraints: Vec::new(),
            givens: Vec::new(),
            candidates: Vec::new(),
            disabled_logic: Vec::new(),
            custom_info: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Sets the box regions of the board as a flat row-major vector of
    /// region indices, expected to be of length `size * size`.
    ///
    /// An empty vector or an all-equal vector means "no box regions", like
    /// [`SolverBuilder::with_no_regions`].
    #[must_use]
    pub fn with_regions(mut self, regions: Vec<usize>) -> Self {
        let size = self.size;

        if regions.is_empty()
            || regions.len() == size * size && regions.iter().all(|&r| r == regions[0])
        {
            return self.with_no_regions();
        }

        if regions.len() != size * size {
            self.errors.push(SolverError::Build(format!(
                "region vector is of length {}, expected {}",
                regions.len(),
                size * size
            )));
            return self;
        }
        for region in 0..size {
            let count = regions.iter().filter(|&&r| r == region).count();
            if count != size {
                self.errors.push(SolverError::Build(format!(
                    "region {} covers {} cells, expected {}",
                    region, count, size
                )));
                return self;
            }
        }
        self.regions = regions;
        self
    }

    /// Uses no box regions: only rows, columns, and constraint houses.
    #[must_use]
    pub fn with_no_regions(mut self) -> Self {
        self.regions = vec![0; self.size * self.size];
        self
    }

    /// Replaces the logical step pipeline.
    #[must_use]
    pub fn with_logical_steps(mut self, logical_steps: Vec<Arc<dyn LogicalStep>>) -> Self {
        self.logical_steps = logical_steps;
        self
    }

    /// Appends one logical step to the pipeline.
    #[must_use]
    pub fn with_logical_step(mut self, logical_step: Arc<dyn LogicalStep>) -> Self {
        self.logical_steps.push(logical_step);
        self
    }

    /// Replaces the constraint list.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Vec<Arc<dyn Constraint>>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Appends one constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Arc<dyn Constraint>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends one given.
    #[must_use]
    pub fn with_given(mut self, cell: CellIndex, value: usize) -> Self {
        self.givens.push((cell, value));
        self
    }

    /// Appends several givens.
    #[must_use]
    pub fn with_givens(mut self, givens: &[(CellIndex, usize)]) -> Self {
        self.givens.extend(givens);
        self
    }

    /// Appends givens from a flat row-major string.
    ///
    /// `0` and `.` mean no given. Boards larger than 9x9 use a fixed number
    /// of decimal digits per cell (`01` for 1 on a 16x16 board).
    #[must_use]
    pub fn with_givens_string(mut self, givens: &str) -> Self {
        let cu = CellUtility::new(self.size);
        if self.size <= 9 {
            if givens.len() != cu.cell_count() {
                self.errors.push(SolverError::WrongLengthGivens {
                    expected: cu.cell_count(),
                    actual: givens.len(),
                });
                return self;
            }

            self.givens.extend(givens.chars().enumerate().filter_map(|(index, c)| {
                let value = c.to_digit(10)?;
                if value == 0 {
                    None
                } else {
                    Some((cu.cell_index(index), value as usize))
                }
            }));
        } else {
            let num_digits = self.size.to_string().len();
            if givens.len() != cu.cell_count() * num_digits {
                self.errors.push(SolverError::WrongLengthGivens {
                    expected: cu.cell_count() * num_digits,
                    actual: givens.len(),
                });
                return self;
            }

            let chunks = givens.chars().chunks(num_digits);
            self.givens.extend(chunks.into_iter().enumerate().filter_map(|(index, chunk)| {
                let value: usize = chunk.collect::<String>().parse().ok()?;
                if value == 0 {
                    None
                } else {
                    Some((cu.cell_index(index), value))
                }
            }));
        }
        self
    }

    /// Sets the candidate state from a string of length `size³`, one
    /// character per candidate: `.` for eliminated, the value character
    /// (`1`-`9`, then `A`-`V`) for present.
    ///
    /// Loading a board's own [`Board::candidate_string`] reproduces that
    /// board, modulo propagation of placements.
    #[must_use]
    pub fn with_candidates_string(mut self, candidates: &str) -> Self {
        let cu = CellUtility::new(self.size);
        let expected = cu.candidate_count();
        if candidates.len() != expected {
            self.errors.push(SolverError::WrongLengthCandidates {
                expected,
                actual: candidates.len(),
            });
            return self;
        }

        let mut chars = candidates.chars();
        for index in 0..cu.cell_count() {
            let mut mask = ValueMask::new();
            for value in 1..=self.size {
                let Some(c) = chars.next() else {
                    return self;
                };
                if c == '.' {
                    continue;
                }
                if char_to_value(c) == Some(value) {
                    mask = mask.with(value);
                } else {
                    self.errors.push(SolverError::InvalidBoardCharacter(c));
                    return self;
                }
            }
            self.candidates.push((cu.cell_index(index), mask));
        }
        self
    }

    /// Disables individual logical steps by flag name; the recognized flags
    /// are listed in [`DISABLEABLE_LOGIC`].
    #[must_use]
    pub fn with_disabled_logic(mut self, flags: impl IntoIterator<Item = String>) -> Self {
        for flag in flags {
            let flag = flag.to_ascii_lowercase();
            if DISABLEABLE_LOGIC.contains(&flag.as_str()) {
                self.disabled_logic.push(flag);
            } else {
                self.errors.push(SolverError::Build(format!("unknown logic flag '{}'", flag)));
            }
        }
        self
    }

    /// Attaches a custom key/value for front ends to read back.
    #[must_use]
    pub fn with_custom_info(mut self, key: &str, value: &str) -> Self {
        self.custom_info.insert(key.to_owned(), value.to_owned());
        self
    }

    fn standard_logic() -> Vec<Arc<dyn LogicalStep>> {
        vec![
            Arc::new(AllNakedSingles),
            Arc::new(HiddenSingle),
            Arc::new(NakedSingle),
            Arc::new(StepConstraints),
            Arc::new(Pointing),
            Arc::new(NakedTuple),
            Arc::new(HiddenTuple),
            Arc::new(SimpleCellForcing),
            Arc::new(Fish),
            Arc::new(Wing),
            Arc::new(ChainFinder::new()),
            Arc::new(ContradictionSearch),
        ]
    }

    fn step_disabled(&self, step: &Arc<dyn LogicalStep>) -> bool {
        let flag = match step.name() {
            "Naked Tuple" | "Hidden Tuple" => "tuples",
            "Pointing" => "pointing",
            "Fish" => "fishes",
            "Wing" => "wings",
            "Contradiction" => "contradictions",
            _ => return false,
        };
        self.disabled_logic.iter().any(|disabled| disabled == flag)
    }

    /// Builds the solver: deduplicates constraints, creates the board and
    /// its link graph, applies candidates and givens, runs every
    /// constraint's initialization to a fixpoint, and assembles the step
    /// pipeline.
    pub fn build(mut self) -> Result<Solver, SolverError> {
        if let Some(error) = self.errors.first() {
            return Err(error.clone());
        }

        // Constraints that split into identical primitives are duplicates;
        // the first registration wins.
        let mut seen_primitives: Vec<Vec<ConstraintPrimitive>> = Vec::new();
        let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
        for constraint in std::mem::take(&mut self.constraints) {
            let mut primitives = constraint.split_to_primitives(self.size);
            if !primitives.is_empty() {
                primitives.sort();
                if seen_primitives.contains(&primitives) {
                    tracing::warn!(constraint = constraint.name(), "dropping duplicate constraint");
                    continue;
                }
                seen_primitives.push(primitives);
            }
            constraints.push(constraint);
        }

        let mut board = Board::new(self.size, &self.regions, &constraints);

        for &(cell, mask) in &self.candidates {
            if board.keep_mask(cell, mask).is_invalid() {
                return Err(SolverError::Build(format!(
                    "candidates for {} leave the board unsolvable",
                    cell
                )));
            }
        }

        for &(cell, value) in &self.givens {
            if !board.set_solved(cell, value) {
                return Err(SolverError::Build(format!("failed to set given {}{}", value, cell)));
            }
        }

        if let Some((cell, _)) = board.all_cell_masks().find(|(_, mask)| mask.is_empty()) {
            return Err(SolverError::Build(format!("{} has no remaining candidates", cell)));
        }

        // Let constraints react to the board and to each other until none
        // has anything further to contribute.
        let board_data = board.data();
        let mut changed = true;
        while changed {
            changed = false;

            for constraint in board_data.constraints() {
                match constraint.init_board(&mut board) {
                    LogicResult::Invalid => {
                        return Err(SolverError::Build(format!(
                            "{} has found the board is invalid",
                            constraint.name()
                        )));
                    }
                    LogicResult::Changed => changed = true,
                    _ => {}
                }
            }
        }
        drop(board_data);

        if self.logical_steps.is_empty() {
            self.logical_steps = Self::standard_logic();
        } else {
            // Two steps are always required: AllNakedSingles drives the
            // brute force solver and StepConstraints applies constraint
            // logic.
            if !self.logical_steps.iter().any(|step| step.name() == AllNakedSingles.name()) {
                self.logical_steps.insert(0, Arc::new(AllNakedSingles));
            }
            if !self.logical_steps.iter().any(|step| step.name() == StepConstraints.name()) {
                let singles_end = self
                    .logical_steps
                    .iter()
                    .rposition(|step| {
                        step.name() == NakedSingle.name() || step.name() == HiddenSingle.name()
                    })
                    .map(|index| index + 1)
                    .unwrap_or(0);
                self.logical_steps.insert(singles_end, Arc::new(StepConstraints));
            }
        }

        let logical_solve_steps = self
            .logical_steps
            .iter()
            .filter(|step| step.is_active_during_logical_solves() && !self.step_disabled(step))
            .cloned()
            .collect();

        let brute_force_steps = self
            .logical_steps
            .iter()
            .filter(|step| step.is_active_during_brute_force_solves())
            .cloned()
            .collect();

        Ok(Solver {
            board,
            logical_solve_steps,
            brute_force_steps,
            custom_info: self.custom_info,
            links_refresh_solved_count: 0,
        })
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new(9)
    }
}

#[cfg(test)]
mod test {
    use itertools::assert_equal;

    use super::*;

    #[test]
    fn test_solver_default() {
        let solver = SolverBuilder::default().build().unwrap();
        let board = solver.board();

        assert_eq!(board.size(), 9);
        assert_eq!(board.solved_count(), 0);
        assert!(!board.is_solved());
        assert_eq!(board.houses().len(), 27);
        assert_eq!(board.constraints().len(), 0);
    }

    #[test]
    fn test_solver_no_regions() {
        let solver = SolverBuilder::default().with_no_regions().build().unwrap();
        let board = solver.board();

        assert_eq!(board.houses().len(), 18);
    }

    #[test]
    fn test_required_logic() {
        let solver =
            SolverBuilder::new(9).with_logical_step(Arc::new(HiddenSingle)).build().unwrap();
        assert_equal(
            solver.brute_force_steps().iter().map(|step| step.name()),
            ["All Naked Singles", "Hidden Single", "Step Constraints"],
        );
        assert_equal(
            solver.logical_solve_steps().iter().map(|step| step.name()),
            ["Hidden Single", "Step Constraints"],
        );
    }

    #[test]
    fn test_disabled_logic() {
        let solver = SolverBuilder::default()
            .with_disabled_logic(["tuples".to_owned(), "fishes".to_owned()])
            .build()
            .unwrap();
        assert!(!solver.logical_solve_steps().iter().any(|step| {
            step.name() == "Naked Tuple" || step.name() == "Hidden Tuple" || step.name() == "Fish"
        }));
        assert!(solver.logical_solve_steps().iter().any(|step| step.name() == "Wing"));

        let result =
            SolverBuilder::default().with_disabled_logic(["nonsense".to_owned()]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_length_givens() {
        let result = SolverBuilder::default().with_givens_string("123").build();
        assert_eq!(
            result.err(),
            Some(SolverError::WrongLengthGivens { expected: 81, actual: 3 })
        );
    }

    #[test]
    fn test_candidate_string_round_trip() {
        let mut text = Board::default().candidate_string();
        // Remove 1 from r1c1 and 5 from r5c5; neither removal cascades.
        text.replace_range(0..1, ".");
        let index = (4 * 9 + 4) * 9 + 4;
        text.replace_range(index..index + 1, ".");

        let solver = SolverBuilder::default().with_candidates_string(&text).build().unwrap();
        assert_eq!(solver.board().candidate_string(), text);
    }

    #[test]
    fn test_wrong_length_candidates() {
        let result = SolverBuilder::default().with_candidates_string("123").build();
        assert_eq!(
            result.err(),
            Some(SolverError::WrongLengthCandidates { expected: 729, actual: 3 })
        );
    }
}
