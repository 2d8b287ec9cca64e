//! Contains the [`Solver`] struct which is the main entry point for solving
//! a puzzle.

pub mod cancellation;
pub mod estimate_result;
pub mod logical_solve_result;
pub mod single_solution_result;
pub mod solution_count_result;
pub mod solution_receiver;
pub mod solver_builder;
pub mod true_candidates_count_result;

use crate::prelude::*;
use rand::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const PROGRESS_EVERY: usize = 4096;
const CANCEL_POLL_EVERY: usize = 256;
const WORK_QUEUE_TARGET: usize = 64;

/// Owns one [`Board`] and drives solving: the logical step engine, the
/// brute force search, solution counting, true candidates, and Monte-Carlo
/// estimation.
///
/// A solver is built with [`SolverBuilder`]. It is not thread-safe; the
/// multithreaded operations obtain concurrency by cloning the solver's board
/// per worker thread, which is cheap because the board metadata is shared by
/// reference.
#[derive(Clone)]
pub struct Solver {
    board: Board,
    logical_solve_steps: Vec<Arc<dyn LogicalStep>>,
    brute_force_steps: Vec<Arc<dyn LogicalStep>>,
    custom_info: HashMap<String, String>,
    links_refresh_solved_count: usize,
}

impl Solver {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn cell_utility(&self) -> CellUtility {
        self.board.cell_utility()
    }

    pub fn logical_solve_steps(&self) -> &[Arc<dyn LogicalStep>] {
        &self.logical_solve_steps
    }

    pub fn brute_force_steps(&self) -> &[Arc<dyn LogicalStep>] {
        &self.brute_force_steps
    }

    /// Gets a custom key/value set at build time, such as front-end options.
    pub fn get_custom_info(&self, key: &str) -> Option<&str> {
        self.custom_info.get(key).map(|value| value.as_str())
    }

    /// Sets givens on the board, propagating each placement.
    ///
    /// # Example
    /// ```
    /// # use sudoku_variants_lib::prelude::*;
    /// let mut solver = SolverBuilder::default().build().unwrap();
    /// let cu = solver.cell_utility();
    /// assert!(solver.set_givens([(cu.cell(0, 0), 1), (cu.cell(0, 1), 2)].into_iter()));
    /// assert_eq!(solver.board().cell(cu.cell(0, 0)).value(), 1);
    /// assert_eq!(solver.board().cell(cu.cell(0, 1)).value(), 2);
    /// assert!(solver.board().cell(cu.cell(0, 2)).min() >= 3);
    /// ```
    pub fn set_givens(&mut self, givens: impl Iterator<Item = (CellIndex, usize)>) -> bool {
        for (cell, value) in givens {
            if !self.board.set_solved(cell, value) {
                return false;
            }
        }

        true
    }

    /// Fixes a cell to a value through the kernel. See [`Board::set_solved`].
    pub fn set_value(&mut self, cell: CellIndex, value: usize) -> bool {
        self.board.set_solved(cell, value)
    }

    /// Removes a candidate through the kernel. See [`Board::clear_value`].
    pub fn clear_value(&mut self, cell: CellIndex, value: usize) -> bool {
        self.board.clear_value(cell, value)
    }

    /// Intersects a cell's candidates through the kernel. See
    /// [`Board::keep_mask`].
    pub fn keep_mask(&mut self, cell: CellIndex, mask: ValueMask) -> LogicResult {
        self.board.keep_mask(cell, mask)
    }

    /// Runs the highest-priority logical step that makes progress.
    pub fn run_single_logical_step(&mut self) -> LogicalStepResult {
        for step in self.logical_solve_steps.iter() {
            let step_result = step.run(&mut self.board, true);
            if !step_result.is_none() {
                if step.has_own_prefix() {
                    return step_result;
                }
                return step_result.with_prefix(format!("{}: ", step.name()).as_str());
            }
        }

        LogicalStepResult::None
    }

    /// Runs logical steps until quiescence, solution, or contradiction,
    /// collecting the solve path. Cancellation returns the steps taken so
    /// far.
    pub fn run_logical_solve(&mut self, cancellation: impl Into<Cancellation>) -> LogicalSolveResult {
        let cancellation = cancellation.into();
        let mut desc_list = LogicalStepDescList::new();
        let mut changed = false;
        let mut canceled = false;

        if !self.refresh_constraint_links() {
            return LogicalSolveResult::new(LogicResult::Invalid, desc_list, false);
        }

        loop {
            if self.board.is_solved() {
                desc_list.push("Solved!".into());
                return LogicalSolveResult::new(LogicResult::Solved, desc_list, false);
            }

            if cancellation.check() {
                canceled = true;
                break;
            }

            let step_result = self.run_single_logical_step();
            if step_result.is_none() {
                break;
            }

            changed = true;

            if let Some(desc) = step_result.description() {
                desc_list.push(desc.clone());
            }

            if step_result.is_invalid() {
                return LogicalSolveResult::new(LogicResult::Invalid, desc_list, false);
            }

            // Some constraints derive weak links from the remaining
            // candidates, so placements can unlock new links.
            if self.board.solved_count() != self.links_refresh_solved_count
                && !self.refresh_constraint_links()
            {
                return LogicalSolveResult::new(LogicResult::Invalid, desc_list, false);
            }
        }

        let result = if changed { LogicResult::Changed } else { LogicResult::None };
        LogicalSolveResult::new(result, desc_list, canceled)
    }

    fn refresh_constraint_links(&mut self) -> bool {
        let pairs = {
            let board_data = self.board.data();
            let mut pairs = Vec::new();
            for constraint in board_data.constraints() {
                pairs.extend(constraint.get_weak_links(&self.board));
            }
            pairs
        };

        let mut valid = true;
        for (candidate0, candidate1) in pairs {
            if !self.board.add_weak_link(candidate0, candidate1) {
                valid = false;
            }
        }
        self.links_refresh_solved_count = self.board.solved_count();
        valid
    }

    fn run_single_brute_force_step(&self, board: &mut Board) -> LogicalStepResult {
        for step in self.brute_force_steps.iter() {
            let step_result = step.run(board, false);
            if !step_result.is_none() {
                return step_result;
            }
        }

        LogicalStepResult::None
    }

    fn run_brute_force_logic(&self, board: &mut Board) -> bool {
        loop {
            let step_result = self.run_single_brute_force_step(board);
            if step_result.is_none() {
                break;
            }
            if step_result.is_invalid() {
                return false;
            }
        }

        true
    }

    // Pushes each candidate branch of the best cell, ordered so the lowest
    // value is explored first (or randomly when an RNG is supplied).
    fn push_branches(&self, board: &Board, stack: &mut Vec<Board>, rng: Option<&mut StdRng>) -> bool {
        let Some(cell) = board.best_branch_cell() else {
            return false;
        };

        let mut values = board.cell(cell).to_vec();
        match rng {
            Some(rng) => values.shuffle(rng),
            None => values.reverse(),
        }

        for value in values {
            let mut child = board.clone();
            if child.set_solved(cell, value) {
                stack.push(child);
            }
        }
        true
    }

    fn first_solution_from(
        &self,
        start: Board,
        rng: Option<&mut StdRng>,
        cancellation: &Cancellation,
    ) -> SingleSolutionResult {
        let mut rng = rng;
        let mut nodes = 0usize;
        let mut stack = vec![start];
        while let Some(mut board) = stack.pop() {
            nodes += 1;
            if nodes % CANCEL_POLL_EVERY == 0 && cancellation.check() {
                return SingleSolutionResult::Canceled;
            }
            if !self.run_brute_force_logic(&mut board) {
                continue;
            }
            if board.is_solved() {
                return SingleSolutionResult::Solved(Box::new(board));
            }
            self.push_branches(&board, &mut stack, rng.as_deref_mut());
        }
        SingleSolutionResult::None
    }

    /// Finds the lexicographically first solution, or none.
    pub fn find_first_solution(&self, cancellation: impl Into<Cancellation>) -> SingleSolutionResult {
        let cancellation = cancellation.into();
        self.first_solution_from(self.board.clone(), None, &cancellation)
    }

    /// Finds a solution with randomized branch ordering.
    pub fn find_random_solution(&self, cancellation: impl Into<Cancellation>) -> SingleSolutionResult {
        let cancellation = cancellation.into();
        let mut rng = StdRng::from_entropy();
        self.first_solution_from(self.board.clone(), Some(&mut rng), &cancellation)
    }

    /// Finds one solution using every available core. The solution is not
    /// guaranteed to be the lexicographically first one.
    pub fn find_solution_multithreaded(
        &self,
        random: bool,
        cancellation: impl Into<Cancellation>,
    ) -> SingleSolutionResult {
        let cancellation = cancellation.into();
        let shared = FindSharedState {
            queue: Mutex::new(vec![self.board.clone()]),
            active: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
            solution: Mutex::new(None),
            cancellation,
        };

        let mut root_rng = StdRng::from_entropy();
        let seeds: Vec<Option<u64>> = (0..num_threads())
            .map(|_| random.then(|| root_rng.gen()))
            .collect();

        std::thread::scope(|scope| {
            for seed in seeds {
                let shared = &shared;
                scope.spawn(move || self.find_worker(shared, seed));
            }
        });

        let canceled = shared.canceled.load(Ordering::SeqCst);
        match shared.solution.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()) {
            Some(board) => SingleSolutionResult::Solved(Box::new(board)),
            None if canceled => SingleSolutionResult::Canceled,
            None => SingleSolutionResult::None,
        }
    }

    fn find_worker(&self, shared: &FindSharedState, seed: Option<u64>) {
        let mut rng = seed.map(StdRng::seed_from_u64);
        loop {
            if shared.stop.load(Ordering::Relaxed) {
                return;
            }
            if shared.cancellation.check() {
                shared.canceled.store(true, Ordering::SeqCst);
                shared.stop.store(true, Ordering::Relaxed);
                return;
            }

            // The active count is raised while the queue lock is held, so
            // an empty queue with a zero active count really means done.
            let board = match shared.queue.lock() {
                Ok(mut queue) => {
                    let board = queue.pop();
                    if board.is_some() {
                        shared.active.fetch_add(1, Ordering::SeqCst);
                    }
                    board
                }
                Err(_) => return,
            };

            match board {
                Some(board) => {
                    self.find_subtree(board, shared, rng.as_mut());
                    shared.active.fetch_sub(1, Ordering::SeqCst);
                }
                None => {
                    if shared.active.load(Ordering::SeqCst) == 0 {
                        return;
                    }
                    std::thread::yield_now();
                }
            }
        }
    }

    fn find_subtree(&self, board: Board, shared: &FindSharedState, mut rng: Option<&mut StdRng>) {
        let mut nodes = 0usize;
        let mut stack = vec![board];
        while let Some(mut board) = stack.pop() {
            if shared.stop.load(Ordering::Relaxed) {
                return;
            }
            nodes += 1;
            if nodes % CANCEL_POLL_EVERY == 0 && shared.cancellation.check() {
                shared.canceled.store(true, Ordering::SeqCst);
                shared.stop.store(true, Ordering::Relaxed);
                return;
            }

            if !self.run_brute_force_logic(&mut board) {
                continue;
            }
            if board.is_solved() {
                if let Ok(mut solution) = shared.solution.lock() {
                    solution.get_or_insert(board);
                }
                shared.stop.store(true, Ordering::Relaxed);
                return;
            }

            self.push_branches(&board, &mut stack, rng.as_deref_mut());

            if stack.len() > 1 {
                if let Ok(mut queue) = shared.queue.lock() {
                    if queue.len() < WORK_QUEUE_TARGET {
                        queue.push(stack.remove(0));
                    }
                }
            }
        }
    }

    /// Counts solutions, exactly up to `maximum_count` (0 means count them
    /// all). Solutions and progress heartbeats are streamed to `receiver`;
    /// single-threaded counts deliver solutions in ascending order.
    ///
    /// The result records what, if anything, cut the count short.
    pub fn find_solution_count(
        &self,
        maximum_count: usize,
        mut receiver: Option<&mut dyn SolutionReceiver>,
        cancellation: impl Into<Cancellation>,
    ) -> SolutionCountResult {
        let cancellation = cancellation.into();
        let mut count = 0usize;
        let mut nodes = 0usize;
        let mut stack = vec![self.board.clone()];

        while let Some(mut board) = stack.pop() {
            nodes += 1;
            if nodes % CANCEL_POLL_EVERY == 0 && cancellation.check() {
                return SolutionCountResult::cut_off(count, CountCutoff::Canceled);
            }
            if nodes % PROGRESS_EVERY == 0 {
                if let Some(receiver) = receiver.as_mut() {
                    if !receiver.receive(SolveEvent::Progress(count)) {
                        return SolutionCountResult::cut_off(count, CountCutoff::ReceiverStopped);
                    }
                }
            }

            if !self.run_brute_force_logic(&mut board) {
                continue;
            }

            if board.is_solved() {
                count += 1;
                if let Some(receiver) = receiver.as_mut() {
                    if !receiver.receive(SolveEvent::Solution(&board)) {
                        return SolutionCountResult::cut_off(count, CountCutoff::ReceiverStopped);
                    }
                }
                if maximum_count != 0 && count >= maximum_count {
                    return SolutionCountResult::cut_off(count, CountCutoff::MaximumReached);
                }
                continue;
            }

            self.push_branches(&board, &mut stack, None);
        }

        SolutionCountResult::exact(count)
    }

    /// Counts solutions using every available core. Receiver invocations are
    /// serialized but unordered.
    pub fn find_solution_count_multithreaded(
        &self,
        maximum_count: usize,
        receiver: Option<&mut (dyn SolutionReceiver + Send)>,
        cancellation: impl Into<Cancellation>,
    ) -> SolutionCountResult {
        let cancellation = cancellation.into();
        let shared = CountSharedState {
            queue: Mutex::new(vec![self.board.clone()]),
            active: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
            receiver_stopped: AtomicBool::new(false),
            count: AtomicUsize::new(0),
            receiver: Mutex::new(receiver),
            maximum_count,
            cancellation,
        };

        std::thread::scope(|scope| {
            for _ in 0..num_threads() {
                let shared = &shared;
                scope.spawn(move || self.count_worker(shared));
            }
        });

        let count = shared.count.load(Ordering::SeqCst);
        if shared.canceled.load(Ordering::SeqCst) {
            SolutionCountResult::cut_off(count, CountCutoff::Canceled)
        } else if shared.receiver_stopped.load(Ordering::SeqCst) {
            SolutionCountResult::cut_off(count, CountCutoff::ReceiverStopped)
        } else if maximum_count != 0 && count >= maximum_count {
            SolutionCountResult::cut_off(count, CountCutoff::MaximumReached)
        } else {
            SolutionCountResult::exact(count)
        }
    }

    fn count_worker(&self, shared: &CountSharedState) {
        loop {
            if shared.stop.load(Ordering::Relaxed) {
                return;
            }
            if shared.cancellation.check() {
                shared.canceled.store(true, Ordering::SeqCst);
                shared.stop.store(true, Ordering::Relaxed);
                return;
            }

            let board = match shared.queue.lock() {
                Ok(mut queue) => {
                    let board = queue.pop();
                    if board.is_some() {
                        shared.active.fetch_add(1, Ordering::SeqCst);
                    }
                    board
                }
                Err(_) => return,
            };

            match board {
                Some(board) => {
                    self.count_subtree(board, shared);
                    shared.active.fetch_sub(1, Ordering::SeqCst);
                }
                None => {
                    if shared.active.load(Ordering::SeqCst) == 0 {
                        return;
                    }
                    std::thread::yield_now();
                }
            }
        }
    }

    fn count_subtree(&self, board: Board, shared: &CountSharedState) {
        let mut nodes = 0usize;
        let mut stack = vec![board];
        while let Some(mut board) = stack.pop() {
            if shared.stop.load(Ordering::Relaxed) {
                return;
            }
            nodes += 1;
            if nodes % CANCEL_POLL_EVERY == 0 && shared.cancellation.check() {
                shared.canceled.store(true, Ordering::SeqCst);
                shared.stop.store(true, Ordering::Relaxed);
                return;
            }

            if !self.run_brute_force_logic(&mut board) {
                continue;
            }

            if board.is_solved() {
                let count = shared.count.fetch_add(1, Ordering::SeqCst) + 1;
                if let Ok(mut receiver) = shared.receiver.lock() {
                    if let Some(receiver) = receiver.as_mut() {
                        let keep_going = receiver.receive(SolveEvent::Progress(count))
                            && receiver.receive(SolveEvent::Solution(&board));
                        if !keep_going {
                            shared.receiver_stopped.store(true, Ordering::SeqCst);
                            shared.stop.store(true, Ordering::Relaxed);
                            return;
                        }
                    }
                }
                if shared.maximum_count != 0 && count >= shared.maximum_count {
                    shared.stop.store(true, Ordering::Relaxed);
                    return;
                }
                continue;
            }

            self.push_branches(&board, &mut stack, None);

            if stack.len() > 1 {
                if let Ok(mut queue) = shared.queue.lock() {
                    if queue.len() < WORK_QUEUE_TARGET {
                        queue.push(stack.remove(0));
                    }
                }
            }
        }
    }

    /// Computes the union of all solutions: a board whose candidates are
    /// exactly those that appear in at least one completion.
    ///
    /// Each solution found along the way proves many candidates at once, so
    /// the per-candidate searches shrink quickly.
    pub fn find_true_candidates(&self, cancellation: impl Into<Cancellation>) -> SingleSolutionResult {
        let cancellation = cancellation.into();
        let mut union_masks: Vec<ValueMask> = vec![ValueMask::new(); self.board.num_cells()];
        let mut any_solution = false;

        for cell in self.board.all_cells() {
            for value in self.board.cell(cell).unsolved() {
                if cancellation.check() {
                    return SingleSolutionResult::Canceled;
                }
                if union_masks[cell.index()].has(value) {
                    continue;
                }

                let mut child = self.board.clone();
                if !child.set_solved(cell, value) {
                    continue;
                }
                match self.first_solution_from(child, None, &cancellation) {
                    SingleSolutionResult::Solved(solution) => {
                        any_solution = true;
                        for (solution_cell, mask) in solution.all_cell_masks() {
                            union_masks[solution_cell.index()] =
                                union_masks[solution_cell.index()] | mask.unsolved();
                        }
                    }
                    SingleSolutionResult::Canceled => return SingleSolutionResult::Canceled,
                    SingleSolutionResult::None => {}
                }
            }
        }

        if !any_solution {
            return SingleSolutionResult::None;
        }

        let mut union_board = self.board.clone();
        for cell in self.board.all_cells() {
            if union_board.keep_mask(cell, union_masks[cell.index()]).is_invalid() {
                return SingleSolutionResult::None;
            }
        }
        SingleSolutionResult::Solved(Box::new(union_board))
    }

    /// Like [`Solver::find_true_candidates`], but also counts, per
    /// candidate, in how many solutions it appears, capped at
    /// `maximum_count`.
    pub fn find_true_candidates_with_count(
        &self,
        maximum_count: usize,
        cancellation: impl Into<Cancellation>,
    ) -> TrueCandidatesCountResult {
        let cancellation = cancellation.into();
        let candidates = self.unsolved_candidate_list();
        let mut counts = vec![0usize; self.board.num_candidates()];

        for candidate in candidates {
            if cancellation.check() {
                return TrueCandidatesCountResult::Canceled;
            }
            let (cell, value) = candidate.cell_index_and_value();
            let mut child = self.board.clone();
            if !child.set_solved(cell, value) {
                continue;
            }
            counts[candidate.index()] = self.count_from(child, maximum_count, &cancellation);
        }

        self.true_candidates_result_from_counts(counts)
    }

    /// Multithreaded variant of [`Solver::find_true_candidates_with_count`]:
    /// worker threads claim candidates from a shared cursor.
    pub fn find_true_candidates_with_count_multithreaded(
        &self,
        maximum_count: usize,
        cancellation: impl Into<Cancellation>,
    ) -> TrueCandidatesCountResult {
        let cancellation = cancellation.into();
        let candidates = self.unsolved_candidate_list();
        let counts = Mutex::new(vec![0usize; self.board.num_candidates()]);
        let next = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..num_threads() {
                let candidates = &candidates;
                let counts = &counts;
                let next = &next;
                let cancellation = &cancellation;
                scope.spawn(move || loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    if index >= candidates.len() || cancellation.check() {
                        return;
                    }
                    let candidate = candidates[index];
                    let (cell, value) = candidate.cell_index_and_value();
                    let mut child = self.board.clone();
                    if !child.set_solved(cell, value) {
                        continue;
                    }
                    let count = self.count_from(child, maximum_count, cancellation);
                    if let Ok(mut counts) = counts.lock() {
                        counts[candidate.index()] = count;
                    }
                });
            }
        });

        if cancellation.check() {
            return TrueCandidatesCountResult::Canceled;
        }

        let counts = counts.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.true_candidates_result_from_counts(counts)
    }

    fn unsolved_candidate_list(&self) -> Vec<CandidateIndex> {
        let mut candidates = Vec::new();
        for (cell, mask) in self.board.all_cell_masks() {
            for value in mask.unsolved() {
                candidates.push(cell.candidate(value));
            }
        }
        candidates
    }

    fn count_from(&self, start: Board, maximum_count: usize, cancellation: &Cancellation) -> usize {
        let mut count = 0usize;
        let mut nodes = 0usize;
        let mut stack = vec![start];
        while let Some(mut board) = stack.pop() {
            nodes += 1;
            if nodes % CANCEL_POLL_EVERY == 0 && cancellation.check() {
                return count;
            }
            if !self.run_brute_force_logic(&mut board) {
                continue;
            }
            if board.is_solved() {
                count += 1;
                if maximum_count != 0 && count >= maximum_count {
                    return count;
                }
                continue;
            }
            self.push_branches(&board, &mut stack, None);
        }
        count
    }

    fn true_candidates_result_from_counts(&self, counts: Vec<usize>) -> TrueCandidatesCountResult {
        if counts.iter().all(|&count| count == 0) {
            return TrueCandidatesCountResult::None;
        }

        let cu = self.cell_utility();
        let mut union_board = self.board.clone();
        for (cell, mask) in self.board.all_cell_masks() {
            let mut keep = ValueMask::new();
            for value in mask.unsolved() {
                if counts[cu.candidate(cell, value).index()] > 0 {
                    keep = keep.with(value);
                }
            }
            if union_board.keep_mask(cell, keep).is_invalid() {
                return TrueCandidatesCountResult::None;
            }
        }

        TrueCandidatesCountResult::Candidates(Box::new(union_board), counts)
    }

    /// Estimates the number of solutions with random descents of the search
    /// tree. The running estimate is reported to `progress` periodically.
    pub fn estimate_solution_count(
        &self,
        iterations: usize,
        mut progress: Option<&mut dyn FnMut(&SolutionEstimateResult)>,
        cancellation: impl Into<Cancellation>,
    ) -> SolutionEstimateResult {
        let cancellation = cancellation.into();
        let mut rng = StdRng::from_entropy();
        let mut result = SolutionEstimateResult::new();

        for iteration in 0..iterations {
            if cancellation.check() {
                result.set_canceled();
                break;
            }
            result.add_sample(self.estimate_sample(&mut rng));
            if (iteration + 1) % 64 == 0 {
                if let Some(progress) = progress.as_mut() {
                    progress(&result);
                }
            }
        }

        result
    }

    /// Multithreaded variant of [`Solver::estimate_solution_count`]. Each
    /// worker owns an RNG seeded from a root RNG and the accumulators are
    /// merged.
    pub fn estimate_solution_count_multithreaded(
        &self,
        iterations: usize,
        progress: Option<&mut (dyn FnMut(&SolutionEstimateResult) + Send)>,
        cancellation: impl Into<Cancellation>,
    ) -> SolutionEstimateResult {
        let cancellation = cancellation.into();
        let shared = Mutex::new((SolutionEstimateResult::new(), progress));
        let next = AtomicUsize::new(0);

        let mut root_rng = StdRng::from_entropy();
        let seeds: Vec<u64> = (0..num_threads()).map(|_| root_rng.gen()).collect();

        std::thread::scope(|scope| {
            for seed in seeds {
                let shared = &shared;
                let next = &next;
                let cancellation = &cancellation;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut local = SolutionEstimateResult::new();
                    loop {
                        let iteration = next.fetch_add(1, Ordering::Relaxed);
                        if iteration >= iterations {
                            break;
                        }
                        if cancellation.check() {
                            local.set_canceled();
                            break;
                        }
                        local.add_sample(self.estimate_sample(&mut rng));
                        if local.iterations() % 64 == 0 {
                            if let Ok(mut shared) = shared.lock() {
                                shared.0.merge(&local);
                                local = SolutionEstimateResult::new();
                                let (merged, progress) = &mut *shared;
                                if let Some(progress) = progress.as_mut() {
                                    progress(merged);
                                }
                            }
                        }
                    }
                    if let Ok(mut shared) = shared.lock() {
                        shared.0.merge(&local);
                    }
                });
            }
        });

        let (result, _) = shared.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
        result
    }

    // One Knuth sample: descend with uniform random choices, multiplying
    // the branching factors; a dead end samples zero.
    fn estimate_sample(&self, rng: &mut StdRng) -> f64 {
        let mut board = self.board.clone();
        let mut weight = 1.0f64;
        loop {
            if !self.run_brute_force_logic(&mut board) {
                return 0.0;
            }
            if board.is_solved() {
                return weight;
            }
            let Some(cell) = board.best_branch_cell() else {
                return 0.0;
            };
            let values = board.cell(cell).to_vec();
            weight *= values.len() as f64;
            let value = values[rng.gen_range(0..values.len())];
            if !board.set_solved(cell, value) {
                return 0.0;
            }
        }
    }
}

struct FindSharedState {
    queue: Mutex<Vec<Board>>,
    active: AtomicUsize,
    stop: AtomicBool,
    canceled: AtomicBool,
    solution: Mutex<Option<Board>>,
    cancellation: Cancellation,
}

struct CountSharedState<'a> {
    queue: Mutex<Vec<Board>>,
    active: AtomicUsize,
    stop: AtomicBool,
    canceled: AtomicBool,
    receiver_stopped: AtomicBool,
    count: AtomicUsize,
    receiver: Mutex<Option<&'a mut (dyn SolutionReceiver + Send)>>,
    maximum_count: usize,
    cancellation: Cancellation,
}

fn num_threads() -> usize {
    std::thread::available_parallelism().map(|threads| threads.get()).unwrap_or(1)
}

#[cfg(test)]
mod test {
    use super::*;

    const CLASSIC_GIVENS: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const CLASSIC_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn classic_solver() -> Solver {
        SolverBuilder::default().with_givens_string(CLASSIC_GIVENS).build().unwrap()
    }

    #[test]
    fn test_classic_unique_solution() {
        let solver = classic_solver();

        let result = solver.find_first_solution(Cancellation::default());
        assert!(result.is_solved());
        assert_eq!(result.board().unwrap().to_string(), CLASSIC_SOLUTION);

        let count = solver.find_solution_count(0, None, Cancellation::default());
        assert_eq!(count, SolutionCountResult::exact(1));
    }

    #[test]
    fn test_classic_multithreaded_agrees() {
        let solver = classic_solver();

        let result = solver.find_solution_multithreaded(false, Cancellation::default());
        assert!(result.is_solved());
        assert_eq!(result.board().unwrap().to_string(), CLASSIC_SOLUTION);

        let count = solver.find_solution_count_multithreaded(0, None, Cancellation::default());
        assert_eq!(count, SolutionCountResult::exact(1));
    }

    #[test]
    fn test_corrupted_classic_has_no_solution() {
        // Replace the 5 in r1c1 with a 1, which contradicts the known
        // completion.
        let mut givens: Vec<u8> = CLASSIC_GIVENS.bytes().collect();
        givens[0] = b'1';
        let givens = String::from_utf8(givens).unwrap();

        match SolverBuilder::default().with_givens_string(&givens).build() {
            Ok(solver) => {
                let count = solver.find_solution_count(2, None, Cancellation::default());
                assert_eq!(count, SolutionCountResult::exact(0));
            }
            // The contradiction may already surface while applying givens.
            Err(_) => {}
        }
    }

    #[test]
    fn test_erased_given_multiple_solutions() {
        // Erase one given; the puzzle is no longer unique.
        let mut givens: Vec<u8> = CLASSIC_GIVENS.bytes().collect();
        givens[0] = b'.';
        let givens = String::from_utf8(givens).unwrap();
        let solver = SolverBuilder::default().with_givens_string(&givens).build().unwrap();

        let count = solver.find_solution_count(2, None, Cancellation::default());
        assert!(count.count() >= 2, "{:?}", count);

        // True candidates flags more than one choice somewhere.
        let result = solver.find_true_candidates_with_count(2, Cancellation::default());
        let counts = result.candidate_counts().expect("expected candidate counts");
        let ambiguous = counts.iter().filter(|&&count| count >= 2).count();
        assert!(ambiguous >= 2, "ambiguous candidates: {}", ambiguous);
    }

    #[test]
    fn test_kernel_entry_points() {
        let mut solver = SolverBuilder::default().build().unwrap();
        let cu = solver.cell_utility();

        assert!(solver.set_value(cu.cell(0, 0), 5));
        assert!(solver.clear_value(cu.cell(0, 1), 6));
        assert!(solver.keep_mask(cu.cell(0, 2), ValueMask::from_values(&[1, 2, 3])).is_changed());

        assert!(solver.board().cell(cu.cell(0, 0)).is_solved());
        assert!(!solver.board().cell(cu.cell(0, 1)).has(6));
        assert_eq!(solver.board().cell(cu.cell(0, 2)), ValueMask::from_values(&[1, 2, 3]));
    }

    #[test]
    fn test_random_solution_is_valid() {
        let solver = classic_solver();
        let result = solver.find_random_solution(Cancellation::default());
        // Unique puzzle: random ordering still finds the same solution.
        assert_eq!(result.board().unwrap().to_string(), CLASSIC_SOLUTION);
    }

    #[test]
    fn test_solution_receiver() {
        let mut givens: Vec<u8> = CLASSIC_GIVENS.bytes().collect();
        givens[0] = b'.';
        let givens = String::from_utf8(givens).unwrap();
        let solver = SolverBuilder::default().with_givens_string(&givens).build().unwrap();

        let mut receiver = CollectingReceiver::new();
        let count = solver.find_solution_count(3, Some(&mut receiver), Cancellation::default());
        assert_eq!(count.count(), receiver.solutions().len());
        for solution in receiver.solutions() {
            assert!(solution.is_solved());
        }

        // A receiver can end the count after the first solution.
        struct StopAfterFirst;
        impl SolutionReceiver for StopAfterFirst {
            fn receive(&mut self, event: SolveEvent) -> bool {
                !matches!(event, SolveEvent::Solution(_))
            }
        }
        let count =
            solver.find_solution_count(0, Some(&mut StopAfterFirst), Cancellation::default());
        assert_eq!(count, SolutionCountResult::cut_off(1, CountCutoff::ReceiverStopped));
    }

    #[test]
    fn test_true_candidates_of_unique_puzzle() {
        let solver = classic_solver();
        let result = solver.find_true_candidates(Cancellation::default());
        assert!(result.is_solved());
        // The union of all solutions of a unique puzzle is the solution.
        assert_eq!(result.board().unwrap().to_string(), CLASSIC_SOLUTION);
    }

    #[test]
    fn test_cancellation_returns_partial_count() {
        let solver = SolverBuilder::default().build().unwrap();
        // Cancel immediately: an empty board has a vast number of
        // solutions, so the count must come back as a canceled lower bound.
        let count = solver.find_solution_count(0, None, Cancellation::new(|| true));
        assert!(count.is_canceled(), "{:?}", count);
    }

    #[test]
    fn test_estimate_near_complete_puzzle() {
        // The full solution minus its last cell solves by propagation
        // alone, so every random descent samples exactly one solution.
        let mut givens = CLASSIC_SOLUTION.to_owned();
        givens.pop();
        givens.push('.');
        let solver = SolverBuilder::default().with_givens_string(&givens).build().unwrap();

        let estimate = solver.estimate_solution_count(32, None, Cancellation::default());
        assert_eq!(estimate.iterations(), 32);
        assert!((estimate.estimate() - 1.0).abs() < 1e-9);
        assert!(estimate.standard_error() < 1e-9);
    }

    #[test]
    fn test_multithreaded_true_candidates_and_estimate() {
        let solver = classic_solver();
        let result =
            solver.find_true_candidates_with_count_multithreaded(2, Cancellation::default());
        match result {
            TrueCandidatesCountResult::Candidates(board, _) => {
                // A solved union board is the unique solution.
                assert!(board.is_solved());
                assert_eq!(board.to_string(), CLASSIC_SOLUTION);
            }
            _ => panic!("expected the unique solution"),
        }

        let mut givens = CLASSIC_SOLUTION.to_owned();
        givens.pop();
        givens.push('.');
        let near_complete =
            SolverBuilder::default().with_givens_string(&givens).build().unwrap();
        let estimate = near_complete.estimate_solution_count_multithreaded(
            64,
            None,
            Cancellation::default(),
        );
        assert_eq!(estimate.iterations(), 64);
        assert!((estimate.estimate() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_logical_solve_classic() {
        let mut solver = classic_solver();
        let result = solver.run_logical_solve(Cancellation::default());
        assert!(result.is_solved(), "expected logical solve, got {:?}", result);
        assert_eq!(solver.board().to_string(), CLASSIC_SOLUTION);
    }
}
