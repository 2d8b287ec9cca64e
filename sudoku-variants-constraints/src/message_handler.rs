//! Contains the [`MessageHandler`], which services JSON requests against
//! the solver and streams JSON responses back.

pub mod message;
pub mod responses;

use crate::constraint_registry::ConstraintRegistry;
use sudoku_variants_lib::prelude::*;

use self::message::*;
use self::responses::*;

/// The sink responses are written to. Progress updates can arrive from
/// worker threads, so sinks must be [`Send`].
pub trait SendResult: Send {
    fn send_result(&mut self, result: &str);
}

/// Parses request messages, builds solvers through the constraint registry,
/// runs the requested solve, and emits tagged JSON responses.
pub struct MessageHandler {
    send_result: Box<dyn SendResult>,
    cancellation: Cancellation,
    registry: ConstraintRegistry,
}

impl MessageHandler {
    pub fn new(send_result: Box<dyn SendResult>) -> Self {
        Self {
            send_result,
            cancellation: Cancellation::default(),
            registry: ConstraintRegistry::standard(),
        }
    }

    fn send_result(&mut self, result: &str) {
        self.send_result.send_result(result);
    }

    /// Handles one request. Responses, including progress updates, are
    /// written to the sink.
    pub fn handle_message(&mut self, message: &str, cancellation: Cancellation) {
        self.cancellation = cancellation;

        if self.cancellation.check() {
            return;
        }

        let message = match Message::from_json(message) {
            Ok(message) => message,
            Err(error) => {
                let response = InvalidResponse::new(0, &error.to_string()).to_json();
                self.send_result(&response);
                return;
            }
        };
        let nonce = message.nonce();

        if message.command() == "cancel" {
            let response = CanceledResponse::new(nonce).to_json();
            self.send_result(&response);
            return;
        }

        if message.data_type() != "puzzle" {
            let response =
                InvalidResponse::new(nonce, "Invalid data type. Expected 'puzzle'.").to_json();
            self.send_result(&response);
            return;
        }

        let payload = match PuzzlePayload::from_json(message.data()) {
            Ok(payload) => payload,
            Err(error) => {
                let response = InvalidResponse::new(nonce, &error.to_string()).to_json();
                self.send_result(&response);
                return;
            }
        };

        let solver = match self.build_solver(&payload) {
            Ok(solver) => solver,
            Err(error) => {
                let response = InvalidResponse::new(nonce, &error.to_string()).to_json();
                self.send_result(&response);
                return;
            }
        };

        let multithread = message.multithread();
        let result = match message.command() {
            "solve" => self.find_solution(nonce, solver, multithread, false),
            "random" => self.find_solution(nonce, solver, multithread, true),
            "check" => self.count(nonce, solver, 2, multithread),
            "count" => self.count(nonce, solver, 0, multithread),
            "truecandidates" => self.true_candidates(nonce, solver, multithread),
            "logical" | "solvepath" => self.solve_path(nonce, solver),
            "step" => self.step(nonce, solver),
            "estimate" => self.estimate(nonce, solver, multithread),
            command => {
                InvalidResponse::new(nonce, &format!("Unknown command: {}", command)).to_json()
            }
        };

        self.send_result(&result);
    }

    fn build_solver(&self, payload: &PuzzlePayload) -> Result<Solver, SolverError> {
        let mut builder = SolverBuilder::new(payload.size);
        if !payload.givens.is_empty() {
            builder = builder.with_givens_string(&payload.givens);
        }
        if !payload.candidates.is_empty() {
            builder = builder.with_candidates_string(&payload.candidates);
        }
        for entry in &payload.constraints {
            for constraint in self.registry.build(payload.size, &entry.name, &entry.options)? {
                builder = builder.with_constraint(constraint);
            }
        }
        builder.build()
    }

    fn solution_values(board: &Board) -> Vec<i32> {
        board.all_cell_masks().map(|(_, mask)| mask.value() as i32).collect()
    }

    fn find_solution(&self, nonce: i32, solver: Solver, multithread: bool, random: bool) -> String {
        let result = if multithread {
            solver.find_solution_multithreaded(random, self.cancellation.clone())
        } else if random {
            solver.find_random_solution(self.cancellation.clone())
        } else {
            solver.find_first_solution(self.cancellation.clone())
        };

        match result {
            SingleSolutionResult::Solved(board) => {
                SolvedResponse::new(nonce, &Self::solution_values(&board)).to_json()
            }
            SingleSolutionResult::None => {
                InvalidResponse::new(nonce, "No solutions found.").to_json()
            }
            SingleSolutionResult::Canceled => CanceledResponse::new(nonce).to_json(),
        }
    }

    fn count(&mut self, nonce: i32, solver: Solver, maximum_count: usize, multithread: bool) -> String {
        // Forwards heartbeats as in-progress count responses; solutions
        // themselves are not needed, only the final tally.
        struct ProgressReceiver<'a> {
            sink: &'a mut Box<dyn SendResult>,
            nonce: i32,
        }

        impl SolutionReceiver for ProgressReceiver<'_> {
            fn receive(&mut self, event: SolveEvent) -> bool {
                if let SolveEvent::Progress(progress) = event {
                    let response = CountResponse::new(self.nonce, progress as u64, true).to_json();
                    self.sink.send_result(&response);
                }
                true
            }
        }

        let mut receiver = ProgressReceiver { sink: &mut self.send_result, nonce };
        let result = if multithread {
            solver.find_solution_count_multithreaded(
                maximum_count,
                Some(&mut receiver),
                self.cancellation.clone(),
            )
        } else {
            solver.find_solution_count(
                maximum_count,
                Some(&mut receiver),
                self.cancellation.clone(),
            )
        };

        if result.is_canceled() {
            return CanceledResponse::new(nonce).to_json();
        }

        CountResponse::new(nonce, result.count() as u64, false).to_json()
    }

    fn true_candidates(&self, nonce: i32, solver: Solver, multithread: bool) -> String {
        let result = if multithread {
            solver.find_true_candidates_with_count_multithreaded(8, self.cancellation.clone())
        } else {
            solver.find_true_candidates_with_count(8, self.cancellation.clone())
        };

        match result {
            TrueCandidatesCountResult::Candidates(_, counts) => {
                let counts: Vec<i32> = counts.iter().map(|&count| count as i32).collect();
                TrueCandidatesResponse::new(nonce, &counts).to_json()
            }
            TrueCandidatesCountResult::None => {
                InvalidResponse::new(nonce, "No solutions found.").to_json()
            }
            TrueCandidatesCountResult::Canceled => CanceledResponse::new(nonce).to_json(),
        }
    }

    fn logical_cells(board: &Board) -> Vec<LogicalCell> {
        board
            .all_cell_masks()
            .map(|(_, mask)| {
                if mask.is_solved() {
                    LogicalCell { value: mask.value() as i32, candidates: Vec::new() }
                } else {
                    LogicalCell {
                        value: 0,
                        candidates: mask.into_iter().map(|value| value as i32).collect(),
                    }
                }
            })
            .collect()
    }

    fn solve_path(&self, nonce: i32, mut solver: Solver) -> String {
        let result = solver.run_logical_solve(self.cancellation.clone());
        let message = result.steps().to_string();
        LogicalResponse::new(nonce, Self::logical_cells(solver.board()), &message, !result.is_invalid())
            .to_json()
    }

    fn step(&self, nonce: i32, mut solver: Solver) -> String {
        let result = solver.run_single_logical_step();
        let message = match result.description() {
            Some(desc) => desc.to_string(),
            None if result.is_none() => "No logical steps found.".to_owned(),
            None => String::new(),
        };
        LogicalResponse::new(nonce, Self::logical_cells(solver.board()), &message, !result.is_invalid())
            .to_json()
    }

    fn estimate(&self, nonce: i32, solver: Solver, multithread: bool) -> String {
        const ESTIMATE_ITERATIONS: usize = 10000;

        let result = if multithread {
            solver.estimate_solution_count_multithreaded(
                ESTIMATE_ITERATIONS,
                None,
                self.cancellation.clone(),
            )
        } else {
            solver.estimate_solution_count(ESTIMATE_ITERATIONS, None, self.cancellation.clone())
        };

        EstimateResponse::new(
            nonce,
            result.estimate(),
            result.standard_error(),
            result.iterations() as u64,
            result.confidence_interval_95(),
        )
        .to_json()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc;

    struct ChannelSink {
        sender: mpsc::Sender<String>,
    }

    impl SendResult for ChannelSink {
        fn send_result(&mut self, result: &str) {
            let _ = self.sender.send(result.to_owned());
        }
    }

    fn handler() -> (MessageHandler, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel();
        (MessageHandler::new(Box::new(ChannelSink { sender })), receiver)
    }

    fn classic_payload() -> String {
        PuzzlePayload {
            size: 9,
            givens:
                "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
                    .to_owned(),
            candidates: String::new(),
            constraints: Vec::new(),
        }
        .to_json()
    }

    #[test]
    fn test_solve_message() {
        let (mut handler, receiver) = handler();
        let request = Message::new(7, "solve", "puzzle", &classic_payload(), false).to_json();
        handler.handle_message(&request, Cancellation::default());

        let response = receiver.recv().expect("expected a response");
        assert!(response.contains("\"type\":\"solved\""), "{}", response);
        assert!(response.contains("\"nonce\":7"), "{}", response);
    }

    #[test]
    fn test_check_message() {
        let (mut handler, receiver) = handler();
        let request = Message::new(8, "check", "puzzle", &classic_payload(), false).to_json();
        handler.handle_message(&request, Cancellation::default());

        let response = receiver.recv().expect("expected a response");
        assert!(response.contains("\"type\":\"count\""), "{}", response);
        assert!(response.contains("\"count\":1"), "{}", response);
        assert!(response.contains("\"inProgress\":false"), "{}", response);
    }

    #[test]
    fn test_unknown_command() {
        let (mut handler, receiver) = handler();
        let request = Message::new(9, "frobnicate", "puzzle", &classic_payload(), false).to_json();
        handler.handle_message(&request, Cancellation::default());

        let response = receiver.recv().expect("expected a response");
        assert!(response.contains("\"type\":\"invalid\""), "{}", response);
    }

    #[test]
    fn test_cancel_message() {
        let (mut handler, receiver) = handler();
        let request = Message::new(10, "cancel", "puzzle", "", false).to_json();
        handler.handle_message(&request, Cancellation::default());

        let response = receiver.recv().expect("expected a response");
        assert!(response.contains("\"type\":\"canceled\""), "{}", response);
    }

    #[test]
    fn test_constraint_payload() {
        let (mut handler, receiver) = handler();
        let payload = PuzzlePayload {
            size: 9,
            givens: String::new(),
            candidates: String::new(),
            constraints: vec![PuzzleConstraintEntry {
                name: "killer".to_owned(),
                options: "r1c1r1c2:3".to_owned(),
            }],
        }
        .to_json();
        let request = Message::new(11, "step", "puzzle", &payload, false).to_json();
        handler.handle_message(&request, Cancellation::default());

        let response = receiver.recv().expect("expected a response");
        assert!(response.contains("\"type\":\"logical\""), "{}", response);
    }
}
