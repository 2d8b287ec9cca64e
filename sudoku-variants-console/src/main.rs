use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use itertools::Itertools;
use sudoku_variants_constraints::prelude::*;
use sudoku_variants_lib::prelude::*;

#[derive(Debug, Parser)]
#[clap(name = "Sudoku Variants Solver")]
#[clap(about = "Constraint-based solver for Sudoku and its variants.")]
#[clap(author, version, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct PuzzleArgs {
    /// Board size (N for an NxN grid)
    #[clap(short, long, default_value_t = 9)]
    size: usize,

    /// Givens as a flat row-major string; 0 or . for empty cells
    #[clap(short, long)]
    givens: Option<String>,

    /// Candidate string of length size^3 (. for eliminated candidates)
    #[clap(long)]
    candidates: Option<String>,

    /// Constraints as name=options, e.g. -c killer=r1c1r1c2:10 (repeatable)
    #[clap(short = 'c', long = "constraint")]
    constraints: Vec<String>,

    /// Solve on all available cores
    #[clap(short = 't', long)]
    multithread: bool,

    /// Logical steps to disable (tuples, pointing, fishes, wings,
    /// contradictions)
    #[clap(long = "disable-logic", value_delimiter = ',')]
    disabled_logic: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the first solution
    Solve(PuzzleArgs),
    /// Find a random solution
    Random(PuzzleArgs),
    /// Run the logical solver and print the solve path
    Logical(PuzzleArgs),
    /// Count all solutions
    Count {
        #[clap(flatten)]
        puzzle: PuzzleArgs,
        /// Stop counting at this many solutions (0 counts them all)
        #[clap(short, long, default_value_t = 0)]
        max_solutions: usize,
    },
    /// Check whether the puzzle has a unique solution
    Check(PuzzleArgs),
    /// Count, per candidate, the solutions it appears in
    Truecandidates(PuzzleArgs),
    /// Print the logical solve path without the final board
    Solvepath(PuzzleArgs),
    /// Run a single logical step
    Step(PuzzleArgs),
    /// Estimate the number of solutions by random descent
    Estimate {
        #[clap(flatten)]
        puzzle: PuzzleArgs,
        /// Number of Monte-Carlo iterations
        #[clap(short, long, default_value_t = 10000)]
        iterations: usize,
    },
}

impl Command {
    fn puzzle(&self) -> &PuzzleArgs {
        match self {
            Command::Solve(puzzle)
            | Command::Random(puzzle)
            | Command::Logical(puzzle)
            | Command::Check(puzzle)
            | Command::Truecandidates(puzzle)
            | Command::Solvepath(puzzle)
            | Command::Step(puzzle) => puzzle,
            Command::Count { puzzle, .. } | Command::Estimate { puzzle, .. } => puzzle,
        }
    }
}

fn build_solver(puzzle: &PuzzleArgs) -> Result<Solver, SolverError> {
    let registry = ConstraintRegistry::standard();
    let mut builder = SolverBuilder::new(puzzle.size);

    if let Some(givens) = &puzzle.givens {
        builder = builder.with_givens_string(givens);
    }
    if let Some(candidates) = &puzzle.candidates {
        builder = builder.with_candidates_string(candidates);
    }
    builder = builder.with_disabled_logic(puzzle.disabled_logic.iter().cloned());

    for constraint_arg in &puzzle.constraints {
        let (name, options) = match constraint_arg.split_once('=') {
            Some((name, options)) => (name, options),
            None => (constraint_arg.as_str(), ""),
        };
        for constraint in registry.build(puzzle.size, name, options)? {
            builder = builder.with_constraint(constraint);
        }
    }

    builder.build()
}

fn print_board(board: &Board) {
    let size = board.size();
    for row in 0..size {
        let cu = board.cell_utility();
        let line = (0..size)
            .map(|col| {
                let mask = board.cell(cu.cell(row, col));
                if mask.is_single() {
                    value_to_char(mask.value()).to_string()
                } else {
                    ".".to_owned()
                }
            })
            .join(" ");
        println!("{}", line);
    }
}

fn run(command: Command, solver: Solver) {
    // Ctrl-C terminates the process outright, so no cancel flag is wired
    // up here; embedders use the cancellation token instead.
    let cancellation = Cancellation::from_flag(&Arc::new(AtomicBool::new(false)));

    match command {
        Command::Solve(puzzle) => {
            let result = if puzzle.multithread {
                solver.find_solution_multithreaded(false, cancellation)
            } else {
                solver.find_first_solution(cancellation)
            };
            match result {
                SingleSolutionResult::Solved(board) => {
                    println!("{}", "Solution found:".green());
                    print_board(&board);
                    println!("{}", board);
                }
                SingleSolutionResult::None => eprintln!("{}", "No solutions found.".red()),
                SingleSolutionResult::Canceled => eprintln!("{}", "Canceled.".red()),
            }
        }
        Command::Random(puzzle) => {
            let result = if puzzle.multithread {
                solver.find_solution_multithreaded(true, cancellation)
            } else {
                solver.find_random_solution(cancellation)
            };
            match result {
                SingleSolutionResult::Solved(board) => {
                    println!("{}", "Solution found:".green());
                    print_board(&board);
                    println!("{}", board);
                }
                SingleSolutionResult::None => eprintln!("{}", "No solutions found.".red()),
                SingleSolutionResult::Canceled => eprintln!("{}", "Canceled.".red()),
            }
        }
        Command::Logical(_) => {
            let mut solver = solver;
            let result = solver.run_logical_solve(cancellation);
            if !result.steps().is_empty() {
                println!("{}", result.steps());
            }
            print_board(solver.board());
            match result.result() {
                LogicResult::Solved => println!("{}", "Solved logically.".green()),
                LogicResult::Invalid => eprintln!("{}", "The puzzle has no solution.".red()),
                _ => println!("{}", "Logic stalled before completion.".yellow()),
            }
        }
        Command::Solvepath(_) => {
            let mut solver = solver;
            let result = solver.run_logical_solve(cancellation);
            if result.steps().is_empty() {
                println!("No logical steps found.");
            } else {
                println!("{}", result.steps());
            }
        }
        Command::Step(_) => {
            let mut solver = solver;
            let result = solver.run_single_logical_step();
            match result.description() {
                Some(desc) => println!("{}", desc),
                None if result.is_none() => println!("No logical steps found."),
                None => {}
            }
            print_board(solver.board());
        }
        Command::Count { puzzle, max_solutions } => {
            let result = if puzzle.multithread {
                solver.find_solution_count_multithreaded(max_solutions, None, cancellation)
            } else {
                solver.find_solution_count(max_solutions, None, cancellation)
            };
            if result.is_exact() {
                println!("Found {} solutions.", result.count());
            } else {
                println!("Found at least {} solutions.", result.count());
            }
        }
        Command::Check(puzzle) => {
            let result = if puzzle.multithread {
                solver.find_solution_count_multithreaded(2, None, cancellation)
            } else {
                solver.find_solution_count(2, None, cancellation)
            };
            if result.is_canceled() {
                eprintln!("{}", "Canceled.".red());
            } else {
                match result.count() {
                    0 => eprintln!("{}", "The puzzle has no solutions.".red()),
                    1 => println!("{}", "The puzzle has a unique solution.".green()),
                    _ => println!("{}", "The puzzle has multiple solutions.".yellow()),
                }
            }
        }
        Command::Truecandidates(puzzle) => {
            let result = if puzzle.multithread {
                solver.find_true_candidates_with_count_multithreaded(8, cancellation)
            } else {
                solver.find_true_candidates_with_count(8, cancellation)
            };
            match result {
                TrueCandidatesCountResult::Candidates(board, _) if board.is_solved() => {
                    println!("{}", "The puzzle has a unique solution:".green());
                    print_board(&board);
                }
                TrueCandidatesCountResult::Candidates(board, _) => {
                    println!("True candidates:");
                    println!("{}", board.candidate_string());
                }
                TrueCandidatesCountResult::None => eprintln!("{}", "No solutions found.".red()),
                TrueCandidatesCountResult::Canceled => eprintln!("{}", "Canceled.".red()),
            }
        }
        Command::Estimate { puzzle, iterations } => {
            let mut print_progress = |estimate: &SolutionEstimateResult| {
                println!("{}", estimate);
            };
            let result = if puzzle.multithread {
                solver.estimate_solution_count_multithreaded(
                    iterations,
                    Some(&mut print_progress),
                    cancellation,
                )
            } else {
                solver.estimate_solution_count(iterations, Some(&mut print_progress), cancellation)
            };
            println!("{}", result.to_string().green());
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let solver = match build_solver(cli.command.puzzle()) {
        Ok(solver) => solver,
        Err(error) => {
            eprintln!("{}", error.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    run(cli.command, solver);
    ExitCode::SUCCESS
}
