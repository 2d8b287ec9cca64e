//! Contains [`SolverError`] which covers every failure that can surface while
//! constructing a puzzle.
//!
//! Once a [`crate::solver::Solver`] is built, contradictions are reported as
//! values ([`crate::logic_result::LogicResult::Invalid`]) rather than errors,
//! and cancellation yields partial results. Errors are therefore only produced
//! by the input boundary: board strings, option strings, and constraint
//! registration.

use thiserror::Error;

/// Errors produced while parsing puzzle input or building a solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The givens string does not match the board dimensions.
    #[error("givens string has length {actual}, expected {expected}")]
    WrongLengthGivens { expected: usize, actual: usize },

    /// The candidates string does not match the board dimensions.
    #[error("candidates string has length {actual}, expected {expected}")]
    WrongLengthCandidates { expected: usize, actual: usize },

    /// A board string contained a character which is neither a value
    /// character nor a placeholder.
    #[error("unrecognized character '{0}' in board string")]
    InvalidBoardCharacter(char),

    /// A value was requested from a cell mask which is not fixed to a
    /// single value.
    #[error("cell mask is not fixed to a single value")]
    InvalidCellState,

    /// A cell group string could not be parsed.
    #[error("invalid cell group: {0}")]
    InvalidCellGroup(String),

    /// A constraint rejected its options string.
    #[error("invalid options for constraint '{name}': {message}")]
    InvalidOptions { name: String, message: String },

    /// No constraint is registered under the given name.
    #[error("unknown constraint '{0}'")]
    UnknownConstraint(String),

    /// The puzzle could not be assembled into a valid solver.
    #[error("{0}")]
    Build(String),
}

impl SolverError {
    /// Convenience constructor for [`SolverError::InvalidOptions`].
    pub fn invalid_options(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidOptions { name: name.to_owned(), message: message.into() }
    }
}
