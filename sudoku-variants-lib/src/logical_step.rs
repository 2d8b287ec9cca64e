//! Contains the [`LogicalStep`] trait and the built-in solving techniques.
//!
//! Techniques are ordered by the solver from cheapest to most expensive; a
//! single invocation of the engine runs them in order and stops at the first
//! one that changes the board. Each technique reports what it did through a
//! [`LogicalStepResult`], carrying a human-readable
//! [`LogicalStepDesc`] when descriptions were requested.

pub mod all_naked_singles;
pub mod chain;
pub mod contradiction;
pub mod fish;
pub mod hidden_single;
pub mod hidden_tuple;
pub mod logical_step_desc;
pub mod logical_step_desc_list;
pub mod logical_step_result;
pub mod naked_single;
pub mod naked_tuple;
pub mod pointing;
pub mod simple_cell_forcing;
pub mod step_constraints;
pub mod wing;

use crate::prelude::*;

/// A single human-style solving technique.
///
/// Implementations scan the board for the first application of their
/// technique, apply it through the kernel, and return. They hold no mutable
/// state of their own, so one instance can serve any number of boards.
pub trait LogicalStep: Send + Sync {
    /// A short name for this technique, used as the description prefix.
    fn name(&self) -> &'static str;

    /// Whether this step runs during user-facing logical solves.
    fn is_active_during_logical_solves(&self) -> bool {
        true
    }

    /// Whether this step runs during brute force solves. Only techniques
    /// that prune the search tree more cheaply than guessing belong there.
    fn is_active_during_brute_force_solves(&self) -> bool {
        false
    }

    /// Whether this step writes its own prefix into descriptions instead of
    /// having the engine prepend its name.
    fn has_own_prefix(&self) -> bool {
        false
    }

    /// Runs one application of the technique.
    ///
    /// `generate_description` is false during brute forcing, where building
    /// description strings would only cost time.
    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult;
}
