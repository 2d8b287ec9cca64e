//! Constraint-propagation engine and solver kernel for Sudoku and its
//! variants.
//!
//! The [`crate::solver::Solver`] struct is the main entry point: it owns a
//! [`crate::board::Board`] along with the houses, per-house candidate
//! counters, and the weak link graph that the propagation kernel keeps
//! consistent. Solvers are assembled with
//! [`crate::solver::solver_builder::SolverBuilder`].
//!
//! Variant rules plug in through the [`crate::constraint::Constraint`]
//! trait; this library defines the contract and the helpers additive
//! constraints lean on ([`crate::sum_cells_helper::SumCellsHelper`],
//! [`crate::pill_helper::PillHelper`]) but ships no concrete constraints.
//! Human-style techniques implement [`crate::logical_step::LogicalStep`] and
//! can be extended or disabled per solve.

pub mod board;
pub mod candidate_index;
pub mod candidate_links;
pub mod cell_index;
pub mod cell_utility;
pub mod constraint;
pub mod elimination_list;
pub mod error;
pub mod house;
pub mod logic_result;
pub mod logical_step;
pub mod math;
pub mod pill_helper;
pub mod prelude;
pub mod solver;
pub mod sum_cells_helper;
pub mod value_mask;
