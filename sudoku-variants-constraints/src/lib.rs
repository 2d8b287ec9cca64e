//! Standard variant constraints for `sudoku-variants-lib`, together with
//! the registry that builds them from `name:options` strings and a JSON
//! message handler for driving the solver from a front end.

pub mod arrow_sum_constraint;
pub mod chess_constraint;
pub mod constraint_registry;
pub mod diagonal_pairs_constraint;
pub mod killer_cage_constraint;
pub mod message_handler;
pub mod non_repeat_constraint;
pub mod orthogonal_pairs_constraint;
pub mod prelude;
pub mod standard_pair_type;
