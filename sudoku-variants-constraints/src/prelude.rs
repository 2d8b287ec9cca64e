//! Re-exports the constraint types and the registry.

pub use crate::arrow_sum_constraint::ArrowSumConstraint;
pub use crate::chess_constraint::ChessConstraint;
pub use crate::constraint_registry::ConstraintRegistry;
pub use crate::diagonal_pairs_constraint::DiagonalPairsConstraint;
pub use crate::killer_cage_constraint::KillerCageConstraint;
pub use crate::message_handler::{MessageHandler, SendResult};
pub use crate::non_repeat_constraint::NonRepeatConstraint;
pub use crate::orthogonal_pairs_constraint::{
    OrthogonalPairsConstraint, OrthogonalPairsMarker, StandardOrthogonalPairsMarker,
};
pub use crate::standard_pair_type::StandardPairType;
