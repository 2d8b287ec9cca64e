//! Re-exports the types needed by nearly every user of this library.

pub use crate::board::{Board, BoardData};
pub use crate::candidate_index::CandidateIndex;
pub use crate::candidate_links::{CandidateLinks, StrongLinks};
pub use crate::cell_index::CellIndex;
pub use crate::cell_utility::CellUtility;
pub use crate::constraint::{Constraint, ConstraintPrimitive};
pub use crate::elimination_list::EliminationList;
pub use crate::error::SolverError;
pub use crate::house::{House, HouseKind};
pub use crate::logic_result::LogicResult;
pub use crate::logical_step::all_naked_singles::AllNakedSingles;
pub use crate::logical_step::chain::ChainFinder;
pub use crate::logical_step::contradiction::ContradictionSearch;
pub use crate::logical_step::fish::Fish;
pub use crate::logical_step::hidden_single::HiddenSingle;
pub use crate::logical_step::hidden_tuple::HiddenTuple;
pub use crate::logical_step::logical_step_desc::LogicalStepDesc;
pub use crate::logical_step::logical_step_desc_list::LogicalStepDescList;
pub use crate::logical_step::logical_step_result::LogicalStepResult;
pub use crate::logical_step::naked_single::NakedSingle;
pub use crate::logical_step::naked_tuple::NakedTuple;
pub use crate::logical_step::pointing::Pointing;
pub use crate::logical_step::simple_cell_forcing::SimpleCellForcing;
pub use crate::logical_step::step_constraints::StepConstraints;
pub use crate::logical_step::wing::Wing;
pub use crate::logical_step::LogicalStep;
pub use crate::math::{default_regions, weak_links_for_nonrepeat};
pub use crate::pill_helper::PillHelper;
pub use crate::solver::cancellation::Cancellation;
pub use crate::solver::estimate_result::SolutionEstimateResult;
pub use crate::solver::logical_solve_result::LogicalSolveResult;
pub use crate::solver::single_solution_result::SingleSolutionResult;
pub use crate::solver::solution_count_result::{CountCutoff, SolutionCountResult};
pub use crate::solver::solution_receiver::{CollectingReceiver, SolutionReceiver, SolveEvent};
pub use crate::solver::solver_builder::{SolverBuilder, DISABLEABLE_LOGIC};
pub use crate::solver::true_candidates_count_result::TrueCandidatesCountResult;
pub use crate::solver::Solver;
pub use crate::sum_cells_helper::SumCellsHelper;
pub use crate::value_mask::{char_to_value, value_to_char, ValueMask};
