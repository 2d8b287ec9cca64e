use crate::prelude::*;

/// Runs each constraint's own deduction logic, stopping at the first
/// constraint that changes the board.
///
/// During brute force the constraints are told so through
/// `is_brute_forcing`, and no descriptions are collected.
#[derive(Debug)]
pub struct StepConstraints;

impl LogicalStep for StepConstraints {
    fn name(&self) -> &'static str {
        "Step Constraints"
    }

    fn has_own_prefix(&self) -> bool {
        true
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let board_data = board.data();
        for constraint in board_data.constraints() {
            if generate_description {
                let mut desc_list = LogicalStepDescList::new();
                let result = constraint.step_logic(board, Some(&mut desc_list), false);
                let desc: Option<LogicalStepDesc> = match desc_list.len() {
                    0 => Some(constraint.name().to_owned().into()),
                    1 => Some(desc_list.steps()[0].clone()),
                    _ => Some(LogicalStepDesc::new(constraint.name(), &desc_list)),
                };
                let prefix = format!("{}: ", constraint.name());
                match result {
                    LogicResult::Changed => {
                        return LogicalStepResult::Changed(desc).with_prefix(&prefix);
                    }
                    LogicResult::Invalid => {
                        return LogicalStepResult::Invalid(desc).with_prefix(&prefix);
                    }
                    _ => {}
                }
            } else {
                match constraint.step_logic(board, None, true) {
                    LogicResult::Changed => return LogicalStepResult::Changed(None),
                    LogicResult::Invalid => return LogicalStepResult::Invalid(None),
                    _ => {}
                }
            }
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug)]
    struct RemoveCandidateConstraint {
        specific_name: String,
        candidate: CandidateIndex,
    }

    impl RemoveCandidateConstraint {
        fn new(candidate: CandidateIndex) -> Self {
            Self { specific_name: format!("Remove {}", candidate), candidate }
        }
    }

    impl Constraint for RemoveCandidateConstraint {
        fn name(&self) -> &str {
            &self.specific_name
        }

        fn step_logic(
            &self,
            board: &mut Board,
            desc: Option<&mut LogicalStepDescList>,
            _is_brute_forcing: bool,
        ) -> LogicResult {
            if !board.has_candidate(self.candidate) {
                return LogicResult::None;
            }
            if !board.clear_candidate(self.candidate) {
                if let Some(desc) = desc {
                    desc.push(format!("{} cannot be removed", self.candidate).into());
                }
                return LogicResult::Invalid;
            }
            if let Some(desc) = desc {
                desc.push(format!("{} removed", self.candidate).into());
            }
            LogicResult::Changed
        }
    }

    #[test]
    fn test_step_constraints() {
        let size = 9;
        let cu = CellUtility::new(size);
        let candidate0 = cu.cell(0, 0).candidate(1);
        let candidate1 = cu.cell(0, 1).candidate(1);
        let constraints: Vec<Arc<dyn Constraint>> = vec![
            Arc::new(RemoveCandidateConstraint::new(candidate0)),
            Arc::new(RemoveCandidateConstraint::new(candidate1)),
        ];
        let mut board = Board::new(size, &[], &constraints);

        assert!(board.has_candidate(candidate0));
        assert!(board.has_candidate(candidate1));

        // One candidate removed per step, in registration order.
        let result = StepConstraints.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "Remove 1r1c1: 1r1c1 removed");
        assert!(!board.has_candidate(candidate0));
        assert!(board.has_candidate(candidate1));

        let result = StepConstraints.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "Remove 1r1c2: 1r1c2 removed");
        assert!(!board.has_candidate(candidate1));

        let result = StepConstraints.run(&mut board, true);
        assert!(result.is_none());
    }
}
