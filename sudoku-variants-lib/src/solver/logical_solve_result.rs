//! Contains [`LogicalSolveResult`]: the outcome of running the logical step
//! engine to quiescence, with the solve path it produced.

use crate::prelude::*;

/// The final state of a logical solve: a [`LogicResult`] paired with the
/// paper trail of steps taken, and whether cancellation cut the run short.
///
/// The steps are always present; a cancelled solve still returns whatever
/// it managed to deduce.
#[derive(Debug, Clone)]
pub struct LogicalSolveResult {
    result: LogicResult,
    steps: LogicalStepDescList,
    canceled: bool,
}

impl LogicalSolveResult {
    pub(crate) fn new(result: LogicResult, steps: LogicalStepDescList, canceled: bool) -> Self {
        Self { result, steps, canceled }
    }

    /// The final outcome of the solve.
    pub fn result(&self) -> LogicResult {
        self.result
    }

    /// The steps taken, in order.
    pub fn steps(&self) -> &LogicalStepDescList {
        &self.steps
    }

    pub fn is_none(&self) -> bool {
        self.result.is_none()
    }

    pub fn is_changed(&self) -> bool {
        self.result.is_changed()
    }

    pub fn is_solved(&self) -> bool {
        self.result.is_solved()
    }

    pub fn is_invalid(&self) -> bool {
        self.result.is_invalid()
    }

    /// True when the solve stopped because of cancellation rather than
    /// quiescence.
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

impl std::fmt::Display for LogicalSolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.steps)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_logical_solve_result() {
        let mut steps = LogicalStepDescList::new();
        steps.push("step 1".into());

        let result = LogicalSolveResult::new(LogicResult::Changed, steps, false);
        assert!(result.is_changed());
        assert!(!result.is_solved());
        assert!(!result.is_canceled());
        assert_eq!(result.result(), LogicResult::Changed);
        assert_eq!(result.steps().len(), 1);
        assert_eq!(result.to_string(), "step 1");
    }
}
