//! Contains [`LogicalStepResult`], the result of running one logical step.

use crate::prelude::*;

/// The result of a logical step, optionally carrying the description of what
/// was done.
#[derive(Clone, Debug)]
pub enum LogicalStepResult {
    /// The step did not change the board.
    None,
    /// The step changed the board.
    Changed(Option<LogicalStepDesc>),
    /// The step found the board to be invalid.
    Invalid(Option<LogicalStepDesc>),
}

impl LogicalStepResult {
    pub fn is_none(&self) -> bool {
        matches!(self, LogicalStepResult::None)
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, LogicalStepResult::Changed(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LogicalStepResult::Invalid(_))
    }

    pub fn description(&self) -> Option<&LogicalStepDesc> {
        match self {
            LogicalStepResult::None => None,
            LogicalStepResult::Changed(desc) => desc.as_ref(),
            LogicalStepResult::Invalid(desc) => desc.as_ref(),
        }
    }

    /// Returns the same result with the description prefixed, when one is
    /// present.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        match self {
            LogicalStepResult::None => LogicalStepResult::None,
            LogicalStepResult::Changed(desc) => {
                LogicalStepResult::Changed(desc.as_ref().map(|desc| desc.with_prefix(prefix)))
            }
            LogicalStepResult::Invalid(desc) => {
                LogicalStepResult::Invalid(desc.as_ref().map(|desc| desc.with_prefix(prefix)))
            }
        }
    }
}

impl std::fmt::Display for LogicalStepResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(desc) = self.description() {
            write!(f, "{desc}")
        } else {
            write!(f, "No Description")
        }
    }
}
