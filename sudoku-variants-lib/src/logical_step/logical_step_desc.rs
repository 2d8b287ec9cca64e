//! Contains the [`LogicalStepDesc`] struct: the human-readable record of one
//! logical step and its results.

use crate::prelude::*;

/// The description of a single logical step.
///
/// Steps can carry sub-steps: when a contradiction is found by testing a
/// value and running further logic, the sub-steps record that inner
/// reasoning. Most steps have none.
#[derive(Debug, Clone)]
pub struct LogicalStepDesc {
    step: String,
    sub_steps: LogicalStepDescList,
    depth: usize,
}

impl LogicalStepDesc {
    /// Creates a new instance with sub-steps.
    pub fn new(step: &str, sub_steps: &LogicalStepDescList) -> Self {
        Self { step: step.to_owned(), sub_steps: sub_steps.with_depth(1), depth: 0 }
    }

    /// Creates a new instance from a description and a list of eliminations.
    pub fn from_elims(desc: &str, elims: &EliminationList) -> Self {
        format!("{} => {}", desc, elims).into()
    }

    /// Returns this description prefixed with the provided string.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self {
            step: format!("{}{}", prefix, self.step),
            sub_steps: self.sub_steps.clone(),
            depth: self.depth,
        }
    }

    pub(crate) fn with_depth(&self, depth: usize) -> LogicalStepDesc {
        LogicalStepDesc {
            step: self.step.clone(),
            sub_steps: self.sub_steps.with_depth(depth + 1),
            depth,
        }
    }

    fn indent_str(&self) -> String {
        let mut indent = String::new();
        if self.depth > 0 {
            indent.reserve(self.depth * 4);
            for _ in 0..self.depth - 1 {
                indent.push_str("    ");
            }
            indent.push_str("  | ");
        }
        indent
    }
}

impl From<&str> for LogicalStepDesc {
    fn from(step: &str) -> Self {
        Self { step: step.to_owned(), sub_steps: LogicalStepDescList::new(), depth: 0 }
    }
}

impl From<String> for LogicalStepDesc {
    fn from(step: String) -> Self {
        Self { step, sub_steps: LogicalStepDescList::new(), depth: 0 }
    }
}

impl std::fmt::Display for LogicalStepDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let indent = self.indent_str();
        if self.sub_steps.is_empty() {
            write!(f, "{}{}", indent, self.step)
        } else {
            writeln!(f, "{}{}", indent, self.step)?;
            write!(f, "{}", self.sub_steps)
        }
    }
}
