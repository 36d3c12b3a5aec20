//! Errors reported by grammar construction and normalization passes.

use crate::history::{ActionId, Precedence};
use crate::pipeline::{Pass, Stage};
use crate::rule::RuleHandle;

/// Result of a grammar operation.
pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;

/// Structural mistakes in a grammar definition. None of them are retryable.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// A rule can carry at most one semantic action.
    #[error("rule already carries action {existing}, cannot assign action {new}")]
    DuplicateAction {
        /// The action the rule carries.
        existing: ActionId,
        /// The rejected action.
        new: ActionId,
    },

    /// A rule can have at most one precedence.
    #[error("rule already has precedence {existing:?}, cannot assign {new:?}")]
    PrecedenceConflict {
        /// The precedence the rule has.
        existing: Precedence,
        /// The rejected precedence.
        new: Precedence,
    },

    /// A sequence rule's maximum is below its minimum.
    #[error("invalid repetition range: maximum {max} is less than minimum {min}")]
    InvalidRepetitionRange {
        /// The minimum number of repetitions.
        min: u32,
        /// The maximum number of repetitions.
        max: u32,
    },

    /// A pass would exceed a configured limit.
    #[error("grammar too large: {attempted} exceeds the limit of {limit}")]
    GrammarTooLarge {
        /// The configured limit.
        limit: usize,
        /// The size the pass would have reached.
        attempted: usize,
    },

    /// A pass or an authoring operation was applied at the wrong stage.
    #[error("{pass:?} cannot run on a grammar at stage {stage:?}")]
    PassOrder {
        /// The rejected operation.
        pass: Pass,
        /// The stage of the grammar.
        stage: Stage,
    },

    /// The handle refers to no rule of this grammar.
    #[error("no rule for handle {0:?}")]
    UnknownRule(RuleHandle),
}
