//! Limits applied by normalization passes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// The default ceiling on the number of rules a pass may produce.
pub const DEFAULT_RULE_LIMIT: usize = 1_000_000;
/// The default ceiling on nullable positions expanded within a single rule.
pub const DEFAULT_MAX_NULLABLE_POSITIONS: u32 = 20;

/// Configuration of the normalization pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizeConfig {
    /// The maximum number of rules in a pass's output, or `None` for no limit.
    pub rule_limit: Option<usize>,
    /// The maximum number of nullable symbols on a single RHS. Nulling elimination
    /// expands a rule into up to `2^k` variants for `k` nullable positions.
    pub max_nullable_positions: u32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            rule_limit: Some(DEFAULT_RULE_LIMIT),
            max_nullable_positions: DEFAULT_MAX_NULLABLE_POSITIONS,
        }
    }
}

impl NormalizeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule limit.
    #[must_use]
    pub fn rule_limit(mut self, limit: Option<usize>) -> Self {
        self.rule_limit = limit;
        self
    }

    /// Sets the limit of nullable positions per rule.
    #[must_use]
    pub fn max_nullable_positions(mut self, limit: u32) -> Self {
        self.max_nullable_positions = limit;
        self
    }

    pub(crate) fn check_rule_count(&self, attempted: usize) -> Result<()> {
        match self.rule_limit {
            Some(limit) if attempted > limit => {
                Err(NormalizeError::GrammarTooLarge { limit, attempted })
            }
            _ => Ok(()),
        }
    }
}
