//! Sequence rules can be built with the builder pattern.

use std::ops::RangeBounds;

use crate::grammar::Cfg;
use crate::history::RuleHistory;
use crate::symbol::Symbol;

use super::{inclusive_bounds, Separator, Sequence};

/// Sequence rule builder.
///
/// Without a call to `inclusive` or `range`, sequences allow any number of repetitions.
pub struct SequenceRuleBuilder<'a, H> {
    lhs: Symbol,
    range: (u32, Option<u32>),
    separator: Separator,
    history: Option<H>,
    grammar: &'a mut Cfg<H>,
}

impl<'a, H> SequenceRuleBuilder<'a, H>
where
    H: RuleHistory,
{
    /// Creates a sequence rule builder.
    pub fn new(grammar: &'a mut Cfg<H>, lhs: Symbol) -> Self {
        SequenceRuleBuilder {
            lhs,
            range: (0, None),
            separator: Separator::Null,
            history: None,
            grammar,
        }
    }

    /// Starts building a sequence rule.
    pub fn sequence(mut self, lhs: Symbol) -> Self {
        self.lhs = lhs;
        self.separator = Separator::Null;
        self
    }

    /// Assigns the separator symbol and mode of separation.
    pub fn separator(mut self, sep: Separator) -> Self {
        self.separator = sep;
        self
    }

    /// Sets proper separation with the given separator symbol.
    pub fn intersperse(self, sym: Symbol) -> Self {
        self.separator(Separator::Proper(sym))
    }

    /// Assigns the rule history, which is used on the next call to `rhs`, or overwritten by a call
    /// to `rhs_with_history`.
    pub fn history(mut self, history: H) -> Self {
        self.history = Some(history);
        self
    }

    /// Assigns the inclusive range of the number of repetitions.
    pub fn inclusive(mut self, start: u32, end: Option<u32>) -> Self {
        self.range = (start, end);
        self
    }

    /// Assigns the range of the number of repetitions.
    pub fn range(mut self, range: impl RangeBounds<u32>) -> Self {
        self.range = inclusive_bounds(range);
        self
    }

    /// Adds a sequence rule to the grammar.
    pub fn rhs(mut self, rhs: Symbol) -> Self {
        let history = self
            .history
            .take()
            .unwrap_or_else(|| H::from_origin(self.grammar.next_sequence_handle()));
        self.rhs_with_history(rhs, history)
    }

    /// Adds a sequence rule with the given range to the grammar.
    pub fn rhs_with_range(self, rhs: Symbol, range: impl RangeBounds<u32>) -> Self {
        self.range(range).rhs(rhs)
    }

    /// Adds a sequence rule with the given history to the grammar.
    pub fn rhs_with_history(self, rhs: Symbol, history: H) -> Self {
        let (start, end) = self.range;
        self.grammar.add_sequence(Sequence {
            lhs: self.lhs,
            rhs,
            start,
            end,
            separator: self.separator,
            history,
        });
        self
    }
}
