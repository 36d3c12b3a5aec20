//! Grammar rules can be built with the builder pattern.

use std::convert::AsRef;

use crate::grammar::Cfg;
use crate::history::RuleHistory;
use crate::precedence::PrecedencedRuleBuilder;
use crate::symbol::Symbol;

/// The rule builder.
pub struct RuleBuilder<'a, H> {
    lhs: Symbol,
    history: Option<H>,
    grammar: &'a mut Cfg<H>,
}

impl<'a, H> RuleBuilder<'a, H>
where
    H: RuleHistory,
{
    /// Creates a rule builder for rules with the given LHS.
    pub fn new(grammar: &'a mut Cfg<H>, lhs: Symbol) -> Self {
        RuleBuilder {
            lhs,
            history: None,
            grammar,
        }
    }

    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.lhs = lhs;
        self.history = None;
        self
    }

    /// Assigns the rule history, which is used on the next call to `rhs`, or overwritten by a call
    /// to `rhs_with_history`.
    pub fn history(mut self, history: H) -> Self {
        self.history = Some(history);
        self
    }

    /// Adds a rule alternative to the grammar. If history wasn't provided, the rule has a
    /// history that refers to the new rule.
    pub fn rhs<S>(mut self, syms: S) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        match self.history.take() {
            Some(history) => self.rhs_with_history(syms, history),
            None => {
                self.grammar.add_rule(self.lhs, syms);
                self
            }
        }
    }

    /// Adds a rule alternative with the given RHS and history to the grammar.
    pub fn rhs_with_history<S>(self, syms: S, history: H) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        self.grammar
            .add_rule_with_history(self.lhs, syms.as_ref(), history);
        self
    }

    /// Starts building a new precedenced rule.
    pub fn precedenced_rule(self, lhs: Symbol) -> PrecedencedRuleBuilder<'a, H> {
        PrecedencedRuleBuilder::new(self.grammar, lhs)
    }
}
