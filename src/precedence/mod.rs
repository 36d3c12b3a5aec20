//! Precedenced rules are built with the builder pattern.

mod assign;

use std::convert::AsRef;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};
use crate::grammar::Cfg;
use crate::history::{AssignPrecedence, Precedence, RuleHistory};
use crate::rule::builder::RuleBuilder;
use crate::rule::RuleHandle;
use crate::symbol::Symbol;

use self::Associativity::*;

/// Specifies the associativity of an operator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Associativity {
    /// Left associative.
    Left,
    /// Right associative.
    Right,
    /// `Group` usually means the operand is delimited, e.g. by parentheses.
    Group,
}

/// The default associativity.
pub const DEFAULT_ASSOC: Associativity = Left;

/// Precedenced rules are built in series of rule alternatives with equal precedence.
///
/// Each alternative records its looseness and associativity in its history. Tiers are
/// connected with rules of the form `looser ::= tighter`.
pub struct PrecedencedRuleBuilder<'a, H> {
    grammar: &'a mut Cfg<H>,
    lhs: Symbol,
    tighter_lhs: Symbol,
    current_lhs: Symbol,
    history: Option<H>,
    assoc: Associativity,
    looseness: u32,
    rules_with_group_assoc: Vec<(Symbol, Vec<Symbol>, Option<H>, Precedence)>,
    error: Option<NormalizeError>,
}

impl<'a, H> PrecedencedRuleBuilder<'a, H>
where
    H: RuleHistory,
{
    /// Returns a precedenced rule builder.
    pub fn new(grammar: &'a mut Cfg<H>, lhs: Symbol) -> Self {
        let tightest_lhs = grammar.next_sym();
        PrecedencedRuleBuilder {
            grammar,
            lhs,
            tighter_lhs: tightest_lhs,
            current_lhs: tightest_lhs,
            history: None,
            assoc: DEFAULT_ASSOC,
            looseness: 0,
            rules_with_group_assoc: vec![],
            error: None,
        }
    }

    /// Assigns the rule history, which is used on the next call to `rhs`.
    #[must_use]
    pub fn history(mut self, history: H) -> Self {
        self.history = Some(history);
        self
    }

    /// Creates a rule alternative. If history wasn't provided, the rule has a history that
    /// refers to the new rule.
    #[must_use]
    pub fn rhs<S>(mut self, syms: S) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        let history = self.history.take();
        self.add_alternative(syms.as_ref(), history)
    }

    /// Creates a rule alternative with the given RHS and history.
    #[must_use]
    pub fn rhs_with_history<S>(self, syms: S, history: H) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        self.add_alternative(syms.as_ref(), Some(history))
    }

    fn add_alternative(mut self, syms: &[Symbol], history: Option<H>) -> Self {
        let precedence = Precedence::new(self.looseness, self.assoc);
        let lhs = self.lhs;
        let mut syms = syms.to_vec();
        if self.assoc == Group {
            self.rules_with_group_assoc
                .push((self.current_lhs, syms, history, precedence));
        } else {
            {
                // Symbols equal to the LHS symbol.
                let mut iter = syms.iter_mut().filter(|&&mut sym| sym == lhs);
                let extreme_sym_mut = if self.assoc == Left {
                    // Leftmost one.
                    iter.next()
                } else {
                    // Rightmost one.
                    iter.next_back()
                };
                if let Some(extreme_sym) = extreme_sym_mut {
                    *extreme_sym = self.current_lhs;
                }
                for sym in iter {
                    *sym = self.tighter_lhs;
                }
            };
            let current_lhs = self.current_lhs;
            self.add_rule(current_lhs, syms, history, precedence);
        }
        // Reset to default associativity and no history.
        self.assoc = DEFAULT_ASSOC;
        self.history = None;
        self
    }

    fn add_rule(&mut self, lhs: Symbol, syms: Vec<Symbol>, history: Option<H>, precedence: Precedence) {
        let history = history
            .unwrap_or_else(|| H::from_origin(RuleHandle::Rule(self.grammar.num_rules())));
        let history = match history.assign_precedence(precedence.level, precedence.assoc) {
            Ok(assigned) => assigned,
            Err(error) => {
                self.error.get_or_insert(error);
                history
            }
        };
        self.grammar.add_rule_with_history(lhs, syms, history);
    }

    /// Assigns the associativity, which influences the next call to `rhs` or `rhs_with_history`.
    #[must_use]
    pub fn associativity(mut self, assoc: Associativity) -> Self {
        self.assoc = assoc;
        self
    }

    /// Assigns lower precedence to rule alternatives that are built after this call.
    #[must_use]
    pub fn lower_precedence(mut self) -> Self {
        self.looseness += 1;

        self.tighter_lhs = self.current_lhs;
        self.current_lhs = self.grammar.next_sym();

        self.grammar
            .add_rule_with_history(self.current_lhs, [self.tighter_lhs], H::default());
        self
    }

    /// Finalizes the precedenced rule construction. Fails if an alternative was given a
    /// history whose precedence conflicts with its tier.
    pub fn finalize(mut self) -> Result<RuleBuilder<'a, H>> {
        let loosest_lhs = self.current_lhs;
        let lhs = self.lhs;
        for (rule_lhs, syms, history, precedence) in
            std::mem::take(&mut self.rules_with_group_assoc)
        {
            let rhs = syms
                .into_iter()
                .map(|sym| if sym == lhs { loosest_lhs } else { sym })
                .collect();
            self.add_rule(rule_lhs, rhs, history, precedence);
        }
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(RuleBuilder::new(self.grammar, lhs).rhs_with_history([loosest_lhs], H::default()))
    }
}
