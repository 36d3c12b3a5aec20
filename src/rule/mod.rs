//! This module defines grammar rules. Each rule in a context-free grammar
//! consists of a single symbol on its left-hand side and an array of symbols
//! on its right-hand side. In this library, each rule carries additional
//! value called "history."

pub mod builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::symbol::Symbol;

/// Refers to a rule or a sequence rule added to a grammar. A handle stops being valid
/// once a pass rewrites what it refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RuleHandle {
    /// The index of a rule.
    Rule(usize),
    /// The number of sequence rules added to the grammar before this one.
    Sequence(usize),
}

/// Trait for rules of a context-free grammar.
pub trait GrammarRule {
    /// The type of history carried with the rule.
    type History;

    /// Returns the rule's left-hand side.
    fn lhs(&self) -> Symbol;
    /// Returns the rule's right-hand side.
    fn rhs(&self) -> &[Symbol];
    /// Returns a reference to the history carried with the rule.
    fn history(&self) -> &Self::History;
}

impl<'a, R> GrammarRule for &'a R
where
    R: GrammarRule,
{
    type History = R::History;

    fn lhs(&self) -> Symbol {
        (**self).lhs()
    }
    fn rhs(&self) -> &[Symbol] {
        (**self).rhs()
    }
    fn history(&self) -> &Self::History {
        (**self).history()
    }
}

/// Typical grammar rule representation.
///
/// Rules are values. Passes produce new rules instead of changing existing ones.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule<H = History> {
    lhs: Symbol,
    rhs: Vec<Symbol>,
    history: H,
}

impl<H> GrammarRule for Rule<H> {
    type History = H;

    fn lhs(&self) -> Symbol {
        self.lhs
    }

    fn rhs(&self) -> &[Symbol] {
        &self.rhs[..]
    }

    fn history(&self) -> &H {
        &self.history
    }
}

impl<H> Rule<H> {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl Into<Vec<Symbol>>, history: H) -> Self {
        Rule {
            lhs,
            rhs: rhs.into(),
            history,
        }
    }

    /// Returns the rule's left-hand side.
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// Returns the rule's right-hand side.
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs[..]
    }

    /// Returns the history carried with the rule.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the same production with another history.
    pub fn with_history(self, history: H) -> Self {
        Rule { history, ..self }
    }

    /// Whether the rule is an explicit empty production.
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    pub(crate) fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}
