//! Maps rules of a normalized grammar back to the rules they were made from.

use std::collections::HashMap;

use crate::grammar::Cfg;
use crate::history::{Binarize, BinarizedRhsSubset, EliminateNulling};
use crate::symbol::Symbol;

/// An index of binarized chains in a grammar.
///
/// Every piece below the top of a chain has a fresh LHS symbol, which appears as the
/// first RHS symbol of the piece above it.
#[derive(Clone, Debug, Default)]
pub struct BinarizedChains {
    below_top: HashMap<Symbol, usize>,
}

impl BinarizedChains {
    /// Indexes the chains of the given grammar.
    pub fn new<H: Binarize>(grammar: &Cfg<H>) -> Self {
        let below_top = grammar
            .rules()
            .enumerate()
            .filter(|(_, rule)| {
                rule.history()
                    .binarized()
                    .map_or(false, |piece| !piece.is_top())
            })
            .map(|(index, rule)| (rule.lhs(), index))
            .collect();
        BinarizedChains { below_top }
    }

    /// Checks whether the symbol is the LHS of a piece below the top of a chain.
    pub fn is_chain_symbol(&self, sym: Symbol) -> bool {
        self.below_top.contains_key(&sym)
    }

    /// Returns the indices of all pieces of the chain that starts at rule `top`, top first.
    /// A rule that was not split is a chain of one piece.
    pub fn pieces<H: Binarize>(&self, grammar: &Cfg<H>, top: usize) -> Vec<usize> {
        let mut result = vec![];
        let mut current = Some(top);
        while let Some(index) = current {
            let rule = match grammar.rule_at(index) {
                Some(rule) => rule,
                None => break,
            };
            result.push(index);
            current = match rule.history().binarized() {
                Some(piece) if piece.subset == BinarizedRhsSubset::Right => rule
                    .rhs()
                    .first()
                    .and_then(|sym| self.below_top.get(sym))
                    .copied()
                    .filter(|&below| below != index),
                _ => None,
            };
        }
        result
    }

    /// Reconstructs the RHS the chain starting at rule `top` had before binarization.
    pub fn full_rhs<H: Binarize>(&self, grammar: &Cfg<H>, top: usize) -> Vec<Symbol> {
        let mut reversed = vec![];
        for rule in self
            .pieces(grammar, top)
            .into_iter()
            .filter_map(|index| grammar.rule_at(index))
        {
            match rule.history().binarized() {
                Some(piece) if piece.subset == BinarizedRhsSubset::Right => {
                    reversed.extend(rule.rhs().get(1).copied());
                }
                _ => reversed.extend(rule.rhs().iter().rev().copied()),
            }
        }
        reversed.reverse();
        reversed
    }

    /// Returns, for each symbol of the reconstructed RHS of the chain starting at `top`,
    /// its position on the RHS before nulling elimination.
    pub fn original_positions<H>(&self, grammar: &Cfg<H>, top: usize) -> Vec<usize>
    where
        H: Binarize + EliminateNulling,
    {
        let len = self.full_rhs(grammar, top).len();
        match grammar
            .rule_at(top)
            .and_then(|rule| rule.history().nulling())
        {
            Some(nulling) => nulling
                .elided
                .retained(nulling.original_len as usize)
                .collect(),
            None => (0..len).collect(),
        }
    }
}
