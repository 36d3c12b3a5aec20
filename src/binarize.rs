//! Binarization of rules into chains of rules with at most two RHS symbols.

use log::{debug, trace};

use crate::config::NormalizeConfig;
use crate::error::{NormalizeError, Result};
use crate::grammar::Cfg;
use crate::history::{Binarize, Binarized, BinarizedRhsSubset, RuleHistory};
use crate::pipeline::{Pass, Stage};
use crate::rule::Rule;
use crate::symbol::SymbolSource;

impl<H> Rule<H>
where
    H: Binarize + Clone,
{
    /// Splits this rule into a chain of binary rules.
    ///
    /// From `LHS ⸬= A B C … X Y Z` to:
    ///
    /// ```text
    /// | LHS ⸬= S0  Z
    /// | S0  ⸬= S1  Y
    /// | S1  ⸬= S2  X
    /// | …
    /// | Sm  ⸬= Sn  C
    /// | Sn  ⸬= A   B
    /// ```
    ///
    /// The top rule comes first. Fresh symbols `S0`, `S1`, … are allocated in that
    /// order. Rules with at most two RHS symbols, and rules whose history declines the
    /// split, are returned unchanged and tagged `BinarizedRhsSubset::None`.
    pub fn binarize(&self, sym_source: &mut SymbolSource) -> Vec<(Rule<H>, BinarizedRhsSubset)> {
        let len = self.rhs().len();
        let top_piece = Binarized {
            subset: BinarizedRhsSubset::Right,
            depth: 0,
            full_len: len as u32,
        };
        if len <= 2 || self.history().binarize(top_piece).is_none() {
            return vec![(self.clone(), BinarizedRhsSubset::None)];
        }

        let mut lhs_chain = Vec::with_capacity(len - 1);
        lhs_chain.push(self.lhs());
        lhs_chain.extend(sym_source.generate().take(len - 2));

        let mut result = Vec::with_capacity(len - 1);
        for (depth, &lhs) in lhs_chain.iter().enumerate() {
            let (rhs, subset) = if depth + 2 < len {
                (
                    [lhs_chain[depth + 1], self.rhs()[len - 1 - depth]],
                    BinarizedRhsSubset::Right,
                )
            } else {
                ([self.rhs()[0], self.rhs()[1]], BinarizedRhsSubset::Left)
            };
            let piece = Binarized {
                subset,
                depth: depth as u32,
                full_len: len as u32,
            };
            let history = self
                .history()
                .binarize(piece)
                .unwrap_or_else(|| self.history().clone());
            result.push((Rule::new(lhs, rhs, history), subset));
        }
        trace!(
            "BINARIZE {:?} ::= {:?} into {:?}",
            self.lhs(),
            self.rhs(),
            result
                .iter()
                .map(|(rule, _)| (rule.lhs(), rule.rhs().to_vec()))
                .collect::<Vec<_>>()
        );
        result
    }
}

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Returns an equivalent grammar in which every rule has at most two RHS symbols.
    ///
    /// The grammar must have its nullable symbols eliminated.
    ///
    /// # Design
    ///
    /// - Q: Can I run this function twice?
    /// - A: Yes, it's idempotent. Binary rules are left as they are.
    pub fn binarize(&self, config: &NormalizeConfig) -> Result<Self> {
        if self.stage() < Stage::NullingEliminated {
            return Err(NormalizeError::PassOrder {
                pass: Pass::Binarization,
                stage: self.stage(),
            });
        }
        let mut sym_source = self.sym_source().clone();
        let mut rules = Vec::with_capacity(self.num_rules());
        for rule in self.rules() {
            rules.extend(rule.binarize(&mut sym_source).into_iter().map(|(rule, _)| rule));
            config.check_rule_count(rules.len())?;
        }
        debug!(
            "binarized: {} rules in, {} rules out",
            self.num_rules(),
            rules.len()
        );
        let stage = self.stage().max(Stage::Binarized);
        Ok(self.rewritten(sym_source, rules, vec![], stage))
    }
}
