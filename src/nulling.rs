//! Elimination of nullable symbols from right-hand sides.
//!
//! A rule with `k` nullable RHS symbols is expanded into one variant per subset of
//! those positions being elided. Variants are listed in order of the subset's bit mask,
//! so the variant that keeps every symbol comes first. The variant that elides every
//! symbol is produced only when the whole RHS is nullable. Variants with the same RHS
//! are merged into the first of them.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, trace};

use crate::config::NormalizeConfig;
use crate::error::{NormalizeError, Result};
use crate::grammar::Cfg;
use crate::history::{
    ElidedPositions, EliminateNulling, NullingEliminated, RuleHistory, MAX_ELIDED_POSITION,
};
use crate::pipeline::{Pass, Stage};
use crate::rule::Rule;
use crate::symbol::{Symbol, SymbolBitSet};

impl<H> Rule<H>
where
    H: EliminateNulling + Clone,
{
    /// Expands this rule into variants without the nullable symbols. Rules whose history
    /// declines the elimination are returned unchanged.
    ///
    /// Fails when the RHS has more than `max_positions` nullable symbols.
    pub fn eliminate_nulling(
        &self,
        nullable: &SymbolBitSet,
        max_positions: u32,
    ) -> Result<Vec<Rule<H>>> {
        let config = NormalizeConfig::new()
            .rule_limit(None)
            .max_nullable_positions(max_positions);
        self.nulling_variants(nullable, &config, 0)
    }

    /// Expands this rule, failing as soon as `produced` rules and the variants made so
    /// far exceed the rule limit.
    pub(crate) fn nulling_variants(
        &self,
        nullable: &SymbolBitSet,
        config: &NormalizeConfig,
        produced: usize,
    ) -> Result<Vec<Rule<H>>> {
        let original_len = self.rhs().len() as u32;
        let keep_all = NullingEliminated {
            elided: ElidedPositions::EMPTY,
            original_len,
            alternatives: 1,
        };
        if self.history().eliminate_nulling(keep_all).is_none() {
            config.check_rule_count(produced + 1)?;
            return Ok(vec![self.clone()]);
        }

        let positions: Vec<usize> = self
            .rhs()
            .iter()
            .enumerate()
            .filter(|&(_, &sym)| nullable[sym])
            .map(|(pos, _)| pos)
            .collect();
        if positions.len() > config.max_nullable_positions as usize {
            return Err(NormalizeError::GrammarTooLarge {
                limit: config.max_nullable_positions as usize,
                attempted: positions.len(),
            });
        }
        if let Some(&last) = positions.last() {
            if last >= MAX_ELIDED_POSITION {
                return Err(NormalizeError::GrammarTooLarge {
                    limit: MAX_ELIDED_POSITION,
                    attempted: last + 1,
                });
            }
        }
        let num_masks = 1u64
            .checked_shl(positions.len() as u32)
            .ok_or(NormalizeError::GrammarTooLarge {
                limit: MAX_ELIDED_POSITION - 1,
                attempted: positions.len(),
            })?;
        let whole_rhs_nullable = positions.len() == self.rhs().len();

        let mut variants: Vec<(Vec<Symbol>, ElidedPositions, u32)> = vec![];
        let mut index: HashMap<Vec<Symbol>, usize> = HashMap::new();
        for mask in 0..num_masks {
            let mut elided = ElidedPositions::EMPTY;
            for (bit, &pos) in positions.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    elided.insert(pos);
                }
            }
            let rhs: Vec<Symbol> = self
                .rhs()
                .iter()
                .enumerate()
                .filter(|&(pos, _)| !elided.contains(pos))
                .map(|(_, &sym)| sym)
                .collect();
            if rhs.is_empty() && !whole_rhs_nullable {
                continue;
            }
            match index.entry(rhs) {
                Entry::Occupied(existing) => variants[*existing.get()].2 += 1,
                Entry::Vacant(vacant) => {
                    config.check_rule_count(produced + variants.len() + 1)?;
                    variants.push((vacant.key().clone(), elided, 1));
                    vacant.insert(variants.len() - 1);
                }
            }
        }

        let result = variants
            .into_iter()
            .map(|(rhs, elided, alternatives)| {
                let variant = NullingEliminated {
                    elided,
                    original_len,
                    alternatives,
                };
                let history = self
                    .history()
                    .eliminate_nulling(variant)
                    .unwrap_or_else(|| self.history().clone());
                Rule::new(self.lhs(), rhs, history)
            })
            .collect::<Vec<_>>();
        trace!(
            "ELIMINATE NULLING {:?} ::= {:?} into {} variants",
            self.lhs(),
            self.rhs(),
            result.len()
        );
        Ok(result)
    }
}

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Returns an equivalent grammar in which nullable symbols are eliminated from every
    /// RHS. Nullable symbols are computed from the grammar's empty rules.
    pub fn eliminate_nulling(&self, config: &NormalizeConfig) -> Result<Self> {
        let nullable = self.nullable_symbols();
        self.eliminate_nulling_with(&nullable, config)
    }

    /// Returns an equivalent grammar in which symbols from the given set are eliminated
    /// from every RHS.
    ///
    /// The grammar must have its sequences expanded.
    pub fn eliminate_nulling_with(
        &self,
        nullable: &SymbolBitSet,
        config: &NormalizeConfig,
    ) -> Result<Self> {
        if self.stage() < Stage::SequenceExpanded {
            return Err(NormalizeError::PassOrder {
                pass: Pass::NullingElimination,
                stage: self.stage(),
            });
        }
        let mut rules = Vec::with_capacity(self.num_rules());
        for rule in self.rules() {
            rules.extend(rule.nulling_variants(nullable, config, rules.len())?);
        }
        debug!(
            "eliminated nulling symbols: {} rules in, {} rules out",
            self.num_rules(),
            rules.len()
        );
        let stage = self.stage().max(Stage::NullingEliminated);
        Ok(self.rewritten(self.sym_source().clone(), rules, vec![], stage))
    }
}
