//! The order of normalization passes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;

use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::grammar::Cfg;
use crate::history::RuleHistory;

/// How far a grammar has been normalized. Stages are totally ordered.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stage {
    /// Rules as written. Sequence rules may be present.
    Authored,
    /// Sequence rules are replaced with production rules.
    SequenceExpanded,
    /// Nullable symbols are eliminated from right-hand sides.
    NullingEliminated,
    /// Every rule has at most two RHS symbols.
    Binarized,
    /// Rule precedence is resolved from symbol precedence.
    PrecedenceResolved,
    /// Ready for a recognizer.
    Normalized,
}

/// An operation on a grammar, for error reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pass {
    /// Attaching actions or precedence to authored rules.
    Authoring,
    /// Nulling elimination.
    NullingElimination,
    /// Binarization.
    Binarization,
}

/// Runs all passes in order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Creates a normalizer with the given limits.
    pub fn new(config: NormalizeConfig) -> Self {
        Normalizer { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Returns the normalized equivalent of the grammar. Normalizing a normalized
    /// grammar returns an equal grammar.
    pub fn normalize<H>(&self, grammar: &Cfg<H>) -> Result<Cfg<H>>
    where
        H: RuleHistory,
    {
        debug!(
            "normalizing {} rules and {} sequences at stage {:?}",
            grammar.num_rules(),
            grammar.sequences().count(),
            grammar.stage()
        );
        let expanded = grammar.expand_sequences(&self.config)?;
        let eliminated = expanded.eliminate_nulling(&self.config)?;
        let binarized = eliminated.binarize(&self.config)?;
        let resolved = binarized.resolve_precedence()?;
        Ok(resolved.with_stage(Stage::Normalized))
    }
}

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Returns the normalized equivalent of this grammar.
    pub fn normalize(&self, config: &NormalizeConfig) -> Result<Self> {
        Normalizer::new(*config).normalize(self)
    }
}
