//! Library for normalizing context-free grammars. Every rule carries a history that records
//! the transformations applied to it, so that derivations over the normalized grammar can be
//! mapped back to the grammar as written.
//!
//! Normalization runs four passes, in this order:
//!
//! 1. sequence expansion, see [`Cfg::expand_sequences`],
//! 2. nulling elimination, see [`Cfg::eliminate_nulling`],
//! 3. binarization, see [`Cfg::binarize`],
//! 4. precedence resolution, see [`Cfg::resolve_precedence`].
//!
//! [`Normalizer`] runs them all.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(missing_docs))]

mod binarize;
pub mod config;
pub mod error;
mod grammar;
pub mod history;
mod nulling;
pub mod pipeline;
pub mod precedence;
pub mod provenance;
pub mod rhs_closure;
pub mod rule;
pub mod sequence;
pub mod symbol;

pub use crate::config::NormalizeConfig;
pub use crate::error::{NormalizeError, Result};
pub use crate::grammar::Cfg;
pub use crate::history::{
    Action, ActionId, AssignPrecedence, Binarize, Binarized, BinarizedRhsSubset,
    ElidedPositions, EliminateNulling, History, NullHistory, NullingEliminated, Origin,
    Precedence, RewriteSequence, RuleHistory, SequenceRewritten,
};
pub use crate::pipeline::{Normalizer, Pass, Stage};
pub use crate::precedence::Associativity;
pub use crate::provenance::BinarizedChains;
pub use crate::rule::{GrammarRule, Rule, RuleHandle};
pub use crate::sequence::{Separator, Sequence};
pub use crate::symbol::{Symbol, SymbolBitSet, SymbolSource};
