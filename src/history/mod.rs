//! Any data carried alongside a grammar rule can be its _history_. Rule histories may contain
//! more than semantic actions: every normalization pass records what it did to a rule, so that
//! a derivation over the rewritten grammar can be mapped back to the grammar as written.
//!
//! A history is a bundle of capabilities. Each capability is a trait with a query and a
//! transformation. [`NullHistory`] answers every query with "absent" and turns every
//! rule-level transformation into a pass-through. [`History`] records everything.

mod tracked;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};
use crate::precedence::Associativity;
use crate::rule::RuleHandle;
use crate::sequence::Separator;
use crate::symbol::Symbol;

pub use self::tracked::History;

/// Identifies a semantic action attached by the grammar author.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Precedence level together with associativity. Lower levels bind tighter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precedence {
    /// The looseness of the rule.
    pub level: u32,
    /// The associativity of the rule.
    pub assoc: Associativity,
}

impl Precedence {
    /// Creates a precedence value.
    pub fn new(level: u32, assoc: Associativity) -> Self {
        Precedence { level, assoc }
    }
}

/// Informs which part of the original RHS a binarized rule's non-synthetic child
/// corresponds to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinarizedRhsSubset {
    /// The bottom piece of a chain. Both RHS symbols are the first two symbols of the
    /// original RHS.
    Left,
    /// A piece above the bottom. The second RHS symbol is the next symbol of the
    /// original RHS, counting from the end.
    Right,
    /// The rule was not split.
    None,
}

/// Binarization provenance of a single piece of a chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binarized {
    /// Which side of the split this piece stands for.
    pub subset: BinarizedRhsSubset,
    /// Distance from the top of the chain. The top piece keeps the original LHS.
    pub depth: u32,
    /// The RHS length of the rule before it was split.
    pub full_len: u32,
}

impl Binarized {
    /// Whether this piece keeps the original LHS.
    pub fn is_top(&self) -> bool {
        self.depth == 0
    }
}

/// A set of RHS positions, stored as a bit mask over the first 64 positions.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElidedPositions(u64);

/// The number of RHS positions an `ElidedPositions` can describe.
pub const MAX_ELIDED_POSITION: usize = 64;

impl ElidedPositions {
    /// The empty set.
    pub const EMPTY: ElidedPositions = ElidedPositions(0);

    /// Creates a set from a bit mask, where bit `i` stands for position `i`.
    pub fn from_bits(bits: u64) -> Self {
        ElidedPositions(bits)
    }

    /// Returns the bit mask.
    pub fn bits(self) -> u64 {
        self.0
    }

    pub(crate) fn insert(&mut self, pos: usize) {
        debug_assert!(pos < MAX_ELIDED_POSITION);
        self.0 |= 1 << pos;
    }

    /// Checks whether the position was elided.
    pub fn contains(self, pos: usize) -> bool {
        pos < MAX_ELIDED_POSITION && self.0 & (1 << pos) != 0
    }

    /// The number of elided positions.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks whether nothing was elided.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over elided positions in increasing order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_ELIDED_POSITION).filter(move |&pos| self.contains(pos))
    }

    /// Maps positions of the rewritten RHS to positions of the original RHS. The `i`-th
    /// element is the original position of the rewritten rule's `i`-th symbol.
    pub fn retained(self, original_len: usize) -> impl Iterator<Item = usize> {
        (0..original_len).filter(move |&pos| !self.contains(pos))
    }
}

/// Nulling elimination provenance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NullingEliminated {
    /// Positions of the original RHS that are absent from this rule.
    pub elided: ElidedPositions,
    /// The RHS length before elimination.
    pub original_len: u32,
    /// The number of elided subsets that produced this same RHS. Greater than 1 when
    /// variants were merged.
    pub alternatives: u32,
}

/// Sequence rewrite provenance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceRewritten {
    /// The repeated symbol.
    pub item: Symbol,
    /// The mode of separation.
    pub separator: Separator,
    /// Whether the rule's LHS is the sequence's LHS.
    pub top: bool,
    /// Whether the rule is the recursive step of unbounded repetition, such as
    /// `seq ::= seq item`. A derivation may apply it any number of times.
    pub recursive: bool,
}

impl SequenceRewritten {
    /// Whether a derivation of the sequence applies this rule exactly once.
    pub fn is_action_site(&self) -> bool {
        self.top && !self.recursive
    }
}

/// Trait for histories that remember which authored rule they descend from.
pub trait Origin: Sized {
    /// Returns a history for a freshly authored rule.
    fn from_origin(origin: RuleHandle) -> Self;
    /// Returns the authored rule or sequence this history descends from.
    fn origin(&self) -> Option<RuleHandle>;
}

/// Trait for history types that may have semantic actions.
pub trait Action: Sized {
    /// Returns the semantic action.
    fn action(&self) -> Option<ActionId>;
    /// Returns a history with the action attached. Attaching a different action to a
    /// history that already has one is an error.
    fn set_action(&self, action: ActionId) -> Result<Self>;
    /// Whether a derivation through this rule invokes the action. Pieces created by
    /// rewrites answer `false`, so that the action runs once per original derivation.
    fn invokes_action(&self) -> bool;
}

/// Trait for history types that allow the rule to have its precedence assigned.
pub trait AssignPrecedence: Sized {
    /// Returns the precedence.
    fn precedence(&self) -> Option<Precedence>;
    /// Returns a history with the precedence. Assigning a different precedence to a
    /// history that already has one is an error.
    fn assign_precedence(&self, level: u32, assoc: Associativity) -> Result<Self>;
}

/// Trait for history types that allow the rule to be binarized.
pub trait Binarize: Sized {
    /// Returns the binarization provenance.
    fn binarized(&self) -> Option<Binarized>;
    /// Returns a history for one piece of a split rule, or `None` if rules with this
    /// history are kept whole.
    fn binarize(&self, piece: Binarized) -> Option<Self>;
}

/// Trait for history types that allow the rule to have nullable symbols
/// eliminated from the RHS.
pub trait EliminateNulling: Sized {
    /// Returns the nulling elimination provenance.
    fn nulling(&self) -> Option<NullingEliminated>;
    /// Returns a history for one variant of the rule, or `None` if the rule is kept
    /// as it is.
    fn eliminate_nulling(&self, variant: NullingEliminated) -> Option<Self>;
}

/// Trait for history types that allow the sequence rule to be rewritten into grammar rules.
pub trait RewriteSequence: Sized {
    /// Returns the sequence rewrite provenance.
    fn sequence(&self) -> Option<SequenceRewritten>;
    /// Returns a history for a rule produced from a sequence rule.
    fn rewrite_sequence(&self, rewrite: SequenceRewritten) -> Self;
}

/// All capabilities required by normalization passes.
pub trait RuleHistory:
    Origin
    + Action
    + AssignPrecedence
    + Binarize
    + EliminateNulling
    + RewriteSequence
    + Clone
    + Default
    + fmt::Debug
    + PartialEq
{
}

impl<H> RuleHistory for H where
    H: Origin
        + Action
        + AssignPrecedence
        + Binarize
        + EliminateNulling
        + RewriteSequence
        + Clone
        + Default
        + fmt::Debug
        + PartialEq
{
}

pub(crate) fn check_action(existing: Option<ActionId>, new: ActionId) -> Result<()> {
    match existing {
        Some(existing) if existing != new => {
            Err(NormalizeError::DuplicateAction { existing, new })
        }
        _ => Ok(()),
    }
}

pub(crate) fn check_precedence(existing: Option<Precedence>, new: Precedence) -> Result<()> {
    match existing {
        Some(existing) if existing != new => {
            Err(NormalizeError::PrecedenceConflict { existing, new })
        }
        _ => Ok(()),
    }
}

/// A history which carries no data. All operations on `NullHistory` are no-op.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NullHistory;

impl Origin for NullHistory {
    fn from_origin(_origin: RuleHandle) -> Self {
        NullHistory
    }

    fn origin(&self) -> Option<RuleHandle> {
        None
    }
}

impl Action for NullHistory {
    fn action(&self) -> Option<ActionId> {
        None
    }

    fn set_action(&self, _action: ActionId) -> Result<Self> {
        Ok(NullHistory)
    }

    fn invokes_action(&self) -> bool {
        true
    }
}

impl AssignPrecedence for NullHistory {
    fn precedence(&self) -> Option<Precedence> {
        None
    }

    fn assign_precedence(&self, _level: u32, _assoc: Associativity) -> Result<Self> {
        Ok(NullHistory)
    }
}

impl Binarize for NullHistory {
    fn binarized(&self) -> Option<Binarized> {
        None
    }

    fn binarize(&self, _piece: Binarized) -> Option<Self> {
        None
    }
}

impl EliminateNulling for NullHistory {
    fn nulling(&self) -> Option<NullingEliminated> {
        None
    }

    fn eliminate_nulling(&self, _variant: NullingEliminated) -> Option<Self> {
        None
    }
}

impl RewriteSequence for NullHistory {
    fn sequence(&self) -> Option<SequenceRewritten> {
        None
    }

    fn rewrite_sequence(&self, _rewrite: SequenceRewritten) -> Self {
        NullHistory
    }
}
