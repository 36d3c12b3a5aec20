//! Sequences are similar to regex repetitions with numbering.

pub mod builder;
pub mod rewrite;

use std::ops::{Bound, RangeBounds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::symbol::Symbol;

use self::Separator::*;

/// Sequence rule representation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence<H = History> {
    /// The rule's left-hand side.
    pub lhs: Symbol,
    /// The repeated symbol.
    pub rhs: Symbol,
    /// The minimum number of repetitions.
    pub start: u32,
    /// Either the inclusive maximum number of repetitions, or `None` if the number of repetitions
    /// is unlimited.
    pub end: Option<u32>,
    /// The way elements are separated in a sequence, or `Null`.
    pub separator: Separator,
    /// The history carried with the sequence rule.
    pub history: H,
}

/// The separator symbol and mode of separation in a sequence, or `Null` for no separation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Separator {
    /// Separation with the trailing separator included. In other words, all elements are followed
    /// by the separator.
    Trailing(Symbol),
    /// The separator occurs between elements.
    Proper(Symbol),
    /// The union of `Trailing` and `Proper`. In other words, the trailing separator may or may not
    /// be present.
    Liberal(Symbol),
    /// No separation.
    Null,
}

impl<H> Sequence<H> {
    /// Assigns the inclusive range of the number of repetitions.
    pub fn inclusive(mut self, start: u32, end: Option<u32>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Assigns the separator symbol and mode of separation.
    pub fn separator(mut self, sep: Separator) -> Self {
        self.separator = sep;
        self
    }

    /// Assigns the range of the number of repetitions.
    pub fn range(self, range: impl RangeBounds<u32>) -> Self {
        let (start, end) = inclusive_bounds(range);
        self.inclusive(start, end)
    }
}

impl Separator {
    /// Returns the kind of separation for a prefix sequence.
    pub fn prefix_separator(self) -> Self {
        match self {
            Proper(sep) | Liberal(sep) => Trailing(sep),
            other => other,
        }
    }

    /// Returns the separator symbol, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Trailing(sep) | Proper(sep) | Liberal(sep) => Some(sep),
            Null => None,
        }
    }
}

/// Converts a range to inclusive bounds. An empty range maps to bounds with the maximum
/// below the minimum, which sequence expansion reports as `InvalidRepetitionRange`.
pub(crate) fn inclusive_bounds(range: impl RangeBounds<u32>) -> (u32, Option<u32>) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => match start.checked_add(1) {
            Some(start) => start,
            None => return (u32::MAX, Some(u32::MAX - 1)),
        },
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => Some(end),
        Bound::Excluded(&end) => match end.checked_sub(1) {
            Some(end) => Some(end),
            None => return (start.max(1), Some(0)),
        },
        Bound::Unbounded => None,
    };
    (start, end)
}
