//! Sets of symbols, such as the set of nullable symbols.

use std::{iter, ops};

use bit_vec::BitVec;

use super::{Symbol, SymbolSource};

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Constructs a `SymbolBitSet` covering every symbol of the source, with all
    /// elements set to `elem`.
    pub fn from_elem(sym_source: &SymbolSource, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(sym_source.num_syms(), elem),
        }
    }

    /// Collects symbols into a set.
    pub fn from_syms(syms: impl IntoIterator<Item = Symbol>) -> Self {
        let mut set = SymbolBitSet::new();
        for sym in syms {
            set.insert(sym);
        }
        set
    }

    /// Adds a symbol, growing the set as needed.
    pub fn insert(&mut self, sym: Symbol) {
        self.reserve(sym.usize() + 1);
        self.bit_vec.set(sym.usize(), true);
    }

    /// Sets membership of a symbol, growing the set as needed.
    pub fn set(&mut self, sym: Symbol, elem: bool) {
        if elem {
            self.insert(sym);
        } else if sym.usize() < self.bit_vec.len() {
            self.bit_vec.set(sym.usize(), false);
        }
    }

    /// Ensures the set can hold `len` symbols.
    pub fn reserve(&mut self, len: usize) {
        if self.bit_vec.len() < len {
            let additional = len - self.bit_vec.len();
            self.bit_vec.grow(additional, false);
        }
    }

    /// Checks whether the symbol is in the set. Symbols beyond the set's
    /// length are not members.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.bit_vec.get(sym.usize()).unwrap_or(false)
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Returns the number of symbols the set can hold.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    /// Checks whether the set holds no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.none()
    }

    /// Returns the underlying bit vector.
    pub fn bit_vec(&self) -> &BitVec {
        &self.bit_vec
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.contains(index) {
            &TRUE
        } else {
            &FALSE
        }
    }
}
