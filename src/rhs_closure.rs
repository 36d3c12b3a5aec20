//! Transitive closure of symbol properties over rule right-hand sides.

use crate::grammar::Cfg;
use crate::rule::Rule;
use crate::symbol::{Symbol, SymbolBitSet};

/// Propagates a property from RHS symbols to the LHS. If all symbols on a rule's
/// RHS have the property, the LHS has it too.
pub struct RhsClosure<'a, H> {
    derived_by: Vec<(Symbol, &'a Rule<H>)>,
    work_stack: Vec<Symbol>,
}

impl<'a, H> RhsClosure<'a, H> {
    /// Records information which is needed to calculate the RHS transitive closure.
    pub fn new(grammar: &'a Cfg<H>) -> Self {
        let mut derived_by = Vec::with_capacity(2 * grammar.num_rules());
        for rule in grammar.rules() {
            derived_by.extend(rule.rhs().iter().map(|&sym| (sym, rule)));
        }

        derived_by.sort_by_key(|&(sym, _)| sym);

        RhsClosure {
            derived_by,
            work_stack: vec![],
        }
    }

    /// Calculates the RHS transitive closure.
    pub fn rhs_closure(&mut self, property: &mut SymbolBitSet) {
        self.work_stack.extend(property.iter());

        let derived_by = &self.derived_by;
        while let Some(work_sym) = self.work_stack.pop() {
            for &(_, rule) in find(derived_by, work_sym) {
                if !property[rule.lhs()] && rule.rhs().iter().all(|&sym| property[sym]) {
                    property.set(rule.lhs(), true);
                    self.work_stack.push(rule.lhs());
                }
            }
        }
    }
}

fn find<S, R>(vec: &[(S, R)], key_sym: S) -> &[(S, R)]
where
    S: Copy + Ord,
{
    let start = vec.partition_point(|&(sym, _)| sym < key_sym);
    let len = vec[start..].iter().take_while(|t| t.0 == key_sym).count();
    &vec[start..start + len]
}

impl<H> Cfg<H> {
    /// Returns the set of LHS symbols of empty rules.
    pub fn nulling_symbols(&self) -> SymbolBitSet {
        let mut set = SymbolBitSet::from_elem(self.sym_source(), false);
        for rule in self.rules().filter(|rule| rule.is_empty()) {
            set.insert(rule.lhs());
        }
        set
    }

    /// Returns the set of symbols that derive the empty string.
    pub fn nullable_symbols(&self) -> SymbolBitSet {
        let mut nullable = self.nulling_symbols();
        RhsClosure::new(self).rhs_closure(&mut nullable);
        nullable
    }
}
