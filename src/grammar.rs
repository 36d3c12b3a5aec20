//! Definitions of the context-free grammar type.

use std::collections::BTreeMap;

use crate::error::{NormalizeError, Result};
use crate::history::{
    check_precedence, Action, ActionId, AssignPrecedence, History, Precedence, RuleHistory,
};
use crate::pipeline::{Pass, Stage};
use crate::precedence::{Associativity, PrecedencedRuleBuilder};
use crate::rule::builder::RuleBuilder;
use crate::rule::{Rule, RuleHandle};
use crate::sequence::builder::SequenceRuleBuilder;
use crate::sequence::{Separator, Sequence};
use crate::symbol::{Symbol, SymbolSource};

/// Context-free grammar type.
///
/// A context-free grammar can be thought of as a regular expression
/// equipped with recursion. Besides plain rules, the grammar holds sequence
/// rules that are expanded by [`fn expand_sequences`].
///
/// Normalization passes take `&self` and return a new grammar. A failed pass
/// leaves its input as it was.
///
/// [`fn expand_sequences`]: Self::expand_sequences
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cfg<H = History> {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The array of rules.
    rules: Vec<Rule<H>>,
    /// The array of sequence rules not yet rewritten.
    sequences: Vec<Sequence<H>>,
    /// Declared precedence of symbols, such as operators.
    symbol_precedence: BTreeMap<Symbol, Precedence>,
    stage: Stage,
    /// Rules below this index were produced by a pass and have no handle.
    authored_from: usize,
    /// The number of sequence rules consumed by passes.
    sequence_offset: usize,
}

impl<H> Default for Cfg<H> {
    fn default() -> Self {
        Self::with_sym_source(SymbolSource::new())
    }
}

impl<H> Cfg<H> {
    /// Creates an empty context-free grammar with the given symbol source.
    ///
    /// Symbols will be generated with this symbol source.
    pub fn with_sym_source(sym_source: SymbolSource) -> Self {
        Cfg {
            sym_source,
            rules: vec![],
            sequences: vec![],
            symbol_precedence: BTreeMap::new(),
            stage: Stage::Authored,
            authored_from: 0,
            sequence_offset: 0,
        }
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source.sym()
    }

    /// Generates a new unique symbol.
    pub fn next_sym(&mut self) -> Symbol {
        self.sym_source.next_sym()
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Allows mutable access to the symbol source through a reference.
    pub fn sym_source_mut(&mut self) -> &mut SymbolSource {
        &mut self.sym_source
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &Rule<H>> + '_ {
        self.rules.iter()
    }

    /// Returns the rule at the given index.
    pub fn rule_at(&self, index: usize) -> Option<&Rule<H>> {
        self.rules.get(index)
    }

    /// Returns the number of rules.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Returns an iterator over sequence rules that were not rewritten yet.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence<H>> + '_ {
        self.sequences.iter()
    }

    /// Returns the normalization stage of this grammar.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the declared precedence of a symbol.
    pub fn symbol_precedence(&self, sym: Symbol) -> Option<Precedence> {
        self.symbol_precedence.get(&sym).copied()
    }

    /// Sorts the rule array.
    pub fn sort(&mut self) {
        self.rules
            .sort_by(|a, b| (a.lhs(), a.rhs()).cmp(&(b.lhs(), b.rhs())));
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// 0 ::= 1 ~ 2 ~ 3;
    /// 1 ::= ();
    /// ```
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for rule in self.rules() {
            let rhs = if rule.rhs().is_empty() {
                "()".to_string()
            } else {
                rule.rhs()
                    .iter()
                    .map(|sym| sym.to_string())
                    .collect::<Vec<_>>()
                    .join(" ~ ")
            };
            result.push_str(&format!("{} ::= {};\n", rule.lhs(), rhs));
        }
        result
    }

    pub(crate) fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Returns the handle the next sequence rule will get.
    pub(crate) fn next_sequence_handle(&self) -> RuleHandle {
        RuleHandle::Sequence(self.sequence_offset + self.sequences.len())
    }

    /// Builds the grammar returned by a pass. Symbol precedence declarations carry over.
    /// Handles of rules and sequences the pass consumed stop being valid.
    pub(crate) fn rewritten(
        &self,
        sym_source: SymbolSource,
        rules: Vec<Rule<H>>,
        sequences: Vec<Sequence<H>>,
        stage: Stage,
    ) -> Self {
        let authored_from = if stage == Stage::Authored {
            self.authored_from
        } else {
            rules.len()
        };
        let consumed = self.sequences.len().saturating_sub(sequences.len());
        Cfg {
            sym_source,
            rules,
            sequences,
            symbol_precedence: self.symbol_precedence.clone(),
            stage,
            authored_from,
            sequence_offset: self.sequence_offset + consumed,
        }
    }
}

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to this grammar. Its history refers to the returned handle.
    ///
    /// Adding a rule returns the grammar to the `Authored` stage.
    pub fn add_rule(&mut self, lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> RuleHandle {
        let handle = RuleHandle::Rule(self.rules.len());
        self.add_rule_with_history(lhs, rhs, H::from_origin(handle))
    }

    /// Adds a rule with the given history to this grammar.
    pub fn add_rule_with_history(
        &mut self,
        lhs: Symbol,
        rhs: impl AsRef<[Symbol]>,
        history: H,
    ) -> RuleHandle {
        let handle = RuleHandle::Rule(self.rules.len());
        self.rules.push(Rule::new(lhs, rhs.as_ref(), history));
        self.stage = Stage::Authored;
        handle
    }

    /// Adds a sequence rule `lhs ::= item{min,max}`, optionally with a separator
    /// between items.
    pub fn add_sequence_rule(
        &mut self,
        lhs: Symbol,
        item: Symbol,
        min: u32,
        max: Option<u32>,
        separator: Option<Symbol>,
    ) -> RuleHandle {
        let handle = self.next_sequence_handle();
        self.add_sequence(Sequence {
            lhs,
            rhs: item,
            start: min,
            end: max,
            separator: separator.map_or(Separator::Null, Separator::Proper),
            history: H::from_origin(handle),
        })
    }

    /// Adds a sequence rule to this grammar.
    pub fn add_sequence(&mut self, sequence: Sequence<H>) -> RuleHandle {
        let handle = self.next_sequence_handle();
        self.sequences.push(sequence);
        self.stage = Stage::Authored;
        handle
    }

    /// Attaches a semantic action to an authored rule.
    pub fn set_action(&mut self, handle: RuleHandle, action: ActionId) -> Result<()> {
        let history = self.history_mut(handle)?;
        *history = history.set_action(action)?;
        Ok(())
    }

    /// Assigns precedence to an authored rule.
    pub fn set_precedence(
        &mut self,
        handle: RuleHandle,
        level: u32,
        assoc: Associativity,
    ) -> Result<()> {
        let history = self.history_mut(handle)?;
        *history = history.assign_precedence(level, assoc)?;
        Ok(())
    }

    /// Declares the precedence of a symbol, typically an operator. Rules without
    /// precedence of their own take it from the rightmost such symbol on their RHS.
    pub fn set_symbol_precedence(
        &mut self,
        sym: Symbol,
        level: u32,
        assoc: Associativity,
    ) -> Result<()> {
        let precedence = Precedence::new(level, assoc);
        check_precedence(self.symbol_precedence(sym), precedence)?;
        self.symbol_precedence.insert(sym, precedence);
        Ok(())
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_, H> {
        RuleBuilder::new(self, lhs)
    }

    /// Starts building a new sequence rule.
    pub fn sequence(&mut self, lhs: Symbol) -> SequenceRuleBuilder<'_, H> {
        SequenceRuleBuilder::new(self, lhs)
    }

    /// Starts building a new precedenced rule.
    pub fn precedenced_rule(&mut self, lhs: Symbol) -> PrecedencedRuleBuilder<'_, H> {
        PrecedencedRuleBuilder::new(self, lhs)
    }

    fn history_mut(&mut self, handle: RuleHandle) -> Result<&mut H> {
        if self.stage != Stage::Authored {
            return Err(NormalizeError::PassOrder {
                pass: Pass::Authoring,
                stage: self.stage,
            });
        }
        let history = match handle {
            RuleHandle::Rule(index) if index >= self.authored_from => {
                self.rules.get_mut(index).map(Rule::history_mut)
            }
            RuleHandle::Sequence(index) if index >= self.sequence_offset => self
                .sequences
                .get_mut(index - self.sequence_offset)
                .map(|seq| &mut seq.history),
            _ => None,
        };
        history.ok_or(NormalizeError::UnknownRule(handle))
    }
}
