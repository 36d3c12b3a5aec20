//! Rewrites sequence rules into production rules.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, trace};

use crate::config::NormalizeConfig;
use crate::error::{NormalizeError, Result};
use crate::grammar::Cfg;
use crate::history::{RewriteSequence, RuleHistory, SequenceRewritten};
use crate::pipeline::Stage;
use crate::rule::Rule;
use crate::symbol::{Symbol, SymbolSource};

use super::Separator::{self, Liberal, Null, Proper, Trailing};
use super::Sequence;

/// Rewrites sequence rules into production rules.
///
/// Unbounded repetition is encoded with left recursion: `seq ::= seq item`, or
/// `seq ::= seq sep item` with proper separation. Bounded repetition is encoded
/// compactly, by splitting ranges at powers of two.
pub struct SequencesToProductions<'a, H> {
    sym_source: &'a mut SymbolSource,
    rules: Vec<Rule<H>>,
    stack: Vec<Span>,
    map: HashMap<PartialSequence, Symbol>,
}

// A sequence without its history.
#[derive(Clone, Copy, Debug)]
struct Span {
    lhs: Symbol,
    rhs: Symbol,
    start: u32,
    end: Option<u32>,
    separator: Separator,
}

// A key into a private map.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct PartialSequence {
    rhs: Symbol,
    start: u32,
    end: Option<u32>,
    separator: Separator,
}

impl Span {
    fn inclusive(self, start: u32, end: Option<u32>) -> Self {
        Span { start, end, ..self }
    }

    fn exactly(self, count: u32) -> Self {
        self.inclusive(count, Some(count))
    }

    fn separator(self, separator: Separator) -> Self {
        Span { separator, ..self }
    }
}

impl<H> From<&Sequence<H>> for Span {
    fn from(value: &Sequence<H>) -> Self {
        Span {
            lhs: value.lhs,
            rhs: value.rhs,
            start: value.start,
            end: value.end,
            separator: value.separator,
        }
    }
}

impl From<Span> for PartialSequence {
    fn from(value: Span) -> Self {
        PartialSequence {
            rhs: value.rhs,
            start: value.start,
            end: value.end,
            separator: value.separator,
        }
    }
}

impl<'a, H> SequencesToProductions<'a, H>
where
    H: RewriteSequence + Clone,
{
    /// Initializes a rewrite. Helper symbols are allocated from the given source.
    pub fn new(sym_source: &'a mut SymbolSource) -> Self {
        SequencesToProductions {
            sym_source,
            rules: vec![],
            stack: vec![],
            map: HashMap::new(),
        }
    }

    /// Returns the number of rules produced so far.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks whether no rules were produced so far.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the produced rules.
    pub fn into_rules(self) -> Vec<Rule<H>> {
        self.rules
    }

    /// Rewrites a sequence rule.
    pub fn rewrite(&mut self, top: &Sequence<H>) -> Result<()> {
        if let Some(end) = top.end {
            if end < top.start {
                return Err(NormalizeError::InvalidRepetitionRange {
                    min: top.start,
                    max: end,
                });
            }
        }
        trace!(
            "SEQUENCE {:?} ::= {:?}{{{}, {:?}}} {:?}",
            top.lhs,
            top.rhs,
            top.start,
            top.end,
            top.separator
        );
        self.stack.clear();
        self.map.clear();
        let rewritten = SequenceRewritten {
            item: top.rhs,
            separator: top.separator,
            top: true,
            recursive: false,
        };
        let history = |rewrite| top.history.rewrite_sequence(rewrite);
        let history_top = history(rewritten);
        let history_top_step = history(SequenceRewritten {
            recursive: true,
            ..rewritten
        });
        self.reduce(Span::from(top), &history_top, &history_top_step);
        let history_bottom = history(SequenceRewritten {
            top: false,
            ..rewritten
        });
        let history_bottom_step = history(SequenceRewritten {
            top: false,
            recursive: true,
            ..rewritten
        });
        while let Some(span) = self.stack.pop() {
            debug_assert!(span.start <= span.end.unwrap_or(!0));
            self.reduce(span, &history_bottom, &history_bottom_step);
        }
        Ok(())
    }

    fn recurse(&mut self, span: Span) -> Symbol {
        match self.map.entry(span.into()) {
            Entry::Vacant(vacant) => {
                let lhs = self.sym_source.next_sym();
                vacant.insert(lhs);
                self.stack.push(Span { lhs, ..span });
                lhs
            }
            Entry::Occupied(lhs) => *lhs.get(),
        }
    }

    fn rhs<A: AsRef<[Symbol]>>(&mut self, lhs: Symbol, rhs: A, history: &H) {
        debug_assert!(rhs.as_ref().len() <= 3);
        self.rules
            .push(Rule::new(lhs, rhs.as_ref(), history.clone()));
    }

    /// `step` is the history of recursive steps, which derivations repeat.
    fn reduce(&mut self, span: Span, history: &H, step: &H) {
        let Span {
            lhs,
            rhs,
            start,
            end,
            separator,
        } = span;
        match (separator, start, end) {
            (_, 0, Some(0)) => {
                // seq ::= epsilon
                self.rhs(lhs, [], history);
            }
            (Null, 0, None) => {
                // seq ::= epsilon | seq item
                self.rhs(lhs, [], history);
                self.rhs(lhs, [lhs, rhs], step);
            }
            (_, 0, end) => {
                // seq ::= epsilon | sym
                self.rhs(lhs, [], history);
                let sym = self.recurse(span.inclusive(1, end));
                self.rhs(lhs, [sym], history);
            }
            (Liberal(sep), _, _) => {
                let sym1 = self.recurse(span.separator(Proper(sep)));
                let sym2 = self.recurse(span.separator(Trailing(sep)));
                // seq ::= sym1 | sym2
                self.rhs(lhs, [sym1], history);
                self.rhs(lhs, [sym2], history);
            }
            (Trailing(sep), _, _) => {
                let sym = self.recurse(span.separator(Proper(sep)));
                // seq ::= sym sep
                self.rhs(lhs, [sym, sep], history);
            }
            (_, 1, None) => {
                // seq ::= item
                self.rhs(lhs, [rhs], history);
                // Left recursive
                // seq ::= seq sep item
                if let Proper(sep) = separator {
                    self.rhs(lhs, [lhs, sep, rhs], step);
                } else {
                    self.rhs(lhs, [lhs, rhs], step);
                }
            }
            (_, 1, Some(1)) => {
                self.rhs(lhs, [rhs], history);
            }
            (_, 1, Some(2)) => {
                let sym1 = self.recurse(span.exactly(1));
                let sym2 = self.recurse(span.exactly(2));
                // seq ::= sym1 | sym2
                self.rhs(lhs, [sym1], history);
                self.rhs(lhs, [sym2], history);
            }
            (_, 1, Some(end)) => {
                // end >= 3
                let pow2 = half_power_of_two(end);
                let (seq1, block, seq2) = (
                    span.inclusive(1, Some(pow2)),
                    span.exactly(pow2),
                    span.inclusive(1, Some(end - pow2)),
                );
                let rhs1 = self.recurse(seq1);
                let block = self.recurse(block.separator(separator.prefix_separator()));
                let rhs2 = self.recurse(seq2);
                // seq ::= sym1 | block sym2
                self.rhs(lhs, [rhs1], history);
                self.rhs(lhs, [block, rhs2], history);
            }
            (Proper(sep), 2, Some(2)) => {
                self.rhs(lhs, [rhs, sep, rhs], history);
            }
            (_, 2, Some(2)) => {
                self.rhs(lhs, [rhs, rhs], history);
            }
            (_, 2.., end) => {
                let (seq1, seq2) = if Some(start) == end {
                    // A "block"
                    let pow2 = half_power_of_two(start);
                    (span.exactly(pow2), span.exactly(start - pow2))
                } else {
                    // A "span"
                    (
                        span.exactly(start - 1),
                        span.inclusive(1, end.map(|end| end - start + 1)),
                    )
                };
                let (rhs1, rhs2) = (
                    self.recurse(seq1.separator(separator.prefix_separator())),
                    self.recurse(seq2.separator(separator)),
                );
                // seq ::= sym1 sym2
                self.rhs(lhs, [rhs1, rhs2], history);
            }
        }
    }
}

/// The greatest power of two below `n`, for `n >= 2`.
fn half_power_of_two(n: u32) -> u32 {
    debug_assert!(n >= 2);
    1 << (31 - (n - 1).leading_zeros())
}

impl<H> Sequence<H>
where
    H: RewriteSequence + Clone,
{
    /// Rewrites this sequence rule into production rules. Helper symbols are
    /// allocated from the given source.
    pub fn rewrite(&self, sym_source: &mut SymbolSource) -> Result<Vec<Rule<H>>> {
        let mut rewrite = SequencesToProductions::new(sym_source);
        rewrite.rewrite(self)?;
        Ok(rewrite.into_rules())
    }
}

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Returns an equivalent grammar in which every sequence rule is replaced with
    /// production rules.
    pub fn expand_sequences(&self, config: &NormalizeConfig) -> Result<Self> {
        let mut sym_source = self.sym_source().clone();
        let mut rules: Vec<Rule<H>> = self.rules().cloned().collect();
        let mut rewrite = SequencesToProductions::new(&mut sym_source);
        for sequence in self.sequences() {
            rewrite.rewrite(sequence)?;
            config.check_rule_count(rules.len() + rewrite.len())?;
        }
        let produced = rewrite.into_rules();
        debug!(
            "expanded {} sequence rules into {} rules",
            self.sequences().count(),
            produced.len()
        );
        rules.extend(produced);
        let stage = self.stage().max(Stage::SequenceExpanded);
        Ok(self.rewritten(sym_source, rules, vec![], stage))
    }
}
