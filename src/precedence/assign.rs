//! Resolution of rule precedence from symbol precedence declarations.

use log::{debug, trace};

use crate::error::Result;
use crate::grammar::Cfg;
use crate::history::{AssignPrecedence, RuleHistory};
use crate::pipeline::Stage;
use crate::provenance::BinarizedChains;
use crate::rule::Rule;

impl<H> Cfg<H>
where
    H: RuleHistory,
{
    /// Returns a grammar in which rules without precedence of their own take the
    /// precedence of the rightmost RHS symbol with declared precedence.
    ///
    /// The RHS of a binarized rule is reconstructed from its chain, and every piece
    /// of the chain receives the precedence resolved for its top. Rules with explicit
    /// precedence keep it.
    pub fn resolve_precedence(&self) -> Result<Self> {
        let chains = BinarizedChains::new(self);
        let mut rules: Vec<Rule<H>> = self.rules().cloned().collect();
        let mut resolved = 0;
        for (index, rule) in self.rules().enumerate() {
            if chains.is_chain_symbol(rule.lhs()) || rule.history().precedence().is_some() {
                continue;
            }
            let full_rhs = chains.full_rhs(self, index);
            let precedence = full_rhs
                .iter()
                .rev()
                .find_map(|&sym| self.symbol_precedence(sym));
            if let Some(precedence) = precedence {
                trace!(
                    "PRECEDENCE {:?} ::= {:?} gets {:?}",
                    rule.lhs(),
                    full_rhs,
                    precedence
                );
                for piece in chains.pieces(self, index) {
                    let history = rules[piece]
                        .history()
                        .assign_precedence(precedence.level, precedence.assoc)?;
                    *rules[piece].history_mut() = history;
                }
                resolved += 1;
            }
        }
        debug!("resolved precedence of {} rules", resolved);
        let stage = if self.stage() >= Stage::Binarized {
            self.stage().max(Stage::PrecedenceResolved)
        } else {
            self.stage()
        };
        Ok(self.rewritten(
            self.sym_source().clone(),
            rules,
            self.sequences().cloned().collect(),
            stage,
        ))
    }
}
