//! The history that records every transformation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::*;

/// Rule history carrying one optional payload per capability.
///
/// The default value is the history of a rule nobody has touched: no origin, no action,
/// no precedence, no rewrites.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History {
    origin: Option<RuleHandle>,
    action: Option<ActionId>,
    precedence: Option<Precedence>,
    binarized: Option<Binarized>,
    nulling: Option<NullingEliminated>,
    sequence: Option<SequenceRewritten>,
    action_site: bool,
}

impl Default for History {
    fn default() -> Self {
        History {
            origin: None,
            action: None,
            precedence: None,
            binarized: None,
            nulling: None,
            sequence: None,
            action_site: true,
        }
    }
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no pass has rewritten the rule.
    pub fn is_authored(&self) -> bool {
        self.binarized.is_none() && self.nulling.is_none() && self.sequence.is_none()
    }
}

impl Origin for History {
    fn from_origin(origin: RuleHandle) -> Self {
        History {
            origin: Some(origin),
            ..History::default()
        }
    }

    fn origin(&self) -> Option<RuleHandle> {
        self.origin
    }
}

impl Action for History {
    fn action(&self) -> Option<ActionId> {
        self.action
    }

    fn set_action(&self, action: ActionId) -> Result<Self> {
        check_action(self.action, action)?;
        Ok(History {
            action: Some(action),
            ..*self
        })
    }

    fn invokes_action(&self) -> bool {
        self.action_site
    }
}

impl AssignPrecedence for History {
    fn precedence(&self) -> Option<Precedence> {
        self.precedence
    }

    fn assign_precedence(&self, level: u32, assoc: Associativity) -> Result<Self> {
        let precedence = Precedence::new(level, assoc);
        check_precedence(self.precedence, precedence)?;
        Ok(History {
            precedence: Some(precedence),
            ..*self
        })
    }
}

impl Binarize for History {
    fn binarized(&self) -> Option<Binarized> {
        self.binarized
    }

    fn binarize(&self, piece: Binarized) -> Option<Self> {
        Some(History {
            binarized: Some(piece),
            action_site: self.action_site && piece.is_top(),
            ..*self
        })
    }
}

impl EliminateNulling for History {
    fn nulling(&self) -> Option<NullingEliminated> {
        self.nulling
    }

    fn eliminate_nulling(&self, variant: NullingEliminated) -> Option<Self> {
        if self.nulling.is_some() {
            // Already processed.
            return None;
        }
        Some(History {
            nulling: Some(variant),
            ..*self
        })
    }
}

impl RewriteSequence for History {
    fn sequence(&self) -> Option<SequenceRewritten> {
        self.sequence
    }

    fn rewrite_sequence(&self, rewrite: SequenceRewritten) -> Self {
        History {
            sequence: Some(rewrite),
            action_site: self.action_site && rewrite.is_action_site(),
            ..*self
        }
    }
}
