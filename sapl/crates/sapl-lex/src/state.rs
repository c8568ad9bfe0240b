//! Lexer states: ordered rule lists.

use crate::rule::{Action, Rule};
use crate::token::Category;

/// A named, ordered list of rules.
///
/// Rules are tried top to bottom and the first one that matches wins,
/// even if a later rule would match more text.
#[derive(Clone, Debug)]
pub struct State {
    name: String,
    rules: Vec<Rule>,
}

/// The rule that fired and how much it consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// Category of the emitted token.
    pub category: Category,
    /// Transition to apply.
    pub action: Action,
    /// Consumed byte length; zero for a pure transition.
    pub len: usize,
}

impl State {
    /// Creates a state from compiled rules.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// State name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Finds the first rule matching at `at`.
    ///
    /// A zero-width match only counts when it changes state and
    /// `allow_zero_width` is set; otherwise evaluation moves on to the next
    /// rule.
    pub fn find_match(&self, haystack: &str, at: usize, allow_zero_width: bool) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| {
            let len = rule.pattern().match_at(haystack, at)?;
            if len == 0 && (!allow_zero_width || rule.action() == Action::Stay) {
                return None;
            }
            Some(RuleMatch {
                category: rule.category(),
                action: rule.action(),
                len,
            })
        })
    }
}
