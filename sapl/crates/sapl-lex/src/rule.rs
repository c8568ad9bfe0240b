//! Lexer rules: a pattern, the category it yields and a state transition.
//!
//! Grammars are written as const tables of [`RuleDef`]s. The grammar
//! builder compiles each definition into a [`Rule`], resolving transition
//! targets from state names to [`StateId`]s.

use regex_automata::meta::{BuildError, Regex};
use regex_automata::{Anchored, Input};

use crate::grammar::StateId;
use crate::token::Category;

/// A compiled rule pattern.
///
/// Matching is anchored at the given offset but sees the whole haystack,
/// so `\b` at the start of a pattern observes the preceding character.
///
/// # Example
///
/// ```
/// use sapl_lex::rule::Pattern;
///
/// let keyword = Pattern::new(r"\b(?:policy|set)\b").unwrap();
/// assert_eq!(keyword.match_at("a policy", 2), Some(6));
/// assert_eq!(keyword.match_at("apolicy", 1), None);
///
/// let call = Pattern::followed_by(r"[a-z]+", r"\(").unwrap();
/// assert_eq!(call.match_at("max(1)", 0), Some(3));
/// assert_eq!(call.match_at("max 1", 0), None);
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
    /// Whether group 1 delimits the lexeme and the rest is lookahead.
    has_lookahead: bool,
}

impl Pattern {
    /// Compiles a plain pattern.
    pub fn new(body: &str) -> Result<Self, BuildError> {
        Ok(Self {
            source: body.to_string(),
            regex: Regex::new(body)?,
            has_lookahead: false,
        })
    }

    /// Compiles a pattern that only matches when `lookahead` matches right
    /// after it. The lookahead text is not consumed.
    pub fn followed_by(body: &str, lookahead: &str) -> Result<Self, BuildError> {
        Ok(Self {
            source: format!("{body}(?={lookahead})"),
            regex: Regex::new(&format!("({body})(?:{lookahead})"))?,
            has_lookahead: true,
        })
    }

    /// Pattern source text as written in the grammar.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tries to match at byte offset `at`, returning the consumed length.
    ///
    /// `Some(0)` is a zero-width match.
    pub fn match_at(&self, haystack: &str, at: usize) -> Option<usize> {
        if at > haystack.len() {
            return None;
        }
        let input = Input::new(haystack).range(at..).anchored(Anchored::Yes);

        if self.has_lookahead {
            let mut caps = self.regex.create_captures();
            self.regex.search_captures(&input, &mut caps);
            caps.get_group(1).map(|body| body.end - at)
        } else {
            self.regex.search(&input).map(|m| m.end() - at)
        }
    }
}

/// State change applied after a rule fires, by state name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Stay in the current state.
    None,
    /// Enter the named state.
    Push(&'static str),
    /// Return to the previous state.
    Pop,
}

/// Declarative rule as it appears in a grammar table.
#[derive(Clone, Copy, Debug)]
pub struct RuleDef {
    /// Regex for the lexeme.
    pub pattern: &'static str,
    /// Non-consuming suffix that must follow the lexeme.
    pub lookahead: Option<&'static str>,
    /// Category of the emitted token.
    pub category: Category,
    /// Transition applied after the rule fires.
    pub transition: Transition,
}

impl RuleDef {
    /// A rule without transition.
    pub const fn new(pattern: &'static str, category: Category) -> Self {
        Self {
            pattern,
            lookahead: None,
            category,
            transition: Transition::None,
        }
    }

    /// A rule that enters `state`.
    pub const fn push(pattern: &'static str, category: Category, state: &'static str) -> Self {
        Self {
            pattern,
            lookahead: None,
            category,
            transition: Transition::Push(state),
        }
    }

    /// A rule that returns to the previous state.
    pub const fn pop(pattern: &'static str, category: Category) -> Self {
        Self {
            pattern,
            lookahead: None,
            category,
            transition: Transition::Pop,
        }
    }

    /// Adds a non-consuming lookahead.
    pub const fn followed_by(mut self, lookahead: &'static str) -> Self {
        self.lookahead = Some(lookahead);
        self
    }

    /// Compiles the pattern of this definition.
    pub fn compile(&self) -> Result<Pattern, BuildError> {
        match self.lookahead {
            Some(lookahead) => Pattern::followed_by(self.pattern, lookahead),
            None => Pattern::new(self.pattern),
        }
    }
}

/// Resolved state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Stay in the current state.
    Stay,
    /// Push the given state.
    Push(StateId),
    /// Pop the current state.
    Pop,
}

/// A compiled rule owned by one state.
#[derive(Clone, Debug)]
pub struct Rule {
    pattern: Pattern,
    category: Category,
    action: Action,
}

impl Rule {
    /// Creates a compiled rule.
    pub fn new(pattern: Pattern, category: Category, action: Action) -> Self {
        Self {
            pattern,
            category,
            action,
        }
    }

    /// The rule's pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Category of tokens this rule emits.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Transition applied when the rule fires.
    pub fn action(&self) -> Action {
        self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_anchored() {
        let pattern = Pattern::new("permit").unwrap();
        assert_eq!(pattern.match_at("deny permit", 0), None);
        assert_eq!(pattern.match_at("deny permit", 5), Some(6));
    }

    #[test]
    fn test_word_boundary_sees_preceding_text() {
        let pattern = Pattern::new(r"\bin\b").unwrap();
        assert_eq!(pattern.match_at("x in y", 2), Some(2));
        assert_eq!(pattern.match_at("begin", 3), None);
    }

    #[test]
    fn test_first_alternative_wins() {
        let pattern = Pattern::new(r"<|<=").unwrap();
        assert_eq!(pattern.match_at("<=", 0), Some(1));
    }

    #[test]
    fn test_lookahead_is_not_consumed() {
        let pattern = Pattern::followed_by(
            r"\b[a-zA-Z_$][a-zA-Z0-9_$]*(?:\.[a-zA-Z_$][a-zA-Z0-9_$]*)+",
            r"\(",
        )
        .unwrap();
        assert_eq!(pattern.match_at("time.now()", 0), Some(8));
        assert_eq!(pattern.match_at("time.now", 0), None);
        assert!(pattern.as_str().ends_with(r"(?=\()"));
    }

    #[test]
    fn test_zero_width_match() {
        let pattern = Pattern::new(r"x*").unwrap();
        assert_eq!(pattern.match_at("abc", 1), Some(0));
        assert_eq!(pattern.match_at("abc", 3), Some(0));
        assert_eq!(pattern.match_at("abc", 4), None);
    }

    #[test]
    fn test_non_ascii_haystack() {
        let pattern = Pattern::new(r#"[^"\\]+"#).unwrap();
        assert_eq!(pattern.match_at("\"grüße\"", 1), Some("grüße".len()));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Pattern::new("(unclosed").is_err());
        assert!(RuleDef::new("[", Category::Error).compile().is_err());
    }

    #[test]
    fn test_rule_def_constructors() {
        const DEF: RuleDef =
            RuleDef::push("<", Category::Operator, "attribute_finder").followed_by("[a-z]");
        assert_eq!(DEF.transition, Transition::Push("attribute_finder"));
        assert_eq!(DEF.lookahead, Some("[a-z]"));
        assert_eq!(RuleDef::pop(">", Category::Operator).transition, Transition::Pop);
        assert_eq!(RuleDef::new(",", Category::Punctuation).transition, Transition::None);
    }
}
