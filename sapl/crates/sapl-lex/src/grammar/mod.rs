//! Grammars: immutable bundles of lexer states plus language metadata.
//!
//! A grammar is assembled with [`GrammarBuilder`] from const [`RuleDef`]
//! tables. Building compiles every pattern and resolves every transition
//! target, so a grammar that builds can never fail at lex time.
//!
//! # Example
//!
//! ```
//! use sapl_lex::grammar::Grammar;
//! use sapl_lex::rule::RuleDef;
//! use sapl_lex::Category;
//!
//! const ROOT: &[RuleDef] = &[
//!     RuleDef::new(r"\s+", Category::Text),
//!     RuleDef::push(r"\(", Category::Punctuation, "group"),
//!     RuleDef::new(r"[a-z]+", Category::Name),
//! ];
//! const GROUP: &[RuleDef] = &[
//!     RuleDef::pop(r"\)", Category::Punctuation),
//!     RuleDef::new(r"[0-9]+", Category::Number),
//! ];
//!
//! let grammar = Grammar::builder("demo")
//!     .state("root", ROOT)
//!     .state("group", GROUP)
//!     .build()
//!     .unwrap();
//!
//! let tokens = grammar.tokenize("f(42)");
//! assert_eq!(tokens[2].category, Category::Number);
//! ```

pub mod sapl;
pub mod sapl_test;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{LexError, Result};
use crate::lexer::Lexer;
use crate::rule::{Action, Rule, RuleDef, Transition};
use crate::state::State;
use crate::token::Token;

/// Name of the state a grammar starts in unless told otherwise.
pub const ROOT_STATE: &str = "root";

/// Index of a state within its grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// Creates an id from a state index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The state index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An immutable language definition.
#[derive(Clone, Debug)]
pub struct Grammar {
    tag: String,
    aliases: Vec<String>,
    title: String,
    description: String,
    filenames: Vec<String>,
    mimetypes: Vec<String>,
    keywords: IndexSet<String>,
    states: IndexMap<String, State>,
    root: StateId,
}

impl Grammar {
    /// Starts building a grammar with the given tag.
    pub fn builder(tag: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(tag)
    }

    /// Primary tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Additional tags the grammar answers to.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Human-readable name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// One-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// File name globs, e.g. `*.sapl`.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Associated mimetypes.
    pub fn mimetypes(&self) -> &[String] {
        &self.mimetypes
    }

    /// Reserved words of the language, in declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Returns true if `word` is a reserved word of the language.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// The start state.
    pub fn root(&self) -> StateId {
        self.root
    }

    /// The state with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this grammar.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    /// Looks up a state id by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(StateId::new)
    }

    /// Looks up a state by name.
    pub fn state_by_name(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// All states in definition order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// Returns true if the file name matches one of the grammar's globs.
    ///
    /// Only the final path component is considered. Globs are either exact
    /// names or `*` followed by a suffix.
    pub fn matches_filename(&self, path: &str) -> bool {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        self.filenames.iter().any(|glob| match glob.strip_prefix('*') {
            Some(suffix) => name.len() > suffix.len() && name.ends_with(suffix),
            None => name == glob,
        })
    }

    /// Creates a lexer over `source`.
    pub fn lexer<'a>(&'a self, source: &'a str) -> Lexer<'a> {
        Lexer::new(self, source)
    }

    /// Lexes `source` with the default lexer configuration.
    pub fn tokenize<'a>(&'a self, source: &'a str) -> Vec<Token<'a>> {
        self.lexer(source).tokenize()
    }
}

/// Builder for [`Grammar`].
#[derive(Clone, Debug)]
pub struct GrammarBuilder {
    tag: String,
    aliases: Vec<String>,
    title: String,
    description: String,
    filenames: Vec<String>,
    mimetypes: Vec<String>,
    keywords: Vec<String>,
    root: String,
    states: Vec<(String, &'static [RuleDef])>,
}

impl GrammarBuilder {
    /// Creates a builder. The title defaults to the tag.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            title: tag.clone(),
            tag,
            aliases: Vec::new(),
            description: String::new(),
            filenames: Vec::new(),
            mimetypes: Vec::new(),
            keywords: Vec::new(),
            root: ROOT_STATE.to_string(),
            states: Vec::new(),
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a file name glob.
    pub fn filename(mut self, glob: impl Into<String>) -> Self {
        self.filenames.push(glob.into());
        self
    }

    /// Adds a mimetype.
    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetypes.push(mimetype.into());
        self
    }

    /// Adds reserved words.
    pub fn keywords(mut self, words: &[&str]) -> Self {
        self.keywords.extend(words.iter().map(|w| w.to_string()));
        self
    }

    /// Overrides the start state name.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = name.into();
        self
    }

    /// Adds a state with its rules in priority order.
    pub fn state(mut self, name: impl Into<String>, rules: &'static [RuleDef]) -> Self {
        self.states.push((name.into(), rules));
        self
    }

    /// Validates the definition and compiles every rule.
    ///
    /// # Errors
    ///
    /// - [`LexError::DuplicateState`] if a state name repeats.
    /// - [`LexError::UnknownState`] if the root or a push target is undefined.
    /// - [`LexError::InvalidPattern`] if a pattern does not compile.
    pub fn build(self) -> Result<Grammar> {
        let mut ids: FxHashMap<&str, StateId> = FxHashMap::default();
        for (index, (name, _)) in self.states.iter().enumerate() {
            if ids.insert(name.as_str(), StateId::new(index)).is_some() {
                return Err(LexError::DuplicateState {
                    grammar: self.tag.clone(),
                    state: name.clone(),
                });
            }
        }

        let root = *ids.get(self.root.as_str()).ok_or_else(|| LexError::UnknownState {
            grammar: self.tag.clone(),
            state: self.tag.clone(),
            target: self.root.clone(),
        })?;

        let mut states = IndexMap::with_capacity(self.states.len());
        for (name, defs) in &self.states {
            let mut rules = Vec::with_capacity(defs.len());
            for def in defs.iter() {
                let pattern = def.compile().map_err(|source| LexError::InvalidPattern {
                    state: name.clone(),
                    pattern: def.pattern.to_string(),
                    source: Box::new(source),
                })?;
                let action = match def.transition {
                    Transition::None => Action::Stay,
                    Transition::Pop => Action::Pop,
                    Transition::Push(target) => {
                        let id = ids.get(target).ok_or_else(|| LexError::UnknownState {
                            grammar: self.tag.clone(),
                            state: name.clone(),
                            target: target.to_string(),
                        })?;
                        Action::Push(*id)
                    },
                };
                rules.push(Rule::new(pattern, def.category, action));
            }
            states.insert(name.clone(), State::new(name.clone(), rules));
        }

        debug!(grammar = %self.tag, states = states.len(), "grammar built");

        Ok(Grammar {
            tag: self.tag,
            aliases: self.aliases,
            title: self.title,
            description: self.description,
            filenames: self.filenames,
            mimetypes: self.mimetypes,
            keywords: self.keywords.into_iter().collect(),
            states,
            root,
        })
    }
}
