//! Grammar registry: lookup of grammars by tag, alias, file name or
//! mimetype.
//!
//! The registry is filled once, at construction, and read-only afterwards.
//! When two grammars claim the same tag, the one registered first keeps it
//! and the second registration fails.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::{Config, LexerConfig};
use crate::error::{LexError, Result};
use crate::grammar::{sapl, sapl_test, Grammar};
use crate::lexer::Lexer;
use crate::token::Token;

static BUILTIN: Lazy<Registry> =
    Lazy::new(|| Registry::builtin().expect("built-in grammars must build"));

/// The process-wide registry holding the SAPL and SAPL-Test grammars.
///
/// # Example
///
/// ```
/// let registry = sapl_lex::registry::global();
/// assert_eq!(registry.find("SAPLTEST").unwrap().tag(), "sapl-test");
/// ```
pub fn global() -> &'static Registry {
    &BUILTIN
}

/// A set of grammars addressable by tag and alias.
#[derive(Debug, Default)]
pub struct Registry {
    grammars: Vec<Grammar>,
    /// Lower-cased tag or alias to index into `grammars`.
    by_tag: FxHashMap<String, usize>,
    config: LexerConfig,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the SAPL and SAPL-Test grammars.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(sapl::grammar()?)?;
        registry.register(sapl_test::grammar()?)?;
        debug!(grammars = registry.grammars.len(), "built-in registry ready");
        Ok(registry)
    }

    /// Creates the built-in registry adjusted by `config`: extra aliases
    /// and the lexer options used by [`Registry::lex`].
    pub fn with_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin()?;
        for (alias, tag) in &config.aliases {
            registry.alias(alias, tag)?;
        }
        registry.config = config.lexer;
        Ok(registry)
    }

    /// Adds a grammar under its tag and aliases.
    ///
    /// # Errors
    ///
    /// [`LexError::DuplicateTag`] if the tag or any alias is taken. Nothing is
    /// registered in that case.
    pub fn register(&mut self, grammar: Grammar) -> Result<()> {
        let keys: Vec<String> = std::iter::once(grammar.tag())
            .chain(grammar.aliases().iter().map(String::as_str))
            .map(str::to_lowercase)
            .collect();

        for (i, key) in keys.iter().enumerate() {
            if self.by_tag.contains_key(key) || keys[..i].contains(key) {
                return Err(LexError::DuplicateTag(key.clone()));
            }
        }

        let index = self.grammars.len();
        debug!(tag = grammar.tag(), aliases = ?grammar.aliases(), "grammar registered");
        for key in keys {
            self.by_tag.insert(key, index);
        }
        self.grammars.push(grammar);
        Ok(())
    }

    /// Makes `alias` another name for the grammar registered as `tag`.
    pub fn alias(&mut self, alias: &str, tag: &str) -> Result<()> {
        let index = *self
            .by_tag
            .get(&tag.to_lowercase())
            .ok_or_else(|| LexError::UnknownGrammar(tag.to_string()))?;
        let key = alias.to_lowercase();
        if self.by_tag.contains_key(&key) {
            return Err(LexError::DuplicateTag(key));
        }
        debug!(alias = %key, tag, "alias registered");
        self.by_tag.insert(key, index);
        Ok(())
    }

    /// Finds a grammar by tag or alias, ignoring ASCII and Unicode case.
    pub fn find(&self, tag: &str) -> Result<&Grammar> {
        self.by_tag
            .get(&tag.to_lowercase())
            .map(|&index| &self.grammars[index])
            .ok_or_else(|| LexError::UnknownGrammar(tag.to_string()))
    }

    /// Finds the first grammar whose file name globs match `path`.
    pub fn find_by_filename(&self, path: &str) -> Option<&Grammar> {
        self.grammars.iter().find(|g| g.matches_filename(path))
    }

    /// Finds the first grammar that declares `mimetype`.
    pub fn find_by_mimetype(&self, mimetype: &str) -> Option<&Grammar> {
        self.grammars
            .iter()
            .find(|g| g.mimetypes().iter().any(|m| m.eq_ignore_ascii_case(mimetype)))
    }

    /// Registered grammars in registration order.
    pub fn grammars(&self) -> impl Iterator<Item = &Grammar> {
        self.grammars.iter()
    }

    /// Lexer options applied by [`Registry::lexer`] and [`Registry::lex`].
    pub fn lexer_config(&self) -> LexerConfig {
        self.config
    }

    /// Creates a configured lexer for the grammar registered as `tag`.
    pub fn lexer<'a>(&'a self, source: &'a str, tag: &str) -> Result<Lexer<'a>> {
        Ok(self.find(tag)?.lexer(source).with_config(self.config))
    }

    /// Lexes `source` with the grammar registered as `tag`.
    ///
    /// # Example
    ///
    /// ```
    /// use sapl_lex::registry::Registry;
    /// use sapl_lex::Category;
    ///
    /// let registry = Registry::builtin().unwrap();
    /// let tokens = registry.lex("permit", "sapl").unwrap();
    /// assert_eq!(tokens[0].category, Category::Keyword);
    ///
    /// assert!(registry.lex("permit", "xacml").is_err());
    /// ```
    pub fn lex<'a>(&'a self, source: &'a str, tag: &str) -> Result<Vec<Token<'a>>> {
        Ok(self.lexer(source, tag)?.tokenize())
    }
}
