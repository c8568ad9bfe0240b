//! Error types for grammar construction, registry lookup and configuration.
//!
//! Malformed policy text is never an error here: the state machine recovers
//! from it and reports through a [`sapl_util::Handler`]. A `LexError` means
//! the request itself could not be served.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LexError>;

/// Errors returned by grammar construction, the registry and configuration.
#[derive(Debug, Error)]
pub enum LexError {
    /// No grammar is registered under the requested tag or alias.
    #[error("Unknown grammar `{0}`")]
    UnknownGrammar(String),

    /// A root state or transition names a state the grammar does not define.
    #[error("Grammar `{grammar}`: state `{state}` refers to undefined state `{target}`")]
    UnknownState {
        /// Grammar being built.
        grammar: String,
        /// State holding the offending reference (or the grammar tag for the root).
        state: String,
        /// The missing state name.
        target: String,
    },

    /// The same state name was defined twice.
    #[error("Grammar `{grammar}`: state `{state}` is defined more than once")]
    DuplicateState {
        /// Grammar being built.
        grammar: String,
        /// Duplicated state name.
        state: String,
    },

    /// A rule pattern failed to compile.
    #[error("Invalid pattern `{pattern}` in state `{state}`: {source}")]
    InvalidPattern {
        /// State owning the rule.
        state: String,
        /// The pattern source text.
        pattern: String,
        /// Underlying regex build error.
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    /// A tag or alias is already taken in the registry.
    #[error("Tag or alias `{0}` is already registered")]
    DuplicateTag(String),

    /// The configuration could not be parsed or names something invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
