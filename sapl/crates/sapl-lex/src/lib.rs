//! sapl-lex - Lexical Analyzer for SAPL and SAPL-Test
//!
//! This crate tokenizes the Streaming Attribute Policy Language (SAPL) and
//! its companion test language SAPL-Test. It partitions source text into a
//! flat sequence of classified tokens suitable for syntax highlighting or
//! for feeding a parser; it never builds a syntax tree.
//!
//! # Overview
//!
//! Each language is a [`Grammar`]: named states holding ordered rules. A
//! rule is a regex anchored at the scan position, the [`Category`] it
//! yields and an optional transition that pushes or pops a state. The
//! [`Lexer`] runs that state machine:
//!
//! - the first rule that matches wins, not the longest one;
//! - text no rule matches becomes a one-character `Error` token and
//!   lexing continues;
//! - the root state is never popped.
//!
//! The concatenated lexemes always reproduce the input exactly.
//!
//! # Example Usage
//!
//! ```
//! use sapl_lex::Category;
//!
//! let tokens = sapl_lex::lex(r#"policy "test" permit"#, "sapl").unwrap();
//!
//! let categories: Vec<_> = tokens.iter().map(|t| t.category).collect();
//! assert_eq!(
//!     categories,
//!     [
//!         Category::Keyword,
//!         Category::Text,
//!         Category::String,
//!         Category::Text,
//!         Category::Keyword,
//!     ]
//! );
//! assert_eq!(tokens[2].lexeme, "\"test\"");
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Token categories and the token value
//! - [`cursor`] - Byte cursor with line/column tracking
//! - [`rule`] - Rule patterns and transitions
//! - [`state`] - Ordered rule lists
//! - [`grammar`] - Grammar construction and the SAPL/SAPL-Test definitions
//! - [`lexer`] - The state machine
//! - [`registry`] - Lookup by tag, alias, file name and mimetype
//! - [`trace`] - Per-token trace hook
//! - [`config`] - TOML configuration
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod registry;
pub mod rule;
pub mod state;
pub mod token;
pub mod trace;

#[cfg(test)]
mod edge_cases;

// Re-export main types for convenience
pub use config::{Config, LexerConfig};
pub use error::{LexError, Result};
pub use grammar::{Grammar, GrammarBuilder};
pub use lexer::Lexer;
pub use registry::Registry;
pub use token::{Category, Token};
pub use trace::TraceEvent;

static_assertions::assert_impl_all!(Grammar: Send, Sync);
static_assertions::assert_impl_all!(Registry: Send, Sync);

/// Lexes `source` with the built-in grammar registered as `tag`.
///
/// Tags are `sapl`, `sapl-test` and `sapltest`, matched case-insensitively.
///
/// # Errors
///
/// [`LexError::UnknownGrammar`] for any other tag.
pub fn lex<'a>(source: &'a str, tag: &str) -> Result<Vec<Token<'a>>> {
    registry::global().lex(source, tag)
}
