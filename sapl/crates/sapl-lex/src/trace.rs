//! Per-token trace hook.
//!
//! A [`Lexer`](crate::Lexer) can carry a callback that observes every raw
//! token together with the machine state that produced it. Useful for
//! debugging grammars without touching the token stream itself.

use crate::token::Category;

/// What the lexer did when it emitted a raw token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent<'a> {
    /// Category of the emitted token.
    pub category: Category,
    /// Lexeme of the emitted token.
    pub lexeme: &'a str,
    /// Byte offset of the lexeme.
    pub offset: usize,
    /// Name of the state the token was matched in.
    pub state: &'a str,
    /// Stack depth at the time of the match, root included.
    pub depth: usize,
}

/// Boxed trace callback.
pub type TraceHook<'a> = Box<dyn FnMut(&TraceEvent<'_>) + 'a>;
