//! Core lexer implementation.
//!
//! This module contains the `Lexer` struct, which runs a grammar's state
//! machine over one source text.

use sapl_util::diagnostic::{
    SourceSnippet, E_LEX_UNMATCHED_CHAR, W_LEX_POP_PAST_ROOT, W_LEX_UNCLOSED_STATE,
};
use sapl_util::{Handler, Span};
use tracing::{debug, trace};

use crate::config::LexerConfig;
use crate::cursor::Cursor;
use crate::grammar::Grammar;
use crate::lexer::StateStack;
use crate::rule::Action;
use crate::state::RuleMatch;
use crate::token::{Category, Token};
use crate::trace::{TraceEvent, TraceHook};

/// State-machine lexer over a single source text.
///
/// The lexer owns its cursor and state stack; the grammar is only read, so
/// any number of lexers can share one grammar.
///
/// Iterating yields the raw token stream, one token per rule match.
/// [`Lexer::tokenize`] collects it and, by default, merges adjacent tokens
/// of the same category.
///
/// # Example
///
/// ```
/// use sapl_lex::{grammar, Category, Lexer};
/// use sapl_util::Handler;
///
/// let sapl = grammar::sapl::grammar().unwrap();
/// let handler = Handler::new();
/// let tokens = Lexer::new(&sapl, "permit \u{1}")
///     .with_handler(&handler)
///     .tokenize();
///
/// assert_eq!(tokens[0].category, Category::Keyword);
/// assert_eq!(tokens[2].category, Category::Error);
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct Lexer<'a> {
    grammar: &'a Grammar,

    /// Scan position in the source.
    cursor: Cursor<'a>,

    /// Active states; the root stays at the bottom.
    stack: StateStack,

    /// Receives recoverable problems, if attached.
    handler: Option<&'a Handler>,

    config: LexerConfig,

    trace_hook: Option<TraceHook<'a>>,

    /// Set after a zero-width transition. While set, only consuming rules
    /// may fire.
    progress_required: bool,

    /// Whether end of input has been reached and reported.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for `source` starting in the grammar's root state.
    pub fn new(grammar: &'a Grammar, source: &'a str) -> Self {
        Self {
            grammar,
            cursor: Cursor::new(source),
            stack: StateStack::new(grammar.root()),
            handler: None,
            config: LexerConfig::default(),
            trace_hook: None,
            progress_required: false,
            finished: false,
        }
    }

    /// Reports diagnostics to `handler`.
    pub fn with_handler(mut self, handler: &'a Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Replaces the lexer configuration.
    pub fn with_config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a callback invoked for every raw token.
    pub fn with_trace(mut self, hook: impl FnMut(&TraceEvent<'_>) + 'a) -> Self {
        self.trace_hook = Some(Box::new(hook));
        self
    }

    /// The grammar being run.
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Name of the active state.
    pub fn current_state(&self) -> &'a str {
        self.grammar.state(self.stack.top()).name()
    }

    /// Current stack depth, root included.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Byte offset of the next character to be lexed.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the next raw token, or `None` at end of input.
    ///
    /// Never fails: text no rule matches becomes a one-character `Error`
    /// token.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        loop {
            if self.cursor.is_at_end() {
                self.finish();
                return None;
            }

            let state = self.grammar.state(self.stack.top());
            let found = state.find_match(
                self.cursor.source(),
                self.cursor.position(),
                !self.progress_required,
            );

            match found {
                Some(RuleMatch { action, len: 0, .. }) => {
                    self.apply(action);
                    self.progress_required = true;
                },
                Some(RuleMatch {
                    category,
                    action,
                    len,
                }) => {
                    self.progress_required = false;
                    let token = self.emit(category, len);
                    self.apply(action);
                    return Some(token);
                },
                None => {
                    self.progress_required = false;
                    return Some(self.recover());
                },
            }
        }
    }

    /// Lexes the whole input.
    ///
    /// Adjacent tokens of the same category are merged unless
    /// `merge_adjacent` is off in the configuration. `Error` tokens are never
    /// merged.
    pub fn tokenize(self) -> Vec<Token<'a>> {
        let source = self.cursor.source();
        let merge = self.config.merge_adjacent;
        let raw: Vec<Token<'a>> = self.collect();
        if merge {
            merge_adjacent(source, raw)
        } else {
            raw
        }
    }

    /// Consumes `len` bytes as a token of `category`.
    fn emit(&mut self, category: Category, len: usize) -> Token<'a> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance_bytes(len);

        let token = Token::new(
            category,
            self.cursor.slice_from(start),
            Span::new(start, self.cursor.position(), line, column),
        );
        self.observe(&token);
        token
    }

    /// Turns one unmatched character into an `Error` token.
    fn recover(&mut self) -> Token<'a> {
        let state = self.current_state();
        let ch = self.cursor.current_char();
        let line_text = self.cursor.current_line();
        let column = self.cursor.column() as usize;

        debug!(
            offset = self.cursor.position(),
            state,
            character = ?ch,
            "no rule matches"
        );

        if let Some(handler) = self.handler {
            let span = Span::new(
                self.cursor.position(),
                self.cursor.position() + ch.len_utf8(),
                self.cursor.line(),
                self.cursor.column(),
            );
            handler
                .build_error(span, format!("no rule matches {:?}", ch))
                .code(E_LEX_UNMATCHED_CHAR)
                .note(format!("active state: {}", state))
                .snippet(SourceSnippet::new(
                    line_text,
                    self.cursor.line() as usize,
                    column,
                    column + 1,
                    Some("unrecognized character"),
                ))
                .emit(handler);
        }

        self.emit(Category::Error, ch.len_utf8())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Stay => {},
            Action::Push(state) => self.stack.push(state),
            Action::Pop => {
                if !self.stack.pop() {
                    debug!(offset = self.cursor.position(), "pop at root ignored");
                    if let Some(handler) = self.handler {
                        handler
                            .build_warning(self.point_span(), "rule popped the root state")
                            .code(W_LEX_POP_PAST_ROOT)
                            .snippet(self.point_snippet("root state kept"))
                            .emit(handler);
                    }
                }
            },
        }
    }

    /// Reports input that ended inside a nested state. Runs once.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if self.stack.is_root() {
            return;
        }
        let state = self.current_state();
        debug!(state, depth = self.stack.depth(), "input ended in nested state");
        if let Some(handler) = self.handler {
            handler
                .build_warning(
                    self.point_span(),
                    format!("input ended inside `{}`", state),
                )
                .code(W_LEX_UNCLOSED_STATE)
                .snippet(self.point_snippet("input ends here"))
                .emit(handler);
        }
    }

    fn observe(&mut self, token: &Token<'a>) {
        if self.config.trace {
            trace!(
                category = %token.category,
                lexeme = token.lexeme,
                offset = token.span.start,
                state = self.current_state(),
                depth = self.stack.depth(),
                "token"
            );
        }
        if let Some(hook) = self.trace_hook.as_mut() {
            hook(&TraceEvent {
                category: token.category,
                lexeme: token.lexeme,
                offset: token.span.start,
                state: self.grammar.state(self.stack.top()).name(),
                depth: self.stack.depth(),
            });
        }
    }

    fn point_span(&self) -> Span {
        let at = self.cursor.position();
        Span::new(at, at, self.cursor.line(), self.cursor.column())
    }

    fn point_snippet(&self, label: &str) -> SourceSnippet {
        SourceSnippet::point(
            self.cursor.current_line(),
            self.cursor.line() as usize,
            self.cursor.column() as usize,
        )
        .with_label(label)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Merges adjacent tokens of the same category.
///
/// Tokens must be contiguous slices of `source`, as a lexer produces them.
/// `Error` tokens stay separate.
///
/// # Example
///
/// ```
/// use sapl_lex::lexer::merge_adjacent;
/// use sapl_lex::{grammar, Category};
///
/// let sapl = grammar::sapl::grammar().unwrap();
/// let source = "\"a\"";
/// let raw: Vec<_> = sapl.lexer(source).collect();
/// assert_eq!(raw.len(), 3);
///
/// let merged = merge_adjacent(source, raw);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].category, Category::String);
/// assert_eq!(merged[0].lexeme, "\"a\"");
/// ```
pub fn merge_adjacent<'a>(source: &'a str, tokens: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut merged: Vec<Token<'a>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(last) = merged.last_mut() {
            if last.category == token.category && !token.is_error() {
                if let Some(span) = last.span.join(token.span) {
                    last.span = span;
                    last.lexeme = &source[span.range()];
                    continue;
                }
            }
        }
        merged.push(token);
    }
    merged
}
