//! sapl-util - Shared foundation types for the SAPL tooling
//!
//! This crate holds the types that every other crate in the workspace
//! speaks: source locations ([`Span`]) and the diagnostic infrastructure
//! ([`Handler`], [`Diagnostic`], [`DiagnosticBuilder`]) used to report
//! recoverable problems without aborting.
//!
//! # Examples
//!
//! ```
//! use sapl_util::{DiagnosticBuilder, Handler, Span};
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::warning("input ended inside `comment`")
//!     .span(Span::new(0, 2, 1, 1))
//!     .emit(&handler);
//!
//! assert!(!handler.has_errors());
//! assert_eq!(handler.warning_count(), 1);
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet,
};
pub use span::Span;
