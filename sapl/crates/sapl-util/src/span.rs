//! Span module - Source location tracking.
//!
//! A [`Span`] records where a lexeme sits in the source text: its byte
//! range plus the 1-based line and column of its first character.
//!
//! # Examples
//!
//! ```
//! use sapl_util::span::Span;
//!
//! let span = Span::new(7, 13, 1, 8);
//! assert_eq!(span.len(), 6);
//! assert_eq!(span.range(), 7..13);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Source location span
///
/// A `Span` represents a range in source code, identified by:
/// - Byte offsets (start, end), end exclusive
/// - Line and column numbers of `start` (for human-readable output)
///
/// Columns count characters, not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset in source
    pub start: usize,
    /// End byte offset in source (exclusive)
    pub end: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Span {
    /// Dummy span for testing
    ///
    /// # Examples
    ///
    /// ```
    /// use sapl_util::span::Span;
    ///
    /// assert_eq!(Span::DUMMY.start, 0);
    /// assert_eq!(Span::DUMMY.end, 0);
    /// ```
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    /// Create a new span
    ///
    /// # Arguments
    ///
    /// * `start` - Start byte offset
    /// * `end` - End byte offset (exclusive)
    /// * `line` - Line number of `start` (1-based)
    /// * `column` - Column number of `start` (1-based)
    #[inline]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns true if this span is empty (start == end)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the span in bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use sapl_util::span::Span;
    ///
    /// let span = Span::new(10, 20, 1, 5);
    /// assert_eq!(span.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns the byte range covered by this span.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Join two adjacent spans into a single span
    ///
    /// The joined span keeps the line/column of `self`. Returns `None` if
    /// the spans are not adjacent (`self.end != other.start`).
    ///
    /// # Examples
    ///
    /// ```
    /// use sapl_util::span::Span;
    ///
    /// let first = Span::new(10, 20, 1, 5);
    /// let second = Span::new(20, 30, 1, 15);
    /// let joined = first.join(second).unwrap();
    /// assert_eq!(joined.range(), 10..30);
    /// assert_eq!(joined.column, 5);
    /// ```
    #[inline]
    pub fn join(self, other: Span) -> Option<Span> {
        if self.end == other.start {
            Some(Span {
                start: self.start,
                end: other.end,
                line: self.line,
                column: self.column,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(10, 20, 1, 5);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.line, 1);
        assert_eq!(span.column, 5);
    }

    #[test]
    fn test_span_is_empty() {
        assert!(Span::new(10, 10, 1, 5).is_empty());
        assert!(!Span::new(10, 20, 1, 5).is_empty());
    }

    #[test]
    fn test_span_join() {
        let joined = Span::new(10, 20, 2, 5).join(Span::new(20, 30, 3, 1)).unwrap();
        assert_eq!(joined, Span::new(10, 30, 2, 5));

        // Non-adjacent spans
        assert!(Span::new(10, 20, 1, 5).join(Span::new(25, 35, 1, 10)).is_none());
    }

    #[test]
    fn test_span_default() {
        assert_eq!(Span::default(), Span::DUMMY);
    }
}
