//! Byte cursor for traversing source text.
//!
//! This module provides the `Cursor` struct which maintains the scan
//! position while the state machine walks the source. Rules report how many
//! bytes they consumed; the cursor moves by that amount and keeps the
//! line/column information that ends up in token spans and diagnostics.

/// A cursor over the source text.
///
/// The position is a byte offset that always sits on a UTF-8 character
/// boundary. Columns count characters, not bytes.
///
/// # Example
///
/// ```
/// use sapl_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("policy \"p\"");
///
/// assert_eq!(cursor.current_char(), 'p');
/// cursor.advance_bytes(6);
/// assert_eq!(cursor.current_char(), ' ');
/// assert_eq!(cursor.column(), 7);
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character at the cursor position.
    ///
    /// Returns '\0' (null character) if at the end of the source.
    ///
    /// # Example
    ///
    /// ```
    /// use sapl_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("αβ");
    /// assert_eq!(cursor.current_char(), 'α');
    /// ```
    #[inline]
    pub fn current_char(&self) -> char {
        if self.position >= self.source.len() {
            return '\0';
        }

        // Fast path for ASCII (most common case)
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            return b as char;
        }

        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// Advances by the given byte count, clamped to the end of the source.
    ///
    /// `count` must land on a character boundary; rule matches always do.
    /// Line tracking counts `\n`; the column counts characters.
    ///
    /// # Example
    ///
    /// ```
    /// use sapl_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("/* ä\n */x");
    /// cursor.advance_bytes(9);
    /// assert_eq!(cursor.line(), 2);
    /// assert_eq!(cursor.column(), 4);
    /// assert_eq!(cursor.current_char(), 'x');
    /// ```
    pub fn advance_bytes(&mut self, count: usize) {
        let end = (self.position + count).min(self.source.len());
        let consumed = &self.source[self.position..end];

        match consumed.rfind('\n') {
            Some(newline) => {
                self.line += consumed.matches('\n').count() as u32;
                self.column = consumed[newline + 1..].chars().count() as u32 + 1;
            },
            None => {
                self.column += consumed.chars().count() as u32;
            },
        }

        self.position = end;
    }

    /// Returns true if the cursor is at the end of the source.
    ///
    /// # Example
    ///
    /// ```
    /// use sapl_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("é");
    /// assert!(!cursor.is_at_end());
    /// cursor.advance_bytes('é'.len_utf8());
    /// assert!(cursor.is_at_end());
    /// ```
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns a slice of the source from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Returns the full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the full text of the line the cursor is on, without its
    /// line terminator.
    ///
    /// # Example
    ///
    /// ```
    /// use sapl_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("policy \"p\"\npermit #\n");
    /// cursor.advance_bytes(18);
    /// assert_eq!(cursor.current_line(), "permit #");
    /// ```
    pub fn current_line(&self) -> &'a str {
        let start = self.source[..self.position]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let end = self.source[self.position..]
            .find('\n')
            .map_or(self.source.len(), |i| self.position + i);
        self.source[start..end].trim_end_matches('\r')
    }
}
