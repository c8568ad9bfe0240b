//! Diagnostic codes for categorizing lexer errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, so renderers and tests can match on a stable code
//! rather than on message text.
//!
//! # Examples
//!
//! ```
//! use sapl_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEX_UNMATCHED_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 1001);
//! assert_eq!(code.as_str(), "E1001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Examples
    ///
    /// ```
    /// use sapl_util::diagnostic::DiagnosticCode;
    ///
    /// let code = DiagnosticCode::new("E", 42);
    /// assert_eq!(code.as_str(), "E0042");
    /// ```
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix (e.g., "E" for error, "W" for warning)
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E1001", "W1002")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXER ERROR CODES (E1001-E1999)
    // =========================================================================

    /// E1001: No rule of the active state matches at the cursor
    pub const E_LEX_UNMATCHED_CHAR: Self = Self::new("E", 1001);

    // =========================================================================
    // LEXER WARNING CODES (W1001-W1999)
    // =========================================================================

    /// W1001: A rule tried to pop the root state
    pub const W_LEX_POP_PAST_ROOT: Self = Self::new("W", 1001);
    /// W1002: Input ended while a nested state (string, comment, ...) was open
    pub const W_LEX_UNCLOSED_STATE: Self = Self::new("W", 1002);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Standalone constant exports for convenience
pub const E_LEX_UNMATCHED_CHAR: DiagnosticCode = DiagnosticCode::E_LEX_UNMATCHED_CHAR;
pub const W_LEX_POP_PAST_ROOT: DiagnosticCode = DiagnosticCode::W_LEX_POP_PAST_ROOT;
pub const W_LEX_UNCLOSED_STATE: DiagnosticCode = DiagnosticCode::W_LEX_UNCLOSED_STATE;
