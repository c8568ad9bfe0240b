//! Token categories and the token value produced by the lexer.
//!
//! Categories form a shallow hierarchy (`Keyword.Constant` is a kind of
//! `Keyword`). Renderers address them either by dotted qualified name or
//! by the conventional short class name.

use std::fmt;

use sapl_util::Span;
use serde::{Serialize, Serializer};

/// Lexical class of a token.
///
/// # Example
///
/// ```
/// use sapl_lex::Category;
///
/// assert_eq!(Category::KeywordConstant.qualname(), "Keyword.Constant");
/// assert_eq!(Category::KeywordConstant.short_name(), "kc");
/// assert!(Category::KeywordConstant.is_within(Category::Keyword));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Whitespace and other uninteresting text.
    Text,
    /// Generic comment.
    Comment,
    /// `// ...` line comment.
    CommentSingle,
    /// `/* ... */` block comment.
    CommentMultiline,
    /// String literal text, including its quotes.
    String,
    /// Escape sequence inside a string.
    StringEscape,
    /// Numeric literal.
    Number,
    /// Reserved word.
    Keyword,
    /// Literal keyword (`true`, `null`, ...).
    KeywordConstant,
    /// Type-like keyword.
    KeywordType,
    /// Structural keyword that opens a declaration.
    KeywordDeclaration,
    /// Symbolic operator.
    Operator,
    /// Word operator (`in`).
    OperatorWord,
    /// Identifier.
    Name,
    /// Built-in identifier (`subject`, `action`, ...).
    NameBuiltin,
    /// Identifier in call position.
    NameFunction,
    /// Named constant (combining algorithms, decisions).
    NameConstant,
    /// Variable marker (`@`).
    NameVariable,
    /// Attribute name inside an attribute finder.
    NameDecorator,
    /// Brackets, separators and other punctuation.
    Punctuation,
    /// Text no rule could classify.
    Error,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 21] = [
        Category::Text,
        Category::Comment,
        Category::CommentSingle,
        Category::CommentMultiline,
        Category::String,
        Category::StringEscape,
        Category::Number,
        Category::Keyword,
        Category::KeywordConstant,
        Category::KeywordType,
        Category::KeywordDeclaration,
        Category::Operator,
        Category::OperatorWord,
        Category::Name,
        Category::NameBuiltin,
        Category::NameFunction,
        Category::NameConstant,
        Category::NameVariable,
        Category::NameDecorator,
        Category::Punctuation,
        Category::Error,
    ];

    /// Dotted qualified name, e.g. `Name.Builtin`.
    pub const fn qualname(self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Comment => "Comment",
            Category::CommentSingle => "Comment.Single",
            Category::CommentMultiline => "Comment.Multiline",
            Category::String => "Literal.String",
            Category::StringEscape => "Literal.String.Escape",
            Category::Number => "Literal.Number",
            Category::Keyword => "Keyword",
            Category::KeywordConstant => "Keyword.Constant",
            Category::KeywordType => "Keyword.Type",
            Category::KeywordDeclaration => "Keyword.Declaration",
            Category::Operator => "Operator",
            Category::OperatorWord => "Operator.Word",
            Category::Name => "Name",
            Category::NameBuiltin => "Name.Builtin",
            Category::NameFunction => "Name.Function",
            Category::NameConstant => "Name.Constant",
            Category::NameVariable => "Name.Variable",
            Category::NameDecorator => "Name.Decorator",
            Category::Punctuation => "Punctuation",
            Category::Error => "Error",
        }
    }

    /// Conventional short class name used by highlighters. Empty for `Text`.
    pub const fn short_name(self) -> &'static str {
        match self {
            Category::Text => "",
            Category::Comment => "c",
            Category::CommentSingle => "c1",
            Category::CommentMultiline => "cm",
            Category::String => "s2",
            Category::StringEscape => "se",
            Category::Number => "m",
            Category::Keyword => "k",
            Category::KeywordConstant => "kc",
            Category::KeywordType => "kt",
            Category::KeywordDeclaration => "kd",
            Category::Operator => "o",
            Category::OperatorWord => "ow",
            Category::Name => "n",
            Category::NameBuiltin => "nb",
            Category::NameFunction => "nf",
            Category::NameConstant => "no",
            Category::NameVariable => "nv",
            Category::NameDecorator => "nd",
            Category::Punctuation => "p",
            Category::Error => "err",
        }
    }

    /// Immediate parent in the category hierarchy.
    pub const fn parent(self) -> Option<Category> {
        match self {
            Category::CommentSingle | Category::CommentMultiline => Some(Category::Comment),
            Category::StringEscape => Some(Category::String),
            Category::KeywordConstant | Category::KeywordType | Category::KeywordDeclaration => {
                Some(Category::Keyword)
            },
            Category::OperatorWord => Some(Category::Operator),
            Category::NameBuiltin
            | Category::NameFunction
            | Category::NameConstant
            | Category::NameVariable
            | Category::NameDecorator => Some(Category::Name),
            _ => None,
        }
    }

    /// Returns true if `self` is `other` or one of its descendants.
    pub fn is_within(self, other: Category) -> bool {
        let mut current = Some(self);
        while let Some(category) = current {
            if category == other {
                return true;
            }
            current = category.parent();
        }
        false
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualname())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualname())
    }
}

/// A classified slice of the source text.
///
/// The lexeme borrows from the source; `span.start` is its byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// Lexical class.
    pub category: Category,
    /// The exact source text covered by the token.
    pub lexeme: &'a str,
    /// Location of the lexeme in the source.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Creates a token.
    pub fn new(category: Category, lexeme: &'a str, span: Span) -> Self {
        Self {
            category,
            lexeme,
            span,
        }
    }

    /// Byte offset of the first character.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Returns true for tokens produced by error recovery.
    pub fn is_error(&self) -> bool {
        self.category == Category::Error
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.category, self.lexeme, self.span.start)
    }
}
