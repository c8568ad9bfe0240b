//! SAPL, the Streaming Attribute Policy Language.
//!
//! Besides the usual literals and operators, SAPL has attribute finders
//! (`<pip.attribute(args)>` and the head form `|<...>`), lexed in their own
//! `attribute_finder` and `attribute_args` states. Whitespace and word
//! boundaries are ASCII-only.

use crate::error::Result;
use crate::grammar::Grammar;
use crate::rule::RuleDef;
use crate::token::Category;

/// Primary tag.
pub const TAG: &str = "sapl";

/// Reserved words of the policy language.
pub const KEYWORDS: &[&str] = &[
    "policy", "set", "permit", "deny", "where", "var", "import", "as", "schema", "enforced",
    "obligation", "advice", "transform", "for", "each", "true", "false", "null", "undefined",
];

const ROOT: &[RuleDef] = &[
    RuleDef::new(r"(?-u:\s)+", Category::Text),
    RuleDef::new(r"//.*", Category::CommentSingle),
    RuleDef::push(r"/\*", Category::CommentMultiline, "multiline_comment"),
    RuleDef::push(r#"""#, Category::String, "string"),
    RuleDef::new(
        r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?",
        Category::Number,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:deny-overrides|permit-overrides|first-applicable|only-one-applicable|deny-unless-permit|permit-unless-deny)(?-u:\b)",
        Category::NameConstant,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:policy|set|permit|deny|where|var|import|as|schema|enforced|obligation|advice|transform|for|each)(?-u:\b)",
        Category::Keyword,
    ),
    RuleDef::new(r"(?-u:\b)(?:true|false|null|undefined)(?-u:\b)", Category::KeywordConstant),
    RuleDef::new(r"(?-u:\b)(?:subject|action|resource|environment)(?-u:\b)", Category::NameBuiltin),
    // Every `<` opens a finder, so `<=` never reaches the operator rule.
    RuleDef::push(r"\|?<", Category::Operator, "attribute_finder"),
    RuleDef::new(r"\|\||&&|==|!=|=~|<=|>=", Category::Operator),
    RuleDef::new(r"(?-u:\b)in(?-u:\b)", Category::OperatorWord),
    RuleDef::new(r"[|^&<>+\-*/%!]", Category::Operator),
    RuleDef::new(r"\.\.", Category::Operator),
    RuleDef::new(r"\|-", Category::Operator),
    RuleDef::new(r"::", Category::Operator),
    RuleDef::new(r"@", Category::NameVariable),
    RuleDef::new(
        r"(?-u:\b)[a-zA-Z_$][a-zA-Z0-9_$]*(?:\.[a-zA-Z_$][a-zA-Z0-9_$]*)+",
        Category::NameFunction,
    )
    .followed_by(r"\("),
    RuleDef::new(r"(?-u:\b)[a-zA-Z_$][a-zA-Z0-9_$]*", Category::NameFunction).followed_by(r"\("),
    RuleDef::new(r"\^?[a-zA-Z_$][a-zA-Z0-9_$]*", Category::Name),
    RuleDef::new(r"[{}()\[\]:;,.]", Category::Punctuation),
];

const STRING: &[RuleDef] = &[
    RuleDef::pop(r#"""#, Category::String),
    RuleDef::new(r#"\\["\\/bfnrt]"#, Category::StringEscape),
    RuleDef::new(r"\\u[0-9a-fA-F]{4}", Category::StringEscape),
    RuleDef::new(r#"[^"\\]+"#, Category::String),
];

const MULTILINE_COMMENT: &[RuleDef] = &[
    RuleDef::pop(r"\*/", Category::CommentMultiline),
    RuleDef::new(r"[^*]+", Category::CommentMultiline),
    RuleDef::new(r"\*", Category::CommentMultiline),
];

const ATTRIBUTE_FINDER: &[RuleDef] = &[
    RuleDef::pop(r">", Category::Operator),
    RuleDef::new(r"(?-u:\b)[a-zA-Z_$][a-zA-Z0-9_$.]*", Category::NameDecorator),
    RuleDef::push(r"\(", Category::Punctuation, "attribute_args"),
    RuleDef::new(r"(?-u:\s)+", Category::Text),
];

const ATTRIBUTE_ARGS: &[RuleDef] = &[
    RuleDef::pop(r"\)", Category::Punctuation),
    RuleDef::new(r",", Category::Punctuation),
    RuleDef::push(r#"""#, Category::String, "string"),
    RuleDef::new(
        r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?",
        Category::Number,
    ),
    RuleDef::new(r"(?-u:\b)(?:true|false|null)(?-u:\b)", Category::KeywordConstant),
    RuleDef::new(r"[a-zA-Z_$][a-zA-Z0-9_$]*", Category::Name),
    RuleDef::new(r"(?-u:\s)+", Category::Text),
];

/// Builds the SAPL grammar.
pub fn grammar() -> Result<Grammar> {
    Grammar::builder(TAG)
        .title("SAPL")
        .description("Streaming Attribute Policy Language")
        .filename("*.sapl")
        .mimetype("text/x-sapl")
        .keywords(KEYWORDS)
        .state("root", ROOT)
        .state("string", STRING)
        .state("multiline_comment", MULTILINE_COMMENT)
        .state("attribute_finder", ATTRIBUTE_FINDER)
        .state("attribute_args", ATTRIBUTE_ARGS)
        .build()
}
