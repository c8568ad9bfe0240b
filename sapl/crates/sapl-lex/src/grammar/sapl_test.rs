//! SAPL-Test, the scenario language for testing SAPL policies.
//!
//! Everything lives in `root`; identifiers may contain hyphens, which is
//! why `<`, `>` and `-` are punctuation rather than operators here.

use crate::error::Result;
use crate::grammar::Grammar;
use crate::rule::RuleDef;
use crate::token::Category;

/// Primary tag.
pub const TAG: &str = "sapl-test";

/// Alternative tag.
pub const ALIAS: &str = "sapltest";

const ROOT: &[RuleDef] = &[
    RuleDef::new(r"(?-u:\s)+", Category::Text),
    RuleDef::new(r"//.*", Category::CommentSingle),
    RuleDef::push(r"/\*", Category::CommentMultiline, "multiline_comment"),
    RuleDef::push(r#"""#, Category::String, "string"),
    RuleDef::new(
        r"[+-]?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?",
        Category::Number,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:deny-overrides|permit-overrides|only-one-applicable|deny-unless-permit|permit-unless-deny)(?-u:\b)",
        Category::NameConstant,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:permit|deny|indeterminate|notApplicable)(?-u:\b)",
        Category::NameConstant,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:pip|static-pip|function-library|static-function-library)(?-u:\b)",
        Category::KeywordType,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:requirement|scenario|given|when|expect|then)(?-u:\b)",
        Category::KeywordDeclaration,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:attempts|emits|maps|called|wait|matching|equals|containing|with|is|of|to|on|in|where|any)(?-u:\b)",
        Category::Keyword,
    ),
    // Shadows the `null` literal below.
    RuleDef::new(
        r"(?-u:\b)(?:text|number|boolean|array|object|null|blank|empty|regex|length|stream|order|error)(?-u:\b)",
        Category::KeywordType,
    ),
    RuleDef::new(
        r"(?-u:\b)(?:policy|set|policies|pdp|function|attribute|decision|obligation|advice|virtual-time|environment)(?-u:\b)",
        Category::Keyword,
    ),
    RuleDef::new(r"(?-u:\b)(?:true|false|null|undefined)(?-u:\b)", Category::KeywordConstant),
    RuleDef::new(r"[a-zA-Z_$][a-zA-Z0-9_$-]*", Category::Name),
    RuleDef::new(r"[{}()\[\]:;,.<>-]", Category::Punctuation),
];

const STRING: &[RuleDef] = &[
    RuleDef::pop(r#"""#, Category::String),
    RuleDef::new(r#"\\["\\/bfnrt]"#, Category::StringEscape),
    RuleDef::new(r#"[^"\\]+"#, Category::String),
];

const MULTILINE_COMMENT: &[RuleDef] = &[
    RuleDef::pop(r"\*/", Category::CommentMultiline),
    RuleDef::new(r"[^*]+", Category::CommentMultiline),
    RuleDef::new(r"\*", Category::CommentMultiline),
];

/// Reserved words of the test language.
pub const KEYWORDS: &[&str] = &[
    "requirement", "scenario", "given", "when", "expect", "then", "attempts", "emits", "maps",
    "called", "wait", "matching", "equals", "containing", "with", "is", "of", "to", "on", "in",
    "where", "any", "policy", "set", "policies", "pdp", "function", "attribute", "decision",
    "obligation", "advice", "virtual-time", "environment", "pip", "static-pip",
    "function-library", "static-function-library", "true", "false", "null", "undefined",
];

/// Builds the SAPL-Test grammar.
pub fn grammar() -> Result<Grammar> {
    Grammar::builder(TAG)
        .alias(ALIAS)
        .title("SAPL-Test")
        .description("Test language for SAPL policies")
        .filename("*.sapltest")
        .mimetype("text/x-sapl-test")
        .keywords(KEYWORDS)
        .state("root", ROOT)
        .state("string", STRING)
        .state("multiline_comment", MULTILINE_COMMENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Category::*;
    use once_cell::sync::Lazy;

    static GRAMMAR: Lazy<Grammar> = Lazy::new(|| grammar().unwrap());

    fn lex(source: &str) -> Vec<(Category, &str)> {
        GRAMMAR
            .tokenize(source)
            .into_iter()
            .map(|t| (t.category, t.lexeme))
            .collect()
    }

    #[test]
    fn test_metadata() {
        assert_eq!(GRAMMAR.tag(), "sapl-test");
        assert_eq!(GRAMMAR.aliases(), ["sapltest"]);
        assert_eq!(GRAMMAR.title(), "SAPL-Test");
        assert_eq!(GRAMMAR.mimetypes(), ["text/x-sapl-test"]);
        assert!(GRAMMAR.matches_filename("tests/access.sapltest"));
        assert!(!GRAMMAR.matches_filename("access.sapl"));
        assert_eq!(GRAMMAR.states().count(), 3);
    }

    #[test]
    fn test_scenario_with_pdp() {
        assert_eq!(
            lex(r#"scenario "s" given - pdp { policies "p" }"#),
            vec![
                (KeywordDeclaration, "scenario"),
                (Text, " "),
                (String, "\"s\""),
                (Text, " "),
                (KeywordDeclaration, "given"),
                (Text, " "),
                (Punctuation, "-"),
                (Text, " "),
                (Keyword, "pdp"),
                (Text, " "),
                (Punctuation, "{"),
                (Text, " "),
                (Keyword, "policies"),
                (Text, " "),
                (String, "\"p\""),
                (Text, " "),
                (Punctuation, "}"),
            ]
        );
    }

    #[test]
    fn test_decisions_and_providers() {
        let tokens = lex("expect permit - static-pip \"time\" - function-library");
        assert_eq!(tokens[0], (KeywordDeclaration, "expect"));
        assert!(tokens.contains(&(NameConstant, "permit")));
        assert!(tokens.contains(&(KeywordType, "static-pip")));
        assert!(tokens.contains(&(KeywordType, "function-library")));
    }

    #[test]
    fn test_hyphenated_identifier() {
        assert_eq!(lex("my-mock-pip"), vec![(Name, "my-mock-pip")]);
        assert_eq!(lex("virtual-time"), vec![(Keyword, "virtual-time")]);
    }

    #[test]
    fn test_signed_numbers() {
        assert_eq!(
            lex("+5 -2.5"),
            vec![(Number, "+5"), (Text, " "), (Number, "-2.5")]
        );
    }

    #[test]
    fn test_null_is_a_value_kind() {
        assert_eq!(lex("null"), vec![(KeywordType, "null")]);
        assert_eq!(lex("undefined"), vec![(KeywordConstant, "undefined")]);
    }

    #[test]
    fn test_angle_brackets_are_punctuation() {
        let tokens = lex("<pip.attr>");
        assert_eq!(tokens[0], (Punctuation, "<"));
        assert_eq!(tokens.last(), Some(&(Punctuation, ">")));
    }

    #[test]
    fn test_string_has_no_unicode_escape() {
        assert_eq!(
            lex(r#""\u0041""#),
            vec![(String, "\""), (Error, "\\"), (String, "u0041\"")]
        );
    }

    #[test]
    fn test_only_ascii_whitespace_separates() {
        assert_eq!(
            lex("given\u{2003}when"),
            vec![
                (KeywordDeclaration, "given"),
                (Error, "\u{2003}"),
                (KeywordDeclaration, "when"),
            ]
        );
    }
}
