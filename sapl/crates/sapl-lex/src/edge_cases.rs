//! Edge case tests for sapl-lex

#[cfg(test)]
mod tests {
    use crate::registry::global;
    use crate::{Category, LexerConfig, Token};
    use proptest::prelude::*;
    use rayon::prelude::*;
    use sapl_util::diagnostic::W_LEX_UNCLOSED_STATE;
    use sapl_util::Handler;

    const TAGS: [&str; 2] = ["sapl", "sapl-test"];

    fn raw<'a>(source: &'a str, tag: &str) -> Vec<Token<'a>> {
        global().find(tag).unwrap().lexer(source).collect()
    }

    fn merged<'a>(source: &'a str, tag: &str) -> Vec<Token<'a>> {
        global().find(tag).unwrap().tokenize(source)
    }

    fn pairs<'a>(tokens: &[Token<'a>]) -> Vec<(Category, &'a str)> {
        tokens.iter().map(|t| (t.category, t.lexeme)).collect()
    }

    /// Lexemes cover the input exactly, in order, with no gaps.
    fn assert_covers(source: &str, tokens: &[Token<'_>]) {
        let mut offset = 0;
        for token in tokens {
            assert!(!token.lexeme.is_empty(), "empty token {token}");
            assert_eq!(token.span.start, offset, "gap before {token}");
            assert_eq!(token.span.len(), token.lexeme.len());
            assert_eq!(&source[token.span.range()], token.lexeme);
            offset = token.span.end;
        }
        assert_eq!(offset, source.len());
        let text: String = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(text, source);
    }

    fn sapl_fragment() -> impl Strategy<Value = String> {
        let pieces = vec![
            "policy", "set", "permit", "deny", "where", " ", "\n", "\"", "\\", "\\u00e9",
            "<", ">", "|<", "(", ")", ",", "/*", "*/", "//", "-", "1.5e3", "a.b", "in",
            "first-applicable", "==", "<=", "@", "^", "=", "~", "é", "€",
        ];
        prop::collection::vec(prop::sample::select(pieces), 0..48).prop_map(|v| v.concat())
    }

    fn sapl_test_fragment() -> impl Strategy<Value = String> {
        let pieces = vec![
            "scenario", "given", "when", "expect", "static-pip", "permit", "null", " ", "\n",
            "\"", "\\n", "-", "+1", "{", "}", "/*", "*/", "//", "virtual-time", "#", "ü",
        ];
        prop::collection::vec(prop::sample::select(pieces), 0..48).prop_map(|v| v.concat())
    }

    // ==================== PROPERTIES ====================

    proptest! {
        #[test]
        fn prop_any_text_is_covered(source in ".{0,64}") {
            for tag in TAGS {
                assert_covers(&source, &raw(&source, tag));
                assert_covers(&source, &merged(&source, tag));
            }
        }

        #[test]
        fn prop_sapl_fragments_are_covered(source in sapl_fragment()) {
            assert_covers(&source, &raw(&source, "sapl"));
            assert_covers(&source, &merged(&source, "sapl"));
        }

        #[test]
        fn prop_sapl_test_fragments_are_covered(source in sapl_test_fragment()) {
            assert_covers(&source, &raw(&source, "sapl-test"));
            assert_covers(&source, &merged(&source, "sapl-test"));
        }

        #[test]
        fn prop_lexing_is_deterministic(source in sapl_fragment()) {
            prop_assert_eq!(merged(&source, "sapl"), merged(&source, "sapl"));
        }

        #[test]
        fn prop_merged_neighbours_differ(source in sapl_fragment()) {
            let tokens = merged(&source, "sapl");
            for pair in tokens.windows(2) {
                prop_assert!(
                    pair[0].category != pair[1].category || pair[0].is_error(),
                    "{} and {} were not merged", pair[0], pair[1]
                );
            }
        }

        #[test]
        fn prop_tokens_never_exceed_characters(source in ".{0,64}") {
            for tag in TAGS {
                prop_assert!(raw(&source, tag).len() <= source.chars().count());
            }
        }
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        for tag in TAGS {
            assert!(raw("", tag).is_empty());
            assert!(merged("", tag).is_empty());
        }
    }

    #[test]
    fn test_edge_whitespace_only() {
        assert_eq!(pairs(&merged(" \t\r\n ", "sapl")), vec![(Category::Text, " \t\r\n ")]);
    }

    #[test]
    fn test_edge_unbalanced_angle_brackets() {
        let source = "<<<>>>>";
        assert_eq!(
            pairs(&merged(source, "sapl")),
            vec![
                (Category::Operator, "<"),
                (Category::Error, "<"),
                (Category::Error, "<"),
                (Category::Operator, ">>>>"),
            ]
        );
    }

    #[test]
    fn test_edge_unclosed_nesting_warns_once() {
        let handler = Handler::new();
        let source = r#"<pip.attr("x"#;
        let mut lexer = global()
            .lexer(source, "sapl")
            .unwrap()
            .with_handler(&handler);

        while lexer.next_token().is_some() {}
        assert_eq!(lexer.current_state(), "string");
        assert_eq!(lexer.depth(), 4);
        // Polling past the end does not repeat the warning.
        assert!(lexer.next_token().is_none());

        let diagnostics = handler.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(W_LEX_UNCLOSED_STATE));
        assert_eq!(diagnostics[0].span.start, source.len());
    }

    #[test]
    fn test_edge_crlf_line_numbers() {
        let tokens = merged("permit\r\ndeny", "sapl");
        let deny = tokens.last().unwrap();
        assert_eq!(deny.lexeme, "deny");
        assert_eq!(deny.span.line, 2);
        assert_eq!(deny.span.column, 1);
    }

    #[test]
    fn test_edge_long_input() {
        let source = "policy \"p\" permit\n".repeat(5_000);
        let tokens = merged(&source, "sapl");
        assert_covers(&source, &tokens);
        assert_eq!(
            tokens.iter().filter(|t| t.category == Category::Keyword).count(),
            10_000
        );
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = merged(&name, "sapl");
        assert_eq!(pairs(&tokens), vec![(Category::Name, name.as_str())]);
    }

    #[test]
    fn test_edge_comment_at_end_of_input() {
        assert_eq!(
            pairs(&merged("permit // done", "sapl")).last(),
            Some(&(Category::CommentSingle, "// done"))
        );
        let tokens = merged("/* open", "sapl-test");
        assert_eq!(pairs(&tokens), vec![(Category::CommentMultiline, "/* open")]);
    }

    #[test]
    fn test_edge_error_tokens_are_whole_characters() {
        let source = "€€#";
        for tag in TAGS {
            let tokens = merged(source, tag);
            assert_eq!(
                pairs(&tokens),
                vec![
                    (Category::Error, "€"),
                    (Category::Error, "€"),
                    (Category::Error, "#"),
                ]
            );
        }
    }

    // ==================== INTEGRATION ====================

    #[test]
    fn test_shared_registry_across_threads() {
        let source = r#"policy "p" permit where <time.now> > 0;"#;
        let expected = merged(source, "sapl");

        let results: Vec<_> = (0..64)
            .into_par_iter()
            .map(|_| merged(source, "sapl"))
            .collect();

        assert!(results.iter().all(|tokens| *tokens == expected));
    }

    #[test]
    fn test_trace_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("sapl_lex=trace"))
            .with_test_writer()
            .finish();

        let tokens = tracing::subscriber::with_default(subscriber, || {
            let config = LexerConfig {
                trace: true,
                ..LexerConfig::default()
            };
            global()
                .find("sapl")
                .unwrap()
                .lexer("permit \u{1}")
                .with_config(config)
                .tokenize()
        });

        assert_eq!(
            pairs(&tokens),
            vec![
                (Category::Keyword, "permit"),
                (Category::Text, " "),
                (Category::Error, "\u{1}"),
            ]
        );
    }

    #[test]
    fn test_token_json_shape() {
        let tokens = merged("permit", "sapl");
        let value = serde_json::to_value(tokens[0]).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "category": "Keyword",
                "lexeme": "permit",
                "span": { "start": 0, "end": 6, "line": 1, "column": 1 }
            })
        );
    }

    #[test]
    fn test_nested_category_json() {
        let tokens = merged("<a.b>", "sapl");
        let value = serde_json::to_value(&tokens).unwrap();
        assert_eq!(value[1]["category"], "Name.Decorator");
    }
}
