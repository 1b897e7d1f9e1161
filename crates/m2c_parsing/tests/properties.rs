use m2c_capabilities::{Capabilities, Dialect};
use m2c_parsing::{parse_text, DiagnosticOptions, Lexer};
use m2c_source::SourceBuffer;
use m2c_tokens::Token;
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

const FRAGMENTS: &[&str] = &[
    "MODULE", "DEFINITION", "IMPLEMENTATION", "BEGIN", "END", "IF", "THEN", "ELSIF", "ELSE",
    "CASE", "OF", "WHILE", "DO", "REPEAT", "UNTIL", "LOOP", "EXIT", "FOR", "TO", "BY", "WITH",
    "RETURN", "CONST", "TYPE", "VAR", "PROCEDURE", "RECORD", "ARRAY", "SET", "POINTER",
    "IMPORT", "FROM", "EXPORT", "QUALIFIED", "ARGLIST", "NOT", "AND", "OR", "DIV", "MOD", "IN",
    "x", "M", "Foo_bar", "42", "0FFH", "0x1F", "177B", "3.14", "1.0E", "\"str\"", "'c", ":=",
    ":", ";", ";;", ",", ".", "..", "|", "^", "(", ")", "[", "]", "{", "}", "+", "++", "-",
    "--", "*", "/", "\\", "=", "#", "<>", "<", "<=", ">", ">=", "&", "~", "!", "(*", "*)",
    "<*", "*>", "(*$", "?<", ">?", "\n", " ", "\t", "\u{1}", "@",
];

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(select(FRAGMENTS), 1..80).prop_map(|parts| parts.join(" "))
}

fn dialect() -> impl Strategy<Value = Dialect> {
    select(Dialect::iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn parsing_terminates_on_any_input(text in source(), dialect in dialect()) {
        let capabilities = Capabilities::new(dialect);
        let outcome = parse_text("fuzz.mod", &text, &capabilities, DiagnosticOptions::default()).unwrap();
        prop_assert!(outcome.root.is_empty() || outcome.ast.kind(outcome.root).is_some());
    }

    #[test]
    fn parsing_terminates_on_arbitrary_text(text in "\\PC{1,200}") {
        let capabilities = Capabilities::default();
        let outcome = parse_text("fuzz.mod", &text, &capabilities, DiagnosticOptions::default()).unwrap();
        prop_assert!(outcome.ast.kind(outcome.root).is_some());
    }

    #[test]
    fn parsing_is_deterministic(text in source(), dialect in dialect()) {
        let capabilities = Capabilities::new(dialect);
        let first = parse_text("a.mod", &text, &capabilities, DiagnosticOptions::default()).unwrap();
        let second = parse_text("a.mod", &text, &capabilities, DiagnosticOptions::default()).unwrap();
        prop_assert_eq!(
            first.ast.display(first.root).to_string(),
            second.ast.display(second.root).to_string()
        );
        prop_assert_eq!(
            first.diagnostics.iter().collect::<Vec<_>>(),
            second.diagnostics.iter().collect::<Vec<_>>()
        );
        prop_assert_eq!(first.pragmas, second.pragmas);
    }

    #[test]
    fn lexer_ends_with_one_end_of_file(text in source(), dialect in dialect()) {
        let capabilities = Capabilities::new(dialect);
        let buffer = SourceBuffer::from_text("lex.mod", &text).unwrap();
        let tokens = Lexer::new(buffer, &capabilities).map(|s| s.token).collect::<Vec<_>>();
        prop_assert_eq!(tokens.last(), Some(&Token::EndOfFile));
        prop_assert_eq!(tokens.iter().filter(|t| **t == Token::EndOfFile).count(), 1);
    }
}
