//! Converts a [`SourceBuffer`] into a stream of symbols

use crate::diagnostics::{DiagnosticKind, DiagnosticOptions, Diagnostics};
use m2c_capabilities::{Capabilities, Capability};
use m2c_source::{LimitViolation, Position, SourceBuffer, SourceError, EOT};
use m2c_tokens::{Symbol, Token};
use std::path::Path;
use tracing::{debug, trace};

mod comments;
mod literals;

/// The body of a pragma, captured instead of being handed to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    pub position: Position,
    pub body: String,
}

/// Reads symbols from a source buffer, keeping one symbol of lookahead.
///
/// Comments, pragmas and disabled code sections are skipped; faults are
/// reported to the lexer's [`Diagnostics`] and scanning carries on.
#[derive(Debug)]
pub struct Lexer<'c> {
    source: SourceBuffer,
    capabilities: &'c Capabilities,
    diagnostics: Diagnostics,
    pragmas: Vec<Pragma>,
    current: Symbol,
    lookahead: Symbol,
    done: bool,
}

impl<'c> Lexer<'c> {
    /// Opens the file at `path` and positions the lexer on its first symbol
    pub fn open(path: impl AsRef<Path>, capabilities: &'c Capabilities) -> Result<Self, SourceError> {
        Self::open_with_options(path, capabilities, DiagnosticOptions::default())
    }

    pub fn open_with_options(
        path: impl AsRef<Path>,
        capabilities: &'c Capabilities,
        options: DiagnosticOptions,
    ) -> Result<Self, SourceError> {
        let source = SourceBuffer::open(path)?;
        Ok(Self::with_options(source, capabilities, options))
    }

    /// Creates a lexer over an already loaded buffer
    pub fn new(source: SourceBuffer, capabilities: &'c Capabilities) -> Self {
        Self::with_options(source, capabilities, DiagnosticOptions::default())
    }

    pub fn with_options(
        source: SourceBuffer,
        capabilities: &'c Capabilities,
        options: DiagnosticOptions,
    ) -> Self {
        let mut lexer = Self {
            source,
            capabilities,
            diagnostics: Diagnostics::new(options),
            pragmas: vec![],
            current: Symbol::new(Token::Unknown, Position::start(), None),
            lookahead: Symbol::end_of_file(Position::start()),
            done: false,
        };
        lexer.lookahead = lexer.get_new_lookahead_sym();
        lexer
    }

    /// Consumes the lookahead symbol and returns its token
    pub fn read_sym(&mut self) -> Token {
        let next = if self.is_exhausted() {
            self.lookahead.clone()
        } else {
            self.get_new_lookahead_sym()
        };
        self.current = std::mem::replace(&mut self.lookahead, next);
        trace!("read {} at {}", self.current, self.current.position);
        self.current.token
    }

    /// Peeks at the token of the lookahead symbol
    pub fn next_sym(&self) -> Token {
        self.lookahead.token
    }

    /// Consumes the lookahead symbol and returns the token of the new lookahead
    pub fn consume_sym(&mut self) -> Token {
        self.read_sym();
        self.lookahead.token
    }

    /// Whether the lookahead is the end of the file
    pub fn is_exhausted(&self) -> bool {
        self.lookahead.token == Token::EndOfFile
    }

    /// The most recently consumed symbol
    pub fn current(&self) -> &Symbol {
        &self.current
    }

    pub fn lookahead(&self) -> &Symbol {
        &self.lookahead
    }

    pub fn current_lexeme(&self) -> Option<&str> {
        self.current.lexeme()
    }

    pub fn lookahead_lexeme(&self) -> Option<&str> {
        self.lookahead.lexeme()
    }

    pub fn current_position(&self) -> Position {
        self.current.position
    }

    pub fn lookahead_position(&self) -> Position {
        self.lookahead.position
    }

    pub fn capabilities(&self) -> &'c Capabilities {
        self.capabilities
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Pragmas seen so far
    pub fn pragmas(&self) -> &[Pragma] {
        &self.pragmas
    }

    /// The file being read
    pub fn source_name(&self) -> &Path {
        self.source.name()
    }

    /// Gives up the lexer, keeping what it collected
    pub fn finish(self) -> (Diagnostics, Vec<Pragma>) {
        (self.diagnostics, self.pragmas)
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities.is_enabled(capability)
    }

    fn error(&mut self, kind: DiagnosticKind, position: Position, lexeme: Option<String>) {
        self.diagnostics.report_error(kind, position, lexeme);
    }

    fn check_limits(&mut self) {
        if let Some(violation) = self.source.take_limit_violation() {
            let position = self.source.position();
            let kind = match violation {
                LimitViolation::LineTooLong { .. } => DiagnosticKind::LineTooLong,
                LimitViolation::TooManyLines => DiagnosticKind::TooManyLines,
            };
            self.error(kind, position, None);
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.source.next_char(), ' ' | '\t' | '\n') {
            self.source.read_char();
        }
    }

    fn get_new_lookahead_sym(&mut self) -> Symbol {
        loop {
            self.skip_blanks();
            let position = self.source.position();
            let next = self.source.next_char();
            let la2 = self.source.la2_char();
            let symbol = match next {
                EOT if self.source.is_at_eof() => Some(self.end_of_file(position)),
                '!' if self.is_enabled(Capability::LineComments) => {
                    self.skip_line_comment();
                    None
                }
                '"' | '\'' => Some(self.string_literal(position)),
                '(' if la2 == '*' => {
                    self.block_comment(position);
                    None
                }
                '<' if la2 == '*' && self.is_enabled(Capability::IsoPragmaDelimiters) => {
                    self.iso_pragma(position);
                    None
                }
                '?' if la2 == '<' && position.column == 1 => {
                    self.disabled_code_section(position);
                    None
                }
                '0'..='9' => Some(self.number_literal(position)),
                'A'..='Z' | 'a'..='z' => Some(self.identifier_or_reserved_word(position)),
                _ => Some(self.punctuation(position)),
            };
            self.check_limits();
            if let Some(symbol) = symbol {
                return symbol;
            }
        }
    }

    fn end_of_file(&mut self, position: Position) -> Symbol {
        if !self.done {
            self.done = true;
            debug!("reached end of {:?} at {position}", self.source.name());
            self.source.close();
        }
        Symbol::end_of_file(position)
    }

    fn identifier_or_reserved_word(&mut self, position: Position) -> Symbol {
        let lowline = self.is_enabled(Capability::LowlineIdentifiers);
        let mut all_upper = true;
        let mut used_lowline = false;
        self.source.mark_lexeme();
        loop {
            let next = self.source.next_char();
            if next.is_ascii_alphanumeric() {
                all_upper &= !next.is_ascii_lowercase();
                self.source.read_char();
            } else if next == '_' && lowline && self.source.la2_char().is_ascii_alphanumeric() {
                used_lowline = true;
                self.source.read_char();
            } else {
                break;
            }
        }
        let lexeme = self.source.read_marked_lexeme().unwrap_or_default();
        if all_upper && !used_lowline {
            if let Some(token) = Token::reserved_word(&lexeme) {
                return Symbol::new(token, position, None);
            }
        }
        Symbol::new(Token::Identifier, position, lexeme)
    }

    /// A capability-gated operator whose capability is off
    fn disabled_operator(&mut self, position: Position, capability: Capability, lexeme: &str) -> Symbol {
        self.error(
            DiagnosticKind::CapabilityDisabled { capability },
            position,
            Some(lexeme.to_string()),
        );
        Symbol::new(Token::Unknown, position, lexeme.to_string())
    }

    fn punctuation(&mut self, position: Position) -> Symbol {
        let first = self.source.read_char();
        let second = self.source.next_char();
        let (token, width) = match (first, second) {
            ('+', '+') if self.is_enabled(Capability::PostfixIncDec) => (Token::PlusPlus, 2),
            ('-', '-') if self.is_enabled(Capability::PostfixIncDec) => (Token::MinusMinus, 2),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Asterisk, 1),
            ('/', _) => (Token::Solidus, 1),
            ('\\', _) if self.is_enabled(Capability::BackslashSetDiff) => (Token::Backslash, 1),
            ('\\', _) => {
                return self.disabled_operator(position, Capability::BackslashSetDiff, "\\")
            }
            ('=', _) => (Token::Equal, 1),
            ('#', _) => (Token::NotEqual, 1),
            ('<', '=') => (Token::LessEqual, 2),
            ('<', '>') if self.is_enabled(Capability::Synonyms) => (Token::NotEqual, 2),
            ('<', '>') => {
                self.source.read_char();
                return self.disabled_operator(position, Capability::Synonyms, "<>");
            }
            ('<', _) => (Token::Less, 1),
            ('>', '=') => (Token::GreaterEqual, 2),
            ('>', _) => (Token::Greater, 1),
            (':', '=') => (Token::Assign, 2),
            (':', _) => (Token::Colon, 1),
            (';', _) => (Token::Semicolon, 1),
            (',', _) => (Token::Comma, 1),
            ('.', '.') => (Token::Range, 2),
            ('.', _) => (Token::Period, 1),
            ('|', _) => (Token::Bar, 1),
            ('^', _) => (Token::Deref, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            ('[', _) => (Token::LBracket, 1),
            (']', _) => (Token::RBracket, 1),
            ('{', _) => (Token::LBrace, 1),
            ('}', _) => (Token::RBrace, 1),
            ('&', _) if self.is_enabled(Capability::Synonyms) => (Token::And, 1),
            ('~', _) if self.is_enabled(Capability::Synonyms) => (Token::Not, 1),
            ('&' | '~', _) => {
                return self.disabled_operator(position, Capability::Synonyms, &first.to_string())
            }
            ('!', _) => return self.disabled_operator(position, Capability::LineComments, "!"),
            (illegal, _) => {
                let kind = if illegal.is_ascii_control() {
                    DiagnosticKind::IllegalControlCharacter(illegal)
                } else {
                    DiagnosticKind::IllegalCharacter(illegal)
                };
                self.error(kind, position, Some(illegal.to_string()));
                return Symbol::new(Token::Unknown, position, illegal.to_string());
            }
        };
        if width == 2 {
            self.source.read_char();
        }
        Symbol::new(token, position, None)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Symbol;

    /// Yields every symbol up to and including the end of file
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.token == Token::EndOfFile {
            return None;
        }
        self.read_sym();
        Some(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use m2c_capabilities::Dialect;
    use test_log::test;

    pub(super) fn lex_with(capabilities: &Capabilities, text: &str) -> (Vec<Symbol>, Diagnostics) {
        let source = SourceBuffer::from_text("test.mod", text).expect("non-empty source");
        let mut lexer = Lexer::new(source, capabilities);
        let symbols = lexer.by_ref().collect::<Vec<_>>();
        let (diagnostics, _) = lexer.finish();
        (symbols, diagnostics)
    }

    pub(super) fn tokens_with(capabilities: &Capabilities, text: &str) -> Vec<Token> {
        lex_with(capabilities, text)
            .0
            .into_iter()
            .map(|symbol| symbol.token)
            .collect()
    }

    fn tokens(text: &str) -> Vec<Token> {
        tokens_with(&Capabilities::default(), text)
    }

    #[test]
    fn test_const_declaration() {
        let (symbols, diagnostics) = lex_with(&Capabilities::default(), "CONST x = 1 ;");
        let tokens = symbols.iter().map(|s| s.token).collect::<Vec<_>>();
        assert_eq!(
            tokens,
            [
                Token::Const,
                Token::Identifier,
                Token::Equal,
                Token::IntLiteral,
                Token::Semicolon,
                Token::EndOfFile
            ]
        );
        assert_eq!(symbols[1].lexeme(), Some("x"));
        assert_eq!(symbols[3].lexeme(), Some("1"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_positions() {
        let (symbols, _) = lex_with(&Capabilities::default(), "MODULE M;\n  BEGIN\r\nEND M.");
        let positions = symbols
            .iter()
            .map(|s| (s.position.line, s.position.column))
            .collect::<Vec<_>>();
        assert_eq!(
            positions,
            [(1, 1), (1, 8), (1, 9), (2, 3), (3, 1), (3, 5), (3, 6), (3, 7)]
        );
    }

    #[test]
    fn test_read_next_and_consume() {
        let capabilities = Capabilities::default();
        let source = SourceBuffer::from_text("t.mod", "a := b").unwrap();
        let mut lexer = Lexer::new(source, &capabilities);
        assert_eq!(lexer.next_sym(), Token::Identifier);
        assert_eq!(lexer.lookahead_lexeme(), Some("a"));
        assert_eq!(lexer.consume_sym(), Token::Assign);
        assert_eq!(lexer.current_lexeme(), Some("a"));
        assert_eq!(lexer.read_sym(), Token::Assign);
        assert_eq!(lexer.lookahead_position(), Position::new(1, 6));
        assert_eq!(lexer.consume_sym(), Token::EndOfFile);
        assert!(lexer.is_exhausted());
        assert_eq!(lexer.read_sym(), Token::EndOfFile);
        assert_eq!(lexer.read_sym(), Token::EndOfFile);
    }

    #[test]
    fn test_reserved_words_need_upper_case() {
        assert_eq!(
            tokens("BEGIN Begin begin BEGIN2"),
            [
                Token::Begin,
                Token::Identifier,
                Token::Identifier,
                Token::Identifier,
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn test_lowline_identifiers() {
        let ext = Capabilities::new(Dialect::Extended);
        let (symbols, _) = lex_with(&ext, "foo_bar END_ x__y");
        let summary = symbols
            .iter()
            .map(|s| (s.token, s.lexeme().map(str::to_string)))
            .collect::<Vec<_>>();
        assert_eq!(summary[0], (Token::Identifier, Some("foo_bar".to_string())));
        assert_eq!(summary[1], (Token::End, None));
        assert_eq!(summary[2].0, Token::Unknown);

        let pim = tokens("foo_bar");
        assert_eq!(pim, [Token::Identifier, Token::Unknown, Token::Identifier, Token::EndOfFile]);
    }

    #[test]
    fn test_lowline_disqualifies_reserved_words() {
        let ext = Capabilities::new(Dialect::Extended);
        let (symbols, _) = lex_with(&ext, "END_IF");
        assert_eq!(symbols[0].token, Token::Identifier);
        assert_eq!(symbols[0].lexeme(), Some("END_IF"));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokens(":= : .. . <= < >= > # = ^ | ( ) [ ] { } , ; + - * /"),
            [
                Token::Assign,
                Token::Colon,
                Token::Range,
                Token::Period,
                Token::LessEqual,
                Token::Less,
                Token::GreaterEqual,
                Token::Greater,
                Token::NotEqual,
                Token::Equal,
                Token::Deref,
                Token::Bar,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
                Token::Comma,
                Token::Semicolon,
                Token::Plus,
                Token::Minus,
                Token::Asterisk,
                Token::Solidus,
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn test_range_after_integer() {
        assert_eq!(
            tokens("[0..9]"),
            [
                Token::LBracket,
                Token::IntLiteral,
                Token::Range,
                Token::IntLiteral,
                Token::RBracket,
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn test_synonyms() {
        let pim = Capabilities::new(Dialect::Pim4);
        assert_eq!(
            tokens_with(&pim, "& ~ <>"),
            [Token::And, Token::Not, Token::NotEqual, Token::EndOfFile]
        );

        let ext = Capabilities::new(Dialect::Extended);
        let (symbols, diagnostics) = lex_with(&ext, "a & b");
        assert_eq!(symbols[1].token, Token::Unknown);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.kind.clone()),
            Some(DiagnosticKind::CapabilityDisabled {
                capability: Capability::Synonyms
            })
        );
    }

    #[test]
    fn test_backslash_and_postfix_operators() {
        let ext = Capabilities::new(Dialect::Extended);
        assert_eq!(
            tokens_with(&ext, "a \\ b; i++; j--"),
            [
                Token::Identifier,
                Token::Backslash,
                Token::Identifier,
                Token::Semicolon,
                Token::Identifier,
                Token::PlusPlus,
                Token::Semicolon,
                Token::Identifier,
                Token::MinusMinus,
                Token::EndOfFile
            ]
        );
        assert_eq!(
            tokens("i++"),
            [Token::Identifier, Token::Plus, Token::Plus, Token::EndOfFile]
        );
        assert_eq!(tokens("\\")[0], Token::Unknown);
    }

    #[test]
    fn test_illegal_characters() {
        let (symbols, diagnostics) = lex_with(&Capabilities::default(), "a $ b \u{7} c");
        let tokens = symbols.iter().map(|s| s.token).collect::<Vec<_>>();
        assert_eq!(
            tokens,
            [
                Token::Identifier,
                Token::Unknown,
                Token::Identifier,
                Token::Unknown,
                Token::Identifier,
                Token::EndOfFile
            ]
        );
        let kinds = diagnostics.iter().map(|d| d.kind.clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                DiagnosticKind::IllegalCharacter('$'),
                DiagnosticKind::IllegalControlCharacter('\u{7}')
            ]
        );
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn test_literal_eot_byte_is_not_end_of_file() {
        let (symbols, diagnostics) = lex_with(&Capabilities::default(), "a \u{4} b");
        assert_eq!(symbols.len(), 4);
        assert_eq!(symbols[1].token, Token::Unknown);
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_line_too_long() {
        let text = format!("x := {};", "1".repeat(300));
        let (_, diagnostics) = lex_with(&Capabilities::default(), &text);
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::LineTooLong));
    }

    #[test]
    fn test_iterator_stops_after_end_of_file() {
        let capabilities = Capabilities::default();
        let source = SourceBuffer::from_text("t.mod", "END").unwrap();
        let mut lexer = Lexer::new(source, &capabilities);
        assert_eq!(lexer.next().map(|s| s.token), Some(Token::End));
        assert_eq!(lexer.next().map(|s| s.token), Some(Token::EndOfFile));
        assert_eq!(lexer.next(), None);
    }
}
