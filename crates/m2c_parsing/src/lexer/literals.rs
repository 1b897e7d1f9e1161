//! String and number literals

use super::Lexer;
use crate::diagnostics::DiagnosticKind;
use m2c_capabilities::Capability;
use m2c_source::{Position, EOT};
use m2c_tokens::{Symbol, Token};

impl Lexer<'_> {
    /// Scans a quoted string. The lexeme keeps both delimiters.
    pub(super) fn string_literal(&mut self, position: Position) -> Symbol {
        let escapes = self.is_enabled(Capability::EscapeTabAndNewline);
        self.source.mark_lexeme();
        let delimiter = self.source.read_char();
        let mut token = Token::StringLiteral;
        loop {
            let next = self.source.next_char();
            if next == delimiter {
                self.source.read_char();
                break;
            }
            if next == '\n' || (next == EOT && self.source.is_at_eof()) {
                self.error(DiagnosticKind::MissingStringDelimiter, position, None);
                token = Token::MalformedString;
                break;
            }
            let char_position = self.source.position();
            self.source.read_char();
            if next == '\\' && escapes {
                match self.source.next_char() {
                    'n' | 't' | '\\' => {
                        self.source.read_char();
                    }
                    '\n' => {}
                    EOT if self.source.is_at_eof() => {}
                    other => {
                        self.error(
                            DiagnosticKind::InvalidEscapeSequence(other),
                            char_position,
                            Some(format!("\\{other}")),
                        );
                        if other != delimiter {
                            self.source.read_char();
                        }
                    }
                }
            } else if next.is_ascii_control() && next != '\t' {
                self.error(DiagnosticKind::IllegalControlCharacter(next), char_position, None);
            }
        }
        let lexeme = self.source.read_marked_lexeme();
        Symbol::new(token, position, lexeme)
    }

    /// Scans a number in the literal style selected by the capabilities
    pub(super) fn number_literal(&mut self, position: Position) -> Symbol {
        self.source.mark_lexeme();
        let token = if self.is_enabled(Capability::PrefixLiterals) {
            self.prefix_number()
        } else {
            self.suffix_number()
        };
        let lexeme = self.source.read_marked_lexeme();
        match token {
            Token::MalformedInteger => {
                self.error(DiagnosticKind::MalformedInteger, position, lexeme.clone())
            }
            Token::MalformedReal => self.error(DiagnosticKind::MalformedReal, position, lexeme.clone()),
            _ => {}
        }
        Symbol::new(token, position, lexeme)
    }

    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while predicate(self.source.next_char()) {
            self.source.read_char();
            count += 1;
        }
        count
    }

    /// `0x` hex integers, `0u` character codes, decimal integers and reals
    fn prefix_number(&mut self) -> Token {
        if self.source.next_char() == '0' {
            let base = self.source.la2_char();
            if base == 'x' || base == 'u' {
                self.source.read_char();
                self.source.read_char();
                if self.read_while(is_hex_digit) == 0 {
                    return Token::MalformedInteger;
                }
                return if base == 'x' {
                    Token::IntLiteral
                } else {
                    Token::CharLiteral
                };
            }
        }
        self.read_while(|c| c.is_ascii_digit());
        self.real_tail()
    }

    /// Decimal, `H` hex, `B` octal integer and `C` octal character code literals
    fn suffix_number(&mut self) -> Token {
        let mut letters = 0;
        let mut non_octal = false;
        let mut last = EOT;
        while is_hex_digit(self.source.next_char()) {
            last = self.source.read_char();
            if last.is_ascii_uppercase() {
                letters += 1;
            } else if last > '7' {
                non_octal = true;
            }
        }

        if self.source.next_char() == 'H' {
            self.source.read_char();
            return Token::IntLiteral;
        }
        if letters == 0 {
            return self.real_tail();
        }
        if letters == 1 && matches!(last, 'B' | 'C') && !non_octal {
            if !self.is_enabled(Capability::OctalLiterals) {
                return Token::MalformedInteger;
            }
            return if last == 'B' {
                Token::IntLiteral
            } else {
                Token::CharLiteral
            };
        }
        Token::MalformedInteger
    }

    /// The optional fraction and exponent after the integer digits
    fn real_tail(&mut self) -> Token {
        if self.source.next_char() != '.' || self.source.la2_char() == '.' {
            return Token::IntLiteral;
        }
        self.source.read_char();
        self.read_while(|c| c.is_ascii_digit());
        if self.source.next_char() == 'E' {
            self.source.read_char();
            if matches!(self.source.next_char(), '+' | '-') {
                self.source.read_char();
            }
            if self.read_while(|c| c.is_ascii_digit()) == 0 {
                return Token::MalformedReal;
            }
        }
        Token::RealLiteral
    }
}

fn is_hex_digit(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='F')
}
