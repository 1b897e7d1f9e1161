//! Comments, pragmas and disabled code sections, none of which produce symbols

use super::{Lexer, Pragma};
use crate::diagnostics::DiagnosticKind;
use m2c_capabilities::Capability;
use m2c_source::{Position, EOT};
use tracing::debug;

impl Lexer<'_> {
    fn at_end_of_file(&self) -> bool {
        self.source.next_char() == EOT && self.source.is_at_eof()
    }

    /// Reads one character, reporting it if it may not appear in comments
    fn read_comment_char(&mut self) {
        let position = self.source.position();
        let c = self.source.read_char();
        if c.is_ascii_control() && !matches!(c, '\t' | '\n') {
            self.error(DiagnosticKind::IllegalControlCharacter(c), position, None);
        }
    }

    /// `!` up to the end of the line
    pub(super) fn skip_line_comment(&mut self) {
        self.source.read_char();
        while self.source.next_char() != '\n' && !self.at_end_of_file() {
            self.read_comment_char();
        }
    }

    /// `(* ... *)`, nesting, or a `(*$ ... *)` pragma when intra-comment pragmas are on
    pub(super) fn block_comment(&mut self, position: Position) {
        self.source.read_char();
        self.source.read_char();
        if self.source.next_char() == '$' && self.is_enabled(Capability::IntraCommentPragmas) {
            self.source.read_char();
            self.pragma_body(position, ')');
            return;
        }

        let mut depth = 1_usize;
        while depth > 0 {
            if self.at_end_of_file() {
                self.error(DiagnosticKind::EofInBlockComment, position, None);
                return;
            }
            match (self.source.next_char(), self.source.la2_char()) {
                ('(', '*') => {
                    self.source.read_char();
                    self.source.read_char();
                    depth += 1;
                }
                ('*', ')') => {
                    self.source.read_char();
                    self.source.read_char();
                    depth -= 1;
                }
                _ => self.read_comment_char(),
            }
        }
    }

    /// `<* ... *>`
    pub(super) fn iso_pragma(&mut self, position: Position) {
        self.source.read_char();
        self.source.read_char();
        self.pragma_body(position, '>');
    }

    /// Captures everything up to `*` followed by `closing`
    fn pragma_body(&mut self, position: Position, closing: char) {
        self.source.mark_lexeme();
        let mut terminated = false;
        while !self.at_end_of_file() {
            if self.source.next_char() == '*' && self.source.la2_char() == closing {
                terminated = true;
                break;
            }
            self.read_comment_char();
        }
        let body = self.source.read_marked_lexeme().unwrap_or_default();
        if terminated {
            self.source.read_char();
            self.source.read_char();
        } else {
            self.error(DiagnosticKind::EofInPragma, position, None);
        }
        let body = body.trim().to_string();
        debug!("pragma at {position}: {body:?}");
        self.pragmas.push(Pragma { position, body });
    }

    /// `?<` ... `>?`, both delimiters in the first column
    pub(super) fn disabled_code_section(&mut self, position: Position) {
        self.source.read_char();
        self.source.read_char();
        loop {
            if self.at_end_of_file() {
                self.error(DiagnosticKind::EofInDisabledCode, position, None);
                return;
            }
            if self.source.column() == 1
                && self.source.next_char() == '>'
                && self.source.la2_char() == '?'
            {
                let last = self.source.line();
                self.source.read_char();
                self.source.read_char();
                debug!("skipped disabled code from line {} to {last}", position.line);
                self.diagnostics.report_warning(
                    DiagnosticKind::DisabledCodeSection {
                        first: position.line,
                        last,
                    },
                    position,
                );
                return;
            }
            self.source.read_char();
        }
    }
}
