//! The source buffer read by the lexer

use crate::error::SourceError;
use crate::position::{LimitViolation, Position, MAX_COLUMNS, MAX_LINES};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// End-of-transmission sentinel, returned when reading past the end of a file
pub const EOT: char = '\u{4}';

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Status of the most recent operation on a [`SourceBuffer`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SourceStatus {
    #[default]
    Success,
    AttemptToReadPastEof,
    NoLexemeMarked,
    LexemeMarkNotBehindCursor,
    InvalidState,
}

/// The complete contents of one source file, with a read cursor.
///
/// Characters are single bytes. A `CR` or `CR LF` pair is folded into a single
/// `LF` by every read and peek operation, so callers only ever see `'\n'` as a line
/// terminator.
#[derive(Debug)]
pub struct SourceBuffer {
    name: PathBuf,
    content: Vec<u8>,
    index: usize,
    line: u32,
    column: u32,
    lexeme_mark: Option<usize>,
    status: SourceStatus,
    closed: bool,
    line_saturated: bool,
    column_saturated: bool,
    too_many_lines_reported: bool,
    long_line_reported: bool,
    violation: Option<LimitViolation>,
}

impl SourceBuffer {
    /// Loads the file at `path` into a new buffer
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::FileNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => SourceError::FileAccessDenied(path.to_path_buf()),
            _ => SourceError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        debug!("loaded {} bytes from {path:?}", content.len());
        Self::from_bytes(path, content)
    }

    /// Creates a buffer from in-memory text
    pub fn from_text(name: impl AsRef<Path>, text: &str) -> Result<Self, SourceError> {
        Self::from_bytes(name, text.as_bytes().to_vec())
    }

    /// Creates a buffer from raw bytes
    pub fn from_bytes(name: impl AsRef<Path>, content: Vec<u8>) -> Result<Self, SourceError> {
        let name = name.as_ref().to_path_buf();
        if content.is_empty() {
            return Err(SourceError::EmptyFile(name));
        }
        Ok(Self {
            name,
            content,
            index: 0,
            line: 1,
            column: 1,
            lexeme_mark: None,
            status: SourceStatus::Success,
            closed: false,
            line_saturated: false,
            column_saturated: false,
            too_many_lines_reported: false,
            long_line_reported: false,
            violation: None,
        })
    }

    /// Consumes the next character and returns it, or [`EOT`] past the end of the file.
    pub fn read_char(&mut self) -> char {
        if self.closed {
            self.status = SourceStatus::InvalidState;
            return EOT;
        }
        let Some(&byte) = self.content.get(self.index) else {
            self.status = SourceStatus::AttemptToReadPastEof;
            return EOT;
        };
        self.status = SourceStatus::Success;
        self.index += 1;
        if self.line_saturated && !self.too_many_lines_reported {
            self.too_many_lines_reported = true;
            self.violation = Some(LimitViolation::TooManyLines);
        }
        match byte {
            CR => {
                if self.content.get(self.index) == Some(&LF) {
                    self.index += 1;
                }
                self.advance_line();
                '\n'
            }
            LF => {
                self.advance_line();
                '\n'
            }
            _ => {
                self.advance_column();
                char::from(byte)
            }
        }
    }

    /// Peeks at the next character without consuming it
    pub fn next_char(&self) -> char {
        if self.closed {
            return EOT;
        }
        self.char_at(self.index).0
    }

    /// Peeks at the character after the next one without consuming anything
    pub fn la2_char(&self) -> char {
        if self.closed {
            return EOT;
        }
        match self.char_at(self.index) {
            (_, 0) => EOT,
            (_, width) => self.char_at(self.index + width).0,
        }
    }

    /// Records the current cursor as the start of a lexeme
    pub fn mark_lexeme(&mut self) {
        if self.closed {
            self.status = SourceStatus::InvalidState;
            return;
        }
        self.status = SourceStatus::Success;
        self.lexeme_mark = Some(self.index);
    }

    /// Returns the text between the lexeme mark and the cursor, clearing the mark.
    ///
    /// Returns `None` and sets [`status`](Self::status) if no mark is set or the
    /// mark is not behind the cursor.
    pub fn read_marked_lexeme(&mut self) -> Option<String> {
        if self.closed {
            self.status = SourceStatus::InvalidState;
            return None;
        }
        match self.lexeme_mark.take() {
            None => {
                self.status = SourceStatus::NoLexemeMarked;
                None
            }
            Some(mark) if mark >= self.index => {
                self.status = SourceStatus::LexemeMarkNotBehindCursor;
                None
            }
            Some(mark) => {
                self.status = SourceStatus::Success;
                Some(decode(&self.content[mark..self.index]))
            }
        }
    }

    /// Whether a lexeme mark is currently set
    pub fn has_lexeme_mark(&self) -> bool {
        self.lexeme_mark.is_some()
    }

    /// Releases the contents. Every later operation fails with [`SourceStatus::InvalidState`].
    pub fn close(&mut self) {
        trace!("closing {:?}", self.name);
        self.closed = true;
        self.content = Vec::new();
        self.lexeme_mark = None;
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether every character has been consumed
    pub fn is_at_eof(&self) -> bool {
        self.closed || self.index >= self.content.len()
    }

    /// Status of the last operation
    pub fn status(&self) -> SourceStatus {
        self.status
    }

    /// Takes the pending line/column limit violation, if any
    pub fn take_limit_violation(&mut self) -> Option<LimitViolation> {
        self.violation.take()
    }

    /// The file this buffer was loaded from
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// The line of the next character
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The column of the next character
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The position of the next character
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn char_at(&self, index: usize) -> (char, usize) {
        match self.content.get(index) {
            None => (EOT, 0),
            Some(&CR) if self.content.get(index + 1) == Some(&LF) => ('\n', 2),
            Some(&CR) => ('\n', 1),
            Some(&byte) => (char::from(byte), 1),
        }
    }

    fn advance_line(&mut self) {
        if self.line >= MAX_LINES {
            self.line_saturated = true;
        } else {
            self.line += 1;
        }
        self.column = 1;
        self.column_saturated = false;
        self.long_line_reported = false;
    }

    fn advance_column(&mut self) {
        if self.column_saturated {
            if !self.long_line_reported {
                self.long_line_reported = true;
                self.violation = Some(LimitViolation::LineTooLong { line: self.line });
            }
        } else if self.column >= MAX_COLUMNS {
            self.column_saturated = true;
        } else {
            self.column += 1;
        }
    }
}

/// Decodes single-byte characters, folding `CR` and `CR LF` into `LF`
fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut iter = bytes.iter().peekable();
    while let Some(&byte) = iter.next() {
        if byte == CR {
            iter.next_if_eq(&&LF);
            out.push('\n');
        } else {
            out.push(char::from(byte));
        }
    }
    out
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn buffer(text: &str) -> SourceBuffer {
        SourceBuffer::from_text("prop.mod", text).expect("non-empty text")
    }

    proptest! {
        #[test]
        fn line_and_column_match_reference(text in "[a-z \t\r\n]{1,200}") {
            let mut buffer = buffer(&text);
            let folded = text.replace("\r\n", "\n").replace('\r', "\n");
            let (mut line, mut column) = (1u32, 1u32);
            for expected in folded.chars() {
                prop_assert_eq!(buffer.position(), Position::new(line, column));
                prop_assert_eq!(buffer.read_char(), expected);
                if expected == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            prop_assert_eq!(buffer.position(), Position::new(line, column));
            prop_assert!(buffer.is_at_eof());
        }

        #[test]
        fn lexeme_round_trip(text in "[A-Za-z0-9 ]{2,80}", start in 0usize..40, len in 1usize..40) {
            let start = start % text.len();
            let len = len.min(text.len() - start).max(1);
            let mut buffer = buffer(&text);
            for _ in 0..start {
                buffer.read_char();
            }
            buffer.mark_lexeme();
            for _ in 0..len {
                buffer.read_char();
            }
            prop_assert_eq!(buffer.read_marked_lexeme(), Some(text[start..start + len].to_string()));
            prop_assert_eq!(buffer.read_marked_lexeme(), None);
        }
    }
}
