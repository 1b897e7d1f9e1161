//! Recoverable faults found while lexing and parsing

use crate::production::Production;
use derive_more::Display;
use m2c_ast::AstError;
use m2c_capabilities::Capability;
use m2c_source::{Position, MAX_COLUMNS, MAX_LINES};
use m2c_tokens::{Token, TokenSet};
use std::fmt::Formatter;
use tracing::debug;

/// How serious a diagnostic is
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Severity {
    #[display(fmt = "warning")]
    Warning,
    #[display(fmt = "error")]
    Error,
    /// A fault in the parser itself rather than in the source
    #[display(fmt = "internal error")]
    InternalError,
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    #[error("illegal character {0:?}")]
    IllegalCharacter(char),
    #[error("illegal control character U+{:04X}", code_point(.0))]
    IllegalControlCharacter(char),
    #[error("missing string delimiter")]
    MissingStringDelimiter,
    #[error("invalid escape sequence \\{0}")]
    InvalidEscapeSequence(char),
    #[error("malformed integer literal")]
    MalformedInteger,
    #[error("malformed real literal")]
    MalformedReal,
    #[error("end of file inside block comment")]
    EofInBlockComment,
    #[error("end of file inside pragma")]
    EofInPragma,
    #[error("end of file inside disabled code section")]
    EofInDisabledCode,
    #[error("line is longer than {} columns", MAX_COLUMNS)]
    LineTooLong,
    #[error("file has more than {} lines", MAX_LINES)]
    TooManyLines,
    #[error("disabled code section from line {first} to line {last}")]
    DisabledCodeSection { first: u32, last: u32 },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: Token, found: Token },
    #[error("expected one of {expected}, found {found}")]
    UnexpectedTokenOfSet { expected: TokenSet, found: Token },
    #[error("expected identifier {expected:?}, found {found:?}")]
    IdentifierMismatch { expected: String, found: String },
    #[error("errant semicolon")]
    ErrantSemicolon,
    #[error("empty statement sequence")]
    EmptyStatementSequence,
    #[error("empty field list sequence")]
    EmptyFieldListSequence,
    #[error("{capability} is not enabled")]
    CapabilityDisabled { capability: Capability },
    #[error("{production} dispatched on {found}, which is not in its FIRST set")]
    UnreachableDispatch { production: Production, found: Token },
    #[error("could not build syntax tree: {0}")]
    MalformedTree(AstError),
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// A reported fault with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub position: Position,
    /// The offending source text, if any
    pub lexeme: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.kind)
    }
}

/// Options for how diagnostics are classified
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct DiagnosticOptions {
    /// Report style faults (errant semicolons, empty sequences) as errors instead of warnings
    pub style_faults_as_errors: bool,
}

/// Collects diagnostics and counts them by severity
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    options: DiagnosticOptions,
    entries: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

impl Diagnostics {
    pub fn new(options: DiagnosticOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> DiagnosticOptions {
        self.options
    }

    /// Records a diagnostic
    pub fn report(
        &mut self,
        severity: Severity,
        kind: DiagnosticKind,
        position: Position,
        lexeme: Option<String>,
    ) {
        debug!("{position}: {severity}: {kind}");
        match severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error | Severity::InternalError => self.errors += 1,
        }
        self.entries.push(Diagnostic {
            severity,
            kind,
            position,
            lexeme,
        });
    }

    pub fn report_error(&mut self, kind: DiagnosticKind, position: Position, lexeme: Option<String>) {
        self.report(Severity::Error, kind, position, lexeme);
    }

    pub fn report_warning(&mut self, kind: DiagnosticKind, position: Position) {
        self.report(Severity::Warning, kind, position, None);
    }

    /// Records a style fault, as a warning or an error depending on the options
    pub fn report_style_fault(&mut self, kind: DiagnosticKind, position: Position) {
        let severity = if self.options.style_faults_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        };
        self.report(severity, kind, position, None);
    }

    pub fn report_internal(&mut self, kind: DiagnosticKind, position: Position) {
        self.report(Severity::InternalError, kind, position, None);
    }

    /// The number of errors, internal errors included
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
