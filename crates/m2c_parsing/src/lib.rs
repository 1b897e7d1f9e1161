#![doc = include_str!("../README.md")]

use m2c_capabilities::Capabilities;
use m2c_source::{SourceBuffer, SourceError};
use std::path::Path;
use tracing::trace;

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod production;
pub mod token_sets;

pub use self::{
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticOptions, Diagnostics, Severity},
    lexer::{Lexer, Pragma},
    parser::{ParseOutcome, Parser},
    production::Production,
};

/// Opens a lexer on the file at `path`, positioned on its first symbol
pub fn open_lexer(path: impl AsRef<Path>, capabilities: &Capabilities) -> Result<Lexer<'_>, SourceError> {
    Lexer::open(path, capabilities)
}

/// Parses a compilation unit from an already opened lexer
pub fn parse(lexer: Lexer<'_>) -> ParseOutcome {
    trace!("starting parsing of {:?}", lexer.source_name());
    Parser::new(lexer).parse()
}

/// Parses the file at `path`.
///
/// Only failing to read the file is an error; everything wrong with its
/// contents is reported in the outcome's diagnostics.
pub fn parse_file(
    path: impl AsRef<Path>,
    capabilities: &Capabilities,
    options: DiagnosticOptions,
) -> Result<ParseOutcome, SourceError> {
    let lexer = Lexer::open_with_options(path, capabilities, options)?;
    Ok(parse(lexer))
}

/// Parses `text` as if it were the contents of a file called `name`
pub fn parse_text(
    name: impl AsRef<Path>,
    text: &str,
    capabilities: &Capabilities,
    options: DiagnosticOptions,
) -> Result<ParseOutcome, SourceError> {
    let source = SourceBuffer::from_text(name, text)?;
    Ok(parse(Lexer::with_options(source, capabilities, options)))
}
