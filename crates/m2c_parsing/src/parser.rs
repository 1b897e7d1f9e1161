//! Recursive-descent parser, one method per [`Production`]

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Lexer, Pragma};
use crate::production::Production;
use crate::token_sets;
use m2c_ast::{Ast, NodeId, NodeKind};
use m2c_capabilities::{Capabilities, Capability};
use m2c_source::Position;
use m2c_tokens::{Token, TokenSet};
use tracing::{debug, trace};

mod declarations;
mod expressions;
mod modules;
mod statements;
mod types;

/// Everything a parse produced
#[derive(Debug)]
pub struct ParseOutcome {
    pub ast: Ast,
    /// The compilation unit, or [`NodeId::EMPTY`] if none could be recognized
    pub root: NodeId,
    pub diagnostics: Diagnostics,
    pub pragmas: Vec<Pragma>,
}

impl ParseOutcome {
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }

    /// Whether the parse finished without errors
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

/// Builds a syntax tree from the symbols of a [`Lexer`].
///
/// Syntax errors are reported and recovered from by skipping to a
/// resynchronization set; the parser never backtracks and never stops early.
#[derive(Debug)]
pub struct Parser<'c> {
    lexer: Lexer<'c>,
    ast: Ast,
}

impl<'c> Parser<'c> {
    /// Creates a new parser reading from `lexer`
    pub fn new(lexer: Lexer<'c>) -> Self {
        Self {
            lexer,
            ast: Ast::new(),
        }
    }

    /// Parses a complete compilation unit
    pub fn parse(mut self) -> ParseOutcome {
        let root = self.compilation_unit();
        let (diagnostics, pragmas) = self.lexer.finish();
        debug!(
            "parse finished with {} errors and {} warnings",
            diagnostics.error_count(),
            diagnostics.warning_count()
        );
        ParseOutcome {
            ast: self.ast,
            root,
            diagnostics,
            pragmas,
        }
    }

    fn enter(&self, production: Production) {
        trace!(
            "{production} at {} on {}",
            self.lexer.lookahead_position(),
            self.lookahead()
        );
    }

    fn capabilities(&self) -> &'c Capabilities {
        self.lexer.capabilities()
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities().is_enabled(capability)
    }

    fn lookahead(&self) -> Token {
        self.lexer.next_sym()
    }

    fn at(&self, set: TokenSet) -> bool {
        set.is_element(self.lookahead())
    }

    /// Consumes the lookahead, returning the new lookahead
    fn consume(&mut self) -> Token {
        self.lexer.consume_sym()
    }

    fn first(&self, production: Production) -> TokenSet {
        token_sets::first(production, self.capabilities())
    }

    fn follow(&self, production: Production) -> TokenSet {
        token_sets::follow(production, self.capabilities())
    }

    fn lookahead_lexeme(&self) -> Option<String> {
        let symbol = self.lexer.lookahead();
        symbol
            .lexeme()
            .or_else(|| symbol.token.spelling())
            .map(str::to_string)
    }

    fn diagnostics(&mut self) -> &mut Diagnostics {
        self.lexer.diagnostics_mut()
    }

    fn report_at_lookahead(&mut self, kind: DiagnosticKind) {
        let position = self.lexer.lookahead_position();
        let lexeme = self.lookahead_lexeme();
        self.diagnostics().report_error(kind, position, lexeme);
    }

    fn report_style_fault(&mut self, kind: DiagnosticKind, position: Position) {
        self.diagnostics().report_style_fault(kind, position);
    }

    /// Skips symbols until the lookahead is in `resync` or is the end of file
    fn skip_to(&mut self, resync: TokenSet) {
        let stop = resync.with(Token::EndOfFile);
        let mut skipped = 0;
        while !self.at(stop) {
            self.consume();
            skipped += 1;
        }
        if skipped > 0 {
            debug!(
                "skipped {skipped} symbols, resuming at {} on {}",
                self.lexer.lookahead_position(),
                self.lookahead()
            );
        }
    }

    /// Checks the lookahead is `expected` without consuming it. On a mismatch
    /// reports and skips to `resync`.
    fn match_token(&mut self, expected: Token, resync: TokenSet) -> bool {
        if self.lookahead() == expected {
            return true;
        }
        let found = self.lookahead();
        self.report_at_lookahead(DiagnosticKind::UnexpectedToken { expected, found });
        self.skip_to(resync);
        false
    }

    /// Checks the lookahead is in `expected` without consuming it. On a mismatch
    /// reports and skips to `resync`.
    fn match_set(&mut self, expected: TokenSet, resync: TokenSet) -> bool {
        if self.at(expected) {
            return true;
        }
        let found = self.lookahead();
        self.report_at_lookahead(DiagnosticKind::UnexpectedTokenOfSet { expected, found });
        self.skip_to(resync);
        false
    }

    /// Matches and consumes `expected`. Also consumes it when recovery stopped on it.
    fn expect(&mut self, expected: Token, resync: TokenSet) -> bool {
        if self.match_token(expected, resync.with(expected)) || self.lookahead() == expected {
            self.consume();
            true
        } else {
            false
        }
    }

    /// Reports a construct whose capability is off. Parsing of it continues either way.
    fn require(&mut self, capability: Capability) -> bool {
        if self.is_enabled(capability) {
            return true;
        }
        self.report_at_lookahead(DiagnosticKind::CapabilityDisabled { capability });
        false
    }

    /// Handles a dispatch on a token outside the production's FIRST set
    fn unreachable_dispatch(&mut self, production: Production) -> NodeId {
        let found = self.lookahead();
        let position = self.lexer.lookahead_position();
        self.diagnostics()
            .report_internal(DiagnosticKind::UnreachableDispatch { production, found }, position);
        if found != Token::EndOfFile {
            self.consume();
        }
        NodeId::EMPTY
    }

    /// Consumes a `;` list separator together with any duplicates after it.
    ///
    /// Returns whether another list item follows. A duplicate, or a
    /// separator directly before a token of `follow`, is an errant semicolon.
    fn separator(&mut self, follow: TokenSet) -> bool {
        let position = self.lexer.lookahead_position();
        self.consume();
        let mut duplicates = false;
        while self.lookahead() == Token::Semicolon {
            duplicates = true;
            self.consume();
        }
        let terminated = self.at(follow.with(Token::EndOfFile));
        if duplicates || terminated {
            self.report_style_fault(DiagnosticKind::ErrantSemicolon, position);
        }
        !terminated
    }

    /// Consumes the `;` that ends a declaration, reporting duplicates after it
    fn terminator(&mut self, resync: TokenSet) {
        if !self.expect(Token::Semicolon, resync) {
            return;
        }
        let position = self.lexer.lookahead_position();
        if self.lookahead() == Token::Semicolon {
            while self.lookahead() == Token::Semicolon {
                self.consume();
            }
            self.report_style_fault(DiagnosticKind::ErrantSemicolon, position);
        }
    }

    fn node(&mut self, kind: NodeKind, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let result = self.ast.node(kind, children);
        self.built(result)
    }

    fn list(&mut self, kind: NodeKind, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let result = self.ast.list(kind, children);
        self.built(result)
    }

    fn terminal(&mut self, kind: NodeKind, value: impl Into<String>) -> NodeId {
        let result = self.ast.terminal(kind, value);
        self.built(result)
    }

    fn built(&mut self, result: Result<NodeId, m2c_ast::AstError>) -> NodeId {
        match result {
            Ok(id) => id,
            Err(error) => {
                let position = self.lexer.current_position();
                self.diagnostics()
                    .report_internal(DiagnosticKind::MalformedTree(error), position);
                NodeId::EMPTY
            }
        }
    }

    /// Fills the type slot of a subrange or set value built before its type was known
    fn splice_type(&mut self, parent: NodeId, type_ident: NodeId) -> NodeId {
        if parent.is_empty() {
            return parent;
        }
        if let Err(error) = self.ast.replace_child(parent, 0, type_ident) {
            let position = self.lexer.current_position();
            self.diagnostics()
                .report_internal(DiagnosticKind::MalformedTree(error), position);
        }
        parent
    }

    /// A terminal node for the symbol just consumed
    fn current_terminal(&mut self, kind: NodeKind) -> NodeId {
        let value = self.lexer.current_lexeme().unwrap_or_default().to_string();
        self.terminal(kind, value)
    }

    /// Matches and consumes an identifier
    fn ident(&mut self, resync: TokenSet) -> NodeId {
        if self.match_token(Token::Identifier, resync) {
            self.consume();
            self.current_terminal(NodeKind::Ident)
        } else {
            NodeId::EMPTY
        }
    }

    /// Checks the identifier closing a module or procedure repeats its name
    fn closing_ident(&mut self, opening: NodeId, resync: TokenSet) {
        if !self.match_token(Token::Identifier, resync) {
            return;
        }
        self.consume();
        let found = self.lexer.current_lexeme().unwrap_or_default().to_string();
        if let Some(expected) = self.ast.value(opening) {
            if expected != found {
                let expected = expected.to_string();
                let position = self.lexer.current_position();
                self.diagnostics().report_error(
                    DiagnosticKind::IdentifierMismatch {
                        expected,
                        found: found.clone(),
                    },
                    position,
                    Some(found),
                );
            }
        }
    }
}
