//! Blocks, declarations, definitions and procedure headers

use super::Parser;
use crate::production::Production;
use crate::token_sets::resync;
use m2c_ast::{NodeId, NodeKind};
use m2c_capabilities::Capability;
use m2c_tokens::{token_set, Token, TokenSet};

impl Parser<'_> {
    /// block := declaration* (BEGIN statementSequence)? END
    pub(super) fn block(&mut self) -> NodeId {
        self.enter(Production::Block);
        let first = self.first(Production::Declaration);
        let mut declarations = vec![];
        loop {
            if self.at(first) {
                declarations.push(self.declaration());
            } else if self.at(token_set![Begin, End, EndOfFile]) {
                break;
            } else {
                self.match_set(self.first(Production::Block), resync::DECLARATION_OR_BODY);
            }
        }
        let declarations = self.list(NodeKind::DeclarationList, declarations);

        let body = if self.lookahead() == Token::Begin {
            self.consume();
            self.statement_sequence()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::End, self.follow(Production::Block));
        self.node(NodeKind::Block, [declarations, body])
    }

    /// declaration := CONST (constDefinition ';')* | TYPE (typeDeclaration ';')*
    /// | VAR (variableDeclaration ';')* | procedureDeclaration ';' | moduleDeclaration ';'
    pub(super) fn declaration(&mut self) -> NodeId {
        self.enter(Production::Declaration);
        match self.lookahead() {
            Token::Const => self.const_section(),
            Token::Type => self.type_section(Self::type_declaration),
            Token::Var => self.var_section(),
            Token::Procedure => {
                let procedure = self.procedure_declaration();
                self.terminator(resync::DECLARATION_OR_BODY);
                procedure
            }
            Token::Module => {
                let module = self.module_declaration();
                self.terminator(resync::DECLARATION_OR_BODY);
                module
            }
            _ => self.unreachable_dispatch(Production::Declaration),
        }
    }

    /// definition := CONST (constDefinition ';')* | TYPE (typeDefinition ';')*
    /// | VAR (variableDeclaration ';')* | procedureHeader ';'
    pub(super) fn definition(&mut self) -> NodeId {
        self.enter(Production::Definition);
        match self.lookahead() {
            Token::Const => self.const_section(),
            Token::Type => self.type_section(Self::type_definition),
            Token::Var => self.var_section(),
            Token::Procedure => {
                let header = self.procedure_header();
                self.terminator(resync::DEFINITION_OR_END);
                header
            }
            _ => self.unreachable_dispatch(Production::Definition),
        }
    }

    /// A section keyword followed by `item ';'` as long as identifiers follow
    fn section(
        &mut self,
        kind: NodeKind,
        mut item: impl FnMut(&mut Self) -> NodeId,
    ) -> NodeId {
        self.consume();
        let resync = resync::DECLARATION_OR_BODY.union(token_set![Identifier]);
        let mut items = vec![];
        while self.lookahead() == Token::Identifier {
            items.push(item(self));
            self.terminator(resync);
        }
        self.list(kind, items)
    }

    fn const_section(&mut self) -> NodeId {
        self.section(NodeKind::ConstSection, Self::const_definition)
    }

    fn type_section(&mut self, item: fn(&mut Self) -> NodeId) -> NodeId {
        self.section(NodeKind::TypeSection, item)
    }

    fn var_section(&mut self) -> NodeId {
        self.section(NodeKind::VarSection, Self::variable_declaration)
    }

    /// constDefinition := ident '=' constExpression
    pub(super) fn const_definition(&mut self) -> NodeId {
        self.enter(Production::ConstDefinition);
        let follow = self.follow(Production::ConstDefinition);
        let name = self.ident(follow.with(Token::Equal));
        self.expect(Token::Equal, follow);
        let value = self.const_expression();
        self.node(NodeKind::ConstDecl, [name, value])
    }

    /// typeDefinition := ident ('=' type)?
    pub(super) fn type_definition(&mut self) -> NodeId {
        self.enter(Production::TypeDefinition);
        let name = self.ident(resync::TYPE_OR_SEMICOLON.with(Token::Equal));
        if self.lookahead() == Token::Equal {
            self.consume();
            let ty = self.type_();
            self.node(NodeKind::TypeDecl, [name, ty])
        } else {
            self.node(NodeKind::OpaqueType, [name])
        }
    }

    /// typeDeclaration := ident '=' type
    pub(super) fn type_declaration(&mut self) -> NodeId {
        self.enter(Production::TypeDeclaration);
        let name = self.ident(resync::TYPE_OR_SEMICOLON.with(Token::Equal));
        self.expect(Token::Equal, resync::TYPE_OR_SEMICOLON);
        let ty = self.type_();
        self.node(NodeKind::TypeDecl, [name, ty])
    }

    /// variableDeclaration := identList ':' type
    pub(super) fn variable_declaration(&mut self) -> NodeId {
        self.enter(Production::VariableDeclaration);
        let names = self.ident_list();
        self.expect(Token::Colon, resync::TYPE_OR_SEMICOLON);
        let ty = self.type_();
        self.node(NodeKind::VarDecl, [names, ty])
    }

    /// procedureDeclaration := procedureHeader ';' block ident
    pub(super) fn procedure_declaration(&mut self) -> NodeId {
        self.enter(Production::ProcedureDeclaration);
        let header = self.procedure_header();
        self.expect(Token::Semicolon, resync::PROCEDURE_BLOCK_OR_END);
        let block = self.block();
        let name = self.ast.child(header, 0).unwrap_or(NodeId::EMPTY);
        self.closing_ident(name, self.follow(Production::ProcedureDeclaration));
        self.node(NodeKind::ProcDecl, [header, block])
    }

    /// procedureHeader := PROCEDURE ident formalParamList?
    pub(super) fn procedure_header(&mut self) -> NodeId {
        self.enter(Production::ProcedureHeader);
        self.consume();
        let follow = self.follow(Production::ProcedureHeader);
        let name = self.ident(follow.with(Token::LParen));
        let (params, result) = if self.lookahead() == Token::LParen {
            self.formal_param_list()
        } else {
            (NodeId::EMPTY, NodeId::EMPTY)
        };
        self.node(NodeKind::ProcHeader, [name, params, result])
    }

    /// formalParamList := '(' (formalParams (';' formalParams)*)? ')' (':' qualident)?
    ///
    /// Returns the parameter sections and the result type.
    pub(super) fn formal_param_list(&mut self) -> (NodeId, NodeId) {
        self.enter(Production::FormalParamList);
        self.consume();
        let first = self.first(Production::FormalParams);
        let follow = self.follow(Production::FormalParamList);
        let mut sections = vec![];
        if self.at(first) {
            sections.push(self.formal_params());
            while self.lookahead() == Token::Semicolon {
                self.consume();
                if !self.match_set(first, follow.with(Token::RParen)) {
                    break;
                }
                sections.push(self.formal_params());
            }
        }
        let sections = self.list(NodeKind::FormalParams, sections);
        self.expect(Token::RParen, follow.with(Token::Colon));
        let result = self.optional_result(follow);
        (sections, result)
    }

    /// `':' qualident` after a parameter list
    pub(super) fn optional_result(&mut self, follow: TokenSet) -> NodeId {
        if self.lookahead() == Token::Colon {
            self.consume();
            if self.match_token(Token::Identifier, follow) {
                return self.qualident();
            }
        }
        NodeId::EMPTY
    }

    /// `CONST` or `VAR` in front of a formal parameter, if present
    pub(super) fn parameter_attribute(&mut self) -> NodeId {
        match self.lookahead() {
            Token::Const => {
                self.require(Capability::ConstParameters);
                self.consume();
                self.node(NodeKind::ConstAttr, [])
            }
            Token::Var => {
                self.consume();
                self.node(NodeKind::VarAttr, [])
            }
            _ => NodeId::EMPTY,
        }
    }

    /// formalParams := (CONST | VAR)? identList ':' attributedFormalType
    pub(super) fn formal_params(&mut self) -> NodeId {
        self.enter(Production::FormalParams);
        let attribute = self.parameter_attribute();
        let names = self.ident_list();
        let follow = self.follow(Production::FormalParams);
        self.expect(
            Token::Colon,
            follow.union(self.first(Production::AttributedFormalType)),
        );
        let ty = self.attributed_formal_type();
        self.node(NodeKind::FormalParamSection, [attribute, names, ty])
    }

    /// attributedFormalType := ARGLIST OF formalType | formalType
    pub(super) fn attributed_formal_type(&mut self) -> NodeId {
        self.enter(Production::AttributedFormalType);
        if self.lookahead() == Token::Arglist {
            self.require(Capability::VariadicParameters);
            self.consume();
            self.expect(Token::Of, self.first(Production::FormalType));
            let ty = self.formal_type();
            self.node(NodeKind::ArgList, [ty])
        } else {
            self.formal_type()
        }
    }

    /// formalType := (ARRAY OF)? qualident
    pub(super) fn formal_type(&mut self) -> NodeId {
        self.enter(Production::FormalType);
        let follow = self.follow(Production::FormalType);
        if !self.match_set(self.first(Production::FormalType), follow) {
            return NodeId::EMPTY;
        }
        if self.lookahead() == Token::Array {
            self.consume();
            self.expect(Token::Of, follow.with(Token::Identifier));
            if !self.match_token(Token::Identifier, follow) {
                return NodeId::EMPTY;
            }
            let element = self.qualident();
            self.node(NodeKind::OpenArray, [element])
        } else {
            self.qualident()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::tests::{kinds, run};
    use m2c_capabilities::{Capabilities, Capability, Dialect};
    use test_log::test;

    #[test]
    fn test_const_and_var_sections() {
        let capabilities = Capabilities::default();
        let (dump, diagnostics) = run(&capabilities, "CONST n = 10; m = n * 2; VAR a, b: INTEGER;", |p| {
            let constants = p.declaration();
            let variables = p.declaration();
            p.list(m2c_ast::NodeKind::DeclarationList, [constants, variables])
        });
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert_eq!(
            dump,
            "\
(DeclarationList
  (ConstSection
    (ConstDecl
      (Ident \"n\")
      (IntValue \"10\"))
    (ConstDecl
      (Ident \"m\")
      (Mul
        (Ident \"n\")
        (IntValue \"2\"))))
  (VarSection
    (VarDecl
      (IdentList
        (Ident \"a\")
        (Ident \"b\"))
      (Qualident
        (Ident \"INTEGER\")))))"
        );
    }

    #[test]
    fn test_procedure_declaration() {
        let capabilities = Capabilities::default();
        let (dump, diagnostics) = run(
            &capabilities,
            "PROCEDURE Max(a, b: INTEGER; VAR c: ARRAY OF CHAR): INTEGER; BEGIN RETURN a END Max;",
            |p| p.declaration(),
        );
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert!(dump.starts_with("(ProcDecl\n  (ProcHeader\n    (Ident \"Max\")"));
        assert!(dump.contains("(VarAttr)"));
        assert!(dump.contains("(OpenArray"));
        assert!(dump.contains("(Return"));
    }

    #[test]
    fn test_procedure_name_mismatch() {
        let capabilities = Capabilities::default();
        let (_, diagnostics) = run(&capabilities, "PROCEDURE p; END q;", |p| p.declaration());
        assert_eq!(
            kinds(&diagnostics),
            [DiagnosticKind::IdentifierMismatch {
                expected: "p".to_string(),
                found: "q".to_string()
            }]
        );
    }

    #[test]
    fn test_const_and_variadic_parameters() {
        let extended = Capabilities::new(Dialect::Extended);
        let text = "PROCEDURE f(CONST s: ARRAY OF CHAR; args: ARGLIST OF INTEGER);";
        let (dump, diagnostics) = run(&extended, text, |p| p.definition());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert!(dump.contains("(ConstAttr)"));
        assert!(dump.contains("(ArgList"));

        let pim = Capabilities::new(Dialect::Pim4);
        let (_, diagnostics) = run(&pim, text, |p| p.definition());
        assert_eq!(
            kinds(&diagnostics),
            [
                DiagnosticKind::CapabilityDisabled {
                    capability: Capability::ConstParameters
                },
                DiagnosticKind::CapabilityDisabled {
                    capability: Capability::VariadicParameters
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_terminator() {
        let capabilities = Capabilities::default();
        let (_, diagnostics) = run(&capabilities, "VAR x: T;; y: T;", |p| p.declaration());
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::ErrantSemicolon]);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_garbage_in_declarations_resyncs() {
        let capabilities = Capabilities::default();
        let (dump, diagnostics) = run(&capabilities, "VAR x: INTEGER; 42 BEGIN x := 1 END", |p| {
            p.block()
        });
        assert_eq!(diagnostics.error_count(), 1);
        assert!(dump.contains("(Assignment"));
    }
}
