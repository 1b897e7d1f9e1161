//! Compilation units, imports and exports

use super::Parser;
use crate::production::Production;
use crate::token_sets::resync;
use m2c_ast::{NodeId, NodeKind};
use m2c_capabilities::Capability;
use m2c_tokens::{token_set, Token, TokenSet};

impl Parser<'_> {
    /// compilationUnit := definitionModule | IMPLEMENTATION? programModule
    pub(super) fn compilation_unit(&mut self) -> NodeId {
        self.enter(Production::CompilationUnit);
        let first = self.first(Production::CompilationUnit);
        if !self.match_set(first, first) && !self.at(first) {
            return NodeId::EMPTY;
        }
        let unit = match self.lookahead() {
            Token::Definition => self.definition_module(),
            Token::Implementation => {
                self.consume();
                self.program_module(NodeKind::ImplementationModule)
            }
            Token::Module => self.program_module(NodeKind::ProgramModule),
            _ => return self.unreachable_dispatch(Production::CompilationUnit),
        };
        self.match_token(Token::EndOfFile, TokenSet::EMPTY);
        unit
    }

    /// definitionModule := DEFINITION MODULE ident ';' importList* exportList?
    /// definition* END ident '.'
    pub(super) fn definition_module(&mut self) -> NodeId {
        self.enter(Production::DefinitionModule);
        self.consume();
        self.expect(Token::Module, resync::IMPORT_OR_DEFINITION.with(Token::Identifier));
        let name = self.ident(resync::IMPORT_OR_DEFINITION.with(Token::Semicolon));
        self.expect(Token::Semicolon, resync::IMPORT_OR_DEFINITION);

        let imports = self.imports();
        let exports = if self.lookahead() == Token::Export {
            self.require(Capability::ExportLists);
            self.export_list()
        } else {
            NodeId::EMPTY
        };

        let first = self.first(Production::Definition);
        let mut definitions = vec![];
        loop {
            if self.at(first) {
                definitions.push(self.definition());
            } else if self.at(token_set![End, EndOfFile]) {
                break;
            } else {
                self.match_set(first.with(Token::End), resync::DEFINITION_OR_END);
            }
        }
        let definitions = self.list(NodeKind::DefinitionList, definitions);

        self.expect(Token::End, resync::MODULE_END);
        self.closing_ident(name, resync::MODULE_END);
        self.expect(Token::Period, TokenSet::EMPTY);
        self.node(
            NodeKind::DefinitionModule,
            [name, imports, exports, definitions],
        )
    }

    /// programModule := MODULE ident modulePriority? ';' importList* block ident '.'
    pub(super) fn program_module(&mut self, kind: NodeKind) -> NodeId {
        self.enter(Production::ProgramModule);
        self.expect(Token::Module, resync::IMPORT_OR_BLOCK.with(Token::Identifier));
        let name = self.ident(resync::IMPORT_OR_BLOCK.union(token_set![Semicolon, LBracket]));
        let priority = self.optional_priority();
        self.expect(Token::Semicolon, resync::IMPORT_OR_BLOCK);
        let imports = self.imports();
        let block = self.block();
        self.closing_ident(name, resync::MODULE_END);
        self.expect(Token::Period, TokenSet::EMPTY);
        self.node(kind, [name, priority, imports, block])
    }

    /// moduleDeclaration := MODULE ident modulePriority? ';' importList* exportList?
    /// block ident
    pub(super) fn module_declaration(&mut self) -> NodeId {
        self.enter(Production::ModuleDeclaration);
        self.require(Capability::LocalModules);
        self.consume();
        let name = self.ident(resync::IMPORT_OR_BLOCK.union(token_set![Semicolon, LBracket]));
        let priority = self.optional_priority();
        self.expect(Token::Semicolon, resync::IMPORT_OR_BLOCK.with(Token::Export));
        let imports = self.imports();
        let exports = if self.lookahead() == Token::Export {
            self.export_list()
        } else {
            NodeId::EMPTY
        };
        let block = self.block();
        let follow = self.follow(Production::ModuleDeclaration);
        self.closing_ident(name, follow);
        self.node(
            NodeKind::ModuleDecl,
            [name, priority, imports, exports, block],
        )
    }

    fn optional_priority(&mut self) -> NodeId {
        if self.lookahead() == Token::LBracket {
            self.module_priority()
        } else {
            NodeId::EMPTY
        }
    }

    /// modulePriority := '[' constExpression ']'
    pub(super) fn module_priority(&mut self) -> NodeId {
        self.enter(Production::ModulePriority);
        self.consume();
        let priority = self.const_expression();
        self.expect(Token::RBracket, self.follow(Production::ModulePriority));
        priority
    }

    fn imports(&mut self) -> NodeId {
        let first = self.first(Production::ImportList);
        let mut imports = vec![];
        while self.at(first) {
            imports.push(self.import_list());
        }
        self.list(NodeKind::ImportList, imports)
    }

    /// importList := qualifiedImport | unqualifiedImport
    pub(super) fn import_list(&mut self) -> NodeId {
        self.enter(Production::ImportList);
        match self.lookahead() {
            Token::Import => self.qualified_import(),
            Token::From => self.unqualified_import(),
            _ => self.unreachable_dispatch(Production::ImportList),
        }
    }

    /// qualifiedImport := IMPORT identList ';'
    pub(super) fn qualified_import(&mut self) -> NodeId {
        self.enter(Production::QualifiedImport);
        self.consume();
        let names = self.ident_list();
        self.terminator(self.follow(Production::QualifiedImport));
        self.node(NodeKind::QualifiedImport, [names])
    }

    /// unqualifiedImport := FROM ident IMPORT identList ';'
    pub(super) fn unqualified_import(&mut self) -> NodeId {
        self.enter(Production::UnqualifiedImport);
        self.require(Capability::UnqualifiedImport);
        self.consume();
        let follow = self.follow(Production::UnqualifiedImport);
        let module = self.ident(follow.with(Token::Import));
        self.expect(Token::Import, follow);
        let names = self.ident_list();
        self.terminator(follow);
        self.node(NodeKind::UnqualifiedImport, [module, names])
    }

    /// exportList := EXPORT QUALIFIED? identList ';'
    pub(super) fn export_list(&mut self) -> NodeId {
        self.enter(Production::ExportList);
        self.consume();
        let kind = if self.lookahead() == Token::Qualified {
            self.consume();
            NodeKind::QualifiedExport
        } else {
            NodeKind::UnqualifiedExport
        };
        let names = self.ident_list();
        self.terminator(self.follow(Production::ExportList));
        self.node(kind, [names])
    }

    /// identList := ident (',' ident)*
    pub(super) fn ident_list(&mut self) -> NodeId {
        self.enter(Production::IdentList);
        let resync = self.follow(Production::IdentList).with(Token::Comma);
        let mut names = vec![self.ident(resync)];
        while self.lookahead() == Token::Comma {
            self.consume();
            names.push(self.ident(resync));
        }
        self.list(NodeKind::IdentList, names)
    }
}
