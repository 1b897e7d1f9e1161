//! Type constructors

use super::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::production::Production;
use crate::token_sets::resync;
use m2c_ast::{NodeId, NodeKind};
use m2c_capabilities::Capability;
use m2c_tokens::Token;

impl Parser<'_> {
    /// type := simpleType | arrayType | recordType | setType | pointerType | procedureType
    pub(super) fn type_(&mut self) -> NodeId {
        self.enter(Production::Type);
        let follow = self.follow(Production::Type);
        if !self.match_set(self.first(Production::Type), follow) {
            return NodeId::EMPTY;
        }
        match self.lookahead() {
            Token::Identifier | Token::LBracket | Token::LParen => self.simple_type(),
            Token::Array => self.array_type(),
            Token::Record => self.record_type(),
            Token::Set => self.set_type(),
            Token::Pointer => self.pointer_type(),
            Token::Procedure => self.procedure_type(),
            _ => self.unreachable_dispatch(Production::Type),
        }
    }

    /// simpleType := qualident subrange? | subrange | enumeration
    pub(super) fn simple_type(&mut self) -> NodeId {
        self.enter(Production::SimpleType);
        let follow = self.follow(Production::SimpleType);
        if !self.match_set(self.first(Production::SimpleType), follow) {
            return NodeId::EMPTY;
        }
        match self.lookahead() {
            Token::Identifier => {
                let name = self.qualident();
                if self.lookahead() == Token::LBracket {
                    let range = self.subrange();
                    self.splice_type(range, name)
                } else {
                    name
                }
            }
            Token::LBracket => self.subrange(),
            Token::LParen => self.enumeration(),
            _ => self.unreachable_dispatch(Production::SimpleType),
        }
    }

    /// subrange := '[' constExpression '..' constExpression ']'
    ///
    /// The type slot is left empty for [`Self::simple_type`] to fill in.
    pub(super) fn subrange(&mut self) -> NodeId {
        self.enter(Production::Subrange);
        self.consume();
        let follow = self.follow(Production::Subrange);
        let low = self.const_expression();
        self.expect(Token::Range, follow.union(self.first(Production::ConstExpression)));
        let high = self.const_expression();
        self.expect(Token::RBracket, follow);
        self.node(NodeKind::Subrange, [NodeId::EMPTY, low, high])
    }

    /// enumeration := '(' identList ')'
    pub(super) fn enumeration(&mut self) -> NodeId {
        self.enter(Production::Enumeration);
        self.consume();
        let values = self.ident_list();
        self.expect(Token::RParen, self.follow(Production::Enumeration));
        self.node(NodeKind::Enumeration, [values])
    }

    /// arrayType := ARRAY simpleType (',' simpleType)* OF type
    pub(super) fn array_type(&mut self) -> NodeId {
        self.enter(Production::ArrayType);
        self.consume();
        let mut indices = vec![self.simple_type()];
        while self.lookahead() == Token::Comma {
            self.consume();
            indices.push(self.simple_type());
        }
        let indices = self.list(NodeKind::IndexTypes, indices);
        self.expect(Token::Of, resync::TYPE_OR_SEMICOLON);
        let element = self.type_();
        self.node(NodeKind::ArrayType, [indices, element])
    }

    /// recordType := RECORD ('(' qualident ')')? fieldListSequence END
    pub(super) fn record_type(&mut self) -> NodeId {
        self.enter(Production::RecordType);
        self.consume();
        let base = if self.lookahead() == Token::LParen {
            self.require(Capability::ExtensibleRecords);
            self.consume();
            let base = if self.match_token(Token::Identifier, resync::FIELD_LIST_OR_END.with(Token::RParen)) {
                self.qualident()
            } else {
                NodeId::EMPTY
            };
            self.expect(Token::RParen, resync::FIELD_LIST_OR_END);
            base
        } else {
            NodeId::EMPTY
        };
        let fields = self.field_list_sequence();
        self.expect(Token::End, self.follow(Production::RecordType));
        self.node(NodeKind::RecordType, [base, fields])
    }

    /// fieldListSequence := fieldList (';' fieldList)*
    pub(super) fn field_list_sequence(&mut self) -> NodeId {
        self.enter(Production::FieldListSequence);
        let first = self.first(Production::FieldList);
        let follow = self.follow(Production::FieldListSequence);
        let mut fields = vec![];
        if !self.at(first) && self.at(follow) {
            let position = self.lexer.lookahead_position();
            self.report_style_fault(DiagnosticKind::EmptyFieldListSequence, position);
            return self.list(NodeKind::FieldListSeq, fields);
        }
        loop {
            fields.push(self.field_list());
            if self.lookahead() != Token::Semicolon || !self.separator(follow) {
                break;
            }
        }
        self.list(NodeKind::FieldListSeq, fields)
    }

    /// fieldList := identList ':' type | variantFieldList | indeterminateField
    ///
    /// Which of the last two is accepted depends on whether variant records are enabled.
    pub(super) fn field_list(&mut self) -> NodeId {
        self.enter(Production::FieldList);
        let first = self.first(Production::FieldList);
        if !self.match_set(first, resync::FIELD_LIST_OR_END) {
            return NodeId::EMPTY;
        }
        match self.lookahead() {
            Token::Identifier => {
                let names = self.ident_list();
                self.expect(Token::Colon, resync::TYPE_OR_SEMICOLON);
                let ty = self.type_();
                self.node(NodeKind::FieldList, [names, ty])
            }
            Token::Case => self.variant_field_list(),
            Token::Plus => self.indeterminate_field(),
            _ => self.unreachable_dispatch(Production::FieldList),
        }
    }

    /// variantFieldList := CASE ident? ':' qualident OF variant ('|' variant)*
    /// (ELSE fieldListSequence)? END
    pub(super) fn variant_field_list(&mut self) -> NodeId {
        self.enter(Production::VariantFieldList);
        self.consume();
        let tag = if self.lookahead() == Token::Identifier {
            self.ident(resync::FIELD_LIST_OR_END)
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::Colon, resync::FIELD_LIST_OR_END.with(Token::Identifier));
        let tag_type = if self.match_token(Token::Identifier, resync::FIELD_LIST_OR_END.with(Token::Of)) {
            self.qualident()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::Of, resync::FIELD_LIST_OR_END);

        let first = self.first(Production::Variant);
        let mut variants = vec![];
        loop {
            if self.at(first) {
                variants.push(self.variant());
            }
            if self.lookahead() != Token::Bar {
                break;
            }
            self.consume();
        }
        let variants = self.list(NodeKind::VariantList, variants);

        let otherwise = if self.lookahead() == Token::Else {
            self.consume();
            self.field_list_sequence()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::End, self.follow(Production::VariantFieldList));
        self.node(
            NodeKind::VariantFieldList,
            [tag, tag_type, variants, otherwise],
        )
    }

    /// variant := caseLabelList ':' fieldListSequence
    pub(super) fn variant(&mut self) -> NodeId {
        self.enter(Production::Variant);
        let labels = self.case_label_list();
        self.expect(Token::Colon, resync::FIELD_LIST_OR_END);
        let fields = self.field_list_sequence();
        self.node(NodeKind::Variant, [labels, fields])
    }

    /// caseLabelList := caseLabels (',' caseLabels)*
    pub(super) fn case_label_list(&mut self) -> NodeId {
        self.enter(Production::CaseLabelList);
        let mut labels = vec![self.case_labels()];
        while self.lookahead() == Token::Comma {
            self.consume();
            labels.push(self.case_labels());
        }
        self.list(NodeKind::CaseLabelList, labels)
    }

    /// caseLabels := constExpression ('..' constExpression)?
    pub(super) fn case_labels(&mut self) -> NodeId {
        self.enter(Production::CaseLabels);
        let low = self.const_expression();
        if self.lookahead() == Token::Range {
            self.consume();
            let high = self.const_expression();
            self.node(NodeKind::Range, [low, high])
        } else {
            low
        }
    }

    /// indeterminateField := '+' ident ':' ARRAY ident OF qualident
    pub(super) fn indeterminate_field(&mut self) -> NodeId {
        self.enter(Production::IndeterminateField);
        self.require(Capability::IndeterminateRecords);
        self.consume();
        let follow = self.follow(Production::IndeterminateField);
        let name = self.ident(follow.with(Token::Colon));
        self.expect(Token::Colon, follow.with(Token::Array));
        self.expect(Token::Array, follow.with(Token::Identifier));
        let discriminant = self.ident(follow.with(Token::Of));
        self.expect(Token::Of, follow.with(Token::Identifier));
        let element = if self.match_token(Token::Identifier, follow) {
            self.qualident()
        } else {
            NodeId::EMPTY
        };
        self.node(
            NodeKind::IndeterminateField,
            [name, discriminant, element],
        )
    }

    /// setType := SET OF simpleType
    pub(super) fn set_type(&mut self) -> NodeId {
        self.enter(Production::SetType);
        self.consume();
        self.expect(Token::Of, self.first(Production::SimpleType));
        let base = self.simple_type();
        self.node(NodeKind::SetType, [base])
    }

    /// pointerType := POINTER TO type
    pub(super) fn pointer_type(&mut self) -> NodeId {
        self.enter(Production::PointerType);
        self.consume();
        self.expect(Token::To, resync::TYPE_OR_SEMICOLON);
        let target = self.type_();
        self.node(NodeKind::PointerType, [target])
    }

    /// procedureType := PROCEDURE formalTypeList?
    pub(super) fn procedure_type(&mut self) -> NodeId {
        self.enter(Production::ProcedureType);
        self.consume();
        let (params, result) = if self.lookahead() == Token::LParen {
            self.formal_type_list()
        } else {
            (NodeId::EMPTY, NodeId::EMPTY)
        };
        self.node(NodeKind::ProcedureType, [params, result])
    }

    /// formalTypeList := '(' ((CONST|VAR)? attributedFormalType
    /// (',' (CONST|VAR)? attributedFormalType)*)? ')' (':' qualident)?
    pub(super) fn formal_type_list(&mut self) -> (NodeId, NodeId) {
        self.enter(Production::FormalTypeList);
        self.consume();
        let follow = self.follow(Production::FormalTypeList);
        let mut items = vec![];
        if self.lookahead() != Token::RParen {
            loop {
                let attribute = self.parameter_attribute();
                let ty = self.attributed_formal_type();
                items.push(self.node(NodeKind::FormalTypeItem, [attribute, ty]));
                if self.lookahead() != Token::Comma {
                    break;
                }
                self.consume();
            }
        }
        let items = self.list(NodeKind::FormalTypeList, items);
        self.expect(Token::RParen, follow.with(Token::Colon));
        let result = self.optional_result(follow);
        (items, result)
    }
}
