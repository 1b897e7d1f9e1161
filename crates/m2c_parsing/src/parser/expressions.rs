//! Expressions and designators

use super::Parser;
use crate::production::Production;
use m2c_ast::{NodeId, NodeKind};
use m2c_tokens::Token;

fn relation(token: Token) -> Option<NodeKind> {
    Some(match token {
        Token::Equal => NodeKind::Eq,
        Token::NotEqual => NodeKind::Neq,
        Token::Less => NodeKind::Lt,
        Token::LessEqual => NodeKind::LtEq,
        Token::Greater => NodeKind::Gt,
        Token::GreaterEqual => NodeKind::GtEq,
        Token::In => NodeKind::In,
        _ => return None,
    })
}

fn adding_operator(token: Token) -> Option<NodeKind> {
    Some(match token {
        Token::Plus => NodeKind::Add,
        Token::Minus => NodeKind::Sub,
        Token::Or => NodeKind::Or,
        _ => return None,
    })
}

fn multiplying_operator(token: Token) -> Option<NodeKind> {
    Some(match token {
        Token::Asterisk => NodeKind::Mul,
        Token::Solidus => NodeKind::RealDiv,
        Token::Div => NodeKind::IntDiv,
        Token::Mod => NodeKind::Mod,
        Token::And => NodeKind::And,
        Token::Backslash => NodeKind::SetDiff,
        _ => return None,
    })
}

impl Parser<'_> {
    /// designator := ident selector*
    pub(super) fn designator(&mut self) -> NodeId {
        self.enter(Production::Designator);
        let mut designator = self.ident(self.follow(Production::Designator));
        while self.at(self.first(Production::Selector)) {
            designator = self.selector(designator);
        }
        designator
    }

    /// selector := '.' ident | '[' expressionList ']' | '^'
    pub(super) fn selector(&mut self, base: NodeId) -> NodeId {
        self.enter(Production::Selector);
        let follow = self.follow(Production::Selector);
        match self.lookahead() {
            Token::Period => {
                self.consume();
                let field = self.ident(follow);
                self.node(NodeKind::FieldSelect, [base, field])
            }
            Token::LBracket => {
                self.consume();
                let indices = self.expression_list();
                self.expect(Token::RBracket, follow);
                self.node(NodeKind::Index, [base, indices])
            }
            Token::Deref => {
                self.consume();
                self.node(NodeKind::Deref, [base])
            }
            _ => self.unreachable_dispatch(Production::Selector),
        }
    }

    /// actualParameters := '(' expressionList? ')'
    pub(super) fn actual_parameters(&mut self) -> NodeId {
        self.enter(Production::ActualParameters);
        self.consume();
        let arguments = if self.at(self.first(Production::ExpressionList)) {
            self.expressions()
        } else {
            vec![]
        };
        self.expect(Token::RParen, self.follow(Production::ActualParameters));
        self.list(NodeKind::ActualParams, arguments)
    }

    /// expressionList := expression (',' expression)*
    pub(super) fn expression_list(&mut self) -> NodeId {
        self.enter(Production::ExpressionList);
        let expressions = self.expressions();
        self.list(NodeKind::ExprList, expressions)
    }

    fn expressions(&mut self) -> Vec<NodeId> {
        let mut expressions = vec![self.expression()];
        while self.lookahead() == Token::Comma {
            self.consume();
            expressions.push(self.expression());
        }
        expressions
    }

    pub(super) fn const_expression(&mut self) -> NodeId {
        self.enter(Production::ConstExpression);
        self.expression()
    }

    /// expression := simpleExpression (relation simpleExpression)?
    pub(super) fn expression(&mut self) -> NodeId {
        self.enter(Production::Expression);
        let left = self.simple_expression();
        match relation(self.lookahead()) {
            Some(kind) => {
                self.consume();
                let right = self.simple_expression();
                self.node(kind, [left, right])
            }
            None => left,
        }
    }

    /// simpleExpression := ('+' | '-')? term (('+' | '-' | OR) term)*
    pub(super) fn simple_expression(&mut self) -> NodeId {
        self.enter(Production::SimpleExpression);
        let mut left = match self.lookahead() {
            Token::Plus => {
                self.consume();
                self.term()
            }
            Token::Minus => {
                self.consume();
                let operand = self.term();
                self.node(NodeKind::Neg, [operand])
            }
            _ => self.term(),
        };
        while let Some(kind) = adding_operator(self.lookahead()) {
            self.consume();
            let right = self.term();
            left = self.node(kind, [left, right]);
        }
        left
    }

    /// term := factor (('*' | '/' | DIV | MOD | AND | '\') factor)*
    pub(super) fn term(&mut self) -> NodeId {
        self.enter(Production::Term);
        let mut left = self.factor();
        while let Some(kind) = multiplying_operator(self.lookahead()) {
            self.consume();
            let right = self.factor();
            left = self.node(kind, [left, right]);
        }
        left
    }

    /// factor := IntLiteral | RealLiteral | CharLiteral | StringLiteral | setValue
    /// | designator (actualParameters | setValue)? | '(' expression ')' | NOT factor
    pub(super) fn factor(&mut self) -> NodeId {
        self.enter(Production::Factor);
        let follow = self.follow(Production::Factor);
        let literal = match self.lookahead() {
            Token::IntLiteral => Some(NodeKind::IntValue),
            Token::RealLiteral => Some(NodeKind::RealValue),
            Token::CharLiteral => Some(NodeKind::CharValue),
            Token::StringLiteral => Some(NodeKind::StringValue),
            // already reported by the lexer
            Token::MalformedInteger | Token::MalformedReal | Token::MalformedString => {
                self.consume();
                return NodeId::EMPTY;
            }
            _ => None,
        };
        if let Some(kind) = literal {
            self.consume();
            return self.current_terminal(kind);
        }

        if !self.match_set(self.first(Production::Factor), follow) {
            return NodeId::EMPTY;
        }
        match self.lookahead() {
            Token::LBrace => self.set_value(),
            Token::Identifier => {
                let designator = self.designator();
                match self.lookahead() {
                    Token::LParen => {
                        let arguments = self.actual_parameters();
                        self.node(NodeKind::FunctionCall, [designator, arguments])
                    }
                    Token::LBrace => {
                        let set = self.set_value();
                        self.splice_type(set, designator)
                    }
                    _ => designator,
                }
            }
            Token::LParen => {
                self.consume();
                let inner = self.expression();
                self.expect(Token::RParen, follow);
                inner
            }
            Token::Not => {
                self.consume();
                let operand = self.factor();
                self.node(NodeKind::Not, [operand])
            }
            _ => self.unreachable_dispatch(Production::Factor),
        }
    }

    /// setValue := '{' (element (',' element)*)? '}'
    ///
    /// The type slot is left empty for [`Self::factor`] to fill in.
    pub(super) fn set_value(&mut self) -> NodeId {
        self.enter(Production::SetValue);
        self.consume();
        let mut elements = vec![];
        if self.at(self.first(Production::Element)) {
            elements.push(self.element());
            while self.lookahead() == Token::Comma {
                self.consume();
                elements.push(self.element());
            }
        }
        let elements = self.list(NodeKind::ExprList, elements);
        self.expect(Token::RBrace, self.follow(Production::SetValue));
        self.node(NodeKind::SetValue, [NodeId::EMPTY, elements])
    }

    /// element := expression ('..' expression)?
    pub(super) fn element(&mut self) -> NodeId {
        self.enter(Production::Element);
        let low = self.expression();
        if self.lookahead() == Token::Range {
            self.consume();
            let high = self.expression();
            self.node(NodeKind::Range, [low, high])
        } else {
            low
        }
    }

    /// qualident := ident ('.' ident)*
    pub(super) fn qualident(&mut self) -> NodeId {
        self.enter(Production::Qualident);
        let follow = self.follow(Production::Qualident);
        let mut names = vec![self.ident(follow.with(Token::Period))];
        while self.lookahead() == Token::Period {
            self.consume();
            names.push(self.ident(follow.with(Token::Period)));
        }
        self.list(NodeKind::Qualident, names)
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::tests::{kinds, run};
    use m2c_capabilities::{Capabilities, Dialect};
    use test_log::test;

    fn pim() -> Capabilities {
        Capabilities::new(Dialect::Pim4)
    }

    fn expression(capabilities: &Capabilities, text: &str) -> String {
        let (dump, diagnostics) = run(capabilities, text, |p| p.expression());
        assert!(diagnostics.is_empty(), "{text}: {:?}", kinds(&diagnostics));
        dump
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expression(&pim(), "a + b * c = d"),
            "\
(Eq
  (Add
    (Ident \"a\")
    (Mul
      (Ident \"b\")
      (Ident \"c\")))
  (Ident \"d\"))"
        );
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(
            expression(&pim(), "-x + 1"),
            "\
(Add
  (Neg
    (Ident \"x\"))
  (IntValue \"1\"))"
        );
        assert_eq!(expression(&pim(), "NOT ~ok"), "(Not\n  (Not\n    (Ident \"ok\")))");
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(
            expression(&pim(), "a & b"),
            expression(&pim(), "a AND b")
        );
        assert_eq!(expression(&pim(), "a <> b"), expression(&pim(), "a # b"));
    }

    #[test]
    fn test_designators() {
        assert_eq!(
            expression(&pim(), "p^.next[i, j]"),
            "\
(Index
  (FieldSelect
    (Deref
      (Ident \"p\"))
    (Ident \"next\"))
  (ExprList
    (Ident \"i\")
    (Ident \"j\")))"
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            expression(&pim(), "Max(a, 2)"),
            "\
(FunctionCall
  (Ident \"Max\")
  (ActualParams
    (Ident \"a\")
    (IntValue \"2\")))"
        );
        assert_eq!(
            expression(&pim(), "Random()"),
            "(FunctionCall\n  (Ident \"Random\")\n  (ActualParams))"
        );
    }

    #[test]
    fn test_set_values() {
        assert_eq!(
            expression(&pim(), "{1, 3 .. 5}"),
            "\
(SetValue
  -
  (ExprList
    (IntValue \"1\")
    (Range
      (IntValue \"3\")
      (IntValue \"5\"))))"
        );
        assert_eq!(
            expression(&pim(), "CharSet{}"),
            "(SetValue\n  (Ident \"CharSet\")\n  (ExprList))"
        );
    }

    #[test]
    fn test_set_difference() {
        let extended = Capabilities::new(Dialect::Extended);
        assert_eq!(
            expression(&extended, "a \\ b"),
            "(SetDiff\n  (Ident \"a\")\n  (Ident \"b\"))"
        );
    }

    #[test]
    fn test_literals_keep_their_text() {
        assert_eq!(expression(&pim(), "0FFH"), "(IntValue \"0FFH\")");
        assert_eq!(expression(&pim(), "1.5E3"), "(RealValue \"1.5E3\")");
        assert_eq!(expression(&pim(), "101C"), "(CharValue \"101C\")");
    }

    #[test]
    fn test_malformed_literal_is_reported_once() {
        let (dump, diagnostics) = run(&pim(), "1F + 2", |p| p.expression());
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::MalformedInteger]);
        assert!(dump.starts_with("(Add\n  -"));
    }

    #[test]
    fn test_missing_operand() {
        let (dump, diagnostics) = run(&pim(), "a + ;", |p| p.expression());
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(dump, "(Add\n  (Ident \"a\")\n  -)");
    }
}
