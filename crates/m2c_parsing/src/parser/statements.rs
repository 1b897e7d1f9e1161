//! Statements

use super::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::production::Production;
use crate::token_sets::resync;
use m2c_ast::{NodeId, NodeKind};
use m2c_capabilities::Capability;
use m2c_tokens::{token_set, Token};

impl Parser<'_> {
    /// statementSequence := statement (';' statement)*
    ///
    /// A missing `;` between two statements is reported and parsing goes on
    /// as if it were there.
    pub(super) fn statement_sequence(&mut self) -> NodeId {
        self.enter(Production::StatementSequence);
        let first = self.first(Production::Statement);
        let follow = self.follow(Production::StatementSequence);
        let mut statements = vec![];
        if self.at(follow.with(Token::EndOfFile)) {
            let position = self.lexer.lookahead_position();
            self.report_style_fault(DiagnosticKind::EmptyStatementSequence, position);
            return self.list(NodeKind::StatementSeq, statements);
        }

        loop {
            if self.at(first) {
                statements.push(self.statement());
            } else {
                let found = self.lookahead();
                self.report_at_lookahead(DiagnosticKind::UnexpectedTokenOfSet {
                    expected: first,
                    found,
                });
                self.skip_to(resync::STATEMENT_OR_END);
                if self.at(first) {
                    continue;
                }
            }
            match self.lookahead() {
                Token::Semicolon => {
                    if !self.separator(follow) {
                        break;
                    }
                }
                found if first.is_element(found) => {
                    self.report_at_lookahead(DiagnosticKind::UnexpectedToken {
                        expected: Token::Semicolon,
                        found,
                    });
                }
                _ => break,
            }
        }
        self.list(NodeKind::StatementSeq, statements)
    }

    /// statement := assignmentOrProcCall | ifStatement | caseStatement | whileStatement
    /// | repeatStatement | loopStatement | forStatement | withStatement | toDoStatement
    /// | returnStatement | EXIT
    pub(super) fn statement(&mut self) -> NodeId {
        self.enter(Production::Statement);
        match self.lookahead() {
            Token::Identifier => self.assignment_or_proc_call(),
            Token::If => self.if_statement(),
            Token::Case => self.case_statement(),
            Token::While => self.while_statement(),
            Token::Repeat => self.repeat_statement(),
            Token::Loop => self.loop_statement(),
            Token::For => self.for_statement(),
            Token::With => self.with_statement(),
            Token::To => self.to_do_statement(),
            Token::Return => self.return_statement(),
            Token::Exit => {
                self.require(Capability::LoopStatement);
                self.consume();
                self.node(NodeKind::Exit, [])
            }
            _ => self.unreachable_dispatch(Production::Statement),
        }
    }

    /// assignmentOrProcCall := designator (':=' expression | '++' | '--' | actualParameters)?
    pub(super) fn assignment_or_proc_call(&mut self) -> NodeId {
        self.enter(Production::AssignmentOrProcCall);
        let target = self.designator();
        match self.lookahead() {
            Token::Assign => {
                self.consume();
                let value = self.expression();
                self.node(NodeKind::Assignment, [target, value])
            }
            Token::PlusPlus => {
                self.require(Capability::PostfixIncDec);
                self.consume();
                self.node(NodeKind::Increment, [target])
            }
            Token::MinusMinus => {
                self.require(Capability::PostfixIncDec);
                self.consume();
                self.node(NodeKind::Decrement, [target])
            }
            Token::LParen => {
                let arguments = self.actual_parameters();
                self.node(NodeKind::ProcCall, [target, arguments])
            }
            _ => self.node(NodeKind::ProcCall, [target, NodeId::EMPTY]),
        }
    }

    /// returnStatement := RETURN expression?
    pub(super) fn return_statement(&mut self) -> NodeId {
        self.enter(Production::ReturnStatement);
        self.consume();
        let value = if self.at(self.first(Production::Expression)) {
            self.expression()
        } else {
            NodeId::EMPTY
        };
        self.node(NodeKind::Return, [value])
    }

    /// ifStatement := IF expression THEN statementSequence
    /// (ELSIF expression THEN statementSequence)* (ELSE statementSequence)? END
    pub(super) fn if_statement(&mut self) -> NodeId {
        self.enter(Production::IfStatement);
        self.consume();
        let condition = self.expression();
        self.expect(Token::Then, resync::STATEMENT_OR_END.with(Token::Identifier));
        let then = self.statement_sequence();

        let mut branches = vec![];
        while self.lookahead() == Token::Elsif {
            self.consume();
            let condition = self.expression();
            self.expect(Token::Then, resync::STATEMENT_OR_END.with(Token::Identifier));
            let body = self.statement_sequence();
            branches.push(self.node(NodeKind::Elsif, [condition, body]));
        }
        let branches = self.list(NodeKind::ElsifList, branches);

        let otherwise = self.else_branch();
        self.expect(Token::End, self.follow(Production::IfStatement));
        self.node(NodeKind::If, [condition, then, branches, otherwise])
    }

    fn else_branch(&mut self) -> NodeId {
        if self.lookahead() == Token::Else {
            self.consume();
            self.statement_sequence()
        } else {
            NodeId::EMPTY
        }
    }

    /// caseStatement := CASE expression OF case ('|' case)* (ELSE statementSequence)? END
    pub(super) fn case_statement(&mut self) -> NodeId {
        self.enter(Production::CaseStatement);
        self.consume();
        let selector = self.expression();
        self.expect(Token::Of, self.first(Production::Case).union(token_set![Bar, Else, End]));
        let first = self.first(Production::Case);
        let mut cases = vec![];
        loop {
            if self.at(first) {
                cases.push(self.case());
            }
            if self.lookahead() != Token::Bar {
                break;
            }
            self.consume();
        }
        let cases = self.list(NodeKind::CaseList, cases);
        let otherwise = self.else_branch();
        self.expect(Token::End, self.follow(Production::CaseStatement));
        self.node(NodeKind::CaseStatement, [selector, cases, otherwise])
    }

    /// case := caseLabelList ':' statementSequence
    pub(super) fn case(&mut self) -> NodeId {
        self.enter(Production::Case);
        let labels = self.case_label_list();
        self.expect(Token::Colon, resync::STATEMENT_OR_END.with(Token::Identifier));
        let body = self.statement_sequence();
        self.node(NodeKind::CaseBranch, [labels, body])
    }

    /// whileStatement := WHILE expression DO statementSequence END
    pub(super) fn while_statement(&mut self) -> NodeId {
        self.enter(Production::WhileStatement);
        self.consume();
        let condition = self.expression();
        self.expect(Token::Do, resync::STATEMENT_OR_END.with(Token::Identifier));
        let body = self.statement_sequence();
        self.expect(Token::End, self.follow(Production::WhileStatement));
        self.node(NodeKind::While, [condition, body])
    }

    /// repeatStatement := REPEAT statementSequence UNTIL expression
    pub(super) fn repeat_statement(&mut self) -> NodeId {
        self.enter(Production::RepeatStatement);
        self.consume();
        let body = self.statement_sequence();
        self.expect(Token::Until, self.first(Production::Expression));
        let condition = self.expression();
        self.node(NodeKind::Repeat, [body, condition])
    }

    /// loopStatement := LOOP statementSequence END
    pub(super) fn loop_statement(&mut self) -> NodeId {
        self.enter(Production::LoopStatement);
        self.require(Capability::LoopStatement);
        self.consume();
        let body = self.statement_sequence();
        self.expect(Token::End, self.follow(Production::LoopStatement));
        self.node(NodeKind::Loop, [body])
    }

    /// forStatement := FOR ident ':=' expression TO expression (BY constExpression)?
    /// DO statementSequence END
    pub(super) fn for_statement(&mut self) -> NodeId {
        self.enter(Production::ForStatement);
        self.consume();
        let expression_first = self.first(Production::Expression);
        let control = self.ident(token_set![Assign]);
        self.expect(Token::Assign, expression_first);
        let from = self.expression();
        self.expect(Token::To, expression_first);
        let to = self.expression();
        let step = if self.lookahead() == Token::By {
            self.consume();
            self.const_expression()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::Do, resync::STATEMENT_OR_END.with(Token::Identifier));
        let body = self.statement_sequence();
        self.expect(Token::End, self.follow(Production::ForStatement));
        self.node(NodeKind::For, [control, from, to, step, body])
    }

    /// withStatement := WITH designator DO statementSequence END
    pub(super) fn with_statement(&mut self) -> NodeId {
        self.enter(Production::WithStatement);
        self.require(Capability::WithStatement);
        self.consume();
        let record = if self.match_token(Token::Identifier, token_set![Do]) {
            self.designator()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::Do, resync::STATEMENT_OR_END.with(Token::Identifier));
        let body = self.statement_sequence();
        self.expect(Token::End, self.follow(Production::WithStatement));
        self.node(NodeKind::With, [record, body])
    }

    /// toDoStatement := TO DO trackingRef? taskToDo (';' taskToDo)* END
    pub(super) fn to_do_statement(&mut self) -> NodeId {
        self.enter(Production::ToDoStatement);
        self.require(Capability::ToDoStatement);
        self.consume();
        self.expect(Token::Do, token_set![LParen, StringLiteral, End]);
        let tracking = if self.lookahead() == Token::LParen {
            self.tracking_ref()
        } else {
            NodeId::EMPTY
        };

        let follow = self.follow(Production::TaskToDo);
        let mut tasks = vec![self.task_to_do()];
        while self.lookahead() == Token::Semicolon && self.separator(follow) {
            tasks.push(self.task_to_do());
        }
        let tasks = self.list(NodeKind::TaskList, tasks);
        self.expect(Token::End, self.follow(Production::ToDoStatement));
        self.node(NodeKind::ToDo, [tracking, tasks])
    }

    /// trackingRef := '(' constExpression (',' constExpression)? ')'
    pub(super) fn tracking_ref(&mut self) -> NodeId {
        self.enter(Production::TrackingRef);
        self.consume();
        let issue = self.const_expression();
        let weight = if self.lookahead() == Token::Comma {
            self.consume();
            self.const_expression()
        } else {
            NodeId::EMPTY
        };
        self.expect(Token::RParen, self.follow(Production::TrackingRef));
        self.node(NodeKind::TrackingRef, [issue, weight])
    }

    /// taskToDo := StringLiteral (',' constExpression)?
    pub(super) fn task_to_do(&mut self) -> NodeId {
        self.enter(Production::TaskToDo);
        if !self.match_token(Token::StringLiteral, self.follow(Production::TaskToDo)) {
            return NodeId::EMPTY;
        }
        self.consume();
        let description = self.current_terminal(NodeKind::StringValue);
        let estimate = if self.lookahead() == Token::Comma {
            self.consume();
            self.const_expression()
        } else {
            NodeId::EMPTY
        };
        self.node(NodeKind::Task, [description, estimate])
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::tests::{kinds, run};
    use m2c_capabilities::{Capabilities, Capability, Dialect};
    use m2c_tokens::Token;
    use test_log::test;

    fn pim() -> Capabilities {
        Capabilities::new(Dialect::Pim4)
    }

    fn ext() -> Capabilities {
        Capabilities::new(Dialect::Extended)
    }

    #[test]
    fn test_assignment_and_calls() {
        let (dump, diagnostics) = run(&pim(), "x := 1; Write(x); Halt", |p| p.statement_sequence());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert_eq!(
            dump,
            "\
(StatementSeq
  (Assignment
    (Ident \"x\")
    (IntValue \"1\"))
  (ProcCall
    (Ident \"Write\")
    (ActualParams
      (Ident \"x\")))
  (ProcCall
    (Ident \"Halt\")
    -))"
        );
    }

    #[test]
    fn test_if_elsif_else() {
        let (dump, diagnostics) = run(
            &pim(),
            "IF a THEN x := 1 ELSIF b THEN x := 2 ELSIF c THEN x := 3 ELSE x := 4 END",
            |p| p.statement(),
        );
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert!(dump.starts_with("(If\n  (Ident \"a\")"));
        assert_eq!(dump.matches("(Elsif").count(), 2);
    }

    #[test]
    fn test_loops() {
        let text = "WHILE i < 10 DO INC(i) END;
            REPEAT DEC(i) UNTIL i = 0;
            FOR i := 1 TO 10 BY 2 DO s := s + i END;
            LOOP EXIT END";
        let (dump, diagnostics) = run(&pim(), text, |p| p.statement_sequence());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        for kind in ["(While", "(Repeat", "(For", "(Loop", "(Exit)"] {
            assert!(dump.contains(kind), "{kind} in {dump}");
        }
    }

    #[test]
    fn test_case_statement() {
        let text = "CASE c OF 'a' .. 'z': Lower | '0', '1': Digit | ELSE Other END";
        let (dump, diagnostics) = run(&pim(), text, |p| p.statement());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert_eq!(dump.matches("(CaseBranch").count(), 2);
        assert!(dump.contains("(Range"));
    }

    #[test]
    fn test_missing_semicolon() {
        let (dump, diagnostics) = run(&pim(), "x := 1 y := 2", |p| p.statement_sequence());
        assert_eq!(
            kinds(&diagnostics),
            [DiagnosticKind::UnexpectedToken {
                expected: Token::Semicolon,
                found: Token::Identifier
            }]
        );
        assert_eq!(dump.matches("(Assignment").count(), 2);
    }

    #[test]
    fn test_empty_statement_sequence() {
        let (dump, diagnostics) = run(&pim(), "END", |p| p.statement_sequence());
        assert_eq!(dump, "(StatementSeq)");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::EmptyStatementSequence]);
        assert_eq!(diagnostics.error_count(), 0);
    }

    #[test]
    fn test_garbage_statement_resyncs() {
        let (dump, diagnostics) = run(&pim(), "x := 1; ) ] ; IF a THEN END", |p| {
            p.statement_sequence()
        });
        assert_eq!(diagnostics.error_count(), 1);
        assert!(dump.contains("(If"));
    }

    #[test]
    fn test_postfix_increment() {
        let (dump, diagnostics) = run(&ext(), "i++; j--", |p| p.statement_sequence());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert!(dump.contains("(Increment"));
        assert!(dump.contains("(Decrement"));
    }

    #[test]
    fn test_with_statement_is_dialect_dependent() {
        let text = "WITH r DO x := 1 END";
        let (_, diagnostics) = run(&pim(), text, |p| p.statement());
        assert!(diagnostics.is_empty());
        let (dump, diagnostics) = run(&ext(), text, |p| p.statement());
        assert_eq!(
            kinds(&diagnostics),
            [DiagnosticKind::CapabilityDisabled {
                capability: Capability::WithStatement
            }]
        );
        assert!(dump.starts_with("(With"));
    }

    #[test]
    fn test_to_do_statement() {
        let text = "TO DO (1234, 2) \"write tests\", 3; \"document\" END";
        let (dump, diagnostics) = run(&ext(), text, |p| p.statement());
        assert!(diagnostics.is_empty(), "{:?}", kinds(&diagnostics));
        assert_eq!(
            dump,
            "\
(ToDo
  (TrackingRef
    (IntValue \"1234\")
    (IntValue \"2\"))
  (TaskList
    (Task
      (StringValue \"\\\"write tests\\\"\")
      (IntValue \"3\"))
    (Task
      (StringValue \"\\\"document\\\"\")
      -)))"
        );
    }
}
