//! Chunk, blocks, and statements.

use crate::diagnostics::DiagnosticKind;
use crate::parser::BareExpressionPolicy;
use crate::parser::core::{CompletedMarker, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::GARBAGE_STATEMENT_FIRST;

impl Parser<'_> {
    /// `chunk = block garbage?`
    pub(crate) fn parse_chunk(&mut self) {
        let m = self.start();
        self.wrap_invalid_chars();
        self.parse_block();
        if !self.eof() {
            self.parse_garbage();
        }
        m.complete(self, SyntaxKind::Chunk);
    }

    /// Whatever the top-level block could not consume. Statement-looking tokens are
    /// reparsed as statements, everything else is taken one token at a time.
    fn parse_garbage(&mut self) {
        let m = self.start();
        self.error(DiagnosticKind::ExpectedStatement);
        while !self.eof() {
            if self.currently_is_one_of(GARBAGE_STATEMENT_FIRST) && self.parse_statement() {
                continue;
            }
            self.bump();
        }
        m.complete(self, SyntaxKind::Garbage);
    }

    pub(crate) fn parse_block(&mut self) {
        let block = self.start();
        let list = self.start();
        if self.enter_recursion() {
            self.parse_statement_list();
            self.exit_recursion();
        }
        list.complete(self, SyntaxKind::StatementList);
        block.complete(self, SyntaxKind::Block);
    }

    /// Statements, each optionally followed by `;`. Stops at the first token that
    /// starts no statement, or right after a `return`.
    fn parse_statement_list(&mut self) {
        loop {
            if self.eat_token(SyntaxKind::Semicolon) {
                continue;
            }
            let is_return = self.currently_is(SyntaxKind::KwReturn);
            if !self.parse_statement() || is_return {
                break;
            }
        }
    }

    /// Returns false without consuming when the current token starts no statement.
    fn parse_statement(&mut self) -> bool {
        match self.current() {
            SyntaxKind::KwDo => self.parse_do_statement(),
            SyntaxKind::KwWhile => self.parse_while_statement(),
            SyntaxKind::KwRepeat => self.parse_repeat_statement(),
            SyntaxKind::KwIf => self.parse_if_statement(),
            SyntaxKind::KwFor => self.parse_for_statement(),
            SyntaxKind::KwFunction => self.parse_function_statement(),
            SyntaxKind::KwLocal => self.parse_local_statement(),
            SyntaxKind::KwBreak => self.parse_keyword_statement(SyntaxKind::BreakStatement),
            SyntaxKind::KwReturn => self.parse_return_statement(),
            SyntaxKind::KwGoto => self.parse_goto_statement(),
            SyntaxKind::DoubleColon => self.parse_label_statement(),
            SyntaxKind::Ident | SyntaxKind::ParenOpen => self.parse_other_statement(),
            _ => return false,
        }
        true
    }

    /// `do block end`
    fn parse_do_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.parse_block();
        self.expect_closing(SyntaxKind::KwEnd, "'do' block started here", keyword);
        m.complete(self, SyntaxKind::DoStatement);
    }

    /// `while expr do block end`
    fn parse_while_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.expect_expr();
        self.expect(SyntaxKind::KwDo);
        self.parse_block();
        self.expect_closing(SyntaxKind::KwEnd, "'while' loop started here", keyword);
        m.complete(self, SyntaxKind::WhileStatement);
    }

    /// `repeat block until expr`
    fn parse_repeat_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.parse_block();
        if self.expect_closing(SyntaxKind::KwUntil, "'repeat' loop started here", keyword) {
            self.expect_expr();
        }
        m.complete(self, SyntaxKind::RepeatStatement);
    }

    /// `if expr then block (elseif expr then block)* (else block)? end`
    fn parse_if_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.expect_expr();
        self.expect(SyntaxKind::KwThen);

        let then_branch = self.start();
        self.parse_block();
        then_branch.complete(self, SyntaxKind::ThenBranch);

        while self.currently_is(SyntaxKind::KwElseif) {
            let branch = self.start();
            self.bump();
            self.expect_expr();
            self.expect(SyntaxKind::KwThen);
            self.parse_block();
            branch.complete(self, SyntaxKind::ElseifBranch);
        }

        if self.currently_is(SyntaxKind::KwElse) {
            let branch = self.start();
            self.bump();
            self.parse_block();
            branch.complete(self, SyntaxKind::ElseBranch);
        }

        self.expect_closing(SyntaxKind::KwEnd, "'if' statement started here", keyword);
        m.complete(self, SyntaxKind::IfStatement);
    }

    /// Numeric or generic `for`. The name list is parsed before the kind is known:
    /// more than one name or a following `in` makes it a range loop.
    fn parse_for_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();

        let names = self.start();
        let count = self.parse_names();
        let kind = if count > 1 || self.currently_is(SyntaxKind::KwIn) {
            names.complete(self, SyntaxKind::NameList);
            self.expect(SyntaxKind::KwIn);
            self.expect_expression_list();
            SyntaxKind::RangeForStatement
        } else {
            names.abandon(self);
            self.expect(SyntaxKind::Equals);
            self.expect_expr();
            self.expect(SyntaxKind::Comma);
            self.expect_expr();
            if self.eat_token(SyntaxKind::Comma) {
                self.expect_expr();
            }
            SyntaxKind::SimpleForStatement
        };

        self.expect(SyntaxKind::KwDo);
        self.parse_block();
        self.expect_closing(SyntaxKind::KwEnd, "'for' loop started here", keyword);
        m.complete(self, kind);
    }

    /// `name (',' name)*` as declarations. Returns how many names were parsed.
    fn parse_names(&mut self) -> usize {
        if !self.currently_is(SyntaxKind::Ident) {
            self.expect(SyntaxKind::Ident);
            return 0;
        }
        self.parse_name();
        let mut count = 1;
        while self.eat_token(SyntaxKind::Comma) {
            if !self.currently_is(SyntaxKind::Ident) {
                self.expect(SyntaxKind::Ident);
                break;
            }
            self.parse_name();
            count += 1;
        }
        count
    }

    /// `function funcname body`
    fn parse_function_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.parse_function_name();
        self.parse_function_body(keyword);
        m.complete(self, SyntaxKind::FunctionDefinitionStatement);
    }

    /// `name ('.' name)* (':' name)?`. A plain name declares; a dotted path refers
    /// to an existing table.
    fn parse_function_name(&mut self) {
        let m = self.start();
        if !self.currently_is(SyntaxKind::Ident) {
            self.expect(SyntaxKind::Ident);
            m.complete(self, SyntaxKind::FunctionName);
            return;
        }

        if matches!(self.nth(1), SyntaxKind::Dot | SyntaxKind::Colon) {
            self.parse_name_ref();
        } else {
            self.parse_name();
        }

        while self.eat_token(SyntaxKind::Dot) {
            self.expect(SyntaxKind::Ident);
        }
        if self.eat_token(SyntaxKind::Colon) {
            self.expect(SyntaxKind::Ident);
        }
        m.complete(self, SyntaxKind::FunctionName);
    }

    /// One token past `local` decides between a function and a name list.
    fn parse_local_statement(&mut self) {
        let m = self.start();
        let keyword = self.current_span();
        self.bump();

        if self.eat_token(SyntaxKind::KwFunction) {
            if self.currently_is(SyntaxKind::Ident) {
                self.parse_name();
            } else {
                self.expect(SyntaxKind::Ident);
            }
            self.parse_function_body(keyword);
            m.complete(self, SyntaxKind::LocalFunctionStatement);
            return;
        }

        let names = self.start();
        self.parse_names();
        names.complete(self, SyntaxKind::NameList);
        if self.eat_token(SyntaxKind::Equals) {
            self.expect_expression_list();
        }
        m.complete(self, SyntaxKind::LocalNameStatement);
    }

    fn parse_keyword_statement(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.bump();
        m.complete(self, kind);
    }

    /// `return exprlist? ';'?`
    fn parse_return_statement(&mut self) {
        let m = self.start();
        self.bump();
        self.parse_expression_list();
        self.eat_token(SyntaxKind::Semicolon);
        m.complete(self, SyntaxKind::ReturnStatement);
    }

    /// `goto name`
    fn parse_goto_statement(&mut self) {
        let m = self.start();
        self.bump();
        self.expect(SyntaxKind::Ident);
        m.complete(self, SyntaxKind::GotoStatement);
    }

    /// `:: name ::`
    fn parse_label_statement(&mut self) {
        let m = self.start();
        self.bump();
        self.expect(SyntaxKind::Ident);
        self.expect(SyntaxKind::DoubleColon);
        m.complete(self, SyntaxKind::LabelStatement);
    }

    /// Call statement, assignment, or bare expression.
    ///
    /// The leading prefix chain is parsed once. A chain ending in a call and not
    /// followed by `=` or `,` is a call statement; a following `=` or `,` makes it the
    /// first assignment target. Otherwise the chain becomes the leftmost operand of a
    /// bare expression.
    fn parse_other_statement(&mut self) {
        let m = self.start();
        let list = self.start();
        let first = self.parse_prefix_expression();

        if let Some(chain) = first
            && chain.kind() == SyntaxKind::CallExpression
            && !self.currently_is(SyntaxKind::Equals)
            && !self.currently_is(SyntaxKind::Comma)
        {
            list.abandon(self);
            m.complete(self, SyntaxKind::CallStatement);
            return;
        }

        if let Some(chain) = first
            && (self.currently_is(SyntaxKind::Equals)
                || self.currently_is(SyntaxKind::Comma)
                || self.bare_expressions == BareExpressionPolicy::RequireAssignment)
        {
            self.complete_variable(chain);
            self.parse_variables();
            list.complete(self, SyntaxKind::VariableList);
            self.expect(SyntaxKind::Equals);
            self.expect_expression_list();
            m.complete(self, SyntaxKind::AssignmentStatement);
            return;
        }

        if self.parse_expr_from(first).is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        while self.eat_token(SyntaxKind::Comma) {
            self.expect_expr();
        }
        let list = list.complete(self, SyntaxKind::ExpressionList);
        let range = list.range(self);
        self.error_at(DiagnosticKind::BareExpression, range);
        m.complete(self, SyntaxKind::ExpressionStatement);
    }

    /// Wraps a parsed prefix chain as an assignment target; calls cannot be assigned.
    fn complete_variable(&mut self, target: CompletedMarker) {
        if target.kind() == SyntaxKind::CallExpression {
            let range = target.range(self);
            self.error_at(DiagnosticKind::InvalidAssignmentTarget, range);
        }
        let variable = target.precede(self);
        variable.complete(self, SyntaxKind::Variable);
    }

    /// `(',' var)*` after the first assignment target.
    fn parse_variables(&mut self) {
        while self.eat_token(SyntaxKind::Comma) {
            let Some(target) = self.parse_prefix_expression() else {
                self.expect(SyntaxKind::Ident);
                break;
            };
            self.complete_variable(target);
        }
    }
}
