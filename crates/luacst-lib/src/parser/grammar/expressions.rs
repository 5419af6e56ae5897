//! Expressions: operator precedence, atoms, prefix chains, tables and functions.
//!
//! Precedence, lowest first:
//!
//! ```text
//! or < and < relational < | < ~ < & < shift < .. < additive < multiplicative
//!    < unary (not # - ~) < ^ < atom
//! ```
//!
//! `..` and `^` are right-associative; every other binary level is left-associative.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{CompletedMarker, Parser};
use crate::parser::cst::token_sets::{
    ADDITIVE_OPS, AND_OPS, BIT_AND_OPS, BIT_OR_OPS, BIT_XOR_OPS, CONCAT_OPS, FIELD_SEPARATORS,
    MULTIPLICATIVE_OPS, NUMBERS, OR_OPS, POWER_OPS, RELATIONAL_OPS, SHIFT_OPS, STRINGS,
    UNARY_OPERATORS,
};
use crate::parser::cst::{SyntaxKind, TokenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// Binary levels below unary, lowest precedence first.
const BINARY_LEVELS: [(TokenSet, Assoc); 10] = [
    (OR_OPS, Assoc::Left),
    (AND_OPS, Assoc::Left),
    (RELATIONAL_OPS, Assoc::Left),
    (BIT_OR_OPS, Assoc::Left),
    (BIT_XOR_OPS, Assoc::Left),
    (BIT_AND_OPS, Assoc::Left),
    (SHIFT_OPS, Assoc::Left),
    (CONCAT_OPS, Assoc::Right),
    (ADDITIVE_OPS, Assoc::Left),
    (MULTIPLICATIVE_OPS, Assoc::Left),
];

impl Parser<'_> {
    /// Parses one expression. Returns `None` without consuming when none starts here.
    pub(crate) fn parse_expr(&mut self) -> Option<CompletedMarker> {
        self.parse_expr_from(None)
    }

    /// Parses one expression whose leftmost operand, when given, has already been
    /// parsed as `operand`.
    pub(crate) fn parse_expr_from(
        &mut self,
        operand: Option<CompletedMarker>,
    ) -> Option<CompletedMarker> {
        if !self.enter_recursion() {
            return None;
        }
        let expr = self.parse_binary(0, operand);
        self.exit_recursion();
        expr
    }

    /// Like `parse_expr`, but reports "expression expected" when nothing was parsed.
    pub(crate) fn expect_expr(&mut self) -> Option<CompletedMarker> {
        let expr = self.parse_expr();
        if expr.is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        expr
    }

    fn parse_binary(
        &mut self,
        level: usize,
        operand: Option<CompletedMarker>,
    ) -> Option<CompletedMarker> {
        let Some(&(ops, assoc)) = BINARY_LEVELS.get(level) else {
            return self.parse_unary(operand);
        };

        let mut lhs = self.parse_binary(level + 1, operand)?;

        while self.currently_is_one_of(ops) {
            let m = lhs.precede(self);
            self.bump_operator(SyntaxKind::BinaryOperator);

            let rhs = match assoc {
                Assoc::Left => self.parse_binary(level + 1, None),
                Assoc::Right => self.parse_nested(|p| p.parse_binary(level, None)),
            };
            if rhs.is_none() {
                self.error(DiagnosticKind::ExpectedExpression);
            }

            lhs = m.complete(self, SyntaxKind::BinaryExpression);
            if rhs.is_none() || assoc == Assoc::Right {
                break;
            }
        }

        Some(lhs)
    }

    fn parse_unary(&mut self, operand: Option<CompletedMarker>) -> Option<CompletedMarker> {
        if operand.is_some() || !self.currently_is_one_of(UNARY_OPERATORS) {
            return self.parse_power(operand);
        }

        let m = self.start();
        self.bump_operator(SyntaxKind::UnaryOperator);

        if self.parse_nested(|p| p.parse_unary(None)).is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }

        Some(m.complete(self, SyntaxKind::UnaryExpression))
    }

    /// `^` binds tighter than unary on its left but accepts a unary operand on its right,
    /// so `2 ^ -3` parses and `-2 ^ 2` is `-(2 ^ 2)`.
    fn parse_power(&mut self, operand: Option<CompletedMarker>) -> Option<CompletedMarker> {
        let lhs = match operand {
            Some(atom) => atom,
            None => self.parse_atom()?,
        };
        if !self.currently_is_one_of(POWER_OPS) {
            return Some(lhs);
        }

        let m = lhs.precede(self);
        self.bump_operator(SyntaxKind::BinaryOperator);
        if self.parse_nested(|p| p.parse_unary(None)).is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        Some(m.complete(self, SyntaxKind::BinaryExpression))
    }

    /// Runs a self-recursive production under the recursion limit.
    fn parse_nested(
        &mut self,
        production: impl FnOnce(&mut Self) -> Option<CompletedMarker>,
    ) -> Option<CompletedMarker> {
        if !self.enter_recursion() {
            return None;
        }
        let result = production(self);
        self.exit_recursion();
        result
    }

    fn bump_operator(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.bump();
        m.complete(self, kind);
    }

    fn parse_atom(&mut self) -> Option<CompletedMarker> {
        let kind = self.current();
        let literal = match kind {
            SyntaxKind::KwNil => SyntaxKind::NilLiteral,
            SyntaxKind::KwTrue | SyntaxKind::KwFalse => SyntaxKind::BooleanLiteral,
            SyntaxKind::Ellipsis => SyntaxKind::VarargLiteral,
            _ if NUMBERS.contains(kind) => SyntaxKind::NumberLiteral,
            _ if STRINGS.contains(kind) => SyntaxKind::StringLiteral,
            SyntaxKind::BraceOpen => return Some(self.parse_table()),
            SyntaxKind::KwFunction => return Some(self.parse_function_expression()),
            _ => return self.parse_prefix_expression(),
        };

        let m = self.start();
        self.bump();
        Some(m.complete(self, literal))
    }

    /// Name or parenthesized expression followed by any number of `.name`, `:name`,
    /// `[expr]` and argument suffixes. The outermost node kind is that of the last suffix.
    pub(crate) fn parse_prefix_expression(&mut self) -> Option<CompletedMarker> {
        let mut lhs = match self.current() {
            SyntaxKind::Ident => self.parse_name_ref(),
            SyntaxKind::ParenOpen => self.parse_paren_expression(),
            _ => return None,
        };

        loop {
            let kind = self.current();
            lhs = match kind {
                SyntaxKind::Dot => {
                    let m = lhs.precede(self);
                    self.bump();
                    self.expect(SyntaxKind::Ident);
                    m.complete(self, SyntaxKind::IndexExpression)
                }
                SyntaxKind::Colon => {
                    let m = lhs.precede(self);
                    self.bump();
                    let named = self.expect(SyntaxKind::Ident);
                    let method = m.complete(self, SyntaxKind::IndexExpression);
                    // A method reference is only valid as the callee of a call.
                    if named && !self.at_arguments() {
                        self.error_msg(DiagnosticKind::ExpectedToken, "arguments");
                    }
                    method
                }
                SyntaxKind::BracketOpen => {
                    let m = lhs.precede(self);
                    let open = self.current_span();
                    self.bump();
                    self.expect_expr();
                    self.expect_closing(SyntaxKind::BracketClose, "index opened here", open);
                    m.complete(self, SyntaxKind::IndexExpression)
                }
                _ if self.at_arguments() => {
                    let m = lhs.precede(self);
                    self.parse_arguments();
                    m.complete(self, SyntaxKind::CallExpression)
                }
                _ => break,
            };
        }

        Some(lhs)
    }

    fn at_arguments(&self) -> bool {
        let kind = self.current();
        matches!(kind, SyntaxKind::ParenOpen | SyntaxKind::BraceOpen) || STRINGS.contains(kind)
    }

    pub(crate) fn parse_name_ref(&mut self) -> CompletedMarker {
        self.assert_current(SyntaxKind::Ident);
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::NameRef)
    }

    /// Declaration site: local names, parameters, loop variables, function names.
    pub(crate) fn parse_name(&mut self) -> CompletedMarker {
        self.assert_current(SyntaxKind::Ident);
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::Name)
    }

    fn parse_paren_expression(&mut self) -> CompletedMarker {
        let m = self.start();
        let open = self.current_span();
        self.bump();
        self.expect_expr();
        self.expect_closing(SyntaxKind::ParenClose, "'(' opened here", open);
        m.complete(self, SyntaxKind::ParenExpression)
    }

    /// `(exprs)`, a table constructor, or a single string.
    fn parse_arguments(&mut self) {
        let m = self.start();
        let kind = self.current();
        if kind == SyntaxKind::BraceOpen {
            self.parse_table();
        } else if STRINGS.contains(kind) {
            let literal = self.start();
            self.bump();
            literal.complete(self, SyntaxKind::StringLiteral);
        } else {
            let open = self.current_span();
            self.expect(SyntaxKind::ParenOpen);
            if !self.currently_is(SyntaxKind::ParenClose) {
                self.parse_expression_list();
            }
            self.expect_closing(SyntaxKind::ParenClose, "argument list opened here", open);
        }
        m.complete(self, SyntaxKind::ArgumentList);
    }

    /// `expr (',' expr)*`. Returns `None` without consuming when no expression starts here.
    pub(crate) fn parse_expression_list(&mut self) -> Option<CompletedMarker> {
        let m = self.start();
        if self.parse_expr().is_none() {
            m.abandon(self);
            return None;
        }
        while self.eat_token(SyntaxKind::Comma) {
            self.expect_expr();
        }
        Some(m.complete(self, SyntaxKind::ExpressionList))
    }

    /// Like `parse_expression_list`, but reports "expression expected" when empty.
    pub(crate) fn expect_expression_list(&mut self) -> Option<CompletedMarker> {
        let list = self.parse_expression_list();
        if list.is_none() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        list
    }

    fn parse_table(&mut self) -> CompletedMarker {
        self.assert_current(SyntaxKind::BraceOpen);
        let m = self.start();
        let open = self.current_span();
        self.bump();

        while !self.currently_is(SyntaxKind::BraceClose) && !self.eof() {
            if !self.parse_table_field() {
                if !self.currently_is_one_of(FIELD_SEPARATORS) {
                    break;
                }
                self.error(DiagnosticKind::ExpectedExpression);
            }
            if !self.currently_is_one_of(FIELD_SEPARATORS) {
                break;
            }
            let separator = self.start();
            self.bump();
            separator.complete(self, SyntaxKind::TableFieldSeparator);
        }

        self.expect_closing(SyntaxKind::BraceClose, "table opened here", open);
        m.complete(self, SyntaxKind::TableExpression)
    }

    /// `name = expr`, `[expr] = expr`, or a positional `expr`.
    fn parse_table_field(&mut self) -> bool {
        let m = self.start();
        match self.current() {
            SyntaxKind::Ident => {
                self.bump();
                if self.eat_token(SyntaxKind::Equals) {
                    self.expect_expr();
                    m.complete(self, SyntaxKind::TableField);
                    return true;
                }
                // Not a named field; reparse from the name as an expression.
                m.rollback(self);
                return self.parse_positional_field();
            }
            SyntaxKind::BracketOpen => {
                let open = self.current_span();
                self.bump();
                self.expect_expr();
                self.expect_closing(SyntaxKind::BracketClose, "key opened here", open);
                self.expect(SyntaxKind::Equals);
                self.expect_expr();
                m.complete(self, SyntaxKind::TableField);
                return true;
            }
            _ => {}
        }
        m.abandon(self);
        self.parse_positional_field()
    }

    fn parse_positional_field(&mut self) -> bool {
        let m = self.start();
        if self.parse_expr().is_none() {
            m.abandon(self);
            return false;
        }
        m.complete(self, SyntaxKind::TableField);
        true
    }

    fn parse_function_expression(&mut self) -> CompletedMarker {
        self.assert_current(SyntaxKind::KwFunction);
        let m = self.start();
        let keyword = self.current_span();
        self.bump();
        self.parse_function_body(keyword);
        m.complete(self, SyntaxKind::FunctionExpression)
    }

    /// `(params) block end`. `keyword` is where the enclosing function started.
    pub(crate) fn parse_function_body(&mut self, keyword: rowan::TextRange) {
        let m = self.start();
        self.parse_parameter_list();
        self.parse_block();
        self.expect_closing(SyntaxKind::KwEnd, "function started here", keyword);
        m.complete(self, SyntaxKind::FunctionBody);
    }

    fn parse_parameter_list(&mut self) {
        let m = self.start();
        let open = self.current_span();
        if !self.expect(SyntaxKind::ParenOpen) {
            m.complete(self, SyntaxKind::ParameterList);
            return;
        }

        loop {
            match self.current() {
                SyntaxKind::Ident => {
                    self.parse_name();
                }
                SyntaxKind::Ellipsis => {
                    self.bump();
                    break;
                }
                _ => break,
            }
            if !self.currently_is(SyntaxKind::Comma) {
                break;
            }
            self.bump();
            if !matches!(self.current(), SyntaxKind::Ident | SyntaxKind::Ellipsis) {
                self.expect(SyntaxKind::Ident);
                break;
            }
        }

        self.expect_closing(SyntaxKind::ParenClose, "parameter list opened here", open);
        m.complete(self, SyntaxKind::ParameterList);
    }
}
