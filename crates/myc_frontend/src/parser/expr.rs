use myc_utils::peek::{Backtrack, Peek};

use super::{ParseErrorKind, ParseResult, Parser};
use crate::ast::Statement;
use crate::grammar::OperatorTable;
use crate::token::TokenKind;
use crate::types::Type;

impl Parser<'_> {
    /// Parse values joined by binary operators, grouped by precedence.
    ///
    /// Stops before the first token that isn't a binary operator, or before
    /// an operator with no value after it.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Option<Statement>> {
        let Some(mut expr) = self.parse_one_value()? else {
            return Ok(None);
        };

        loop {
            let checkpoint = self.tokens.checkpoint();

            let Some(token) = self.eat_kind(TokenKind::Operator) else {
                break;
            };
            if self.grammar.operators.precedence(&token.text) == 0 {
                self.tokens.rewind(checkpoint);
                break;
            }

            let Some(value) = self.parse_one_value()? else {
                self.tokens.rewind(checkpoint);
                break;
            };

            expr = splice(expr, token.text.clone(), value, &self.grammar.operators);
        }

        Ok(Some(expr))
    }

    fn parse_one_value(&mut self) -> ParseResult<Option<Statement>> {
        if let Some(token) = self.eat_kind(TokenKind::DoubleLiteral) {
            return Ok(Some(Statement::literal(&token.text, Type::double_literal())));
        }

        if let Some(token) = self.eat_kind(TokenKind::IntegerLiteral) {
            return Ok(Some(Statement::literal(&token.text, Type::integer_literal())));
        }

        if let Some(token) = self.eat_kind(TokenKind::StringLiteral) {
            return Ok(Some(Statement::literal(&token.text, Type::string_literal())));
        }

        if self.eat_operator("(").is_some() {
            let expr = self
                .parse_expression()?
                .ok_or_else(|| self.error(ParseErrorKind::EmptyParens))?;

            if self.eat_operator(")").is_none() {
                return Err(self.error(ParseErrorKind::UnbalancedParen));
            }

            return Ok(Some(expr));
        }

        let variable = self.attempt(|parser| {
            let name = parser.eat_identifier()?;
            match parser.tokens.peek() {
                Some(next) if next.is_operator("(") => None,
                _ => Some(Statement::variable(&name.text)),
            }
        });
        if variable.is_some() {
            return Ok(variable);
        }

        self.parse_function_call()
    }

    fn parse_function_call(&mut self) -> ParseResult<Option<Statement>> {
        let Some(name) = self.attempt(|parser| {
            let name = parser.eat_identifier()?;
            parser.eat_operator("(")?;
            Some(name.text.clone())
        }) else {
            return Ok(None);
        };

        let mut arguments = vec![];

        if self.eat_operator(")").is_none() {
            loop {
                let argument = self
                    .parse_expression()?
                    .ok_or_else(|| self.error(ParseErrorKind::ExpectedArgument))?;
                arguments.push(argument);

                if self.eat_operator(")").is_some() {
                    break;
                }
                if self.eat_operator(",").is_none() {
                    return Err(self.error(ParseErrorKind::ExpectedArgumentSeparator));
                }
            }
        }

        Ok(Some(Statement::FunctionCall { name, arguments }))
    }
}

/// Insert `operator` with right operand `value` into an already parsed
/// expression, returning the new root.
///
/// Descends the right spine while the operators there bind strictly looser
/// than the new one. The node it stops at becomes the new operator's left
/// operand, so stopping at the root gives left-associativity for equal
/// precedences. Parenthesized values aren't marked in the tree and are
/// descended into like any other operator call.
fn splice(
    node: Statement,
    operator: String,
    value: Statement,
    operators: &OperatorTable,
) -> Statement {
    match node {
        Statement::OperatorCall {
            operator: existing,
            lhs,
            rhs,
        } if operators.precedence(&existing) < operators.precedence(&operator) => {
            let rhs = splice(*rhs, operator, value, operators);

            Statement::OperatorCall {
                operator: existing,
                lhs,
                rhs: Box::new(rhs),
            }
        }

        node => Statement::operator_call(operator, node, value),
    }
}
