#[cfg(test)]
mod tests;

mod expr;

use myc_session::diagnostics::prelude::*;
use myc_utils::peek::{Backtrack, Peek};

use crate::ast::*;
use crate::grammar::Grammar;
use crate::token::{Token, TokenCursor, TokenKind};
use crate::types::Type;
use crate::{Node, NodeCopy};

#[derive(Node!, thiserror::Error)]
#[error("{kind}, found {}", found_description(.found.as_ref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The token the parser stopped at, `None` at end of input.
    pub found: Option<Token>,
    pub span: Span,
}

#[derive(NodeCopy!, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected a type at start of parameter")]
    ExpectedParameterType,

    #[error("expected `,` to separate parameters or `)` to end the parameter list")]
    ExpectedParameterSeparator,

    #[error("expected `;` at end of statement")]
    ExpectedSemicolon,

    #[error("expected initial value to the right of `=` in variable declaration")]
    ExpectedInitializer,

    #[error("expected expression as argument")]
    ExpectedArgument,

    #[error("expected `,` to separate arguments")]
    ExpectedArgumentSeparator,

    #[error("unbalanced `(` in parenthesized expression")]
    UnbalancedParen,

    #[error("expected expression inside parentheses")]
    EmptyParens,
}

fn found_description(found: Option<&Token>) -> String {
    found.map_or_else(|| "end of input".to_owned(), Token::describe)
}

impl ParseError {
    /// Line of the offending token, `None` at end of input.
    pub fn line(&self) -> Option<usize> {
        self.found.as_ref().map(|t| t.line)
    }
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let label = format!("found {}", found_description(self.found.as_ref()));

        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary(label, *source_id, self.span))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A top-level token that does not start a function definition. Skipped.
#[derive(Node!)]
pub struct UnrecognizedToken {
    pub token: Token,
}

impl IntoDiagnostic<SourceId> for UnrecognizedToken {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::warning()
            .with_message(format!("unrecognized token `{}`", self.token.text))
            .with_snippet(Snippet::primary("skipped", *source_id, self.token.span))
            .with_note(format!(
                "expected a function definition, found {}",
                self.token.kind.token_name()
            ))
    }
}

pub struct Parser<'a> {
    tokens: TokenCursor<'a>,
    grammar: &'a Grammar,

    unrecognized: Vec<UnrecognizedToken>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], grammar: &'a Grammar) -> Self {
        Self {
            tokens: TokenCursor::new(tokens),
            grammar,

            unrecognized: vec![],
        }
    }

    /// Parse every function definition, skipping tokens that don't start one.
    pub fn parse(mut self) -> ParseResult<(Program, Vec<UnrecognizedToken>)> {
        let mut program = Program::default();

        while !self.tokens.at_end() {
            match self.parse_function_definition()? {
                Some(function) => {
                    program.insert(function);
                }

                None => {
                    if let Some(token) = self.tokens.next() {
                        self.unrecognized.push(UnrecognizedToken {
                            token: token.clone(),
                        });
                    }
                }
            }
        }

        Ok((program, self.unrecognized))
    }

    fn parse_function_definition(&mut self) -> ParseResult<Option<FunctionDefinition>> {
        let start = self.tokens.checkpoint();

        let Some(name) = self.attempt(|parser| {
            parser.eat_type()?;
            let name = parser.eat_identifier()?;
            parser.eat_operator("(")?;
            Some(name.text.clone())
        }) else {
            return Ok(None);
        };

        let parameters = self.parse_parameters()?;

        // a prototype or anything else without a body isn't a definition
        let Some(statements) = self.parse_function_body()? else {
            self.tokens.rewind(start);
            return Ok(None);
        };

        Ok(Some(FunctionDefinition {
            name,
            parameters,
            statements,
            returns_something: false,
        }))
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<ParameterDefinition>> {
        let mut parameters = vec![];

        while self.eat_operator(")").is_none() {
            let ty = self
                .eat_type()
                .ok_or_else(|| self.error(ParseErrorKind::ExpectedParameterType))?;

            let name = self
                .eat_identifier()
                .map(|t| t.text.clone())
                .unwrap_or_default();

            parameters.push(ParameterDefinition { name, ty });

            if self.eat_operator(")").is_some() {
                break;
            }
            if self.eat_operator(",").is_none() {
                return Err(self.error(ParseErrorKind::ExpectedParameterSeparator));
            }
        }

        Ok(parameters)
    }

    fn parse_function_body(&mut self) -> ParseResult<Option<Vec<Statement>>> {
        if self.eat_operator("{").is_none() {
            return Ok(None);
        }

        let mut statements = vec![];

        while self.eat_operator("}").is_none() {
            // empty statements are allowed
            if let Some(statement) = self.parse_statement()? {
                statements.push(statement);
            }

            if self.eat_operator(";").is_none() {
                return Err(self.error(ParseErrorKind::ExpectedSemicolon));
            }
        }

        Ok(Some(statements))
    }

    fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        match self.parse_variable_declaration()? {
            Some(declaration) => Ok(Some(declaration)),
            None => self.parse_expression(),
        }
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<Option<Statement>> {
        let Some((ty, name)) = self.attempt(|parser| {
            let ty = parser.eat_type()?;
            let name = parser.eat_identifier()?;
            Some((ty, name.text.clone()))
        }) else {
            return Ok(None);
        };

        let initializer = if self.eat_operator("=").is_some() {
            let value = self
                .parse_expression()?
                .ok_or_else(|| self.error(ParseErrorKind::ExpectedInitializer))?;
            Some(Box::new(value))
        } else {
            None
        };

        Ok(Some(Statement::VariableDeclaration {
            name,
            ty,
            initializer,
        }))
    }

    /// Run `f`, rewinding the cursor if it doesn't match.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.tokens.checkpoint();
        let result = f(self);
        if result.is_none() {
            self.tokens.rewind(checkpoint);
        }
        result
    }

    fn eat_type(&mut self) -> Option<Type> {
        let token = self.tokens.peek()?;
        if token.kind != TokenKind::Identifier {
            return None;
        }

        let ty = self.grammar.types.get(&token.text)?.clone();
        self.tokens.next();
        Some(ty)
    }

    fn eat_identifier(&mut self) -> Option<&'a Token> {
        self.eat_kind(TokenKind::Identifier)
    }

    fn eat_kind(&mut self, kind: TokenKind) -> Option<&'a Token> {
        match self.tokens.peek() {
            Some(token) if token.kind == kind => self.tokens.next(),
            _ => None,
        }
    }

    fn eat_operator(&mut self, op: &str) -> Option<&'a Token> {
        match self.tokens.peek() {
            Some(token) if token.is_operator(op) => self.tokens.next(),
            _ => None,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            found: self.tokens.peek().cloned(),
            span: self.tokens.peek_span(),
        }
    }
}
