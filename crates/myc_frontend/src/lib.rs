#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod grammar;
pub mod print;
pub mod token;
pub mod types;

pub use lexer::{Comment, Lexed, Lexer, LexerError, LexerErrorKind, LexerResult};
pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser, UnrecognizedToken};

use ast::Program;
use grammar::Grammar;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Split `source` into tokens, keeping the comments it dropped.
pub fn lex(source: &str) -> LexerResult<Lexed> {
    Lexer::new(source).lex()
}

pub fn tokenize(source: &str) -> LexerResult<Vec<Token>> {
    lex(source).map(|lexed| lexed.tokens)
}

/// Parse with the built-in types and operators.
pub fn parse(tokens: &[Token]) -> ParseResult<(Program, Vec<UnrecognizedToken>)> {
    let grammar = Grammar::default();
    Parser::new(tokens, &grammar).parse()
}
