use myc_diagnostic::span::Span;
use myc_utils::peek::{Backtrack, Peek};

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded contents. Escapes in string literals are already resolved.
    pub text: String,
    /// 1-based line the token starts on.
    pub line: usize,
    pub span: Span,
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    DoubleLiteral,
    StringLiteral,
    Operator,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::DoubleLiteral => "double literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Operator => "operator",
        }
    }
}

impl Token {
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// Short description for diagnostics, e.g. "`foo` on line 3".
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => format!("{:?} on line {}", self.text, self.line),
            _ => format!("`{}` on line {}", self.text, self.line),
        }
    }
}

/// A position in a borrowed token sequence.
///
/// Cloning tokens out of the cursor is left to the caller; the cursor itself
/// never modifies the sequence.
#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek_span(&self) -> Span {
        self.peek().map_or_else(|| self.eof_span(), |t| t.span)
    }

    pub fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::empty(0), |t| Span::empty(t.span.end))
    }
}

impl<'a> Iterator for TokenCursor<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }
}

impl Peek for TokenCursor<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.tokens.get(self.pos)
    }
}

impl Backtrack for TokenCursor<'_> {
    type Checkpoint = usize;

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }
}
