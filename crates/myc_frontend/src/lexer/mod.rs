
use std::mem;

use myc_session::diagnostics::prelude::*;

use crate::token::*;
use crate::{Node, NodeCopy};

#[derive(Node!, thiserror::Error)]
#[error("{kind} on line {line}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub line: usize,
    pub span: Span,
}

#[derive(NodeCopy!, thiserror::Error)]
pub enum LexerErrorKind {
    #[error("unknown escape sequence `\\{}` in string", .0.escape_default())]
    UnknownEscape(char),
}

impl IntoDiagnostic<SourceId> for LexerError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message("syntax error")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                *source_id,
                self.span,
            ))
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

/// A `//` comment dropped by the lexer.
#[derive(Node!)]
pub struct Comment {
    pub text: String,
    pub line: usize,
    pub span: Span,
}

impl IntoDiagnostic<SourceId> for Comment {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::note()
            .with_message("ignoring comment")
            .with_snippet(Snippet::primary(self.text.trim(), *source_id, self.span))
    }
}

#[derive(Node!)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

/// What the token under construction currently is.
///
/// Everything except `Token` is lexer-private and is resolved to a real
/// [`TokenKind`] (or dropped) before a token is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Whitespace,
    Token(TokenKind),
    StringEscape,
    /// A `.` that may still turn out to start a number.
    PotentialDouble,
    /// A `/` that may still turn out to start a comment.
    PotentialComment,
    Comment,
}

pub struct Lexer<'src> {
    source: &'src str,

    tokens: Vec<Token>,
    comments: Vec<Comment>,

    state: State,
    text: String,
    token_start: usize,

    line: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,

            tokens: vec![],
            comments: vec![],

            state: State::Whitespace,
            text: String::new(),
            token_start: 0,

            line: 1,
        }
    }

    pub fn lex(mut self) -> LexerResult<Lexed> {
        for (pos, ch) in self.source.char_indices() {
            self.lex_char(pos, ch)?;
        }

        self.end_token(self.source.len());

        Ok(Lexed {
            tokens: self.tokens,
            comments: self.comments,
        })
    }

    fn lex_char(&mut self, pos: usize, ch: char) -> LexerResult<()> {
        match self.state {
            State::StringEscape => return self.lex_escape(pos, ch),

            // a lone `/` is division; the current character is lexed as usual
            State::PotentialComment if ch != '/' => {
                self.state = State::Token(TokenKind::Operator);
                self.end_token(pos);
            }

            _ => {}
        }

        let in_string = self.state == State::Token(TokenKind::StringLiteral);
        let in_comment = self.state == State::Comment;

        match ch {
            '\r' | '\n' => {
                self.end_token(pos);
                self.line += 1;
            }

            _ if in_comment => self.text.push(ch),

            '0'..='9' => {
                match self.state {
                    State::Whitespace => {
                        self.begin_token(State::Token(TokenKind::IntegerLiteral), pos);
                    }
                    State::PotentialDouble => {
                        self.state = State::Token(TokenKind::DoubleLiteral);
                    }
                    _ => {}
                }
                self.text.push(ch);
            }

            '.' => match self.state {
                State::Whitespace => {
                    self.begin_token(State::PotentialDouble, pos);
                    self.text.push(ch);
                }
                State::Token(TokenKind::IntegerLiteral) => {
                    self.state = State::Token(TokenKind::DoubleLiteral);
                    self.text.push(ch);
                }
                _ if in_string => self.text.push(ch),
                _ => self.single_char_operator(pos, ch),
            },

            '{' | '}' | '(' | ')' | '=' | '+' | '-' | '*' | ';' | ',' if !in_string => {
                self.single_char_operator(pos, ch);
            }

            ' ' | '\t' if !in_string => self.end_token(pos),

            '"' if in_string => self.end_token(pos + ch.len_utf8()),
            '"' => {
                self.end_token(pos);
                self.begin_token(State::Token(TokenKind::StringLiteral), pos);
            }

            '\\' if in_string => self.state = State::StringEscape,
            '\\' => self.single_char_operator(pos, ch),

            '/' if in_string => self.text.push(ch),
            '/' if self.state == State::PotentialComment => {
                self.state = State::Comment;
                self.text.clear();
            }
            '/' => {
                self.end_token(pos);
                self.begin_token(State::PotentialComment, pos);
                self.text.push(ch);
            }

            _ => {
                if matches!(
                    self.state,
                    State::Whitespace
                        | State::Token(TokenKind::IntegerLiteral | TokenKind::DoubleLiteral)
                ) {
                    self.end_token(pos);
                    self.begin_token(State::Token(TokenKind::Identifier), pos);
                }
                self.text.push(ch);
            }
        }

        Ok(())
    }

    fn lex_escape(&mut self, pos: usize, ch: char) -> LexerResult<()> {
        let decoded = match ch {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '\\' => '\\',
            _ => {
                return Err(LexerError {
                    kind: LexerErrorKind::UnknownEscape(ch),
                    line: self.line,
                    // include the backslash
                    span: Span::new(pos - 1, pos + ch.len_utf8()),
                });
            }
        };

        self.text.push(decoded);
        self.state = State::Token(TokenKind::StringLiteral);

        Ok(())
    }

    fn single_char_operator(&mut self, pos: usize, ch: char) {
        self.end_token(pos);

        self.tokens.push(Token {
            kind: TokenKind::Operator,
            text: ch.to_string(),
            line: self.line,
            span: Span::new(pos, pos + ch.len_utf8()),
        });
    }

    fn begin_token(&mut self, state: State, pos: usize) {
        self.state = state;
        self.token_start = pos;
    }

    /// Flush the token under construction, if any, and reset to whitespace.
    fn end_token(&mut self, end: usize) {
        let state = mem::replace(&mut self.state, State::Whitespace);
        let text = mem::take(&mut self.text);
        let span = Span::new(self.token_start, end);

        let kind = match state {
            State::Whitespace => return,

            State::Comment => {
                self.comments.push(Comment {
                    text,
                    line: self.line,
                    span,
                });
                return;
            }

            State::Token(kind) => kind,

            // input ended inside an escape
            State::StringEscape => TokenKind::StringLiteral,

            State::PotentialDouble if text == "." => TokenKind::Operator,
            State::PotentialDouble => TokenKind::DoubleLiteral,

            State::PotentialComment => TokenKind::Operator,
        };

        self.tokens.push(Token {
            kind,
            text,
            line: self.line,
            span,
        });
    }
}
