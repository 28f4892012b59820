use myc_frontend::ast::Program;
use myc_frontend::grammar::Grammar;
use myc_frontend::token::Token;
use myc_frontend::{Lexed, Parser};
use myc_session::diagnostics::DiagnosticEmitter;
use myc_session::sourcemap::{Source, SourceId};
use myc_session::Session;

use crate::{CompilerError, CompilerResult};

pub struct ParsedSource {
    pub tokens: Vec<Token>,
    pub program: Program,
}

pub struct Compiler<D: DiagnosticEmitter> {
    pub session: Session<D>,
    grammar: Grammar,
}

impl<D: DiagnosticEmitter> Compiler<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            session: Session::new(diagnostics),
            grammar: Grammar::default(),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn tokenize(&mut self, source: Source) -> CompilerResult<Vec<Token>> {
        let (_, tokens) = self.lex(source)?;
        Ok(tokens)
    }

    /// Lex and parse a source. Unrecognized top-level tokens are reported as
    /// warnings and don't stop the parse.
    pub fn parse(&mut self, source: Source) -> CompilerResult<ParsedSource> {
        let (source_id, tokens) = self.lex(source)?;

        let (program, unrecognized) = match Parser::new(&tokens, &self.grammar).parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                let _ = self.session.report(err, &source_id);
                return Err(CompilerError::HadErrors);
            }
        };

        self.session.report_all(unrecognized, &source_id)?;

        Ok(ParsedSource {
            tokens,
            program,
        })
    }

    fn lex(&mut self, source: Source) -> CompilerResult<(SourceId, Vec<Token>)> {
        let lexed = myc_frontend::lex(&source.source);
        let source_id = self.session.add_source(source);

        let Lexed { tokens, comments } = match lexed {
            Ok(lexed) => lexed,
            Err(err) => {
                let _ = self.session.report(err, &source_id);
                return Err(CompilerError::HadErrors);
            }
        };

        self.session.report_all(comments, &source_id)?;

        Ok((source_id, tokens))
    }
}
