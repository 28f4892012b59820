pub mod diagnostics;
pub mod sourcemap;

use diagnostics::*;
use sourcemap::{Source, SourceId, SourceMap};

/// Marker returned when at least one error-level diagnostic was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

pub struct Session<D: DiagnosticEmitter> {
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn add_source(&mut self, source: Source) -> SourceId {
        self.sources.insert(source)
    }

    pub fn report<Context: ?Sized>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic(cx);
        let kind = diagnostic.kind;

        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        if kind < DiagnosticKind::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }

    pub fn report_all<Context: ?Sized, I>(
        &mut self,
        diagnostics: I,
        cx: &Context,
    ) -> Result<(), ErrorsEmitted>
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic<Context>,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            let diagnostic = diagnostic.into_diagnostic(cx);
            had_error |= diagnostic.kind >= DiagnosticKind::Error;
            self.diagnostics.emit_diagnostic(diagnostic, &self.sources);
        }

        if had_error {
            Err(ErrorsEmitted)
        } else {
            Ok(())
        }
    }
}
