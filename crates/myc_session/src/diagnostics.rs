use myc_diagnostic::termcolor::{ColorChoice, StandardStream};

use crate::sourcemap::SourceMap;

pub use myc_diagnostic::*;

pub mod prelude {
    pub use super::{Diagnostic, IntoDiagnostic};
    pub use crate::sourcemap::SourceId;
    pub use myc_diagnostic::span::Span;
    pub use myc_diagnostic::{DiagnosticKind, Snippet, SnippetKind};
}

pub type Diagnostic = myc_diagnostic::Diagnostic<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

/// Renders diagnostics to stderr, dropping anything below `min_kind`.
#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
    pub min_kind: DiagnosticKind,
}

impl PrettyDiagnosticEmitter {
    pub fn verbose(verbose: bool) -> Self {
        let min_kind = if verbose {
            DiagnosticKind::Note
        } else {
            DiagnosticKind::Warning
        };

        Self {
            min_kind,
            ..Self::default()
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            config: Config::default(),
            min_kind: DiagnosticKind::Warning,
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        if diagnostic.kind < self.min_kind {
            return;
        }

        diagnostic
            .write_to_stream(sources, &self.config, &mut self.stream)
            .expect("failed to emit diagnostic");
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

impl IntoDiagnostic<()> for Diagnostic {
    fn into_diagnostic(self, _cx: &()) -> Diagnostic {
        self
    }
}
