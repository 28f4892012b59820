use std::collections::HashMap;
use std::io;
use std::ops::Range;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, DiagnosticKind, SnippetKind};
use crate::span::Span;

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for source_data in self.snippets_by_source().into_values() {
            let num_lines = source_data.source.num_lines();
            let groups = get_overlapping_groups(source_data.snippets, |s| s.line..s.line + 1);

            for (snippets, lines) in groups {
                let start = lines.start.saturating_sub(self.config.context_size);
                let end = (lines.end + self.config.context_size).min(num_lines);

                self.draw_group(source_data.source, &snippets, start..end)?;
            }
        }

        self.draw_notes()?;
        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.kind.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}")?,
            None => writeln!(self.stream)?,
        }

        Ok(())
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Range<usize>,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // groups are never empty
        let (line_num, col_num) = source
            .byte_to_line_col(snippets[0].bytes.start)
            .expect("position out of bounds");

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines {
            let line_span = source.line_span(line).expect("line out of bounds");
            let line_str = &source.source_str()[line_span.as_range()];

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            for snippet in snippets.iter().filter(|s| s.line == line) {
                self.draw_gutter(None, line_num_width)?;

                let start = snippet.bytes.start.clamp(line_span.start, line_span.end);
                let end = snippet.bytes.end.clamp(start, line_span.end);

                let offset = str_width(&source.source_str()[line_span.start..start]);
                let width = str_width(&source.source_str()[start..end]).max(1);

                self.stream
                    .set_color(self.get_snippet_color(snippet.kind))?;

                write!(self.stream, "{:<offset$}", "")?;
                write!(self.stream, "{}", self.config.underline.repeat(width))?;
                writeln!(
                    self.stream,
                    "{}{}",
                    self.config.underline_after, snippet.label
                )?;

                self.stream.reset()?;
            }
        }

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()?;

        Ok(())
    }

    fn draw_notes(&mut self) -> io::Result<()> {
        for note in &self.diagnostic.notes {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "{} note:", self.config.note_marker)?;
            self.stream.reset()?;
            writeln!(self.stream, " {note}")?;
        }

        Ok(())
    }

    fn snippets_by_source(&self) -> HashMap<S::SourceId, SourceData<'a, S>> {
        let mut source_datas = HashMap::new();

        for snippet in &self.diagnostic.snippets {
            let source_data = source_datas
                .entry(snippet.source_id)
                .or_insert_with(|| SourceData {
                    source: self
                        .sources
                        .get_source(snippet.source_id)
                        .expect("source missing"),
                    snippets: vec![],
                });

            // snippets are drawn on the line they start on
            let line = source_data
                .source
                .byte_to_line_index(snippet.span.start)
                .expect("span start out of bounds");

            source_data.snippets.push(SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                bytes: snippet.span,
                line,
            });
        }

        source_datas
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.kind {
            DiagnosticKind::Note => &self.config.note_color,
            DiagnosticKind::Warning => &self.config.warning_color,
            DiagnosticKind::Error => &self.config.error_color,
        }
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

struct SourceData<'a, S: Sources> {
    source: &'a Cached<S::Source>,
    snippets: Vec<SnippetData<'a>>,
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    bytes: Span,
    line: usize,
}

/// Sort items by range start and merge overlapping ranges into groups.
fn get_overlapping_groups<T, F>(mut items: Vec<T>, get_range: F) -> Vec<(Vec<T>, Range<usize>)>
where
    F: Fn(&T) -> Range<usize>,
{
    items.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_start = 0;
    let mut group_end = 0;

    for item in items {
        let range = get_range(&item);

        if range.start > group_end {
            if !group.is_empty() {
                groups.push((std::mem::take(&mut group), group_start..group_end));
            }

            group_start = range.start;
        }

        group_end = group_end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, group_start..group_end));
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::get_overlapping_groups;
    use crate::sources::{Cached, Sources};
    use crate::{Config, Diagnostic, Snippet};

    #[must_use]
    fn diagnostic_to_string<S: Sources>(diagnostic: Diagnostic<S>, sources: S) -> String {
        let config = Config::default();
        let mut stream = NoColor::new(vec![]);

        diagnostic
            .write_to_stream(&sources, &config, &mut stream)
            .unwrap();

        String::from_utf8(stream.into_inner()).unwrap()
    }

    #[test]
    #[allow(clippy::single_range_in_vec_init)]
    fn overlapping_ranges() {
        let ranges = vec![0..1, 0..10, 1..2, 5..7, 11..12];
        let groups = get_overlapping_groups(ranges, |r| r.clone());

        assert_eq!(
            groups,
            vec![
                (vec![0..1, 0..10, 1..2, 5..7], 0..10),
                (vec![11..12], 11..12),
            ]
        );
    }

    #[test]
    fn single_line_snippet() {
        const SOURCE: &str = "int f(int a {\n    a;\n}";

        let diagnostic = Diagnostic::error()
            .with_message("expected `,` or `)`")
            .with_snippet(Snippet::primary("found `{`", 0, 12..13));

        let s = diagnostic_to_string(
            diagnostic,
            vec![Cached::new(("test.myc".to_owned(), SOURCE.to_owned()))],
        );

        assert_eq!(
            s,
            "Error: expected `,` or `)`\n\
             In test.myc:1:13\n\
             1 │ int f(int a {\n\
             \x20 │             ^  found `{`\n\
             2 │     a;\n\
             \n"
        );
    }

    #[test]
    fn message_and_notes_without_snippets() {
        let diagnostic: Diagnostic<Vec<Cached<(String, String)>>> = Diagnostic::note()
            .with_id("N01")
            .with_message("ignoring comment")
            .with_note("comments run to the end of the line");

        let s = diagnostic_to_string(diagnostic, vec![]);

        assert_eq!(
            s,
            "[N01] Note: ignoring comment\n= note: comments run to the end of the line\n\n"
        );
    }
}
