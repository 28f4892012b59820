use std::path::Path;

use crate::span::Span;

pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

/// A source together with the byte offsets of its line breaks.
#[derive(Debug, Clone)]
pub struct Cached<S: Source> {
    source: S,
    line_breaks: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_breaks = source
            .source_str()
            .char_indices()
            .filter_map(|(i, ch)| (ch == '\n').then_some(i))
            .collect();

        Self {
            source,
            line_breaks,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    /// 1-based line and column of a byte offset.
    pub fn byte_to_line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.byte_to_line_index(byte)?;
        let col = byte - self.line_to_byte(line)?;

        Some((line + 1, col + 1))
    }

    pub fn byte_to_line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.source_str().len() {
            return None;
        }

        match self.line_breaks.binary_search(&byte) {
            Ok(line) | Err(line) => Some(line),
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        if line == 0 {
            Some(0)
        } else {
            self.line_breaks.get(line - 1).map(|&byte| byte + 1)
        }
    }

    /// Byte span of a line, without its terminator.
    pub fn line_span(&self, index: usize) -> Option<Span> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_breaks
            .get(index)
            .copied()
            .unwrap_or(self.source_str().len());

        let line = &self.source_str()[start..end];
        let trimmed = line.strip_suffix('\r').unwrap_or(line);

        Some(Span::new(start, start + trimmed.len()))
    }

    pub fn line_str(&self, index: usize) -> Option<&str> {
        let span = self.line_span(index)?;
        Some(&self.source_str()[span.as_range()])
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;
    use crate::span::Span;

    fn cached_str(s: impl Into<String>) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.into()))
    }

    #[test]
    fn line_col() {
        let cached = cached_str("");
        assert_eq!(cached.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(cached.byte_to_line_col(1), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(cached.byte_to_line_col(1), Some((1, 2)));
        assert_eq!(cached.byte_to_line_col(2), Some((2, 1)));

        let cached = cached_str("\nx");
        assert_eq!(cached.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(cached.byte_to_line_col(1), Some((2, 1)));
        assert_eq!(cached.byte_to_line_col(2), Some((2, 2)));
    }

    #[test]
    fn line_str() {
        let cached = cached_str("");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.line_str(0), Some("x"));
        assert_eq!(cached.line_str(1), Some(""));
        assert_eq!(cached.line_str(2), None);

        let cached = cached_str("int a;\r\nint b;");
        assert_eq!(cached.line_str(0), Some("int a;"));
        assert_eq!(cached.line_str(1), Some("int b;"));
        assert_eq!(cached.line_span(1), Some(Span::new(8, 14)));
    }
}
