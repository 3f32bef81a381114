//! Parser diagnostics: the message catalog, an ordered collection with
//! marker lookups, and rendering.

mod markers;
mod message;

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use line_index::LineIndex;
pub use markers::Markers;
pub use message::DiagnosticKind;
pub use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    range: TextRange,
    highlight: Option<TextRange>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, range: TextRange) -> Self {
        let message = kind.to_string();
        Self { severity: Severity::Error, kind, message, range, highlight: None }
    }

    pub fn with_highlight(mut self, highlight: TextRange) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Primary location. Empty for diagnostics that point between tokens.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn highlight(&self) -> Option<TextRange> {
        self.highlight
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let mut snippet = Snippet::source(text)
            .origin(path)
            .annotation(level.span(display_span(self.range, text)).label("here"))
            .fold(true);
        if let Some(highlight) = self.highlight {
            snippet = snippet.annotation(Level::Note.span(display_span(highlight, text)));
        }
        renderer.render(level.title(&self.message).snippet(snippet))
    }

    /// `path:line:col: severity: message`, with 1-based line and column.
    pub fn render_short(&self, path: &str, line_index: &LineIndex) -> String {
        let position = line_index.line_col(self.offset());
        format!(
            "{path}:{}:{}: {}: {}",
            position.line + 1,
            position.col + 1,
            self.severity.as_str(),
            self.message
        )
    }
}

/// Widens an empty range to the following character so it stays visible.
fn display_span(range: TextRange, text: &str) -> std::ops::Range<usize> {
    let start = usize::from(range.start()).min(text.len());
    let end = usize::from(range.end()).min(text.len());
    if start < end {
        return start..end;
    }
    let next = text[start..].chars().next().map_or(0, char::len_utf8);
    start..start + next
}

/// Diagnostics of one parse, kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Stable sort by primary offset; diagnostics at the same offset keep
    /// the order in which they were produced.
    pub fn sort(&mut self) {
        self.items.sort_by_key(Diagnostic::offset);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(Diagnostic::message).collect()
    }

    /// Diagnostics whose primary location is the marker `name`.
    pub fn anchored_to<'a>(&'a self, markers: &Markers, name: &str) -> Vec<&'a Diagnostic> {
        let Some(offset) = markers.get(name) else {
            return Vec::new();
        };
        self.items.iter().filter(|diagnostic| diagnostic.offset() == offset).collect()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(items: &str, range: TextRange) -> Diagnostic {
        Diagnostic::error(DiagnosticKind::Expected { items: items.into(), context: None }, range)
    }

    #[test]
    fn sort_is_stable() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(expected("'}'", TextRange::empty(5.into())));
        diagnostics.push(expected("'a'", TextRange::empty(1.into())));
        diagnostics.push(expected("'b'", TextRange::empty(5.into())));
        diagnostics.sort();

        assert_eq!(diagnostics.messages(), vec!["expected 'a'", "expected '}'", "expected 'b'"]);
    }

    #[test]
    fn anchored_to_marker() {
        let (text, markers) = Markers::extract("a ? b :#^DIAG^#");
        assert_eq!(text, "a ? b :");

        let mut diagnostics = Diagnostics::new();
        diagnostics.push(expected("expression", TextRange::empty(TextSize::of(text.as_str()))));
        diagnostics.push(expected("'x'", TextRange::empty(0.into())));

        let anchored = diagnostics.anchored_to(&markers, "DIAG");
        assert_eq!(anchored.len(), 1);
        assert_eq!(anchored[0].message(), "expected expression");
        assert!(diagnostics.anchored_to(&markers, "MISSING").is_empty());
    }

    #[test]
    fn short_format() {
        let text = "let a =\nlet b";
        let diagnostic = expected("expression", TextRange::empty(7.into()));
        let line_index = LineIndex::new(text);
        assert_eq!(
            diagnostic.render_short("main.swift", &line_index),
            "main.swift:1:8: error: expected expression"
        );
    }

    #[test]
    fn pretty_format_labels_location() {
        let text = "let a = (1\nlet b = 2";
        let diagnostic = Diagnostic::error(
            DiagnosticKind::ExpectedToEnd { closer: ")".into(), context: "tuple" },
            TextRange::empty(10.into()),
        );
        let rendered = diagnostic.render(&Renderer::plain(), "main.swift", text).to_string();
        assert!(rendered.starts_with("error: expected ')' to end tuple"), "{rendered}");
        assert!(rendered.contains("main.swift:1:11"), "{rendered}");
        assert!(rendered.contains("here"), "{rendered}");
    }
}
