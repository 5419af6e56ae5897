//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics against their source text.
pub struct DiagnosticsPrinter<'s> {
    messages: Vec<DiagnosticMessage>,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> DiagnosticsPrinter<'s> {
    pub fn new(messages: Vec<DiagnosticMessage>, source: &'s str) -> Self {
        Self {
            messages,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.messages.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.messages.iter().enumerate() {
            let range = adjust_range(diag.range, self.source);

            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label(&diag.message),
            );

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.range, self.source))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity());
            let report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Widens empty ranges to one character so the caret has something to point at.
fn adjust_range(range: TextRange, source: &str) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start != end {
        return start..end;
    }

    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
