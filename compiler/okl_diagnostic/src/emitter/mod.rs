//! Diagnostic output.
//!
//! [`TerminalEmitter`] writes what a person reads after `oklc check`;
//! [`JsonEmitter`] writes what an editor or CI job parses. Given a
//! [`SourceView`], both report spans as `path:line:column`.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use okl_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// An output format for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit in order.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    fn flush(&mut self);

    /// Closing line after the last diagnostic. Formats without one ignore it.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Kernel source text the spans point into.
#[derive(Clone, Debug)]
pub struct SourceView {
    path: String,
    text: String,
    lines: LineOffsetTable,
}

impl SourceView {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceView {
            path: path.into(),
            text,
            lines,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 1-based (line, column) of the span start.
    pub fn line_col(&self, span: Span) -> (u32, u32) {
        self.lines.span_start(&self.text, span)
    }

    /// Source line containing the span start.
    pub fn line_text(&self, span: Span) -> Option<&str> {
        let (line, _) = self.line_col(span);
        self.lines.line_text(&self.text, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_view() {
        let view = SourceView::new("k.okl", "@kernel void k() {\n  break;\n}\n");
        let span = Span::new(21, 27);
        assert_eq!(view.path(), "k.okl");
        assert_eq!(view.line_col(span), (2, 3));
        assert_eq!(view.line_text(span), Some("  break;"));
    }
}
