//! Human-readable output.
//!
//! Without source text every label prints as a bare byte range:
//!
//! ```text
//! error[E5001]: `break` directly inside an `@outer` loop
//!   --> 65..71: exits the loop early
//! ```
//!
//! With a [`SourceView`] each label becomes a `path:line:column` location,
//! the source line and an underline (`^` primary, `-` secondary).

use std::io::Write;

use okl_ir::Span;

use crate::{Diagnostic, Label, Severity};

use super::{DiagnosticEmitter, SourceView};

/// When to color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode `{other}` (expected auto, always or never)"
            )),
        }
    }
}

/// ANSI styles used by the emitter.
#[derive(Clone, Copy)]
enum Style {
    Error,
    Warning,
    Help,
    Emphasis,
    Context,
}

impl Style {
    const RESET: &'static str = "\x1b[0m";

    const fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Warning => "\x1b[1;33m",
            Style::Help => "\x1b[1;32m",
            Style::Emphasis => "\x1b[1m",
            Style::Context => "\x1b[1;34m",
        }
    }

    fn of_severity(severity: Severity) -> Self {
        match severity {
            Severity::Error => Style::Error,
            Severity::Warning => Style::Warning,
        }
    }

    fn of_label(label: &Label) -> Self {
        if label.is_primary {
            Style::Error
        } else {
            Style::Context
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceView>,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` decides coloring under [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Render labels against the kernel source.
    #[must_use]
    pub fn with_source(mut self, source: SourceView) -> Self {
        self.source = Some(source);
        self
    }

    fn paint(&mut self, text: &str, style: Style) {
        if self.colors {
            let _ = write!(self.writer, "{}{text}{}", style.ansi(), Style::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        self.paint(diagnostic.severity.as_str(), Style::of_severity(diagnostic.severity));
        let code = format!("[{}]", diagnostic.code);
        self.paint(&code, Style::Emphasis);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);
    }

    fn write_bare_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
        self.paint(&label.message, Style::of_label(label));
        let _ = writeln!(self.writer);
    }

    fn write_snippet(&mut self, label: &Label, source: &SourceView) {
        let (line, col) = source.line_col(label.span);
        let text = source.line_text(label.span).unwrap_or_default();
        let pad = " ".repeat(line.to_string().len());

        let _ = writeln!(self.writer, "{pad}--> {}:{line}:{col}", source.path());
        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{line} | {text}");

        let indent = " ".repeat(col.saturating_sub(1) as usize);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = mark.repeat(underline_width(label.span, text, col));
        let _ = write!(self.writer, "{pad} | {indent}");
        self.paint(&underline, Style::of_label(label));
        let _ = write!(self.writer, " ");
        self.paint(&label.message, Style::of_label(label));
        let _ = writeln!(self.writer);
    }

    fn write_trailer(&mut self, kind: &str, style: Style, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.paint(kind, style);
        let _ = writeln!(self.writer, ": {text}");
    }
}

/// Underline length: the span length, clipped to the rest of the line and
/// never less than one.
fn underline_width(span: Span, line_text: &str, col: u32) -> usize {
    let remaining = line_text
        .chars()
        .count()
        .saturating_sub(col.saturating_sub(1) as usize);
    (span.len() as usize).min(remaining).max(1)
}

fn count(n: usize, what: &str) -> String {
    if n == 1 {
        format!("{n} {what}")
    } else {
        format!("{n} {what}s")
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);

        let source = self.source.take();
        for label in &diagnostic.labels {
            match &source {
                Some(source) => self.write_snippet(label, source),
                None => self.write_bare_label(label),
            }
        }
        self.source = source;

        for note in &diagnostic.notes {
            self.write_trailer("note", Style::Emphasis, note);
        }
        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", Style::Help, suggestion);
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let warnings = format!("{} emitted", count(warning_count, "warning"));
        match (error_count, warning_count) {
            (0, 0) => return,
            (0, _) => {
                self.paint("warning", Style::Warning);
                let _ = writeln!(self.writer, ": {warnings}");
                return;
            }
            _ => {}
        }

        self.paint("error", Style::Error);
        let errors = if error_count == 1 {
            "previous error".to_string()
        } else {
            format!("{error_count} previous errors")
        };
        if warning_count == 0 {
            let _ = writeln!(self.writer, ": aborting due to {errors}");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {errors}; {warnings}");
        }
    }
}
