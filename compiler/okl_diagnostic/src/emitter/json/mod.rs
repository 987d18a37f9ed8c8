//! JSON emitter.
//!
//! Buffers every diagnostic and writes one pretty-printed array on
//! [`JsonEmitter::end`], so a run always produces a single document, `[]`
//! when every kernel passed.

use std::io::Write;

use serde::Serialize;

use crate::{Diagnostic, Label};

use super::{DiagnosticEmitter, SourceView};

#[derive(Serialize)]
struct JsonDiagnostic {
    code: &'static str,
    severity: &'static str,
    message: String,
    labels: Vec<JsonLabel>,
    notes: Vec<String>,
    suggestions: Vec<String>,
}

#[derive(Serialize)]
struct JsonLabel {
    start: u32,
    end: u32,
    #[serde(flatten)]
    location: Option<JsonLocation>,
    message: String,
    primary: bool,
}

/// Present only when the emitter has the kernel source.
#[derive(Serialize)]
struct JsonLocation {
    file: String,
    line: u32,
    column: u32,
}

/// Machine-readable emitter for editors and CI.
pub struct JsonEmitter<W: Write> {
    writer: W,
    source: Option<SourceView>,
    records: Vec<JsonDiagnostic>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            source: None,
            records: Vec::new(),
        }
    }

    /// Attach the kernel source so labels also carry `file`/`line`/`column`.
    #[must_use]
    pub fn with_source(mut self, source: SourceView) -> Self {
        self.source = Some(source);
        self
    }

    /// Write the buffered diagnostics as a JSON array.
    pub fn end(&mut self) {
        let _ = serde_json::to_writer_pretty(&mut self.writer, &self.records);
        let _ = writeln!(self.writer);
        self.records.clear();
    }

    fn label(&self, label: &Label) -> JsonLabel {
        let location = self.source.as_ref().map(|source| {
            let (line, column) = source.line_col(label.span);
            JsonLocation {
                file: source.path().to_owned(),
                line,
                column,
            }
        });
        JsonLabel {
            start: label.span.start,
            end: label.span.end,
            location,
            message: label.message.clone(),
            primary: label.is_primary,
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let labels = diagnostic.labels.iter().map(|l| self.label(l)).collect();
        self.records.push(JsonDiagnostic {
            code: diagnostic.code.as_str(),
            severity: diagnostic.severity.as_str(),
            message: diagnostic.message.clone(),
            labels,
            notes: diagnostic.notes.clone(),
            suggestions: diagnostic.suggestions.clone(),
        });
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}
