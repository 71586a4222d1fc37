//! Diagnostic queue for collecting, deduplicating and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical diagnostics at the same position
//! - Position-ordered flushing

use tagsum_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    line: u32,
    column: u32,
}

/// Collects diagnostics for one source file.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    error_count: usize,
    warning_count: usize,
    suppressed: usize,
    lines: LineOffsetTable,
    source_len: u32,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Queue for diagnostics about `source`.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, DiagnosticConfig::default())
    }

    pub fn with_config(source: &str, config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            suppressed: 0,
            lines: LineOffsetTable::build(source),
            source_len: u32::try_from(source.len()).unwrap_or(u32::MAX),
            config,
        }
    }

    /// Add a diagnostic. Returns `false` if it was dropped.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();

        if is_error && self.limit_reached() {
            self.suppressed += 1;
            return false;
        }

        let (line, column) = self.position(diag.primary_span().unwrap_or(Span::DUMMY));

        if self.config.deduplicate
            && self
                .diagnostics
                .iter()
                .any(|queued| queued.line == line && queued.diagnostic == diag)
        {
            return false;
        }

        if is_error {
            self.error_count += 1;
        } else if diag.is_warning() {
            self.warning_count += 1;
        }

        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            line,
            column,
        });
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.add(diag);
        }
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Drain all diagnostics sorted by position (stable within a position).
    ///
    /// If errors were dropped by the limit, a trailing `E9002` reports how many.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| (d.line, d.column));

        let mut result: Vec<Diagnostic> =
            self.diagnostics.drain(..).map(|d| d.diagnostic).collect();

        if self.suppressed > 0 {
            result.push(
                Diagnostic::new(ErrorCode::E9002)
                    .with_message(format!(
                        "too many errors; {} more not shown",
                        self.suppressed
                    ))
                    .with_note(format!(
                        "the error limit is {}; raise it with `--error-limit`",
                        self.config.error_limit
                    )),
            );
        }

        self.error_count = 0;
        self.warning_count = 0;
        self.suppressed = 0;
        result
    }

    /// 1-based (line, column) of a span's start, as used for sorting.
    pub fn position(&self, span: Span) -> (u32, u32) {
        let offset = span.start.min(self.source_len);
        let line = self.lines.line_from_offset(offset);
        let start = self.lines.line_start_offset(line).unwrap_or(0);
        (line, offset - start.min(offset) + 1)
    }
}

#[cfg(test)]
mod tests;
