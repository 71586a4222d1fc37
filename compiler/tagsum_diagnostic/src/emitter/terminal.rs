//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. When a
//! source file is attached, labels are rendered as `path:line:col` with the
//! offending line and a caret underline.

use std::io::{self, Write};

use tagsum_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

struct SourceFile {
    path: String,
    text: String,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color and source snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Render labels against `text`, reporting locations relative to `path`.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        self.source = Some(SourceFile {
            path: path.into(),
            lines: LineOffsetTable::build(&text),
            text,
        });
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(severity.as_str(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn label_color(label: &Label) -> &'static str {
        if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        }
    }

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let Some(source) = self.source.take() else {
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, Self::label_color(label));
            let _ = writeln!(self.writer);
            return;
        };

        self.write_snippet(&source, label, marker);
        self.source = Some(source);
    }

    fn write_snippet(&mut self, source: &SourceFile, label: &Label, marker: &str) {
        let (line, col) = source.lines.offset_to_line_col(&source.text, label.span.start);
        let gutter = line.to_string().len();
        let pad = " ".repeat(gutter);

        let _ = writeln!(self.writer, "{pad}{marker} {}:{line}:{col}", source.path);
        let Some(text) = source.lines.line_text(&source.text, line) else {
            return;
        };

        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{line} | {text}");

        let underline = underline_width(text, col, label.span);
        let glyph = if label.is_primary { "^" } else { "-" };
        let _ = write!(
            self.writer,
            "{pad} | {}",
            " ".repeat(col.saturating_sub(1) as usize)
        );
        self.write_colored(
            &format!("{} {}", glyph.repeat(underline), label.message),
            Self::label_color(label),
        );
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Number of caret characters for a span, clipped to the end of its line.
fn underline_width(line_text: &str, col: u32, span: Span) -> usize {
    let remaining = line_text
        .chars()
        .count()
        .saturating_sub(col.saturating_sub(1) as usize);
    (span.len() as usize).clamp(1, remaining.max(1))
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);

            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };

            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {} warning{} emitted",
                    warning_count,
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {} warning{} emitted",
                warning_count,
                plural_s(warning_count)
            );
        }
    }
}
