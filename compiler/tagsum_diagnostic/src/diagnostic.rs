//! The diagnostic every phase reports.
//!
//! A [`Diagnostic`] starts from an [`ErrorCode`]. The code's class decides
//! whether it is reported as an error or a warning; `--deny-warnings` later
//! promotes warnings with [`Diagnostic::deny`] while keeping the code, so
//! `tagsum explain` still finds the page.

use std::fmt;

use tagsum_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Severity `code` is reported at unless warnings are denied.
    pub fn of(code: ErrorCode) -> Self {
        if code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A highlighted span.
///
/// The primary label marks the offending code; secondary labels point at
/// related code, such as the clause that first handled a case.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is reported"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    /// Context, rendered as `= note: ...`.
    pub notes: Vec<String>,
    /// Fixes, rendered as `= help: ...`.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn new(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::of(code),
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Highlight the offending code. The first primary label is the
    /// position the queue sorts by.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.label(span, message.into(), true)
    }

    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.label(span, message.into(), false)
    }

    fn label(mut self, span: Span, message: String, is_primary: bool) -> Self {
        self.labels.push(Label {
            span,
            message,
            is_primary,
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary)
            .map(|label| label.span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Report a warning as an error (`--deny-warnings`).
    ///
    /// Errors pass through untouched. A promoted warning gains a note
    /// saying why it stops the build.
    pub fn deny(mut self) -> Self {
        if self.is_warning() {
            self.severity = Severity::Error;
            self.notes
                .push(format!("`{}` is denied by `--deny-warnings`", self.code));
        }
        self
    }
}

/// Plain one-block rendering, for logs and test failures. The terminal
/// emitter draws source snippets instead.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let role = if label.is_primary { "at" } else { "see" };
            write!(
                f,
                "\n  {role} {}..{}: {}",
                label.span.start, label.span.end, label.message
            )?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }
        Ok(())
    }
}
