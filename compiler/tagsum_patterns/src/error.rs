//! Build-time errors and advisories for variants and match use sites.
//!
//! Names are stored as resolved text so the errors display without an
//! interner; spans point back into the source for diagnostics.

use tagsum_diagnostic::{Diagnostic, ErrorCode};
use tagsum_ir::Span;

/// A match use site that cannot be compiled. Aborts only that site.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("match on `{variant}` has no clauses")]
    EmptyMatch { variant: String, span: Span },

    #[error("default clause must be the last clause")]
    OutOfOrderDefault {
        default_span: Span,
        /// The first clause after the default.
        following: Span,
    },

    #[error("case `{label}` is handled more than once")]
    DuplicateCase {
        label: String,
        span: Span,
        first: Span,
    },

    #[error("`{variant}` has no case `{label}`")]
    NoSuchCase {
        variant: String,
        label: String,
        span: Span,
        known: Vec<String>,
    },

    #[error("unknown match operator `{name}`")]
    UnknownOperator { name: String, span: Span },
}

impl MatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchError::EmptyMatch { .. } => ErrorCode::E3001,
            MatchError::OutOfOrderDefault { .. } => ErrorCode::E3002,
            MatchError::DuplicateCase { .. } => ErrorCode::E3003,
            MatchError::NoSuchCase { .. } => ErrorCode::E3004,
            MatchError::UnknownOperator { .. } => ErrorCode::E3008,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code()).with_message(self.to_string());
        match self {
            MatchError::EmptyMatch { span, .. } => diag
                .with_label(*span, "no clauses")
                .with_suggestion("add a clause for each case, or `_ => ...`"),
            MatchError::OutOfOrderDefault {
                default_span,
                following,
            } => diag
                .with_label(*default_span, "default clause here")
                .with_secondary_label(*following, "this clause can never be reached")
                .with_suggestion("move `_ => ...` to the end"),
            MatchError::DuplicateCase { span, first, .. } => diag
                .with_label(*span, "handled again here")
                .with_secondary_label(*first, "first handled here"),
            MatchError::NoSuchCase { span, known, .. } => {
                let diag = diag.with_label(*span, "unknown case");
                if known.is_empty() {
                    diag.with_note("the variant declares no cases")
                } else {
                    diag.with_note(format!("declared cases: {}", known.join(", ")))
                }
            }
            MatchError::UnknownOperator { span, .. } => diag
                .with_label(*span, "not a match operator")
                .with_note("match operators are generated by `variant` declarations"),
        }
    }
}

/// A variant declaration that cannot be defined. Aborts only that variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("variant `{variant}` declares case `{label}` more than once")]
    DuplicateCaseLabel {
        variant: String,
        label: String,
        span: Span,
        first: Span,
    },

    #[error("case `{case}` declares field `{field}` more than once")]
    DuplicateField {
        case: String,
        field: String,
        span: Span,
        first: Span,
    },
}

impl DefinitionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DefinitionError::DuplicateCaseLabel { .. } => ErrorCode::E3005,
            DefinitionError::DuplicateField { .. } => ErrorCode::E3006,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (span, first) = match self {
            DefinitionError::DuplicateCaseLabel { span, first, .. }
            | DefinitionError::DuplicateField { span, first, .. } => (*span, *first),
        };
        Diagnostic::new(self.code())
            .with_message(self.to_string())
            .with_label(span, "declared again here")
            .with_secondary_label(first, "first declared here")
    }
}

/// Advisory produced while compiling a match use site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchWarning {
    /// No default clause and these cases have no clause.
    NonExhaustive {
        variant: String,
        missing: Vec<String>,
        span: Span,
    },
    /// A default clause after every case is already handled.
    RedundantDefault { variant: String, span: Span },
    /// A parameter list whose length differs from the case's field count.
    ArityMismatch {
        label: String,
        expected: usize,
        found: usize,
        span: Span,
    },
}

impl MatchWarning {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchWarning::NonExhaustive { .. } => ErrorCode::W3001,
            MatchWarning::RedundantDefault { .. } => ErrorCode::W3002,
            MatchWarning::ArityMismatch { .. } => ErrorCode::W3003,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code());
        match self {
            MatchWarning::NonExhaustive {
                variant,
                missing,
                span,
            } => diag
                .with_message(format!(
                    "non-exhaustive match on `{variant}`: missing {}",
                    quote_list(missing)
                ))
                .with_label(*span, "not all cases are handled")
                .with_note(format!(
                    "a value of a missing case raises a match failure for `{variant}`"
                )),
            MatchWarning::RedundantDefault { variant, span } => diag
                .with_message(format!(
                    "default clause is unreachable: every case of `{variant}` is handled"
                ))
                .with_label(*span, "redundant default"),
            MatchWarning::ArityMismatch {
                label,
                expected,
                found,
                span,
            } => diag
                .with_message(format!(
                    "clause for `{label}` takes {found} parameter{}, but the case has {expected} field{}",
                    plural(*found),
                    plural(*expected)
                ))
                .with_label(*span, format!("expected {expected}")),
        }
    }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
