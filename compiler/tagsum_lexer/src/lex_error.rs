//! Lexer error types.

use tagsum_diagnostic::{Diagnostic, ErrorCode};
use tagsum_ir::Span;

/// A lexer error with the span it covers.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"` for string literal.
    UnterminatedString,
    /// Character that starts no token.
    InvalidCharacter(char),
    /// Integer literal overflowed `i64`.
    IntOverflow,
    /// `#[` without a matching `]`.
    UnterminatedAttribute,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        match &self.kind {
            LexErrorKind::UnterminatedString => Diagnostic::new(ErrorCode::E0001)
                .with_message("unterminated string literal")
                .with_label(self.span, "string starts here")
                .with_suggestion("add a closing `\"`"),
            LexErrorKind::InvalidCharacter(c) => Diagnostic::new(ErrorCode::E0002)
                .with_message(format!("invalid character {c:?}"))
                .with_label(self.span, "not valid here"),
            LexErrorKind::IntOverflow => Diagnostic::new(ErrorCode::E0003)
                .with_message("integer literal is too large")
                .with_label(self.span, "does not fit in a 64-bit signed integer"),
            LexErrorKind::UnterminatedAttribute => Diagnostic::new(ErrorCode::E0004)
                .with_message("unterminated attribute")
                .with_label(self.span, "attribute opened here")
                .with_suggestion("close the attribute with `]`"),
        }
    }
}
