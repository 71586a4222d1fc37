//! Parse error types.
//!
//! Each error records what went wrong, where, and (optionally) which
//! construct was being parsed, for "while parsing X" notes.

use tagsum_diagnostic::{Diagnostic, ErrorCode};
use tagsum_ir::Span;
use tagsum_lexer::TokenKind;

/// What was being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Variant,
    Case,
    FunctionDef,
    Expression,
    IfExpression,
    Block,
    MatchUse,
    MatchClause,
    Call,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Variant => "a variant declaration",
            ErrorContext::Case => "a case declaration",
            ErrorContext::FunctionDef => "a function definition",
            ErrorContext::Expression => "an expression",
            ErrorContext::IfExpression => "an if expression",
            ErrorContext::Block => "a block",
            ErrorContext::MatchUse => "a match expression",
            ErrorContext::MatchClause => "a match clause",
            ErrorContext::Call => "a call",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    ExpectedExpression {
        found: TokenKind,
    },
    /// Input ended before the closing delimiter of a construct opened at `open`.
    UnclosedDelimiter {
        open: Span,
        close: char,
    },
    ExpectedIdent {
        found: TokenKind,
    },
    InvalidClausePattern {
        found: TokenKind,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach `context` unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdent { .. } => ErrorCode::E1004,
            ParseErrorKind::InvalidClausePattern { .. } => ErrorCode::E1005,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                Diagnostic::new(ErrorCode::E1001)
                    .with_message(format!("expected {expected}, found {}", found.describe()))
                    .with_label(self.span, format!("expected {expected}"))
            }
            ParseErrorKind::ExpectedExpression { found } => Diagnostic::new(ErrorCode::E1002)
                .with_message(format!("expected expression, found {}", found.describe()))
                .with_label(self.span, "expected expression here"),
            ParseErrorKind::UnclosedDelimiter { open, close } => Diagnostic::new(ErrorCode::E1003)
                .with_message(format!("unclosed delimiter, expected `{close}`"))
                .with_label(self.span, format!("expected `{close}`"))
                .with_secondary_label(*open, "delimiter opened here"),
            ParseErrorKind::ExpectedIdent { found } => Diagnostic::new(ErrorCode::E1004)
                .with_message(format!("expected identifier, found {}", found.describe()))
                .with_label(self.span, "expected identifier"),
            ParseErrorKind::InvalidClausePattern { found } => Diagnostic::new(ErrorCode::E1005)
                .with_message(format!(
                    "expected a clause pattern, found {}",
                    found.describe()
                ))
                .with_label(self.span, "invalid clause pattern")
                .with_suggestion("write `label(a, b) => ...`, `label rest => ...` or `_ => ...`"),
        };

        match self.context {
            Some(context) => diag.with_note(format!("while parsing {}", context.description())),
            None => diag,
        }
    }
}
