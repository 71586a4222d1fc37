//! Runtime errors.
//!
//! Every kind maps to one `E6xxx` code. `CompileError` is raised when
//! evaluation reaches a placeholder left by a failed match site.

use tagsum_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("no clause of the `{variant}` match applies")]
    MatchFailure { variant: String },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("`{callee}` takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("a value of type `{found}` is not callable")]
    NotCallable { found: &'static str },

    #[error("expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot apply `{op}` to `{left}` and `{right}`")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("`{accessor}` expects a `{expected}`, found `{found}`")]
    WrongCase {
        accessor: String,
        expected: String,
        found: String,
    },

    #[error("maximum call depth of {limit} exceeded")]
    StackOverflow { limit: usize },

    #[error("program has no `main` function")]
    NoMain,

    #[error("integer overflow in `{op}`")]
    IntegerOverflow { op: &'static str },

    #[error("evaluated code that failed to compile")]
    CompileError,
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::MatchFailure { .. } => ErrorCode::E6001,
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E6002,
            EvalErrorKind::ArityMismatch { .. } => ErrorCode::E6003,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E6004,
            EvalErrorKind::TypeMismatch { .. } | EvalErrorKind::InvalidOperands { .. } => {
                ErrorCode::E6005
            }
            EvalErrorKind::WrongCase { .. } => ErrorCode::E6006,
            EvalErrorKind::StackOverflow { .. } => ErrorCode::E6007,
            EvalErrorKind::NoMain => ErrorCode::E6008,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6009,
            EvalErrorKind::CompileError => ErrorCode::E9001,
        }
    }
}

/// A runtime error and the functions it unwound through, innermost first.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub frames: Vec<String>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            frames: Vec::new(),
        }
    }

    /// Record that the error propagated out of `function`.
    #[must_use]
    pub fn in_function(mut self, function: &str) -> Self {
        self.frames.push(function.to_string());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::new(self.code()).with_message(self.kind.to_string());
        self.frames
            .iter()
            .fold(diagnostic, |d, frame| d.with_note(format!("in `{frame}`")))
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

pub type EvalResult<T = crate::Value> = Result<T, EvalError>;
