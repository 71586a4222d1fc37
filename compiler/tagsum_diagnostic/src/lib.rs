//! Diagnostic system for error reporting.
//!
//! Every diagnostic carries:
//! - an error code for searchability (`tagsum explain E3003`)
//! - a clear message (what went wrong)
//! - a primary span (where it went wrong)
//! - context labels, notes and suggestions (why, and how to fix it)

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
