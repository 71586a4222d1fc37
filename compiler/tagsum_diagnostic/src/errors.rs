//! Embedded long-form error documentation for `tagsum explain`.
//!
//! Each documented code has a markdown file in `errors/` that is embedded at
//! compile time. Codes without a file fall back to
//! [`ErrorCode::description`].

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Get the documentation for an error code.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Get all documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    /// Check if an error code has documentation.
    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Parser errors (E1xxx)
    (ErrorCode::E1005, include_str!("errors/E1005.md")),
    // Variant / match errors (E3xxx)
    (ErrorCode::E3001, include_str!("errors/E3001.md")),
    (ErrorCode::E3002, include_str!("errors/E3002.md")),
    (ErrorCode::E3003, include_str!("errors/E3003.md")),
    (ErrorCode::E3004, include_str!("errors/E3004.md")),
    (ErrorCode::E3005, include_str!("errors/E3005.md")),
    (ErrorCode::E3006, include_str!("errors/E3006.md")),
    (ErrorCode::E3007, include_str!("errors/E3007.md")),
    (ErrorCode::E3008, include_str!("errors/E3008.md")),
    // Runtime errors (E6xxx)
    (ErrorCode::E6001, include_str!("errors/E6001.md")),
    (ErrorCode::E6006, include_str!("errors/E6006.md")),
    // Warnings (W3xxx)
    (ErrorCode::W3001, include_str!("errors/W3001.md")),
    (ErrorCode::W3002, include_str!("errors/W3002.md")),
    (ErrorCode::W3003, include_str!("errors/W3003.md")),
    (ErrorCode::W3004, include_str!("errors/W3004.md")),
];
