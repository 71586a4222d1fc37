//! Error codes for all generator diagnostics.
//!
//! Each code is a unique identifier (e.g. `E3003`) whose first digit names the
//! phase that produced it. Used for `tagsum explain` lookups.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### where the first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E3xxx: Variant definition and match compilation errors
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
/// - W3xxx: Match compilation advisories
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Integer literal out of range
    E0003,
    /// Unterminated attribute
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Invalid match clause pattern
    E1005,

    // Variant / Match Errors (E3xxx)
    /// Match use with no clauses
    E3001,
    /// Default clause is not last
    E3002,
    /// Case handled by more than one clause
    E3003,
    /// Clause names a case the variant does not declare
    E3004,
    /// Variant declares the same case label twice
    E3005,
    /// Case declares the same field twice
    E3006,
    /// Generated or user-defined global name defined twice
    E3007,
    /// Unknown match operator
    E3008,

    // Runtime Errors (E6xxx)
    /// Match failure: no clause handled the scrutinee
    E6001,
    /// Undefined variable
    E6002,
    /// Arity mismatch
    E6003,
    /// Not callable
    E6004,
    /// Type mismatch
    E6005,
    /// Accessor applied to the wrong case
    E6006,
    /// Stack overflow (call depth limit)
    E6007,
    /// No `main` function
    E6008,
    /// Integer overflow
    E6009,

    // Internal Errors (E9xxx)
    /// Internal generator error
    E9001,
    /// Too many errors
    E9002,

    // Match Warnings (W3xxx)
    /// Non-exhaustive match
    W3001,
    /// Redundant default clause
    W3002,
    /// Clause parameter count differs from the case's field count
    W3003,
    /// Unused clause parameter
    W3004,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`; `test_all_codes_round_trip` catches
    /// any omission.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        // Variant / Match
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        // Runtime
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
        // Warnings
        ErrorCode::W3001,
        ErrorCode::W3002,
        ErrorCode::W3003,
        ErrorCode::W3004,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",

            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",

            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",

            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",

            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",

            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::W3003 => "W3003",
            ErrorCode::W3004 => "W3004",
        }
    }

    /// One-line description, used by `tagsum explain` when no long-form
    /// documentation exists.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "integer literal out of range",
            ErrorCode::E0004 => "unterminated attribute",

            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "invalid match clause pattern",

            ErrorCode::E3001 => "match use has no clauses",
            ErrorCode::E3002 => "default clause must be last",
            ErrorCode::E3003 => "case handled by more than one clause",
            ErrorCode::E3004 => "no such case in variant",
            ErrorCode::E3005 => "duplicate case label in variant",
            ErrorCode::E3006 => "duplicate field in case",
            ErrorCode::E3007 => "name defined more than once",
            ErrorCode::E3008 => "unknown match operator",

            ErrorCode::E6001 => "match failure",
            ErrorCode::E6002 => "undefined variable",
            ErrorCode::E6003 => "wrong number of arguments",
            ErrorCode::E6004 => "value is not callable",
            ErrorCode::E6005 => "type mismatch",
            ErrorCode::E6006 => "accessor applied to the wrong case",
            ErrorCode::E6007 => "maximum call depth exceeded",
            ErrorCode::E6008 => "no `main` function",
            ErrorCode::E6009 => "integer overflow",

            ErrorCode::E9001 => "internal generator error",
            ErrorCode::E9002 => "too many errors",

            ErrorCode::W3001 => "non-exhaustive match",
            ErrorCode::W3002 => "redundant default clause",
            ErrorCode::W3003 => "clause parameter count differs from field count",
            ErrorCode::W3004 => "unused clause parameter",
        }
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ErrorCode::W3001 | ErrorCode::W3002 | ErrorCode::W3003 | ErrorCode::W3004
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E3003"` or `"w3001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
