//! The `explain` command: long-form documentation for an error code.

use tagsum_diagnostic::{ErrorCode, ErrorDocs};

use crate::CommandOutput;

/// Codes without a documentation page fall back to their one-line
/// description.
pub fn explain_code(code_str: &str) -> CommandOutput {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        return CommandOutput::failure(format!(
            "Unknown error code: {code_str}\n\n\
             Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.\n\
             Examples: E0001, E3003, W3001\n"
        ));
    };

    let stdout = match ErrorDocs::get(code) {
        Some(doc) => doc.to_string(),
        None => format!("{code}: {}\n", code.description()),
    };
    CommandOutput {
        stdout,
        stderr: String::new(),
        success: true,
    }
}
