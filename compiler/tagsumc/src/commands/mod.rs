//! Driver commands.
//!
//! Each command takes the file path and its contents and returns a
//! [`CommandOutput`](crate::CommandOutput); `main` only does the I/O.

mod check;
mod expand;
mod explain;
mod run;

pub use check::check_source;
pub use expand::expand_source;
pub use explain::explain_code;
pub use run::run_source;

use crate::{render_diagnostics, CommandOutput, CompileOptions, Compiled};

/// Read a source file, or describe why it could not be read.
pub fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("error: cannot read '{path}': {e}"))
}

/// Diagnostics of a compilation, or a failed output if it has errors.
fn front_end(
    path: &str,
    source: &str,
    compiled: &Compiled,
    options: &CompileOptions,
) -> Result<String, CommandOutput> {
    let rendered = if compiled.diagnostics.is_empty() {
        String::new()
    } else {
        render_diagnostics(path, source, &compiled.diagnostics, options)
    };
    if compiled.has_errors() {
        Err(CommandOutput::failure(rendered))
    } else {
        Ok(rendered)
    }
}
