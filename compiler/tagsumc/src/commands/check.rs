//! The `check` command: report diagnostics without running anything.

use tagsum_ir::StringInterner;

use super::front_end;
use crate::{compile, CommandOutput, CompileOptions};

pub fn check_source(path: &str, source: &str, options: &CompileOptions) -> CommandOutput {
    let interner = StringInterner::new();
    let compiled = compile(path, source, &interner, options);
    let stderr = match front_end(path, source, &compiled, options) {
        Ok(stderr) => stderr,
        Err(failure) => return failure,
    };

    let variants = compiled.program.decls.len();
    let functions = compiled.program.functions.len();
    CommandOutput {
        stdout: format!("OK: {path} ({variants} variants, {functions} functions)\n"),
        stderr,
        success: true,
    }
}
