//! The `expand` command: print the generated declarations and the core IR
//! every match site expanded to.

use tagsum_ir::pretty::program_to_string;
use tagsum_ir::StringInterner;

use super::front_end;
use crate::{compile, CommandOutput, CompileOptions};

pub fn expand_source(path: &str, source: &str, options: &CompileOptions) -> CommandOutput {
    let interner = StringInterner::new();
    let compiled = compile(path, source, &interner, options);
    match front_end(path, source, &compiled, options) {
        Ok(stderr) => CommandOutput {
            stdout: program_to_string(&compiled.program, &interner),
            stderr,
            success: true,
        },
        Err(failure) => failure,
    }
}
