//! The `run` command: compile, then call `main`.

use tagsum_eval::{Interpreter, Value};
use tagsum_ir::StringInterner;

use super::front_end;
use crate::{compile, render_diagnostics, CommandOutput, CompileOptions};

/// Whatever `main` printed goes to stdout, followed by its result unless
/// that is unit. A runtime error keeps the output printed before it.
pub fn run_source(path: &str, source: &str, options: &CompileOptions) -> CommandOutput {
    let interner = StringInterner::new();
    let compiled = compile(path, source, &interner, options);
    let mut stderr = match front_end(path, source, &compiled, options) {
        Ok(stderr) => stderr,
        Err(failure) => return failure,
    };

    let mut interpreter = Interpreter::new(&compiled.program, &interner, options.eval);
    let result = interpreter.run_main();
    let mut stdout = interpreter.take_output();

    let success = match result {
        Ok(Value::Unit) => true,
        Ok(value) => {
            stdout.push_str(&value.display(&interner).to_string());
            stdout.push('\n');
            true
        }
        Err(error) => {
            stderr.push_str(&render_diagnostics(
                path,
                source,
                &[error.to_diagnostic()],
                options,
            ));
            false
        }
    };

    CommandOutput {
        stdout,
        stderr,
        success,
    }
}
