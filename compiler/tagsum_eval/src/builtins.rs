//! Builtin functions available in every program.

use tagsum_ir::StringInterner;

use crate::errors::{EvalErrorKind, EvalResult};
use crate::output::OutputBuffer;
use crate::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Print the arguments separated by spaces, then a newline.
    Print,
    Max,
    Min,
    ToString,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Print, Builtin::Max, Builtin::Min, Builtin::ToString];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::ToString => "to_string",
        }
    }

    /// `None` for variadic builtins.
    pub fn arity(self) -> Option<usize> {
        match self {
            Builtin::Print => None,
            Builtin::Max | Builtin::Min => Some(2),
            Builtin::ToString => Some(1),
        }
    }

    pub fn call(
        self,
        args: &[Value],
        interner: &StringInterner,
        output: &OutputBuffer,
    ) -> EvalResult {
        if let Some(expected) = self.arity() {
            if args.len() != expected {
                return Err(EvalErrorKind::ArityMismatch {
                    callee: self.name().to_string(),
                    expected,
                    found: args.len(),
                }
                .into());
            }
        }

        match (self, args) {
            (Builtin::Print, _) => {
                let line = args
                    .iter()
                    .map(|arg| arg.display(interner).to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                output.println(&line);
                Ok(Value::Unit)
            }
            (Builtin::Max, [a, b]) => Ok(Value::Int(int_arg(a)?.max(int_arg(b)?))),
            (Builtin::Min, [a, b]) => Ok(Value::Int(int_arg(a)?.min(int_arg(b)?))),
            (Builtin::ToString, [value]) => Ok(Value::str(&value.display(interner).to_string())),
            _ => Err(EvalErrorKind::CompileError.into()),
        }
    }
}

fn int_arg(value: &Value) -> EvalResult<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(EvalErrorKind::TypeMismatch {
            expected: "int",
            found: other.type_name(),
        }
        .into()),
    }
}
