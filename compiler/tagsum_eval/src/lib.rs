//! Tagsum evaluator: runs lowered programs.
//!
//! # Architecture
//!
//! - `Environment`: immutable bindings in a scope chain over the globals
//! - `evaluate_binary`: direct enum dispatch for binary operators
//! - `Interpreter`: walks [`tagsum_ir::CoreExpr`], turning the generated
//!   declarations into constructors, accessors and predicates
//!
//! `print` writes to an [`OutputBuffer`] that the driver drains.

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod output;
mod stack;
mod value;

pub use builtins::Builtin;
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{EvalConfig, Interpreter};
pub use operators::evaluate_binary;
pub use output::OutputBuffer;
pub use value::{CaseInfo, Callable, Closure, FunctionValue, Value, ValueDisplay, VariantValue};
