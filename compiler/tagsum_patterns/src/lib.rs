//! Closed sum types and exhaustive match dispatch.
//!
//! [`define_variant`] turns a declarative [`VariantSpec`](tagsum_ir::ast::VariantSpec)
//! into type declarations and a [`MatchOperator`]. Operators are collected
//! in an [`OperatorRegistry`]; each match use site is then expanded by its
//! operator into a single-pass conditional dispatch over the scrutinee.
//!
//! Pipeline for one use site:
//!
//! ```text
//! clauses ──▶ dispatch::compile ──▶ [Branch { test, action }] ──▶ let + cond
//!               │        │
//!               │        └─ binder: accessor calls, positional
//!               └─ clause: clause body ──▶ callable
//! ```

pub mod binder;
pub mod clause;
mod definition;
pub mod dispatch;
mod error;
pub mod names;
mod operator;
mod registry;
mod schema;
pub mod type_builder;

pub use clause::{Clause, Selector};
pub use definition::{define_variant, VariantDefinition};
pub use dispatch::Dispatch;
pub use error::{DefinitionError, MatchError, MatchWarning};
pub use names::{IdentCase, NameSynthesizer};
pub use operator::{Expansion, MatchOperator};
pub use registry::OperatorRegistry;
pub use schema::{CaseEntry, CaseSchema};

#[cfg(test)]
mod test_helpers;
