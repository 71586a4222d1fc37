//! Tagsum IR: spans, interned names, the surface syntax tree, generated type
//! declarations and the core IR that match use sites expand into.

mod interner;
mod name;
mod span;

pub mod ast;
pub mod core_ir;
pub mod decl;
pub mod pretty;

pub use core_ir::{
    Branch, CaseTag, CoreExpr, CoreFunction, Lambda, LambdaParam, Literal, Program, Test,
};
pub use decl::{CaseDecl, Decl, FieldDecl, TypeDecls, VariantDecl};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
