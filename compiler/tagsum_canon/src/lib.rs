//! Lowering from the surface AST to the core IR.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Lower** → tagsum_eval
//! ```
//!
//! # Passes
//!
//! 1. **Collect** (`globals`): every variant is defined (declarations plus a
//!    registered match operator) and every function name is registered.
//!    Duplicate global names are rejected.
//! 2. **Lower** (`lower`): function bodies are translated to core expressions,
//!    expanding match use sites through the operator registry.
//!
//! Errors never stop lowering. A variant with a definition error is left
//! out, and a match site that fails to expand becomes `CoreExpr::Error`.

mod globals;
mod lint;
mod lower;

use tagsum_diagnostic::Diagnostic;
use tagsum_ir::ast::Module;
use tagsum_ir::{CoreFunction, Program, StringInterner};
use tagsum_patterns::NameSynthesizer;
use tracing::debug;

use crate::lower::Lowerer;

/// The lowered program and everything reported while producing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LowerOutput {
    pub program: Program,
    /// Errors and warnings, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl LowerOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Lower a parsed module.
#[tracing::instrument(level = "debug", skip_all, fields(items = module.items.len()))]
pub fn lower_module(module: &Module, interner: &StringInterner) -> LowerOutput {
    let names = NameSynthesizer::new(interner);
    let mut diagnostics = Vec::new();

    let collected = globals::collect(module, &names, &mut diagnostics);

    let mut lowerer = Lowerer::new(names, &collected.registry, &mut diagnostics);
    let functions: Vec<CoreFunction> = collected
        .functions
        .iter()
        .map(|def| CoreFunction {
            name: def.name.name,
            params: def.params.iter().map(|param| param.name).collect(),
            body: lowerer.lower_expr(&def.body),
        })
        .collect();

    debug!(
        variants = collected.decls.len(),
        functions = functions.len(),
        failed = functions.iter().filter(|f| f.body.has_errors()).count(),
        "lowered module"
    );

    LowerOutput {
        program: Program {
            decls: collected.decls,
            functions,
        },
        diagnostics,
    }
}

#[cfg(test)]
mod tests;
