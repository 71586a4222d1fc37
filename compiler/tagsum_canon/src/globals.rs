//! Pass 1: define variants, register functions, and keep the global
//! namespace free of duplicates.
//!
//! Functions, variant types, constructors, accessors, predicates and match
//! operators share one namespace. A variant whose generated names clash with
//! anything already defined is reported and left out entirely.

use rustc_hash::FxHashMap;
use tagsum_diagnostic::{Diagnostic, ErrorCode};
use tagsum_ir::ast::{FunctionDef, Item, Module, VariantSpec};
use tagsum_ir::{Name, Span, TypeDecls};
use tagsum_patterns::{define_variant, NameSynthesizer, OperatorRegistry};
use tracing::debug;

/// Output of pass 1.
pub(crate) struct Collected<'m> {
    pub decls: Vec<TypeDecls>,
    pub registry: OperatorRegistry,
    /// Functions to lower, in source order.
    pub functions: Vec<&'m FunctionDef>,
}

#[derive(Copy, Clone)]
struct Definition {
    span: Span,
    kind: &'static str,
}

pub(crate) fn collect<'m>(
    module: &'m Module,
    names: &NameSynthesizer<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Collected<'m> {
    let mut globals: FxHashMap<Name, Definition> = FxHashMap::default();
    let mut collected = Collected {
        decls: Vec::new(),
        registry: OperatorRegistry::new(),
        functions: Vec::new(),
    };

    for item in &module.items {
        match item {
            Item::Variant(spec) => {
                let definition = match define_variant(spec, names) {
                    Ok(definition) => definition,
                    Err(error) => {
                        diagnostics.push(error.to_diagnostic());
                        continue;
                    }
                };

                let mut local: FxHashMap<Name, Definition> = FxHashMap::default();
                let mut clashes = Vec::new();
                let generated =
                    generated_names(spec, &definition.decls, definition.operator.name());
                for (name, defined) in generated {
                    match globals.get(&name).or_else(|| local.get(&name)) {
                        Some(first) => clashes.push(duplicate(names, name, defined, *first)),
                        None => {
                            local.insert(name, defined);
                        }
                    }
                }

                if clashes.is_empty() {
                    globals.extend(local);
                    collected.registry.register(definition.operator);
                    collected.decls.push(definition.decls);
                } else {
                    debug!(
                        variant = names.text(spec.name.name),
                        clashes = clashes.len(),
                        "variant rejected"
                    );
                    diagnostics.extend(clashes);
                }
            }
            Item::Function(def) => {
                let defined = Definition {
                    span: def.name.span,
                    kind: "a function",
                };
                if let Some(first) = globals.get(&def.name.name) {
                    diagnostics.push(duplicate(names, def.name.name, defined, *first));
                    continue;
                }
                globals.insert(def.name.name, defined);
                collected.functions.push(def);
            }
        }
    }

    collected
}

/// Every global name a variant introduces, with where it comes from.
fn generated_names(
    spec: &VariantSpec,
    decls: &TypeDecls,
    operator: Name,
) -> Vec<(Name, Definition)> {
    let at = |span, kind| Definition { span, kind };
    let mut out = vec![
        (decls.variant.name, at(spec.name.span, "a type")),
        (operator, at(spec.name.span, "a match operator")),
    ];
    for (case, decl) in spec.cases.iter().zip(&decls.cases) {
        out.push((decl.name, at(case.label.span, "a constructor")));
        out.push((decl.predicate, at(case.label.span, "a predicate")));
        for (field, field_decl) in case.fields.iter().zip(&decl.fields) {
            out.push((field_decl.accessor, at(field.name.span, "an accessor")));
        }
    }
    out
}

#[cold]
fn duplicate(
    names: &NameSynthesizer<'_>,
    name: Name,
    defined: Definition,
    first: Definition,
) -> Diagnostic {
    Diagnostic::new(ErrorCode::E3007)
        .with_message(format!("`{}` is defined more than once", names.text(name)))
        .with_label(defined.span, format!("defined again here as {}", defined.kind))
        .with_secondary_label(first.span, format!("first defined here as {}", first.kind))
}
