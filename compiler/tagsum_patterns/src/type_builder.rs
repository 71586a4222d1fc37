//! Type declaration generation.
//!
//! Pure translation of a [`VariantSpec`] into one abstract declaration plus
//! one concrete declaration per case. Validation happens earlier, in
//! [`define_variant`](crate::define_variant).

use tagsum_ir::ast::VariantSpec;
use tagsum_ir::{CaseDecl, CaseTag, FieldDecl, TypeDecls, VariantDecl};
use tracing::trace;

use crate::NameSynthesizer;

/// Build the declarations for `spec`. Case tags are declaration indices.
pub fn build(spec: &VariantSpec, names: &NameSynthesizer<'_>) -> TypeDecls {
    let variant = spec.name.name;

    let cases = spec
        .cases
        .iter()
        .zip(0u32..)
        .map(|(case, tag)| {
            let label = case.label.name;
            let decl = CaseDecl {
                name: names.case_type(variant, label),
                label,
                parent: variant,
                tag: CaseTag(tag),
                predicate: names.predicate(variant, label),
                options: case.options.clone(),
                fields: case
                    .fields
                    .iter()
                    .map(|field| FieldDecl {
                        name: field.name.name,
                        accessor: names.accessor(variant, label, field.name.name),
                        options: field.options.clone(),
                    })
                    .collect(),
            };
            trace!(case = names.text(decl.name), tag, "case declaration");
            decl
        })
        .collect();

    TypeDecls {
        variant: VariantDecl {
            name: variant,
            options: spec.options.clone(),
        },
        cases,
    }
}
