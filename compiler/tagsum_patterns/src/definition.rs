//! Variant definition: validate once, then generate declarations and the
//! match operator.

use rustc_hash::FxHashMap;
use tagsum_ir::ast::VariantSpec;
use tagsum_ir::{Name, Span, TypeDecls};
use tracing::debug;

use crate::{type_builder, CaseSchema, DefinitionError, MatchOperator, NameSynthesizer};

/// Everything generated for one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDefinition {
    pub decls: TypeDecls,
    pub operator: MatchOperator,
}

/// Define the variant described by `spec`.
///
/// Case labels must be unique within the variant and field names unique
/// within each case.
#[tracing::instrument(level = "debug", skip_all, fields(variant = names.text(spec.name.name)))]
pub fn define_variant(
    spec: &VariantSpec,
    names: &NameSynthesizer<'_>,
) -> Result<VariantDefinition, DefinitionError> {
    validate(spec, names)?;

    let decls = type_builder::build(spec, names);
    let schema = CaseSchema::from_decls(&decls);
    let operator = MatchOperator::new(
        spec.name.name,
        names.match_operator(spec.name.name),
        schema,
    );
    debug!(
        declarations = decls.len(),
        operator = names.text(operator.name()),
        "defined variant"
    );
    Ok(VariantDefinition { decls, operator })
}

fn validate(spec: &VariantSpec, names: &NameSynthesizer<'_>) -> Result<(), DefinitionError> {
    let mut labels: FxHashMap<Name, Span> = FxHashMap::default();
    for case in &spec.cases {
        if let Some(&first) = labels.get(&case.label.name) {
            return Err(DefinitionError::DuplicateCaseLabel {
                variant: names.text(spec.name.name).to_owned(),
                label: names.text(case.label.name).to_owned(),
                span: case.label.span,
                first,
            });
        }
        labels.insert(case.label.name, case.label.span);

        let mut fields: FxHashMap<Name, Span> = FxHashMap::default();
        for field in &case.fields {
            if let Some(&first) = fields.get(&field.name.name) {
                return Err(DefinitionError::DuplicateField {
                    case: names.text(case.label.name).to_owned(),
                    field: names.text(field.name.name).to_owned(),
                    span: field.name.span,
                    first,
                });
            }
            fields.insert(field.name.name, field.name.span);
        }
    }
    Ok(())
}
