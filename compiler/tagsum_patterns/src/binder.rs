//! Positional binding of case fields to clause arguments.

use tagsum_ir::{CoreExpr, Name};

use crate::clause::Selector;
use crate::{CaseEntry, CaseSchema, MatchError, NameSynthesizer};

/// The case the clause for `selector` handles; `None` for the default clause.
pub fn case_of<'s>(
    selector: Selector,
    variant: Name,
    schema: &'s CaseSchema,
    names: &NameSynthesizer<'_>,
) -> Result<Option<&'s CaseEntry>, MatchError> {
    match selector {
        Selector::Default => Ok(None),
        Selector::Case(label) => schema
            .get(label.name)
            .map(Some)
            .ok_or_else(|| MatchError::NoSuchCase {
                variant: names.text(variant).to_owned(),
                label: names.text(label.name).to_owned(),
                span: label.span,
                known: schema.labels().map(|l| names.text(l).to_owned()).collect(),
            }),
    }
}

/// Fields the clause for `selector` receives, in declared order.
pub fn fields_of(case: Option<&CaseEntry>) -> &[Name] {
    case.map_or(&[], |entry| entry.fields.as_slice())
}

/// Accessor calls on `scrutinee`, one per field in declared order.
pub fn args_for(
    variant: Name,
    selector: Selector,
    fields: &[Name],
    scrutinee: Name,
    names: &NameSynthesizer<'_>,
) -> Vec<CoreExpr> {
    match selector {
        Selector::Default => Vec::new(),
        Selector::Case(label) => fields
            .iter()
            .map(|&field| {
                let accessor = names.accessor(variant, label.name, field);
                CoreExpr::call(CoreExpr::var(accessor), vec![CoreExpr::var(scrutinee)])
            })
            .collect(),
    }
}
