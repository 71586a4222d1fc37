//! Unused clause parameter lint.
//!
//! Only named parameters of a parameter list are checked. Wildcards are
//! unused by construction, and a bare identifier (`label rest`) binds
//! nothing.

use tagsum_diagnostic::{Diagnostic, ErrorCode};
use tagsum_ir::ast::{ClausePattern, Param, ParamSpec};
use tagsum_ir::CoreExpr;
use tagsum_patterns::NameSynthesizer;

pub(crate) fn unused_params(
    pattern: &ClausePattern,
    body: &CoreExpr,
    names: &NameSynthesizer<'_>,
) -> Vec<Diagnostic> {
    let ClausePattern::Case {
        params: ParamSpec::List(params),
        ..
    } = pattern
    else {
        return Vec::new();
    };

    params
        .iter()
        .filter_map(|param| match param {
            Param::Named(ident) if !body.references(ident.name) => Some(
                Diagnostic::new(ErrorCode::W3004)
                    .with_message(format!("unused parameter `{}`", names.text(ident.name)))
                    .with_label(ident.span, "never used in the clause body")
                    .with_suggestion("write `_` to ignore this field"),
            ),
            Param::Named(_) | Param::Wildcard(_) => None,
        })
        .collect()
}
