//! Builders for variant specs and clauses in unit tests.

use tagsum_ir::ast::{
    CaseSpec, ClausePattern, FieldSpec, Ident, Options, Param, ParamSpec, VariantSpec,
};
use tagsum_ir::{CoreExpr, Literal, Span, StringInterner};

use crate::Clause;

pub(crate) fn ident(interner: &StringInterner, text: &str) -> Ident {
    Ident::new(interner.intern(text), Span::DUMMY)
}

/// `variant name { label(field, ...), ... }`
pub(crate) fn spec(interner: &StringInterner, name: &str, cases: &[(&str, &[&str])]) -> VariantSpec {
    VariantSpec {
        name: ident(interner, name),
        options: Options::default(),
        cases: cases
            .iter()
            .map(|(label, fields)| CaseSpec {
                label: ident(interner, label),
                options: Options::default(),
                fields: fields
                    .iter()
                    .map(|field| FieldSpec {
                        name: ident(interner, field),
                        options: Options::default(),
                    })
                    .collect(),
                span: Span::DUMMY,
            })
            .collect(),
        span: Span::DUMMY,
    }
}

/// The binary tree used throughout: `leaf`, `node(val, left, right)`.
pub(crate) fn tree_spec(interner: &StringInterner) -> VariantSpec {
    spec(
        interner,
        "Tree",
        &[("leaf", &[]), ("node", &["val", "left", "right"])],
    )
}

pub(crate) fn int(n: i64) -> CoreExpr {
    CoreExpr::Lit(Literal::Int(n))
}

/// `label(params) => body`; `_` in `params` is a wildcard.
pub(crate) fn case_clause(
    interner: &StringInterner,
    label: &str,
    params: &[&str],
    body: CoreExpr,
) -> Clause {
    let params = params
        .iter()
        .map(|&param| {
            if param == "_" {
                Param::Wildcard(Span::DUMMY)
            } else {
                Param::Named(ident(interner, param))
            }
        })
        .collect();
    Clause::new(
        ClausePattern::Case {
            label: ident(interner, label),
            params: ParamSpec::List(params),
        },
        body,
        Span::DUMMY,
    )
}

/// `label rest => body`
pub(crate) fn ignore_clause(interner: &StringInterner, label: &str, body: CoreExpr) -> Clause {
    Clause::new(
        ClausePattern::Case {
            label: ident(interner, label),
            params: ParamSpec::Ignore(Param::Named(ident(interner, "rest"))),
        },
        body,
        Span::DUMMY,
    )
}

/// `_ => body`
pub(crate) fn default_clause(body: CoreExpr) -> Clause {
    Clause::new(ClausePattern::Default, body, Span::DUMMY)
}
