//! The match compiler.
//!
//! Turns an ordered clause list into an ordered test/action list. Clauses
//! are validated in supply order:
//!
//! 1. a default clause must be last
//! 2. each case may be handled once
//! 3. each label must name a declared case
//!
//! Without a default clause an unconditional fallback raising a match
//! failure is appended; coverage gaps are reported as advisories, never as
//! errors.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tagsum_ir::ast::{ClausePattern, ParamSpec};
use tagsum_ir::{Branch, CoreExpr, Name, Span, Test};
use tracing::{debug, trace};

use crate::clause::{self, Clause, Selector};
use crate::{binder, CaseSchema, MatchError, MatchWarning, NameSynthesizer};

/// Compiled dispatch for one use site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    /// Branches in clause order, then the fallback if there is one.
    pub branches: Vec<Branch>,
    pub warnings: Vec<MatchWarning>,
}

/// Compile `clauses` against `schema`, testing the value bound to `scrutinee`.
///
/// `span` covers the whole use site and is used for site-level reports.
pub fn compile(
    variant: Name,
    schema: &CaseSchema,
    clauses: Vec<Clause>,
    scrutinee: Name,
    span: Span,
    names: &NameSynthesizer<'_>,
) -> Result<Dispatch, MatchError> {
    if clauses.is_empty() {
        return Err(MatchError::EmptyMatch {
            variant: names.text(variant).to_owned(),
            span,
        });
    }

    let count = clauses.len();
    let mut branches = Vec::with_capacity(count + 1);
    let mut warnings = Vec::new();
    let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
    let mut default_span = None;

    for (index, clause) in clauses.into_iter().enumerate() {
        let selector = clause.selector();

        if let Some(default) = default_span {
            return Err(MatchError::OutOfOrderDefault {
                default_span: default,
                following: clause.span,
            });
        }

        match selector {
            Selector::Default => {
                default_span = Some(clause.span);
                if index + 1 != count {
                    continue;
                }
            }
            Selector::Case(label) => {
                if let Some(&first) = seen.get(&label.name) {
                    return Err(MatchError::DuplicateCase {
                        label: names.text(label.name).to_owned(),
                        span: label.span,
                        first,
                    });
                }
            }
        }

        let case = binder::case_of(selector, variant, schema, names)?;
        let fields = binder::fields_of(case);
        if let ClausePattern::Case {
            label,
            params: ParamSpec::List(params),
        } = &clause.pattern
        {
            if params.len() != fields.len() {
                warnings.push(MatchWarning::ArityMismatch {
                    label: names.text(label.name).to_owned(),
                    expected: fields.len(),
                    found: params.len(),
                    span: clause.span,
                });
            }
        }

        let args = binder::args_for(variant, selector, fields, scrutinee, names);
        let selector_span = clause.selector_span();
        let lambda = clause::compile(&clause.pattern, clause.body, names);
        let action = CoreExpr::call(CoreExpr::Lambda(Arc::new(lambda)), args);

        let test = match case {
            None => Test::Always,
            Some(entry) => {
                seen.insert(entry.label, selector_span);
                Test::Case {
                    scrutinee,
                    variant,
                    tag: entry.tag,
                    predicate: entry.predicate,
                }
            }
        };
        trace!(?test, "branch");
        branches.push(Branch { test, action });
    }

    let missing: Vec<String> = schema
        .labels()
        .filter(|label| !seen.contains_key(label))
        .map(|label| names.text(label).to_owned())
        .collect();

    match default_span {
        None => {
            branches.push(Branch {
                test: Test::Always,
                action: CoreExpr::Fail { variant },
            });
            if !missing.is_empty() {
                warnings.push(MatchWarning::NonExhaustive {
                    variant: names.text(variant).to_owned(),
                    missing,
                    span,
                });
            }
        }
        Some(default) => {
            if missing.is_empty() {
                warnings.push(MatchWarning::RedundantDefault {
                    variant: names.text(variant).to_owned(),
                    span: default,
                });
            }
        }
    }

    debug!(
        variant = names.text(variant),
        branches = branches.len(),
        warnings = warnings.len(),
        "compiled dispatch"
    );
    Ok(Dispatch { branches, warnings })
}

#[cfg(test)]
mod tests;
