#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tagsum_ir::{CaseTag, Lambda, LambdaParam, StringInterner};

use super::*;
use crate::test_helpers::{case_clause, default_clause, ignore_clause, int, spec, tree_spec};
use crate::type_builder;

struct Fixture {
    interner: StringInterner,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            interner: StringInterner::new(),
        }
    }

    fn run(
        &self,
        variant: &tagsum_ir::ast::VariantSpec,
        clauses: Vec<Clause>,
    ) -> Result<Dispatch, MatchError> {
        let names = NameSynthesizer::new(&self.interner);
        let decls = type_builder::build(variant, &names);
        let schema = CaseSchema::from_decls(&decls);
        compile(
            variant.name.name,
            &schema,
            clauses,
            self.interner.intern("s"),
            Span::new(0, 10),
            &names,
        )
    }

    fn tree(&self, clauses: Vec<Clause>) -> Result<Dispatch, MatchError> {
        self.run(&tree_spec(&self.interner), clauses)
    }

    fn clause(&self, label: &str, params: &[&str], body: i64) -> Clause {
        case_clause(&self.interner, label, params, int(body))
    }
}

fn lambda_of(branch: &Branch) -> &Lambda {
    match &branch.action {
        CoreExpr::Call { callee, .. } => match callee.as_ref() {
            CoreExpr::Lambda(lambda) => lambda,
            other => panic!("expected lambda callee, got {other:?}"),
        },
        other => panic!("expected call action, got {other:?}"),
    }
}

fn args_of(branch: &Branch) -> &[CoreExpr] {
    match &branch.action {
        CoreExpr::Call { args, .. } => args,
        other => panic!("expected call action, got {other:?}"),
    }
}

/// Rename every synthesized `%` name to one placeholder so two
/// compilations of the same site can be compared.
fn without_fresh_names(dispatch: &Dispatch, interner: &StringInterner) -> Dispatch {
    let fresh = interner.intern("fresh%");
    let rename = |name: Name| {
        if interner.lookup(name).contains('%') {
            fresh
        } else {
            name
        }
    };
    Dispatch {
        branches: dispatch
            .branches
            .iter()
            .map(|branch| Branch {
                test: branch.test,
                action: rename_expr(&branch.action, &rename),
            })
            .collect(),
        warnings: dispatch.warnings.clone(),
    }
}

fn rename_expr(expr: &CoreExpr, rename: &dyn Fn(Name) -> Name) -> CoreExpr {
    match expr {
        CoreExpr::Var(name) => CoreExpr::Var(rename(*name)),
        CoreExpr::Call { callee, args } => CoreExpr::call(
            rename_expr(callee, rename),
            args.iter().map(|arg| rename_expr(arg, rename)).collect(),
        ),
        CoreExpr::Lambda(lambda) => CoreExpr::Lambda(Arc::new(Lambda {
            params: lambda
                .params
                .iter()
                .map(|param| LambdaParam {
                    name: rename(param.name),
                    unused: param.unused,
                })
                .collect(),
            variadic: lambda.variadic,
            body: rename_expr(&lambda.body, rename),
        })),
        other => other.clone(),
    }
}

#[test]
fn test_exhaustive_match_appends_fallback() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![
            fx.clause("leaf", &[], 0),
            fx.clause("node", &["v", "l", "r"], 1),
        ])
        .unwrap();

    assert!(dispatch.warnings.is_empty());
    assert_eq!(dispatch.branches.len(), 3);
    assert!(matches!(
        dispatch.branches[0].test,
        Test::Case { tag: CaseTag(0), .. }
    ));
    assert!(matches!(
        dispatch.branches[1].test,
        Test::Case { tag: CaseTag(1), .. }
    ));
    let fallback = &dispatch.branches[2];
    assert!(fallback.test.is_always());
    assert_eq!(
        fallback.action,
        CoreExpr::Fail {
            variant: fx.interner.intern("Tree")
        }
    );
}

#[test]
fn test_branch_order_follows_clause_order() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![
            fx.clause("node", &["v", "l", "r"], 1),
            fx.clause("leaf", &[], 0),
        ])
        .unwrap();

    let tags: Vec<_> = dispatch
        .branches
        .iter()
        .filter_map(|b| match b.test {
            Test::Case { tag, .. } => Some(tag),
            Test::Always => None,
        })
        .collect();
    assert_eq!(tags, vec![CaseTag(1), CaseTag(0)]);
}

#[test]
fn test_case_test_carries_predicate_and_scrutinee() {
    let fx = Fixture::new();
    let dispatch = fx.tree(vec![fx.clause("leaf", &[], 0)]).unwrap();
    assert_eq!(
        dispatch.branches[0].test,
        Test::Case {
            scrutinee: fx.interner.intern("s"),
            variant: fx.interner.intern("Tree"),
            tag: CaseTag(0),
            predicate: fx.interner.intern("is_tree_leaf"),
        }
    );
}

#[test]
fn test_default_clause_is_unconditional_and_last() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![fx.clause("leaf", &[], 0), default_clause(int(9))])
        .unwrap();

    assert_eq!(dispatch.branches.len(), 2);
    assert!(dispatch.branches[1].test.is_always());
    assert_eq!(lambda_of(&dispatch.branches[1]).arity(), 0);
    assert!(args_of(&dispatch.branches[1]).is_empty());
    assert!(dispatch.warnings.is_empty());
}

#[test]
fn test_default_before_other_clauses_is_rejected() {
    let fx = Fixture::new();
    let result = fx.tree(vec![
        fx.clause("leaf", &[], 0),
        default_clause(int(1)),
        fx.clause("node", &["v", "l", "r"], 2),
    ]);
    assert!(matches!(result, Err(MatchError::OutOfOrderDefault { .. })));
}

#[test]
fn test_two_defaults_are_out_of_order() {
    let fx = Fixture::new();
    let result = fx.tree(vec![default_clause(int(0)), default_clause(int(1))]);
    assert!(matches!(result, Err(MatchError::OutOfOrderDefault { .. })));
}

#[test]
fn test_duplicate_case_names_the_label() {
    let fx = Fixture::new();
    let result = fx.tree(vec![fx.clause("leaf", &[], 0), fx.clause("leaf", &[], 1)]);
    let Err(MatchError::DuplicateCase { label, .. }) = result else {
        panic!("expected DuplicateCase, got {result:?}");
    };
    assert_eq!(label, "leaf");
}

#[test]
fn test_undeclared_label_is_no_such_case() {
    let fx = Fixture::new();
    let result = fx.tree(vec![fx.clause("Z", &[], 0)]);
    let Err(MatchError::NoSuchCase { label, variant, .. }) = result else {
        panic!("expected NoSuchCase, got {result:?}");
    };
    assert_eq!(label, "Z");
    assert_eq!(variant, "Tree");
}

#[test]
fn test_no_clauses_is_empty_match() {
    let fx = Fixture::new();
    let result = fx.tree(Vec::new());
    assert_eq!(
        result,
        Err(MatchError::EmptyMatch {
            variant: "Tree".to_string(),
            span: Span::new(0, 10),
        })
    );
}

#[test]
fn test_missing_cases_warn_in_declared_order() {
    let fx = Fixture::new();
    let variant = spec(
        &fx.interner,
        "Tree23",
        &[
            ("leaf", &[]),
            ("bnode", &["l", "v", "r"]),
            ("tnode", &["l", "a", "m", "b", "r"]),
        ],
    );
    let dispatch = fx
        .run(
            &variant,
            vec![
                fx.clause("tnode", &["l", "a", "m", "b", "r"], 0),
                fx.clause("leaf", &[], 1),
            ],
        )
        .unwrap();

    assert_eq!(
        dispatch.warnings,
        vec![MatchWarning::NonExhaustive {
            variant: "Tree23".to_string(),
            missing: vec!["bnode".to_string()],
            span: Span::new(0, 10),
        }]
    );
    assert!(dispatch.branches.last().is_some_and(|b| b.test.is_always()));
}

#[test]
fn test_full_coverage_plus_default_is_redundant() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![
            fx.clause("leaf", &[], 0),
            ignore_clause(&fx.interner, "node", int(1)),
            default_clause(int(2)),
        ])
        .unwrap();

    assert!(matches!(
        dispatch.warnings.as_slice(),
        [MatchWarning::RedundantDefault { variant, .. }] if variant == "Tree"
    ));
    // The default branch is still emitted.
    assert_eq!(dispatch.branches.len(), 3);
}

#[test]
fn test_arity_mismatch_is_advisory() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![fx.clause("leaf", &[], 0), fx.clause("node", &["v"], 1)])
        .unwrap();

    assert_eq!(
        dispatch.warnings,
        vec![MatchWarning::ArityMismatch {
            label: "node".to_string(),
            expected: 3,
            found: 1,
            span: Span::DUMMY,
        }]
    );
}

#[test]
fn test_arguments_follow_declared_field_order() {
    let fx = Fixture::new();
    let dispatch = fx.tree(vec![fx.clause("node", &["_", "_", "r"], 0)]).unwrap();

    let accessors: Vec<_> = args_of(&dispatch.branches[0])
        .iter()
        .map(|arg| match arg {
            CoreExpr::Call { callee, .. } => match callee.as_ref() {
                CoreExpr::Var(name) => fx.interner.lookup(*name),
                other => panic!("expected accessor, got {other:?}"),
            },
            other => panic!("expected call, got {other:?}"),
        })
        .collect();
    assert_eq!(
        accessors,
        vec!["tree_node_val", "tree_node_left", "tree_node_right"]
    );

    let lambda = lambda_of(&dispatch.branches[0]);
    assert!(lambda.params[0].unused && lambda.params[1].unused);
    assert!(!lambda.params[2].unused);
}

#[test]
fn test_ignore_clause_still_receives_all_fields() {
    let fx = Fixture::new();
    let dispatch = fx
        .tree(vec![ignore_clause(&fx.interner, "node", int(0))])
        .unwrap();

    assert!(lambda_of(&dispatch.branches[0]).variadic);
    assert_eq!(args_of(&dispatch.branches[0]).len(), 3);
    // A bare identifier is not a list, so there is no arity advisory.
    assert!(dispatch
        .warnings
        .iter()
        .all(|w| !matches!(w, MatchWarning::ArityMismatch { .. })));
}

#[test]
fn test_default_only_on_empty_variant() {
    let fx = Fixture::new();
    let variant = spec(&fx.interner, "Never", &[]);
    let dispatch = fx.run(&variant, vec![default_clause(int(0))]).unwrap();

    assert_eq!(dispatch.branches.len(), 1);
    assert!(matches!(
        dispatch.warnings.as_slice(),
        [MatchWarning::RedundantDefault { .. }]
    ));
}

#[test]
fn test_recompiling_is_deterministic_up_to_fresh_names() {
    let fx = Fixture::new();
    let clauses = || {
        vec![
            fx.clause("node", &["v", "_", "r"], 1),
            fx.clause("leaf", &["x"], 0),
            default_clause(int(2)),
        ]
    };
    let first = fx.tree(clauses()).unwrap();
    let second = fx.tree(clauses()).unwrap();

    // Wildcards draw a new name on every compilation.
    assert_ne!(
        lambda_of(&first.branches[0]).params[1].name,
        lambda_of(&second.branches[0]).params[1].name
    );

    let first = without_fresh_names(&first, &fx.interner);
    let second = without_fresh_names(&second, &fx.interner);
    let tests = |d: &Dispatch| d.branches.iter().map(|b| b.test).collect::<Vec<_>>();
    assert_eq!(tests(&first), tests(&second));
    for (a, b) in first.branches.iter().zip(&second.branches) {
        assert_eq!(args_of(a), args_of(b));
    }
    assert_eq!(first.warnings, second.warnings);
    assert!(!first.warnings.is_empty());
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn compilation_is_deterministic(
        wildcards in prop::collection::vec(any::<bool>(), 0..6),
        row_first in any::<bool>(),
        with_default in any::<bool>(),
    ) {
        let fx = Fixture::new();
        let fields: Vec<String> = (0..wildcards.len()).map(|i| format!("f{i}")).collect();
        let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        let variant = spec(&fx.interner, "Grid", &[("empty", &[][..]), ("row", field_refs.as_slice())]);
        let params: Vec<&str> = wildcards
            .iter()
            .zip(&field_refs)
            .map(|(&wild, &name)| if wild { "_" } else { name })
            .collect();

        let clauses = || {
            let mut list = vec![fx.clause("empty", &[], 0), fx.clause("row", &params, 1)];
            if row_first {
                list.reverse();
            }
            if with_default {
                list.push(default_clause(int(2)));
            }
            list
        };
        let first = fx.run(&variant, clauses()).unwrap();
        let second = fx.run(&variant, clauses()).unwrap();

        prop_assert_eq!(
            without_fresh_names(&first, &fx.interner),
            without_fresh_names(&second, &fx.interner)
        );
    }
}
