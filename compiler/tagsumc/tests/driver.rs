#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the driver commands over `.tsum` fixtures.

use pretty_assertions::assert_eq;
use tagsum_diagnostic::emitter::ColorMode;
use tagsumc::commands::{check_source, expand_source, explain_code, run_source};
use tagsumc::CompileOptions;

const TREE: &str = include_str!("fixtures/tree.tsum");
const SHAPES: &str = include_str!("fixtures/shapes.tsum");
const BROKEN: &str = include_str!("fixtures/broken.tsum");

fn options() -> CompileOptions {
    CompileOptions {
        color: ColorMode::Never,
        ..CompileOptions::default()
    }
}

#[test]
fn test_run_tree() {
    let output = run_source("tree.tsum", TREE, &options());

    assert!(output.success, "{}", output.stderr);
    assert_eq!(output.stdout, "leaf !\n42\nsum 10\ndepth 3\ntrue\n");
    assert_eq!(output.stderr, "");
}

#[test]
fn test_check_tree() {
    let output = check_source("tree.tsum", TREE, &options());

    assert!(output.success);
    assert_eq!(output.stdout, "OK: tree.tsum (1 variants, 4 functions)\n");
    assert_eq!(output.stderr, "");
}

#[test]
fn test_expand_tree() {
    let output = expand_source("tree.tsum", TREE, &options());

    assert!(output.success);
    assert!(output.stdout.starts_with(
        "#[derive(Debug)]\n\
         abstract type Tree\n\
         type TreeLeaf <: Tree [tag 0, label leaf, predicate is_tree_leaf]\n\
         type TreeNode <: Tree [tag 1, label node, predicate is_tree_node]\n"
    ));
    assert!(output.stdout.contains("fn sum(t)"));
    assert!(output.stdout.contains("is_tree_node"));
}

#[test]
fn test_missing_case_warns_then_fails_at_runtime() {
    let checked = check_source("shapes.tsum", SHAPES, &options());
    assert!(checked.success);
    assert!(checked
        .stderr
        .contains("warning[W3001]: non-exhaustive match on `Shape`: missing `bnode`"));

    let ran = run_source("shapes.tsum", SHAPES, &options());
    assert!(!ran.success);
    assert_eq!(ran.stdout, "3\n");
    assert!(ran
        .stderr
        .contains("error[E6001]: no clause of the `Shape` match applies"));
    assert!(ran.stderr.contains("note: in `arity`"));
}

#[test]
fn test_deny_warnings_blocks_run() {
    let options = CompileOptions {
        deny_warnings: true,
        ..options()
    };
    let ran = run_source("shapes.tsum", SHAPES, &options);

    assert!(!ran.success);
    assert_eq!(ran.stdout, "");
    assert!(ran.stderr.contains("error[W3001]"));
}

#[test]
fn test_broken_match_sites_are_reported_independently() {
    let output = check_source("broken.tsum", BROKEN, &options());

    assert!(!output.success);
    assert!(output.stderr.contains("error[E3002]"));
    assert!(output.stderr.contains("error[E3003]"));
    assert!(output.stderr.contains("error[E3004]"));
    assert!(output.stderr.contains("error: aborting due to 3 previous errors"));
}

#[test]
fn test_call_depth_flag() {
    let source = "fn spin(n) = spin(n + 1)\nfn main() = spin(0)";
    let options = CompileOptions {
        eval: tagsum_eval::EvalConfig { max_call_depth: 8 },
        ..options()
    };
    let output = run_source("spin.tsum", source, &options);

    assert!(!output.success);
    assert!(output
        .stderr
        .contains("error[E6007]: maximum call depth of 8 exceeded"));
}

#[test]
fn test_explain() {
    let documented = explain_code("e3003");
    assert!(documented.success);
    assert!(documented.stdout.contains("Duplicate Case"));

    let undocumented = explain_code("E6009");
    assert!(undocumented.success);
    assert_eq!(undocumented.stdout, "E6009: integer overflow\n");

    let unknown = explain_code("X1");
    assert!(!unknown.success);
    assert!(unknown.stderr.starts_with("Unknown error code: X1"));
}
