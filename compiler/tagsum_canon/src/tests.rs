use pretty_assertions::assert_eq;
use tagsum_diagnostic::ErrorCode;
use tagsum_ir::{CoreExpr, Literal, Test};

use super::*;

fn lower_source(source: &str, interner: &StringInterner) -> LowerOutput {
    let lexed = tagsum_lexer::lex(source, interner);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let parsed = tagsum_parse::parse(&lexed.tokens, interner);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    lower_module(&parsed.module, interner)
}

fn codes(output: &LowerOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

fn body<'p>(output: &'p LowerOutput, interner: &StringInterner, name: &str) -> &'p CoreExpr {
    match output.program.function(interner.intern(name)) {
        Some(function) => &function.body,
        None => panic!("no function `{name}`"),
    }
}

const TREE: &str = "variant Tree { leaf, node(val, left, right) }\n";

#[test]
fn test_variant_and_function() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!("{TREE}fn sum(t) = match_tree!(t) {{ leaf() => 0, node(v, l, r) => v + sum(l) + sum(r) }}"),
        &interner,
    );

    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert_eq!(output.program.decls.len(), 1);
    assert_eq!(output.program.decls[0].len(), 3);

    let function = &output.program.functions[0];
    assert_eq!(interner.lookup(function.name), "sum");
    assert_eq!(function.params, vec![interner.intern("t")]);

    let CoreExpr::Let { value, body, .. } = &function.body else {
        panic!("expected match expansion, got {:?}", function.body);
    };
    assert_eq!(value.as_ref(), &CoreExpr::var(interner.intern("t")));
    let CoreExpr::Cond(branches) = body.as_ref() else {
        panic!("expected cond, got {body:?}");
    };
    assert_eq!(branches.len(), 3);
    assert!(matches!(branches[0].test, Test::Case { .. }));
    assert_eq!(
        branches[2].action,
        CoreExpr::Fail {
            variant: interner.intern("Tree")
        }
    );
}

#[test]
fn test_block_lowering() {
    let interner = StringInterner::new();
    let output = lower_source("fn f() = { print(1); let x = 2; x }", &interner);

    let CoreExpr::Seq(items) = body(&output, &interner, "f") else {
        panic!("expected seq");
    };
    assert_eq!(items.len(), 2);
    let CoreExpr::Let { name, value, body } = &items[1] else {
        panic!("expected let, got {:?}", items[1]);
    };
    assert_eq!(*name, interner.intern("x"));
    assert_eq!(value.as_ref(), &CoreExpr::Lit(Literal::Int(2)));
    assert_eq!(body.as_ref(), &CoreExpr::var(interner.intern("x")));
}

#[test]
fn test_empty_block_is_unit() {
    let interner = StringInterner::new();
    let output = lower_source("fn f() = {}", &interner);
    assert_eq!(body(&output, &interner, "f"), &CoreExpr::Lit(Literal::Unit));
}

#[test]
fn test_failing_match_site_is_isolated() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!(
            "{TREE}fn bad(t) = match_tree!(t) {{ _ => 0, leaf() => 1 }}\n\
             fn good(t) = match_tree!(t) {{ leaf() => 0, _ => 1 }}"
        ),
        &interner,
    );

    assert_eq!(codes(&output), vec![ErrorCode::E3002]);
    assert!(output.has_errors());
    assert_eq!(body(&output, &interner, "bad"), &CoreExpr::Error);
    assert!(!body(&output, &interner, "good").has_errors());
    assert_eq!(output.program.decls.len(), 1);
}

#[test]
fn test_unknown_operator() {
    let interner = StringInterner::new();
    let output = lower_source("fn f(x) = match_shape!(x) { _ => 0 }", &interner);
    assert_eq!(codes(&output), vec![ErrorCode::E3008]);
}

#[test]
fn test_match_error_codes() {
    let interner = StringInterner::new();
    let cases = [
        ("match_tree!(t) {}", ErrorCode::E3001),
        ("match_tree!(t) { leaf() => 0, leaf() => 1 }", ErrorCode::E3003),
        ("match_tree!(t) { twig() => 0 }", ErrorCode::E3004),
    ];
    for (site, code) in cases {
        let output = lower_source(&format!("{TREE}fn f(t) = {site}"), &interner);
        assert_eq!(codes(&output), vec![code], "for `{site}`");
    }
}

#[test]
fn test_expansion_warnings_are_reported() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!(
            "{TREE}fn a(t) = match_tree!(t) {{ leaf() => 0 }}\n\
             fn b(t) = match_tree!(t) {{ leaf() => 0, node rest => 1, _ => 2 }}\n\
             fn c(t) = match_tree!(t) {{ node(v) => v, _ => 0 }}"
        ),
        &interner,
    );

    assert_eq!(
        codes(&output),
        vec![ErrorCode::W3001, ErrorCode::W3002, ErrorCode::W3003]
    );
    assert!(!output.has_errors());
}

#[test]
fn test_unused_parameter_lint() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!("{TREE}fn f(t) = match_tree!(t) {{ leaf() => 0, node(v, l, _) => l }}"),
        &interner,
    );

    assert_eq!(codes(&output), vec![ErrorCode::W3004]);
    assert_eq!(output.diagnostics[0].message, "unused parameter `v`");
}

#[test]
fn test_wildcards_and_bare_identifiers_are_exempt() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!("{TREE}fn f(t) = match_tree!(t) {{ leaf() => 0, node rest => 1 }}\nfn g(t) = match_tree!(t) {{ node(_, _, _) => 1, _ => 0 }}"),
        &interner,
    );
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

#[test]
fn test_definition_error_drops_variant() {
    let interner = StringInterner::new();
    let output = lower_source(
        "variant Color { red, red }\nfn f(c) = match_color!(c) { _ => 0 }",
        &interner,
    );

    assert_eq!(codes(&output), vec![ErrorCode::E3005, ErrorCode::E3008]);
    assert!(output.program.decls.is_empty());
}

#[test]
fn test_duplicate_function() {
    let interner = StringInterner::new();
    let output = lower_source("fn f() = 1\nfn f() = 2", &interner);

    assert_eq!(codes(&output), vec![ErrorCode::E3007]);
    assert_eq!(output.program.functions.len(), 1);
}

#[test]
fn test_function_clashing_with_generated_name() {
    let interner = StringInterner::new();
    let output = lower_source(&format!("{TREE}fn tree_node_val(x) = x"), &interner);

    assert_eq!(codes(&output), vec![ErrorCode::E3007]);
    assert_eq!(
        output.diagnostics[0].message,
        "`tree_node_val` is defined more than once"
    );
    assert!(output.program.functions.is_empty());
}

#[test]
fn test_generated_names_clashing_within_variant() {
    let interner = StringInterner::new();
    // Both fields synthesize the accessor `a_b_c_d`.
    let output = lower_source("variant A { b_c(d), b(c_d) }", &interner);

    assert_eq!(codes(&output), vec![ErrorCode::E3007]);
    assert!(output.program.decls.is_empty());
}

#[test]
fn test_lowering_continues_after_errors() {
    let interner = StringInterner::new();
    let output = lower_source(
        &format!("{TREE}fn f(t) = match_nope!(t) {{ _ => 0 }}\nfn g() = 1 + 2"),
        &interner,
    );

    assert!(output.has_errors());
    assert_eq!(output.program.functions.len(), 2);
    assert!(!body(&output, &interner, "g").has_errors());
}
