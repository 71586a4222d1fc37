use pretty_assertions::assert_eq;
use tagsum_ir::ast::{
    BinaryOp, ClausePattern, Expr, ExprKind, FunctionDef, Item, MatchUse, Param, ParamSpec, Stmt,
    VariantSpec,
};

use super::*;

fn parse_source(source: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = tagsum_lexer::lex(source, interner);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    parse(&lexed.tokens, interner)
}

fn parse_ok(source: &str, interner: &StringInterner) -> Module {
    let output = parse_source(source, interner);
    assert!(!output.has_errors(), "parse errors: {:?}", output.errors);
    output.module
}

fn only_variant(module: &Module) -> &VariantSpec {
    match module.items.as_slice() {
        [Item::Variant(spec)] => spec,
        other => panic!("expected one variant, got {other:?}"),
    }
}

fn only_function(module: &Module) -> &FunctionDef {
    match module.items.as_slice() {
        [Item::Function(def)] => def,
        other => panic!("expected one function, got {other:?}"),
    }
}

fn body_of(source: &str, interner: &StringInterner) -> Expr {
    let module = parse_ok(source, interner);
    only_function(&module).body.clone()
}

fn match_use(expr: &Expr) -> &MatchUse {
    match &expr.kind {
        ExprKind::MatchUse(use_site) => use_site,
        other => panic!("expected match use, got {other:?}"),
    }
}

// Variant declarations

#[test]
fn test_variant_with_cases_and_fields() {
    let interner = StringInterner::new();
    let module = parse_ok("variant Tree { leaf, node(val, left, right) }", &interner);
    let spec = only_variant(&module);

    assert_eq!(interner.lookup(spec.name.name), "Tree");
    let labels: Vec<_> = spec
        .cases
        .iter()
        .map(|c| interner.lookup(c.label.name))
        .collect();
    assert_eq!(labels, vec!["leaf", "node"]);
    assert!(spec.cases[0].fields.is_empty());
    let fields: Vec<_> = spec.cases[1]
        .fields
        .iter()
        .map(|f| interner.lookup(f.name.name))
        .collect();
    assert_eq!(fields, vec!["val", "left", "right"]);
}

#[test]
fn test_variant_trailing_commas() {
    let interner = StringInterner::new();
    let module = parse_ok("variant Pair { both(a, b,), }", &interner);
    let spec = only_variant(&module);
    assert_eq!(spec.cases.len(), 1);
    assert_eq!(spec.cases[0].fields.len(), 2);
}

#[test]
fn test_empty_variant() {
    let interner = StringInterner::new();
    let module = parse_ok("variant Never {}", &interner);
    assert!(only_variant(&module).cases.is_empty());
}

#[test]
fn test_variant_span_covers_declaration() {
    let interner = StringInterner::new();
    let source = "variant Unit { one }";
    let module = parse_ok(source, &interner);
    assert_eq!(only_variant(&module).span, Span::new(0, source.len() as u32));
}

#[test]
fn test_options_are_kept_in_order() {
    let interner = StringInterner::new();
    let module = parse_ok(
        "#[derive(Debug)] #[repr(u8)] variant Color { #[default] red, green(#[pad] level) }",
        &interner,
    );
    let spec = only_variant(&module);

    let texts: Vec<_> = spec.options.attrs.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["derive(Debug)", "repr(u8)"]);
    assert_eq!(spec.cases[0].options.attrs[0].text, "default");
    assert!(spec.cases[1].options.is_empty());
    assert_eq!(spec.cases[1].fields[0].options.attrs[0].text, "pad");
    assert_eq!(spec.span.start, 0);
}

// Functions and expressions

#[test]
fn test_function_params() {
    let interner = StringInterner::new();
    let module = parse_ok("fn add(a, b) = a + b", &interner);
    let def = only_function(&module);
    assert_eq!(interner.lookup(def.name.name), "add");
    let params: Vec<_> = def.params.iter().map(|p| interner.lookup(p.name)).collect();
    assert_eq!(params, vec!["a", "b"]);
}

#[test]
fn test_precedence() {
    let interner = StringInterner::new();
    let body = body_of("fn f() = 1 + 2 * 3 < 10", &interner);

    let ExprKind::Binary { op, lhs, .. } = &body.kind else {
        panic!("expected comparison, got {body:?}");
    };
    assert_eq!(*op, BinaryOp::Lt);
    let ExprKind::Binary { op, rhs, .. } = &lhs.kind else {
        panic!("expected addition, got {lhs:?}");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert!(matches!(
        rhs.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_subtraction_is_left_associative() {
    let interner = StringInterner::new();
    let body = body_of("fn f() = 10 - 3 - 2", &interner);
    let ExprKind::Binary { op, lhs, rhs } = &body.kind else {
        panic!("expected binary, got {body:?}");
    };
    assert_eq!(*op, BinaryOp::Sub);
    assert_eq!(rhs.kind, ExprKind::Int(2));
    assert!(matches!(
        lhs.kind,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
}

#[test]
fn test_unary_minus_desugars_to_subtraction() {
    let interner = StringInterner::new();
    let body = body_of("fn f() = -5", &interner);
    let ExprKind::Binary { op, lhs, rhs } = &body.kind else {
        panic!("expected binary, got {body:?}");
    };
    assert_eq!(*op, BinaryOp::Sub);
    assert_eq!(lhs.kind, ExprKind::Int(0));
    assert_eq!(rhs.kind, ExprKind::Int(5));
}

#[test]
fn test_literals() {
    let interner = StringInterner::new();
    assert_eq!(body_of("fn f() = ()", &interner).kind, ExprKind::Unit);
    assert_eq!(body_of("fn f() = true", &interner).kind, ExprKind::Bool(true));
    assert_eq!(body_of("fn f() = false", &interner).kind, ExprKind::Bool(false));
    assert_eq!(
        body_of(r#"fn f() = "hi""#, &interner).kind,
        ExprKind::Str("hi".to_string())
    );
    assert_eq!(body_of("fn f() = (7)", &interner).kind, ExprKind::Int(7));
}

#[test]
fn test_chained_calls() {
    let interner = StringInterner::new();
    let body = body_of("fn f() = make(1)(2, 3)", &interner);
    let ExprKind::Call { callee, args } = &body.kind else {
        panic!("expected call, got {body:?}");
    };
    assert_eq!(args.len(), 2);
    let ExprKind::Call { args: inner, .. } = &callee.kind else {
        panic!("expected inner call, got {callee:?}");
    };
    assert_eq!(inner.len(), 1);
}

#[test]
fn test_block_with_let() {
    let interner = StringInterner::new();
    let body = body_of("fn f() = { let x = 1; print(x); x }", &interner);
    let ExprKind::Block(stmts) = &body.kind else {
        panic!("expected block, got {body:?}");
    };
    assert_eq!(stmts.len(), 3);
    assert!(matches!(&stmts[0], Stmt::Let { name, .. } if interner.lookup(name.name) == "x"));
    assert!(matches!(&stmts[2], Stmt::Expr(e) if matches!(e.kind, ExprKind::Ident(_))));
}

#[test]
fn test_else_if_chain() {
    let interner = StringInterner::new();
    let body = body_of("fn f(n) = if n < 0 { 1 } else if n == 0 { 2 } else { 3 }", &interner);
    let ExprKind::If { else_branch, .. } = &body.kind else {
        panic!("expected if, got {body:?}");
    };
    assert!(matches!(else_branch.kind, ExprKind::If { .. }));
}

// Match use sites

#[test]
fn test_match_use_clauses() {
    let interner = StringInterner::new();
    let body = body_of(
        "fn f(t) = match_tree!(t) { leaf() => 0, node(v, _, r) => v, other _ => 1, _ => 2 }",
        &interner,
    );
    let use_site = match_use(&body);
    assert_eq!(interner.lookup(use_site.operator.name), "match_tree");
    assert_eq!(use_site.clauses.len(), 4);

    assert!(matches!(
        &use_site.clauses[0].pattern,
        ClausePattern::Case { params: ParamSpec::List(p), .. } if p.is_empty()
    ));

    let ClausePattern::Case { label, params } = &use_site.clauses[1].pattern else {
        panic!("expected case clause");
    };
    assert_eq!(interner.lookup(label.name), "node");
    let ParamSpec::List(params) = params else {
        panic!("expected positional params");
    };
    assert!(matches!(params[0], Param::Named(id) if interner.lookup(id.name) == "v"));
    assert!(matches!(params[1], Param::Wildcard(_)));

    assert!(matches!(
        &use_site.clauses[2].pattern,
        ClausePattern::Case {
            params: ParamSpec::Ignore(Param::Wildcard(_)),
            ..
        }
    ));
    assert!(use_site.clauses[3].is_default());
}

#[test]
fn test_clause_bodies() {
    let interner = StringInterner::new();
    let body = body_of(
        "fn f(t) = match_t!(t) { a rest => { print(1); 2 }, b() => 3, }",
        &interner,
    );
    let use_site = match_use(&body);
    assert_eq!(use_site.clauses[0].body.len(), 2);
    assert_eq!(use_site.clauses[1].body.len(), 1);
}

#[test]
fn test_empty_match_parses() {
    let interner = StringInterner::new();
    let body = body_of("fn f(t) = match_t!(t) {}", &interner);
    assert!(match_use(&body).clauses.is_empty());
}

#[test]
fn test_nested_match_in_clause_body() {
    let interner = StringInterner::new();
    let body = body_of(
        "fn f(t) = match_t!(t) { a(x) => match_t!(x) { _ => 1 }, _ => 2 }",
        &interner,
    );
    let outer = match_use(&body);
    let [Stmt::Expr(inner)] = outer.clauses[0].body.as_slice() else {
        panic!("expected single-expression body");
    };
    assert_eq!(match_use(inner).clauses.len(), 1);
}

// Errors and recovery

#[test]
fn test_bare_label_is_invalid_pattern() {
    let interner = StringInterner::new();
    let output = parse_source("fn f(t) = match_t!(t) { leaf => 1 }", &interner);
    assert_eq!(output.errors.len(), 1);
    let error = &output.errors[0];
    assert_eq!(error.code(), tagsum_diagnostic::ErrorCode::E1005);
    assert_eq!(error.context, Some(ErrorContext::MatchClause));
    assert!(error
        .to_diagnostic()
        .notes
        .iter()
        .any(|n| n.contains("a match clause")));
}

#[test]
fn test_expected_expression() {
    let interner = StringInterner::new();
    let output = parse_source("fn f() = ,", &interner);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0].kind,
        ParseErrorKind::ExpectedExpression {
            found: TokenKind::Comma
        }
    ));
}

#[test]
fn test_unclosed_brace_reports_opening_span() {
    let interner = StringInterner::new();
    let output = parse_source("variant Tree { leaf", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].kind,
        ParseErrorKind::UnclosedDelimiter {
            open: Span::new(13, 14),
            close: '}'
        }
    );
}

#[test]
fn test_if_requires_else() {
    let interner = StringInterner::new();
    let output = parse_source("fn f(x) = if x { 1 }", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code(), tagsum_diagnostic::ErrorCode::E1001);
}

#[test]
fn test_recovery_continues_with_next_item() {
    let interner = StringInterner::new();
    let output = parse_source(
        "variant A { x( } fn ok() = 1 variant B { y }",
        &interner,
    );
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.module.items.len(), 2);
    assert!(matches!(output.module.items[0], Item::Function(_)));
    assert!(matches!(output.module.items[1], Item::Variant(_)));
}

#[test]
fn test_attributes_before_fn_are_rejected() {
    let interner = StringInterner::new();
    let output = parse_source("#[inline] fn f() = 1", &interner);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0].kind,
        ParseErrorKind::UnexpectedToken {
            expected: "`variant` after attributes",
            found: TokenKind::Fn
        }
    ));
}

#[test]
fn test_empty_source() {
    let interner = StringInterner::new();
    let module = parse_ok("", &interner);
    assert!(module.items.is_empty());
}
