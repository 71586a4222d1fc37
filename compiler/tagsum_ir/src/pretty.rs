//! Textual rendering of generated declarations and core IR.
//!
//! Used by `tagsum expand` and by tests that compare generated code.

use std::fmt::Write;

use crate::ast::Options;
use crate::core_ir::{Branch, CoreExpr, CoreFunction, Lambda, Literal, Program, Test};
use crate::decl::TypeDecls;
use crate::{Name, StringInterner};

const INDENT: &str = "    ";

/// Render a whole program: declarations first, then functions.
pub fn program_to_string(program: &Program, interner: &StringInterner) -> String {
    let mut printer = Printer::new(interner);
    for decls in &program.decls {
        printer.decls(decls);
        printer.out.push('\n');
    }
    for function in &program.functions {
        printer.function(function);
        printer.out.push('\n');
    }
    printer.out
}

pub fn decls_to_string(decls: &TypeDecls, interner: &StringInterner) -> String {
    let mut printer = Printer::new(interner);
    printer.decls(decls);
    printer.out
}

pub fn expr_to_string(expr: &CoreExpr, interner: &StringInterner) -> String {
    let mut printer = Printer::new(interner);
    printer.expr(expr);
    printer.out
}

struct Printer<'a> {
    interner: &'a StringInterner,
    out: String,
    depth: usize,
}

impl<'a> Printer<'a> {
    fn new(interner: &'a StringInterner) -> Self {
        Printer {
            interner,
            out: String::new(),
            depth: 0,
        }
    }

    fn name(&mut self, name: Name) {
        self.out.push_str(self.interner.lookup(name));
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn options(&mut self, options: &Options) {
        for attr in &options.attrs {
            let _ = write!(self.out, "#[{}]", attr.text);
            self.newline();
        }
    }

    fn inline_options(&mut self, options: &Options) {
        for attr in &options.attrs {
            let _ = write!(self.out, "#[{}] ", attr.text);
        }
    }

    fn decls(&mut self, decls: &TypeDecls) {
        self.options(&decls.variant.options);
        self.out.push_str("abstract type ");
        self.name(decls.variant.name);
        self.out.push('\n');

        for case in &decls.cases {
            self.options(&case.options);
            self.out.push_str("type ");
            self.name(case.name);
            self.out.push_str(" <: ");
            self.name(case.parent);
            let _ = write!(self.out, " [tag {}, label ", case.tag.0);
            self.name(case.label);
            self.out.push_str(", predicate ");
            self.name(case.predicate);
            self.out.push(']');
            self.out.push('\n');
            for field in &case.fields {
                self.out.push_str(INDENT);
                self.inline_options(&field.options);
                self.name(field.name);
                self.out.push_str(" via ");
                self.name(field.accessor);
                self.out.push('\n');
            }
        }
    }

    fn function(&mut self, function: &CoreFunction) {
        self.out.push_str("fn ");
        self.name(function.name);
        self.out.push('(');
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.name(*param);
        }
        self.out.push_str(") =");
        self.depth += 1;
        self.newline();
        self.expr(&function.body);
        self.depth -= 1;
        self.out.push('\n');
    }

    fn expr(&mut self, expr: &CoreExpr) {
        match expr {
            CoreExpr::Lit(lit) => self.literal(lit),
            CoreExpr::Var(name) => self.name(*name),
            CoreExpr::Call { callee, args } => {
                let wrap = matches!(**callee, CoreExpr::Lambda(_));
                if wrap {
                    self.out.push('(');
                }
                self.expr(callee);
                if wrap {
                    self.out.push(')');
                }
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
            CoreExpr::Lambda(lambda) => self.lambda(lambda),
            CoreExpr::Let { name, value, body } => {
                self.out.push_str("let ");
                self.name(*name);
                self.out.push_str(" = ");
                self.expr(value);
                self.out.push_str(" in");
                self.newline();
                self.expr(body);
            }
            CoreExpr::Seq(exprs) => {
                self.out.push('{');
                self.depth += 1;
                for (i, expr) in exprs.iter().enumerate() {
                    self.newline();
                    self.expr(expr);
                    if i + 1 < exprs.len() {
                        self.out.push(';');
                    }
                }
                self.depth -= 1;
                if !exprs.is_empty() {
                    self.newline();
                }
                self.out.push('}');
            }
            CoreExpr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("if ");
                self.expr(cond);
                self.out.push_str(" then ");
                self.expr(then_branch);
                self.out.push_str(" else ");
                self.expr(else_branch);
            }
            CoreExpr::Binary { op, lhs, rhs } => {
                self.out.push('(');
                self.expr(lhs);
                let _ = write!(self.out, " {} ", op.as_symbol());
                self.expr(rhs);
                self.out.push(')');
            }
            CoreExpr::Cond(branches) => self.cond(branches),
            CoreExpr::Fail { variant } => {
                self.out.push_str("fail \"");
                self.name(*variant);
                self.out.push('"');
            }
            CoreExpr::Error => self.out.push_str("<error>"),
        }
    }

    fn literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Unit => self.out.push_str("()"),
            Literal::Bool(b) => {
                let _ = write!(self.out, "{b}");
            }
            Literal::Int(n) => {
                let _ = write!(self.out, "{n}");
            }
            Literal::Str(s) => {
                let _ = write!(self.out, "{s:?}");
            }
        }
    }

    fn lambda(&mut self, lambda: &Lambda) {
        self.out.push_str("fn(");
        for (i, param) in lambda.params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if param.unused {
                self.out.push('#');
            }
            self.name(param.name);
        }
        if lambda.variadic {
            if !lambda.params.is_empty() {
                self.out.push_str(", ");
            }
            self.out.push_str("..");
        }
        self.out.push_str(") ");
        self.expr(&lambda.body);
    }

    fn cond(&mut self, branches: &[Branch]) {
        self.out.push_str("cond {");
        self.depth += 1;
        for branch in branches {
            self.newline();
            match branch.test {
                Test::Always => self.out.push_str("else"),
                Test::Case {
                    scrutinee,
                    predicate,
                    ..
                } => {
                    self.name(predicate);
                    self.out.push('(');
                    self.name(scrutinee);
                    self.out.push(')');
                }
            }
            self.out.push_str(" => ");
            self.expr(&branch.action);
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }
}
