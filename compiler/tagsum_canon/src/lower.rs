//! Pass 2: AST to core lowering.
//!
//! Surface expressions map one to one onto [`CoreExpr`], except:
//! - blocks become `Seq`/`Let` chains
//! - match use sites are expanded by their operator from the registry
//!
//! A match site that fails to expand is reported and replaced by
//! [`CoreExpr::Error`]; lowering carries on with the rest of the function.

use std::sync::Arc;

use tagsum_diagnostic::Diagnostic;
use tagsum_ir::ast::{Expr, ExprKind, MatchUse, Stmt};
use tagsum_ir::{CoreExpr, Literal};
use tagsum_patterns::{Clause, MatchWarning, NameSynthesizer, OperatorRegistry};
use tracing::trace;

use crate::lint;

pub(crate) struct Lowerer<'a> {
    names: NameSynthesizer<'a>,
    registry: &'a OperatorRegistry,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(
        names: NameSynthesizer<'a>,
        registry: &'a OperatorRegistry,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Lowerer {
            names,
            registry,
            diagnostics,
        }
    }

    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> CoreExpr {
        match &expr.kind {
            ExprKind::Unit => CoreExpr::Lit(Literal::Unit),
            ExprKind::Bool(value) => CoreExpr::Lit(Literal::Bool(*value)),
            ExprKind::Int(value) => CoreExpr::Lit(Literal::Int(*value)),
            ExprKind::Str(text) => CoreExpr::Lit(Literal::Str(Arc::from(text.as_str()))),
            ExprKind::Ident(name) => CoreExpr::var(*name),
            ExprKind::Call { callee, args } => {
                let callee = self.lower_expr(callee);
                let args = args.iter().map(|arg| self.lower_expr(arg)).collect();
                CoreExpr::call(callee, args)
            }
            ExprKind::Binary { op, lhs, rhs } => CoreExpr::Binary {
                op: *op,
                lhs: Box::new(self.lower_expr(lhs)),
                rhs: Box::new(self.lower_expr(rhs)),
            },
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => CoreExpr::If {
                cond: Box::new(self.lower_expr(cond)),
                then_branch: Box::new(self.lower_expr(then_branch)),
                else_branch: Box::new(self.lower_expr(else_branch)),
            },
            ExprKind::Block(stmts) => self.lower_block(stmts),
            ExprKind::MatchUse(use_site) => self.lower_match(use_site),
            ExprKind::Error => CoreExpr::Error,
        }
    }

    /// `e1; e2; let x = v; e3` becomes `Seq[e1, e2, Let x = v in e3]`.
    pub(crate) fn lower_block(&mut self, stmts: &[Stmt]) -> CoreExpr {
        let mut items = Vec::with_capacity(stmts.len());
        for (index, stmt) in stmts.iter().enumerate() {
            match stmt {
                Stmt::Expr(expr) => items.push(self.lower_expr(expr)),
                Stmt::Let { name, value } => {
                    let value = self.lower_expr(value);
                    let body = self.lower_block(&stmts[index + 1..]);
                    items.push(CoreExpr::Let {
                        name: name.name,
                        value: Box::new(value),
                        body: Box::new(body),
                    });
                    break;
                }
            }
        }

        match items.len() {
            0 => CoreExpr::Lit(Literal::Unit),
            1 => items.swap_remove(0),
            _ => CoreExpr::Seq(items),
        }
    }

    fn lower_match(&mut self, use_site: &MatchUse) -> CoreExpr {
        let scrutinee = self.lower_expr(&use_site.scrutinee);

        let mut clauses = Vec::with_capacity(use_site.clauses.len());
        for clause in &use_site.clauses {
            let body = self.lower_block(&clause.body);
            self.diagnostics
                .extend(lint::unused_params(&clause.pattern, &body, &self.names));
            clauses.push(Clause::new(clause.pattern.clone(), body, clause.span));
        }

        match self.registry.expand(
            use_site.operator,
            scrutinee,
            clauses,
            use_site.span,
            &self.names,
        ) {
            Ok(expansion) => {
                trace!(
                    operator = self.names.text(use_site.operator.name),
                    warnings = expansion.warnings.len(),
                    "match site expanded"
                );
                self.diagnostics
                    .extend(expansion.warnings.iter().map(MatchWarning::to_diagnostic));
                expansion.expr
            }
            Err(error) => {
                self.diagnostics.push(error.to_diagnostic());
                CoreExpr::Error
            }
        }
    }
}
