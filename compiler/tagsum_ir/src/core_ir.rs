//! Core IR: the host code the generator emits.
//!
//! Match use sites expand into a `Let` binding the scrutinee once followed by
//! a [`CoreExpr::Cond`] whose branches invoke compiled clause callables
//! ([`Lambda`]) with accessor calls as positional arguments.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::ast::BinaryOp;
use crate::decl::TypeDecls;
use crate::Name;

/// Runtime discriminant of a case: its index in the variant declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseTag(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Unit,
    Bool(bool),
    Int(i64),
    Str(Arc<str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreExpr {
    Lit(Literal),
    Var(Name),
    Call {
        callee: Box<CoreExpr>,
        args: Vec<CoreExpr>,
    },
    Lambda(Arc<Lambda>),
    Let {
        name: Name,
        value: Box<CoreExpr>,
        body: Box<CoreExpr>,
    },
    /// Evaluates each expression in order and yields the last; empty is unit.
    Seq(Vec<CoreExpr>),
    If {
        cond: Box<CoreExpr>,
        then_branch: Box<CoreExpr>,
        else_branch: Box<CoreExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<CoreExpr>,
        rhs: Box<CoreExpr>,
    },
    /// Ordered test/action list; the first passing test wins.
    Cond(Vec<Branch>),
    /// Raise a match failure for `variant`.
    Fail { variant: Name },
    /// Stand-in for a subexpression that failed to compile.
    Error,
}

impl CoreExpr {
    pub fn var(name: Name) -> Self {
        CoreExpr::Var(name)
    }

    pub fn call(callee: CoreExpr, args: Vec<CoreExpr>) -> Self {
        CoreExpr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Whether `name` occurs free in this expression.
    ///
    /// Inner `let` bindings and lambda parameters of the same name shadow it.
    pub fn references(&self, name: Name) -> bool {
        match self {
            CoreExpr::Lit(_) | CoreExpr::Fail { .. } | CoreExpr::Error => false,
            CoreExpr::Var(var) => *var == name,
            CoreExpr::Call { callee, args } => {
                callee.references(name) || args.iter().any(|arg| arg.references(name))
            }
            CoreExpr::Lambda(lambda) => {
                !lambda.params.iter().any(|param| param.name == name)
                    && lambda.body.references(name)
            }
            CoreExpr::Let {
                name: bound,
                value,
                body,
            } => value.references(name) || (*bound != name && body.references(name)),
            CoreExpr::Seq(exprs) => exprs.iter().any(|expr| expr.references(name)),
            CoreExpr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                cond.references(name)
                    || then_branch.references(name)
                    || else_branch.references(name)
            }
            CoreExpr::Binary { lhs, rhs, .. } => lhs.references(name) || rhs.references(name),
            CoreExpr::Cond(branches) => branches.iter().any(|branch| {
                branch.test.references(name) || branch.action.references(name)
            }),
        }
    }

    /// Whether this expression contains an [`CoreExpr::Error`] placeholder.
    pub fn has_errors(&self) -> bool {
        match self {
            CoreExpr::Error => true,
            CoreExpr::Lit(_) | CoreExpr::Var(_) | CoreExpr::Fail { .. } => false,
            CoreExpr::Call { callee, args } => {
                callee.has_errors() || args.iter().any(CoreExpr::has_errors)
            }
            CoreExpr::Lambda(lambda) => lambda.body.has_errors(),
            CoreExpr::Let { value, body, .. } => value.has_errors() || body.has_errors(),
            CoreExpr::Seq(exprs) => exprs.iter().any(CoreExpr::has_errors),
            CoreExpr::If {
                cond,
                then_branch,
                else_branch,
            } => cond.has_errors() || then_branch.has_errors() || else_branch.has_errors(),
            CoreExpr::Binary { lhs, rhs, .. } => lhs.has_errors() || rhs.has_errors(),
            CoreExpr::Cond(branches) => branches.iter().any(|b| b.action.has_errors()),
        }
    }
}

/// A compiled callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lambda {
    pub params: SmallVec<[LambdaParam; 4]>,
    /// Accepts (and discards) any arguments beyond `params`.
    pub variadic: bool,
    pub body: CoreExpr,
}

impl Lambda {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LambdaParam {
    pub name: Name,
    /// Synthesized for a `_` pattern parameter. Only affects display: the
    /// pretty printer prefixes the name with `#`.
    pub unused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub test: Test,
    pub action: CoreExpr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Test {
    /// Unconditional: default clauses and the match-failure fallback.
    Always,
    /// True iff the value bound to `scrutinee` is a `variant` whose tag is `tag`.
    Case {
        scrutinee: Name,
        variant: Name,
        tag: CaseTag,
        /// Name of the generated predicate this test is equivalent to.
        predicate: Name,
    },
}

impl Test {
    pub fn is_always(&self) -> bool {
        matches!(self, Test::Always)
    }

    fn references(&self, name: Name) -> bool {
        match self {
            Test::Always => false,
            Test::Case { scrutinee, .. } => *scrutinee == name,
        }
    }
}

/// A lowered top-level function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreFunction {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: CoreExpr,
}

/// Everything the generator produced for one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub decls: Vec<TypeDecls>,
    pub functions: Vec<CoreFunction>,
}

impl Program {
    pub fn function(&self, name: Name) -> Option<&CoreFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}
