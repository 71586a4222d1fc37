//! Surface syntax tree produced by the parser.
//!
//! Variant declarations are kept in the declarative shape the generator
//! consumes ([`VariantSpec`], [`CaseSpec`], [`FieldSpec`]); match use sites
//! keep their clause list unexpanded ([`MatchUse`], [`MatchClause`]).

use crate::{Name, Span};

/// A parsed source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub items: Vec<Item>,
}

impl Module {
    pub fn variants(&self) -> impl Iterator<Item = &VariantSpec> {
        self.items.iter().filter_map(|item| match item {
            Item::Variant(spec) => Some(spec),
            Item::Function(_) => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(def) => Some(def),
            Item::Variant(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Variant(VariantSpec),
    Function(FunctionDef),
}

/// An identifier together with where it was written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub const fn new(name: Name, span: Span) -> Self {
        Ident { name, span }
    }
}

/// One `#[...]` attribute, captured verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Source text between `#[` and the matching `]`.
    pub text: String,
    pub span: Span,
}

/// Opaque options attached to a variant, case or field.
///
/// The generator never interprets these; they are forwarded into the
/// generated declarations in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    pub attrs: Vec<Attribute>,
}

impl Options {
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Declarative description of a closed sum type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantSpec {
    pub name: Ident,
    pub options: Options,
    /// Cases in declaration order. The index of a case is its tag.
    pub cases: Vec<CaseSpec>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseSpec {
    pub label: Ident,
    pub options: Options,
    pub fields: Vec<FieldSpec>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Ident,
    pub options: Options,
}

/// `fn name(params) = body`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Unit,
    Bool(bool),
    Int(i64),
    Str(String),
    Ident(Name),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `{ stmt; stmt; expr }` evaluates to its last statement.
    Block(Vec<Stmt>),
    /// `match_tree!(scrutinee) { clauses }`
    MatchUse(Box<MatchUse>),
    /// Placeholder left behind by parser recovery.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Let { name: Ident, value: Expr },
    Expr(Expr),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

/// A use of a registered match operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchUse {
    /// Operator name as written, e.g. `match_tree`.
    pub operator: Ident,
    pub scrutinee: Expr,
    pub clauses: Vec<MatchClause>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchClause {
    pub pattern: ClausePattern,
    /// Body expression sequence; the clause yields its last value.
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl MatchClause {
    pub fn is_default(&self) -> bool {
        matches!(self.pattern, ClausePattern::Default)
    }

    /// Span of the selector (`_` or the case label).
    pub fn selector_span(&self) -> Span {
        match &self.pattern {
            ClausePattern::Case { label, .. } => label.span,
            ClausePattern::Default => self.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClausePattern {
    /// `label(params) => ...` or `label rest => ...`
    Case { label: Ident, params: ParamSpec },
    /// `_ => ...`
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamSpec {
    /// Positional parameters, bound to the case fields in declared order.
    List(Vec<Param>),
    /// A bare identifier: accept and ignore any arguments.
    Ignore(Param),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Param {
    Named(Ident),
    Wildcard(Span),
}

impl Param {
    pub fn span(&self) -> Span {
        match self {
            Param::Named(ident) => ident.span,
            Param::Wildcard(span) => *span,
        }
    }
}
