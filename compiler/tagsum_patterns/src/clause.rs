//! Clause compilation: one match clause to one callable.

use smallvec::SmallVec;
use tagsum_ir::ast::{ClausePattern, Ident, Param, ParamSpec};
use tagsum_ir::{CoreExpr, Lambda, LambdaParam, Span};

use crate::NameSynthesizer;

/// A match clause whose body has already been lowered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub pattern: ClausePattern,
    pub body: CoreExpr,
    pub span: Span,
}

/// Which case a clause handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Case(Ident),
    Default,
}

impl Clause {
    pub fn new(pattern: ClausePattern, body: CoreExpr, span: Span) -> Self {
        Clause {
            pattern,
            body,
            span,
        }
    }

    pub fn selector(&self) -> Selector {
        match &self.pattern {
            ClausePattern::Case { label, .. } => Selector::Case(*label),
            ClausePattern::Default => Selector::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.pattern, ClausePattern::Default)
    }

    /// Span of the case label, or of the whole clause for a default.
    pub fn selector_span(&self) -> Span {
        match self.selector() {
            Selector::Case(label) => label.span,
            Selector::Default => self.span,
        }
    }
}

/// Compile `pattern` and `body` into a callable.
///
/// - default: no parameters
/// - `label(p1, ..., pk)`: arity k, bound positionally; each `_` gets its own
///   fresh name and is marked unused
/// - `label rest`: variadic with no parameters; arguments are discarded
pub fn compile(pattern: &ClausePattern, body: CoreExpr, names: &NameSynthesizer<'_>) -> Lambda {
    let (params, variadic) = match pattern {
        ClausePattern::Default => (SmallVec::new(), false),
        ClausePattern::Case {
            params: ParamSpec::List(params),
            ..
        } => (
            params
                .iter()
                .map(|param| match param {
                    Param::Named(ident) => LambdaParam {
                        name: ident.name,
                        unused: false,
                    },
                    Param::Wildcard(_) => LambdaParam {
                        name: names.fresh("_"),
                        unused: true,
                    },
                })
                .collect(),
            false,
        ),
        ClausePattern::Case {
            params: ParamSpec::Ignore(_),
            ..
        } => (SmallVec::new(), true),
    };

    Lambda {
        params,
        variadic,
        body,
    }
}
