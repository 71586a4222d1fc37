//! Match operators: the reusable dispatch generator for one variant.

use tagsum_ir::{CoreExpr, Name, Span};
use tracing::debug;

use crate::clause::Clause;
use crate::{dispatch, CaseSchema, MatchError, MatchWarning, NameSynthesizer};

/// Result of expanding one use site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// `let scrutinee%N = <expr> in cond { ... }`
    pub expr: CoreExpr,
    pub warnings: Vec<MatchWarning>,
}

/// Match operator for one variant, e.g. `match_tree` for `Tree`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOperator {
    variant: Name,
    name: Name,
    schema: CaseSchema,
}

impl MatchOperator {
    pub fn new(variant: Name, name: Name, schema: CaseSchema) -> Self {
        MatchOperator {
            variant,
            name,
            schema,
        }
    }

    pub fn variant(&self) -> Name {
        self.variant
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn schema(&self) -> &CaseSchema {
        &self.schema
    }

    /// Expand a use site.
    ///
    /// The scrutinee is evaluated exactly once, into a fresh binding that
    /// every branch test and accessor argument refers to.
    pub fn expand(
        &self,
        scrutinee: CoreExpr,
        clauses: Vec<Clause>,
        span: Span,
        names: &NameSynthesizer<'_>,
    ) -> Result<Expansion, MatchError> {
        let binding = names.fresh("scrutinee");
        let dispatch = dispatch::compile(self.variant, &self.schema, clauses, binding, span, names)?;
        debug!(
            operator = names.text(self.name),
            binding = names.text(binding),
            "expanded match"
        );
        Ok(Expansion {
            expr: CoreExpr::Let {
                name: binding,
                value: Box::new(scrutinee),
                body: Box::new(CoreExpr::Cond(dispatch.branches)),
            },
            warnings: dispatch.warnings,
        })
    }
}
