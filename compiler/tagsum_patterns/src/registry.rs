//! Operator registry: hands match operators from variant definition to use
//! site expansion.

use rustc_hash::FxHashMap;
use tagsum_ir::ast::Ident;
use tagsum_ir::{CoreExpr, Name, Span};

use crate::clause::Clause;
use crate::{Expansion, MatchError, MatchOperator, NameSynthesizer};

/// Match operators keyed by operator name.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    operators: FxHashMap<Name, MatchOperator>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `operator`, returning any operator it replaces.
    pub fn register(&mut self, operator: MatchOperator) -> Option<MatchOperator> {
        self.operators.insert(operator.name(), operator)
    }

    pub fn get(&self, name: Name) -> Option<&MatchOperator> {
        self.operators.get(&name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.operators.contains_key(&name)
    }

    /// Expand a use of the operator named `operator`.
    pub fn expand(
        &self,
        operator: Ident,
        scrutinee: CoreExpr,
        clauses: Vec<Clause>,
        span: Span,
        names: &NameSynthesizer<'_>,
    ) -> Result<Expansion, MatchError> {
        let Some(found) = self.get(operator.name) else {
            return Err(MatchError::UnknownOperator {
                name: names.text(operator.name).to_owned(),
                span: operator.span,
            });
        };
        found.expand(scrutinee, clauses, span, names)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
