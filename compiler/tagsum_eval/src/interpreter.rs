//! Tree-walking interpreter over the core IR.
//!
//! Declarations are turned into callables up front: one constructor and one
//! predicate per case, one accessor per field. Top-level functions and the
//! builtins live in the same global scope.
//!
//! Function calls run in a fresh environment that sees only the globals.
//! Clause callables are closures over the scope that bound the scrutinee.

use std::mem;
use std::rc::Rc;
use std::sync::Arc;

use tagsum_ir::{CoreExpr, Literal, Name, Program, StringInterner, Test};
use tracing::{debug, trace};

use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::operators::evaluate_binary;
use crate::output::OutputBuffer;
use crate::stack::ensure_sufficient_stack;
use crate::value::{CaseInfo, Callable, Closure, FunctionValue, Value, VariantValue};

/// Runtime limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Nested calls allowed before `StackOverflow` is raised.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: 256,
        }
    }
}

pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    env: Environment,
    config: EvalConfig,
    output: OutputBuffer,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(program: &Program, interner: &'a StringInterner, config: EvalConfig) -> Self {
        let mut env = Environment::new();

        for builtin in Builtin::ALL {
            env.define_global(
                interner.intern(builtin.name()),
                Value::Callable(Callable::Builtin(builtin)),
            );
        }

        for decls in &program.decls {
            for case in &decls.cases {
                let info = Rc::new(CaseInfo::from_decl(case));
                env.define_global(
                    case.name,
                    Value::Callable(Callable::Constructor(Rc::clone(&info))),
                );
                env.define_global(
                    case.predicate,
                    Value::Callable(Callable::Predicate(Rc::clone(&info))),
                );
                for (index, field) in case.fields.iter().enumerate() {
                    env.define_global(
                        field.accessor,
                        Value::Callable(Callable::Accessor {
                            case: Rc::clone(&info),
                            index,
                            name: field.accessor,
                        }),
                    );
                }
            }
        }

        for function in &program.functions {
            env.define_global(
                function.name,
                Value::Callable(Callable::Function(Rc::new(FunctionValue {
                    name: function.name,
                    params: function.params.clone(),
                    body: function.body.clone(),
                }))),
            );
        }

        debug!(
            variants = program.decls.len(),
            functions = program.functions.len(),
            "interpreter ready"
        );

        Interpreter {
            interner,
            env,
            config,
            output: OutputBuffer::new(),
            depth: 0,
        }
    }

    /// Call `main` with no arguments.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_main(&mut self) -> EvalResult {
        let main = self.interner.intern("main");
        match self.env.lookup(main) {
            Some(value @ Value::Callable(Callable::Function(_))) => self.call(&value, Vec::new()),
            _ => Err(EvalErrorKind::NoMain.into()),
        }
    }

    /// Call the global named `name`.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        let callee = self
            .env
            .lookup(self.interner.intern(name))
            .ok_or_else(|| EvalErrorKind::UndefinedVariable {
                name: name.to_string(),
            })?;
        self.call(&callee, args)
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// Drain everything printed so far.
    pub fn take_output(&self) -> String {
        self.output.take()
    }

    pub fn eval(&mut self, expr: &CoreExpr) -> EvalResult {
        match expr {
            CoreExpr::Lit(literal) => Ok(eval_literal(literal)),
            CoreExpr::Var(name) => self.env.lookup(*name).ok_or_else(|| {
                EvalErrorKind::UndefinedVariable {
                    name: self.interner.lookup(*name).to_string(),
                }
                .into()
            }),
            CoreExpr::Call { callee, args } => {
                let callee = self.eval(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                self.call(&callee, args)
            }
            CoreExpr::Lambda(lambda) => Ok(Value::Callable(Callable::Closure(Rc::new(
                Closure {
                    lambda: Arc::clone(lambda),
                    scope: self.env.current_scope(),
                },
            )))),
            CoreExpr::Let { name, value, body } => {
                let value = self.eval(value)?;
                self.env.push_scope();
                self.env.define(*name, value);
                let result = self.eval(body);
                self.env.pop_scope();
                result
            }
            CoreExpr::Seq(exprs) => {
                let mut last = Value::Unit;
                for expr in exprs {
                    last = self.eval(expr)?;
                }
                Ok(last)
            }
            CoreExpr::If {
                cond,
                then_branch,
                else_branch,
            } => match self.eval(cond)? {
                Value::Bool(true) => self.eval(then_branch),
                Value::Bool(false) => self.eval(else_branch),
                other => Err(EvalErrorKind::TypeMismatch {
                    expected: "bool",
                    found: other.type_name(),
                }
                .into()),
            },
            CoreExpr::Binary { op, lhs, rhs } => {
                let left = self.eval(lhs)?;
                let right = self.eval(rhs)?;
                evaluate_binary(&left, &right, *op)
            }
            CoreExpr::Cond(branches) => {
                for branch in branches {
                    if self.passes(&branch.test)? {
                        return self.eval(&branch.action);
                    }
                }
                // Expansions always end in an unconditional branch.
                Err(EvalErrorKind::CompileError.into())
            }
            CoreExpr::Fail { variant } => Err(EvalErrorKind::MatchFailure {
                variant: self.interner.lookup(*variant).to_string(),
            }
            .into()),
            CoreExpr::Error => Err(EvalErrorKind::CompileError.into()),
        }
    }

    fn passes(&self, test: &Test) -> EvalResult<bool> {
        match test {
            Test::Always => Ok(true),
            Test::Case {
                scrutinee,
                variant,
                tag,
                ..
            } => {
                let value = self.env.lookup(*scrutinee).ok_or_else(|| {
                    EvalErrorKind::UndefinedVariable {
                        name: self.interner.lookup(*scrutinee).to_string(),
                    }
                })?;
                Ok(value
                    .as_variant()
                    .is_some_and(|v| v.variant == *variant && v.tag == *tag))
            }
        }
    }

    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        let Value::Callable(callable) = callee else {
            return Err(EvalErrorKind::NotCallable {
                found: callee.type_name(),
            }
            .into());
        };

        match callable {
            Callable::Closure(closure) => {
                let lambda = &closure.lambda;
                let accepts = if lambda.variadic {
                    args.len() >= lambda.arity()
                } else {
                    args.len() == lambda.arity()
                };
                if !accepts {
                    return Err(arity_mismatch("closure", lambda.arity(), args.len()));
                }
                let mut env = self.env.extending(closure.scope.clone());
                for (param, arg) in lambda.params.iter().zip(args) {
                    env.define(param.name, arg);
                }
                self.with_frame(env, &lambda.body, None)
            }
            Callable::Function(function) => {
                let name = self.interner.lookup(function.name);
                if args.len() != function.params.len() {
                    return Err(arity_mismatch(name, function.params.len(), args.len()));
                }
                trace!(function = name, depth = self.depth, "call");
                let mut env = self.env.child();
                for (param, arg) in function.params.iter().zip(args) {
                    env.define(*param, arg);
                }
                self.with_frame(env, &function.body, Some(name))
            }
            Callable::Constructor(case) => {
                if args.len() != case.arity() {
                    return Err(arity_mismatch(
                        self.interner.lookup(case.case_type),
                        case.arity(),
                        args.len(),
                    ));
                }
                Ok(Value::Variant(Rc::new(VariantValue {
                    variant: case.variant,
                    case_type: case.case_type,
                    tag: case.tag,
                    fields: args,
                })))
            }
            Callable::Accessor { case, index, name } => {
                let [value] = self.single_arg(*name, args)?;
                match value.as_variant() {
                    Some(instance) if case.is_instance(&value) => instance
                        .fields
                        .get(*index)
                        .cloned()
                        .ok_or_else(|| EvalErrorKind::CompileError.into()),
                    found => Err(EvalErrorKind::WrongCase {
                        accessor: self.interner.lookup(*name).to_string(),
                        expected: self.interner.lookup(case.case_type).to_string(),
                        found: found.map_or(value.type_name(), |v| {
                            self.interner.lookup(v.case_type)
                        })
                        .to_string(),
                    }
                    .into()),
                }
            }
            Callable::Predicate(case) => {
                let [value] = self.single_arg(case.predicate, args)?;
                Ok(Value::Bool(case.is_instance(&value)))
            }
            Callable::Builtin(builtin) => builtin.call(&args, self.interner, &self.output),
        }
    }

    fn single_arg(&self, callee: Name, args: Vec<Value>) -> EvalResult<[Value; 1]> {
        let found = args.len();
        <[Value; 1]>::try_from(args)
            .map_err(|_| arity_mismatch(self.interner.lookup(callee), 1, found))
    }

    /// Evaluate `body` in `env` one call level deeper.
    ///
    /// Errors leaving a named function record it as a frame.
    fn with_frame(
        &mut self,
        env: Environment,
        body: &CoreExpr,
        function: Option<&str>,
    ) -> EvalResult {
        if self.depth >= self.config.max_call_depth {
            return Err(EvalErrorKind::StackOverflow {
                limit: self.config.max_call_depth,
            }
            .into());
        }
        self.depth += 1;
        let saved = mem::replace(&mut self.env, env);
        let result = ensure_sufficient_stack(|| self.eval(body));
        self.env = saved;
        self.depth -= 1;
        match function {
            Some(name) => result.map_err(|error| error.in_function(name)),
            None => result,
        }
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Unit => Value::Unit,
        Literal::Bool(value) => Value::Bool(*value),
        Literal::Int(value) => Value::Int(*value),
        Literal::Str(text) => Value::str(text),
    }
}

fn arity_mismatch(callee: &str, expected: usize, found: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        callee: callee.to_string(),
        expected,
        found,
    }
    .into()
}
