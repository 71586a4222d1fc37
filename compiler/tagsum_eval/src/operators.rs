//! Binary operators.
//!
//! Integer arithmetic is checked; `+` also concatenates strings. Equality is
//! defined between values of the same type, ordering on ints and strings.

#![deny(clippy::arithmetic_side_effects)]

use std::cmp::Ordering;
use std::rc::Rc;

use tagsum_ir::ast::BinaryOp;

use crate::errors::{EvalErrorKind, EvalResult};
use crate::Value;

pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_str_binary(a, b, op),
        _ => match op {
            BinaryOp::Eq | BinaryOp::NotEq if left.type_name() == right.type_name() => {
                Ok(Value::Bool((left == right) == (op == BinaryOp::Eq)))
            }
            _ => Err(invalid_operands(left, right, op)),
        },
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let checked = |result: Option<i64>| -> EvalResult {
        result
            .map(Value::Int)
            .ok_or_else(|| EvalErrorKind::IntegerOverflow { op: op.as_symbol() }.into())
    };
    match op {
        BinaryOp::Add => checked(a.checked_add(b)),
        BinaryOp::Sub => checked(a.checked_sub(b)),
        BinaryOp::Mul => checked(a.checked_mul(b)),
        _ => Ok(Value::Bool(compare(a.cmp(&b), op))),
    }
}

fn eval_str_binary(a: &Rc<str>, b: &Rc<str>, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len().saturating_add(b.len()));
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(Rc::from(joined)))
        }
        BinaryOp::Sub | BinaryOp::Mul => Err(EvalErrorKind::InvalidOperands {
            op: op.as_symbol(),
            left: "string",
            right: "string",
        }
        .into()),
        _ => Ok(Value::Bool(compare(a.as_ref().cmp(b.as_ref()), op))),
    }
}

/// Comparison operators only; arithmetic never reaches here.
fn compare(ordering: Ordering, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Eq => ordering.is_eq(),
        BinaryOp::NotEq => ordering.is_ne(),
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => false,
    }
}

fn invalid_operands(left: &Value, right: &Value, op: BinaryOp) -> crate::EvalError {
    EvalErrorKind::InvalidOperands {
        op: op.as_symbol(),
        left: left.type_name(),
        right: right.type_name(),
    }
    .into()
}
