//! Runtime values.
//!
//! Variant instances carry their variant name, case type and tag; tests
//! compare against the tag, never the case name.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tagsum_ir::{CaseDecl, CaseTag, CoreExpr, Lambda, Name, StringInterner};

use crate::builtins::Builtin;
use crate::environment::{LocalScope, Scope};

#[derive(Clone, Debug)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
    Variant(Rc<VariantValue>),
    Callable(Callable),
}

impl Value {
    pub fn str(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    /// Name of the value's runtime type, as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Variant(_) => "variant",
            Value::Callable(_) => "callable",
        }
    }

    pub fn as_variant(&self) -> Option<&VariantValue> {
        match self {
            Value::Variant(value) => Some(value),
            _ => None,
        }
    }

    /// Render the value for `print` and the driver.
    ///
    /// Strings print bare at the top level and quoted inside variants.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
            nested: false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Variant(a), Value::Variant(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
    nested: bool,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Unit => f.write_str("()"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Str(text) if self.nested => write!(f, "{text:?}"),
            Value::Str(text) => f.write_str(text),
            Value::Variant(variant) => {
                f.write_str(self.interner.lookup(variant.case_type))?;
                if variant.fields.is_empty() {
                    return Ok(());
                }
                f.write_str("(")?;
                for (index, field) in variant.fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    let field = ValueDisplay {
                        value: field,
                        interner: self.interner,
                        nested: true,
                    };
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
            Value::Callable(callable) => write!(f, "<{}>", callable.describe(self.interner)),
        }
    }
}

/// An instance of a case type.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantValue {
    pub variant: Name,
    pub case_type: Name,
    pub tag: CaseTag,
    pub fields: Vec<Value>,
}

/// What the runtime needs to know about one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseInfo {
    pub variant: Name,
    pub case_type: Name,
    pub tag: CaseTag,
    pub predicate: Name,
    /// Field names in declaration order.
    pub fields: Vec<Name>,
}

impl CaseInfo {
    pub fn from_decl(decl: &CaseDecl) -> Self {
        CaseInfo {
            variant: decl.parent,
            case_type: decl.name,
            tag: decl.tag,
            predicate: decl.predicate,
            fields: decl.fields.iter().map(|field| field.name).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn is_instance(&self, value: &Value) -> bool {
        value
            .as_variant()
            .is_some_and(|v| v.variant == self.variant && v.tag == self.tag)
    }
}

#[derive(Clone, Debug)]
pub enum Callable {
    Closure(Rc<Closure>),
    Function(Rc<FunctionValue>),
    Constructor(Rc<CaseInfo>),
    Accessor {
        case: Rc<CaseInfo>,
        index: usize,
        name: Name,
    },
    Predicate(Rc<CaseInfo>),
    Builtin(Builtin),
}

impl Callable {
    fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Constructor(a), Callable::Constructor(b))
            | (Callable::Predicate(a), Callable::Predicate(b)) => Rc::ptr_eq(a, b),
            (
                Callable::Accessor { case: a, index: i, .. },
                Callable::Accessor { case: b, index: j, .. },
            ) => Rc::ptr_eq(a, b) && i == j,
            (Callable::Builtin(a), Callable::Builtin(b)) => a == b,
            _ => false,
        }
    }

    /// Short description used in error messages and when printed.
    pub fn describe(&self, interner: &StringInterner) -> String {
        match self {
            Callable::Closure(_) => "closure".to_string(),
            Callable::Function(function) => format!("fn {}", interner.lookup(function.name)),
            Callable::Constructor(case) => {
                format!("constructor {}", interner.lookup(case.case_type))
            }
            Callable::Accessor { name, .. } => format!("accessor {}", interner.lookup(*name)),
            Callable::Predicate(case) => {
                format!("predicate {}", interner.lookup(case.predicate))
            }
            Callable::Builtin(builtin) => format!("builtin {}", builtin.name()),
        }
    }
}

/// A lambda together with the scope it was created in.
pub struct Closure {
    pub lambda: Arc<Lambda>,
    pub scope: LocalScope<Scope>,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("arity", &self.lambda.arity())
            .field("variadic", &self.lambda.variadic)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct FunctionValue {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: CoreExpr,
}
