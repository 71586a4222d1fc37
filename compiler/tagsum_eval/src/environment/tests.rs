use pretty_assertions::assert_eq;
use tagsum_ir::StringInterner;

use super::*;

#[test]
fn test_scope_define_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut scope = Scope::new();
    scope.define(x, Value::Int(42));
    assert_eq!(scope.lookup(x), Some(Value::Int(42)));
}

#[test]
fn test_scope_shadowing() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().define(x, Value::Int(1));

    let mut child = Scope::with_parent(parent.clone());
    child.define(x, Value::Int(2));

    assert_eq!(child.lookup(x), Some(Value::Int(2)));
    assert_eq!(parent.borrow().lookup(x), Some(Value::Int(1)));
}

#[test]
fn test_environment_push_pop() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, Value::Int(1));

    env.push_scope();
    env.define(x, Value::Int(2));
    assert_eq!(env.lookup(x), Some(Value::Int(2)));

    env.pop_scope();
    assert_eq!(env.lookup(x), Some(Value::Int(1)));
}

#[test]
fn test_outermost_scope_is_never_popped() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, Value::Unit);
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup(x), Some(Value::Unit));
}

#[test]
fn test_child_sees_globals_only() {
    let interner = StringInterner::new();
    let global = interner.intern("g");
    let local = interner.intern("l");

    let mut env = Environment::new();
    env.define_global(global, Value::Int(1));
    env.push_scope();
    env.define(local, Value::Int(2));

    let mut child = env.child();
    assert_eq!(child.lookup(global), Some(Value::Int(1)));
    assert_eq!(child.lookup(local), None);

    // Parameters bound in the child never leak into the globals.
    child.define(local, Value::Int(3));
    assert_eq!(env.child().lookup(local), None);
}

#[test]
fn test_extending_captured_scope() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let mut env = Environment::new();
    env.push_scope();
    env.define(x, Value::Int(1));
    let captured = env.current_scope();
    env.pop_scope();

    let mut inner = env.extending(captured);
    inner.define(y, Value::Int(2));
    assert_eq!(inner.lookup(x), Some(Value::Int(1)));
    assert_eq!(inner.lookup(y), Some(Value::Int(2)));
    assert_eq!(env.lookup(x), None);
}
