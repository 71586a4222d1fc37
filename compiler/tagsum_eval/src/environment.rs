//! Lexical scopes for the evaluator.
//!
//! All bindings are immutable. Scopes form a parent chain ending at the
//! global scope; closures keep the scope they were created in alive.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tagsum_ir::Name;

use crate::Value;

/// Single-threaded shared scope handle.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LocalScope(..)")
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One scope of bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name`, shadowing any binding of the same name in this scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }
}

/// Scope stack for the function currently executing, over a shared global
/// scope.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost scope. The outermost scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup(name)
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    /// A fresh environment whose only local scope sits directly on the
    /// globals, for function calls.
    #[must_use]
    pub fn child(&self) -> Self {
        self.extending(self.global.clone())
    }

    /// A fresh environment whose innermost scope extends `scope`, for
    /// closure calls.
    #[must_use]
    pub fn extending(&self, scope: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::with_parent(scope))],
            global: self.global.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
