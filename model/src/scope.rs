use std::collections::HashMap;

use crate::error::ScopeError;

/// Position of a scope inside a `ScopeChain`. Only valid while that scope
/// is still on the stack.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ScopeId(usize);

#[derive(Debug)]
struct Scope<T> {
    table: HashMap<String, T>,
    parent: Option<usize>,
}

/// Stack of nested symbol tables.
///
/// Scopes are pushed and popped in strict LIFO order. Each scope records the
/// scope it resolves outward into; normally that is the scope below it, but
/// `enter_within` lets a function call resolve into the scope the function
/// was defined in. The root scope is never popped.
#[derive(Debug)]
pub struct ScopeChain<T> {
    scopes: Vec<Scope<T>>,
}

impl<T> ScopeChain<T> {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope { table: HashMap::new(), parent: None }],
        }
    }

    /// Push a scope whose parent is the current top.
    pub fn enter(&mut self) {
        let parent = self.scopes.len() - 1;
        self.scopes.push(Scope { table: HashMap::new(), parent: Some(parent) });
    }

    /// Push a scope whose parent is `parent` instead of the current top.
    pub fn enter_within(&mut self, parent: ScopeId) {
        debug_assert!(parent.0 < self.scopes.len(), "parent scope already popped");
        self.scopes.push(Scope { table: HashMap::new(), parent: Some(parent.0) });
    }

    pub fn exit(&mut self) -> Result<(), ScopeError> {
        if self.scopes.len() == 1 {
            return Err(ScopeError::ExitRoot);
        }
        self.scopes.pop();
        Ok(())
    }

    pub fn current(&self) -> ScopeId {
        ScopeId(self.scopes.len() - 1)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Insert into the current scope. Shadowing an outer scope is fine;
    /// a second entry with the same name in this scope is not.
    pub fn add(&mut self, name: &str, entry: T) -> Result<(), ScopeError> {
        let top = self.scopes.len() - 1;
        let table = &mut self.scopes[top].table;
        if table.contains_key(name) {
            return Err(ScopeError::Redeclaration(name.to_string()));
        }
        table.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&T> {
        let index = self.resolve(name)?;
        self.scopes[index].table.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = self.resolve(name)?;
        self.scopes[index].table.get_mut(name)
    }

    /// Index of the innermost visible scope that declares `name`.
    fn resolve(&self, name: &str) -> Option<usize> {
        let mut index = Some(self.scopes.len() - 1);
        while let Some(i) = index {
            let scope = &self.scopes[i];
            if scope.table.contains_key(name) {
                return Some(i);
            }
            index = scope.parent;
        }
        None
    }
}

impl<T> Default for ScopeChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
