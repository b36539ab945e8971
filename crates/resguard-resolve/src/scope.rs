// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope tree for name resolution.

use std::collections::HashMap;

use resguard_ast::{NodeId, Span};

use crate::error::ResolveError;
use crate::symbol::SymbolId;

/// Unique identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// The kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Class body: fields visible to every method.
    Class(NodeId),
    /// Method parameters.
    Method(SymbolId),
    /// Block inside a method body.
    Block,
}

/// A scope in the scope tree.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub bindings: HashMap<String, (SymbolId, Span)>,
}

/// Tree of scopes for name lookup.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: Option<ScopeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            current: None,
        }
    }

    /// Push a new scope under the current one.
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent: self.current,
            kind,
            bindings: HashMap::new(),
        });
        self.current = Some(id);
        id
    }

    /// Pop the current scope and return to its parent.
    pub fn pop(&mut self) {
        if let Some(scope) = self.current.and_then(|id| self.scopes.get(id.0 as usize)) {
            self.current = scope.parent;
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Scope> {
        let mut next = self.current;
        std::iter::from_fn(move || {
            let scope = self.scopes.get(next?.0 as usize)?;
            next = scope.parent;
            Some(scope)
        })
    }

    /// Look up a name in the current scope chain.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.chain()
            .find_map(|scope| scope.bindings.get(name).map(|&(sym, _)| sym))
    }

    /// Define a name in the current scope. Redefinition within the same scope
    /// is an error; an inner scope may shadow a field.
    pub fn define(&mut self, name: String, symbol: SymbolId, span: Span) -> Result<(), ResolveError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        let scope = &mut self.scopes[current.0 as usize];
        if let Some(&(_, previous)) = scope.bindings.get(&name) {
            return Err(ResolveError::duplicate(name, span, previous));
        }
        scope.bindings.insert(name, (symbol, span));
        Ok(())
    }

    /// Enclosing classes, innermost first.
    pub fn enclosing_classes(&self) -> Vec<NodeId> {
        self.chain()
            .filter_map(|scope| match scope.kind {
                ScopeKind::Class(class) => Some(class),
                _ => None,
            })
            .collect()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_field() {
        let mut tree = ScopeTree::new();
        tree.push(ScopeKind::Class(NodeId(0)));
        tree.define("rr".into(), SymbolId(0), Span::new(0, 1)).unwrap();
        tree.push(ScopeKind::Method(SymbolId(1)));
        tree.define("rr".into(), SymbolId(2), Span::new(5, 6)).unwrap();
        assert_eq!(tree.lookup("rr"), Some(SymbolId(2)));
        tree.pop();
        assert_eq!(tree.lookup("rr"), Some(SymbolId(0)));
    }

    #[test]
    fn duplicate_in_same_scope() {
        let mut tree = ScopeTree::new();
        tree.push(ScopeKind::Block);
        tree.define("x".into(), SymbolId(0), Span::new(0, 1)).unwrap();
        let err = tree.define("x".into(), SymbolId(1), Span::new(4, 5)).unwrap_err();
        assert_eq!(
            err.kind,
            crate::error::ResolveErrorKind::DuplicateDefinition {
                name: "x".into(),
                previous: Span::new(0, 1),
            }
        );
    }

    #[test]
    fn enclosing_classes_innermost_first() {
        let mut tree = ScopeTree::new();
        tree.push(ScopeKind::Class(NodeId(1)));
        tree.push(ScopeKind::Class(NodeId(2)));
        tree.push(ScopeKind::Block);
        assert_eq!(tree.enclosing_classes(), vec![NodeId(2), NodeId(1)]);
    }
}
