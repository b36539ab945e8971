// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The query surface the rules consume.

use std::collections::HashMap;

use resguard_ast::decl::{CompilationUnit, MethodDecl};
use resguard_ast::NodeId;

use crate::error::ResolveError;
use crate::symbol::{Symbol, SymbolId, SymbolTable};

/// What a method-call expression resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTarget {
    /// Fully-qualified static type the method was looked up on.
    pub owner: Option<String>,
    /// Fully-qualified result type; `None` for `void` or unknown.
    pub returns: Option<String>,
    /// The callee, when it is declared in the same unit.
    pub callee: Option<SymbolId>,
}

/// Read-only symbol and type queries over one compilation unit.
///
/// Every query answers `None` for anything it could not resolve; callers
/// treat that as "not a match".
pub trait SemanticModel {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// The declaration an identifier (or `this.field`) expression refers to.
    fn reference(&self, expr: NodeId) -> Option<SymbolId>;

    /// The symbol a declaration node introduces.
    fn declaration(&self, decl: NodeId) -> Option<SymbolId>;

    fn call_target(&self, call: NodeId) -> Option<&CallTarget>;

    /// The body-bearing declaration of a method symbol.
    fn method(&self, method: SymbolId) -> Option<&MethodDecl>;
}

/// Resolution results for one unit, borrowing the tree they describe.
#[derive(Debug)]
pub struct ResolvedUnit<'a> {
    pub unit: &'a CompilationUnit,
    pub symbols: SymbolTable,
    pub references: HashMap<NodeId, SymbolId>,
    pub declarations: HashMap<NodeId, SymbolId>,
    pub calls: HashMap<NodeId, CallTarget>,
    pub(crate) methods: HashMap<SymbolId, &'a MethodDecl>,
    /// Non-fatal problems met while resolving.
    pub errors: Vec<ResolveError>,
}

impl<'a> SemanticModel for ResolvedUnit<'a> {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    fn reference(&self, expr: NodeId) -> Option<SymbolId> {
        self.references.get(&expr).copied()
    }

    fn declaration(&self, decl: NodeId) -> Option<SymbolId> {
        self.declarations.get(&decl).copied()
    }

    fn call_target(&self, call: NodeId) -> Option<&CallTarget> {
        self.calls.get(&call)
    }

    fn method(&self, method: SymbolId) -> Option<&MethodDecl> {
        self.methods.get(&method).copied()
    }
}
