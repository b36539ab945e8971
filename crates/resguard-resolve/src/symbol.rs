// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbol definitions and symbol table.

use resguard_ast::{NodeId, Span};

/// Unique identifier for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Where a variable binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarOrigin {
    /// `T x = ...;` or `T x;` inside a body.
    Local,
    /// Declared in a try-with-resources resource list.
    TryResource,
    /// `catch (T e)`
    CatchParam,
    /// `for (T x : xs)`
    LoopVar,
}

/// The kind of symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A variable declared inside a method body.
    Variable { origin: VarOrigin },
    /// A method parameter.
    Parameter,
    /// A field of a class declared in this unit.
    Field { class: NodeId },
    /// A method declared in this unit.
    Method { class: NodeId, arity: usize },
    /// A class declared in this unit.
    Class,
}

/// A declared symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// Fully-qualified declared type (return type for methods, the class
    /// itself for classes). `None` when the written type could not be
    /// qualified or the method is `void`.
    pub ty: Option<String>,
    /// The declaring AST node.
    pub decl: NodeId,
    pub span: Span,
}

impl Symbol {
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, SymbolKind::Method { .. })
    }
}

/// Table of all symbols in a compilation unit.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Insert a new symbol and return its ID.
    pub fn insert(&mut self, name: String, kind: SymbolKind, ty: Option<String>, decl: NodeId, span: Span) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name,
            kind,
            ty,
            decl,
            span,
        });
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
