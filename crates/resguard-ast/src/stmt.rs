// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::Expr;
use crate::{NodeId, Span};

/// A statement in the AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// The kind of statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),
    /// Local variable declaration (`ResourceResolver rr = ...;`)
    Local(VarDecl),
    /// Return statement
    Return(Option<Expr>),
    /// Nested block
    Block(Vec<Stmt>),
    /// If statement
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// While loop
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// Classic for loop
    For {
        init: Vec<Stmt>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Vec<Stmt>,
    },
    /// Enhanced for (`for (Resource r : children)`)
    ForEach {
        var: VarDecl,
        iter: Expr,
        body: Vec<Stmt>,
    },
    /// try / try-with-resources
    Try(TryStmt),
    /// Throw statement
    Throw(Expr),
    /// Break statement
    Break,
    /// Continue statement
    Continue,
}

/// A variable declaration site: local, parameter, catch parameter, loop
/// variable or try resource.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    pub id: NodeId,
    pub name: String,
    /// Declared type as written (simple or fully-qualified name).
    pub ty: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub init: Option<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A try statement. `resources` is non-empty for try-with-resources.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TryStmt {
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub catches: Vec<CatchClause>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub finally: Option<Vec<Stmt>>,
}

/// A catch clause.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatchClause {
    pub param: VarDecl,
    pub body: Vec<Stmt>,
}
