// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::{NodeId, Span};

/// An expression in the AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// `null`
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// String literal
    String(String),
    /// Bare identifier
    Ident(String),
    /// `this`
    This,
    /// Field access (`this.factory`, `holder.rr`)
    Field {
        object: Box<Expr>,
        field: String,
    },
    /// Method invocation. `receiver` is `None` for a bare `helper(..)` call.
    MethodCall {
        receiver: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// Instance creation (`new HashMap<>()`)
    New {
        ty: String,
        args: Vec<Expr>,
    },
    /// Assignment (`rr = factory.getResourceResolver(p)`)
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Ternary (`cond ? a : b`)
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// Type cast (`(ResourceResolver) obj`)
    Cast {
        ty: String,
        expr: Box<Expr>,
    },
    /// `expr instanceof Type`
    InstanceOf {
        expr: Box<Expr>,
        ty: String,
    },
    /// Array element access
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    /// The name if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_method_call(&self) -> bool {
        matches!(self.kind, ExprKind::MethodCall { .. })
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    // Logical
    And,
    Or,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical not (!)
    Not,
}
