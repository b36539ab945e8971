// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Programmatic tree construction.
//!
//! Hosts that do not serialize their trees, and the test suites, assemble
//! units through [`AstBuilder`]. Every node gets a fresh [`NodeId`] and a
//! one-byte synthetic span at the same offset, so nodes stay ordered by
//! creation.

use crate::decl::{ClassDecl, MethodDecl};
use crate::expr::{BinOp, Expr, ExprKind};
use crate::stmt::{CatchClause, Stmt, StmtKind, TryStmt, VarDecl};
use crate::{NodeId, Span};

#[derive(Debug, Default)]
pub struct AstBuilder {
    next: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&mut self) -> (NodeId, Span) {
        let id = self.next;
        self.next += 1;
        (NodeId(id), Span::new(id as usize, id as usize + 1))
    }

    fn expr(&mut self, kind: ExprKind) -> Expr {
        let (id, span) = self.fresh();
        Expr { id, kind, span }
    }

    fn stmt(&mut self, kind: StmtKind) -> Stmt {
        let (id, span) = self.fresh();
        Stmt { id, kind, span }
    }

    // ── Expressions ─────────────────────────────────────────────────────

    pub fn ident(&mut self, name: &str) -> Expr {
        self.expr(ExprKind::Ident(name.to_string()))
    }

    pub fn this(&mut self) -> Expr {
        self.expr(ExprKind::This)
    }

    pub fn null(&mut self) -> Expr {
        self.expr(ExprKind::Null)
    }

    pub fn string(&mut self, value: &str) -> Expr {
        self.expr(ExprKind::String(value.to_string()))
    }

    pub fn field(&mut self, object: Expr, field: &str) -> Expr {
        self.expr(ExprKind::Field {
            object: Box::new(object),
            field: field.to_string(),
        })
    }

    /// `receiver.method(args)`
    pub fn call(&mut self, receiver: Expr, method: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::MethodCall {
            receiver: Some(Box::new(receiver)),
            method: method.to_string(),
            args,
        })
    }

    /// `method(args)` with no receiver.
    pub fn bare_call(&mut self, method: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::MethodCall {
            receiver: None,
            method: method.to_string(),
            args,
        })
    }

    pub fn new_object(&mut self, ty: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::New {
            ty: ty.to_string(),
            args,
        })
    }

    pub fn assign(&mut self, target: Expr, value: Expr) -> Expr {
        self.expr(ExprKind::Assign {
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn binary(&mut self, op: BinOp, left: Expr, right: Expr) -> Expr {
        self.expr(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn conditional(&mut self, cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
        self.expr(ExprKind::Conditional {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    // ── Declarations ────────────────────────────────────────────────────

    pub fn var(&mut self, ty: &str, name: &str, init: Option<Expr>) -> VarDecl {
        let (id, span) = self.fresh();
        VarDecl {
            id,
            name: name.to_string(),
            ty: ty.to_string(),
            init,
            span,
        }
    }

    pub fn param(&mut self, ty: &str, name: &str) -> VarDecl {
        self.var(ty, name, None)
    }

    pub fn method(
        &mut self,
        name: &str,
        params: Vec<VarDecl>,
        ret_ty: Option<&str>,
        body: Vec<Stmt>,
    ) -> MethodDecl {
        let (id, span) = self.fresh();
        MethodDecl {
            id,
            name: name.to_string(),
            params,
            ret_ty: ret_ty.map(str::to_string),
            body: Some(body),
            span,
        }
    }

    pub fn class(&mut self, name: &str, fields: Vec<VarDecl>, methods: Vec<MethodDecl>) -> ClassDecl {
        let (id, span) = self.fresh();
        ClassDecl {
            id,
            name: name.to_string(),
            fields,
            methods,
            nested: Vec::new(),
            span,
        }
    }

    // ── Statements ──────────────────────────────────────────────────────

    /// `ty name = init;`
    pub fn local(&mut self, ty: &str, name: &str, init: Option<Expr>) -> Stmt {
        let decl = self.var(ty, name, init);
        self.stmt(StmtKind::Local(decl))
    }

    pub fn expr_stmt(&mut self, expr: Expr) -> Stmt {
        self.stmt(StmtKind::Expr(expr))
    }

    /// `target = value;`
    pub fn assign_stmt(&mut self, target: &str, value: Expr) -> Stmt {
        let target = self.ident(target);
        let assign = self.assign(target, value);
        self.expr_stmt(assign)
    }

    /// `receiver.method();` on a named variable.
    pub fn call_stmt(&mut self, receiver: &str, method: &str) -> Stmt {
        let receiver = self.ident(receiver);
        let call = self.call(receiver, method, Vec::new());
        self.expr_stmt(call)
    }

    pub fn ret(&mut self, value: Option<Expr>) -> Stmt {
        self.stmt(StmtKind::Return(value))
    }

    /// `return name;`
    pub fn ret_ident(&mut self, name: &str) -> Stmt {
        let value = self.ident(name);
        self.ret(Some(value))
    }

    pub fn block(&mut self, body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::Block(body))
    }

    pub fn if_stmt(&mut self, cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
        self.stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn while_loop(&mut self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::While { cond, body })
    }

    pub fn for_each(&mut self, var: VarDecl, iter: Expr, body: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::ForEach { var, iter, body })
    }

    pub fn try_stmt(
        &mut self,
        resources: Vec<VarDecl>,
        body: Vec<Stmt>,
        catches: Vec<CatchClause>,
        finally: Option<Vec<Stmt>>,
    ) -> Stmt {
        self.stmt(StmtKind::Try(TryStmt {
            resources,
            body,
            catches,
            finally,
        }))
    }

    pub fn catch(&mut self, ty: &str, name: &str, body: Vec<Stmt>) -> CatchClause {
        CatchClause {
            param: self.param(ty, name),
            body,
        }
    }

    pub fn throw(&mut self, value: Expr) -> Stmt {
        self.stmt(StmtKind::Throw(value))
    }
}
