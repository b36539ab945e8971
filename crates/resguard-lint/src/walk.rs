// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pre-order traversal of a method body, reporting the nodes the resource
//! passes care about.

use resguard_ast::expr::{Expr, ExprKind};
use resguard_ast::stmt::{Stmt, StmtKind, VarDecl};

/// The left-hand side of a binding.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BindTarget<'t> {
    /// `T x = value`
    Declared(&'t VarDecl),
    /// `target = value`
    Assigned(&'t Expr),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Event<'t> {
    Bind {
        target: BindTarget<'t>,
        value: &'t Expr,
    },
    /// The value of a `return` statement.
    Return(&'t Expr),
    /// Any method call expression.
    Call(&'t Expr),
}

/// Whether try-with-resources resource lists are descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resources {
    Skip,
    Visit,
}

pub(crate) fn walk_body<'t>(body: &'t [Stmt], resources: Resources, visit: &mut dyn FnMut(Event<'t>)) {
    let mut walker = Walker { resources, visit };
    walker.stmts(body);
}

struct Walker<'v, 't> {
    resources: Resources,
    visit: &'v mut dyn FnMut(Event<'t>),
}

impl<'v, 't> Walker<'v, 't> {
    fn stmts(&mut self, stmts: &'t [Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn var(&mut self, var: &'t VarDecl) {
        if let Some(init) = &var.init {
            (self.visit)(Event::Bind {
                target: BindTarget::Declared(var),
                value: init,
            });
            self.expr(init);
        }
    }

    fn stmt(&mut self, stmt: &'t Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.expr(expr),
            StmtKind::Local(var) => self.var(var),
            StmtKind::Return(Some(value)) => {
                (self.visit)(Event::Return(value));
                self.expr(value);
            }
            StmtKind::Block(body) => self.stmts(body),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.stmts(then_branch);
                if let Some(else_branch) = else_branch {
                    self.stmts(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.expr(cond);
                self.stmts(body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.stmts(init);
                if let Some(cond) = cond {
                    self.expr(cond);
                }
                for expr in update {
                    self.expr(expr);
                }
                self.stmts(body);
            }
            StmtKind::ForEach { var, iter, body } => {
                self.var(var);
                self.expr(iter);
                self.stmts(body);
            }
            StmtKind::Try(try_stmt) => {
                if self.resources == Resources::Visit {
                    for resource in &try_stmt.resources {
                        self.var(resource);
                    }
                }
                self.stmts(&try_stmt.body);
                for catch in &try_stmt.catches {
                    self.stmts(&catch.body);
                }
                if let Some(finally) = &try_stmt.finally {
                    self.stmts(finally);
                }
            }
            StmtKind::Return(None) | StmtKind::Break | StmtKind::Continue => {}
        }
    }

    fn expr(&mut self, expr: &'t Expr) {
        match &expr.kind {
            ExprKind::Assign { target, value } => {
                (self.visit)(Event::Bind {
                    target: BindTarget::Assigned(target),
                    value,
                });
                self.expr(target);
                self.expr(value);
            }
            ExprKind::MethodCall { receiver, args, .. } => {
                (self.visit)(Event::Call(expr));
                if let Some(receiver) = receiver {
                    self.expr(receiver);
                }
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Field { object, .. } => self.expr(object),
            ExprKind::New { args, .. } => {
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.expr(cond);
                self.expr(then_expr);
                self.expr(else_expr);
            }
            ExprKind::Cast { expr: inner, .. } | ExprKind::InstanceOf { expr: inner, .. } => {
                self.expr(inner);
            }
            ExprKind::Index { array, index } => {
                self.expr(array);
                self.expr(index);
            }
            ExprKind::Null
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::String(_)
            | ExprKind::Ident(_)
            | ExprKind::This => {}
        }
    }
}
