// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The name resolver implementation.

use std::collections::HashMap;

use resguard_ast::decl::{ClassDecl, CompilationUnit, MethodDecl};
use resguard_ast::expr::{Expr, ExprKind};
use resguard_ast::stmt::{Stmt, StmtKind, VarDecl};
use resguard_ast::{NodeId, Span};

use crate::error::ResolveError;
use crate::model::{CallTarget, ResolvedUnit};
use crate::scope::{ScopeKind, ScopeTree};
use crate::symbol::{SymbolId, SymbolKind, SymbolTable, VarOrigin};
use crate::types::{Signatures, TypeNames};

/// Members of a class declared in the unit.
#[derive(Debug, Default)]
struct ClassMembers {
    fqn: Option<String>,
    fields: Vec<SymbolId>,
    methods: Vec<SymbolId>,
}

pub struct Resolver<'a> {
    unit: &'a CompilationUnit,
    names: TypeNames,
    signatures: &'a Signatures,
    symbols: SymbolTable,
    scopes: ScopeTree,
    references: HashMap<NodeId, SymbolId>,
    declarations: HashMap<NodeId, SymbolId>,
    calls: HashMap<NodeId, CallTarget>,
    methods: HashMap<SymbolId, &'a MethodDecl>,
    members: HashMap<NodeId, ClassMembers>,
    errors: Vec<ResolveError>,
}

impl<'a> Resolver<'a> {
    pub fn new(unit: &'a CompilationUnit, signatures: &'a Signatures) -> Self {
        Self {
            unit,
            names: TypeNames::new(unit, signatures),
            signatures,
            symbols: SymbolTable::new(),
            scopes: ScopeTree::new(),
            references: HashMap::new(),
            declarations: HashMap::new(),
            calls: HashMap::new(),
            methods: HashMap::new(),
            members: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Resolve every identifier and call in the unit.
    pub fn resolve(unit: &'a CompilationUnit, signatures: &'a Signatures) -> ResolvedUnit<'a> {
        let mut resolver = Resolver::new(unit, signatures);
        for class in &unit.classes {
            resolver.declare_class(class);
        }
        for class in &unit.classes {
            resolver.resolve_class(class);
        }
        resolver.finish()
    }

    fn finish(self) -> ResolvedUnit<'a> {
        log::debug!(
            "resolved {} symbols, {} calls, {} problem(s)",
            self.symbols.len(),
            self.calls.len(),
            self.errors.len()
        );
        ResolvedUnit {
            unit: self.unit,
            symbols: self.symbols,
            references: self.references,
            declarations: self.declarations,
            calls: self.calls,
            methods: self.methods,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Declaration Collection
    // =========================================================================

    fn declare_class(&mut self, class: &'a ClassDecl) {
        let fqn = self.names.class_name(&class.name).map(str::to_string);
        let class_sym = self.symbols.insert(
            class.name.clone(),
            SymbolKind::Class,
            fqn.clone(),
            class.id,
            class.span,
        );
        self.declarations.insert(class.id, class_sym);

        let mut members = ClassMembers {
            fqn,
            ..ClassMembers::default()
        };

        for field in &class.fields {
            let sym = self.symbols.insert(
                field.name.clone(),
                SymbolKind::Field { class: class.id },
                self.names.qualify(&field.ty),
                field.id,
                field.span,
            );
            self.declarations.insert(field.id, sym);
            members.fields.push(sym);
        }

        for method in &class.methods {
            let ret_ty = method
                .ret_ty
                .as_deref()
                .filter(|ty| *ty != "void")
                .and_then(|ty| self.names.qualify(ty));
            let sym = self.symbols.insert(
                method.name.clone(),
                SymbolKind::Method {
                    class: class.id,
                    arity: method.params.len(),
                },
                ret_ty,
                method.id,
                method.span,
            );
            self.declarations.insert(method.id, sym);
            self.methods.insert(sym, method);
            members.methods.push(sym);
        }

        self.members.insert(class.id, members);

        for nested in &class.nested {
            self.declare_class(nested);
        }
    }

    // =========================================================================
    // Body Resolution
    // =========================================================================

    fn resolve_class(&mut self, class: &'a ClassDecl) {
        self.scopes.push(ScopeKind::Class(class.id));

        let fields: Vec<SymbolId> = self
            .members
            .get(&class.id)
            .map(|m| m.fields.clone())
            .unwrap_or_default();
        for (field, sym) in class.fields.iter().zip(fields) {
            if let Err(e) = self.scopes.define(field.name.clone(), sym, field.span) {
                self.errors.push(e);
            }
        }
        for field in &class.fields {
            if let Some(init) = &field.init {
                self.resolve_expr(init);
            }
        }

        for method in &class.methods {
            self.resolve_method(method);
        }
        for nested in &class.nested {
            self.resolve_class(nested);
        }

        self.scopes.pop();
    }

    fn resolve_method(&mut self, method: &'a MethodDecl) {
        let Some(body) = &method.body else {
            return;
        };
        let Some(&method_sym) = self.declarations.get(&method.id) else {
            return;
        };

        self.scopes.push(ScopeKind::Method(method_sym));
        for param in &method.params {
            let sym = self.symbols.insert(
                param.name.clone(),
                SymbolKind::Parameter,
                self.names.qualify(&param.ty),
                param.id,
                param.span,
            );
            self.declarations.insert(param.id, sym);
            if let Err(e) = self.scopes.define(param.name.clone(), sym, param.span) {
                self.errors.push(e);
            }
        }
        self.resolve_stmts(body);
        self.scopes.pop();
    }

    fn declare_var(&mut self, var: &VarDecl, origin: VarOrigin) {
        if let Some(init) = &var.init {
            self.resolve_expr(init);
        }
        let sym = self.symbols.insert(
            var.name.clone(),
            SymbolKind::Variable { origin },
            self.names.qualify(&var.ty),
            var.id,
            var.span,
        );
        self.declarations.insert(var.id, sym);
        if let Err(e) = self.scopes.define(var.name.clone(), sym, var.span) {
            self.errors.push(e);
        }
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_block(&mut self, stmts: &[Stmt]) {
        self.scopes.push(ScopeKind::Block);
        self.resolve_stmts(stmts);
        self.scopes.pop();
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Throw(expr) | StmtKind::Return(Some(expr)) => {
                self.resolve_expr(expr);
            }
            StmtKind::Local(var) => self.declare_var(var, VarOrigin::Local),
            StmtKind::Block(body) => self.resolve_block(body),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond);
                self.resolve_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_block(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.resolve_expr(cond);
                self.resolve_block(body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.scopes.push(ScopeKind::Block);
                self.resolve_stmts(init);
                if let Some(cond) = cond {
                    self.resolve_expr(cond);
                }
                for expr in update {
                    self.resolve_expr(expr);
                }
                self.resolve_block(body);
                self.scopes.pop();
            }
            StmtKind::ForEach { var, iter, body } => {
                self.resolve_expr(iter);
                self.scopes.push(ScopeKind::Block);
                self.declare_var(var, VarOrigin::LoopVar);
                self.resolve_block(body);
                self.scopes.pop();
            }
            StmtKind::Try(try_stmt) => {
                self.scopes.push(ScopeKind::Block);
                for resource in &try_stmt.resources {
                    self.declare_var(resource, VarOrigin::TryResource);
                }
                self.resolve_block(&try_stmt.body);
                self.scopes.pop();

                for catch in &try_stmt.catches {
                    self.scopes.push(ScopeKind::Block);
                    self.declare_var(&catch.param, VarOrigin::CatchParam);
                    self.resolve_stmts(&catch.body);
                    self.scopes.pop();
                }
                if let Some(finally) = &try_stmt.finally {
                    self.resolve_block(finally);
                }
            }
            StmtKind::Return(None) | StmtKind::Break | StmtKind::Continue => {}
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(name) => {
                if let Some(sym) = self.scopes.lookup(name) {
                    self.references.insert(expr.id, sym);
                } else if self.names.qualify(name).is_none() {
                    self.errors.push(ResolveError::undefined(name.clone(), expr.span));
                }
            }
            ExprKind::Field { object, field } => {
                self.resolve_expr(object);
                if matches!(object.kind, ExprKind::This) {
                    if let Some(sym) = self.own_field(field) {
                        self.references.insert(expr.id, sym);
                    }
                }
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                if let Some(receiver) = receiver {
                    self.resolve_expr(receiver);
                }
                for arg in args {
                    self.resolve_expr(arg);
                }
                let target = self.call_target(receiver.as_deref(), method, args.len(), expr.span);
                self.calls.insert(expr.id, target);
            }
            ExprKind::New { args, .. } => {
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Assign { target, value } => {
                self.resolve_expr(target);
                self.resolve_expr(value);
            }
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.resolve_expr(cond);
                self.resolve_expr(then_expr);
                self.resolve_expr(else_expr);
            }
            ExprKind::Cast { expr: inner, .. } | ExprKind::InstanceOf { expr: inner, .. } => {
                self.resolve_expr(inner);
            }
            ExprKind::Index { array, index } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
            }
            ExprKind::Null
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::String(_)
            | ExprKind::This => {}
        }
    }

    // =========================================================================
    // Call Typing
    // =========================================================================

    fn call_target(&mut self, receiver: Option<&Expr>, method: &str, arity: usize, span: Span) -> CallTarget {
        let implicit_this = match receiver {
            None => true,
            Some(expr) => matches!(expr.kind, ExprKind::This),
        };

        if implicit_this {
            for class in self.scopes.enclosing_classes() {
                if let Some(callee) = self.find_method(class, method, arity) {
                    return CallTarget {
                        owner: self.members.get(&class).and_then(|m| m.fqn.clone()),
                        returns: self.symbols.get(callee).and_then(|s| s.ty.clone()),
                        callee: Some(callee),
                    };
                }
            }
            log::debug!("no local method `{}` taking {} argument(s)", method, arity);
            self.errors.push(ResolveError::unknown_method(method.to_string(), arity, span));
            return CallTarget::default();
        }

        let owner = receiver.and_then(|expr| self.static_type(expr));
        let Some(owner) = owner else {
            return CallTarget::default();
        };

        let local_class = self
            .members
            .iter()
            .find(|(_, m)| m.fqn.as_deref() == Some(owner.as_str()))
            .map(|(&id, _)| id);
        if let Some(class) = local_class {
            let callee = self.find_method(class, method, arity);
            return CallTarget {
                returns: callee.and_then(|c| self.symbols.get(c)).and_then(|s| s.ty.clone()),
                owner: Some(owner),
                callee,
            };
        }

        let returns = self.signatures.returns(&owner, method).map(str::to_string);
        if returns.is_none() {
            log::debug!("no signature for `{}#{}`", owner, method);
        }
        CallTarget {
            owner: Some(owner),
            returns,
            callee: None,
        }
    }

    /// A method of `class` by name, preferring an exact arity match.
    fn find_method(&self, class: NodeId, name: &str, arity: usize) -> Option<SymbolId> {
        let members = self.members.get(&class)?;
        let named: Vec<SymbolId> = members
            .methods
            .iter()
            .copied()
            .filter(|&m| self.symbols.get(m).is_some_and(|s| s.name == name))
            .collect();
        named
            .iter()
            .copied()
            .find(|&m| {
                self.symbols
                    .get(m)
                    .is_some_and(|s| s.kind == SymbolKind::Method { class, arity })
            })
            .or_else(|| named.first().copied())
    }

    fn own_field(&self, name: &str) -> Option<SymbolId> {
        let class = *self.scopes.enclosing_classes().first()?;
        self.members
            .get(&class)?
            .fields
            .iter()
            .copied()
            .find(|&f| self.symbols.get(f).is_some_and(|s| s.name == name))
    }

    /// Static type of an already-resolved expression.
    fn static_type(&self, expr: &Expr) -> Option<String> {
        match &expr.kind {
            ExprKind::Ident(name) => match self.references.get(&expr.id) {
                Some(&sym) => self.symbols.get(sym)?.ty.clone(),
                // `Helper.create()`: a static call through a type name.
                None => self.names.qualify(name),
            },
            ExprKind::Field { .. } => {
                let sym = self.references.get(&expr.id)?;
                self.symbols.get(*sym)?.ty.clone()
            }
            ExprKind::This => {
                let class = *self.scopes.enclosing_classes().first()?;
                self.members.get(&class)?.fqn.clone()
            }
            ExprKind::MethodCall { .. } => self.calls.get(&expr.id)?.returns.clone(),
            ExprKind::New { ty, .. } | ExprKind::Cast { ty, .. } => self.names.qualify(ty),
            ExprKind::String(_) => Some("java.lang.String".to_string()),
            ExprKind::Conditional { then_expr, .. } => self.static_type(then_expr),
            ExprKind::Assign { target, .. } => self.static_type(target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SemanticModel;
    use crate::types::MethodSignature;
    use resguard_ast::build::AstBuilder;

    const RR: &str = "org.apache.sling.api.resource.ResourceResolver";
    const RRF: &str = "org.apache.sling.api.resource.ResourceResolverFactory";

    fn signatures() -> Signatures {
        vec![MethodSignature {
            owner: RRF.into(),
            method: "getResourceResolver".into(),
            returns: RR.into(),
        }]
        .into_iter()
        .collect()
    }

    fn unit_with(class: ClassDecl) -> CompilationUnit {
        CompilationUnit {
            package: Some("com.example".into()),
            imports: vec![RR.into(), RRF.into()],
            classes: vec![class],
        }
    }

    fn first_body(unit: &CompilationUnit) -> &[Stmt] {
        unit.classes[0].methods[0].body.as_deref().unwrap()
    }

    #[test]
    fn factory_call_is_typed() {
        let mut b = AstBuilder::new();
        let field = b.param("ResourceResolverFactory", "factory");
        let recv = b.ident("factory");
        let call = b.call(recv, "getResourceResolver", Vec::new());
        let local = b.local("ResourceResolver", "rr", Some(call));
        let method = b.method("run", Vec::new(), None, vec![local]);
        let unit = unit_with(b.class("Sample", vec![field], vec![method]));

        let sigs = signatures();
        let resolved = Resolver::resolve(&unit, &sigs);
        assert!(resolved.errors.is_empty(), "{:?}", resolved.errors);

        let StmtKind::Local(var) = &first_body(&unit)[0].kind else {
            panic!("expected local");
        };
        let init = var.init.as_ref().unwrap();
        let target = resolved.call_target(init.id).unwrap();
        assert_eq!(target.owner.as_deref(), Some(RRF));
        assert_eq!(target.returns.as_deref(), Some(RR));
        assert_eq!(target.callee, None);

        let sym = resolved.declaration(var.id).unwrap();
        let symbol = resolved.symbol(sym).unwrap();
        assert_eq!(symbol.kind, SymbolKind::Variable { origin: VarOrigin::Local });
        assert_eq!(symbol.ty.as_deref(), Some(RR));
    }

    #[test]
    fn bare_call_resolves_to_local_helper() {
        let mut b = AstBuilder::new();
        let helper_ret = b.ret_ident("r");
        let helper_local = b.local("ResourceResolver", "r", None);
        let helper = b.method("getRR", Vec::new(), Some("ResourceResolver"), vec![helper_local, helper_ret]);
        let call = b.bare_call("getRR", Vec::new());
        let local = b.local("ResourceResolver", "rr", Some(call));
        let run = b.method("run", Vec::new(), None, vec![local]);
        let unit = unit_with(b.class("Sample", Vec::new(), vec![run, helper]));

        let sigs = signatures();
        let resolved = Resolver::resolve(&unit, &sigs);
        let StmtKind::Local(var) = &first_body(&unit)[0].kind else {
            panic!("expected local");
        };
        let target = resolved.call_target(var.init.as_ref().unwrap().id).unwrap();
        assert_eq!(target.owner.as_deref(), Some("com.example.Sample"));
        assert_eq!(target.returns.as_deref(), Some(RR));
        let callee = target.callee.unwrap();
        assert_eq!(resolved.method(callee).unwrap().name, "getRR");
    }

    #[test]
    fn try_resources_are_marked() {
        let mut b = AstBuilder::new();
        let resource = b.var("ResourceResolver", "rr", None);
        let stmt = b.try_stmt(vec![resource], Vec::new(), Vec::new(), None);
        let method = b.method("run", Vec::new(), None, vec![stmt]);
        let unit = unit_with(b.class("Sample", Vec::new(), vec![method]));

        let sigs = signatures();
        let resolved = Resolver::resolve(&unit, &sigs);
        let StmtKind::Try(t) = &first_body(&unit)[0].kind else {
            panic!("expected try");
        };
        let sym = resolved.declaration(t.resources[0].id).unwrap();
        assert_eq!(
            resolved.symbol(sym).unwrap().kind,
            SymbolKind::Variable {
                origin: VarOrigin::TryResource
            }
        );
    }

    #[test]
    fn unknown_names_are_collected_not_fatal() {
        let mut b = AstBuilder::new();
        let recv = b.ident("missing");
        let call = b.call(recv, "close", Vec::new());
        let stmt = b.expr_stmt(call);
        let helper = b.bare_call("inherited", Vec::new());
        let stmt2 = b.expr_stmt(helper);
        let method = b.method("run", Vec::new(), None, vec![stmt, stmt2]);
        let unit = unit_with(b.class("Sample", Vec::new(), vec![method]));

        let sigs = signatures();
        let resolved = Resolver::resolve(&unit, &sigs);
        assert_eq!(resolved.errors.len(), 2);
        assert!(resolved.calls.values().all(|t| t.returns.is_none()));
    }

    #[test]
    fn this_field_is_a_reference() {
        let mut b = AstBuilder::new();
        let field = b.param("ResourceResolverFactory", "factory");
        let this = b.this();
        let access = b.field(this, "factory");
        let call = b.call(access, "getResourceResolver", Vec::new());
        let stmt = b.expr_stmt(call);
        let method = b.method("run", Vec::new(), None, vec![stmt]);
        let unit = unit_with(b.class("Sample", vec![field], vec![method]));

        let sigs = signatures();
        let resolved = Resolver::resolve(&unit, &sigs);
        let target = resolved.calls.values().next().unwrap();
        assert_eq!(target.owner.as_deref(), Some(RRF));
        assert_eq!(target.returns.as_deref(), Some(RR));
    }
}
