// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration finder: which locals of a method hold a manually created
//! resource handle.
//!
//! A local becomes a candidate when it is bound to
//! - a factory invocation: a call whose owner type is the configured factory
//!   and whose result type is the configured handle, or
//! - a bare call to a helper in the same unit that returns the handle type and
//!   itself binds its returned variable to a factory invocation (directly or
//!   through further helpers).
//!
//! Returning the variable hands ownership to the caller and drops it from the
//! set. Resources declared in a try-with-resources header are never looked at.

use std::collections::HashMap;

use indexmap::IndexMap;
use resguard_ast::decl::MethodDecl;
use resguard_ast::expr::{Expr, ExprKind};
use resguard_ast::stmt::Stmt;
use resguard_resolve::{SemanticModel, SymbolId, SymbolKind, VarOrigin};

use crate::config::ResourceConfig;
use crate::walk::{walk_body, BindTarget, Event, Resources};

/// How a candidate's handle was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Creation {
    /// Straight from the factory.
    Factory,
    /// From a helper method in the same unit that creates it.
    Helper(SymbolId),
}

/// Result of classifying one helper.
#[derive(Debug, Clone, Copy)]
struct Verdict {
    creates: bool,
    /// Shallowest helper on the path that a cycle returned to.
    cut: Option<usize>,
}

impl Verdict {
    fn settled(creates: bool) -> Self {
        Self { creates, cut: None }
    }
}

/// Manually created locals of one method, in order of first binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: IndexMap<SymbolId, Creation>,
}

impl CandidateSet {
    /// Keeps the first creation recorded for a symbol.
    fn insert(&mut self, symbol: SymbolId, creation: Creation) {
        self.entries.entry(symbol).or_insert(creation);
    }

    fn remove(&mut self, symbol: SymbolId) -> bool {
        self.entries.shift_remove(&symbol).is_some()
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.entries.contains_key(&symbol)
    }

    pub fn creation(&self, symbol: SymbolId) -> Option<Creation> {
        self.entries.get(&symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, Creation)> + '_ {
        self.entries.iter().map(|(&s, &c)| (s, c))
    }

    pub fn symbols(&self) -> Vec<SymbolId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct DeclarationFinder<'m> {
    model: &'m dyn SemanticModel,
    config: &'m ResourceConfig,
    /// Helper classifications already settled.
    helpers: HashMap<SymbolId, bool>,
}

impl<'m> DeclarationFinder<'m> {
    pub fn new(model: &'m dyn SemanticModel, config: &'m ResourceConfig) -> Self {
        Self {
            model,
            config,
            helpers: HashMap::new(),
        }
    }

    /// Candidate set for one method. Methods without a body have none.
    pub fn find(&mut self, method: &MethodDecl) -> CandidateSet {
        let mut set = CandidateSet::default();
        let Some(body) = &method.body else {
            return set;
        };

        walk_body(body, Resources::Skip, &mut |event| match event {
            Event::Bind { target, value } => {
                let Some(symbol) = self.bound_local(target) else {
                    return;
                };
                if let Some(creation) = self.creation(value) {
                    log::debug!(
                        "{}: `{}` holds a manually created handle ({:?})",
                        method.name,
                        self.name(symbol),
                        creation
                    );
                    set.insert(symbol, creation);
                }
            }
            Event::Return(value) => {
                let returned = value.as_ident().and_then(|_| self.model.reference(value.id));
                if let Some(symbol) = returned {
                    if set.remove(symbol) {
                        log::debug!("{}: `{}` is returned to the caller", method.name, self.name(symbol));
                    }
                }
            }
            Event::Call(_) => {}
        });

        set
    }

    /// Declarations in a method bound to a manually created handle.
    pub fn declarations(&mut self, method: &MethodDecl) -> Vec<SymbolId> {
        self.find(method).symbols()
    }

    /// Whether a helper method manually creates the handle it returns.
    pub fn helper_creates(&mut self, helper: SymbolId) -> bool {
        self.classify(helper, &mut Vec::new()).creates
    }

    /// The local a binding writes to, if it can become a candidate.
    fn bound_local(&self, target: BindTarget<'_>) -> Option<SymbolId> {
        let symbol = match target {
            BindTarget::Declared(var) => self.model.declaration(var.id)?,
            BindTarget::Assigned(expr) => {
                expr.as_ident()?;
                self.model.reference(expr.id)?
            }
        };
        match self.model.symbol(symbol)?.kind {
            SymbolKind::Variable { origin } if origin != VarOrigin::TryResource => Some(symbol),
            _ => None,
        }
    }

    /// How `value` creates a handle, if it manually does.
    fn creation(&mut self, value: &Expr) -> Option<Creation> {
        if self.is_factory_invocation(value) {
            return Some(Creation::Factory);
        }
        let helper = self.local_helper(value)?;
        self.helper_creates(helper).then_some(Creation::Helper(helper))
    }

    fn is_factory_invocation(&self, call: &Expr) -> bool {
        if !call.is_method_call() {
            return false;
        }
        let Some(target) = self.model.call_target(call.id) else {
            return false;
        };
        target.returns.as_deref() == Some(self.config.handle_type.as_str())
            && target.owner.as_deref() == Some(self.config.factory_type.as_str())
    }

    /// The callee of a bare `helper(..)` call that returns the handle type
    /// and has a body in this unit.
    fn local_helper(&self, call: &Expr) -> Option<SymbolId> {
        let ExprKind::MethodCall { receiver: None, .. } = &call.kind else {
            return None;
        };
        let target = self.model.call_target(call.id)?;
        if target.returns.as_deref() != Some(self.config.handle_type.as_str()) {
            return None;
        }
        let callee = target.callee?;
        self.model.method(callee)?.body.as_ref()?;
        Some(callee)
    }

    /// Classifies `helper` below the helpers on `path`.
    ///
    /// A `false` is settled once no cycle cut above `helper` contributed to
    /// it; an unsettled `false` is recomputed from the next root.
    fn classify(&mut self, helper: SymbolId, path: &mut Vec<SymbolId>) -> Verdict {
        if let Some(&known) = self.helpers.get(&helper) {
            return Verdict::settled(known);
        }
        if let Some(depth) = path.iter().position(|&h| h == helper) {
            // Mutual recursion: this path alone never reaches a factory.
            return Verdict {
                creates: false,
                cut: Some(depth),
            };
        }

        let depth = path.len();
        path.push(helper);
        let verdict = self.classify_body(helper, path);
        path.pop();

        let cut = verdict.cut.filter(|&c| c < depth);
        if verdict.creates || cut.is_none() {
            self.helpers.insert(helper, verdict.creates);
        }
        log::debug!("helper `{}` manually creates: {}", self.name(helper), verdict.creates);
        if verdict.creates {
            Verdict::settled(true)
        } else {
            Verdict { creates: false, cut }
        }
    }

    fn classify_body(&mut self, helper: SymbolId, path: &mut Vec<SymbolId>) -> Verdict {
        let model = self.model;
        let Some(body) = model.method(helper).and_then(|m| m.body.as_deref()) else {
            return Verdict::settled(false);
        };
        let Some(returned) = first_returned_variable(model, body) else {
            return Verdict::settled(false);
        };

        let mut verdict = Verdict::settled(false);
        walk_body(body, Resources::Skip, &mut |event| {
            let Event::Bind { target, value } = event else {
                return;
            };
            if verdict.creates || self.bound_local(target) != Some(returned) {
                return;
            }
            if self.is_factory_invocation(value) {
                verdict = Verdict::settled(true);
            } else if let Some(next) = self.local_helper(value) {
                let inner = self.classify(next, path);
                verdict = Verdict {
                    creates: inner.creates,
                    cut: match (verdict.cut, inner.cut) {
                        (Some(a), Some(b)) => Some(a.min(b)),
                        (a, b) => a.or(b),
                    },
                };
            }
        });
        verdict
    }

    fn name(&self, symbol: SymbolId) -> &str {
        self.model.symbol(symbol).map_or("?", |s| s.name.as_str())
    }
}

/// The variable named by the first `return <identifier>;` in source order.
fn first_returned_variable(model: &dyn SemanticModel, body: &[Stmt]) -> Option<SymbolId> {
    let mut returned = None;
    walk_body(body, Resources::Visit, &mut |event| {
        if let (None, Event::Return(value)) = (returned, event) {
            if value.as_ident().is_some() {
                returned = model.reference(value.id);
            }
        }
    });
    returned
}
