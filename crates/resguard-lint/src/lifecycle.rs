// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lifecycle rules over the candidates of each method.
//!
//! For every method with a body, the finder supplies the manually created
//! locals. The whole body (resource headers included) is then scanned for
//! `<local>.<release>()` calls and for release helpers taking the local as an
//! argument, and each selected rule decides from the outcome whether the local
//! gets a finding.

use std::collections::HashMap;

use resguard_ast::decl::{CompilationUnit, MethodDecl};
use resguard_ast::expr::ExprKind;
use resguard_ast::{NodeId, Span};
use resguard_resolve::{SemanticModel, Symbol, SymbolId};

use crate::config::ResourceConfig;
use crate::finder::{Creation, DeclarationFinder};
use crate::rules::Rule;
use crate::types::Severity;
use crate::walk::{walk_body, Event, Resources};

/// What happened to one candidate within its method.
#[derive(Debug, Clone, Copy)]
pub struct Outcome<'a> {
    pub symbol: &'a Symbol,
    pub creation: Creation,
    /// The first release call on the candidate, if any.
    pub release: Option<Span>,
    /// The first release helper the candidate was passed to, if any.
    pub handed_off: Option<Span>,
}

/// Release sites of one method body, keyed by the released symbol.
#[derive(Debug, Default)]
struct Releases {
    calls: HashMap<SymbolId, Span>,
    handed_off: HashMap<SymbolId, Span>,
}

/// A rule firing on one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: String,
    pub legacy_key: Option<String>,
    pub severity: Severity,
    /// Declaration the finding is reported on.
    pub anchor: NodeId,
    pub span: Span,
    pub variable: String,
    pub message: String,
    pub fix: String,
}

pub struct LifecycleEngine<'m> {
    model: &'m dyn SemanticModel,
    config: &'m ResourceConfig,
    rules: &'m [Rule],
}

impl<'m> LifecycleEngine<'m> {
    pub fn new(model: &'m dyn SemanticModel, config: &'m ResourceConfig, rules: &'m [Rule]) -> Self {
        Self { model, config, rules }
    }

    /// Findings for every method of every class, nested ones included,
    /// ordered by position and then rule key.
    pub fn check_unit(&self, unit: &CompilationUnit) -> Vec<Finding> {
        let mut finder = DeclarationFinder::new(self.model, self.config);
        let mut findings = Vec::new();

        for class in unit.all_classes() {
            for method in class.methods.iter().filter(|m| m.body.is_some()) {
                findings.extend(self.check_method(&mut finder, method));
            }
        }

        findings.sort_by(|a, b| a.span.cmp(&b.span).then_with(|| a.rule.cmp(&b.rule)));
        findings
    }

    pub fn check_method(&self, finder: &mut DeclarationFinder<'_>, method: &MethodDecl) -> Vec<Finding> {
        if self.rules.is_empty() {
            return Vec::new();
        }
        let candidates = finder.find(method);
        if candidates.is_empty() {
            return Vec::new();
        }
        let releases = self.release_calls(method);

        let handle = self.config.handle_simple_name();
        let mut findings = Vec::new();
        for (id, creation) in candidates.iter() {
            let Some(symbol) = self.model.symbol(id) else {
                continue;
            };
            let outcome = Outcome {
                symbol,
                creation,
                release: releases.calls.get(&id).copied(),
                handed_off: releases.handed_off.get(&id).copied(),
            };
            for rule in self.rules.iter().filter(|r| (r.fires)(&outcome)) {
                log::debug!("{}: `{}` fires {}", method.name, symbol.name, rule.meta.key);
                findings.push(Finding {
                    rule: rule.meta.key.clone(),
                    legacy_key: rule.meta.legacy_key.clone(),
                    severity: rule.meta.severity,
                    anchor: symbol.decl,
                    span: symbol.span,
                    variable: symbol.name.clone(),
                    message: rule.meta.render_message(handle),
                    fix: rule.meta.render_fix(handle, &symbol.name),
                });
            }
        }
        findings
    }

    /// First zero-argument release call per receiver symbol, and first
    /// release helper per identifier argument.
    fn release_calls(&self, method: &MethodDecl) -> Releases {
        let mut releases = Releases::default();
        let Some(body) = &method.body else {
            return releases;
        };

        walk_body(body, Resources::Visit, &mut |event| {
            let Event::Call(call) = event else {
                return;
            };
            let ExprKind::MethodCall {
                receiver,
                method: name,
                args,
            } = &call.kind
            else {
                return;
            };

            if args.is_empty() && self.config.is_release(name) {
                let symbol = receiver
                    .as_deref()
                    .filter(|r| r.as_ident().is_some())
                    .and_then(|r| self.model.reference(r.id));
                if let Some(symbol) = symbol {
                    releases.calls.entry(symbol).or_insert(call.span);
                }
                return;
            }
            if !self.config.is_release_helper(name) {
                return;
            }
            for arg in args.iter().filter(|a| a.as_ident().is_some()) {
                if let Some(symbol) = self.model.reference(arg.id) {
                    log::debug!("{}: `{}` handed to `{}`", method.name, self.name(symbol), name);
                    releases.handed_off.entry(symbol).or_insert(call.span);
                }
            }
        });
        releases
    }

    fn name(&self, symbol: SymbolId) -> &str {
        self.model.symbol(symbol).map_or("?", |s| s.name.as_str())
    }
}
