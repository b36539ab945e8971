// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `resguard check`: resource lifecycle rules for `ResourceResolver`-style
//! handles.

pub mod config;
pub mod error;
pub mod finder;
pub mod lifecycle;
pub mod rules;
pub mod source;
pub mod types;
mod util;
mod walk;

pub use config::{LintConfig, ResourceConfig};
pub use error::{ConfigError, LoadError};
pub use source::SourceUnit;
pub use types::{LintDiagnostic, LintLocation, LintOpts, LintReport, Severity};

use resguard_ast::LineMap;

use crate::lifecycle::LifecycleEngine;

/// Resolve a unit and run the selected lint rules over it.
pub fn lint_unit(source: &SourceUnit, config: &LintConfig, opts: &LintOpts) -> LintReport {
    let mut signatures = source.signatures();
    signatures.declare_type(&config.resource.handle_type);
    signatures.declare_type(&config.resource.factory_type);
    let resolved = resguard_resolve::resolve(&source.unit, &signatures);
    for error in &resolved.errors {
        log::debug!("{}: {} at {:?}", source.path, error, error.span);
    }

    let rules = rules::configured_rules(config, opts);
    let engine = LifecycleEngine::new(&resolved, &config.resource, &rules);
    let findings = engine.check_unit(&source.unit);

    let lines = source.source.as_deref().map(|text| (text, LineMap::new(text)));
    let diagnostics: Vec<LintDiagnostic> = findings
        .into_iter()
        .map(|f| util::make_diagnostic(f, lines.as_ref().map(|(text, map)| (*text, map))))
        .collect();

    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let error_count = count(Severity::Error);
    let warning_count = count(Severity::Warning);
    let info_count = count(Severity::Info);

    LintReport {
        version: 1,
        file: source.path.clone(),
        success: error_count == 0,
        diagnostics,
        error_count,
        warning_count,
        info_count,
    }
}

/// Serialize a lint report to JSON.
pub fn lint_json(report: &LintReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
