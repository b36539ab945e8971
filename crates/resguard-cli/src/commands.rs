// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `check` and `rules` subcommands.

use std::path::{Path, PathBuf};

use colored::Colorize;
use resguard_lint::rules;
use resguard_lint::{LintConfig, LintDiagnostic, LintOpts, LintReport, Severity, SourceUnit};

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Load the config file, or fall back to the Sling defaults.
pub fn load_config(path: Option<&Path>) -> Result<LintConfig, resguard_lint::ConfigError> {
    match path {
        Some(path) => {
            let config = LintConfig::load(path)?;
            log::info!("using config {}", path.display());
            Ok(config)
        }
        None => Ok(LintConfig::default()),
    }
}

/// Check every unit file. Returns `true` when nothing failed: no file failed
/// to load and no finding has error severity.
pub fn cmd_check(files: &[PathBuf], config: &LintConfig, opts: &LintOpts, format: Format) -> bool {
    let mut failed = false;
    let mut totals = [0usize; 3];

    for file in files {
        let unit = match SourceUnit::load(file) {
            Ok(unit) => unit,
            Err(e) => {
                eprintln!("{}: {}", output::error_label(), e);
                failed = true;
                continue;
            }
        };

        let report = resguard_lint::lint_unit(&unit, config, opts);
        log::debug!("{}: {} finding(s)", report.file, report.diagnostics.len());
        failed |= !report.success;
        totals[0] += report.error_count;
        totals[1] += report.warning_count;
        totals[2] += report.info_count;

        match format {
            Format::Text => print_report(&report),
            Format::Json => println!("{}", resguard_lint::lint_json(&report)),
        }
    }

    if format == Format::Text {
        let [errors, warnings, infos] = totals;
        if errors + warnings + infos == 0 {
            println!("{} No resource issues found", output::status_pass());
        } else {
            let status = if errors > 0 { output::status_fail() } else { output::status_pass() };
            eprintln!(
                "{} {} error(s), {} warning(s), {} info",
                status, errors, warnings, infos
            );
        }
    }

    !failed
}

fn print_report(report: &LintReport) {
    for d in &report.diagnostics {
        print_diagnostic(&report.file, d);
    }
}

fn print_diagnostic(file: &str, d: &LintDiagnostic) {
    eprintln!(
        "{}[{}]: {}",
        output::severity(d.severity),
        output::rule_key(&d.rule),
        d.message
    );
    if d.location.line == 0 {
        eprintln!("  {} {} @{}", output::arrow(), output::file_path(file), d.location.offset);
    } else {
        eprintln!(
            "  {} {}:{}:{}",
            output::arrow(),
            output::file_path(file),
            d.location.line,
            d.location.column
        );
        eprintln!("    {}", output::pipe());
        eprintln!(
            "{} {} {}",
            output::line_number(d.location.line),
            output::pipe(),
            d.location.source_line
        );
        eprintln!("    {}", output::pipe());
    }
    eprintln!("    = {}: {}", output::fix_label(), d.fix);
    eprintln!();
}

/// List registered rules with the severity they would run at.
pub fn cmd_rules(config: &LintConfig) {
    let handle = config.resource.handle_simple_name();
    let selected = rules::configured_rules(config, &LintOpts::default());

    for rule in rules::all_rules() {
        let active = selected.iter().find(|r| r.meta.key == rule.meta.key);
        let severity = active.map_or(rule.meta.severity, |r| r.meta.severity);
        let legacy = rule.meta.legacy_key.as_deref().unwrap_or("-");
        println!(
            "{} {:<5} {:<8} {}",
            format!("{:<28}", rule.meta.key).bold(),
            legacy,
            severity_name(severity, active.is_some()),
            rule.meta.render_title(handle)
        );
        if !rule.meta.tags.is_empty() {
            println!("{:<28} {}", "", format!("tags: {}", rule.meta.tags.join(", ")).dimmed());
        }
    }
}

fn severity_name(severity: Severity, active: bool) -> String {
    if active {
        severity.to_string()
    } else {
        "off".to_string()
    }
}
