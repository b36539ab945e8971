// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rule registry and selection.

use crate::config::LintConfig;
use crate::lifecycle::Outcome;
use crate::types::{LintOpts, Severity};

pub const TRY_WITH_RESOURCES: &str = "resource/try-with-resources";
pub const UNCLOSED: &str = "resource/unclosed";

/// Static description of a rule, as surfaced to a host registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub key: String,
    pub legacy_key: Option<String>,
    pub title: String,
    pub severity: Severity,
    pub tags: Vec<String>,
    /// `{handle}` is replaced by the handle type's simple name, here and in
    /// `title`.
    pub message: String,
    /// `{var}` and `{handle}` are replaced.
    pub fix: String,
}

impl RuleMeta {
    pub fn render_title(&self, handle: &str) -> String {
        self.title.replace("{handle}", handle)
    }

    pub fn render_message(&self, handle: &str) -> String {
        self.message.replace("{handle}", handle)
    }

    pub fn render_fix(&self, handle: &str, var: &str) -> String {
        self.fix.replace("{handle}", handle).replace("{var}", var)
    }
}

/// A lifecycle rule: metadata plus the condition that fires it for one
/// candidate.
#[derive(Debug, Clone)]
pub struct Rule {
    pub meta: RuleMeta,
    pub fires: fn(&Outcome) -> bool,
}

fn closed_explicitly(outcome: &Outcome) -> bool {
    outcome.release.is_some()
}

/// Neither released in place nor handed to a release helper.
fn never_closed(outcome: &Outcome) -> bool {
    outcome.release.is_none() && outcome.handed_off.is_none()
}

/// All registered rules with their default metadata.
pub fn all_rules() -> Vec<Rule> {
    vec![
        Rule {
            meta: RuleMeta {
                key: TRY_WITH_RESOURCES.to_string(),
                legacy_key: Some("AEM-5".to_string()),
                title: "{handle} can be closed using try-with-resources".to_string(),
                severity: Severity::Info,
                tags: vec!["java7".to_string()],
                message: "{handle} can be closed using try-with-resources Java 7 feature.".to_string(),
                fix: "declare `{var}` in the resource list: `try ({handle} {var} = ...) { ... }`"
                    .to_string(),
            },
            fires: closed_explicitly,
        },
        Rule {
            meta: RuleMeta {
                key: UNCLOSED.to_string(),
                legacy_key: Some("AEM-3".to_string()),
                title: "Manually created {handle} should be closed".to_string(),
                severity: Severity::Warning,
                tags: vec!["bug".to_string(), "leak".to_string()],
                message: "{handle} should be closed in finally block or with try-with-resources."
                    .to_string(),
                fix: "call `{var}.close()` in a finally block, or declare it in a try-with-resources header"
                    .to_string(),
            },
            fires: never_closed,
        },
    ]
}

/// Keys of every registered rule.
pub fn rule_keys() -> Vec<&'static str> {
    vec![TRY_WITH_RESOURCES, UNCLOSED]
}

/// Rules selected by the command line and the config file, with severity
/// overrides applied.
pub fn configured_rules(config: &LintConfig, opts: &LintOpts) -> Vec<Rule> {
    let merged = LintOpts {
        rules: opts.rules.iter().chain(&config.rules).cloned().collect(),
        excludes: opts.excludes.iter().chain(&config.exclude).cloned().collect(),
    };

    all_rules()
        .into_iter()
        .filter(|rule| should_run(&rule.meta.key, &merged))
        .map(|mut rule| {
            if let Some(&severity) = config.severity.get(&rule.meta.key) {
                rule.meta.severity = severity;
            }
            rule
        })
        .collect()
}

/// Check if a rule should run based on include/exclude filters.
fn should_run(rule_id: &str, opts: &LintOpts) -> bool {
    // Exclude takes priority
    if opts.excludes.iter().any(|p| matches_rule(rule_id, p)) {
        return false;
    }

    // If no include filters, run all
    opts.rules.is_empty() || opts.rules.iter().any(|p| matches_rule(rule_id, p))
}

/// Match a rule ID against a glob pattern.
/// Supports: exact match, "*", and "category/*" for all rules in a category.
fn matches_rule(rule_id: &str, pattern: &str) -> bool {
    if pattern == rule_id || pattern == "*" {
        return true;
    }

    // "resource/*" matches "resource/unclosed", etc.
    match (pattern.strip_suffix("/*"), rule_id.split_once('/')) {
        (Some(prefix), Some((category, _))) => category == prefix,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.meta.key.as_str()).collect()
    }

    #[test]
    fn registry_matches_keys() {
        assert_eq!(keys(&all_rules()), rule_keys());
    }

    #[test]
    fn empty_filters_run_everything() {
        let rules = configured_rules(&LintConfig::default(), &LintOpts::default());
        assert_eq!(keys(&rules), vec![TRY_WITH_RESOURCES, UNCLOSED]);
    }

    #[test]
    fn category_include_and_exact_exclude() {
        let opts = LintOpts {
            rules: vec!["resource/*".into()],
            excludes: vec![UNCLOSED.into()],
        };
        let rules = configured_rules(&LintConfig::default(), &opts);
        assert_eq!(keys(&rules), vec![TRY_WITH_RESOURCES]);
    }

    #[test]
    fn include_from_other_category_runs_nothing() {
        let opts = LintOpts {
            rules: vec!["naming/*".into()],
            excludes: Vec::new(),
        };
        assert!(configured_rules(&LintConfig::default(), &opts).is_empty());
    }

    #[test]
    fn config_filters_merge_with_opts() {
        let config = LintConfig {
            exclude: vec![TRY_WITH_RESOURCES.into()],
            ..LintConfig::default()
        };
        let rules = configured_rules(&config, &LintOpts::default());
        assert_eq!(keys(&rules), vec![UNCLOSED]);
    }

    #[test]
    fn severity_override() {
        let mut config = LintConfig::default();
        config.severity.insert(TRY_WITH_RESOURCES.into(), Severity::Error);
        let rules = configured_rules(&config, &LintOpts::default());
        assert_eq!(rules[0].meta.severity, Severity::Error);
        assert_eq!(rules[1].meta.severity, Severity::Warning);
    }

    #[test]
    fn messages_render() {
        let rule = &all_rules()[0];
        assert_eq!(
            rule.meta.render_message("ResourceResolver"),
            "ResourceResolver can be closed using try-with-resources Java 7 feature."
        );
        assert_eq!(
            rule.meta.render_fix("ResourceResolver", "rr"),
            "declare `rr` in the resource list: `try (ResourceResolver rr = ...) { ... }`"
        );
    }
}
