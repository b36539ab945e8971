// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Output types for a lint run.

use serde::{Deserialize, Serialize};

/// Complete lint report for one unit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    pub version: u32,
    pub file: String,
    pub success: bool,
    pub diagnostics: Vec<LintDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub rule: String,
    /// Key the rule was published under before the current naming scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_key: Option<String>,
    pub severity: Severity,
    pub message: String,
    /// The flagged variable.
    pub variable: String,
    pub location: LintLocation,
    pub fix: String,
}

/// Source location. `line` and `column` are 1-based, or 0 when the unit was
/// supplied without source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

/// Severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Options for a lint run.
#[derive(Debug, Clone, Default)]
pub struct LintOpts {
    /// Include rules matching these patterns (e.g., "resource/*")
    pub rules: Vec<String>,
    /// Exclude rules matching these patterns
    pub excludes: Vec<String>,
}
