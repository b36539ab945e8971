// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Shared utilities for building diagnostics.

use resguard_ast::{LineMap, Span};

use crate::lifecycle::Finding;
use crate::types::{LintDiagnostic, LintLocation};

/// Location of a span's start. Without source text only the offset is known.
pub fn location(source: Option<(&str, &LineMap)>, span: Span) -> LintLocation {
    let Some((text, lines)) = source else {
        return LintLocation {
            offset: span.start,
            line: 0,
            column: 0,
            source_line: String::new(),
        };
    };
    let (line, column) = lines.line_col(span.start);
    LintLocation {
        offset: span.start,
        line,
        column,
        source_line: lines.line_text(text, line).unwrap_or("").to_string(),
    }
}

pub fn make_diagnostic(finding: Finding, source: Option<(&str, &LineMap)>) -> LintDiagnostic {
    LintDiagnostic {
        location: location(source, finding.span),
        rule: finding.rule,
        legacy_key: finding.legacy_key,
        severity: finding.severity,
        message: finding.message,
        variable: finding.variable,
        fix: finding.fix,
    }
}
