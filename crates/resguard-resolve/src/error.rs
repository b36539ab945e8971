// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution error types.
//!
//! None of these stop analysis. They are collected on the resolved unit so a
//! host can see why a branch failed to match.

use resguard_ast::Span;
use thiserror::Error;

/// A name resolution problem.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    pub fn undefined(name: String, span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::UndefinedSymbol { name },
            span,
        }
    }

    pub fn unknown_method(name: String, arity: usize, span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::UnknownMethod { name, arity },
            span,
        }
    }

    pub fn duplicate(name: String, span: Span, previous: Span) -> Self {
        Self {
            kind: ResolveErrorKind::DuplicateDefinition { name, previous },
            span,
        }
    }
}

/// The kind of resolution problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("cannot find symbol `{name}`")]
    UndefinedSymbol { name: String },

    #[error("cannot find method `{name}` taking {arity} argument(s)")]
    UnknownMethod { name: String, arity: usize },

    #[error("`{name}` is already defined in this scope")]
    DuplicateDefinition { name: String, previous: Span },
}
