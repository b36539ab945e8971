// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbol resolution for the resource rules.
//!
//! Binds every identifier in a compilation unit to its declaration and types
//! every method call (owner type, result type, local callee). The rules only
//! see the results through [`SemanticModel`].

mod error;
mod model;
mod resolver;
mod scope;
mod symbol;
mod types;

pub use error::{ResolveError, ResolveErrorKind};
pub use model::{CallTarget, ResolvedUnit, SemanticModel};
pub use resolver::Resolver;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolTable, VarOrigin};
pub use types::{MethodSignature, Signatures, TypeNames};

use resguard_ast::decl::CompilationUnit;

/// Resolve one compilation unit against the host's external signatures.
pub fn resolve<'a>(unit: &'a CompilationUnit, signatures: &'a Signatures) -> ResolvedUnit<'a> {
    Resolver::resolve(unit, signatures)
}
