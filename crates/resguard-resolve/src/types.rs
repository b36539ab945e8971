// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Fully-qualified type naming and external method signatures.

use std::collections::{BTreeSet, HashMap, HashSet};

use resguard_ast::decl::{ClassDecl, CompilationUnit};
use serde::{Deserialize, Serialize};

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

const JAVA_LANG: &[&str] = &[
    "AutoCloseable",
    "Boolean",
    "Exception",
    "Integer",
    "Iterable",
    "Long",
    "Object",
    "RuntimeException",
    "String",
    "Throwable",
];

/// Maps type names as written in the unit to fully-qualified names.
///
/// Single-type imports, classes declared in the unit, primitives and a
/// handful of `java.lang` types qualify. A name brought in by an on-demand
/// import (`a.b.*`) qualifies when exactly one such package holds a type the
/// [`Signatures`] know about. Same-package types from other files stay
/// unresolved.
#[derive(Debug, Default)]
pub struct TypeNames {
    known: HashMap<String, String>,
}

impl TypeNames {
    pub fn new(unit: &CompilationUnit, signatures: &Signatures) -> Self {
        let mut known = HashMap::new();

        for name in JAVA_LANG {
            known.insert(name.to_string(), format!("java.lang.{}", name));
        }
        known.extend(on_demand(unit, signatures));
        for import in &unit.imports {
            if import.ends_with(".*") {
                continue;
            }
            if let Some((_, simple)) = import.rsplit_once('.') {
                known.insert(simple.to_string(), import.clone());
            }
        }
        for class in &unit.classes {
            let prefix = unit.package.clone();
            register_class(class, prefix.as_deref(), &mut known);
        }

        Self { known }
    }

    /// Qualify a written type. Generic arguments are dropped, array suffixes
    /// are kept.
    pub fn qualify(&self, written: &str) -> Option<String> {
        let written = written.trim();
        if let Some(elem) = written.strip_suffix("[]") {
            return self.qualify(elem).map(|q| format!("{}[]", q));
        }
        let raw = match written.find('<') {
            Some(idx) => written[..idx].trim_end(),
            None => written,
        };
        if raw.is_empty() || raw == "var" {
            return None;
        }
        if PRIMITIVES.contains(&raw) {
            return Some(raw.to_string());
        }
        if let Some(fqn) = self.known.get(raw) {
            return Some(fqn.clone());
        }
        // Already qualified, or `Outer.Inner` for an imported outer type.
        match raw.split_once('.') {
            Some((head, rest)) => match self.known.get(head) {
                Some(outer) => Some(format!("{}.{}", outer, rest)),
                None => Some(raw.to_string()),
            },
            None => None,
        }
    }

    /// Fully-qualified name of a class declared in the unit.
    pub fn class_name(&self, simple: &str) -> Option<&str> {
        self.known.get(simple).map(String::as_str)
    }
}

/// Simple names imported on demand that map to exactly one known type.
fn on_demand(unit: &CompilationUnit, signatures: &Signatures) -> HashMap<String, String> {
    let packages: HashSet<&str> = unit
        .imports
        .iter()
        .filter_map(|import| import.strip_suffix(".*"))
        .collect();
    if packages.is_empty() {
        return HashMap::new();
    }

    let mut found: HashMap<String, Option<String>> = HashMap::new();
    for fqn in signatures.known_types() {
        let Some((package, simple)) = fqn.rsplit_once('.') else {
            continue;
        };
        if !packages.contains(package) {
            continue;
        }
        found
            .entry(simple.to_string())
            .and_modify(|seen| {
                if seen.as_deref() != Some(fqn) {
                    // Ambiguous between two imported packages.
                    *seen = None;
                }
            })
            .or_insert_with(|| Some(fqn.to_string()));
    }
    found
        .into_iter()
        .filter_map(|(simple, fqn)| Some((simple, fqn?)))
        .collect()
}

fn register_class(class: &ClassDecl, prefix: Option<&str>, known: &mut HashMap<String, String>) {
    let fqn = match prefix {
        Some(prefix) => format!("{}.{}", prefix, class.name),
        None => class.name.clone(),
    };
    for nested in &class.nested {
        register_class(nested, Some(&fqn), known);
    }
    known.insert(class.name.clone(), fqn);
}

/// Return type of one external method, as attributed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Fully-qualified declaring type.
    pub owner: String,
    pub method: String,
    /// Fully-qualified return type, or `void`.
    pub returns: String,
}

/// Lookup table over [`MethodSignature`]s. Overloads are not distinguished;
/// the last entry for an (owner, method) pair wins.
///
/// Every owner and non-`void` return type is also a known type, which lets
/// on-demand imports qualify it.
#[derive(Debug, Default, Clone)]
pub struct Signatures {
    returns: HashMap<(String, String), String>,
    types: BTreeSet<String>,
}

impl Signatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sig: MethodSignature) {
        self.declare_type(&sig.owner);
        if sig.returns != "void" {
            self.declare_type(&sig.returns);
        }
        self.returns.insert((sig.owner, sig.method), sig.returns);
    }

    /// Record a fully-qualified type name that no signature mentions.
    pub fn declare_type(&mut self, fqn: &str) {
        self.types.insert(fqn.to_string());
    }

    /// Fully-qualified types known to the table, sorted.
    pub fn known_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.iter().map(String::as_str)
    }

    /// Return type of `owner.method`, `None` if unknown or `void`.
    pub fn returns(&self, owner: &str, method: &str) -> Option<&str> {
        self.returns
            .get(&(owner.to_string(), method.to_string()))
            .map(String::as_str)
            .filter(|ty| *ty != "void")
    }
}

impl FromIterator<MethodSignature> for Signatures {
    fn from_iter<I: IntoIterator<Item = MethodSignature>>(iter: I) -> Self {
        let mut sigs = Signatures::new();
        for sig in iter {
            sigs.insert(sig);
        }
        sigs
    }
}
