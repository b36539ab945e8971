// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use crate::stmt::{Stmt, VarDecl};
use crate::{NodeId, Span};

/// One source file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompilationUnit {
    /// Package name, e.g. `com.example.core`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub package: Option<String>,
    /// Single-type and on-demand imports as written, e.g.
    /// `org.apache.sling.api.resource.ResourceResolver` or `java.util.*`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub imports: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: Vec<ClassDecl>,
}

/// A class, interface or enum body. Only members matter to the analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    pub id: NodeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<VarDecl>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub methods: Vec<MethodDecl>,
    /// Member classes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nested: Vec<ClassDecl>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// A method or constructor.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub id: NodeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<VarDecl>,
    /// Return type as written; `None` for `void` and constructors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ret_ty: Option<String>,
    /// `None` for abstract and interface methods.
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: Option<Vec<Stmt>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl CompilationUnit {
    /// Every class in the unit, outer classes before their members.
    pub fn all_classes(&self) -> Vec<&ClassDecl> {
        let mut out = Vec::new();
        for class in &self.classes {
            collect_classes(class, &mut out);
        }
        out
    }
}

fn collect_classes<'a>(class: &'a ClassDecl, out: &mut Vec<&'a ClassDecl>) {
    out.push(class);
    for nested in &class.nested {
        collect_classes(nested, out);
    }
}
