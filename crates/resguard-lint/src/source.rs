// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Unit files: a parsed compilation unit plus the external method signatures
//! it calls, as handed over by a front end.

use std::path::Path;

use resguard_ast::decl::CompilationUnit;
use resguard_resolve::{MethodSignature, Signatures};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path of the original source file. Filled from the unit file's own path
    /// when empty.
    #[serde(default)]
    pub path: String,
    /// Original source text, used for line numbers and source lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub unit: CompilationUnit,
    #[serde(default)]
    pub signatures: Vec<MethodSignature>,
}

impl SourceUnit {
    pub fn from_json(text: &str, path: &str) -> Result<Self, LoadError> {
        let mut unit: SourceUnit = serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_string(),
            source,
        })?;
        if unit.path.is_empty() {
            unit.path = path.to_string();
        }
        Ok(unit)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    pub fn signatures(&self) -> Signatures {
        self.signatures.iter().cloned().collect()
    }
}
