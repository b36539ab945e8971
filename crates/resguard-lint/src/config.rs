// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lint configuration.
//!
//! Everything has a default matching Apache Sling, so an empty file (or no
//! file at all) is valid:
//!
//! ```toml
//! rules = ["resource/*"]
//! exclude = ["resource/unclosed"]
//!
//! [resource]
//! handle-type = "org.apache.sling.api.resource.ResourceResolver"
//! factory-type = "org.apache.sling.api.resource.ResourceResolverFactory"
//! release-methods = ["close"]
//! release-helpers = ["closeQuietly"]
//!
//! [severity]
//! "resource/try-with-resources" = "warning"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules;
use crate::types::Severity;

pub const SLING_RESOURCE_RESOLVER: &str = "org.apache.sling.api.resource.ResourceResolver";
pub const SLING_RESOURCE_RESOLVER_FACTORY: &str = "org.apache.sling.api.resource.ResourceResolverFactory";

/// Which types are tracked, and which calls release them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResourceConfig {
    /// Fully-qualified name of the resource handle type.
    pub handle_type: String,
    /// Fully-qualified name of the type that manually creates handles.
    pub factory_type: String,
    /// Zero-argument methods that release a handle.
    pub release_methods: Vec<String>,
    /// Calls that release a handle passed to them as an argument, such as
    /// `IOUtils.closeQuietly(rr)`. Release methods count as well.
    pub release_helpers: Vec<String>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            handle_type: SLING_RESOURCE_RESOLVER.to_string(),
            factory_type: SLING_RESOURCE_RESOLVER_FACTORY.to_string(),
            release_methods: vec!["close".to_string()],
            release_helpers: vec!["closeQuietly".to_string()],
        }
    }
}

impl ResourceConfig {
    /// `ResourceResolver` for `org.apache.sling.api.resource.ResourceResolver`.
    pub fn handle_simple_name(&self) -> &str {
        self.handle_type.rsplit('.').next().unwrap_or(&self.handle_type)
    }

    pub fn is_release(&self, method: &str) -> bool {
        self.release_methods.iter().any(|m| m == method)
    }

    pub fn is_release_helper(&self, method: &str) -> bool {
        self.is_release(method) || self.release_helpers.iter().any(|m| m == method)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LintConfig {
    pub resource: ResourceConfig,
    /// Include patterns, merged with the command line.
    pub rules: Vec<String>,
    /// Exclude patterns, merged with the command line.
    pub exclude: Vec<String>,
    /// Per-rule severity overrides.
    pub severity: BTreeMap<String, Severity>,
}

impl LintConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LintConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.resource.handle_type.trim().is_empty() {
            return Err(ConfigError::Empty("resource.handle-type"));
        }
        if self.resource.factory_type.trim().is_empty() {
            return Err(ConfigError::Empty("resource.factory-type"));
        }
        if self.resource.release_methods.is_empty() {
            return Err(ConfigError::Empty("resource.release-methods"));
        }
        let known = rules::rule_keys();
        for key in self.severity.keys() {
            if !known.contains(&key.as_str()) {
                return Err(ConfigError::UnknownRule(key.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_sling() {
        let config = LintConfig::from_toml_str("").unwrap();
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.resource.handle_simple_name(), "ResourceResolver");
        assert!(config.resource.is_release("close"));
        assert!(!config.resource.is_release("logout"));
        assert!(config.resource.is_release_helper("closeQuietly"));
        assert!(!config.resource.is_release("closeQuietly"));
    }

    #[test]
    fn release_helpers_are_configurable() {
        let text = r#"
            [resource]
            release-methods = ["logout"]
            release-helpers = ["dispose"]
        "#;
        let config = LintConfig::from_toml_str(text).unwrap();
        assert!(config.resource.is_release_helper("dispose"));
        assert!(config.resource.is_release_helper("logout"));
        assert!(!config.resource.is_release_helper("closeQuietly"));

        let config = LintConfig::from_toml_str("[resource]\nrelease-helpers = []\n").unwrap();
        assert!(config.resource.release_helpers.is_empty());
        assert!(config.resource.is_release_helper("close"));
    }

    #[test]
    fn overrides_types_and_severity() {
        let text = r#"
            exclude = ["resource/unclosed"]

            [resource]
            handle-type = "com.acme.Session"
            factory-type = "com.acme.Repository"
            release-methods = ["logout", "close"]

            [severity]
            "resource/try-with-resources" = "error"
        "#;
        let config = LintConfig::from_toml_str(text).unwrap();
        assert_eq!(config.resource.handle_type, "com.acme.Session");
        assert_eq!(config.resource.handle_simple_name(), "Session");
        assert!(config.resource.is_release("logout"));
        assert_eq!(config.exclude, vec!["resource/unclosed".to_string()]);
        assert_eq!(
            config.severity.get("resource/try-with-resources"),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn rejects_unknown_rule_and_empty_type() {
        let err = LintConfig::from_toml_str("[severity]\n\"naming/foo\" = \"error\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule(ref k) if k == "naming/foo"));

        let err = LintConfig::from_toml_str("[resource]\nhandle-type = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Empty("resource.handle-type")));

        let err = LintConfig::from_toml_str("rules = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[resource]\nrelease-methods = [\"release\"]").unwrap();
        let config = LintConfig::load(file.path()).unwrap();
        assert_eq!(config.resource.release_methods, vec!["release".to_string()]);
        assert_eq!(config.resource.handle_type, SLING_RESOURCE_RESOLVER);

        let missing = LintConfig::load(Path::new("/nonexistent/resguard.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
