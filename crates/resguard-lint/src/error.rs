// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors at the edges of a lint run: reading configuration and unit files.
//! The analysis itself has no failure mode.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("unknown rule `{0}` in severity table")]
    UnknownRule(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{path}` is not a valid unit file: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
