//! Generator-wide settings that end up in every file preamble.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies the code generator and the output directives it wants.
///
/// Reads from JSON such as:
///
/// ```json
/// { "name": "protoc-gen-x", "version": "1.0.0", "parameter": "target=ts",
///   "eslint_disable": true, "ts_nocheck": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
    /// The plugin parameter from the `CodeGeneratorRequest`, empty if none.
    #[serde(default)]
    pub parameter: String,
    /// Emit `/* eslint-disable */` after the banner.
    #[serde(default)]
    pub eslint_disable: bool,
    /// Emit `/* @ts-nocheck */` after the banner.
    #[serde(default)]
    pub ts_nocheck: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read generator config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid generator config: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = parameter.into();
        self
    }

    pub fn with_eslint_disable(mut self, enabled: bool) -> Self {
        self.eslint_disable = enabled;
        self
    }

    pub fn with_ts_nocheck(mut self, enabled: bool) -> Self {
        self.ts_nocheck = enabled;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let info = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            name = %info.name,
            version = %info.version,
            "loaded generator config"
        );
        Ok(info)
    }
}
