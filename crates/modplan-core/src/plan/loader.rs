//! Config file loader
//!
//! Resolves a config identifier to a file and decodes it. The path comes from the
//! `ConfigPath` hooks, seeded with `config_dir/<name>`. The content comes from the
//! `ConfigFileLoader` hooks; when none of them supplies a value the file is decoded
//! by extension: `.yml`/`.yaml` as YAML, anything else as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlanError, Result},
    hooks::Hooks,
};

/// Loads raw configs for the construction plan builder
pub struct ConfigLoader<'a> {
    hooks: &'a Hooks,
    config_dir: PathBuf,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(hooks: &'a Hooks, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            hooks,
            config_dir: config_dir.into(),
        }
    }

    /// File location for a config identifier
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf> {
        self.hooks.apply_config_path(self.config_dir.join(name), name)
    }

    /// Resolve and load a config
    ///
    /// # Errors
    ///
    /// - [`PlanError::FileNotFound`] if the resolved path is not a file
    /// - [`PlanError::Io`], [`PlanError::Json`] or [`PlanError::Yaml`] if the default
    ///   decoder cannot read the file
    pub fn load(&self, name: &str) -> Result<Value> {
        let path = self.resolve_path(name)?;
        if !path.is_file() {
            return Err(PlanError::FileNotFound(path));
        }

        if let Some(config) = self.hooks.apply_config_loader(&path)? {
            debug!(config = name, path = %path.display(), "Config supplied by loader hook");
            return Ok(config);
        }

        debug!(config = name, path = %path.display(), "Decoding config file");
        Self::decode(&path)
    }

    /// Default decoder
    pub fn decode(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        if is_yaml {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }
}
