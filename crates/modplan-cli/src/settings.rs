//! Settings for the modplan binary
//!
//! Loaded from an optional TOML file, then `MODPLAN_*` environment variables on
//! top (for example `MODPLAN_CONFIG_DIR=site/config`).

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use config::{Config, Environment, File, FileFormat};
use modplan_core::EngineOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

const ENV_PREFIX: &str = "MODPLAN";

/// A module to register before building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,

    /// Explicit location; the default path under the modules dir otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FromStr for ModuleEntry {
    type Err = CliError;

    /// Parses `NAME` or `NAME=PATH`
    fn from_str(s: &str) -> Result<Self> {
        let (name, path) = match s.split_once('=') {
            Some((name, path)) => (name.trim(), Some(path.trim())),
            None => (s.trim(), None),
        };

        if name.is_empty() {
            return Err(CliError::InvalidArgument {
                message: format!("module '{}' has no name", s),
            });
        }
        if path.is_some_and(str::is_empty) {
            return Err(CliError::InvalidArgument {
                message: format!("module '{}' has an empty path", name),
            });
        }

        Ok(Self {
            name: name.to_string(),
            path: path.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base directory for default module paths
    pub modules_dir: PathBuf,

    /// Directory config names are resolved in
    pub config_dir: PathBuf,

    /// Modules registered on startup, in order
    pub modules: Vec<ModuleEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from("modules"),
            config_dir: PathBuf::from("."),
            modules: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings
    ///
    /// An explicit file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        debug!(path = %path.display(), required, "Loading settings");

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// `<config dir>/modplan/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modplan")
            .join("config.toml")
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            modules_dir: self.modules_dir.clone(),
            config_dir: self.config_dir.clone(),
        }
    }

    /// Effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CliError::Output(format!("failed to serialize settings: {}", e)))
    }
}
