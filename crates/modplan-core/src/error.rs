//! Error types for construction plans and rendering
//!
//! Every error is fatal to the `build` or `render` call that raised it. Nothing
//! in this crate catches or retries; callers decide whether to abort or fall back.
//!
//! # Examples
//!
//! ```ignore
//! match ConstructionPlan::from_value(config, Some(&registry), &hooks) {
//!     Ok(plan) => println!("{}", plan.name),
//!     Err(PlanError::UnregisteredModule(name)) => eprintln!("register {name} first"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;

use modplan_hooks::HooksError;
use thiserror::Error;

/// Errors raised while registering modules, building plans or rendering them
#[derive(Debug, Error)]
pub enum PlanError {
    /// A config node (or one of its fields) has the wrong shape
    ///
    /// The string describes the violation, e.g. `config must be a mapping, sequence given`.
    #[error("Invalid config shape: {0}")]
    ConfigShape(String),

    /// A config node has no `name` key
    #[error("No module specified: config node has no name")]
    MissingName,

    /// The module named by a config node is not in the registry
    #[error("Module {0} is not registered")]
    UnregisteredModule(String),

    /// A module with this name has already been registered
    #[error("Module {0} is already registered")]
    DuplicateModule(String),

    /// The resolved config file does not exist
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The construction plan handed to the renderer is empty or invalid
    #[error("Cannot render construction plan: {0}")]
    Render(String),

    /// Module registry storage failure
    ///
    /// Raised when the registry lock has been poisoned.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Hook registry failure
    #[error("Hook error: {0}")]
    Hooks(#[from] HooksError),

    /// IO error while reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decode error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for plan operations
pub type Result<T> = std::result::Result<T, PlanError>;
