//! Core data types for the hooks system
//!
//! Hooks are addressed by a [`HookKey`]: the extension point and, for points that
//! are specialised per module or per filter name, a scope string. Keys are compared
//! structurally, so a module called `a?name=b` can never collide with anything.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority given to callbacks registered without an explicit one
pub const DEFAULT_PRIORITY: i32 = 10;

/// Extension points of the construction and rendering pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// Computes module data; scoped by the filter name given in the config
    DataFilter,

    /// Rewrites a module's areas before its children are built; scoped by module name
    DynamicSubmodules,

    /// Resolves a config identifier to a file location
    ConfigPath,

    /// Loads a config file into an untyped value
    ConfigFileLoader,

    /// Adjusts the path recorded for a registered module
    ModulePath,

    /// Adjusts the base directory default module paths are derived from
    DefaultModulesPath,

    /// Produces markup for a module; global or scoped by module name
    RenderModule,

    /// Fired after a module has been registered; global or scoped by module name
    RegisterModule,
}

impl HookPoint {
    /// Stable identifier used in logs and listings
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPoint::DataFilter => "data_filter",
            HookPoint::DynamicSubmodules => "dynamic_submodules",
            HookPoint::ConfigPath => "config_path",
            HookPoint::ConfigFileLoader => "config_file_loader",
            HookPoint::ModulePath => "module_path",
            HookPoint::DefaultModulesPath => "default_modules_path",
            HookPoint::RenderModule => "render_module",
            HookPoint::RegisterModule => "register_module",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured hook address
///
/// # Examples
///
/// ```
/// use modplan_hooks::{HookKey, HookPoint};
///
/// let generic = HookKey::global(HookPoint::RenderModule);
/// let teaser = HookKey::scoped(HookPoint::RenderModule, "Teaser");
///
/// assert_ne!(generic, teaser);
/// assert_eq!(teaser.to_string(), "render_module?name=Teaser");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookKey {
    /// Extension point
    pub point: HookPoint,

    /// Optional discriminant, e.g. a module or filter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl HookKey {
    /// Key that applies regardless of module
    pub fn global(point: HookPoint) -> Self {
        Self { point, scope: None }
    }

    /// Key specialised by a discriminant
    pub fn scoped(point: HookPoint, scope: impl Into<String>) -> Self {
        Self {
            point,
            scope: Some(scope.into()),
        }
    }
}

impl fmt::Display for HookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}?name={}", self.point, scope),
            None => write!(f, "{}", self.point),
        }
    }
}

/// Handle returned when a callback is registered, used to remove it again
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookId(String);

impl HookId {
    /// Generate a fresh unique id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
