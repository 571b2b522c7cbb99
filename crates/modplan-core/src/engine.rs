//! Engine facade
//!
//! Bundles hooks, the module registry and directory options, and exposes the
//! end-to-end operations: register modules, build plans and render them.

use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::{
    error::{PlanError, Result},
    hooks::Hooks,
    module_registry::ModuleRegistry,
    plan::ConstructionPlan,
    render::Renderer,
    types::ResolvedNode,
};

/// Directories the engine resolves modules and configs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Base directory for default module paths
    pub modules_dir: PathBuf,

    /// Directory config identifiers are resolved in
    pub config_dir: PathBuf,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from("modules"),
            config_dir: PathBuf::from("config"),
        }
    }
}

/// Registration, construction and rendering behind one handle
#[derive(Debug, Clone, Default)]
pub struct Engine {
    hooks: Hooks,
    registry: ModuleRegistry,
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            hooks: Hooks::new(),
            registry: ModuleRegistry::new(),
            options,
        }
    }

    pub fn with_hooks(options: EngineOptions, hooks: Hooks) -> Self {
        Self {
            hooks,
            registry: ModuleRegistry::new(),
            options,
        }
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Register a module and return the path recorded for it
    ///
    /// Without an explicit path the module lives in `<modules dir>/<name>/`, where
    /// the modules dir passes through the `DefaultModulesPath` hooks first. Either
    /// way the path passes through the `ModulePath` hooks. Once stored, the
    /// `RegisterModule` actions fire, the generic ones first.
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::DuplicateModule`] if the name is already registered
    pub fn register_module(&self, name: &str, path: Option<&str>) -> Result<String> {
        if self.registry.contains(name)? {
            return Err(PlanError::DuplicateModule(name.to_string()));
        }

        let path = match path {
            Some(path) => path.to_string(),
            None => {
                let base = self
                    .hooks
                    .apply_default_modules_path(self.options.modules_dir.clone())?;
                format!("{}/", base.join(name).display())
            }
        };
        let path = self.hooks.apply_module_path(path, name)?;

        self.registry.register(name, path.clone())?;
        self.hooks.fire_register_module(&path, name)?;

        info!(module = name, path = %path, "Registered module");
        Ok(path)
    }

    /// Registered modules in registration order
    pub fn module_list(&self) -> Result<Vec<(String, String)>> {
        self.registry.list()
    }

    pub fn plan_from_config(&self, config: Value) -> Result<ResolvedNode> {
        ConstructionPlan::from_value(config, Some(&self.registry), &self.hooks)
    }

    pub fn plan_from_config_file(&self, name: &str) -> Result<ResolvedNode> {
        ConstructionPlan::from_config_file(
            name,
            Some(&self.registry),
            &self.hooks,
            &self.options.config_dir,
        )
    }

    pub fn render(&self, plan: &ResolvedNode) -> Result<String> {
        Renderer::new(&self.hooks).render(plan)
    }

    /// Build and render a config
    pub fn html_from_config(&self, config: Value) -> Result<String> {
        let plan = self.plan_from_config(config)?;
        self.render(&plan)
    }

    /// Load, build and render a config file
    pub fn html_from_config_file(&self, name: &str) -> Result<String> {
        let plan = self.plan_from_config_file(name)?;
        self.render(&plan)
    }
}
