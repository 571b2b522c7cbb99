//! Typed hook points used by the builder, loader, renderer and engine
//!
//! Each hook point has its own callback signature and its own registry. All
//! points compose as filter pipelines, except `RegisterModule` which is an action.
//!
//! | Point | Scope | Callback |
//! |---|---|---|
//! | `DataFilter` | filter name | `(data, args) -> data` |
//! | `DynamicSubmodules` | module name | `(areas, local data, parent data) -> areas` |
//! | `ConfigPath` | global | `(default path, config name) -> path` |
//! | `ConfigFileLoader` | global | `(loaded so far, path) -> loaded` |
//! | `DefaultModulesPath` | global | `(modules dir) -> modules dir` |
//! | `ModulePath` | global | `(path, module name) -> path` |
//! | `RenderModule` | global or module name | `(markup, data) -> markup` |
//! | `RegisterModule` | global or module name | `(path, module name)` |

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use modplan_hooks::{
    apply_filters, do_action, HookId, HookKey, HookPoint, HookRegistry, HooksError,
    InMemoryHookRegistry, DEFAULT_PRIORITY,
};
use serde_json::Value;

use crate::{
    error::Result,
    types::{Areas, DataMap, RawConfigNode},
};

pub type DataFilterFn = dyn Fn(DataMap, &[Value]) -> DataMap + Send + Sync;
pub type DynamicSubmodulesFn =
    dyn Fn(Areas<RawConfigNode>, &DataMap, &DataMap) -> Areas<RawConfigNode> + Send + Sync;
pub type ConfigPathFn = dyn Fn(PathBuf, &str) -> PathBuf + Send + Sync;
pub type ConfigLoaderFn = dyn Fn(Option<Value>, &Path) -> Option<Value> + Send + Sync;
pub type DefaultModulesPathFn = dyn Fn(PathBuf) -> PathBuf + Send + Sync;
pub type ModulePathFn = dyn Fn(String, &str) -> String + Send + Sync;
pub type RenderModuleFn = dyn Fn(String, &DataMap) -> String + Send + Sync;
pub type RegisterModuleFn = dyn Fn(&str, &str) + Send + Sync;

/// All hook registries of one pipeline
///
/// Cloning is cheap and clones share registrations.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    data_filters: InMemoryHookRegistry<DataFilterFn>,
    dynamic_submodules: InMemoryHookRegistry<DynamicSubmodulesFn>,
    config_path: InMemoryHookRegistry<ConfigPathFn>,
    config_loader: InMemoryHookRegistry<ConfigLoaderFn>,
    default_modules_path: InMemoryHookRegistry<DefaultModulesPathFn>,
    module_path: InMemoryHookRegistry<ModulePathFn>,
    render_module: InMemoryHookRegistry<RenderModuleFn>,
    register_module: InMemoryHookRegistry<RegisterModuleFn>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data filter under the name used in `dataFilter`
    pub fn add_data_filter<F>(&self, filter: &str, callback: F) -> Result<HookId>
    where
        F: Fn(DataMap, &[Value]) -> DataMap + Send + Sync + 'static,
    {
        Ok(self.data_filters.add(
            HookKey::scoped(HookPoint::DataFilter, filter),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register a dynamic-submodules hook for every module called `module`
    pub fn add_dynamic_submodules<F>(&self, module: &str, callback: F) -> Result<HookId>
    where
        F: Fn(Areas<RawConfigNode>, &DataMap, &DataMap) -> Areas<RawConfigNode>
            + Send
            + Sync
            + 'static,
    {
        Ok(self.dynamic_submodules.add(
            HookKey::scoped(HookPoint::DynamicSubmodules, module),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    pub fn add_config_path<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(PathBuf, &str) -> PathBuf + Send + Sync + 'static,
    {
        Ok(self.config_path.add(
            HookKey::global(HookPoint::ConfigPath),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register a config loader
    ///
    /// A loader returns `Some` to supply the config itself, or passes through what
    /// it received. When every loader yields `None` the file is decoded by extension.
    pub fn add_config_loader<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(Option<Value>, &Path) -> Option<Value> + Send + Sync + 'static,
    {
        Ok(self.config_loader.add(
            HookKey::global(HookPoint::ConfigFileLoader),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    pub fn add_default_modules_path<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(PathBuf) -> PathBuf + Send + Sync + 'static,
    {
        Ok(self.default_modules_path.add(
            HookKey::global(HookPoint::DefaultModulesPath),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    pub fn add_module_path<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(String, &str) -> String + Send + Sync + 'static,
    {
        Ok(self.module_path.add(
            HookKey::global(HookPoint::ModulePath),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register a render hook that runs for every module
    pub fn add_render_module<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(String, &DataMap) -> String + Send + Sync + 'static,
    {
        Ok(self.render_module.add(
            HookKey::global(HookPoint::RenderModule),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register a render hook for modules called `module`
    pub fn add_render_module_for<F>(&self, module: &str, callback: F) -> Result<HookId>
    where
        F: Fn(String, &DataMap) -> String + Send + Sync + 'static,
    {
        Ok(self.render_module.add(
            HookKey::scoped(HookPoint::RenderModule, module),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register an action fired after any module is registered
    pub fn on_register_module<F>(&self, callback: F) -> Result<HookId>
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        Ok(self.register_module.add(
            HookKey::global(HookPoint::RegisterModule),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Register an action fired after `module` is registered
    pub fn on_register_module_named<F>(&self, module: &str, callback: F) -> Result<HookId>
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        Ok(self.register_module.add(
            HookKey::scoped(HookPoint::RegisterModule, module),
            DEFAULT_PRIORITY,
            Arc::new(callback),
        )?)
    }

    /// Direct access to the render registry, e.g. to register with a priority
    pub fn render_module_registry(&self) -> &InMemoryHookRegistry<RenderModuleFn> {
        &self.render_module
    }

    pub fn data_filter_registry(&self) -> &InMemoryHookRegistry<DataFilterFn> {
        &self.data_filters
    }

    pub fn dynamic_submodules_registry(&self) -> &InMemoryHookRegistry<DynamicSubmodulesFn> {
        &self.dynamic_submodules
    }

    /// Remove a registration from whichever hook point holds it
    pub fn remove(&self, id: &HookId) -> Result<()> {
        let attempts = [
            self.data_filters.remove(id),
            self.dynamic_submodules.remove(id),
            self.config_path.remove(id),
            self.config_loader.remove(id),
            self.default_modules_path.remove(id),
            self.module_path.remove(id),
            self.render_module.remove(id),
            self.register_module.remove(id),
        ];

        let mut not_found = None;
        for attempt in attempts {
            match attempt {
                Ok(()) => return Ok(()),
                Err(e @ HooksError::HookNotFound(_)) => not_found = Some(e),
                Err(e) => return Err(e.into()),
            }
        }
        Err(not_found
            .unwrap_or_else(|| HooksError::HookNotFound(id.to_string()))
            .into())
    }

    /// Every key that has at least one callback, grouped by hook point
    pub fn keys(&self) -> Result<Vec<HookKey>> {
        let mut keys = Vec::new();
        keys.extend(self.data_filters.keys()?);
        keys.extend(self.dynamic_submodules.keys()?);
        keys.extend(self.config_path.keys()?);
        keys.extend(self.config_loader.keys()?);
        keys.extend(self.default_modules_path.keys()?);
        keys.extend(self.module_path.keys()?);
        keys.extend(self.render_module.keys()?);
        keys.extend(self.register_module.keys()?);
        keys.sort();
        Ok(keys)
    }

    pub(crate) fn apply_data_filter(
        &self,
        filter: &str,
        data: DataMap,
        args: &[Value],
    ) -> Result<DataMap> {
        let key = HookKey::scoped(HookPoint::DataFilter, filter);
        Ok(apply_filters(&self.data_filters, &key, data, |cb, acc| cb(acc, args))?)
    }

    pub(crate) fn apply_dynamic_submodules(
        &self,
        module: &str,
        areas: Areas<RawConfigNode>,
        data: &DataMap,
        parent_data: &DataMap,
    ) -> Result<Areas<RawConfigNode>> {
        let key = HookKey::scoped(HookPoint::DynamicSubmodules, module);
        Ok(apply_filters(&self.dynamic_submodules, &key, areas, |cb, acc| {
            cb(acc, data, parent_data)
        })?)
    }

    pub(crate) fn apply_config_path(&self, default_path: PathBuf, name: &str) -> Result<PathBuf> {
        let key = HookKey::global(HookPoint::ConfigPath);
        Ok(apply_filters(&self.config_path, &key, default_path, |cb, acc| cb(acc, name))?)
    }

    pub(crate) fn apply_config_loader(&self, path: &Path) -> Result<Option<Value>> {
        let key = HookKey::global(HookPoint::ConfigFileLoader);
        Ok(apply_filters(&self.config_loader, &key, None, |cb, acc| cb(acc, path))?)
    }

    pub(crate) fn apply_default_modules_path(&self, modules_dir: PathBuf) -> Result<PathBuf> {
        let key = HookKey::global(HookPoint::DefaultModulesPath);
        Ok(apply_filters(&self.default_modules_path, &key, modules_dir, |cb, acc| cb(acc))?)
    }

    pub(crate) fn apply_module_path(&self, path: String, module: &str) -> Result<String> {
        let key = HookKey::global(HookPoint::ModulePath);
        Ok(apply_filters(&self.module_path, &key, path, |cb, acc| cb(acc, module))?)
    }

    /// Generic render hooks first, then the ones scoped to `module`
    pub(crate) fn apply_render_module(
        &self,
        module: &str,
        markup: String,
        data: &DataMap,
    ) -> Result<String> {
        let generic = HookKey::global(HookPoint::RenderModule);
        let markup = apply_filters(&self.render_module, &generic, markup, |cb, acc| cb(acc, data))?;

        let scoped = HookKey::scoped(HookPoint::RenderModule, module);
        Ok(apply_filters(&self.render_module, &scoped, markup, |cb, acc| cb(acc, data))?)
    }

    pub(crate) fn fire_register_module(&self, path: &str, module: &str) -> Result<usize> {
        let generic = HookKey::global(HookPoint::RegisterModule);
        let scoped = HookKey::scoped(HookPoint::RegisterModule, module);

        let fired = do_action(&self.register_module, &generic, |cb| cb(path, module))?;
        Ok(fired + do_action(&self.register_module, &scoped, |cb| cb(path, module))?)
    }
}
