//! Construction plan builder
//!
//! Turns a raw config tree into a [`ResolvedNode`] tree. For every node, in
//! depth-first order:
//!
//! 1. look the module up in the registry (when one is given) and record its path
//! 2. compute data: the `dataFilter` hook output over an empty map, then
//!    `customData` merged on top (custom keys win)
//! 3. hand the areas to the module's dynamic-submodules hook together with the local
//!    data and the parent data; its result replaces the areas wholesale
//! 4. build every child, passing down this node's data, or the data this node
//!    received when its own data is empty
//! 5. drop `areas` unless some area holds a module
//!
//! Any error aborts the whole build.

pub mod loader;

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

pub use loader::ConfigLoader;

use crate::{
    error::Result,
    hooks::Hooks,
    module_registry::ModuleRegistry,
    types::{Areas, DataMap, RawConfigNode, ResolvedNode},
};

/// Builds construction plans
///
/// Passing `None` as registry builds without path resolution; any module name is
/// then accepted and resolved nodes carry no `path`.
pub struct ConstructionPlan;

impl ConstructionPlan {
    /// Build a plan from an untyped config value
    ///
    /// # Errors
    ///
    /// - [`PlanError::ConfigShape`](crate::PlanError::ConfigShape) if a node is not a mapping
    ///   or a field has the wrong type
    /// - [`PlanError::MissingName`](crate::PlanError::MissingName) if a node has no name
    /// - [`PlanError::UnregisteredModule`](crate::PlanError::UnregisteredModule) if a
    ///   registry is given and a module is missing from it
    pub fn from_value(
        config: Value,
        registry: Option<&ModuleRegistry>,
        hooks: &Hooks,
    ) -> Result<ResolvedNode> {
        let root = RawConfigNode::try_from(config)?;
        Self::build(root, registry, hooks)
    }

    /// Build a plan from a parsed config tree
    pub fn build(
        root: RawConfigNode,
        registry: Option<&ModuleRegistry>,
        hooks: &Hooks,
    ) -> Result<ResolvedNode> {
        Self::build_with_parent_data(root, registry, hooks, &DataMap::new())
    }

    /// Build a subtree as if it sat below a module with `parent_data`
    ///
    /// The root's dynamic-submodules hooks receive `parent_data`, and so do its
    /// descendants' hooks for as long as no module on the way has data of its own.
    pub fn build_with_parent_data(
        root: RawConfigNode,
        registry: Option<&ModuleRegistry>,
        hooks: &Hooks,
        parent_data: &DataMap,
    ) -> Result<ResolvedNode> {
        let plan = Self::build_node(root, registry, hooks, parent_data)?;
        debug!(module = %plan.name, nodes = plan.node_count(), "Built construction plan");
        Ok(plan)
    }

    /// Load a config by name from `config_dir` and build it
    pub fn from_config_file(
        name: &str,
        registry: Option<&ModuleRegistry>,
        hooks: &Hooks,
        config_dir: &Path,
    ) -> Result<ResolvedNode> {
        let config = ConfigLoader::new(hooks, config_dir).load(name)?;
        Self::from_value(config, registry, hooks)
    }

    #[instrument(level = "trace", skip_all, fields(module = %node.name))]
    fn build_node(
        node: RawConfigNode,
        registry: Option<&ModuleRegistry>,
        hooks: &Hooks,
        parent_data: &DataMap,
    ) -> Result<ResolvedNode> {
        let RawConfigNode {
            name,
            data_filter,
            data_filter_args,
            custom_data,
            areas,
        } = node;

        let path = registry.map(|r| r.lookup(&name)).transpose()?;

        let mut data = DataMap::new();
        if let Some(filter) = data_filter.as_deref() {
            data = hooks.apply_data_filter(filter, data, &data_filter_args)?;
        }
        if let Some(custom_data) = custom_data {
            for (key, value) in custom_data {
                data.insert(key, value);
            }
        }

        let areas = hooks.apply_dynamic_submodules(&name, areas, &data, parent_data)?;

        // Modules without data pass their inherited data through to descendants.
        let inherited = if data.is_empty() { parent_data } else { &data };

        let mut resolved = Areas::new();
        for (area, modules) in areas {
            let children = modules
                .into_iter()
                .map(|child| Self::build_node(child, registry, hooks, inherited))
                .collect::<Result<Vec<_>>>()?;
            resolved.insert(area, children);
        }

        debug!(
            module = %name,
            areas = resolved.len(),
            children = resolved.module_count(),
            "Resolved module"
        );

        Ok(ResolvedNode {
            name,
            path,
            data,
            areas: resolved.has_modules().then_some(resolved),
        })
    }
}
