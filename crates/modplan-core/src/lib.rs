//! Modplan Core
//!
//! Builds construction plans from declarative module configs and renders them.
//!
//! # Overview
//!
//! A config is a tree of module nodes. Each node names a module and may carry a
//! data filter, custom data and named areas holding child nodes. Work happens in
//! two phases:
//!
//! 1. **Construction** ([`ConstructionPlan`]): every node is resolved against the
//!    [`ModuleRegistry`], its data is computed from hooks and custom data, and its
//!    areas may be rewritten by dynamic-submodule hooks. The result is a tree of
//!    [`ResolvedNode`]s.
//! 2. **Rendering** ([`Renderer`]): the resolved tree is walked depth-first and
//!    turned into markup, either by render hooks or by the built-in template.
//!
//! [`Engine`] ties both phases together with module registration and config file
//! loading.
//!
//! # Quick Start
//!
//! ```
//! use modplan_core::{Engine, EngineOptions};
//! use serde_json::json;
//!
//! let engine = Engine::new(EngineOptions::default());
//! engine.register_module("Teaser", None)?;
//!
//! let html = engine.html_from_config(json!({
//!     "name": "Teaser",
//!     "customData": { "headline": "Hello" }
//! }))?;
//! assert_eq!(html, "<div>Teaser Hello</div>\n");
//! # Ok::<(), modplan_core::PlanError>(())
//! ```

pub mod engine;
pub mod error;
pub mod hooks;
pub mod module_registry;
pub mod plan;
pub mod render;
pub mod types;

pub use engine::{Engine, EngineOptions};
pub use error::{PlanError, Result};
pub use hooks::{
    ConfigLoaderFn, ConfigPathFn, DataFilterFn, DefaultModulesPathFn, DynamicSubmodulesFn, Hooks,
    ModulePathFn, RegisterModuleFn, RenderModuleFn,
};
pub use module_registry::ModuleRegistry;
pub use plan::{ConfigLoader, ConstructionPlan};
pub use render::Renderer;
pub use types::{Areas, DataMap, RawConfigNode, ResolvedNode};
