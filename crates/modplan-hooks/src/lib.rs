//! Modplan Hooks
//!
//! Typed extension points for the construction and rendering pipeline.
//!
//! # Overview
//!
//! A hook is a callback stored under a structured [`HookKey`]: a [`HookPoint`]
//! naming the extension point plus an optional scope, usually a module name.
//! Two kinds of invocation exist:
//!
//! - **Filters** fold a value through every callback registered for a key. Each
//!   callback receives the previous callback's result; with no callbacks the
//!   initial value comes back unchanged.
//! - **Actions** call every callback for its side effects.
//!
//! Callbacks for one key run in ascending priority order, ties in registration
//! order. [`DEFAULT_PRIORITY`] is used when callers do not care.
//!
//! # Architecture
//!
//! 1. **Types** (`types`): hook points, keys and ids
//! 2. **Hook Registry** (`registry`): stores callbacks per key
//! 3. **Dispatcher** (`dispatcher`): runs filter pipelines and actions
//!
//! The registry is generic over the callback type, so every hook point gets its
//! own signature instead of a loosely typed argument list.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use modplan_hooks::{
//!     apply_filters, HookKey, HookPoint, HookRegistry, InMemoryHookRegistry, DEFAULT_PRIORITY,
//! };
//!
//! type RenderFn = dyn Fn(String, &str) -> String + Send + Sync;
//!
//! let registry: InMemoryHookRegistry<RenderFn> = InMemoryHookRegistry::new();
//! let key = HookKey::scoped(HookPoint::RenderModule, "Teaser");
//!
//! registry.add(
//!     key.clone(),
//!     DEFAULT_PRIORITY,
//!     Arc::new(|markup: String, suffix: &str| format!("{markup}{suffix}")),
//! )?;
//!
//! let markup = apply_filters(&registry, &key, String::from("<p>"), |cb, acc| cb(acc, "</p>"))?;
//! assert_eq!(markup, "<p></p>");
//! # Ok::<(), modplan_hooks::HooksError>(())
//! ```
//!
//! # Thread Safety
//!
//! Registries are `Send + Sync` and cheap to clone; clones share storage.

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod types;

pub use dispatcher::{apply_filters, do_action};
pub use error::{HooksError, Result};
pub use registry::{HookRegistry, InMemoryHookRegistry};
pub use types::{HookId, HookKey, HookPoint, DEFAULT_PRIORITY};
