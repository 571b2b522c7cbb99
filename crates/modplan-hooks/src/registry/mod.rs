//! Hook registry for storing callbacks
//!
//! The registry maps a [`HookKey`] to an ordered list of callbacks. It is generic
//! over the callback type `F`, usually a `dyn Fn(..) -> .. + Send + Sync`, so each
//! hook point keeps its own signature.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use modplan_hooks::{HookKey, HookPoint, HookRegistry, InMemoryHookRegistry};
//!
//! type PathFn = dyn Fn(String, &str) -> String + Send + Sync;
//!
//! let registry: InMemoryHookRegistry<PathFn> = InMemoryHookRegistry::new();
//! let key = HookKey::global(HookPoint::ModulePath);
//!
//! let id = registry.add(key.clone(), 10, Arc::new(|path: String, _name: &str| path))?;
//! assert!(registry.has_callbacks(&key)?);
//!
//! registry.remove(&id)?;
//! assert!(!registry.has_callbacks(&key)?);
//! # Ok::<(), modplan_hooks::HooksError>(())
//! ```

pub mod storage;

use std::sync::Arc;

pub use storage::InMemoryHookRegistry;

use crate::{
    error::Result,
    types::{HookId, HookKey},
};

/// Trait for managing hook callbacks
///
/// # Thread Safety
///
/// All implementations must be thread-safe (`Send + Sync`). Registration takes
/// `&self`; implementations use interior mutability.
pub trait HookRegistry<F: ?Sized>: Send + Sync {
    /// Register a callback under `key`
    ///
    /// Lower priorities run first. Callbacks with equal priority run in the
    /// order they were registered.
    ///
    /// # Returns
    ///
    /// The id of the registration, usable with [`HookRegistry::remove`]
    fn add(&self, key: HookKey, priority: i32, callback: Arc<F>) -> Result<HookId>;

    /// Remove a previously registered callback
    ///
    /// # Errors
    ///
    /// Returns an error if no callback with this id is registered
    fn remove(&self, id: &HookId) -> Result<()>;

    /// Callbacks registered for `key`, in execution order
    fn callbacks(&self, key: &HookKey) -> Result<Vec<Arc<F>>>;

    /// Whether at least one callback is registered for `key`
    fn has_callbacks(&self, key: &HookKey) -> Result<bool> {
        Ok(!self.callbacks(key)?.is_empty())
    }

    /// All keys that currently have callbacks, sorted
    fn keys(&self) -> Result<Vec<HookKey>>;
}
