//! Filter pipelines and actions
//!
//! [`apply_filters`] threads a value through every callback registered for a key.
//! [`do_action`] calls every callback and discards results. Both look the
//! callbacks up once, so callbacks may register further hooks without deadlocking.

use tracing::trace;

use crate::{error::Result, registry::HookRegistry, types::HookKey};

/// Fold `initial` through the callbacks registered for `key`
///
/// `call` adapts one callback to the pipeline: it receives the callback and the
/// accumulated value and returns the next value. With no callbacks `initial` is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use modplan_hooks::{apply_filters, HookKey, HookPoint, HookRegistry, InMemoryHookRegistry};
///
/// type CountFn = dyn Fn(u32, u32) -> u32 + Send + Sync;
///
/// let registry: InMemoryHookRegistry<CountFn> = InMemoryHookRegistry::new();
/// let key = HookKey::global(HookPoint::ModulePath);
/// registry.add(key.clone(), 10, Arc::new(|acc: u32, step: u32| acc + step))?;
/// registry.add(key.clone(), 10, Arc::new(|acc: u32, step: u32| acc * step))?;
///
/// assert_eq!(apply_filters(&registry, &key, 1, |cb, acc| cb(acc, 3))?, 12);
/// # Ok::<(), modplan_hooks::HooksError>(())
/// ```
pub fn apply_filters<F, T, R, C>(registry: &R, key: &HookKey, initial: T, mut call: C) -> Result<T>
where
    F: ?Sized,
    R: HookRegistry<F> + ?Sized,
    C: FnMut(&F, T) -> T,
{
    let callbacks = registry.callbacks(key)?;
    trace!(hook = %key, callbacks = callbacks.len(), "Applying filters");

    Ok(callbacks
        .iter()
        .fold(initial, |acc, callback| call(callback.as_ref(), acc)))
}

/// Invoke every callback registered for `key`
///
/// # Returns
///
/// The number of callbacks that ran
pub fn do_action<F, R, C>(registry: &R, key: &HookKey, mut call: C) -> Result<usize>
where
    F: ?Sized,
    R: HookRegistry<F> + ?Sized,
    C: FnMut(&F),
{
    let callbacks = registry.callbacks(key)?;
    trace!(hook = %key, callbacks = callbacks.len(), "Firing action");

    for callback in &callbacks {
        call(callback.as_ref());
    }
    Ok(callbacks.len())
}
