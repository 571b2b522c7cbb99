//! In-memory hook storage implementation

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use tracing::debug;

use crate::{
    error::{HooksError, Result},
    types::{HookId, HookKey},
};

struct Registration<F: ?Sized> {
    id: HookId,
    priority: i32,
    callback: Arc<F>,
}

struct Table<F: ?Sized> {
    by_key: HashMap<HookKey, Vec<Registration<F>>>,
    owners: HashMap<HookId, HookKey>,
}

impl<F: ?Sized> Default for Table<F> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
            owners: HashMap::new(),
        }
    }
}

/// In-memory hook registry implementation
pub struct InMemoryHookRegistry<F: ?Sized> {
    table: Arc<RwLock<Table<F>>>,
}

impl<F: ?Sized> InMemoryHookRegistry<F> {
    /// Create a new in-memory hook registry
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }
}

impl<F: ?Sized> Default for InMemoryHookRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> Clone for InMemoryHookRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<F: ?Sized> fmt::Debug for InMemoryHookRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("InMemoryHookRegistry");
        match self.table.read() {
            Ok(table) => dbg
                .field("keys", &table.by_key.len())
                .field("callbacks", &table.owners.len()),
            Err(_) => dbg.field("table", &"<poisoned>"),
        };
        dbg.finish()
    }
}

impl<F: ?Sized + Send + Sync> super::HookRegistry<F> for InMemoryHookRegistry<F> {
    fn add(&self, key: HookKey, priority: i32, callback: Arc<F>) -> Result<HookId> {
        let id = HookId::new();
        let mut table = self.table.write().map_err(|e| {
            HooksError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let entries = table.by_key.entry(key.clone()).or_default();
        // Keep entries sorted; a new callback goes after every equal priority.
        let position = entries.partition_point(|r| r.priority <= priority);
        entries.insert(
            position,
            Registration {
                id: id.clone(),
                priority,
                callback,
            },
        );
        table.owners.insert(id.clone(), key.clone());

        debug!(hook = %key, hook_id = %id, priority, "Registered hook callback");
        Ok(id)
    }

    fn remove(&self, id: &HookId) -> Result<()> {
        let mut table = self.table.write().map_err(|e| {
            HooksError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let key = table
            .owners
            .remove(id)
            .ok_or_else(|| HooksError::HookNotFound(id.to_string()))?;

        if let Some(entries) = table.by_key.get_mut(&key) {
            entries.retain(|r| &r.id != id);
            if entries.is_empty() {
                table.by_key.remove(&key);
            }
        }

        debug!(hook = %key, hook_id = %id, "Removed hook callback");
        Ok(())
    }

    fn callbacks(&self, key: &HookKey) -> Result<Vec<Arc<F>>> {
        let table = self
            .table
            .read()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table
            .by_key
            .get(key)
            .map(|entries| entries.iter().map(|r| Arc::clone(&r.callback)).collect())
            .unwrap_or_default())
    }

    fn keys(&self) -> Result<Vec<HookKey>> {
        let table = self
            .table
            .read()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        let mut keys: Vec<HookKey> = table.by_key.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
