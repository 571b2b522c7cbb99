//! Module registry
//!
//! Maps module names to the location of their implementation. The registry is
//! filled before any plan is built and only read while building; clones share the
//! same table, guarded by a read-mostly lock.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::debug;

use crate::error::{PlanError, Result};

#[derive(Debug, Default)]
struct ModuleTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

/// Registry of known modules, in registration order
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    table: Arc<RwLock<ModuleTable>>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from `(name, path)` pairs
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::DuplicateModule`] if a name repeats
    pub fn with_modules<I, N, P>(modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let registry = Self::new();
        for (name, path) in modules {
            registry.register(name, path)?;
        }
        Ok(registry)
    }

    /// Register a module
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::DuplicateModule`] if the name is already taken
    pub fn register(&self, name: impl Into<String>, path: impl Into<String>) -> Result<()> {
        let name = name.into();
        let path = path.into();
        let mut table = self
            .table
            .write()
            .map_err(|e| PlanError::StorageError(format!("Failed to acquire write lock: {}", e)))?;

        if table.index.contains_key(&name) {
            return Err(PlanError::DuplicateModule(name));
        }

        debug!(module = %name, path = %path, "Registering module");
        let position = table.entries.len();
        table.index.insert(name.clone(), position);
        table.entries.push((name, path));
        Ok(())
    }

    /// Path of a registered module
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::UnregisteredModule`] if the name is unknown
    pub fn lookup(&self, name: &str) -> Result<String> {
        let table = self
            .table
            .read()
            .map_err(|e| PlanError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        table
            .index
            .get(name)
            .map(|&i| table.entries[i].1.clone())
            .ok_or_else(|| PlanError::UnregisteredModule(name.to_string()))
    }

    /// Whether a module is registered
    pub fn contains(&self, name: &str) -> Result<bool> {
        let table = self
            .table
            .read()
            .map_err(|e| PlanError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.index.contains_key(name))
    }

    /// All `(name, path)` pairs in registration order
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let table = self
            .table
            .read()
            .map_err(|e| PlanError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.entries.clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = ModuleRegistry::new();
        registry.register("Teaser", "/modules/Teaser/").unwrap();

        assert_eq!(registry.lookup("Teaser").unwrap(), "/modules/Teaser/");
        assert!(registry.contains("Teaser").unwrap());
    }

    #[test]
    fn test_register_duplicate_fails() {
        let registry = ModuleRegistry::new();
        registry.register("Teaser", "/a/").unwrap();

        let result = registry.register("Teaser", "/b/");
        assert!(matches!(result, Err(PlanError::DuplicateModule(name)) if name == "Teaser"));
        assert_eq!(registry.lookup("Teaser").unwrap(), "/a/");
    }

    #[test]
    fn test_lookup_unregistered_fails() {
        let registry = ModuleRegistry::new();
        let result = registry.lookup("Missing");

        assert!(matches!(result, Err(PlanError::UnregisteredModule(name)) if name == "Missing"));
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let registry = ModuleRegistry::new();
        registry.register("SingleModule", "/m/SingleModule/").unwrap();
        registry.register("ModuleWithArea", "/m/ModuleWithArea/").unwrap();
        registry.register("AModule", "/m/AModule/").unwrap();

        assert_eq!(
            registry.list().unwrap(),
            vec![
                ("SingleModule".to_string(), "/m/SingleModule/".to_string()),
                ("ModuleWithArea".to_string(), "/m/ModuleWithArea/".to_string()),
                ("AModule".to_string(), "/m/AModule/".to_string()),
            ]
        );
        assert_eq!(registry.len().unwrap(), 3);
    }

    #[test]
    fn test_with_modules() {
        let registry = ModuleRegistry::with_modules([("A", ""), ("B", "")]).unwrap();
        assert!(!registry.is_empty().unwrap());

        let result = ModuleRegistry::with_modules([("A", ""), ("A", "")]);
        assert!(matches!(result, Err(PlanError::DuplicateModule(_))));
    }

    #[test]
    fn test_clones_share_modules() {
        let registry = ModuleRegistry::new();
        let clone = registry.clone();
        clone.register("Late", "").unwrap();

        assert!(registry.contains("Late").unwrap());
    }
}
