//! Local registry source backed by a directory of item JSON files.
//!
//! A project can keep its own registry items under `.kitbag/registry/`;
//! these shadow remote items of the same name.

use crate::error::{KitbagError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the project root holding local registry items.
const LOCAL_REGISTRY_DIR: &str = ".kitbag/registry";

/// Loader for project-local registry items.
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    /// Raw item JSON keyed by item name.
    items: HashMap<String, (Value, PathBuf)>,
}

impl LocalSource {
    /// Load local items for a project, if the registry directory exists.
    pub fn new(project_root: Option<&Path>) -> Result<Self> {
        let mut items = HashMap::new();

        if let Some(root) = project_root {
            let dir = root.join(LOCAL_REGISTRY_DIR);
            Self::load_from_dir(&dir, &mut items)?;
        }

        Ok(Self { items })
    }

    /// Load items from an explicit directory (used by tests and custom setups).
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut items = HashMap::new();
        Self::load_from_dir(dir, &mut items)?;
        Ok(Self { items })
    }

    fn load_from_dir(dir: &Path, items: &mut HashMap<String, (Value, PathBuf)>) -> Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::load_from_dir(&path, items)?;
            } else if path.extension().map(|e| e == "json").unwrap_or(false) {
                let content = fs::read_to_string(&path)?;
                let value: Value = serde_json::from_str(&content).map_err(|e| {
                    KitbagError::ConfigParseError {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;

                // Keyed by the declared name, not the filename, so renaming a
                // file does not silently change the item's identity.
                let name = value
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| KitbagError::ConfigParseError {
                        path: path.clone(),
                        message: "registry item is missing a 'name' field".to_string(),
                    })?
                    .to_string();

                items.insert(name, (value, path));
            }
        }

        Ok(())
    }

    /// Get a raw item by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items.get(name).map(|(v, _)| v)
    }

    /// Get a raw item with the path it was loaded from.
    pub fn get_with_path(&self, name: &str) -> Option<(&Value, &Path)> {
        self.items.get(name).map(|(v, p)| (v, p.as_path()))
    }

    /// Check if an item exists locally.
    pub fn has(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// All local item names.
    pub fn item_names(&self) -> Vec<&str> {
        self.items.keys().map(|s| s.as_str()).collect()
    }
}
