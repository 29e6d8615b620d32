//! Key/value property store abstraction.
//!
//! Mirrors the platform property primitive: a dot-separated key either
//! exists and is updated in place, or is created. The platform's own
//! store lives out of process; `MemoryStore` stages overrides locally so
//! the bring-up binary can publish them in one batch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Find-then-update-or-create property storage.
pub trait PropertyStore {
    fn get(&self, name: &str) -> Option<String>;
    fn contains(&self, name: &str) -> bool;
    /// Replace the value of an existing key.
    fn update(&mut self, name: &str, value: &str);
    /// Create a new key.
    fn add(&mut self, name: &str, value: &str);
}

/// Override a property: update in place when the key exists, create it
/// otherwise. Applying the same value twice is a no-op and never
/// duplicates the key.
pub fn override_property(store: &mut dyn PropertyStore, name: &str, value: &str) {
    if store.contains(name) {
        store.update(name, value);
    } else {
        store.add(name, value);
    }
}

/// In-memory property store with deterministic key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    props: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a kernel command line. `androidboot.<key>`
    /// entries become `ro.boot.<key>` properties; anything else is left
    /// alone. Malformed entries without a value are skipped.
    pub fn seed_from_cmdline(&mut self, cmdline: &str) {
        for token in cmdline.split_whitespace() {
            let Some(entry) = token.strip_prefix("androidboot.") else {
                continue;
            };
            let Some((key, value)) = entry.split_once('=') else {
                tracing::debug!("Skipping malformed cmdline entry: {}", token);
                continue;
            };
            if key.is_empty() {
                continue;
            }
            self.add(&format!("ro.boot.{}", key), value);
        }
    }

    /// Build a store seeded from a kernel command line file, typically
    /// /proc/cmdline.
    pub fn from_cmdline(path: &Path) -> Result<Self, PropsError> {
        let cmdline = fs::read_to_string(path)?;
        let mut store = Self::new();
        store.seed_from_cmdline(&cmdline);
        tracing::debug!(
            "Seeded {} boot properties from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `key=value` lines for the host property service to
    /// ingest.
    pub fn to_prop_lines(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.props {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Write the staged properties to a file.
    pub fn write_to(&self, path: &Path) -> Result<(), PropsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_prop_lines())?;
        tracing::info!("Published {} properties to {}", self.len(), path.display());
        Ok(())
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.props.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    fn update(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.props.get_mut(name) {
            *existing = value.to_string();
        }
    }

    fn add(&mut self, name: &str, value: &str) {
        self.props.insert(name.to_string(), value.to_string());
    }
}
