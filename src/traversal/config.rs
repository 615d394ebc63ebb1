//! Execution configuration attached to a traversal's plan.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A configuration value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConfigValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer setting.
    Int(i64),
    /// Textual setting.
    Text(String),
}

/// Key/value store read by the distributed execution runtime when launching a
/// job. Optimizer passes write their decisions here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    entries: FxHashMap<String, ConfigValue>,
}

impl ExecutionConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.entries.insert(key.into(), value);
    }

    /// Sets a boolean entry.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, ConfigValue::Bool(value));
    }

    /// Reads an entry.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Reads a boolean entry; non-boolean values read as `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(ConfigValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Reads a boolean entry with a fallback default.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
