//! Node property store: string key -> scalar value.
//!
//! Properties are the node's persistent data; widgets are their visual
//! editors. A property-bound widget writes back through the value-change
//! protocol, never the other way around.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Property container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Props {
    #[serde(default)]
    map: HashMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.map.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.map.get(key).and_then(Value::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.map.get(key).and_then(Value::as_number)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.map.get(key) {
            Some(Value::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all properties (key, value).
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.map.iter()
    }
}
