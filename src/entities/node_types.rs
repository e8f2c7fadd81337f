//! Node-type registration table.
//!
//! Mirrors the widget registry's shape for whole nodes: extensions bind
//! a path-style tag ("Audio/Oscillator") to a factory, and instantiated
//! nodes take the last path segment as their title unless the factory
//! set one deliberately elsewhere in the path-less case.

use std::collections::HashMap;
use std::sync::RwLock;

use log::warn;
use once_cell::sync::Lazy;

use super::node::Node;

/// Factory signature stored in the table.
pub type NodeFactory = fn() -> Node;

pub struct NodeTypeRegistry {
    factory: HashMap<String, NodeFactory>,
    type_list: Vec<String>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self {
            factory: HashMap::new(),
            type_list: Vec::new(),
        }
    }

    /// Bind a factory to a type path; the last writer wins.
    pub fn register(&mut self, type_path: impl Into<String>, factory: NodeFactory) {
        let type_path = type_path.into();
        if !self.type_list.contains(&type_path) {
            self.type_list.push(type_path.clone());
        }
        self.factory.insert(type_path, factory);
    }

    /// Instantiate a registered type. The title becomes the last path
    /// segment ("Audio/Oscillator" -> "Oscillator").
    pub fn create(&self, type_path: &str) -> Option<Node> {
        let Some(factory) = self.factory.get(type_path) else {
            warn!("unknown node type {type_path:?}");
            return None;
        };
        let mut node = factory();
        if let Some(pos) = type_path.rfind('/') {
            node.body.title = type_path[pos + 1..].to_string();
        }
        Some(node)
    }

    pub fn registered_types(&self) -> &[String] {
        &self.type_list
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<RwLock<NodeTypeRegistry>> =
    Lazy::new(|| RwLock::new(NodeTypeRegistry::new()));

/// Process-wide node-type table, open for extension registration.
pub fn node_type_registry() -> &'static RwLock<NodeTypeRegistry> {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_node() -> Node {
        Node::new("untitled")
    }

    #[test]
    fn test_title_derives_from_path() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("Audio/Oscillator", plain_node);

        let node = registry.create("Audio/Oscillator").unwrap();
        assert_eq!(node.body.title, "Oscillator");
    }

    #[test]
    fn test_pathless_tag_keeps_factory_title() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("Oscillator", plain_node);

        let node = registry.create("Oscillator").unwrap();
        assert_eq!(node.body.title, "untitled");
    }

    #[test]
    fn test_unknown_type_returns_none() {
        let registry = NodeTypeRegistry::new();
        assert!(registry.create("Missing/Node").is_none());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("B/Two", plain_node);
        registry.register("A/One", plain_node);
        registry.register("B/Two", plain_node);

        assert_eq!(registry.registered_types().to_vec(), vec!["B/Two", "A/One"]);
    }
}
