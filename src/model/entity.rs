//! Hydrated entities: a node together with its resolved one-hop edges.
//!
//! The view layer never talks to the store. It receives an [`Entity`] whose
//! edges were fetched up front (see `crate::hydrate`) and walks them in the
//! order the store returned them.

use std::collections::HashMap;

use super::{Node, PropertyMap, Relationship, Value};

/// Named-field lookup shared by nodes, hydrated entities and flat rows.
pub trait Record {
    fn get(&self, key: &str) -> Option<&Value>;

    /// The value, if present and truthy.
    fn present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| v.is_truthy())
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key).map(str::to_owned)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// `true` iff the field is present and truthy.
    fn flag(&self, key: &str) -> bool {
        self.present(key).is_some()
    }

    /// Plain JSON of the field, `null` when missing.
    fn get_json(&self, key: &str) -> serde_json::Value {
        self.get(key).map(Value::to_json).unwrap_or(serde_json::Value::Null)
    }
}

impl Record for Node {
    fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl Record for PropertyMap {
    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }
}

/// One resolved edge: the relationship and the entity at its far end.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub relationship: Relationship,
    pub other: Entity,
}

impl Edge {
    pub fn other_node(&self) -> &Entity {
        &self.other
    }
}

/// A node plus its edges, grouped by relationship alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub node: Node,
    edges: HashMap<String, Vec<Edge>>,
}

impl Entity {
    pub fn new(node: Node) -> Self {
        Self { node, edges: HashMap::new() }
    }

    /// Append an edge under `alias`. Edges keep insertion order.
    pub fn push_edge(&mut self, alias: impl Into<String>, relationship: Relationship, other: Entity) {
        self.edges
            .entry(alias.into())
            .or_default()
            .push(Edge { relationship, other });
    }

    pub fn with_edge(mut self, alias: impl Into<String>, relationship: Relationship, other: Entity) -> Self {
        self.push_edge(alias, relationship, other);
        self
    }

    /// Edges under `alias` in store order; empty when none were hydrated.
    pub fn edges(&self, alias: &str) -> &[Edge] {
        self.edges.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, alias: &str) -> bool {
        !self.edges(alias).is_empty()
    }

    /// Far end of the first edge under `alias`.
    pub fn first(&self, alias: &str) -> Option<&Entity> {
        self.edges(alias).first().map(Edge::other_node)
    }
}

impl Record for Entity {
    fn get(&self, key: &str) -> Option<&Value> {
        self.node.properties.get(key)
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Entity::new(node)
    }
}
