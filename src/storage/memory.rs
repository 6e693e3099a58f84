//! In-memory graph store.
//!
//! Backs the tests and embedded use. One `parking_lot::RwLock` guards the
//! whole graph. Transactions are markers: writes land immediately and
//! rollback does not undo them.
//!
//! Adjacency and label lists are append-only, so reads return edges and
//! nodes in creation order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::{Direction, Node, NodeId, PropertyMap, RelId, Relationship, Value};
use crate::tx::{Transaction, TxId, TxMode};
use crate::{Error, Result};
use super::StorageBackend;

/// Shared handle to an in-memory graph. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    graph: Arc<RwLock<Graph>>,
    tx_seq: Arc<AtomicU64>,
}

#[derive(Default)]
struct Graph {
    nodes: HashMap<NodeId, Node>,
    relationships: HashMap<RelId, Relationship>,
    /// node → touching relationships, creation order
    adjacency: HashMap<NodeId, Vec<RelId>>,
    /// label → nodes, creation order
    by_label: HashMap<String, Vec<NodeId>>,
    node_seq: u64,
    rel_seq: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryTx {
    id: TxId,
    mode: TxMode,
}

impl Transaction for MemoryTx {
    fn mode(&self) -> TxMode { self.mode }
    fn id(&self) -> TxId { self.id }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    type Tx = MemoryTx;

    async fn begin_tx(&self, mode: TxMode) -> Result<MemoryTx> {
        let id = TxId(self.tx_seq.fetch_add(1, Ordering::Relaxed) + 1);
        Ok(MemoryTx { id, mode })
    }

    async fn commit_tx(&self, _tx: MemoryTx) -> Result<()> { Ok(()) }

    async fn rollback_tx(&self, _tx: MemoryTx) -> Result<()> { Ok(()) }

    async fn create_node(
        &self,
        tx: &mut MemoryTx,
        labels: &[&str],
        properties: PropertyMap,
    ) -> Result<NodeId> {
        tx.ensure_writable()?;
        let mut graph = self.graph.write();
        graph.node_seq += 1;
        let id = NodeId(graph.node_seq);

        for label in labels {
            graph.by_label.entry((*label).to_string()).or_default().push(id);
        }
        graph.adjacency.insert(id, Vec::new());
        graph.nodes.insert(id, Node {
            id,
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
            properties,
        });
        Ok(id)
    }

    async fn create_relationship(
        &self,
        tx: &mut MemoryTx,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        properties: PropertyMap,
    ) -> Result<RelId> {
        tx.ensure_writable()?;
        let mut graph = self.graph.write();
        for (end, node) in [("Source", src), ("Target", dst)] {
            if !graph.nodes.contains_key(&node) {
                return Err(Error::NotFound(format!("{end} node {node}")));
            }
        }

        graph.rel_seq += 1;
        let id = RelId(graph.rel_seq);
        graph.adjacency.entry(src).or_default().push(id);
        if src != dst {
            graph.adjacency.entry(dst).or_default().push(id);
        }
        graph.relationships.insert(id, Relationship {
            id,
            src,
            dst,
            rel_type: rel_type.to_string(),
            properties,
        });
        Ok(id)
    }

    async fn get_node(&self, _tx: &MemoryTx, id: NodeId) -> Result<Option<Node>> {
        Ok(self.graph.read().nodes.get(&id).cloned())
    }

    async fn get_relationships(
        &self,
        _tx: &MemoryTx,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>> {
        let graph = self.graph.read();
        let Some(touching) = graph.adjacency.get(&node) else {
            return Ok(Vec::new());
        };

        Ok(touching
            .iter()
            .filter_map(|id| graph.relationships.get(id))
            .filter(|rel| match dir {
                Direction::Outgoing => rel.src == node,
                Direction::Incoming => rel.dst == node,
            })
            .filter(|rel| rel_type.is_none_or(|t| rel.rel_type == t))
            .cloned()
            .collect())
    }

    async fn nodes_by_label(&self, _tx: &MemoryTx, label: &str) -> Result<Vec<Node>> {
        let graph = self.graph.read();
        Ok(graph
            .by_label
            .get(label)
            .into_iter()
            .flatten()
            .filter_map(|id| graph.nodes.get(id).cloned())
            .collect())
    }

    async fn nodes_by_property(
        &self,
        tx: &MemoryTx,
        label: &str,
        key: &str,
        value: &Value,
    ) -> Result<Vec<Node>> {
        let mut found = self.nodes_by_label(tx, label).await?;
        found.retain(|node| node.get(key) == Some(value));
        Ok(found)
    }
}
