//! Storage collaborator.
//!
//! Views never query. [`crate::hydrate`] reads nodes and edges through
//! [`StorageBackend`] and hands views a finished `Entity`; the write half of
//! the trait exists for fixtures and loaders.

pub mod memory;

use async_trait::async_trait;

use crate::model::{Direction, Node, NodeId, PropertyMap, RelId, Relationship, Value};
use crate::tx::{Transaction, TxMode};
use crate::Result;

pub use memory::MemoryBackend;

/// What hydration and fixtures need from a graph store.
///
/// Edge and label listings must come back in a stable order. Views inherit
/// that order and never re-sort.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    type Tx: Transaction;

    async fn begin_tx(&self, mode: TxMode) -> Result<Self::Tx>;

    async fn commit_tx(&self, tx: Self::Tx) -> Result<()>;

    async fn rollback_tx(&self, tx: Self::Tx) -> Result<()>;

    // ========================================================================
    // Writes
    // ========================================================================

    async fn create_node(
        &self,
        tx: &mut Self::Tx,
        labels: &[&str],
        properties: PropertyMap,
    ) -> Result<NodeId>;

    /// Both ends must already exist.
    async fn create_relationship(
        &self,
        tx: &mut Self::Tx,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        properties: PropertyMap,
    ) -> Result<RelId>;

    // ========================================================================
    // Reads
    // ========================================================================

    async fn get_node(&self, tx: &Self::Tx, id: NodeId) -> Result<Option<Node>>;

    /// Edges touching `node` in `dir`, optionally of one type.
    async fn get_relationships(
        &self,
        tx: &Self::Tx,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>>;

    async fn nodes_by_label(&self, tx: &Self::Tx, label: &str) -> Result<Vec<Node>>;

    /// `label` nodes whose `key` property equals `value`.
    async fn nodes_by_property(
        &self,
        tx: &Self::Tx,
        label: &str,
        key: &str,
        value: &Value,
    ) -> Result<Vec<Node>>;
}
