//! Entity hydration: fetch a node and, following a static plan, the edges
//! its views read.
//!
//! This is the async persistence boundary. Everything downstream of an
//! [`Entity`] is synchronous.

use std::future::Future;
use std::pin::Pin;

use crate::model::{Entity, Node, NodeId, Value};
use crate::schema::{self, Expand};
use crate::storage::StorageBackend;
use crate::tx::TxMode;
use crate::{Error, Result};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Load one node by id and hydrate it with the plan for its label.
pub async fn load<B: StorageBackend>(backend: &B, id: NodeId) -> Result<Entity> {
    let tx = backend.begin_tx(TxMode::ReadOnly).await?;
    let Some(node) = backend.get_node(&tx, id).await? else {
        backend.rollback_tx(tx).await?;
        return Err(Error::NotFound(format!("Node {id}")));
    };
    let plan = plan_for_node(&node);
    let entity = hydrate(backend, &tx, node, plan).await;
    finish(backend, tx, entity).await
}

/// Load every node carrying `label`, each hydrated with that label's plan.
pub async fn load_by_label<B: StorageBackend>(backend: &B, label: &str) -> Result<Vec<Entity>> {
    let tx = backend.begin_tx(TxMode::ReadOnly).await?;
    let nodes = backend.nodes_by_label(&tx, label).await?;
    let entities = hydrate_all(backend, &tx, nodes, schema::plan_for(label)).await;
    finish(backend, tx, entities).await
}

/// Load the `label` nodes whose `key` equals `value`.
pub async fn load_by_property<B: StorageBackend>(
    backend: &B,
    label: &str,
    key: &str,
    value: &Value,
) -> Result<Vec<Entity>> {
    let tx = backend.begin_tx(TxMode::ReadOnly).await?;
    let nodes = backend.nodes_by_property(&tx, label, key, value).await?;
    let entities = hydrate_all(backend, &tx, nodes, schema::plan_for(label)).await;
    finish(backend, tx, entities).await
}

async fn hydrate_all<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    nodes: Vec<Node>,
    plan: &'static [Expand],
) -> Result<Vec<Entity>> {
    let mut entities = Vec::with_capacity(nodes.len());
    for node in nodes {
        entities.push(hydrate(backend, tx, node, plan).await?);
    }
    Ok(entities)
}

/// Commit on success; roll back and return the original error otherwise.
async fn finish<B: StorageBackend, T>(backend: &B, tx: B::Tx, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            backend.commit_tx(tx).await?;
            Ok(value)
        }
        Err(error) => {
            tracing::debug!(%error, "hydration failed, rolling back");
            backend.rollback_tx(tx).await?;
            Err(error)
        }
    }
}

fn plan_for_node(node: &Node) -> &'static [Expand] {
    node.labels
        .iter()
        .map(|label| schema::plan_for(label))
        .find(|plan| !plan.is_empty())
        .unwrap_or(&[])
}

/// Attach the edges named by `plan` to `node`, recursing into `nested`.
///
/// Edges are attached in the order the backend returns them. An edge whose
/// far node has vanished is skipped with a warning.
pub fn hydrate<'a, B: StorageBackend>(
    backend: &'a B,
    tx: &'a B::Tx,
    node: Node,
    plan: &'static [Expand],
) -> BoxFuture<'a, Result<Entity>> {
    Box::pin(async move {
        let mut entity = Entity::new(node);
        let id = entity.node.id;

        for step in plan {
            let rels = backend
                .get_relationships(tx, id, step.spec.direction, Some(step.spec.rel_type))
                .await?;

            for rel in rels {
                let Some(other_id) = rel.other_node(id) else {
                    continue;
                };
                let Some(other) = backend.get_node(tx, other_id).await? else {
                    tracing::warn!(node = %id, rel = %rel.id, missing = %other_id, "dangling relationship skipped");
                    continue;
                };
                let other = hydrate(backend, tx, other, step.nested).await?;
                entity.push_edge(step.spec.alias, rel, other);
            }
        }

        tracing::debug!(node = %id, edges = plan.len(), "entity hydrated");
        Ok(entity)
    })
}
