use crate::error::{Error, Result};
use crate::model::{GraphData, GraphEdge, GraphNode, MetaNode};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// What [`GraphStore::upsert_node`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// A stub with the same id received its backing record.
    Promoted,
    /// An existing, already backed node was merged with the record.
    Updated,
}

/// Owned graph state: nodes in insertion order, directed edges, meta-nodes.
///
/// Edges to unknown ids materialize stub nodes, so every stored edge always has both
/// endpoints present.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
    edge_set: FxHashSet<(String, String)>,
    meta_nodes: IndexMap<String, MetaNode>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads nodes first, then edges (creating stubs), then meta-nodes. Nodes flagged as stubs
    /// stay stubs until a backing record is upserted.
    pub fn from_data(data: GraphData) -> Result<Self> {
        let mut store = Self::new();
        for node in data.nodes {
            if node.is_stub && !node.id.is_empty() && !store.nodes.contains_key(&node.id) {
                store.nodes.insert(node.id.clone(), node);
                continue;
            }
            store.upsert_node(node)?;
        }
        for edge in data.edges {
            store.add_edge(edge.source, edge.target)?;
        }
        for meta in data.meta_nodes {
            store.add_meta_node(meta.id, meta.label, meta.members)?;
        }
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_data(serde_json::from_str(json)?)
    }

    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.clone(),
            meta_nodes: self.meta_nodes.values().cloned().collect(),
        }
    }

    pub fn upsert_node(&mut self, record: GraphNode) -> Result<Upsert> {
        if record.id.is_empty() {
            return Err(Error::EmptyId);
        }
        match self.nodes.get_mut(&record.id) {
            Some(existing) => {
                let was_stub = existing.is_stub;
                existing.merge_record(record);
                if was_stub {
                    tracing::debug!(id = %existing.id, "stub node promoted");
                    Ok(Upsert::Promoted)
                } else {
                    Ok(Upsert::Updated)
                }
            }
            None => {
                let mut node = record;
                node.is_stub = false;
                self.nodes.insert(node.id.clone(), node);
                Ok(Upsert::Inserted)
            }
        }
    }

    /// Adds a directed edge, creating stub nodes for unknown endpoints. Returns `false` for a
    /// duplicate of an existing edge.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> Result<bool> {
        let (source, target) = (source.into(), target.into());
        if source.is_empty() || target.is_empty() {
            return Err(Error::EmptyId);
        }
        if !self.edge_set.insert((source.clone(), target.clone())) {
            return Ok(false);
        }
        for id in [&source, &target] {
            if !self.nodes.contains_key(id.as_str()) {
                tracing::debug!(id = %id, "stub node created for edge endpoint");
                self.nodes.insert(id.clone(), GraphNode::stub(id.as_str()));
            }
        }
        self.edges.push(GraphEdge { source, target });
        Ok(true)
    }

    /// Removes a node with its incident edges and its meta-node memberships. Meta-nodes left
    /// without members are dropped.
    pub fn remove_node(&mut self, id: &str) -> Option<GraphNode> {
        let node = self.nodes.shift_remove(id)?;
        self.edges.retain(|e| e.source != id && e.target != id);
        self.edge_set.retain(|(s, t)| s != id && t != id);
        for meta in self.meta_nodes.values_mut() {
            meta.members.retain(|m| m != id);
        }
        self.meta_nodes.retain(|_, meta| !meta.members.is_empty());
        Some(node)
    }

    pub fn add_meta_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        members: Vec<String>,
    ) -> Result<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::EmptyId);
        }
        if self.meta_nodes.contains_key(&id) {
            return Err(Error::DuplicateMetaNode { id });
        }
        if let Some(member) = members.iter().find(|m| !self.nodes.contains_key(m.as_str())) {
            return Err(Error::UnknownMember {
                meta: id,
                member: member.clone(),
            });
        }
        let meta = MetaNode {
            id: id.clone(),
            label: label.into(),
            members,
        };
        self.meta_nodes.insert(id, meta);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.edge_set.clear();
        self.meta_nodes.clear();
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn stubs(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values().filter(|n| n.is_stub)
    }

    pub fn meta_nodes(&self) -> impl Iterator<Item = &MetaNode> {
        self.meta_nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
