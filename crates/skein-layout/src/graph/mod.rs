use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Layout input: node ids plus directed edges between them.
///
/// Strategies assume every edge endpoint is present in `nodes`. Callers that cannot guarantee
/// this upstream should run [`Graph::validate`] first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Builds a graph from bare ids and `(source, target)` pairs.
    pub fn from_ids<'a>(
        ids: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            nodes: ids.into_iter().map(Node::new).collect(),
            edges: edges
                .into_iter()
                .map(|(source, target)| Edge::new(source, target))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    from: e.source.clone(),
                    to: e.target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Maps node ids to their index in `nodes`. Later duplicates shadow earlier ones.
    pub(crate) fn index_of(&self) -> FxHashMap<&str, usize> {
        let mut out: FxHashMap<&str, usize> = FxHashMap::default();
        out.reserve(self.nodes.len());
        for (idx, n) in self.nodes.iter().enumerate() {
            out.insert(n.id.as_str(), idx);
        }
        out
    }

    /// Resolves edges to index pairs, skipping edges whose endpoints are unknown.
    pub(crate) fn edge_indices(&self) -> Vec<(usize, usize)> {
        let index = self.index_of();
        self.edges
            .iter()
            .filter_map(|e| {
                let a = index.get(e.source.as_str()).copied()?;
                let b = index.get(e.target.as_str()).copied()?;
                Some((a, b))
            })
            .collect()
    }

    /// Undirected adjacency lists indexed like `nodes`. A reciprocal pair of directed edges
    /// contributes two entries to each side.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for (a, b) in self.edge_indices() {
            adj[a].push(b);
            if a != b {
                adj[b].push(a);
            }
        }
        adj
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas extent handed to a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

pub type Positions = BTreeMap<String, Point>;

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: Positions,
}

impl LayoutResult {
    /// Zips node ids with coordinates computed in node order.
    pub(crate) fn from_points(graph: &Graph, points: impl IntoIterator<Item = Point>) -> Self {
        let positions = graph
            .nodes
            .iter()
            .zip(points)
            .map(|(n, p)| (n.id.clone(), p))
            .collect();
        Self { positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_the_offending_edge() {
        let g = Graph::from_ids(["a", "b"], [("a", "b"), ("b", "zz")]);
        let err = g.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "graph contains an edge with a missing endpoint: b -> zz"
        );
    }

    #[test]
    fn adjacency_is_undirected_and_skips_unknown_endpoints() {
        let g = Graph::from_ids(["a", "b", "c"], [("a", "b"), ("c", "b"), ("c", "nope")]);
        let adj = g.adjacency();
        assert_eq!(adj[0], vec![1]);
        assert_eq!(adj[1], vec![0, 2]);
        assert_eq!(adj[2], vec![1]);
    }

    #[test]
    fn self_loops_appear_once_in_adjacency() {
        let g = Graph::from_ids(["a"], [("a", "a")]);
        assert_eq!(g.adjacency()[0], vec![0]);
    }
}
