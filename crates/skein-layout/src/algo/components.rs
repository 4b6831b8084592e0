//! Connected components via a disjoint-set forest.

use crate::graph::Graph;
use indexmap::IndexMap;

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass: point every node on the walked path straight at the root.
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`. Returns `false` when they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// Component label per node, in node order.
///
/// Labels are zero-based and handed out in the order their first member appears in
/// `graph.nodes`; they say nothing about component size. Edge direction is ignored and edges
/// naming unknown ids are skipped.
pub fn component_ids(graph: &Graph) -> Vec<usize> {
    let mut uf = UnionFind::new(graph.nodes.len());
    for (a, b) in graph.edge_indices() {
        uf.union(a, b);
    }

    let mut label_of_root: IndexMap<usize, usize> = IndexMap::new();
    let mut out = Vec::with_capacity(graph.nodes.len());
    for idx in 0..graph.nodes.len() {
        let root = uf.find(idx);
        let next = label_of_root.len();
        let label = *label_of_root.entry(root).or_insert(next);
        out.push(label);
    }
    tracing::trace!(
        nodes = graph.nodes.len(),
        components = label_of_root.len(),
        "union-find components"
    );
    out
}

/// Node id → component label. See [`component_ids`].
pub fn find_components(graph: &Graph) -> IndexMap<String, usize> {
    graph
        .nodes
        .iter()
        .zip(component_ids(graph))
        .map(|(n, c)| (n.id.clone(), c))
        .collect()
}

/// Node indices grouped per component, components in discovery order.
pub fn group_by_component(graph: &Graph) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (idx, label) in component_ids(graph).into_iter().enumerate() {
        if label == groups.len() {
            groups.push(Vec::new());
        }
        groups[label].push(idx);
    }
    groups
}

pub fn component_count(graph: &Graph) -> usize {
    component_ids(graph).into_iter().max().map_or(0, |m| m + 1)
}
