use crate::HeadlessResult;
use skein_core::GraphStore;
use skein_layout::minimap::Viewport;
use skein_layout::{Algorithm, Edge, Graph, Node, Point, Positions, Size};
use std::sync::Arc;

/// Projects the store onto the id-only graph the layout strategies consume.
pub fn layout_graph(store: &GraphStore) -> Graph {
    Graph::new(
        store.nodes().map(|n| Node::new(n.id.as_str())).collect(),
        store
            .edges()
            .iter()
            .map(|e| Edge::new(e.source.as_str(), e.target.as_str()))
            .collect(),
    )
}

/// Explicit view state: the graph, the chosen strategy, canvas size, viewport, and the
/// position sets produced by the last layout run.
///
/// Every [`relayout`](Self::relayout) replaces the position sets wholesale with new
/// allocations, which is what the minimap keys its cached transform on.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    store: GraphStore,
    algorithm: Algorithm,
    canvas: Size,
    viewport: Viewport,
    positions: Arc<Positions>,
    meta_positions: Arc<Positions>,
}

impl LayoutSession {
    pub fn new(store: GraphStore, algorithm: Algorithm, canvas: Size) -> Self {
        Self {
            store,
            algorithm,
            canvas,
            viewport: Viewport::default(),
            positions: Arc::new(Positions::new()),
            meta_positions: Arc::new(Positions::new()),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Mutable graph access. Positions are left untouched until the next relayout.
    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Applies a pan reported by the minimap; zoom is unchanged.
    pub fn set_pan(&mut self, pan: Point) {
        self.viewport.pan = pan;
    }

    pub fn positions(&self) -> &Arc<Positions> {
        &self.positions
    }

    pub fn meta_positions(&self) -> &Arc<Positions> {
        &self.meta_positions
    }

    /// Validates the graph, runs the selected strategy and replaces both position sets.
    pub fn relayout(&mut self) -> HeadlessResult<Arc<Positions>> {
        let graph = layout_graph(&self.store);
        graph.validate()?;
        let result = skein_layout::layout(&graph, self.canvas, &self.algorithm);
        Ok(self.install(result.positions))
    }

    pub fn relayout_with_rng<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> HeadlessResult<Arc<Positions>> {
        let graph = layout_graph(&self.store);
        graph.validate()?;
        let result = skein_layout::layout_with_rng(&graph, self.canvas, &self.algorithm, rng);
        Ok(self.install(result.positions))
    }

    /// Moves a meta-node independently of its members. Returns `false` for an unknown id.
    pub fn move_meta_node(&mut self, id: &str, to: Point) -> bool {
        if !self.store.meta_nodes().any(|m| m.id == id) {
            return false;
        }
        let mut next = (*self.meta_positions).clone();
        next.insert(id.to_string(), to);
        self.meta_positions = Arc::new(next);
        true
    }

    fn install(&mut self, positions: Positions) -> Arc<Positions> {
        let meta = meta_centroids(&self.store, &positions);
        tracing::debug!(
            algorithm = self.algorithm.name(),
            nodes = positions.len(),
            meta_nodes = meta.len(),
            "layout installed"
        );
        self.positions = Arc::new(positions);
        self.meta_positions = Arc::new(meta);
        Arc::clone(&self.positions)
    }
}

/// Initial meta-node positions: the centroid of the members that have a position.
fn meta_centroids(store: &GraphStore, positions: &Positions) -> Positions {
    let mut out = Positions::new();
    for meta in store.meta_nodes() {
        let placed: Vec<Point> = meta
            .members
            .iter()
            .filter_map(|m| positions.get(m).copied())
            .collect();
        if placed.is_empty() {
            continue;
        }
        let n = placed.len() as f64;
        let (sx, sy) = placed
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        out.insert(meta.id.clone(), Point::new(sx / n, sy / n));
    }
    out
}
