#![forbid(unsafe_code)]

//! Headless node-link layout strategies.
//!
//! Every strategy is a pure function of a [`Graph`], the canvas [`Size`] and its options, and
//! returns one position per node id. Randomized strategies take their randomness from an
//! injected [`rand::Rng`] (or a seed in their options) so runs can be replayed. The
//! [`minimap`] module maps those positions into a fixed-size overview and back.

pub mod algo;
pub mod error;
pub mod graph;
pub mod minimap;

pub use algo::{
    Algorithm, CircleOptions, ClusterOptions, CollisionOptions, ConcentricOptions, ForceOptions,
    GridOptions,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point, Positions, Size};
pub use minimap::{MinimapFrame, MinimapWidget, OverviewTransform, Viewport};

/// Headless layout entry point. Randomized strategies seed from their `random_seed` option.
pub fn layout(graph: &Graph, canvas: Size, algorithm: &Algorithm) -> LayoutResult {
    let mut rng = algo::rng_from_seed(algorithm.random_seed());
    layout_with_rng(graph, canvas, algorithm, &mut rng)
}

/// Like [`layout`], drawing randomness from `rng` instead of the options' seed.
pub fn layout_with_rng<R: rand::Rng + ?Sized>(
    graph: &Graph,
    canvas: Size,
    algorithm: &Algorithm,
    rng: &mut R,
) -> LayoutResult {
    match algorithm {
        Algorithm::Grid(opts) => algo::grid::layout(graph, canvas, opts),
        Algorithm::Circle(opts) => algo::circle::layout(graph, canvas, opts),
        Algorithm::Concentric(opts) => algo::concentric::layout(graph, canvas, opts),
        Algorithm::Random(opts) => algo::collision::layout_with_rng(graph, canvas, opts, rng),
        Algorithm::Cluster(opts) => algo::cluster::layout(graph, canvas, opts),
        Algorithm::Force(opts) => algo::force::layout_with_rng(graph, canvas, opts, rng),
    }
}
