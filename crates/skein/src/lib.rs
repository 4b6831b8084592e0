#![forbid(unsafe_code)]

//! `skein` turns a normalized node/edge list into node-link diagram coordinates.
//!
//! - [`skein_core`] (re-exported at the root) holds the graph model and [`GraphStore`].
//! - [`layout`] re-exports the stateless strategies and the minimap mapper.
//! - [`LayoutSession`] ties a store to a chosen strategy and keeps the current position sets.

pub use skein_core::*;

pub mod layout {
    pub use skein_layout::algo::components::{component_count, find_components};
    pub use skein_layout::minimap::{
        Bounds, MINIMAP_SIZE, MinimapFrame, MinimapWidget, OverviewTransform, Rect, Viewport,
    };
    pub use skein_layout::{
        Algorithm, CircleOptions, ClusterOptions, CollisionOptions, ConcentricOptions,
        ForceOptions, Graph, GridOptions, LayoutResult, Point, Positions, Size, layout,
        layout_with_rng,
    };
}

mod session;

pub use session::{LayoutSession, layout_graph};

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Model(#[from] skein_core::Error),
    #[error(transparent)]
    Layout(#[from] skein_layout::Error),
}

pub type HeadlessResult<T> = std::result::Result<T, HeadlessError>;
