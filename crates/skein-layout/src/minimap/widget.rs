use super::{MINIMAP_SIZE, MinimapFrame, OverviewTransform, Viewport};
use crate::graph::{Point, Positions, Size};
use std::sync::Arc;

#[derive(Debug)]
struct CachedTransform {
    nodes: Arc<Positions>,
    meta_nodes: Arc<Positions>,
    transform: Option<OverviewTransform>,
}

/// Interactive overview state: the cached transform plus the drag flag.
///
/// The transform is recomputed only when the node or meta-node position set is a different
/// allocation (`Arc::ptr_eq`) from the last one seen, so panning and zooming keep the overview
/// scale stable. Every pointer move while dragging reports a new pan through `on_pan`, with no
/// debouncing.
pub struct MinimapWidget<F>
where
    F: FnMut(Point),
{
    size: Size,
    on_pan: F,
    dragging: bool,
    cache: Option<CachedTransform>,
    revision: u64,
}

impl<F> MinimapWidget<F>
where
    F: FnMut(Point),
{
    pub fn new(on_pan: F) -> Self {
        Self {
            size: MINIMAP_SIZE,
            on_pan,
            dragging: false,
            cache: None,
            revision: 0,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self.cache = None;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Bumped every time the transform is recomputed.
    pub fn transform_revision(&self) -> u64 {
        self.revision
    }

    pub fn transform(&self) -> Option<OverviewTransform> {
        self.cache.as_ref().and_then(|c| c.transform)
    }

    /// Refreshes the cached transform if either position set changed identity.
    pub fn sync(
        &mut self,
        nodes: &Arc<Positions>,
        meta_nodes: &Arc<Positions>,
    ) -> Option<OverviewTransform> {
        let fresh = self.cache.as_ref().is_some_and(|c| {
            Arc::ptr_eq(&c.nodes, nodes) && Arc::ptr_eq(&c.meta_nodes, meta_nodes)
        });
        if !fresh {
            let transform = OverviewTransform::for_positions(nodes, meta_nodes, self.size);
            self.revision += 1;
            tracing::trace!(
                revision = self.revision,
                skipped = transform.is_none(),
                "minimap transform recomputed"
            );
            self.cache = Some(CachedTransform {
                nodes: Arc::clone(nodes),
                meta_nodes: Arc::clone(meta_nodes),
                transform,
            });
        }
        self.transform()
    }

    /// Overview geometry for the current frame, or `None` when the frame is skipped.
    pub fn frame(
        &mut self,
        nodes: &Arc<Positions>,
        meta_nodes: &Arc<Positions>,
        viewport: &Viewport,
        canvas: Size,
    ) -> Option<MinimapFrame> {
        let transform = self.sync(nodes, meta_nodes)?;
        Some(MinimapFrame::build(
            &transform, nodes, meta_nodes, viewport, canvas,
        ))
    }

    /// Starts a drag and pans to the pressed location. Returns whether a pan was reported.
    pub fn pointer_down(&mut self, at: Point, viewport: &Viewport, canvas: Size) -> bool {
        self.dragging = true;
        self.report_pan(at, viewport, canvas)
    }

    pub fn pointer_move(&mut self, at: Point, viewport: &Viewport, canvas: Size) -> bool {
        if !self.dragging {
            return false;
        }
        self.report_pan(at, viewport, canvas)
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    fn report_pan(&mut self, at: Point, viewport: &Viewport, canvas: Size) -> bool {
        let Some(transform) = self.transform() else {
            return false;
        };
        let pan = transform.pan_for_click(at, viewport, canvas);
        (self.on_pan)(pan);
        true
    }
}

impl<F> std::fmt::Debug for MinimapWidget<F>
where
    F: FnMut(Point),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinimapWidget")
            .field("size", &self.size)
            .field("dragging", &self.dragging)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
