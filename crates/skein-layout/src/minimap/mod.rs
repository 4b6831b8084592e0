//! Overview ("minimap") coordinate mapping.
//!
//! The overview is a fixed-size canvas showing every node and meta-node position. A forward
//! transform maps graph space into the overview; its algebraic inverse turns an overview click
//! back into a graph point, from which a pan offset centering that point is derived.

mod widget;

pub use widget::MinimapWidget;

use crate::graph::{Point, Positions, Size};
use serde::{Deserialize, Serialize};

/// Default overview size in overview units.
pub const MINIMAP_SIZE: Size = Size::new(200.0, 150.0);
/// Graph-space margin added on every side of the position bounding box.
pub const BOUNDS_PADDING: f64 = 100.0;
/// Fraction of the overview the padded box may fill.
pub const FIT_RATIO: f64 = 0.9;

/// Pan offset and zoom of the main canvas. A graph point `g` is drawn at `g * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan: Point,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::new(0.0, 0.0),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Graph-space region visible on a canvas of `canvas` pixels, or `None` for a
    /// non-positive zoom.
    pub fn visible_region(&self, canvas: Size) -> Option<Rect> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return None;
        }
        Some(Rect {
            x: -self.pan.x / self.zoom,
            y: -self.pan.y / self.zoom,
            width: canvas.width / self.zoom,
            height: canvas.height / self.zoom,
        })
    }

    /// Pan that puts `graph_point` in the middle of the canvas at the current zoom.
    pub fn pan_centering(&self, graph_point: Point, canvas: Size) -> Point {
        Point::new(
            -graph_point.x * self.zoom + canvas.width / 2.0,
            -graph_point.y * self.zoom + canvas.height / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounding box in graph space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    /// Union of node and meta-node positions.
    pub fn of_positions(nodes: &Positions, meta_nodes: &Positions) -> Option<Self> {
        Self::of_points(nodes.values().chain(meta_nodes.values()))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn padded(&self, pad: f64) -> Self {
        Bounds {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

/// Uniform, aspect-preserving graph → overview mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewTransform {
    pub min_x: f64,
    pub min_y: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl OverviewTransform {
    /// Fits `bounds` (padded by [`BOUNDS_PADDING`]) into `overview`, centered, filling
    /// [`FIT_RATIO`] of the limiting dimension.
    ///
    /// Returns `None` when the unpadded box has zero (or non-finite) width or height; callers
    /// skip drawing the overview for that frame. Collinear layouts hit this too, e.g. a
    /// two-node grid or any single-row result, so expect no overview for them.
    pub fn fit(bounds: Bounds, overview: Size) -> Option<Self> {
        let (w, h) = (bounds.width(), bounds.height());
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return None;
        }
        let padded = bounds.padded(BOUNDS_PADDING);
        let box_w = padded.width();
        let box_h = padded.height();
        let scale = FIT_RATIO * (overview.width / box_w).min(overview.height / box_h);
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        Some(Self {
            min_x: padded.min_x,
            min_y: padded.min_y,
            scale,
            offset_x: (overview.width - box_w * scale) / 2.0,
            offset_y: (overview.height - box_h * scale) / 2.0,
        })
    }

    pub fn for_positions(nodes: &Positions, meta_nodes: &Positions, overview: Size) -> Option<Self> {
        Self::fit(Bounds::of_positions(nodes, meta_nodes)?, overview)
    }

    pub fn to_overview(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.min_x) * self.scale + self.offset_x,
            (p.y - self.min_y) * self.scale + self.offset_y,
        )
    }

    pub fn to_graph(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale + self.min_x,
            (p.y - self.offset_y) / self.scale + self.min_y,
        )
    }

    pub fn rect_to_overview(&self, r: Rect) -> Rect {
        let origin = self.to_overview(Point::new(r.x, r.y));
        Rect {
            x: origin.x,
            y: origin.y,
            width: r.width * self.scale,
            height: r.height * self.scale,
        }
    }

    /// New pan offset for a click at `overview_point`, centering the clicked graph location.
    pub fn pan_for_click(&self, overview_point: Point, viewport: &Viewport, canvas: Size) -> Point {
        viewport.pan_centering(self.to_graph(overview_point), canvas)
    }
}

/// Geometry of one overview frame, in overview units. Painting it is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapFrame {
    pub nodes: Vec<(String, Point)>,
    pub meta_nodes: Vec<(String, Point)>,
    /// Visible part of the main canvas; `None` when the zoom is unusable.
    pub viewport: Option<Rect>,
}

impl MinimapFrame {
    pub fn build(
        transform: &OverviewTransform,
        nodes: &Positions,
        meta_nodes: &Positions,
        viewport: &Viewport,
        canvas: Size,
    ) -> Self {
        let map = |ps: &Positions| {
            ps.iter()
                .map(|(id, p)| (id.clone(), transform.to_overview(*p)))
                .collect::<Vec<_>>()
        };
        Self {
            nodes: map(nodes),
            meta_nodes: map(meta_nodes),
            viewport: viewport
                .visible_region(canvas)
                .map(|r| transform.rect_to_overview(r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(pairs: &[(&str, f64, f64)]) -> Positions {
        pairs
            .iter()
            .map(|(id, x, y)| (id.to_string(), Point::new(*x, *y)))
            .collect()
    }

    #[test]
    fn fit_pads_scales_and_centers() {
        // 800 x 100 box -> padded 1000 x 300; limiting ratio is 200 / 1000.
        let b = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 800.0,
            max_y: 100.0,
        };
        let t = OverviewTransform::fit(b, MINIMAP_SIZE).expect("transform");
        assert!((t.scale - 0.18).abs() < 1e-12);
        assert!((t.offset_x - 10.0).abs() < 1e-9);
        assert!((t.offset_y - 48.0).abs() < 1e-9);
        let top_left = t.to_overview(Point::new(-100.0, -100.0));
        assert!((top_left.x - 10.0).abs() < 1e-9 && (top_left.y - 48.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_boxes_are_skipped() {
        let single = positions(&[("a", 5.0, 5.0)]);
        assert!(OverviewTransform::for_positions(&single, &Positions::new(), MINIMAP_SIZE).is_none());

        let flat = positions(&[("a", 0.0, 5.0), ("b", 100.0, 5.0)]);
        assert!(OverviewTransform::for_positions(&flat, &Positions::new(), MINIMAP_SIZE).is_none());

        assert!(
            OverviewTransform::for_positions(&Positions::new(), &Positions::new(), MINIMAP_SIZE)
                .is_none()
        );
    }

    #[test]
    fn single_row_grid_layout_has_no_overview() {
        let g = crate::Graph::from_ids(["a", "b"], [("a", "b")]);
        let grid = crate::Algorithm::from_name("grid").unwrap();
        let out = crate::layout(&g, Size::new(800.0, 600.0), &grid);
        assert_eq!(out.positions["a"].y, out.positions["b"].y);
        assert!(
            OverviewTransform::for_positions(&out.positions, &Positions::new(), MINIMAP_SIZE)
                .is_none()
        );

        let mut metas = Positions::new();
        metas.insert("m".to_string(), Point::new(400.0, 0.0));
        assert!(OverviewTransform::for_positions(&out.positions, &metas, MINIMAP_SIZE).is_some());
    }

    #[test]
    fn meta_nodes_extend_the_bounds() {
        let nodes = positions(&[("a", 0.0, 0.0), ("b", 10.0, 10.0)]);
        let metas = positions(&[("m", 500.0, -40.0)]);
        let b = Bounds::of_positions(&nodes, &metas).expect("bounds");
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, -40.0, 500.0, 10.0));
    }

    #[test]
    fn click_pan_centers_the_clicked_point() {
        let nodes = positions(&[("a", 0.0, 0.0), ("b", 400.0, 300.0)]);
        let t = OverviewTransform::for_positions(&nodes, &Positions::new(), MINIMAP_SIZE)
            .expect("transform");
        let canvas = Size::new(1000.0, 800.0);
        let viewport = Viewport {
            pan: Point::new(17.0, -3.0),
            zoom: 2.0,
        };
        let click = t.to_overview(Point::new(400.0, 300.0));
        let pan = t.pan_for_click(click, &viewport, canvas);
        assert!((pan.x - (-800.0 + 500.0)).abs() < 1e-9);
        assert!((pan.y - (-600.0 + 400.0)).abs() < 1e-9);
        // The clicked graph point now sits at the canvas center.
        let screen_x = 400.0 * viewport.zoom + pan.x;
        assert!((screen_x - 500.0).abs() < 1e-9);
    }

    #[test]
    fn visible_region_requires_positive_zoom() {
        let v = Viewport {
            pan: Point::new(100.0, 50.0),
            zoom: 2.0,
        };
        assert_eq!(
            v.visible_region(Size::new(800.0, 600.0)),
            Some(Rect {
                x: -50.0,
                y: -25.0,
                width: 400.0,
                height: 300.0
            })
        );
        let broken = Viewport {
            zoom: 0.0,
            ..Viewport::default()
        };
        assert!(broken.visible_region(Size::new(800.0, 600.0)).is_none());
    }
}
