use crate::algo::CircleOptions;
use crate::graph::{Graph, LayoutResult, Point, Size};
use std::f64::consts::TAU;

/// Places `count` points evenly around a circle, starting at angle 0 and going
/// counter-clockwise in screen terms (increasing angle). A single point sits on the center.
pub fn circle_points(count: usize, center: Point, radius: f64) -> Vec<Point> {
    match count {
        0 => Vec::new(),
        1 => vec![center],
        _ => (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect(),
    }
}

pub fn layout(graph: &Graph, canvas: Size, opts: &CircleOptions) -> LayoutResult {
    let radius = opts
        .radius
        .unwrap_or_else(|| canvas.width.min(canvas.height) / 3.0);
    tracing::debug!(nodes = graph.nodes.len(), radius, "circle layout");
    LayoutResult::from_points(
        graph,
        circle_points(graph.nodes.len(), canvas.center(), radius),
    )
}
