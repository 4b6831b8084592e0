//! Connected components laid out as separate islands.
//!
//! Components are found with union-find and assigned to the cells of a near-square grid in
//! discovery order (not by size). Each island is a circle sized to fit its cell.

use crate::algo::ClusterOptions;
use crate::algo::circle::circle_points;
use crate::algo::components::group_by_component;
use crate::graph::{Graph, LayoutResult, Point, Size};

/// Screen region allocated to one connected component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Island {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Island {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn intersects(&self, other: &Island) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Island cells for `count` components: `ceil(sqrt(count))` columns,
/// `ceil(count / cols)` rows, with `spacing` around and between cells.
pub fn island_grid(count: usize, canvas: Size, spacing: f64) -> Vec<Island> {
    if count == 0 {
        return Vec::new();
    }
    let cols = ((count as f64).sqrt().ceil() as usize).max(1);
    let rows = count.div_ceil(cols);
    let width = ((canvas.width - spacing * (cols as f64 + 1.0)) / cols as f64).max(0.0);
    let height = ((canvas.height - spacing * (rows as f64 + 1.0)) / rows as f64).max(0.0);

    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Island {
                x: spacing + col as f64 * (width + spacing),
                y: spacing + row as f64 * (height + spacing),
                width,
                height,
            }
        })
        .collect()
}

pub fn layout(graph: &Graph, canvas: Size, opts: &ClusterOptions) -> LayoutResult {
    if graph.is_empty() {
        return LayoutResult::default();
    }
    let groups = group_by_component(graph);
    let islands = island_grid(groups.len(), canvas, opts.spacing);
    tracing::debug!(
        nodes = graph.nodes.len(),
        components = groups.len(),
        "cluster-island layout"
    );

    let mut points = vec![Point::default(); graph.nodes.len()];
    for (members, island) in groups.iter().zip(&islands) {
        let radius = 0.8 * island.width.min(island.height) / 2.0;
        for (&node, p) in members
            .iter()
            .zip(circle_points(members.len(), island.center(), radius))
        {
            points[node] = p;
        }
    }
    LayoutResult::from_points(graph, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_for_three_components_is_two_by_two() {
        let cells = island_grid(3, Size::new(850.0, 650.0), 50.0);
        assert_eq!(cells.len(), 3);
        assert_eq!(
            cells[0],
            Island {
                x: 50.0,
                y: 50.0,
                width: 350.0,
                height: 250.0
            }
        );
        assert_eq!((cells[1].x, cells[1].y), (450.0, 50.0));
        assert_eq!((cells[2].x, cells[2].y), (50.0, 350.0));
    }

    #[test]
    fn tiny_canvas_collapses_islands_instead_of_going_negative() {
        let cells = island_grid(4, Size::new(60.0, 60.0), 50.0);
        assert!(cells.iter().all(|c| c.width == 0.0 && c.height == 0.0));
    }

    #[test]
    fn singleton_component_sits_on_its_island_center() {
        let g = Graph::from_ids(["solo"], []);
        let out = layout(&g, Size::new(300.0, 300.0), &ClusterOptions::default());
        assert_eq!(out.positions["solo"], Point::new(150.0, 150.0));
    }

    #[test]
    fn island_order_follows_discovery_not_size() {
        // The singleton is seen first and takes the first cell even though it is smaller.
        let g = Graph::from_ids(["s", "a", "b", "c"], [("a", "b"), ("b", "c")]);
        let canvas = Size::new(850.0, 350.0);
        let out = layout(&g, canvas, &ClusterOptions::default());
        let cells = island_grid(2, canvas, 50.0);
        assert!(cells[0].contains(out.positions["s"]));
        for id in ["a", "b", "c"] {
            assert!(cells[1].contains(out.positions[id]), "{id}");
        }
    }
}
