use crate::algo::GridOptions;
use crate::graph::{Graph, LayoutResult, Point, Size};

/// Column count for `n` cells: `ceil(sqrt(n))`, at least 1.
pub(crate) fn grid_columns(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

/// Row-major placement at the center of each cell of a `ceil(sqrt(n))`-column grid.
pub fn layout(graph: &Graph, canvas: Size, _opts: &GridOptions) -> LayoutResult {
    let n = graph.nodes.len();
    if n == 0 {
        return LayoutResult::default();
    }
    let cols = grid_columns(n);
    let rows = n.div_ceil(cols);
    let cell_w = canvas.width / cols as f64;
    let cell_h = canvas.height / rows as f64;
    tracing::debug!(nodes = n, cols, rows, "grid layout");

    let points = (0..n).map(|i| {
        let (row, col) = (i / cols, i % cols);
        Point::new(
            (col as f64 + 0.5) * cell_w,
            (row as f64 + 0.5) * cell_h,
        )
    });
    LayoutResult::from_points(graph, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_round_up() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(10), 4);
    }

    #[test]
    fn five_nodes_fill_two_rows_of_three() {
        let g = Graph::from_ids(["a", "b", "c", "d", "e"], []);
        let out = layout(&g, Size::new(300.0, 200.0), &GridOptions::default());
        assert_eq!(out.positions["a"], Point::new(50.0, 50.0));
        assert_eq!(out.positions["c"], Point::new(250.0, 50.0));
        assert_eq!(out.positions["d"], Point::new(50.0, 150.0));
        assert_eq!(out.positions["e"], Point::new(150.0, 150.0));
    }

    #[test]
    fn empty_graph_yields_empty_mapping() {
        let out = layout(&Graph::default(), Size::default(), &GridOptions::default());
        assert!(out.positions.is_empty());
    }
}
