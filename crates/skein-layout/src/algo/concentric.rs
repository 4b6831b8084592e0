use crate::algo::ConcentricOptions;
use crate::graph::{Graph, LayoutResult, Point, Size};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Edge-endpoint count per node, in node order. Direction is ignored; a self loop counts twice.
pub fn degrees(graph: &Graph) -> Vec<usize> {
    let mut out = vec![0usize; graph.nodes.len()];
    for (a, b) in graph.edge_indices() {
        out[a] += 1;
        out[b] += 1;
    }
    out
}

/// Node indices per ring, innermost (highest degree) first. Ties keep input order.
pub(crate) fn rings(degrees: &[usize]) -> Vec<Vec<usize>> {
    let mut by_degree: BTreeMap<std::cmp::Reverse<usize>, Vec<usize>> = BTreeMap::new();
    for (idx, &d) in degrees.iter().enumerate() {
        by_degree.entry(std::cmp::Reverse(d)).or_default().push(idx);
    }
    by_degree.into_values().collect()
}

/// One ring per distinct degree around the canvas center, highest degree innermost.
pub fn layout(graph: &Graph, canvas: Size, opts: &ConcentricOptions) -> LayoutResult {
    if graph.is_empty() {
        return LayoutResult::default();
    }
    let center = canvas.center();
    let rings = rings(&degrees(graph));
    tracing::debug!(
        nodes = graph.nodes.len(),
        rings = rings.len(),
        "concentric layout"
    );

    let mut points = vec![Point::default(); graph.nodes.len()];
    for (ring_idx, members) in rings.iter().enumerate() {
        let radius = opts.min_radius + ring_idx as f64 * opts.level_spacing;
        let step = TAU / members.len() as f64;
        for (slot, &node) in members.iter().enumerate() {
            let angle = step * slot as f64;
            points[node] = Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
        }
    }
    LayoutResult::from_points(graph, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_counts_both_endpoints() {
        let g = Graph::from_ids(["a", "b", "c"], [("a", "b"), ("b", "c"), ("c", "c")]);
        assert_eq!(degrees(&g), vec![1, 2, 3]);
    }

    #[test]
    fn rings_order_by_descending_degree_with_stable_ties() {
        assert_eq!(
            rings(&[1, 3, 1, 0, 3]),
            vec![vec![1, 4], vec![0, 2], vec![3]]
        );
    }

    #[test]
    fn isolated_nodes_share_a_single_ring() {
        let g = Graph::from_ids(["a", "b", "c"], []);
        let opts = ConcentricOptions::default();
        let out = layout(&g, Size::new(400.0, 400.0), &opts);
        let center = Point::new(200.0, 200.0);
        for p in out.positions.values() {
            assert!((p.distance(center) - opts.min_radius).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_graph_yields_empty_mapping() {
        let out = layout(
            &Graph::default(),
            Size::default(),
            &ConcentricOptions::default(),
        );
        assert!(out.positions.is_empty());
    }
}
