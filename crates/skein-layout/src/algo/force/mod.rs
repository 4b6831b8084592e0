//! Classical spring embedder.
//!
//! Every node is pushed away from every other node with magnitude
//! `repulsion_strength / (d^2 + 1)` and pulled toward each neighbour with magnitude
//! `d * attraction_strength`. Velocities are damped each iteration and displacements are scaled
//! by a temperature that decays linearly from 1 to 0, so the system settles after a fixed
//! number of iterations. There is no centering force and no clamping to the canvas.
//!
//! Cost is `O(iterations * n^2)`.

use crate::algo::{ForceOptions, rng_from_seed};
use crate::graph::{Graph, LayoutResult, Point, Size};
use rand::Rng;

pub fn layout(graph: &Graph, canvas: Size, opts: &ForceOptions) -> LayoutResult {
    let mut rng = rng_from_seed(opts.random_seed);
    layout_with_rng(graph, canvas, opts, &mut rng)
}

pub fn layout_with_rng<R: Rng + ?Sized>(
    graph: &Graph,
    canvas: Size,
    opts: &ForceOptions,
    rng: &mut R,
) -> LayoutResult {
    if graph.is_empty() {
        return LayoutResult::default();
    }

    let timing_enabled = std::env::var("SKEIN_LAYOUT_TIMING").ok().as_deref() == Some("1");
    let total_start = timing_enabled.then(std::time::Instant::now);

    let adjacency = graph.adjacency();
    let mut points: Vec<Point> = (0..graph.nodes.len())
        .map(|_| {
            Point::new(
                rng.r#gen::<f64>() * canvas.width,
                rng.r#gen::<f64>() * canvas.height,
            )
        })
        .collect();
    simulate(&mut points, &adjacency, opts);

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        iterations = opts.iterations,
        "force-directed layout"
    );
    if let Some(s) = total_start {
        eprintln!(
            "[skein-force-timing] total={:?} nodes={} edges={} iterations={}",
            s.elapsed(),
            graph.nodes.len(),
            graph.edges.len(),
            opts.iterations,
        );
    }

    LayoutResult::from_points(graph, points)
}

/// Runs the fixed iteration budget over `points`, in place.
pub(crate) fn simulate(points: &mut [Point], adjacency: &[Vec<usize>], opts: &ForceOptions) {
    let n = points.len();
    let mut velocity = vec![(0.0f64, 0.0f64); n];
    let mut forces = vec![(0.0f64, 0.0f64); n];

    for iter in 0..opts.iterations {
        let temperature = 1.0 - iter as f64 / opts.iterations as f64;

        for (i, force) in forces.iter_mut().enumerate() {
            let p = points[i];
            let (mut fx, mut fy) = (0.0, 0.0);

            for (j, q) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = p.x - q.x;
                let dy = p.y - q.y;
                let d2 = dx * dx + dy * dy;
                let magnitude = opts.repulsion_strength / (d2 + 1.0);
                let dist = d2.sqrt();
                if dist > 0.0 {
                    fx += dx / dist * magnitude;
                    fy += dy / dist * magnitude;
                } else {
                    // Coincident: split along x, lower index to the left. A large cluster seeded
                    // on one spot (zero-size canvas) spreads to ~1e5-1e6 units before settling.
                    fx += if i < j { -magnitude } else { magnitude };
                }
            }

            for &j in &adjacency[i] {
                if i == j {
                    continue;
                }
                // Unit vector times `d * attraction` is the raw offset times `attraction`.
                fx += (points[j].x - p.x) * opts.attraction_strength;
                fy += (points[j].y - p.y) * opts.attraction_strength;
            }

            *force = (fx, fy);
        }

        for ((p, v), f) in points.iter_mut().zip(velocity.iter_mut()).zip(&forces) {
            v.0 = (v.0 + f.0) * opts.damping;
            v.1 = (v.1 + f.1) * opts.damping;
            p.x += v.0 * temperature;
            p.y += v.1 * temperature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_pair_settles_near_the_spring_equilibrium() {
        // Repulsion 5000 / (d^2 + 1) balances attraction 0.01 * d around d ~= 79.
        let mut points = vec![Point::new(0.0, 0.0), Point::new(300.0, 0.0)];
        let adjacency = vec![vec![1], vec![0]];
        simulate(&mut points, &adjacency, &ForceOptions::default());
        let d = points[0].distance(points[1]);
        assert!(d > 40.0 && d < 200.0, "distance {d}");
    }

    #[test]
    fn unconnected_pair_drifts_apart() {
        let mut points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        simulate(&mut points, &[vec![], vec![]], &ForceOptions::default());
        assert!(points[0].distance(points[1]) > 10.0);
    }

    #[test]
    fn coincident_nodes_stay_finite_and_separate() {
        let mut points = vec![Point::new(50.0, 50.0); 3];
        simulate(&mut points, &[vec![], vec![], vec![]], &ForceOptions::default());
        assert!(points.iter().all(Point::is_finite));
        assert!(points[0].distance(points[2]) > 0.0);
    }

    #[test]
    fn zero_iterations_leave_seed_positions_untouched() {
        let mut points = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let opts = ForceOptions {
            iterations: 0,
            ..Default::default()
        };
        simulate(&mut points, &[vec![1], vec![0]], &opts);
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn seeded_runs_are_reproducible_and_finite() {
        let g = Graph::from_ids(["a", "b", "c", "d"], [("a", "b"), ("b", "c"), ("c", "a")]);
        let opts = ForceOptions {
            random_seed: Some(5),
            ..Default::default()
        };
        let first = layout(&g, Size::default(), &opts);
        let second = layout(&g, Size::default(), &opts);
        assert_eq!(first.positions, second.positions);
        assert_eq!(first.positions.len(), 4);
        assert!(first.positions.values().all(Point::is_finite));
    }

    #[test]
    fn star_seeded_on_one_spot_spreads_but_stays_finite() {
        let leaves: Vec<String> = (1..200).map(|i| format!("leaf{i}")).collect();
        let g = Graph::from_ids(
            std::iter::once("hub").chain(leaves.iter().map(String::as_str)),
            leaves.iter().map(|l| ("hub", l.as_str())),
        );
        let opts = ForceOptions {
            random_seed: Some(9),
            ..Default::default()
        };
        let out = layout(&g, Size::new(0.0, 0.0), &opts);
        assert_eq!(out.positions.len(), 200);
        assert!(out.positions.values().all(Point::is_finite));
        let spread = out
            .positions
            .values()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0f64, f64::max);
        assert!(spread > 0.0 && spread < 1e7, "spread {spread}");
    }

    #[test]
    fn empty_graph_yields_empty_mapping() {
        let out = layout(&Graph::default(), Size::default(), &ForceOptions::default());
        assert!(out.positions.is_empty());
    }
}
