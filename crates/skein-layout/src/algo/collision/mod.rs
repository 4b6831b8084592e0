//! Random placement followed by collision avoidance.
//!
//! Three phases run in order:
//!
//! 1. seed every node uniformly inside a working area that grows with node count,
//! 2. soft relaxation: damped pairwise impulses for [`CollisionOptions::relaxation_iterations`],
//! 3. hard cleanup: direct pair displacement until nothing overlaps or the pass budget runs out.
//!
//! Relaxation alone keeps jittering in dense graphs and direct displacement alone is chaotic,
//! so the cleanup only has to fix what the relaxation left behind.

use crate::algo::{CollisionOptions, rng_from_seed};
use crate::graph::{Graph, LayoutResult, Point, Size};
use rand::Rng;
use std::f64::consts::TAU;

/// Per-pair impulse scale during relaxation.
const RELAX_STRENGTH: f64 = 0.1;
/// Velocity multiplier applied after every relaxation iteration.
const RELAX_DAMPING: f64 = 0.85;
/// Extra distance added on top of half the deficit during cleanup.
const SEPARATION_MARGIN: f64 = 0.5;
/// Below this distance two nodes are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-9;

pub fn layout(graph: &Graph, canvas: Size, opts: &CollisionOptions) -> LayoutResult {
    let mut rng = rng_from_seed(opts.random_seed);
    layout_with_rng(graph, canvas, opts, &mut rng)
}

pub fn layout_with_rng<R: Rng + ?Sized>(
    graph: &Graph,
    canvas: Size,
    opts: &CollisionOptions,
    rng: &mut R,
) -> LayoutResult {
    let n = graph.nodes.len();
    if n == 0 {
        return LayoutResult::default();
    }

    let min_distance = opts.effective_min_distance();
    let area = working_area(n, canvas, min_distance);
    let mut points = seed(n, area, rng);
    relax(&mut points, min_distance, opts.relaxation_iterations, rng);
    let passes = separate(&mut points, min_distance, opts.cleanup_passes, rng);

    tracing::debug!(
        nodes = n,
        area_width = area.width,
        area_height = area.height,
        cleanup_passes = passes,
        remaining_overlaps = count_overlaps(&points, min_distance),
        "random layout with collision avoidance"
    );
    LayoutResult::from_points(graph, points)
}

/// Number of unordered pairs closer than `min_distance`.
pub fn count_overlaps(points: &[Point], min_distance: f64) -> usize {
    let mut count = 0;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].distance(points[j]) < min_distance {
                count += 1;
            }
        }
    }
    count
}

/// The requested canvas, grown so that a `ceil(sqrt(n))` square lattice at `min_distance`
/// spacing fits in both dimensions.
pub(crate) fn working_area(n: usize, canvas: Size, min_distance: f64) -> Size {
    let side = (n as f64).sqrt().ceil();
    let required = side * min_distance;
    Size::new(canvas.width.max(required), canvas.height.max(required))
}

pub(crate) fn seed<R: Rng + ?Sized>(n: usize, area: Size, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| {
            Point::new(
                rng.r#gen::<f64>() * area.width,
                rng.r#gen::<f64>() * area.height,
            )
        })
        .collect()
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let angle = rng.r#gen::<f64>() * TAU;
    (angle.cos(), angle.sin())
}

/// Soft phase. Pairs closer than `min_distance` get an impulse of
/// `(min_distance - d) / d` along their separating vector, scaled by [`RELAX_STRENGTH`];
/// velocities are damped and integrated without clamping.
pub(crate) fn relax<R: Rng + ?Sized>(
    points: &mut [Point],
    min_distance: f64,
    iterations: usize,
    rng: &mut R,
) {
    let n = points.len();
    let mut velocity = vec![(0.0f64, 0.0f64); n];

    for _ in 0..iterations {
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[j].x - points[i].x;
                let dy = points[j].y - points[i].y;
                let dist = dx.hypot(dy);
                if dist >= min_distance {
                    continue;
                }
                let (ix, iy) = if dist > COINCIDENT_EPSILON {
                    let k = (min_distance - dist) / dist * RELAX_STRENGTH;
                    (dx * k, dy * k)
                } else {
                    let (ux, uy) = random_axis(rng);
                    let k = min_distance * RELAX_STRENGTH;
                    (ux * k, uy * k)
                };
                velocity[i].0 -= ix;
                velocity[i].1 -= iy;
                velocity[j].0 += ix;
                velocity[j].1 += iy;
            }
        }

        for (p, v) in points.iter_mut().zip(velocity.iter_mut()) {
            v.0 *= RELAX_DAMPING;
            v.1 *= RELAX_DAMPING;
            p.x += v.0;
            p.y += v.1;
        }
    }
}

/// Hard phase. Every overlapping pair is pushed apart by half its deficit plus
/// [`SEPARATION_MARGIN`] each. Returns the number of passes that moved something.
pub(crate) fn separate<R: Rng + ?Sized>(
    points: &mut [Point],
    min_distance: f64,
    max_passes: usize,
    rng: &mut R,
) -> usize {
    let n = points.len();
    for pass in 0..max_passes {
        let mut moved = false;
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[j].x - points[i].x;
                let dy = points[j].y - points[i].y;
                let dist = dx.hypot(dy);
                if dist >= min_distance {
                    continue;
                }
                let (ux, uy) = if dist > COINCIDENT_EPSILON {
                    (dx / dist, dy / dist)
                } else {
                    random_axis(rng)
                };
                let push = (min_distance - dist) / 2.0 + SEPARATION_MARGIN;
                points[i].x -= ux * push;
                points[i].y -= uy * push;
                points[j].x += ux * push;
                points[j].y += uy * push;
                moved = true;
            }
        }
        tracing::trace!(pass, moved, "collision cleanup pass");
        if !moved {
            return pass;
        }
    }
    max_passes
}
