pub mod circle;
pub mod cluster;
pub mod collision;
pub mod components;
pub mod concentric;
pub mod force;
pub mod grid;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A layout strategy together with its option set.
///
/// Serialized with a `type` tag so a project file can persist the chosen layout:
/// `{"type": "force", "iterations": 200}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Algorithm {
    Grid(GridOptions),
    Circle(CircleOptions),
    Concentric(ConcentricOptions),
    /// Random seeding followed by soft relaxation and hard de-overlap.
    Random(CollisionOptions),
    /// Clusters connected components into islands laid out as circles.
    Cluster(ClusterOptions),
    Force(ForceOptions),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::Circle(_) => "circle",
            Self::Concentric(_) => "concentric",
            Self::Random(_) => "random",
            Self::Cluster(_) => "cluster",
            Self::Force(_) => "force",
        }
    }

    /// Default option set for a strategy name as used in project files and on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "grid" => Self::Grid(GridOptions::default()),
            "circle" => Self::Circle(CircleOptions::default()),
            "concentric" => Self::Concentric(ConcentricOptions::default()),
            "random" | "collision" => Self::Random(CollisionOptions::default()),
            "cluster" | "islands" => Self::Cluster(ClusterOptions::default()),
            "force" | "force-directed" => Self::Force(ForceOptions::default()),
            _ => return None,
        })
    }

    /// Whether the strategy consumes randomness.
    pub fn is_randomized(&self) -> bool {
        matches!(self, Self::Random(_) | Self::Force(_))
    }

    pub fn random_seed(&self) -> Option<u64> {
        match self {
            Self::Random(opts) => opts.random_seed,
            Self::Force(opts) => opts.random_seed,
            _ => None,
        }
    }

    /// Overrides the seed of a randomized strategy; deterministic strategies are unchanged.
    pub fn set_random_seed(&mut self, seed: Option<u64>) {
        match self {
            Self::Random(opts) => opts.random_seed = seed,
            Self::Force(opts) => opts.random_seed = seed,
            _ => {}
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Force(ForceOptions::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleOptions {
    /// Fixed radius; `None` uses `min(width, height) / 3`.
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcentricOptions {
    /// Radius of the innermost (highest degree) ring.
    pub min_radius: f64,
    /// Radial distance between consecutive rings.
    pub level_spacing: f64,
}

impl Default for ConcentricOptions {
    fn default() -> Self {
        Self {
            min_radius: 50.0,
            level_spacing: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollisionOptions {
    pub node_radius: f64,
    /// Minimum center-to-center separation; `None` uses `2.5 * node_radius`.
    pub min_distance: Option<f64>,
    pub relaxation_iterations: usize,
    pub cleanup_passes: usize,
    /// Seed for deterministic replay; `None` draws from OS entropy.
    pub random_seed: Option<u64>,
}

impl CollisionOptions {
    pub fn effective_min_distance(&self) -> f64 {
        self.min_distance.unwrap_or(self.node_radius * 2.5)
    }
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            min_distance: None,
            relaxation_iterations: 150,
            cleanup_passes: 20,
            random_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterOptions {
    /// Gap between neighbouring islands and between islands and the canvas edge.
    pub spacing: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self { spacing: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceOptions {
    pub iterations: usize,
    pub repulsion_strength: f64,
    pub attraction_strength: f64,
    /// Velocity multiplier applied every iteration.
    pub damping: f64,
    /// Seed for deterministic replay; `None` draws from OS entropy.
    pub random_seed: Option<u64>,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            repulsion_strength: 5000.0,
            attraction_strength: 0.01,
            damping: 0.8,
            random_seed: None,
        }
    }
}

pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn unseeded_rng_draws_from_entropy() {
        let a: u64 = rng_from_seed(None).r#gen();
        let b: u64 = rng_from_seed(None).r#gen();
        assert_ne!(a, b);

        let c: u64 = rng_from_seed(Some(4)).r#gen();
        let d: u64 = rng_from_seed(Some(4)).r#gen();
        assert_eq!(c, d);
    }

    #[test]
    fn algorithm_round_trips_through_tagged_json() {
        let json = r#"{"type":"force","iterations":12,"randomSeed":7}"#;
        let algo: Algorithm = serde_json::from_str(json).expect("parse");
        let Algorithm::Force(opts) = &algo else {
            panic!("expected force, got {algo:?}");
        };
        assert_eq!(opts.iterations, 12);
        assert_eq!(opts.random_seed, Some(7));
        assert_eq!(opts.damping, 0.8);
    }

    #[test]
    fn from_name_accepts_aliases() {
        assert_eq!(Algorithm::from_name("Islands").map(|a| a.name()), Some("cluster"));
        assert_eq!(Algorithm::from_name("collision").map(|a| a.name()), Some("random"));
        assert!(Algorithm::from_name("sugiyama").is_none());
    }

    #[test]
    fn seed_override_only_touches_randomized_strategies() {
        let mut grid = Algorithm::Grid(GridOptions::default());
        grid.set_random_seed(Some(3));
        assert_eq!(grid.random_seed(), None);

        let mut random = Algorithm::from_name("random").expect("random");
        random.set_random_seed(Some(3));
        assert_eq!(random.random_seed(), Some(3));
    }

    #[test]
    fn collision_min_distance_defaults_to_two_and_a_half_radii() {
        let opts = CollisionOptions::default();
        assert_eq!(opts.effective_min_distance(), 50.0);
    }
}
