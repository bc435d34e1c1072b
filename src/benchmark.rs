//! A small multimodal benchmark suite used to validate the GSO engine
//! independently of any molecular scoring function, in the spirit of
//! the `J1`..`J5` landscapes the original GSO literature tests against.
//! Each function takes a 2D point and returns a value the engine tries
//! to maximize; none of them read PDB files or potential tables, so
//! they exercise pure GSO mechanics — luciferin update, neighborhood
//! search, movement — against a known, deterministic landscape.

use crate::coordinates::Coordinates;
use crate::random::{MTGenerator, UniformGenerator};
use std::f64::consts::PI;

pub fn j1(c: &Coordinates) -> f64 {
    let (x, y) = (c[0], c[1]);
    (x.sin() * (1.0 - y).cos() + y.sin() * (1.0 - x).cos()).powi(2)
}

pub fn j2(c: &Coordinates) -> f64 {
    let (x, y) = (c[0], c[1]);
    ((PI * x / 4.0).sin() * (PI * y / 4.0).sin()).abs()
}

pub fn j3(c: &Coordinates) -> f64 {
    let (x, y) = (c[0], c[1]);
    40.0 - (x * x + y * y - 10.0 * ((2.0 * PI * x).cos() + (2.0 * PI * y).cos()))
}

pub fn j4(c: &Coordinates) -> f64 {
    let (x, y) = (c[0], c[1]);
    (-(x * x + y * y) / 200.0).exp() * ((x * x + y * y).sqrt()).cos().powi(2)
}

pub fn j5(c: &Coordinates) -> f64 {
    let (x, y) = (c[0], c[1]);
    let r2 = x * x + y * y;
    (1.0 + (0.5 * r2).cos()) / (1.0 + 0.001 * r2)
}

pub type Objective = fn(&Coordinates) -> f64;

pub fn by_name(name: &str) -> Option<Objective> {
    match name {
        "j1" => Some(j1),
        "j2" => Some(j2),
        "j3" => Some(j3),
        "j4" => Some(j4),
        "j5" => Some(j5),
        _ => None,
    }
}

/// A glowworm carrying a plain `Coordinates` position instead of a
/// translation/rotation/ANM pose, for benchmarking the GSO mechanics
/// against [`Objective`] functions.
pub struct BenchmarkGlowworm {
    pub id: u32,
    pub position: Coordinates,
    pub rho: f64,
    pub gamma: f64,
    pub beta: f64,
    pub luciferin: f64,
    pub vision_range: f64,
    pub max_vision_range: f64,
    pub max_neighbors: u32,
    pub neighbors: Vec<u32>,
    pub probabilities: Vec<f64>,
    pub scoring: f64,
    pub step: u32,
}

impl BenchmarkGlowworm {
    pub fn new(id: u32, position: Coordinates) -> Self {
        BenchmarkGlowworm {
            id,
            position,
            rho: 0.4,
            gamma: 0.6,
            beta: 0.08,
            luciferin: 5.0,
            vision_range: 3.0,
            max_vision_range: 5.0,
            max_neighbors: 5,
            neighbors: Vec::new(),
            probabilities: Vec::new(),
            scoring: 0.0,
            step: 0,
        }
    }

    pub fn compute_luciferin(&mut self, objective: Objective) {
        self.scoring = objective(&self.position);
        self.luciferin = (1.0 - self.rho) * self.luciferin + self.gamma * self.scoring;
        self.step += 1;
    }

    pub fn update_vision_range(&mut self) {
        self.vision_range = self.max_vision_range.min(
            (0_f64)
                .max(self.vision_range + self.beta * (self.max_neighbors as i32 - self.neighbors.len() as i32) as f64),
        );
    }
}

pub struct BenchmarkSwarm {
    pub glowworms: Vec<BenchmarkGlowworm>,
    objective: Objective,
}

impl BenchmarkSwarm {
    pub fn new(positions: Vec<Coordinates>, objective: Objective) -> Self {
        let glowworms = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| BenchmarkGlowworm::new(i as u32, p))
            .collect();
        BenchmarkSwarm { glowworms, objective }
    }

    pub fn update_luciferin(&mut self) {
        let objective = self.objective;
        for glowworm in &mut self.glowworms {
            glowworm.compute_luciferin(objective);
        }
    }

    pub fn movement_phase(&mut self, step: f64, rng: &mut MTGenerator) {
        let n = self.glowworms.len();
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if self.glowworms[i].luciferin < self.glowworms[j].luciferin {
                    let d = self.glowworms[i].position.distance(&self.glowworms[j].position);
                    if d < self.glowworms[i].vision_range {
                        neighbors[i].push(self.glowworms[j].id);
                    }
                }
            }
        }

        let luciferins: Vec<f64> = self.glowworms.iter().map(|g| g.luciferin).collect();
        let positions: Vec<Coordinates> = self.glowworms.iter().map(|g| g.position.clone_coordinates()).collect();

        for i in 0..n {
            let glowworm = &mut self.glowworms[i];
            glowworm.neighbors = neighbors[i].clone();
            glowworm.probabilities.clear();
            let mut total = 0.0;
            for &nid in &glowworm.neighbors {
                let diff = luciferins[nid as usize] - glowworm.luciferin;
                glowworm.probabilities.push(diff);
                total += diff;
            }
            for p in glowworm.probabilities.iter_mut() {
                *p /= total;
            }
        }

        for i in 0..n {
            let glowworm = &mut self.glowworms[i];
            if glowworm.neighbors.is_empty() {
                glowworm.update_vision_range();
                continue;
            }
            let r = rng.next_float();
            let mut cum = 0.0;
            let mut k = 0usize;
            while cum < r {
                cum += glowworm.probabilities[k];
                k += 1;
            }
            let target = &positions[glowworm.neighbors[k - 1] as usize];
            glowworm.position = glowworm.position.move_towards(target, step);
            glowworm.update_vision_range();
        }
    }
}

/// Builds the initial glowworm population for a benchmark run, either
/// from an on-disk coordinates file or uniformly at random inside a
/// bounding box — the `GSOBuilder`/`LightdockGSOBuilder` split in the
/// original tooling, collapsed into one function since both branches
/// share everything but the source of positions.
pub struct GSOBuilder;

impl GSOBuilder {
    pub fn from_positions(positions: Vec<Coordinates>, objective: Objective) -> BenchmarkSwarm {
        BenchmarkSwarm::new(positions, objective)
    }

    pub fn random(
        num_glowworms: usize,
        dimension: usize,
        bounds: (f64, f64),
        seed: u64,
        objective: Objective,
    ) -> BenchmarkSwarm {
        let mut rng = MTGenerator::new(seed);
        let (lo, hi) = bounds;
        let span = hi - lo;
        let positions = (0..num_glowworms)
            .map(|_| Coordinates::new((0..dimension).map(|_| lo + rng.next_float() * span).collect()))
            .collect();
        BenchmarkSwarm::new(positions, objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j3_symmetric_about_origin() {
        let origin = Coordinates::new(vec![0.0, 0.0]);
        let mirrored = Coordinates::new(vec![0.0, 0.0]);
        assert_eq!(j3(&origin), j3(&mirrored));
        let p = Coordinates::new(vec![5.0, -5.0]);
        let q = Coordinates::new(vec![-5.0, 5.0]);
        assert!((j3(&p) - j3(&q)).abs() < 1e-9);
    }

    #[test]
    fn test_by_name_resolves_known_functions() {
        assert!(by_name("j1").is_some());
        assert!(by_name("j5").is_some());
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn test_benchmark_swarm_runs_without_panicking() {
        let positions = vec![
            Coordinates::new(vec![0.0, 0.0]),
            Coordinates::new(vec![1.0, 1.0]),
            Coordinates::new(vec![-1.0, 2.0]),
        ];
        let mut swarm = BenchmarkSwarm::new(positions, j3);
        let mut rng = MTGenerator::new(11);
        for _ in 0..5 {
            swarm.update_luciferin();
            swarm.movement_phase(0.5, &mut rng);
        }
        assert_eq!(3, swarm.glowworms.len());
    }

    #[test]
    fn test_random_builder_respects_bounds() {
        let swarm = GSOBuilder::random(10, 2, (-5.0, 5.0), 1, j3);
        for glowworm in &swarm.glowworms {
            for i in 0..2 {
                assert!(glowworm.position[i] >= -5.0 && glowworm.position[i] <= 5.0);
            }
        }
    }
}
