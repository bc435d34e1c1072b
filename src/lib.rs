//! lightdock: a macromolecular docking setup pipeline and Glowworm
//! Swarm Optimization engine.

pub mod benchmark;
pub mod constants;
pub mod contact;
pub mod dfire;
pub mod dna;
pub mod ellipsoid;
pub mod error;
pub mod glowworm;
pub mod membrane;
pub mod nmodes;
pub mod pose;
pub mod qt;
pub mod random;
pub mod restraints;
pub mod restraints_file;
pub mod scoring;
pub mod setup;
pub mod structure;
pub mod swarm;
pub mod vector3;

pub mod coordinates;

use crate::error::Result;
use crate::scoring::{DockingModel, ScoringFunction};
use random::MTGenerator;
use swarm::Swarm;

/// Drives one swarm's worth of glowworms through `steps` GSO rounds,
/// writing a `gso_<step>.out` report every `report_frequency` steps
/// (and always on the first step, matching the original tooling).
pub struct Gso<'a> {
    pub swarm: Swarm<'a>,
    pub rng: MTGenerator,
    pub report_frequency: u32,
}

impl<'a> Gso<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        positions: &[Vec<f64>],
        seed: u64,
        scoring: &'a dyn ScoringFunction,
        receptor: &'a DockingModel,
        ligand: &'a DockingModel,
        use_anm: bool,
        rec_num_anm: usize,
        lig_num_anm: usize,
        swarm_directory: impl AsRef<std::path::Path>,
    ) -> Self {
        let mut swarm = Swarm::new(swarm_directory);
        swarm.add_glowworms(positions, scoring, receptor, ligand, use_anm, rec_num_anm, lig_num_anm);
        Gso {
            swarm,
            rng: MTGenerator::new(seed),
            report_frequency: 10,
        }
    }

    pub fn run(&mut self, steps: u32) -> Result<()> {
        for step in 1..=steps {
            log::info!("Step {}", step);
            self.swarm.update_luciferin();
            self.swarm.movement_phase(&mut self.rng);
            if step % self.report_frequency == 0 || step == 1 {
                self.swarm.save(step)?;
            }
        }
        Ok(())
    }
}
