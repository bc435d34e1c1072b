//! One swarm's worth of glowworms and the GSO movement loop that
//! evolves them.

use super::glowworm::Glowworm;
use super::qt::Quaternion;
use super::random::UniformGenerator;
use super::scoring::{DockingModel, ScoringFunction};
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Swarm<'a> {
    pub glowworms: Vec<Glowworm<'a>>,
    pub directory: PathBuf,
}

impl<'a> Swarm<'a> {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Swarm {
            glowworms: Vec::new(),
            directory: directory.as_ref().to_path_buf(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_glowworms(
        &mut self,
        positions: &[Vec<f64>],
        scoring: &'a dyn ScoringFunction,
        receptor: &'a DockingModel,
        ligand: &'a DockingModel,
        use_anm: bool,
        rec_num_anm: usize,
        lig_num_anm: usize,
    ) {
        for (i, position) in positions.iter().enumerate() {
            let translation = vec![position[0], position[1], position[2]];
            let rotation = Quaternion::new(position[3], position[4], position[5], position[6]);

            let mut rec_nmodes = Vec::new();
            if use_anm && rec_num_anm > 0 {
                rec_nmodes.extend_from_slice(&position[7..7 + rec_num_anm]);
            }
            let mut lig_nmodes = Vec::new();
            if use_anm && lig_num_anm > 0 {
                lig_nmodes.extend_from_slice(&position[7 + rec_num_anm..]);
            }

            let glowworm = Glowworm::new(
                i as u32, translation, rotation, rec_nmodes, lig_nmodes, scoring, receptor, ligand, use_anm,
            );
            self.glowworms.push(glowworm);
        }
    }

    pub fn update_luciferin(&mut self) {
        for glowworm in self.glowworms.iter_mut() {
            glowworm.compute_luciferin();
        }
    }

    pub fn movement_phase<R: UniformGenerator>(&mut self, rng: &mut R) {
        let mut positions: Vec<Vec<f64>> = Vec::new();
        let mut rotations: Vec<Quaternion> = Vec::new();
        let mut anm_recs: Vec<Vec<f64>> = Vec::new();
        let mut anm_ligs: Vec<Vec<f64>> = Vec::new();
        for glowworm in &self.glowworms {
            positions.push(glowworm.translation.clone());
            rotations.push(glowworm.rotation);
            anm_recs.push(glowworm.rec_nmodes.clone());
            anm_ligs.push(glowworm.lig_nmodes.clone());
        }

        let mut neighbors: Vec<Vec<u32>> = Vec::new();
        for i in 0..self.glowworms.len() {
            let mut this_neighbors: Vec<(u32, f64)> = Vec::new();
            let g1 = &self.glowworms[i];
            for (j, g2) in self.glowworms.iter().enumerate() {
                if i != j && g1.luciferin < g2.luciferin && g1.distance(g2) < g1.vision_range {
                    this_neighbors.push((g2.id, g2.luciferin));
                }
            }
            this_neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
            this_neighbors.truncate(g1.max_neighbors as usize);
            neighbors.push(this_neighbors.into_iter().map(|(id, _)| id).collect());
        }

        let luciferins: Vec<f64> = self.glowworms.iter().map(|g| g.luciferin).collect();
        for i in 0..self.glowworms.len() {
            let glowworm = &mut self.glowworms[i];
            glowworm.neighbors = neighbors[i].clone();
            glowworm.compute_probability_moving_toward_neighbor(&luciferins);
        }

        for i in 0..self.glowworms.len() {
            let glowworm = &mut self.glowworms[i];
            let neighbor_id = glowworm.select_random_neighbor(rng.next_float());
            glowworm.move_towards(
                neighbor_id,
                &positions[neighbor_id as usize],
                &rotations[neighbor_id as usize],
                &anm_recs[neighbor_id as usize],
                &anm_ligs[neighbor_id as usize],
            );
            glowworm.update_vision_range();
        }
    }

    /// Writes the per-step report in the same column layout the
    /// original tooling (and its analysis scripts) expect.
    pub fn save(&self, step: u32) -> Result<()> {
        let path = self.directory.join(format!("gso_{}.out", step));
        let mut output = File::create(path)?;
        writeln!(
            output,
            "#Coordinates  RecID  LigID  Luciferin  Neighbor's number  Vision Range  Scoring"
        )?;
        for glowworm in &self.glowworms {
            write!(
                output,
                "({:.7}, {:.7}, {:.7}, {:.7}, {:.7}, {:.7}, {:.7}",
                glowworm.translation[0],
                glowworm.translation[1],
                glowworm.translation[2],
                glowworm.rotation.w,
                glowworm.rotation.x,
                glowworm.rotation.y,
                glowworm.rotation.z
            )?;
            if glowworm.use_anm && !glowworm.rec_nmodes.is_empty() {
                for v in &glowworm.rec_nmodes {
                    write!(output, ", {:.7}", v)?;
                }
            }
            if glowworm.use_anm && !glowworm.lig_nmodes.is_empty() {
                for v in &glowworm.lig_nmodes {
                    write!(output, ", {:.7}", v)?;
                }
            }
            writeln!(
                output,
                ")    0    0   {:.8}  {} {:.3} {:.8}",
                glowworm.luciferin,
                glowworm.neighbors.len(),
                glowworm.vision_range,
                glowworm.scoring
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;
    use crate::random::MTGenerator;
    use std::collections::HashMap;

    fn model(coords: Vec<[f64; 3]>) -> DockingModel {
        DockingModel {
            atoms: vec![0; coords.len()],
            coordinates: coords,
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        }
    }

    #[test]
    fn test_add_glowworms_parses_pose_vectors() {
        let scoring = Contact;
        let receptor = model(vec![[0.0, 0.0, 0.0]]);
        let ligand = model(vec![[0.0, 0.0, 0.0]]);
        let mut swarm = Swarm::new(std::env::temp_dir());
        let positions = vec![vec![1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0]];
        swarm.add_glowworms(&positions, &scoring, &receptor, &ligand, false, 0, 0);
        assert_eq!(1, swarm.glowworms.len());
        assert_eq!(vec![1.0, 2.0, 3.0], swarm.glowworms[0].translation);
    }

    #[test]
    fn test_movement_phase_updates_neighbors() {
        let scoring = Contact;
        let receptor = model(vec![[0.0, 0.0, 0.0]]);
        let ligand = model(vec![[0.0, 0.0, 0.0]]);
        let mut swarm = Swarm::new(std::env::temp_dir());
        let positions = vec![
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            vec![0.05, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        ];
        swarm.add_glowworms(&positions, &scoring, &receptor, &ligand, false, 0, 0);
        swarm.glowworms[1].luciferin = 10.0;
        let mut rng = MTGenerator::new(1);
        swarm.update_luciferin();
        swarm.movement_phase(&mut rng);
        assert!(swarm.glowworms[0].moved || swarm.glowworms[0].neighbors.is_empty());
    }
}
