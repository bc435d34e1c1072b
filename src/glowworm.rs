//! A single glowworm: one candidate pose plus the bookkeeping the
//! Glowworm Swarm Optimization algorithm needs to move it each round
//! (luciferin, vision range, neighbor list).

use super::constants::{
    DEFAULT_NMODES_STEP, DEFAULT_ROTATION_STEP, DEFAULT_TRANSLATION_STEP, MAX_NM_EXTENT, MAX_ROTATION,
    MAX_TRANSLATION,
};
use super::qt::Quaternion;
use super::scoring::{membrane_intersection, satisfied_restraints, DockingModel, ScoringFunction};
use std::f64;

pub struct Glowworm<'a> {
    pub id: u32,
    pub translation: Vec<f64>,
    pub rotation: Quaternion,
    pub rec_nmodes: Vec<f64>,
    pub lig_nmodes: Vec<f64>,
    pub scoring_function: &'a dyn ScoringFunction,
    pub receptor: &'a DockingModel,
    pub ligand: &'a DockingModel,
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
    pub moved: bool,
    pub step: u32,
    pub use_anm: bool,
}

impl<'a> Glowworm<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        translation: Vec<f64>,
        rotation: Quaternion,
        rec_nmodes: Vec<f64>,
        lig_nmodes: Vec<f64>,
        scoring_function: &'a dyn ScoringFunction,
        receptor: &'a DockingModel,
        ligand: &'a DockingModel,
        use_anm: bool,
    ) -> Self {
        Glowworm {
            id,
            translation,
            rotation,
            rec_nmodes,
            lig_nmodes,
            scoring_function,
            receptor,
            ligand,
            rho: 0.5,
            gamma: 0.4,
            beta: 0.08,
            luciferin: 5.0,
            vision_range: 0.2,
            max_vision_range: 5.0,
            max_neighbors: 5,
            neighbors: Vec::new(),
            probabilities: Vec::new(),
            scoring: 0.0,
            moved: false,
            step: 0,
            use_anm,
        }
    }

    pub fn compute_luciferin(&mut self) {
        if self.moved || self.step == 0 {
            let mut receptor_coordinates: Vec<[f64; 3]> = self.receptor.coordinates.clone();
            let rec_num_atoms = receptor_coordinates.len();
            let mut ligand_coordinates: Vec<[f64; 3]> = self.ligand.coordinates.clone();
            let lig_num_atoms = ligand_coordinates.len();

            for (i_atom, coordinate) in ligand_coordinates.iter_mut().enumerate() {
                let rotated_coordinate = self.rotation.rotate(coordinate.to_vec());
                coordinate[0] = rotated_coordinate[0] + self.translation[0];
                coordinate[1] = rotated_coordinate[1] + self.translation[1];
                coordinate[2] = rotated_coordinate[2] + self.translation[2];
                if self.use_anm && self.ligand.num_anm > 0 {
                    for i_nm in 0usize..self.ligand.num_anm {
                        coordinate[0] += self.ligand.nmodes[i_nm * lig_num_atoms * 3 + i_atom * 3]
                            * self.lig_nmodes[i_nm];
                        coordinate[1] += self.ligand.nmodes[i_nm * lig_num_atoms * 3 + i_atom * 3 + 1]
                            * self.lig_nmodes[i_nm];
                        coordinate[2] += self.ligand.nmodes[i_nm * lig_num_atoms * 3 + i_atom * 3 + 2]
                            * self.lig_nmodes[i_nm];
                    }
                }
            }
            for (i_atom, coordinate) in receptor_coordinates.iter_mut().enumerate() {
                if self.use_anm && self.receptor.num_anm > 0 {
                    for i_nm in 0usize..self.receptor.num_anm {
                        coordinate[0] += self.receptor.nmodes[i_nm * rec_num_atoms * 3 + i_atom * 3]
                            * self.rec_nmodes[i_nm];
                        coordinate[1] += self.receptor.nmodes[i_nm * rec_num_atoms * 3 + i_atom * 3 + 1]
                            * self.rec_nmodes[i_nm];
                        coordinate[2] += self.receptor.nmodes[i_nm * rec_num_atoms * 3 + i_atom * 3 + 2]
                            * self.rec_nmodes[i_nm];
                    }
                }
            }

            let mut interface_receptor: Vec<usize> = Vec::new();
            let mut interface_ligand: Vec<usize> = Vec::new();
            let energy = self.scoring_function.energy(
                self.receptor,
                self.ligand,
                &receptor_coordinates,
                &ligand_coordinates,
                &mut interface_receptor,
                &mut interface_ligand,
            );
            let perc_receptor_restraints =
                satisfied_restraints(&interface_receptor, &self.receptor.active_restraints);
            let perc_ligand_restraints =
                satisfied_restraints(&interface_ligand, &self.ligand.active_restraints);
            let intersection = membrane_intersection(&interface_receptor, &self.receptor.membrane);
            let membrane_penalty = if intersection > 0.0 {
                crate::constants::MEMBRANE_PENALTY_SCORE * intersection
            } else {
                0.0
            };

            self.scoring = energy + perc_receptor_restraints * energy + perc_ligand_restraints * energy
                - membrane_penalty;
        }
        self.luciferin = (1.0 - self.rho) * self.luciferin + self.gamma * self.scoring;
        self.step += 1;
    }

    /// Distance used for docking neighborhoods: translation, orientation
    /// and normal-mode extents each contribute a term normalized by its
    /// own scale, combined as a weighted L2 norm.
    pub fn distance(&self, other: &Glowworm) -> f64 {
        let (x1, y1, z1) = (self.translation[0], self.translation[1], self.translation[2]);
        let (x2, y2, z2) = (other.translation[0], other.translation[1], other.translation[2]);
        let translation_term =
            ((x1 - x2).powi(2) + (y1 - y2).powi(2) + (z1 - z2).powi(2)).sqrt() / MAX_TRANSLATION;

        let rotation_term = (1.0 - self.rotation.dot(other.rotation).abs()) / MAX_ROTATION;

        let nm_diff_sq: f64 = self
            .rec_nmodes
            .iter()
            .zip(&other.rec_nmodes)
            .chain(self.lig_nmodes.iter().zip(&other.lig_nmodes))
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        let nm_term = nm_diff_sq.sqrt() / MAX_NM_EXTENT;

        (translation_term.powi(2) + rotation_term.powi(2) + nm_term.powi(2)).sqrt()
    }

    pub fn is_neighbor(&self, other: &Glowworm) -> bool {
        self.id != other.id && self.luciferin < other.luciferin && self.distance(other) < self.vision_range
    }

    pub fn update_vision_range(&mut self) {
        self.vision_range = self
            .max_vision_range
            .min((0_f64).max(
                self.vision_range + self.beta * (self.max_neighbors as i32 - self.neighbors.len() as i32) as f64,
            ));
    }

    pub fn compute_probability_moving_toward_neighbor(&mut self, luciferins: &[f64]) {
        self.probabilities = Vec::with_capacity(self.neighbors.len());
        let mut total_sum: f64 = 0.0;
        for &neighbor_id in &self.neighbors {
            let difference = luciferins[neighbor_id as usize] - self.luciferin;
            self.probabilities.push(difference);
            total_sum += difference;
        }
        for p in self.probabilities.iter_mut() {
            *p /= total_sum;
        }
    }

    pub fn select_random_neighbor(&self, random_number: f64) -> u32 {
        if self.neighbors.is_empty() {
            return self.id;
        }
        let mut sum_probabilities = 0.0;
        let mut i = 0usize;
        while sum_probabilities < random_number {
            sum_probabilities += self.probabilities[i];
            i += 1;
        }
        self.neighbors[i - 1]
    }

    pub fn move_towards(
        &mut self,
        other_id: u32,
        other_position: &[f64],
        other_rotation: &Quaternion,
        other_anm_rec: &[f64],
        other_anm_lig: &[f64],
    ) {
        self.moved = self.id != other_id;
        if self.id == other_id {
            return;
        }

        let mut delta_x = vec![
            other_position[0] - self.translation[0],
            other_position[1] - self.translation[1],
            other_position[2] - self.translation[2],
        ];
        let norm = (delta_x[0].powi(2) + delta_x[1].powi(2) + delta_x[2].powi(2)).sqrt();
        let coef = DEFAULT_TRANSLATION_STEP / norm;
        delta_x.iter_mut().for_each(|v| *v *= coef);
        self.translation[0] += delta_x[0];
        self.translation[1] += delta_x[1];
        self.translation[2] += delta_x[2];

        self.rotation = self.rotation.slerp(other_rotation, DEFAULT_ROTATION_STEP);

        if self.use_anm && self.receptor.num_anm > 0 {
            step_nmodes(&mut self.rec_nmodes, other_anm_rec, DEFAULT_NMODES_STEP);
        }
        if self.use_anm && self.ligand.num_anm > 0 {
            step_nmodes(&mut self.lig_nmodes, other_anm_lig, DEFAULT_NMODES_STEP);
        }
    }
}

fn step_nmodes(current: &mut [f64], other: &[f64], step: f64) {
    let mut delta: Vec<f64> = current.iter().zip(other).map(|(c, o)| o - c).collect();
    let norm: f64 = delta.iter().map(|d| d * d).sum::<f64>().sqrt();
    if norm < 1e-12 {
        return;
    }
    let coef = step / norm;
    for d in delta.iter_mut() {
        *d *= coef;
    }
    for (c, d) in current.iter_mut().zip(delta) {
        *c += d;
    }
}

pub fn distance(one: &Glowworm, two: &Glowworm) -> f64 {
    one.distance(two)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;
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
    fn test_is_neighbor_respects_vision_range_and_luciferin() {
        let scoring = Contact;
        let receptor = model(vec![[0.0, 0.0, 0.0]]);
        let ligand = model(vec![[0.0, 0.0, 0.0]]);
        let mut a = Glowworm::new(
            0,
            vec![0.0, 0.0, 0.0],
            Quaternion::default(),
            Vec::new(),
            Vec::new(),
            &scoring,
            &receptor,
            &ligand,
            false,
        );
        let mut b = Glowworm::new(
            1,
            vec![0.1, 0.0, 0.0],
            Quaternion::default(),
            Vec::new(),
            Vec::new(),
            &scoring,
            &receptor,
            &ligand,
            false,
        );
        a.luciferin = 1.0;
        b.luciferin = 5.0;
        assert!(a.is_neighbor(&b));
        b.luciferin = 0.0;
        assert!(!a.is_neighbor(&b));
    }

    #[test]
    fn test_update_vision_range_is_bounded() {
        let scoring = Contact;
        let receptor = model(vec![[0.0, 0.0, 0.0]]);
        let ligand = model(vec![[0.0, 0.0, 0.0]]);
        let mut g = Glowworm::new(
            0,
            vec![0.0, 0.0, 0.0],
            Quaternion::default(),
            Vec::new(),
            Vec::new(),
            &scoring,
            &receptor,
            &ligand,
            false,
        );
        g.vision_range = -10.0;
        g.update_vision_range();
        assert!(g.vision_range >= 0.0);
    }
}
