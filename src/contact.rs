//! A simplified pairwise heavy-atom contact potential. Every receptor/ligand heavy-atom pair
//! within `CONTACT_CUTOFF` contributes a fixed attractive increment,
//! giving the GSO engine a cheap, always-available scoring function
//! that doesn't depend on an external potential data file like DFIRE.

use crate::constants::{INTERFACE_CUTOFF, MEMBRANE_PENALTY_SCORE};
use crate::error::Result;
use crate::scoring::{
    membrane_intersection, residue_id, satisfied_restraints, DockingModel, ModelAdapter,
    ScoringFunction,
};
use crate::structure::Complex;
use std::collections::HashMap;

const CONTACT_CUTOFF2: f64 = 8.0 * 8.0;
const CONTACT_ENERGY: f64 = -1.0;

pub struct ContactAdapter;

impl ModelAdapter for ContactAdapter {
    fn build_docking_model(
        &self,
        complex: &Complex,
        active_restraints: &[String],
        passive_restraints: &[String],
        nmodes: &[f64],
        num_anm: usize,
    ) -> Result<DockingModel> {
        let mut model = DockingModel {
            atoms: Vec::new(),
            coordinates: Vec::new(),
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: nmodes.to_owned(),
            num_anm,
        };

        let mut atom_index = 0usize;
        for chain in &complex.chains {
            for residue in &chain.residues {
                let res_id = residue_id(&chain.id, &residue.name, residue.number, &residue.insertion);
                for atom in &residue.atoms {
                    if atom.is_hydrogen() {
                        continue;
                    }
                    if residue.name.trim() == "MMB" && atom.name.trim() == "BJ" {
                        model.membrane.push(atom_index);
                    }
                    if active_restraints.contains(&res_id) {
                        model.active_restraints.entry(res_id.clone()).or_default().push(atom_index);
                    }
                    if passive_restraints.contains(&res_id) {
                        model.passive_restraints.entry(res_id.clone()).or_default().push(atom_index);
                    }
                    model.atoms.push(0);
                    model.coordinates.push([atom.x, atom.y, atom.z]);
                    atom_index += 1;
                }
            }
        }
        Ok(model)
    }
}

#[derive(Default)]
pub struct Contact;

impl ScoringFunction for Contact {
    fn energy(
        &self,
        receptor: &DockingModel,
        _ligand: &DockingModel,
        receptor_coordinates: &[[f64; 3]],
        ligand_coordinates: &[[f64; 3]],
        interface_receptor: &mut Vec<usize>,
        interface_ligand: &mut Vec<usize>,
    ) -> f64 {
        *interface_receptor = vec![0; receptor_coordinates.len()];
        *interface_ligand = vec![0; ligand_coordinates.len()];

        let mut score = 0.0;
        for (i, ra) in receptor_coordinates.iter().enumerate() {
            for (j, la) in ligand_coordinates.iter().enumerate() {
                let dist2 = (ra[0] - la[0]).powi(2) + (ra[1] - la[1]).powi(2) + (ra[2] - la[2]).powi(2);
                if dist2 <= CONTACT_CUTOFF2 {
                    score += CONTACT_ENERGY;
                    if dist2.sqrt() <= INTERFACE_CUTOFF {
                        interface_receptor[i] = 1;
                        interface_ligand[j] = 1;
                    }
                }
            }
        }

        let perc_receptor = satisfied_restraints(interface_receptor, &receptor.active_restraints);
        let intersection = membrane_intersection(interface_receptor, &receptor.membrane);
        let membrane_penalty = if intersection > 0.0 {
            MEMBRANE_PENALTY_SCORE * intersection
        } else {
            0.0
        };

        score + perc_receptor * score - membrane_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_contacts_scores_zero() {
        let receptor = DockingModel {
            atoms: vec![0],
            coordinates: vec![[0.0, 0.0, 0.0]],
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        };
        let ligand = DockingModel {
            atoms: vec![0],
            coordinates: vec![[100.0, 0.0, 0.0]],
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        };
        let scoring = Contact;
        let mut ir = Vec::new();
        let mut il = Vec::new();
        let energy = scoring.energy(
            &receptor,
            &ligand,
            &receptor.coordinates,
            &ligand.coordinates,
            &mut ir,
            &mut il,
        );
        assert_eq!(0.0, energy);
    }

    #[test]
    fn test_close_contact_is_attractive() {
        let receptor = DockingModel {
            atoms: vec![0],
            coordinates: vec![[0.0, 0.0, 0.0]],
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        };
        let ligand = DockingModel {
            atoms: vec![0],
            coordinates: vec![[3.0, 0.0, 0.0]],
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        };
        let scoring = Contact;
        let mut ir = Vec::new();
        let mut il = Vec::new();
        let energy = scoring.energy(
            &receptor,
            &ligand,
            &receptor.coordinates,
            &ligand.coordinates,
            &mut ir,
            &mut il,
        );
        assert_eq!(CONTACT_ENERGY, energy);
        assert_eq!(vec![1], ir);
        assert_eq!(vec![1], il);
    }
}
