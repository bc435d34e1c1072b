//! Protein-DNA scoring stub: exercises the `ModelAdapter`/
//! `ScoringFunction` registry end to end with a potential that always
//! reports zero energy, a placeholder for a real DNA-aware potential.

use crate::error::Result;
use crate::scoring::{residue_id, DockingModel, ModelAdapter, ScoringFunction};
use crate::structure::Complex;
use std::collections::HashMap;

pub struct DnaAdapter;

impl ModelAdapter for DnaAdapter {
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
                    let atom_type = format!("{}{}", residue.name.trim(), atom.name.trim());
                    if atom_type == "MMBBJ" {
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

pub struct Dna;

impl ScoringFunction for Dna {
    fn energy(
        &self,
        _receptor: &DockingModel,
        _ligand: &DockingModel,
        receptor_coordinates: &[[f64; 3]],
        ligand_coordinates: &[[f64; 3]],
        interface_receptor: &mut Vec<usize>,
        interface_ligand: &mut Vec<usize>,
    ) -> f64 {
        *interface_receptor = vec![0; receptor_coordinates.len()];
        *interface_ligand = vec![0; ligand_coordinates.len()];
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_is_always_zero() {
        let scoring = Dna;
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
            coordinates: vec![[1.0, 0.0, 0.0]],
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: Vec::new(),
            num_anm: 0,
        };
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
}
