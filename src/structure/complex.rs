//! `Complex`: a parsed receptor or ligand, possibly built from several
//! structure files sharing the same topology (an ensemble of
//! conformers). Mirrors the original Python `Complex` model, which
//! keeps one reference topology (chains/residues/atoms) plus one
//! coordinate matrix per input file so that swarms can be generated
//! against any conformer without re-parsing.

use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;
use crate::vector3::Vector3;

#[derive(Debug, Clone)]
pub struct Complex {
    pub chains: Vec<Chain>,
    /// One row per structure file, one column per atom; `[x, y, z]`.
    pub atom_coordinates: Vec<Vec<[f64; 3]>>,
    pub structure_file_names: Vec<String>,
    active_conformer: usize,
}

impl Complex {
    pub fn new(chains: Vec<Chain>, structure_file_names: Vec<String>) -> Self {
        let coords: Vec<[f64; 3]> = chains
            .iter()
            .flat_map(|c| c.atoms())
            .map(|a| [a.x, a.y, a.z])
            .collect();
        let atom_coordinates = vec![coords; structure_file_names.len().max(1)];
        Complex {
            chains,
            atom_coordinates,
            structure_file_names,
            active_conformer: 0,
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.chains.iter().flat_map(|c| c.atoms())
    }

    pub fn residues(&self) -> impl Iterator<Item = &Residue> {
        self.chains.iter().flat_map(|c| c.residues.iter())
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms().count()
    }

    pub fn num_structures(&self) -> usize {
        self.atom_coordinates.len()
    }

    pub fn set_active_conformer(&mut self, index: usize) {
        assert!(index < self.atom_coordinates.len());
        self.active_conformer = index;
    }

    /// The coordinates of the currently active conformer.
    pub fn representative(&self) -> &[[f64; 3]] {
        &self.atom_coordinates[self.active_conformer]
    }

    pub fn center_of_coordinates(&self) -> Vector3 {
        let coords = self.representative();
        let n = coords.len() as f64;
        let mut sum = Vector3::zero();
        for c in coords {
            sum = sum + Vector3::new(c[0], c[1], c[2]);
        }
        sum * (1.0 / n)
    }

    /// Translates every conformer's coordinates (and the reference atom
    /// positions) so the active conformer's centroid sits at the
    /// origin. Returns the translation that was applied.
    pub fn move_to_origin(&mut self) -> Vector3 {
        let center = self.center_of_coordinates();
        let translation = Vector3::new(-center.x, -center.y, -center.z);
        for conformer in self.atom_coordinates.iter_mut() {
            for c in conformer.iter_mut() {
                c[0] += translation.x;
                c[1] += translation.y;
                c[2] += translation.z;
            }
        }
        let mut idx = 0;
        for chain in self.chains.iter_mut() {
            for residue in chain.residues.iter_mut() {
                for atom in residue.atoms.iter_mut() {
                    atom.x += translation.x;
                    atom.y += translation.y;
                    atom.z += translation.z;
                    idx += 1;
                }
            }
        }
        debug_assert_eq!(idx, self.num_atoms());
        translation
    }

    pub fn coordinates_as_vectors(&self) -> Vec<Vector3> {
        self.representative()
            .iter()
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_complex() -> Complex {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 1.0, 0.0, 0.0, 1.0, 0.0, None).unwrap();
        let atom2 = Atom::new(2, "CA", "", "A", "ALA", 2, "", -1.0, 0.0, 0.0, 1.0, 0.0, None).unwrap();
        let residue1 = Residue::new("ALA", 1, "", vec![atom1]);
        let residue2 = Residue::new("ALA", 2, "", vec![atom2]);
        let chain = Chain::new("A", vec![residue1, residue2]);
        Complex::new(vec![chain], vec!["test.pdb".to_string()])
    }

    #[test]
    fn test_center_of_coordinates() {
        let complex = dummy_complex();
        let center = complex.center_of_coordinates();
        assert!(center.norm() < 1e-9);
    }

    #[test]
    fn test_move_to_origin_recenters() {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 5.0, 5.0, 5.0, 1.0, 0.0, None).unwrap();
        let atom2 = Atom::new(2, "CA", "", "A", "ALA", 2, "", 7.0, 5.0, 5.0, 1.0, 0.0, None).unwrap();
        let residue1 = Residue::new("ALA", 1, "", vec![atom1]);
        let residue2 = Residue::new("ALA", 2, "", vec![atom2]);
        let chain = Chain::new("A", vec![residue1, residue2]);
        let mut complex = Complex::new(vec![chain], vec!["test.pdb".to_string()]);
        complex.move_to_origin();
        assert!(complex.center_of_coordinates().norm() < 1e-6);
    }

    #[test]
    fn test_num_structures() {
        let complex = dummy_complex();
        assert_eq!(1, complex.num_structures());
    }
}
