//! Scoring-function plugin surface. `ModelAdapter` turns
//! a parsed [`crate::structure::Complex`] plus restraint residue ids
//! into the flat, index-based [`DockingModel`] a scoring function
//! actually evaluates against; `ScoringFunction` evaluates one pose.
//! The two traits used to be conflated into one `Score` trait; they're
//! split here because different potentials want different atom typings
//! from the same structure (DFIRE's 168-atom-type table vs. a plain
//! heavy-atom contact count), while every potential shares the same
//! receptor/ligand coordinate-transform and restraint/membrane bias
//! machinery in `glowworm.rs`.

use crate::error::{LightDockError, Result};
use crate::structure::Complex;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub struct DockingModel {
    pub atoms: Vec<usize>,
    pub coordinates: Vec<[f64; 3]>,
    pub membrane: Vec<usize>,
    pub active_restraints: HashMap<String, Vec<usize>>,
    pub passive_restraints: HashMap<String, Vec<usize>>,
    pub nmodes: Vec<f64>,
    pub num_anm: usize,
}

/// Builds the per-potential [`DockingModel`] view of a parsed structure.
pub trait ModelAdapter {
    fn build_docking_model(
        &self,
        complex: &Complex,
        active_restraints: &[String],
        passive_restraints: &[String],
        nmodes: &[f64],
        num_anm: usize,
    ) -> Result<DockingModel>;
}

/// Evaluates one receptor/ligand pose. Implementors receive already
/// posed (rotated, translated, ANM-extended) coordinate arrays and
/// must populate `interface_receptor`/`interface_ligand` with 1 for
/// every atom within the interface cutoff of the other molecule, since
/// `Glowworm::compute_luciferin` biases the returned energy by how
/// many restraints fall on the interface it reports.
pub trait ScoringFunction {
    #[allow(clippy::too_many_arguments)]
    fn energy(
        &self,
        receptor: &DockingModel,
        ligand: &DockingModel,
        receptor_coordinates: &[[f64; 3]],
        ligand_coordinates: &[[f64; 3]],
        interface_receptor: &mut Vec<usize>,
        interface_ligand: &mut Vec<usize>,
    ) -> f64;
}

/// Builds the atom-id string a `DockingModel` uses to match restraint
/// residue identifiers: `<chain>.<residue name>.<residue number>[icode]`.
pub fn residue_id(chain_id: &str, residue_name: &str, residue_number: i64, insertion: &str) -> String {
    let mut id = format!("{}.{}.{}", chain_id, residue_name.trim(), residue_number);
    id.push_str(insertion);
    id
}

pub fn satisfied_restraints(interface: &[usize], restraints: &HashMap<String, Vec<usize>>) -> f64 {
    if restraints.is_empty() {
        return 0.0;
    }
    let mut num_residues = 0;
    for atom_indexes in restraints.values() {
        if atom_indexes.iter().any(|&i| interface[i] == 1) {
            num_residues += 1;
        }
    }
    num_residues as f64 / restraints.len() as f64
}

pub fn membrane_intersection(interface: &[usize], membrane: &[usize]) -> f64 {
    if membrane.is_empty() {
        return 0.0;
    }
    let num_beads: usize = membrane.iter().map(|&i| interface[i]).sum();
    num_beads as f64 / membrane.len() as f64
}

pub struct Plugin {
    pub adapter: fn() -> Box<dyn ModelAdapter>,
    pub scoring: fn() -> Result<Box<dyn ScoringFunction>>,
}

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, Plugin> = {
        let mut m: HashMap<&'static str, Plugin> = HashMap::new();
        m.insert(
            "dfire",
            Plugin {
                adapter: || Box::new(crate::dfire::DfireAdapter),
                scoring: || crate::dfire::Dfire::from_data_file().map(|d| Box::new(d) as Box<dyn ScoringFunction>),
            },
        );
        m.insert(
            "dna",
            Plugin {
                adapter: || Box::new(crate::dna::DnaAdapter),
                scoring: || Ok(Box::new(crate::dna::Dna) as Box<dyn ScoringFunction>),
            },
        );
        m.insert(
            "contact",
            Plugin {
                adapter: || Box::new(crate::contact::ContactAdapter),
                scoring: || Ok(Box::new(crate::contact::Contact::default()) as Box<dyn ScoringFunction>),
            },
        );
        m
    };
}

/// Looks up a registered scoring function by name.
pub fn lookup(name: &str) -> Result<&'static Plugin> {
    REGISTRY
        .get(name)
        .ok_or_else(|| LightDockError::Other(format!("unknown scoring function '{}'", name)))
}

pub fn available_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
