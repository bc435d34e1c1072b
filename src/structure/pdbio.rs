//! Bridges `pdbtbx`'s PDB/mmCIF object model onto this crate's own
//! `Atom`/`Residue`/`Chain`/`Complex` types. Only the fields lightdock
//! actually needs are carried over; element assignment goes back through
//! our own name-based inference (`Atom::new`) rather than `pdbtbx`'s,
//! so the `AtomError` contract stays identical regardless of which
//! parser produced the coordinates.

use super::atom::Atom;
use super::chain::Chain;
use super::complex::Complex;
use super::residue::Residue;
use crate::error::{LightDockError, Result};
use std::path::Path;

/// Parses a single PDB file into a `Complex` with one conformer.
pub fn read_complex<P: AsRef<Path>>(path: P) -> Result<Complex> {
    let path_ref = path.as_ref();
    let (pdb, errors) = pdbtbx::open(path_ref, pdbtbx::StrictnessLevel::Medium).map_err(|e| {
        LightDockError::PdbParsing(format!("failed to parse {}: {:?}", path_ref.display(), e))
    })?;
    for err in &errors {
        log::warn!("{}: {}", path_ref.display(), err);
    }

    let mut chains = Vec::new();
    for pdb_chain in pdb.chains() {
        let chain_id = pdb_chain.id().to_string();
        let mut residues = Vec::new();
        for pdb_residue in pdb_chain.residues() {
            let (res_number, insertion_code) = pdb_residue.id();
            let insertion = insertion_code.unwrap_or("").to_string();
            let conformer = match pdb_residue.conformers().next() {
                Some(c) => c,
                None => continue,
            };
            let res_name = conformer.name().to_string();
            let mut atoms = Vec::new();
            for pdb_atom in conformer.atoms() {
                let (x, y, z) = pdb_atom.pos();
                let atom = Atom::new(
                    pdb_atom.serial_number() as i64,
                    pdb_atom.name(),
                    "",
                    &chain_id,
                    &res_name,
                    res_number,
                    &insertion,
                    x,
                    y,
                    z,
                    pdb_atom.occupancy(),
                    pdb_atom.b_factor(),
                    pdb_atom.element().map(|e| e.symbol()),
                )?;
                atoms.push(atom);
            }
            if !atoms.is_empty() {
                residues.push(Residue::new(&res_name, res_number, &insertion, atoms));
            }
        }
        chains.push(Chain::new(&chain_id, residues));
    }

    if chains.iter().all(|c| c.residues.is_empty()) {
        return Err(LightDockError::PdbParsing(format!(
            "no atoms found in {}",
            path_ref.display()
        )));
    }

    Ok(Complex::new(
        chains,
        vec![path_ref.display().to_string()],
    ))
}

/// Parses several structure files that are expected to share the same
/// topology (an ensemble of conformers), folding each file's
/// coordinates into one `Complex`'s `atom_coordinates` matrix.
pub fn read_complex_ensemble<P: AsRef<Path>>(paths: &[P]) -> Result<Complex> {
    if paths.is_empty() {
        return Err(LightDockError::PdbParsing(
            "no structure files given".to_string(),
        ));
    }
    let mut complex = read_complex(&paths[0])?;
    let reference_len = complex.num_atoms();

    for path in &paths[1..] {
        let other = read_complex(path)?;
        if other.num_atoms() != reference_len {
            return Err(LightDockError::PdbParsing(format!(
                "{} has {} atoms, expected {} to match the first structure",
                path.as_ref().display(),
                other.num_atoms(),
                reference_len
            )));
        }
        complex.atom_coordinates.push(other.representative().to_vec());
        complex
            .structure_file_names
            .push(path.as_ref().display().to_string());
    }
    Ok(complex)
}
