//! Loading of precomputed ANM (anisotropic network model) normal-mode
//! files, `.npy` arrays of `num_atoms * 3 * num_modes` doubles produced
//! upstream by an elastic-network calculation. Kept out of
//! `structure/` since it has nothing to do with PDB parsing — it only
//! ever feeds [`crate::scoring::ModelAdapter::build_docking_model`]'s
//! `nmodes` slice.

use crate::error::{LightDockError, Result};
use npyz::NpyFile;
use std::path::Path;

/// Reads a normal-modes `.npy` file and checks it has the shape a
/// [`crate::scoring::DockingModel`] expects: `num_atoms * 3 * num_modes`
/// flattened doubles.
pub fn load_nmodes<P: AsRef<Path>>(path: P, num_atoms: usize, num_modes: usize) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        LightDockError::Other(format!("cannot read ANM file {:?}: {}", path, e))
    })?;
    let reader = NpyFile::new(&bytes[..])
        .map_err(|e| LightDockError::Other(format!("malformed ANM file {:?}: {}", path, e)))?;
    let modes: Vec<f64> = reader
        .into_vec::<f64>()
        .map_err(|e| LightDockError::Other(format!("cannot decode ANM file {:?}: {}", path, e)))?;
    let expected = num_atoms * 3 * num_modes;
    if modes.len() != expected {
        return Err(LightDockError::Other(format!(
            "ANM file {:?} has {} values, expected {} ({}x3x{})",
            path,
            modes.len(),
            expected,
            num_atoms,
            num_modes
        )));
    }
    Ok(modes)
}
