//! Membrane-restrained setup: Z-axis layer detection for coarse-grained
//! membrane beads (residue name `MMB`, atom `BJ`) and filtering of
//! swarm centers against the detected layer(s).

use crate::error::{LightDockError, Result};
use crate::structure::Complex;
use crate::vector3::Vector3;

const GAP_CUTOFF: f64 = 10.0;

/// Splits membrane bead Z coordinates into layers separated by gaps
/// larger than `GAP_CUTOFF`, the same heuristic the original pipeline
/// used to tell a two-leaflet membrane from a single modeled layer.
fn split_into_layers(mut z_coordinates: Vec<f64>) -> Vec<Vec<f64>> {
    z_coordinates.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut layers: Vec<Vec<f64>> = Vec::new();
    let mut current: Vec<f64> = Vec::new();
    for z in z_coordinates {
        if let Some(&last) = current.last() {
            if z - last > GAP_CUTOFF {
                layers.push(std::mem::take(&mut current));
            }
        }
        current.push(z);
    }
    if !current.is_empty() {
        layers.push(current);
    }
    layers
}

pub struct MembraneLayers {
    pub layers: Vec<Vec<f64>>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl MembraneLayers {
    pub fn bottom_layer(&self) -> &[f64] {
        self.layers.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The sorted-by-Z-order topmost layer.
    pub fn upper_layer(&self) -> &[f64] {
        self.layers.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The layer with the highest mean Z, which is what "upper" means
    /// for a non-transmembrane receptor: there, layers aren't
    /// necessarily ordered bottom-to-top by index, only by content.
    fn layer_with_highest_mean_z(&self) -> &[f64] {
        self.layers
            .iter()
            .max_by(|a, b| mean(a).partial_cmp(&mean(b)).unwrap())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Estimates the membrane layer structure from bead Z coordinates.
pub fn estimate_membrane(membrane_bead_z: Vec<f64>) -> MembraneLayers {
    MembraneLayers {
        layers: split_into_layers(membrane_bead_z),
    }
}

/// Extracts the Z coordinates of membrane beads (`MMB` residues' `BJ`
/// atom) from a receptor, in its original, pre-recentering frame.
pub fn membrane_bead_z_coordinates(receptor: &Complex) -> Vec<f64> {
    receptor
        .residues()
        .filter(|r| r.name.trim() == "MMB")
        .filter_map(|r| r.get_atom("BJ"))
        .map(|a| a.z)
        .collect()
}

/// Keeps only swarm centers compatible with the detected membrane.
///
/// `translation` is the vector applied to move the receptor to the
/// origin, so it is added to every raw bead Z coordinate-derived bound
/// before comparing against `swarm_centers`, which already live in the
/// recentered frame.
///
/// If `is_transmembrane`, the membrane must resolve to exactly two
/// layers (bottom and upper leaflet); swarm centers are kept only
/// between the two leaflets. Otherwise any number of layers is legal:
/// the layer with the highest mean Z is treated as the side facing
/// solvent, and swarm centers are kept at or above it.
pub fn apply_membrane(
    swarm_centers: &[Vector3],
    membrane_bead_z: Vec<f64>,
    translation: Vector3,
    is_transmembrane: bool,
) -> Result<Vec<Vector3>> {
    let estimate = estimate_membrane(membrane_bead_z);
    let tz = translation.z;

    if is_transmembrane {
        if estimate.layers.len() != 2 {
            return Err(LightDockError::MembraneSetup(format!(
                "transmembrane receptor requires exactly two membrane layers, found {}",
                estimate.layers.len()
            )));
        }
        let bottom_bound = estimate.bottom_layer().iter().cloned().fold(f64::MIN, f64::max) + tz;
        let upper_bound = estimate.upper_layer().iter().cloned().fold(f64::MAX, f64::min) + tz;
        Ok(swarm_centers
            .iter()
            .filter(|c| c.z >= bottom_bound && c.z <= upper_bound)
            .cloned()
            .collect())
    } else {
        let upper_layer = estimate.layer_with_highest_mean_z();
        let upper_bound = upper_layer.iter().cloned().fold(f64::MIN, f64::max) + tz;
        Ok(swarm_centers
            .iter()
            .filter(|c| c.z >= upper_bound)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layer_estimate() {
        let z = vec![0.0, 1.0, 2.0, 3.0];
        let estimate = estimate_membrane(z);
        assert_eq!(1, estimate.layers.len());
    }

    #[test]
    fn test_two_layers_detected_by_gap() {
        let z = vec![0.0, 1.0, 2.0, 40.0, 41.0, 42.0];
        let estimate = estimate_membrane(z);
        assert_eq!(2, estimate.layers.len());
        assert_eq!(&[40.0, 41.0, 42.0], estimate.upper_layer());
        assert_eq!(&[0.0, 1.0, 2.0], estimate.bottom_layer());
    }

    #[test]
    fn test_apply_membrane_transmembrane_requires_two_layers() {
        let centers = vec![Vector3::new(0.0, 0.0, 5.0)];
        let result = apply_membrane(&centers, vec![0.0, 1.0, 2.0], Vector3::zero(), true);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_membrane_transmembrane_keeps_between_leaflets() {
        let centers = vec![
            Vector3::new(0.0, 0.0, -10.0),
            Vector3::new(0.0, 0.0, 20.0),
            Vector3::new(0.0, 0.0, 50.0),
        ];
        let z = vec![0.0, 1.0, 2.0, 40.0, 41.0, 42.0];
        let result = apply_membrane(&centers, z, Vector3::zero(), true).unwrap();
        assert_eq!(vec![Vector3::new(0.0, 0.0, 20.0)], result);
    }

    #[test]
    fn test_apply_membrane_non_transmembrane_single_layer_keeps_above() {
        let centers = vec![
            Vector3::new(0.0, 0.0, -10.0),
            Vector3::new(0.0, 0.0, 50.0),
        ];
        let z = vec![0.0, 1.0, 2.0];
        let result = apply_membrane(&centers, z, Vector3::zero(), false).unwrap();
        assert_eq!(vec![Vector3::new(0.0, 0.0, 50.0)], result);
    }

    #[test]
    fn test_apply_membrane_non_transmembrane_uses_highest_mean_layer() {
        let centers = vec![
            Vector3::new(0.0, 0.0, 15.0),
            Vector3::new(0.0, 0.0, 50.0),
        ];
        let z = vec![0.0, 1.0, 2.0, 40.0, 41.0, 42.0];
        let result = apply_membrane(&centers, z, Vector3::zero(), false).unwrap();
        assert_eq!(vec![Vector3::new(0.0, 0.0, 50.0)], result);
    }

    #[test]
    fn test_apply_membrane_respects_translation() {
        let centers = vec![Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 45.0)];
        let z = vec![0.0, 1.0, 2.0];
        let translation = Vector3::new(0.0, 0.0, -40.0);
        let result = apply_membrane(&centers, z, translation, false).unwrap();
        assert_eq!(vec![Vector3::new(0.0, 0.0, 45.0)], result);
    }
}
