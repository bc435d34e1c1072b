//! The setup pipeline: parses receptor and ligand, recenters them at
//! the origin, fits the ligand's minimum-volume ellipsoid, samples
//! candidate swarm centers over the receptor's heavy-atom surface,
//! clusters them down to the requested number of swarms, filters by
//! restraints and membrane, and populates each surviving swarm with
//! initial poses.

use crate::constants::{Defaults, DEFAULT_SURFACE_DENSITY};
use crate::ellipsoid::minimum_volume_ellipsoid;
use crate::error::{LightDockError, Result};
use crate::membrane;
use crate::pose::{self, OrientationStrategy};
use crate::random::{MTGenerator, NormalGenerator};
use crate::restraints;
use crate::restraints_file::{self, ParsedRestraints};
use crate::structure::{pdbio, Complex, Residue};
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

/// Samples points on a sphere of `radius` centered at `center`, spread
/// via a golden-angle spiral so `n` points cover the surface evenly.
fn golden_angle_sphere_point(center: Vector3, radius: f64, k: usize, n: usize) -> Vector3 {
    let theta = (k as f64) * 2.399963229728653;
    let z = if n > 1 { 1.0 - 2.0 * (k as f64) / ((n - 1) as f64) } else { 0.0 };
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vector3::new(center.x + radius * r * theta.cos(), center.y + radius * r * theta.sin(), center.z + radius * z)
}

/// Samples the receptor surface by placing `density · 4π r²` points on
/// a sphere of `radius` around every heavy atom, then discarding any
/// point that falls inside another atom's sphere — leaving the outer
/// envelope the ligand can approach without burying itself in the
/// receptor.
fn sample_receptor_surface(receptor_heavy_atoms: &[Vector3], radius: f64, density: f64) -> Vec<Vector3> {
    let n_points_per_atom = (density * 4.0 * PI * radius * radius).round().max(1.0) as usize;
    let mut envelope = Vec::new();
    for (i, &center) in receptor_heavy_atoms.iter().enumerate() {
        for k in 0..n_points_per_atom {
            let point = golden_angle_sphere_point(center, radius, k, n_points_per_atom);
            let inside_another = receptor_heavy_atoms
                .iter()
                .enumerate()
                .any(|(j, &other)| j != i && point.distance(&other) < radius);
            if !inside_another {
                envelope.push(point);
            }
        }
    }
    envelope
}

/// Clusters sampled surface points into exactly `num_swarms` centers
/// using Lloyd's k-means algorithm seeded from evenly spaced samples.
fn cluster_into_swarms(points: &[Vector3], num_swarms: usize, max_iterations: usize) -> Vec<Vector3> {
    if points.is_empty() || num_swarms == 0 {
        return Vec::new();
    }
    let num_swarms = num_swarms.min(points.len());
    let stride = points.len() / num_swarms;
    let mut centers: Vec<Vector3> = (0..num_swarms).map(|i| points[i * stride]).collect();

    for _ in 0..max_iterations {
        let mut sums = vec![Vector3::zero(); num_swarms];
        let mut counts = vec![0usize; num_swarms];
        for &p in points {
            let mut best = 0;
            let mut best_dist = f64::MAX;
            for (i, c) in centers.iter().enumerate() {
                let d = p.distance(c);
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            sums[best] = sums[best] + p;
            counts[best] += 1;
        }
        let mut moved = 0.0;
        for i in 0..num_swarms {
            if counts[i] == 0 {
                continue;
            }
            let new_center = sums[i] * (1.0 / counts[i] as f64);
            moved += new_center.distance(&centers[i]);
            centers[i] = new_center;
        }
        if moved < 1e-6 {
            break;
        }
    }
    centers
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwarmManifestEntry {
    pub id: usize,
    pub center: [f64; 3],
    pub radius: f64,
    pub num_poses: usize,
    pub positions_file: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetupManifest {
    pub receptor_file: String,
    pub ligand_file: String,
    pub seed: u64,
    pub use_anm: bool,
    pub rec_num_anm: usize,
    pub lig_num_anm: usize,
    pub swarms: Vec<SwarmManifestEntry>,
    pub warnings: Vec<String>,
}

pub struct SetupOptions {
    pub num_swarms: usize,
    pub num_poses_per_swarm: usize,
    pub swarm_radius: f64,
    pub surface_density: f64,
    pub seed: u64,
    pub use_anm: bool,
    pub rec_num_anm: usize,
    pub lig_num_anm: usize,
    /// Optional restraint file (`chain.res.num[ins]` tokens per partner).
    pub restraints_file: Option<PathBuf>,
    /// Receptor carries an explicit membrane (any number of layers).
    pub use_membrane: bool,
    /// Receptor is transmembrane: the membrane must resolve to exactly
    /// two layers, and swarms are kept between them rather than above.
    pub is_transmembrane: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        let defaults = Defaults::default();
        SetupOptions {
            num_swarms: defaults.num_swarms,
            num_poses_per_swarm: defaults.num_poses_per_swarm,
            swarm_radius: defaults.swarm_radius,
            surface_density: DEFAULT_SURFACE_DENSITY,
            seed: defaults.seed,
            use_anm: false,
            rec_num_anm: 0,
            lig_num_anm: 0,
            restraints_file: None,
            use_membrane: false,
            is_transmembrane: false,
        }
    }
}

fn resolve_restraints(
    parsed: &ParsedRestraints,
    receptor: &Complex,
    ligand: &Complex,
) -> Result<(Vec<Residue>, Vec<Residue>, Vec<Residue>, Vec<Residue>)> {
    let receptor_active = restraints_file::resolve_set(receptor, &parsed.receptor.active)?;
    let receptor_passive = restraints_file::resolve_set(receptor, &parsed.receptor.passive)?;
    let receptor_blocked = restraints_file::resolve_set(receptor, &parsed.receptor.blocked)?;
    let mut ligand_restraints = restraints_file::resolve_set(ligand, &parsed.ligand.active)?;
    ligand_restraints.extend(restraints_file::resolve_set(ligand, &parsed.ligand.passive)?);
    Ok((receptor_active, receptor_passive, receptor_blocked, ligand_restraints))
}

fn residue_position(residue: &Residue) -> Vector3 {
    let atom = residue.get_calpha().or_else(|| residue.get_atom("P")).expect("restraint residue must carry a CA or P atom");
    Vector3::new(atom.x, atom.y, atom.z)
}

/// Runs the full setup pipeline and writes one positions file per
/// surviving swarm plus a `setup.json` manifest under `output_dir`.
pub fn run_setup<P: AsRef<Path>>(
    receptor_path: P,
    ligand_path: P,
    output_dir: P,
    options: &SetupOptions,
) -> Result<SetupManifest> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let receptor = pdbio::read_complex(&receptor_path)?;
    let ligand = pdbio::read_complex(&ligand_path)?;

    // Restraint residues and membrane beads must be read out of the
    // receptor/ligand's original PDB frame, before recentering.
    let parsed_restraints = match &options.restraints_file {
        Some(path) => restraints_file::parse_restraints_file(path)?,
        None => ParsedRestraints::default(),
    };
    let (receptor_active, receptor_passive, receptor_blocked, ligand_restraints) =
        resolve_restraints(&parsed_restraints, &receptor, &ligand)?;
    let has_membrane = options.use_membrane || options.is_transmembrane;
    let membrane_bead_z = if has_membrane { membrane::membrane_bead_z_coordinates(&receptor) } else { Vec::new() };

    let mut receptor = receptor;
    let mut ligand = ligand;
    let rec_translation = receptor.move_to_origin();
    let lig_translation = ligand.move_to_origin();

    let ligand_points = ligand.coordinates_as_vectors();
    if ligand_points.len() <= 4 {
        return Err(LightDockError::Atom(
            "ligand needs more than 4 atoms to fit an enclosing ellipsoid".to_string(),
        ));
    }
    let ligand_envelope = minimum_volume_ellipsoid(&ligand_points);
    let ligand_diameter = 2.0 * ligand_envelope.radii.iter().cloned().fold(0.0_f64, f64::max);

    let receptor_heavy_atoms: Vec<Vector3> = receptor
        .atoms()
        .filter(|a| !a.is_hydrogen())
        .map(|a| Vector3::new(a.x, a.y, a.z))
        .collect();

    let mut rng = MTGenerator::new(options.seed);
    let sphere_radius = ligand_diameter / 2.0 + options.swarm_radius;
    let surface_points = sample_receptor_surface(&receptor_heavy_atoms, sphere_radius, options.surface_density);

    let mut centers = cluster_into_swarms(&surface_points, options.num_swarms, 100);

    let restraint_cutoff = ligand_diameter / 2.0;
    if !receptor_active.is_empty() || !receptor_passive.is_empty() {
        let mut receptor_restraint_positions: Vec<Vector3> = receptor_active.iter().map(residue_position).collect();
        receptor_restraint_positions.extend(receptor_passive.iter().map(residue_position));
        let blocked_positions: Vec<Vector3> = receptor_blocked.iter().map(residue_position).collect();
        centers = restraints::apply_restraints(&centers, &receptor_restraint_positions, &blocked_positions, restraint_cutoff, rec_translation);
    }

    if has_membrane {
        centers = membrane::apply_membrane(&centers, membrane_bead_z, rec_translation, options.is_transmembrane)?;
    }

    let mut receptor_restraints_for_orientation = receptor_active.clone();
    receptor_restraints_for_orientation.extend(receptor_passive.clone());

    let mut manifest_swarms = Vec::new();
    let warnings = Vec::new();

    for (i, &center) in centers.iter().enumerate() {
        let orientation = OrientationStrategy::new(
            receptor_restraints_for_orientation.clone(),
            ligand_restraints.clone(),
            center,
            rec_translation,
            lig_translation,
            ligand_diameter,
        );

        let mut nm_generator = if options.use_anm {
            Some(NormalGenerator::new(options.seed + i as u64, 0.0, Defaults::default().nmodes_sigma))
        } else {
            None
        };
        let poses = pose::populate_poses(
            options.num_poses_per_swarm,
            center,
            options.swarm_radius,
            &orientation,
            &mut rng,
            options.rec_num_anm,
            options.lig_num_anm,
            nm_generator.as_mut(),
        )?;

        let positions_file = output_dir.join(format!("swarm_{}.in", i));
        pose::create_file_from_poses(&positions_file, &poses)?;

        manifest_swarms.push(SwarmManifestEntry {
            id: i,
            center: [center.x, center.y, center.z],
            radius: options.swarm_radius,
            num_poses: poses.len(),
            positions_file: positions_file.display().to_string(),
        });
    }

    let manifest = SetupManifest {
        receptor_file: receptor_path.as_ref().display().to_string(),
        ligand_file: ligand_path.as_ref().display().to_string(),
        seed: options.seed,
        use_anm: options.use_anm,
        rec_num_anm: options.rec_num_anm,
        lig_num_anm: options.lig_num_anm,
        swarms: manifest_swarms,
        warnings,
    };

    write_manifest(output_dir, &manifest)?;
    Ok(manifest)
}

fn write_manifest(output_dir: &Path, manifest: &SetupManifest) -> Result<()> {
    let path: PathBuf = output_dir.join("setup.json");
    let contents = serde_json::to_string_pretty(manifest)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Reads back a previously written `setup.json`.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<SetupManifest> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere(n: usize) -> Vec<Vector3> {
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let theta = (i as f64) * 2.399963229728653;
            let z = 1.0 - 2.0 * (i as f64) / ((n - 1) as f64);
            let r = (1.0 - z * z).max(0.0).sqrt();
            points.push(Vector3::new(r * theta.cos(), r * theta.sin(), z));
        }
        points
    }

    #[test]
    fn test_cluster_into_swarms_produces_requested_count() {
        let points = unit_sphere(200);
        let centers = cluster_into_swarms(&points, 10, 50);
        assert_eq!(10, centers.len());
    }

    #[test]
    fn test_cluster_into_swarms_caps_at_point_count() {
        let points = unit_sphere(5);
        let centers = cluster_into_swarms(&points, 50, 10);
        assert_eq!(5, centers.len());
    }

    #[test]
    fn test_sample_receptor_surface_discards_points_inside_other_spheres() {
        // Two atoms 1 Å apart with a radius of 5: nearly every point
        // generated around one atom falls inside the other's sphere,
        // so the envelope should be far smaller than the raw per-atom
        // point budget.
        let atoms = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let points = sample_receptor_surface(&atoms, 5.0, 1.0);
        let density = 1.0;
        let raw_budget_per_atom = (density * 4.0 * PI * 25.0).round() as usize;
        assert!(points.len() < raw_budget_per_atom * 2);
    }

    #[test]
    fn test_sample_receptor_surface_keeps_points_for_isolated_atom() {
        let atoms = vec![Vector3::new(0.0, 0.0, 0.0)];
        let points = sample_receptor_surface(&atoms, 5.0, 0.5);
        assert!(!points.is_empty());
        for p in &points {
            assert!((p.norm() - 5.0).abs() < 1e-6);
        }
    }
}
