//! Initial pose population for one swarm: a random
//! translation within the swarm's sphere, a quaternion chosen by one
//! of three orientation strategies depending on which restraints are
//! in play, and optional ANM extent amplitudes.

use crate::error::{LightDockError, Result};
use crate::qt::Quaternion;
use crate::random::{MTGenerator, NormalGenerator, UniformGenerator};
use crate::structure::Residue;
use crate::vector3::Vector3;
use std::fs;
use std::io::Write as _;
use std::path::Path;

/// Coefficient above which a ligand-only restrained orientation is
/// considered unreliable: the simulated receptor point is built by
/// scaling the swarm center itself, and a large coefficient means that
/// point lands far outside the swarm radius.
pub const RESTRAINT_COEF_WARNING_THRESHOLD: f64 = 1.5;

pub fn get_random_point_within_sphere<R: UniformGenerator>(rng: &mut R, radius: f64) -> Vector3 {
    loop {
        let x = (rng.next_float() * 2.0 - 1.0) * radius;
        let y = (rng.next_float() * 2.0 - 1.0) * radius;
        let z = (rng.next_float() * 2.0 - 1.0) * radius;
        if x * x + y * y + z * z <= radius * radius {
            return Vector3::new(x, y, z);
        }
    }
}

fn calpha_or_phosphate(residue: &Residue) -> &crate::structure::Atom {
    residue
        .get_calpha()
        .or_else(|| residue.get_atom("P"))
        .expect("restraint residue must carry a CA or P atom")
}

/// Calculates the quaternion required for orienting the ligand towards
/// one receptor/ligand restraint pair, given the candidate translation
/// `(tx, ty, tz)` being evaluated for this pose and the rigid
/// translations that were applied to move each partner to the origin.
pub fn get_quaternion_for_restraint(
    rec_residue: &Residue,
    lig_residue: &Residue,
    translation: Vector3,
    rec_translation: Vector3,
    lig_translation: Vector3,
) -> Quaternion {
    let r_ca = calpha_or_phosphate(rec_residue);
    let l_ca = calpha_or_phosphate(lig_residue);

    let rx = r_ca.x + rec_translation.x;
    let ry = r_ca.y + rec_translation.y;
    let rz = r_ca.z + rec_translation.z;

    let lx = l_ca.x + lig_translation.x;
    let ly = l_ca.y + lig_translation.y;
    let lz = l_ca.z + lig_translation.z;

    let a = Vector3::new(lx, ly, lz);
    let b = Vector3::new(rx - translation.x, ry - translation.y, rz - translation.z);

    Quaternion::from_vectors(a, b)
}

/// The ways a pose's initial orientation can be chosen, depending on
/// which restraints are defined for this docking. Restraints on the
/// receptor alone, with none on the ligand, don't constrain the
/// orientation and fall back to [`OrientationStrategy::Unrestrained`].
pub enum OrientationStrategy {
    Unrestrained,
    /// Restraints on both receptor and ligand: each pose independently
    /// draws one of the swarm's ten nearest receptor restraints and a
    /// random ligand restraint, so different poses within the same
    /// swarm point at different restraint pairs.
    Bilateral {
        receptor_restraints: Vec<Residue>,
        ligand_restraints: Vec<Residue>,
        closest_receptor_indices: Vec<usize>,
        rec_translation: Vector3,
        lig_translation: Vector3,
    },
    /// Restraints on the ligand only: the receptor side of the
    /// restraint is simulated as a point along the swarm center,
    /// scaled by the swarm center's distance relative to the ligand's
    /// diameter.
    LigandOnly {
        ligand_restraints: Vec<Residue>,
        ligand_diameter: f64,
        rec_translation: Vector3,
        lig_translation: Vector3,
    },
}

impl OrientationStrategy {
    /// Builds the strategy for one swarm. `receptor_restraints`/
    /// `ligand_restraints` are the active+passive restraint residues
    /// (in their original, pre-recentering frame); `swarm_center` is
    /// used once here to precompute the ten nearest receptor
    /// restraints, mirroring how the original pipeline picks
    /// `closest_residues` per swarm rather than per pose.
    pub fn new(
        receptor_restraints: Vec<Residue>,
        ligand_restraints: Vec<Residue>,
        swarm_center: Vector3,
        rec_translation: Vector3,
        lig_translation: Vector3,
        ligand_diameter: f64,
    ) -> OrientationStrategy {
        if !receptor_restraints.is_empty() && !ligand_restraints.is_empty() {
            let mut distances: Vec<(usize, f64)> = receptor_restraints
                .iter()
                .enumerate()
                .map(|(i, residue)| {
                    let ca = calpha_or_phosphate(residue);
                    let ca = Vector3::new(ca.x, ca.y, ca.z);
                    (i, ca.distance(&swarm_center))
                })
                .collect();
            distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
            let closest_receptor_indices = distances.into_iter().take(10).map(|(i, _)| i).collect();
            OrientationStrategy::Bilateral {
                receptor_restraints,
                ligand_restraints,
                closest_receptor_indices,
                rec_translation,
                lig_translation,
            }
        } else if !ligand_restraints.is_empty() {
            OrientationStrategy::LigandOnly {
                ligand_restraints,
                ligand_diameter,
                rec_translation,
                lig_translation,
            }
        } else {
            OrientationStrategy::Unrestrained
        }
    }
}

/// Builds one pose's orientation quaternion, drawing fresh restraint
/// choices from `orientation` every call so that poses within the same
/// swarm vary.
fn get_quaternion_for_pose<R: UniformGenerator>(
    strategy: &OrientationStrategy,
    swarm_center: Vector3,
    translation: Vector3,
    rng: &mut R,
) -> Result<Quaternion> {
    match strategy {
        OrientationStrategy::Unrestrained => Ok(Quaternion::random(rng)),
        OrientationStrategy::Bilateral {
            receptor_restraints,
            ligand_restraints,
            closest_receptor_indices,
            rec_translation,
            lig_translation,
        } => {
            let rec_pick = closest_receptor_indices[rng.randint(0, closest_receptor_indices.len() as i64 - 1) as usize];
            let rec_residue = &receptor_restraints[rec_pick];
            let lig_pick = rng.randint(0, ligand_restraints.len() as i64 - 1) as usize;
            let lig_residue = &ligand_restraints[lig_pick];
            Ok(get_quaternion_for_restraint(
                rec_residue,
                lig_residue,
                translation,
                *rec_translation,
                *lig_translation,
            ))
        }
        OrientationStrategy::LigandOnly {
            ligand_restraints,
            ligand_diameter,
            rec_translation,
            lig_translation,
        } => {
            let coef = swarm_center.norm() / ligand_diameter;
            if coef > RESTRAINT_COEF_WARNING_THRESHOLD {
                return Err(LightDockError::Warning(
                    "found wrong coefficient on calculating poses with restraints".to_string(),
                ));
            }
            // Kept in the receptor's original, pre-recentering frame:
            // `- rec_translation` here cancels the `+ rec_translation`
            // applied inside get_quaternion_for_restraint.
            let rec_residue = Residue::dummy(
                swarm_center.x * coef - rec_translation.x,
                swarm_center.y * coef - rec_translation.y,
                swarm_center.z * coef - rec_translation.z,
            );
            let lig_pick = rng.randint(0, ligand_restraints.len() as i64 - 1) as usize;
            let lig_residue = &ligand_restraints[lig_pick];
            Ok(get_quaternion_for_restraint(
                &rec_residue,
                lig_residue,
                translation,
                *rec_translation,
                *lig_translation,
            ))
        }
    }
}

pub struct Pose {
    pub translation: Vector3,
    pub rotation: Quaternion,
    pub rec_extent: Vec<f64>,
    pub lig_extent: Vec<f64>,
}

impl Pose {
    /// Flattens to the `[tx, ty, tz, qw, qx, qy, qz, rec_nm..., lig_nm...]`
    /// row format the GSO engine's `Swarm::add_glowworms` parses.
    pub fn to_vector(&self) -> Vec<f64> {
        let mut v = vec![
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.rotation.w,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ];
        v.extend_from_slice(&self.rec_extent);
        v.extend_from_slice(&self.lig_extent);
        v
    }
}

/// Populates one swarm with `num_poses` random poses around
/// `swarm_center` within `swarm_radius`, using `orientation` to draw a
/// fresh restraint-directed (or uniformly random) rotation per pose,
/// and `nm_generator` (when given) to draw ANM extent amplitudes.
#[allow(clippy::too_many_arguments)]
pub fn populate_poses(
    num_poses: usize,
    swarm_center: Vector3,
    swarm_radius: f64,
    orientation: &OrientationStrategy,
    rng: &mut MTGenerator,
    rec_num_anm: usize,
    lig_num_anm: usize,
    nm_generator: Option<&mut NormalGenerator>,
) -> Result<Vec<Pose>> {
    let mut poses = Vec::with_capacity(num_poses);
    let mut nm_generator = nm_generator;

    for _ in 0..num_poses {
        let offset = get_random_point_within_sphere(rng, swarm_radius);
        let translation = swarm_center + offset;
        let rotation = get_quaternion_for_pose(orientation, swarm_center, translation, rng)?;
        let rec_extent = match nm_generator.as_deref_mut() {
            Some(gen) if rec_num_anm > 0 => (0..rec_num_anm).map(|_| gen.sample()).collect(),
            _ => Vec::new(),
        };
        let lig_extent = match nm_generator.as_deref_mut() {
            Some(gen) if lig_num_anm > 0 => (0..lig_num_anm).map(|_| gen.sample()).collect(),
            _ => Vec::new(),
        };
        poses.push(Pose {
            translation,
            rotation,
            rec_extent,
            lig_extent,
        });
    }
    Ok(poses)
}

/// Writes one pose per line, nine decimal places, space-separated —
/// the format the setup pipeline's swarm position files use and the
/// GSO `CoordinatesFileReader`-adjacent reader expects.
pub fn create_file_from_poses<P: AsRef<Path>>(path: P, poses: &[Pose]) -> Result<()> {
    let mut contents = String::new();
    for pose in poses {
        let values = pose.to_vector();
        let formatted: Vec<String> = values.iter().map(|v| format!("{:.9}", v)).collect();
        contents.push_str(&formatted.join(" "));
        contents.push('\n');
    }
    fs::write(&path, contents)?;
    Ok(())
}
