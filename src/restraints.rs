//! Restraint-based filtering of swarm centers: a swarm center survives
//! only if it falls among the nearest `MAX_SWARMS_PER_RESTRAINT`
//! centers to some active/passive restraint residue within `cutoff`,
//! and is then dropped if it also lies within `cutoff - 5` of a
//! blocked residue.

use crate::vector3::Vector3;

pub const MAX_SWARMS_PER_RESTRAINT: usize = 10;

/// Keeps the swarm centers compatible with the given restraints.
///
/// `receptor_restraints`/`blocked_restraints` are Cα (or P, for
/// nucleotides) positions in the receptor's original, pre-recentering
/// frame; `translation` is the vector that was applied to move the
/// receptor to the origin, added back here so distances are computed
/// in the same frame as `swarm_centers`.
///
/// When both `receptor_restraints` and `blocked_restraints` are empty
/// this is the identity transform: restraints never narrow a search
/// that wasn't asked to be narrowed.
pub fn apply_restraints(
    swarm_centers: &[Vector3],
    receptor_restraints: &[Vector3],
    blocked_restraints: &[Vector3],
    cutoff: f64,
    translation: Vector3,
) -> Vec<Vector3> {
    let mut closer_swarm_ids: Vec<usize> = Vec::new();
    for residue in receptor_restraints {
        let ca = *residue + translation;
        let mut distances: Vec<(usize, f64)> = swarm_centers
            .iter()
            .enumerate()
            .map(|(id, center)| (id, ca.distance(center)))
            .collect();
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let mut considered = 0;
        for &(id, distance) in &distances {
            if distance <= cutoff {
                closer_swarm_ids.push(id);
                considered += 1;
            }
            if considered == MAX_SWARMS_PER_RESTRAINT {
                break;
            }
        }
    }
    closer_swarm_ids.sort_unstable();
    closer_swarm_ids.dedup();
    let new_swarm_centers: Vec<Vector3> = closer_swarm_ids.iter().map(|&i| swarm_centers[i]).collect();

    if blocked_restraints.is_empty() && !receptor_restraints.is_empty() {
        return new_swarm_centers;
    }

    let mut centers_list = if !new_swarm_centers.is_empty() {
        new_swarm_centers
    } else {
        swarm_centers.to_vec()
    };

    let blocked_cutoff = cutoff - 5.0;
    for residue in blocked_restraints {
        let ca = *residue + translation;
        centers_list.retain(|center| ca.distance(center) > blocked_cutoff);
    }
    centers_list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_restraints_is_identity() {
        let centers = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let result = apply_restraints(&centers, &[], &[], 5.0, Vector3::zero());
        assert_eq!(centers, result);
    }

    #[test]
    fn test_keeps_only_swarms_near_active_restraint() {
        let centers = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(100.0, 0.0, 0.0)];
        let active = vec![Vector3::new(0.5, 0.0, 0.0)];
        let result = apply_restraints(&centers, &active, &[], 5.0, Vector3::zero());
        assert_eq!(vec![Vector3::new(0.0, 0.0, 0.0)], result);
    }

    #[test]
    fn test_drops_swarms_near_blocked_restraint_when_no_active() {
        let centers = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(100.0, 0.0, 0.0)];
        let blocked = vec![Vector3::new(0.5, 0.0, 0.0)];
        // Blocked cutoff is `cutoff - 5`, so use a cutoff large enough to bite.
        let result = apply_restraints(&centers, &[], &blocked, 10.0, Vector3::zero());
        assert_eq!(vec![Vector3::new(100.0, 0.0, 0.0)], result);
    }

    #[test]
    fn test_blocked_cutoff_is_five_less_than_active_cutoff() {
        // A blocked residue 7 away survives a cutoff of 10 (10-5=5 < 7)
        // but is removed at a cutoff of 13 (13-5=8 > 7).
        let centers = vec![Vector3::new(7.0, 0.0, 0.0)];
        let blocked = vec![Vector3::new(0.0, 0.0, 0.0)];
        let active = vec![Vector3::new(7.0, 0.0, 0.0)];
        let kept = apply_restraints(&centers, &active, &blocked, 10.0, Vector3::zero());
        assert_eq!(centers, kept);
        let dropped = apply_restraints(&centers, &active, &blocked, 13.0, Vector3::zero());
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_caps_swarms_per_restraint() {
        let mut centers = Vec::new();
        for i in 0..(MAX_SWARMS_PER_RESTRAINT + 5) {
            centers.push(Vector3::new(i as f64 * 0.01, 0.0, 0.0));
        }
        let active = vec![Vector3::new(0.0, 0.0, 0.0)];
        let result = apply_restraints(&centers, &active, &[], 5.0, Vector3::zero());
        assert_eq!(MAX_SWARMS_PER_RESTRAINT, result.len());
    }

    #[test]
    fn test_selection_prefers_nearest_not_list_order() {
        // Only one slot would be needed if selection took list order;
        // with sort-by-distance, the nearer center wins regardless of
        // its position in the input slice.
        let centers = vec![Vector3::new(9.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let active = vec![Vector3::new(0.0, 0.0, 0.0)];
        let result = apply_restraints(&centers, &active, &[], 2.0, Vector3::zero());
        assert_eq!(vec![Vector3::new(1.0, 0.0, 0.0)], result);
    }
}
