//! Tunable defaults. The bare `pub const` values are kept for call
//! sites that want a compile-time
//! constant (GSO movement steps, interpolation thresholds); [`Defaults`]
//! bundles the setup-pipeline-level knobs a CLI or config file would
//! override, mirroring how the rest of the crate reaches for a small
//! struct of named settings instead of scattering `--flag` parsing
//! through every module.

pub const DEFAULT_SEED: u64 = 324_324;
pub const DEFAULT_TRANSLATION_STEP: f64 = 0.5;
pub const DEFAULT_ROTATION_STEP: f64 = 0.5;
pub const LINEAR_THRESHOLD: f64 = 0.9995;
pub const INTERFACE_CUTOFF: f64 = 3.9;
pub const INTERFACE_CUTOFF2: f64 = INTERFACE_CUTOFF * INTERFACE_CUTOFF;
pub const DEFAULT_LIGHTDOCK_PREFIX: &str = "lightdock_";
pub const MEMBRANE_PENALTY_SCORE: f64 = 999.0;
pub const DEFAULT_NMODES_STEP: f64 = 0.5;
pub const DEFAULT_REC_NM_FILE: &str = "rec_nm.npy";
pub const DEFAULT_LIG_NM_FILE: &str = "lig_nm.npy";

/// Normalizes the translation term of the docking-mode GSO neighbor
/// distance; `1-|q_a.q_b|` is already bounded in `[0, 1]` so
/// `MAX_ROTATION` stays at 1.0.
pub const MAX_TRANSLATION: f64 = 30.0;
pub const MAX_ROTATION: f64 = 1.0;
/// Normalizes the ANM-extent term of the same distance; extents are
/// drawn from `NormalGenerator(mu=0, sigma=0.3)`, so a bound of 1.0
/// covers roughly 3 standard deviations.
pub const MAX_NM_EXTENT: f64 = 1.0;

/// Points per Å² used when sampling the receptor surface sphere
/// around each heavy atom.
pub const DEFAULT_SURFACE_DENSITY: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Defaults {
    pub seed: u64,
    pub num_swarms: usize,
    pub num_poses_per_swarm: usize,
    pub swarm_radius: f64,
    pub num_gso_steps: u32,
    pub report_frequency: u32,
    pub nmodes_sigma: f64,
    pub scoring_function: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            seed: DEFAULT_SEED,
            num_swarms: 100,
            num_poses_per_swarm: 200,
            swarm_radius: 10.0,
            num_gso_steps: 100,
            report_frequency: 10,
            nmodes_sigma: 0.3,
            scoring_function: "dfire".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let defaults = Defaults::default();
        assert_eq!(DEFAULT_SEED, defaults.seed);
        assert_eq!(100, defaults.num_swarms);
    }
}
