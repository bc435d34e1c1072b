//! `lightdock-setup`: partitions the receptor/ligand search space into
//! swarms and populates each with initial poses.

use clap::Parser;
use lightdock::constants::{Defaults, DEFAULT_SURFACE_DENSITY};
use lightdock::setup::{run_setup, SetupOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lightdock-setup", about = "Partition a docking search space into swarms")]
struct Args {
    receptor_pdb: PathBuf,
    ligand_pdb: PathBuf,

    #[arg(short = 'o', long, default_value = "setup")]
    output_dir: PathBuf,

    #[arg(short = 's', long)]
    swarms: Option<usize>,

    #[arg(short = 'g', long)]
    glowworms: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_anm: bool,

    #[arg(long, default_value_t = 0)]
    anm_rec: usize,

    #[arg(long, default_value_t = 0)]
    anm_lig: usize,

    /// Receptor carries an explicit membrane.
    #[arg(long)]
    membrane: bool,

    /// Receptor is transmembrane (membrane must resolve to exactly two
    /// layers; swarms are kept between them rather than above).
    #[arg(long)]
    transmembrane: bool,

    /// Restraint file: `<receptor|ligand> <active|passive|blocked>
    /// <chain>.<res>.<num>[ins]` per line.
    #[arg(long)]
    restraints: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let defaults = Defaults::default();

    let options = SetupOptions {
        num_swarms: args.swarms.unwrap_or(defaults.num_swarms),
        num_poses_per_swarm: args.glowworms.unwrap_or(defaults.num_poses_per_swarm),
        swarm_radius: defaults.swarm_radius,
        surface_density: DEFAULT_SURFACE_DENSITY,
        seed: args.seed.unwrap_or(defaults.seed),
        use_anm: args.use_anm,
        rec_num_anm: args.anm_rec,
        lig_num_anm: args.anm_lig,
        restraints_file: args.restraints,
        use_membrane: args.membrane,
        is_transmembrane: args.transmembrane,
    };

    match run_setup(&args.receptor_pdb, &args.ligand_pdb, &args.output_dir, &options) {
        Ok(manifest) => {
            log::info!("generated {} swarms under {:?}", manifest.swarms.len(), args.output_dir);
            for warning in &manifest.warnings {
                log::warn!("{}", warning);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("setup failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
