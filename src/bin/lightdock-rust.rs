//! `lightdock-rust`: runs the Glowworm Swarm Optimization engine over
//! every swarm produced by `lightdock-setup`.

use clap::Parser;
use lightdock::constants::{DEFAULT_LIG_NM_FILE, DEFAULT_REC_NM_FILE};
use lightdock::coordinates::CoordinatesFileReader;
use lightdock::error::{LightDockError, Result};
use lightdock::nmodes::load_nmodes;
use lightdock::scoring::DockingModel;
use lightdock::setup::{read_manifest, SwarmManifestEntry};
use lightdock::structure::pdbio;
use lightdock::Gso;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lightdock-rust", about = "Run the GSO engine over a setup's swarms")]
struct Args {
    setup_dir: PathBuf,
    receptor_pdb: PathBuf,
    ligand_pdb: PathBuf,

    #[arg(short = 's', long, default_value_t = 100)]
    steps: u32,

    #[arg(long, default_value = "dfire")]
    scoring_function: String,
}

fn run(args: &Args) -> Result<()> {
    let manifest = read_manifest(args.setup_dir.join("setup.json"))?;
    let plugin = lightdock::scoring::lookup(&args.scoring_function)?;

    let receptor = pdbio::read_complex(&args.receptor_pdb)?;
    let ligand = pdbio::read_complex(&args.ligand_pdb)?;
    let adapter = (plugin.adapter)();

    let rec_nmodes = if manifest.use_anm && manifest.rec_num_anm > 0 {
        load_nmodes(DEFAULT_REC_NM_FILE, receptor.num_atoms(), manifest.rec_num_anm)?
    } else {
        Vec::new()
    };
    let lig_nmodes = if manifest.use_anm && manifest.lig_num_anm > 0 {
        load_nmodes(DEFAULT_LIG_NM_FILE, ligand.num_atoms(), manifest.lig_num_anm)?
    } else {
        Vec::new()
    };

    let receptor_model: DockingModel =
        adapter.build_docking_model(&receptor, &[], &[], &rec_nmodes, manifest.rec_num_anm)?;
    let ligand_model: DockingModel =
        adapter.build_docking_model(&ligand, &[], &[], &lig_nmodes, manifest.lig_num_anm)?;
    let scoring = (plugin.scoring)()?;

    for swarm in &manifest.swarms {
        run_swarm(swarm, &manifest, &*scoring, &receptor_model, &ligand_model, args)?;
    }
    Ok(())
}

fn run_swarm(
    swarm: &SwarmManifestEntry,
    manifest: &lightdock::setup::SetupManifest,
    scoring: &dyn lightdock::scoring::ScoringFunction,
    receptor_model: &DockingModel,
    ligand_model: &DockingModel,
    args: &Args,
) -> Result<()> {
    let dimension = 7 + manifest.rec_num_anm + manifest.lig_num_anm;
    let reader = CoordinatesFileReader::new(dimension);
    let positions: Vec<Vec<f64>> = reader
        .get_coordinates_from_file(&swarm.positions_file)
        .map_err(|_| LightDockError::GsoCoordinates(format!("cannot read {}", swarm.positions_file)))?
        .iter()
        .map(|c| c.as_slice().to_vec())
        .collect();

    let swarm_dir = PathBuf::from(&swarm.positions_file)
        .parent()
        .unwrap_or_else(|| args.setup_dir.as_path())
        .join(format!("swarm_{}", swarm.id));
    std::fs::create_dir_all(&swarm_dir)?;

    let mut gso = Gso::new(
        &positions,
        manifest.seed + swarm.id as u64,
        scoring,
        receptor_model,
        ligand_model,
        manifest.use_anm,
        manifest.rec_num_anm,
        manifest.lig_num_anm,
        &swarm_dir,
    );
    gso.run(args.steps)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("GSO run failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
