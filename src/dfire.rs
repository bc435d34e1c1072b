//! DFIRE knowledge-based potential: not the first-principles DFIRE
//! derivation, only the 168x168x20 lookup-table evaluation of an
//! externally supplied potential file (`$LIGHTDOCK_DATA/DCparams`).

use crate::constants::{INTERFACE_CUTOFF, MEMBRANE_PENALTY_SCORE};
use crate::error::{LightDockError, Result};
use crate::scoring::{
    membrane_intersection, residue_id, satisfied_restraints, DockingModel, ModelAdapter,
    ScoringFunction,
};
use crate::structure::Complex;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::env;
use std::fs;

pub fn r3_to_numerical(residue_name: &str) -> Result<usize> {
    let idx = match residue_name {
        "ALA" => 0,
        "CYS" => 1,
        "ASP" => 2,
        "GLU" => 3,
        "PHE" => 4,
        "GLY" => 5,
        "HIS" => 6,
        "ILE" => 7,
        "LYS" => 8,
        "LEU" => 9,
        "MET" => 10,
        "ASN" => 11,
        "PRO" => 12,
        "GLN" => 13,
        "ARG" => 14,
        "SER" => 15,
        "THR" => 16,
        "VAL" => 17,
        "TRP" => 18,
        "TYR" => 19,
        "MMB" => 20,
        other => {
            return Err(LightDockError::PotentialsParsing(format!(
                "residue '{}' is not supported by DFIRE",
                other
            )))
        }
    };
    Ok(idx)
}

const DIST_TO_BINS: &[usize] = &[
    1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19,
    19, 20, 20, 21, 21, 22, 22, 23, 23, 24, 24, 25, 25, 26, 26, 27, 27, 28, 28, 29, 29, 30, 30, 31,
];

macro_rules! hashmap {
    ($( $key: expr => $val: expr ),* $(,)?) => {{
         let mut map = ::std::collections::HashMap::new();
         $( map.insert($key, $val); )*
         map
    }}
}

lazy_static! {
    static ref ATOMNUMBER: HashMap<&'static str, usize> = hashmap![
        "ALAN" => 0, "ALACA" => 1, "ALAC" => 2, "ALAO" => 3, "ALACB" => 4,
        "CYSN" => 0, "CYSCA" => 1, "CYSC" => 2, "CYSO" => 3, "CYSCB" => 4, "CYSSG" => 5,
        "ASPN" => 0, "ASPCA" => 1, "ASPC" => 2, "ASPO" => 3, "ASPCB" => 4, "ASPCG" => 5, "ASPOD1" => 6, "ASPOD2" => 7,
        "GLUN" => 0, "GLUCA" => 1, "GLUC" => 2, "GLUO" => 3, "GLUCB" => 4, "GLUCG" => 5, "GLUCD" => 6, "GLUOE1" => 7, "GLUOE2" => 8,
        "PHEN" => 0, "PHECA" => 1, "PHEC" => 2, "PHEO" => 3, "PHECB" => 4, "PHECG" => 5, "PHECD1" => 6, "PHECD2" => 7, "PHECE1" => 8, "PHECE2" => 9, "PHECZ" => 10,
        "GLYN" => 0, "GLYCA" => 1, "GLYC" => 2, "GLYO" => 3,
        "HISN" => 0, "HISCA" => 1, "HISC" => 2, "HISO" => 3, "HISCB" => 4, "HISCG" => 5, "HISND1" => 6, "HISCD2" => 7, "HISCE1" => 8, "HISNE2" => 9,
        "ILEN" => 0, "ILECA" => 1, "ILEC" => 2, "ILEO" => 3, "ILECB" => 4, "ILECG1" => 5, "ILECG2" => 6, "ILECD1" => 7,
        "LYSN" => 0, "LYSCA" => 1, "LYSC" => 2, "LYSO" => 3, "LYSCB" => 4, "LYSCG" => 5, "LYSCD" => 6, "LYSCE" => 7, "LYSNZ" => 8,
        "LEUN" => 0, "LEUCA" => 1, "LEUC" => 2, "LEUO" => 3, "LEUCB" => 4, "LEUCG" => 5, "LEUCD1" => 6, "LEUCD2" => 7,
        "METN" => 0, "METCA" => 1, "METC" => 2, "METO" => 3, "METCB" => 4, "METCG" => 5, "METSD" => 6, "METCE" => 7,
        "ASNN" => 0, "ASNCA" => 1, "ASNC" => 2, "ASNO" => 3, "ASNCB" => 4, "ASNCG" => 5, "ASNOD1" => 6, "ASNND2" => 7,
        "PRON" => 0, "PROCA" => 1, "PROC" => 2, "PROO" => 3, "PROCB" => 4, "PROCG" => 5, "PROCD" => 6,
        "GLNN" => 0, "GLNCA" => 1, "GLNC" => 2, "GLNO" => 3, "GLNCB" => 4, "GLNCG" => 5, "GLNCD" => 6, "GLNOE1" => 7, "GLNNE2" => 8,
        "ARGN" => 0, "ARGCA" => 1, "ARGC" => 2, "ARGO" => 3, "ARGCB" => 4, "ARGCG" => 5, "ARGCD" => 6, "ARGNE" => 7, "ARGCZ" => 8, "ARGNH1" => 9, "ARGNH2" => 10,
        "SERN" => 0, "SERCA" => 1, "SERC" => 2, "SERO" => 3, "SERCB" => 4, "SEROG" => 5,
        "THRN" => 0, "THRCA" => 1, "THRC" => 2, "THRO" => 3, "THRCB" => 4, "THROG1" => 5, "THRCG2" => 6,
        "VALN" => 0, "VALCA" => 1, "VALC" => 2, "VALO" => 3, "VALCB" => 4, "VALCG1" => 5, "VALCG2" => 6,
        "TRPN" => 0, "TRPCA" => 1, "TRPC" => 2, "TRPO" => 3, "TRPCB" => 4, "TRPCG" => 5, "TRPCD1" => 6, "TRPCD2" => 7, "TRPCE2" => 8, "TRPNE1" => 9, "TRPCE3" => 10, "TRPCZ3" => 11, "TRPCH2" => 12, "TRPCZ2" => 13,
        "TYRN" => 0, "TYRCA" => 1, "TYRC" => 2, "TYRO" => 3, "TYRCB" => 4, "TYRCG" => 5, "TYRCD1" => 6, "TYRCD2" => 7, "TYRCE1" => 8, "TYRCE2" => 9, "TYRCZ" => 10, "TYROH" => 11,
        "MMBBJ" => 0,
    ];

    static ref ATOMRES: Vec<Vec<usize>> = vec![
        vec![74, 75, 76, 77, 78, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 1, 2, 3, 4, 5, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![122, 123, 124, 125, 126, 127, 128, 129, 0, 0, 0, 0, 0, 0],
        vec![113, 114, 115, 116, 117, 118, 119, 120, 121, 0, 0, 0, 0, 0],
        vec![14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 0, 0, 0],
        vec![79, 80, 81, 82, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![130, 131, 132, 133, 134, 135, 136, 137, 138, 139, 0, 0, 0, 0],
        vec![25, 26, 27, 28, 29, 30, 31, 32, 0, 0, 0, 0, 0, 0],
        vec![151, 152, 153, 154, 155, 156, 157, 158, 159, 0, 0, 0, 0, 0],
        vec![33, 34, 35, 36, 37, 38, 39, 40, 0, 0, 0, 0, 0, 0],
        vec![6, 7, 8, 9, 10, 11, 12, 13, 0, 0, 0, 0, 0, 0],
        vec![105, 106, 107, 108, 109, 110, 111, 112, 0, 0, 0, 0, 0, 0],
        vec![160, 161, 162, 163, 164, 165, 166, 0, 0, 0, 0, 0, 0, 0],
        vec![96, 97, 98, 99, 100, 101, 102, 103, 104, 0, 0, 0, 0, 0],
        vec![140, 141, 142, 143, 144, 145, 146, 147, 148, 149, 150, 0, 0, 0],
        vec![90, 91, 92, 93, 94, 95, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![83, 84, 85, 86, 87, 88, 89, 0, 0, 0, 0, 0, 0, 0],
        vec![41, 42, 43, 44, 45, 46, 47, 0, 0, 0, 0, 0, 0, 0],
        vec![48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61],
        vec![62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 0, 0],
        vec![167, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];
}

pub struct DfireAdapter;

impl ModelAdapter for DfireAdapter {
    fn build_docking_model(
        &self,
        complex: &Complex,
        active_restraints: &[String],
        passive_restraints: &[String],
        nmodes: &[f64],
        num_anm: usize,
    ) -> Result<DockingModel> {
        let mut model = DockingModel {
            atoms: Vec::new(),
            coordinates: Vec::new(),
            membrane: Vec::new(),
            active_restraints: HashMap::new(),
            passive_restraints: HashMap::new(),
            nmodes: nmodes.to_owned(),
            num_anm,
        };

        let mut atom_index: usize = 0;
        for chain in &complex.chains {
            for residue in &chain.residues {
                let res_id = residue_id(&chain.id, &residue.name, residue.number, &residue.insertion);
                for atom in &residue.atoms {
                    let atom_type = format!("{}{}", residue.name.trim(), atom.name.trim());
                    if atom_type == "MMBBJ" {
                        model.membrane.push(atom_index);
                    }
                    if active_restraints.contains(&res_id) {
                        model.active_restraints.entry(res_id.clone()).or_default().push(atom_index);
                    }
                    if passive_restraints.contains(&res_id) {
                        model.passive_restraints.entry(res_id.clone()).or_default().push(atom_index);
                    }

                    let res_num = r3_to_numerical(residue.name.trim())?;
                    let atom_num = *ATOMNUMBER.get(atom_type.as_str()).ok_or_else(|| {
                        LightDockError::PotentialsParsing(format!(
                            "unsupported atom type '{}'",
                            atom_type
                        ))
                    })?;
                    model.atoms.push(ATOMRES[res_num][atom_num]);
                    model.coordinates.push([atom.x, atom.y, atom.z]);
                    atom_index += 1;
                }
            }
        }
        Ok(model)
    }
}

pub struct Dfire {
    potential: Vec<f64>,
}

impl Dfire {
    /// Loads the 168x168x20 potential table from `$LIGHTDOCK_DATA/DCparams`
    /// (falling back to `data/DCparams` when the variable is unset).
    pub fn from_data_file() -> Result<Dfire> {
        let data_folder = env::var("LIGHTDOCK_DATA").unwrap_or_else(|_| "data".to_string());
        let path = format!("{}/DCparams", data_folder);
        let raw = fs::read_to_string(&path).map_err(|e| {
            LightDockError::PotentialsParsing(format!("cannot read {}: {}", path, e))
        })?;

        let mut potential = Vec::with_capacity(168 * 168 * 20);
        for line in raw.lines().take(168 * 168 * 20) {
            let value: f64 = line.trim().parse().map_err(|_| {
                LightDockError::PotentialsParsing(format!("malformed DFIRE entry: '{}'", line))
            })?;
            potential.push(value);
        }
        if potential.len() != 168 * 168 * 20 {
            return Err(LightDockError::PotentialsParsing(format!(
                "expected {} DFIRE entries, found {}",
                168 * 168 * 20,
                potential.len()
            )));
        }
        Ok(Dfire { potential })
    }
}

impl ScoringFunction for Dfire {
    fn energy(
        &self,
        receptor: &DockingModel,
        ligand: &DockingModel,
        receptor_coordinates: &[[f64; 3]],
        ligand_coordinates: &[[f64; 3]],
        interface_receptor: &mut Vec<usize>,
        interface_ligand: &mut Vec<usize>,
    ) -> f64 {
        *interface_receptor = vec![0; receptor_coordinates.len()];
        *interface_ligand = vec![0; ligand_coordinates.len()];

        let mut score = 0.0;
        for (i, ra) in receptor_coordinates.iter().enumerate() {
            let atoma = receptor.atoms[i];
            for (j, la) in ligand_coordinates.iter().enumerate() {
                let dist2 = (ra[0] - la[0]).powi(2) + (ra[1] - la[1]).powi(2) + (ra[2] - la[2]).powi(2);
                if dist2 <= 225.0 {
                    let atomb = ligand.atoms[j];
                    let d = dist2.sqrt() * 2.0 - 1.0;
                    let bin = DIST_TO_BINS[d as usize] - 1;
                    score += self.potential[atoma * 168 * 20 + atomb * 20 + bin];
                    if d <= INTERFACE_CUTOFF {
                        interface_receptor[i] = 1;
                        interface_ligand[j] = 1;
                    }
                }
            }
        }

        score = (score * 0.0157 - 4.7) * -1.0;

        let perc_receptor = satisfied_restraints(interface_receptor, &receptor.active_restraints);
        let perc_ligand = satisfied_restraints(interface_ligand, &ligand.active_restraints);
        let intersection = membrane_intersection(interface_receptor, &receptor.membrane);
        let membrane_penalty = if intersection > 0.0 {
            MEMBRANE_PENALTY_SCORE * intersection
        } else {
            0.0
        };

        score + perc_receptor * score + perc_ligand * score - membrane_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r3_to_numerical_known_residue() {
        assert_eq!(0, r3_to_numerical("ALA").unwrap());
        assert_eq!(20, r3_to_numerical("MMB").unwrap());
    }

    #[test]
    fn test_r3_to_numerical_unknown_residue() {
        assert!(r3_to_numerical("XXX").is_err());
    }

    #[test]
    fn test_missing_potential_file_is_error() {
        let prior = env::var("LIGHTDOCK_DATA").ok();
        env::set_var("LIGHTDOCK_DATA", "/nonexistent/lightdock/data");
        let result = Dfire::from_data_file();
        assert!(result.is_err());
        match prior {
            Some(v) => env::set_var("LIGHTDOCK_DATA", v),
            None => env::remove_var("LIGHTDOCK_DATA"),
        }
    }
}
