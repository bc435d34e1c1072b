use crate::error::{LightDockError, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    pub static ref MASSES: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("H", 1.008);
        m.insert("C", 12.011);
        m.insert("N", 14.007);
        m.insert("O", 15.999);
        m.insert("S", 32.06);
        m.insert("P", 30.974);
        m.insert("SE", 78.971);
        m.insert("FE", 55.845);
        m.insert("ZN", 65.38);
        m.insert("MG", 24.305);
        m.insert("CA", 40.078);
        m.insert("NA", 22.990);
        m.insert("CL", 35.45);
        m.insert("BJ", 12.011); // membrane bead pseudo-element
        m
    };
}

const BACKBONE_NAMES: [&str; 4] = ["N", "CA", "C", "O"];

/// Infers an element symbol from a PDB atom name by successively
/// stripping trailing/leading digits and whitespace, the convention
/// used by the original Python `Atom` model.
fn infer_element(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Two-letter elements used by lightdock's residue tables.
    let two_letter = ["BJ", "SE", "FE", "ZN", "MG", "NA", "CL"];
    let upper: String = trimmed
        .chars()
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if two_letter.contains(&upper.as_str()) {
        return Some(upper);
    }
    let first = trimmed.chars().next().unwrap().to_ascii_uppercase();
    Some(first.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub serial: i64,
    pub name: String,
    pub alt_loc: String,
    pub chain_id: String,
    pub residue_name: String,
    pub residue_number: i64,
    pub insertion: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: f64,
    pub b_factor: f64,
    pub element: String,
    pub mass: f64,
    pub index: usize,
}

impl Default for Atom {
    fn default() -> Self {
        Atom {
            serial: 0,
            name: String::new(),
            alt_loc: String::new(),
            chain_id: String::new(),
            residue_name: String::new(),
            residue_number: 0,
            insertion: String::new(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            b_factor: 0.0,
            element: "H".to_string(),
            mass: MASSES["H"],
            index: 0,
        }
    }
}

#[allow(clippy::too_many_arguments)]
impl Atom {
    pub fn new(
        serial: i64,
        name: &str,
        alt_loc: &str,
        chain_id: &str,
        residue_name: &str,
        residue_number: i64,
        insertion: &str,
        x: f64,
        y: f64,
        z: f64,
        occupancy: f64,
        b_factor: f64,
        element: Option<&str>,
    ) -> Result<Atom> {
        let resolved_element = match element {
            Some(e) if !e.is_empty() => e.to_uppercase(),
            _ => infer_element(name)
                .ok_or_else(|| LightDockError::Atom(format!("cannot infer element from name '{}'", name)))?,
        };
        let mass = *MASSES.get(resolved_element.as_str()).ok_or_else(|| {
            LightDockError::Atom(format!("unrecognized element '{}'", resolved_element))
        })?;

        Ok(Atom {
            serial,
            name: name.to_string(),
            alt_loc: alt_loc.to_string(),
            chain_id: chain_id.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            insertion: insertion.to_string(),
            x,
            y,
            z,
            occupancy,
            b_factor,
            element: resolved_element,
            mass,
            index: 0,
        })
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }

    pub fn is_backbone(&self) -> bool {
        BACKBONE_NAMES.contains(&self.name.trim())
    }

    pub fn distance(&self, other: &Atom) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn clone_atom(&self) -> Atom {
        self.clone()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>4} {:>7.3} {:>7.3} {:>7.3}",
            self.name.trim(),
            self.x,
            self.y,
            self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_atom() {
        let atom = Atom::default();
        assert_eq!(0.0, atom.x);
    }

    #[test]
    fn test_assign_element_and_mass() {
        let atom = Atom::new(1, "CA", "", "A", "ALA", 1, "", 0.0, 0.0, 0.0, 1.0, 0.0, None).unwrap();
        assert_eq!("C", atom.element);
        assert_eq!(MASSES["C"], atom.mass);
    }

    #[test]
    fn test_unrecognized_element_is_error() {
        let result = Atom::new(
            1, "Ty", "", "A", "BSG", 1, "", 0.0, 0.0, 0.0, 1.0, 0.0, Some("Ty"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_is_hydrogen() {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 1.0, 2.0, -3.0, 1.0, 0.0, None).unwrap();
        let atom2 = Atom::default();
        assert!(!atom1.is_hydrogen());
        assert!(atom2.is_hydrogen());
    }

    #[test]
    fn test_is_backbone() {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 1.0, 2.0, -3.0, 1.0, 0.0, None).unwrap();
        let atom2 = Atom::default();
        assert!(atom1.is_backbone());
        assert!(!atom2.is_backbone());
    }

    #[test]
    fn test_distance() {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 1.0, 2.0, 2.0, 1.0, 0.0, None).unwrap();
        let atom2 = Atom::default();
        assert!((atom1.distance(&atom2) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_clone() {
        let atom1 = Atom::default();
        let mut atom2 = atom1.clone_atom();
        assert_eq!(atom1, atom2);
        atom2.name = "C".to_string();
        assert_ne!(atom1, atom2);
    }

    #[test]
    fn test_to_string() {
        let atom1 = Atom::new(1, "CA", "", "A", "ALA", 1, "", 1.0, 2.0, 2.0, 1.0, 0.0, None).unwrap();
        assert_eq!("  CA   1.000   2.000   2.000", format!("{}", atom1));
    }
}
