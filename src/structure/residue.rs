use super::atom::Atom;

const DUMMY_RESIDUE_NAME: &str = "DUM";

#[derive(Debug, Clone)]
pub struct Residue {
    pub name: String,
    pub number: i64,
    pub insertion: String,
    pub atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(name: &str, number: i64, insertion: &str, atoms: Vec<Atom>) -> Self {
        Residue {
            name: name.to_string(),
            number,
            insertion: insertion.to_string(),
            atoms,
        }
    }

    /// A placeholder residue used to carry a single coordinate (e.g. an
    /// ANM pseudo-atom or a membrane bead) that has no real PDB record.
    pub fn dummy(x: f64, y: f64, z: f64) -> Self {
        let atom = Atom::new(
            0,
            "CA",
            "",
            "",
            DUMMY_RESIDUE_NAME,
            0,
            "",
            x,
            y,
            z,
            1.0,
            0.0,
            Some("C"),
        )
        .expect("dummy residue atom is always valid");
        Residue::new(DUMMY_RESIDUE_NAME, 0, "", vec![atom])
    }

    pub fn get_atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name.trim() == name.trim())
    }

    pub fn get_calpha(&self) -> Option<&Atom> {
        self.get_atom("CA")
    }

    pub fn is_standard(&self) -> bool {
        self.name != DUMMY_RESIDUE_NAME
    }
}
