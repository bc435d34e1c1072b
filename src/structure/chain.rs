use super::atom::Atom;
use super::residue::Residue;

#[derive(Debug, Clone)]
pub struct Chain {
    pub id: String,
    pub residues: Vec<Residue>,
}

impl Chain {
    pub fn new(id: &str, residues: Vec<Residue>) -> Self {
        Chain {
            id: id.to_string(),
            residues,
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues.iter().flat_map(|r| r.atoms.iter())
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_atoms() {
        let atom = Atom::new(1, "CA", "", "A", "ALA", 1, "", 0.0, 0.0, 0.0, 1.0, 0.0, None).unwrap();
        let residue = Residue::new("ALA", 1, "", vec![atom.clone(), atom]);
        let chain = Chain::new("A", vec![residue]);
        assert_eq!(2, chain.num_atoms());
    }
}
