pub mod atom;
pub mod chain;
pub mod complex;
pub mod pdbio;
pub mod residue;

pub use atom::Atom;
pub use chain::Chain;
pub use complex::Complex;
pub use residue::Residue;
