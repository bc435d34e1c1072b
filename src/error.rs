//! Error taxonomy shared by every module in the crate.
//!
//! The math kernel and scoring functions never swallow an error: they
//! return the typed variant below and let callers decide. The setup
//! driver and the GSO binaries catch at the top level and print a
//! single-line summary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LightDockError {
    #[error("atom error: {0}")]
    Atom(String),

    #[error("PDB parsing error: {0}")]
    PdbParsing(String),

    #[error("potentials parsing error: {0}")]
    PotentialsParsing(String),

    #[error("GSO coordinates error: {0}")]
    GsoCoordinates(String),

    #[error("membrane setup error: {0}")]
    MembraneSetup(String),

    /// Recoverable anomaly. Callers may surface it as-is or retry with
    /// looser parameters; it is still a typed error rather than a panic.
    #[error("lightdock warning: {0}")]
    Warning(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LightDockError>;
