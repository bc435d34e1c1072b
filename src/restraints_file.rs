//! Parses restraint files: a plain-text mapping of `chain.res.num[ins]`
//! residue tokens to one of `active`/`passive`/`blocked`, per partner.
//!
//! One restraint per line: `<receptor|ligand> <active|passive|blocked>
//! <chain>.<residue_name>.<number>[<insertion>]`, e.g.
//! `receptor active A.SER.25`. Blank lines and lines starting with `#`
//! are ignored.

use crate::error::{LightDockError, Result};
use crate::structure::{Complex, Residue};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueToken {
    pub chain: String,
    pub residue_name: String,
    pub number: i64,
    pub insertion: String,
}

#[derive(Debug, Clone, Default)]
pub struct RestraintSet {
    pub active: Vec<ResidueToken>,
    pub passive: Vec<ResidueToken>,
    pub blocked: Vec<ResidueToken>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedRestraints {
    pub receptor: RestraintSet,
    pub ligand: RestraintSet,
}

fn split_trailing_insertion(field: &str) -> (&str, String) {
    match field.chars().last() {
        Some(last) if last.is_ascii_alphabetic() => (&field[..field.len() - 1], last.to_string()),
        _ => (field, String::new()),
    }
}

fn parse_residue_token(raw: &str) -> std::result::Result<ResidueToken, String> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return Err(format!("malformed residue token '{}', expected chain.res.num[ins]", raw));
    }
    let (num_digits, insertion) = split_trailing_insertion(parts[2]);
    let number: i64 = num_digits
        .parse()
        .map_err(|_| format!("malformed residue number '{}' in token '{}'", parts[2], raw))?;
    Ok(ResidueToken {
        chain: parts[0].to_string(),
        residue_name: parts[1].to_string(),
        number,
        insertion,
    })
}

/// Parses a restraint file into per-partner active/passive/blocked
/// residue token lists.
pub fn parse_restraints_file<P: AsRef<Path>>(path: P) -> Result<ParsedRestraints> {
    let contents = fs::read_to_string(path)?;
    let mut parsed = ParsedRestraints::default();

    for (line_no, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(LightDockError::Other(format!(
                "restraint file line {}: expected '<receptor|ligand> <active|passive|blocked> <token>', got '{}'",
                line_no + 1,
                line
            )));
        }

        let token = parse_residue_token(fields[2])
            .map_err(|e| LightDockError::Other(format!("restraint file line {}: {}", line_no + 1, e)))?;

        let set = match fields[0] {
            "receptor" => &mut parsed.receptor,
            "ligand" => &mut parsed.ligand,
            other => {
                return Err(LightDockError::Other(format!(
                    "restraint file line {}: unknown partner '{}'",
                    line_no + 1,
                    other
                )))
            }
        };

        match fields[1] {
            "active" => set.active.push(token),
            "passive" => set.passive.push(token),
            "blocked" => set.blocked.push(token),
            other => {
                return Err(LightDockError::Other(format!(
                    "restraint file line {}: unknown restraint kind '{}'",
                    line_no + 1,
                    other
                )))
            }
        }
    }

    Ok(parsed)
}

/// Looks up the residue a token names in a parsed complex.
pub fn resolve_token(complex: &Complex, token: &ResidueToken) -> Result<Residue> {
    complex
        .chains
        .iter()
        .find(|c| c.id.trim() == token.chain)
        .and_then(|c| {
            c.residues.iter().find(|r| {
                r.name.trim() == token.residue_name && r.number == token.number && r.insertion.trim() == token.insertion
            })
        })
        .cloned()
        .ok_or_else(|| {
            LightDockError::Other(format!(
                "restraint residue {}.{}.{}{} not found",
                token.chain, token.residue_name, token.number, token.insertion
            ))
        })
}

pub fn resolve_set(complex: &Complex, tokens: &[ResidueToken]) -> Result<Vec<Residue>> {
    tokens.iter().map(|t| resolve_token(complex, t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Atom, Chain};

    fn complex_with_residue(chain_id: &str, residue_name: &str, number: i64) -> Complex {
        let atom = Atom::new(1, "CA", "", chain_id, residue_name, number, "", 1.0, 2.0, 3.0, 1.0, 0.0, None).unwrap();
        let residue = Residue::new(residue_name, number, "", vec![atom]);
        let chain = Chain::new(chain_id, vec![residue]);
        Complex::new(vec![chain], vec!["test.pdb".to_string()])
    }

    #[test]
    fn test_parses_simple_restraint_file() {
        let path = std::env::temp_dir().join("lightdock_test_restraints_simple.txt");
        fs::write(&path, "receptor active A.SER.25\nligand passive B.GLY.10\nreceptor blocked A.ALA.1\n").unwrap();
        let parsed = parse_restraints_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(1, parsed.receptor.active.len());
        assert_eq!("A", parsed.receptor.active[0].chain);
        assert_eq!("SER", parsed.receptor.active[0].residue_name);
        assert_eq!(25, parsed.receptor.active[0].number);
        assert_eq!(1, parsed.ligand.passive.len());
        assert_eq!(1, parsed.receptor.blocked.len());
    }

    #[test]
    fn test_ignores_blank_and_comment_lines() {
        let path = std::env::temp_dir().join("lightdock_test_restraints_comments.txt");
        fs::write(&path, "# a comment\n\nreceptor active A.SER.25\n").unwrap();
        let parsed = parse_restraints_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(1, parsed.receptor.active.len());
    }

    #[test]
    fn test_parses_insertion_code() {
        let token = parse_residue_token("A.SER.25A").unwrap();
        assert_eq!(25, token.number);
        assert_eq!("A", token.insertion);
    }

    #[test]
    fn test_rejects_unknown_partner() {
        let path = std::env::temp_dir().join("lightdock_test_restraints_bad_partner.txt");
        fs::write(&path, "complex active A.SER.25\n").unwrap();
        let result = parse_restraints_file(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_token_finds_residue() {
        let complex = complex_with_residue("A", "SER", 25);
        let token = ResidueToken {
            chain: "A".to_string(),
            residue_name: "SER".to_string(),
            number: 25,
            insertion: String::new(),
        };
        let residue = resolve_token(&complex, &token).unwrap();
        assert_eq!("SER", residue.name);
    }

    #[test]
    fn test_resolve_token_missing_residue_errors() {
        let complex = complex_with_residue("A", "SER", 25);
        let token = ResidueToken {
            chain: "A".to_string(),
            residue_name: "GLY".to_string(),
            number: 99,
            insertion: String::new(),
        };
        assert!(resolve_token(&complex, &token).is_err());
    }
}
