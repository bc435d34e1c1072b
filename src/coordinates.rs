//! `Coordinates`: a fixed-dimension vector of reals that drives the
//! GSO engine's benchmark mode, and the file format used for
//! from-file initial populations.

use crate::error::{LightDockError, Result};
use std::fmt;
use std::fs;
use std::ops;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    values: Vec<f64>,
}

impl Coordinates {
    pub fn new(values: Vec<f64>) -> Self {
        Coordinates { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn clone_coordinates(&self) -> Coordinates {
        self.clone()
    }

    pub fn norm(&self) -> f64 {
        self.sum_of_squares().sqrt()
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    pub fn distance2(&self, other: &Coordinates) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    pub fn distance(&self, other: &Coordinates) -> f64 {
        self.distance2(other).sqrt()
    }

    /// Returns `self + step * (other - self) / |other - self|`.
    /// Identity when `other == self` (division by a zero norm is
    /// guarded rather than producing NaN).
    pub fn move_towards(&self, other: &Coordinates, step: f64) -> Coordinates {
        let delta = other.clone() - self.clone();
        let norm = delta.norm();
        if norm < 1e-10 {
            return self.clone();
        }
        self.clone() + delta * (step / norm)
    }
}

impl ops::Index<usize> for Coordinates {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl ops::IndexMut<usize> for Coordinates {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}

impl ops::Add for Coordinates {
    type Output = Coordinates;
    fn add(self, other: Coordinates) -> Coordinates {
        Coordinates::new(
            self.values
                .iter()
                .zip(other.values.iter())
                .map(|(a, b)| a + b)
                .collect(),
        )
    }
}

impl ops::Sub for Coordinates {
    type Output = Coordinates;
    fn sub(self, other: Coordinates) -> Coordinates {
        Coordinates::new(
            self.values
                .iter()
                .zip(other.values.iter())
                .map(|(a, b)| a - b)
                .collect(),
        )
    }
}

impl ops::Mul<f64> for Coordinates {
    type Output = Coordinates;
    fn mul(self, scalar: f64) -> Coordinates {
        Coordinates::new(self.values.iter().map(|v| v * scalar).collect())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.values.iter().map(|v| format!("{}", v)).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Reads one glowworm position per line from a whitespace-separated
/// text file. Fails with `GsoCoordinates` on a missing file, a
/// non-numeric token, or a row whose column count doesn't match
/// `dimension`.
pub struct CoordinatesFileReader {
    dimension: usize,
}

impl CoordinatesFileReader {
    pub fn new(dimension: usize) -> Self {
        CoordinatesFileReader { dimension }
    }

    pub fn get_coordinates_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Coordinates>> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            LightDockError::GsoCoordinates(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let mut result = Vec::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != self.dimension {
                return Err(LightDockError::GsoCoordinates(format!(
                    "line {} has {} columns, expected {}",
                    lineno + 1,
                    tokens.len(),
                    self.dimension
                )));
            }
            let mut values = Vec::with_capacity(self.dimension);
            for token in tokens {
                let value: f64 = token.parse().map_err(|_| {
                    LightDockError::GsoCoordinates(format!(
                        "line {}: '{}' is not a number",
                        lineno + 1,
                        token
                    ))
                })?;
                values.push(value);
            }
            result.push(Coordinates::new(values));
        }
        Ok(result)
    }
}
