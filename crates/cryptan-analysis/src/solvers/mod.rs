//! Per-cipher key searches
//!
//! Every solver takes ciphertext only and returns its best guess at the key
//! and plaintext. Solvers never fail: empty or letterless input yields a
//! trivial solution, and a wrong guess on too little text is simply a worse
//! `Solution`.

mod affine;
mod polyalphabetic;
mod rotation;
mod substitution;

pub use affine::AffineSolver;
pub use polyalphabetic::VigenereSolver;
pub use rotation::RotationSolver;
pub use substitution::SubstitutionSolver;

use crate::config::{AnalysisConfig, SubstitutionConfig};
use cryptan_cipher::{CipherKey, CipherKind, Dictionary};
use serde::{Serialize, Serializer};

/// Outcome of one cryptanalysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub kind: CipherKind,
    pub key: CipherKey,
    #[serde(serialize_with = "serialize_lossy")]
    pub plaintext: Vec<u8>,
    /// Fitness of the plaintext; lower is better. Chi-squared for the
    /// frequency solvers, negative log-likelihood per letter for
    /// substitution.
    pub score: f64,
    /// Number of candidate keys evaluated
    pub trials: usize,
    /// Share of plaintext letters that form dictionary words
    pub coverage: f64,
}

impl Solution {
    pub fn new(key: CipherKey, plaintext: Vec<u8>, score: f64, trials: usize) -> Self {
        let coverage = Dictionary::english().coverage(&plaintext);
        Self {
            kind: key.kind(),
            key,
            plaintext,
            score,
            trials,
            coverage,
        }
    }

    pub fn plaintext_lossy(&self) -> String {
        String::from_utf8_lossy(&self.plaintext).into_owned()
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// Key search for one cipher family
pub trait Solver: Send + Sync {
    fn kind(&self) -> CipherKind;

    fn solve(&self, ciphertext: &[u8]) -> Solution;
}

/// Best shift by chi-squared against English
pub fn solve_rotation(ciphertext: &[u8]) -> Solution {
    RotationSolver::default().solve(ciphertext)
}

/// Best (a, b) pair by chi-squared against English
pub fn solve_affine(ciphertext: &[u8]) -> Solution {
    AffineSolver::default().solve(ciphertext)
}

/// Vigenère solve with the default period bound and IC target
pub fn solve_polyalphabetic(ciphertext: &[u8]) -> Solution {
    VigenereSolver::from_config(&AnalysisConfig::default()).solve(ciphertext)
}

pub fn solve_substitution(ciphertext: &[u8], config: &SubstitutionConfig) -> Solution {
    SubstitutionSolver::new(config.clone()).solve(ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_serializes_plaintext_as_text() {
        let solution = Solution::new(CipherKey::Rotation(3), b"the end".to_vec(), 1.5, 26);
        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["plaintext"], "the end");
        assert_eq!(json["kind"], "rotation");
        assert_eq!(json["key"]["cipher"], "rotation");
        assert_eq!(json["trials"], 26);
    }

    #[test]
    fn test_solution_coverage() {
        let solution = Solution::new(CipherKey::Rotation(0), b"the river".to_vec(), 0.0, 1);
        assert_eq!(solution.coverage, 1.0);
        assert_eq!(solution.plaintext_lossy(), "the river");
    }
}
