//! Cryptan Analysis: statistical cryptanalysis of classical ciphers
//!
//! Recovers keys and plaintext from ciphertext alone:
//! - Frequency scoring (chi-squared against English letter frequencies)
//! - Index of coincidence and key-length estimation
//! - Kasiski examination
//! - Key search for Rotation, Affine, Vigenère and Substitution ciphers
//!
//! ```no_run
//! use cryptan_analysis::{AnalysisConfig, Analyzer};
//! use cryptan_cipher::CipherKind;
//!
//! let analyzer = Analyzer::new(AnalysisConfig::default())?;
//! let solution = analyzer.solve(CipherKind::Rotation, b"Wkh txlfn eurzq ira");
//! println!("{} -> {}", solution.key, solution.plaintext_lossy());
//! # Ok::<(), cryptan_analysis::Error>(())
//! ```

pub mod candidate;
pub mod coincidence;
pub mod config;
pub mod frequency;
pub mod ngram;
pub mod solvers;

#[cfg(test)]
mod testdata;

pub use candidate::{BestCandidate, Candidate};
pub use coincidence::{
    estimate_key_length, index_of_coincidence, kasiski_examination, period_scores, PeriodScore,
};
pub use config::{AnalysisConfig, SubstitutionConfig};
pub use frequency::{
    chi_squared, score_text, FrequencyAnalysis, LetterCounts, ReferenceDistribution,
};
pub use ngram::LanguageModel;
pub use solvers::{
    solve_affine, solve_polyalphabetic, solve_rotation, solve_substitution, AffineSolver,
    RotationSolver, Solution, Solver, SubstitutionSolver, VigenereSolver,
};

use cryptan_cipher::CipherKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid reference distribution: {0}")]
    InvalidDistribution(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cipher error: {0}")]
    Cipher(#[from] cryptan_cipher::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One solver per cipher family, built from a validated configuration
pub struct Analyzer {
    rotation: RotationSolver,
    affine: AffineSolver,
    vigenere: VigenereSolver,
    substitution: SubstitutionSolver,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            max_key_length = config.max_key_length,
            target_ic = config.target_ic,
            steps = config.substitution.steps,
            restarts = config.substitution.restarts,
            "analyzer ready"
        );

        Ok(Self {
            rotation: RotationSolver::default(),
            affine: AffineSolver::default(),
            vigenere: VigenereSolver::from_config(&config),
            substitution: SubstitutionSolver::new(config.substitution),
        })
    }

    pub fn solver(&self, kind: CipherKind) -> &dyn Solver {
        match kind {
            CipherKind::Rotation => &self.rotation,
            CipherKind::Affine => &self.affine,
            CipherKind::Vigenere => &self.vigenere,
            CipherKind::Substitution => &self.substitution,
        }
    }

    pub fn solve(&self, kind: CipherKind, ciphertext: &[u8]) -> Solution {
        self.solver(kind).solve(ciphertext)
    }

    /// Run every solver, in `CipherKind::ALL` order
    pub fn solve_all(&self, ciphertext: &[u8]) -> Vec<Solution> {
        CipherKind::ALL
            .iter()
            .map(|&kind| self.solve(kind, ciphertext))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::UNSEEN_PASSAGES;
    use cryptan_cipher::{check_plaintext, Sampler};

    fn quick_config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.max_key_length = 10;
        config
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = AnalysisConfig::default();
        config.max_key_length = 0;
        assert!(matches!(Analyzer::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_solver_dispatch() {
        let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
        for kind in CipherKind::ALL {
            assert_eq!(analyzer.solver(kind).kind(), kind);
        }
    }

    #[test]
    fn test_cracks_sampled_monoalphabetic() {
        let analyzer = Analyzer::new(quick_config()).unwrap();
        let mut sampler = Sampler::new(2024);
        for kind in [CipherKind::Rotation, CipherKind::Affine] {
            for _ in 0..3 {
                let sample = sampler.sample(kind).unwrap();
                let solution = analyzer.solve(kind, &sample.ciphertext);
                assert!(check_plaintext(&sample, &solution.plaintext).matched, "{kind}");
                assert_eq!(solution.key, sample.key);
            }
        }
    }

    #[test]
    fn test_cracks_sampled_vigenere() {
        let analyzer = Analyzer::new(quick_config()).unwrap();
        let mut sampler = Sampler::new(77);
        for _ in 0..3 {
            let sample = sampler.sample(CipherKind::Vigenere).unwrap();
            let solution = analyzer.solve(CipherKind::Vigenere, &sample.ciphertext);
            let verdict = check_plaintext(&sample, &solution.plaintext);
            assert!(verdict.agreement >= 0.9, "key {}: {}", sample.key, verdict.agreement);
        }
    }

    #[test]
    fn test_cracks_unseen_text() {
        let analyzer = Analyzer::new(quick_config()).unwrap();
        let mut sampler = Sampler::new(4096);
        for passage in UNSEEN_PASSAGES {
            for kind in [CipherKind::Rotation, CipherKind::Affine, CipherKind::Vigenere] {
                let key = sampler.random_key(kind);
                let sample = sampler.sample_text(passage.as_bytes(), key).unwrap();
                let solution = analyzer.solve(kind, &sample.ciphertext);
                let verdict = check_plaintext(&sample, &solution.plaintext);
                match kind {
                    CipherKind::Vigenere => assert!(
                        verdict.agreement >= 0.95,
                        "key {}: {}",
                        sample.key,
                        verdict.agreement
                    ),
                    _ => assert!(verdict.matched, "{kind} key {}", sample.key),
                }
            }
        }
    }

    #[test]
    fn test_solve_all_order() {
        let mut config = quick_config();
        config.substitution.steps = 50;
        config.substitution.restarts = 1;
        let analyzer = Analyzer::new(config).unwrap();
        let kinds: Vec<CipherKind> = analyzer
            .solve_all(b"Gur dhvpx oebja sbk")
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, CipherKind::ALL.to_vec());
    }
}
