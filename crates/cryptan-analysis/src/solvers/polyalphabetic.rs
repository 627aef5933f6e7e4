use super::rotation::RotationSolver;
use super::{Solution, Solver};
use crate::coincidence::{estimate_key_length, split_groups};
use crate::config::AnalysisConfig;
use crate::frequency::{score_text, ReferenceDistribution};
use cryptan_cipher::{Cipher, CipherKey, CipherKind};

/// Vigenère solver: estimate the period from the index of coincidence, then
/// solve each interleaved group as an independent rotation.
#[derive(Debug, Clone)]
pub struct VigenereSolver {
    reference: ReferenceDistribution,
    max_key_length: usize,
    target_ic: f64,
}

impl VigenereSolver {
    pub fn new(reference: ReferenceDistribution, max_key_length: usize, target_ic: f64) -> Self {
        Self {
            reference,
            max_key_length,
            target_ic,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(ReferenceDistribution::ENGLISH, config.max_key_length, config.target_ic)
    }

    /// Per-group shifts for an assumed `period`, with the total trial count
    pub fn key_for_period(&self, ciphertext: &[u8], period: usize) -> (Vec<u8>, usize) {
        let rotation = RotationSolver::new(self.reference);
        let mut trials = 0;
        let key = split_groups(ciphertext, period)
            .iter()
            .map(|group| {
                let (best, n) = rotation.best_shift(group);
                trials += n;
                best.key
            })
            .collect();
        (key, trials)
    }
}

impl Solver for VigenereSolver {
    fn kind(&self) -> CipherKind {
        CipherKind::Vigenere
    }

    fn solve(&self, ciphertext: &[u8]) -> Solution {
        let period = estimate_key_length(ciphertext, self.max_key_length, self.target_ic);
        let (key, trials) = self.key_for_period(ciphertext, period);

        // Shifts come from rotation searches, so they are in range and the
        // key has at least one entry
        let plaintext =
            Cipher::vigenere_decrypt(ciphertext, &key).unwrap_or_else(|_| ciphertext.to_vec());
        let score = score_text(&plaintext, &self.reference);

        let key = CipherKey::Vigenere(key);
        tracing::debug!(period, key = %key, score, trials, "vigenere solved");
        Solution::new(key, plaintext, score, trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::UNSEEN_PASSAGES;
    use cryptan_cipher::corpus::PASSAGES;
    use cryptan_cipher::letter_agreement;

    fn assert_recovers(solver: &VigenereSolver, plaintext: &[u8], key: &[u8], min_agreement: f64) {
        let ciphertext = Cipher::vigenere_encrypt(plaintext, key).unwrap();
        let solution = solver.solve(&ciphertext);
        let agreement = letter_agreement(plaintext, &solution.plaintext);
        assert!(agreement >= min_agreement, "key {key:?}: agreement {agreement}");

        if let CipherKey::Vigenere(found) = &solution.key {
            assert_eq!(found.len() % key.len(), 0, "period {}", found.len());
        } else {
            panic!("expected a Vigenère key, got {:?}", solution.key);
        }
    }

    fn bounded(max_key_length: usize) -> VigenereSolver {
        VigenereSolver::new(ReferenceDistribution::ENGLISH, max_key_length, 0.068)
    }

    #[test]
    fn test_recovers_four_letter_key() {
        // SEAL
        assert_recovers(&bounded(10), PASSAGES[0].as_bytes(), &[18, 4, 0, 11], 0.95);
    }

    #[test]
    fn test_recovers_five_letter_key() {
        // LEMON
        assert_recovers(&bounded(10), PASSAGES[3].as_bytes(), &[11, 4, 12, 14, 13], 0.95);
    }

    #[test]
    fn test_default_bound() {
        // Up to 20 periods; a multiple of the key still gives English groups
        let solver = VigenereSolver::from_config(&AnalysisConfig::default());
        assert_recovers(&solver, PASSAGES[2].as_bytes(), &[7, 0, 17, 1], 0.95);
    }

    #[test]
    fn test_recovers_unseen_text() {
        let solver = bounded(10);
        // SEAL, LEMON, CLOD
        for passage in UNSEEN_PASSAGES {
            assert_recovers(&solver, passage.as_bytes(), &[18, 4, 0, 11], 0.95);
            assert_recovers(&solver, passage.as_bytes(), &[11, 4, 12, 14, 13], 0.95);
            assert_recovers(&solver, passage.as_bytes(), &[2, 11, 14, 3], 0.95);
        }
        let solver = VigenereSolver::from_config(&AnalysisConfig::default());
        assert_recovers(&solver, UNSEEN_PASSAGES[1].as_bytes(), &[2, 14, 11, 3], 0.95);
    }

    #[test]
    fn test_known_period_gives_exact_key() {
        let plaintext = PASSAGES[7].as_bytes();
        let key = [2, 14, 3, 4]; // CODE
        let ciphertext = Cipher::vigenere_encrypt(plaintext, &key).unwrap();
        let solver = VigenereSolver::from_config(&AnalysisConfig::default());
        let (found, trials) = solver.key_for_period(&ciphertext, 4);
        assert_eq!(found, key.to_vec());
        assert_eq!(trials, 4 * 26);
    }

    #[test]
    fn test_single_shift_key_is_a_rotation() {
        let plaintext = PASSAGES[5].as_bytes();
        let ciphertext = Cipher::vigenere_encrypt(plaintext, &[9]).unwrap();
        let solution = bounded(6).solve(&ciphertext);
        assert_eq!(solution.plaintext, plaintext);
    }

    #[test]
    fn test_empty_input() {
        let solution = crate::solvers::solve_polyalphabetic(b"");
        assert_eq!(solution.key, CipherKey::Vigenere(vec![0]));
        assert!(solution.plaintext.is_empty());
    }
}
