use super::{Solution, Solver};
use crate::candidate::{BestCandidate, Candidate};
use crate::frequency::{score_text, ReferenceDistribution};
use cryptan_cipher::{Cipher, CipherKey, CipherKind, ALPHABET_SIZE};

/// Exhaustive search over the 26 additive shifts
#[derive(Debug, Clone, Default)]
pub struct RotationSolver {
    reference: ReferenceDistribution,
}

impl RotationSolver {
    pub fn new(reference: ReferenceDistribution) -> Self {
        Self { reference }
    }

    /// Try every shift and keep the decryption closest to the reference.
    /// Shift 0 is tried first, so letterless input resolves to shift 0.
    pub fn best_shift(&self, ciphertext: &[u8]) -> (Candidate<u8>, usize) {
        let mut buffer = Vec::with_capacity(ciphertext.len());
        let mut best = BestCandidate::new();

        for shift in 0..ALPHABET_SIZE as u8 {
            Cipher::rotation_decrypt_into(ciphertext, shift, &mut buffer);
            let score = score_text(&buffer, &self.reference);
            tracing::trace!(shift, score, "rotation trial");
            best.offer(shift, score, &buffer);
        }

        let trials = best.trials();
        let winner = best.into_best().unwrap_or_else(|| Candidate {
            key: 0,
            plaintext: ciphertext.to_vec(),
            score: 0.0,
        });
        (winner, trials)
    }
}

impl Solver for RotationSolver {
    fn kind(&self) -> CipherKind {
        CipherKind::Rotation
    }

    fn solve(&self, ciphertext: &[u8]) -> Solution {
        let (best, trials) = self.best_shift(ciphertext);
        tracing::debug!(shift = best.key, score = best.score, trials, "rotation solved");
        Solution::new(CipherKey::Rotation(best.key), best.plaintext, best.score, trials)
    }
}
