use super::{Solution, Solver};
use crate::candidate::{BestCandidate, Candidate};
use crate::frequency::{score_text, ReferenceDistribution};
use cryptan_cipher::{Cipher, CipherKey, CipherKind, AFFINE_MULTIPLIERS, ALPHABET_SIZE};

/// Exhaustive search over the 12 × 26 valid (a, b) pairs
#[derive(Debug, Clone, Default)]
pub struct AffineSolver {
    reference: ReferenceDistribution,
}

impl AffineSolver {
    pub fn new(reference: ReferenceDistribution) -> Self {
        Self { reference }
    }

    /// Multipliers in ascending order, offsets 0..26 within each; the
    /// first pair reaching the minimum score wins.
    pub fn best_pair(&self, ciphertext: &[u8]) -> (Candidate<(u8, u8)>, usize) {
        let mut buffer = Vec::with_capacity(ciphertext.len());
        let mut best = BestCandidate::new();

        for &a in &AFFINE_MULTIPLIERS {
            for b in 0..ALPHABET_SIZE as u8 {
                // Every listed multiplier is invertible mod 26
                if Cipher::affine_decrypt_into(ciphertext, a, b, &mut buffer).is_err() {
                    continue;
                }
                let score = score_text(&buffer, &self.reference);
                tracing::trace!(a, b, score, "affine trial");
                best.offer((a, b), score, &buffer);
            }
        }

        let trials = best.trials();
        let winner = best.into_best().unwrap_or_else(|| Candidate {
            key: (1, 0),
            plaintext: ciphertext.to_vec(),
            score: 0.0,
        });
        (winner, trials)
    }
}

impl Solver for AffineSolver {
    fn kind(&self) -> CipherKind {
        CipherKind::Affine
    }

    fn solve(&self, ciphertext: &[u8]) -> Solution {
        let (best, trials) = self.best_pair(ciphertext);
        let (a, b) = best.key;
        tracing::debug!(a, b, score = best.score, trials, "affine solved");
        Solution::new(CipherKey::Affine { a, b }, best.plaintext, best.score, trials)
    }
}
