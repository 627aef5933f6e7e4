//! Substitution solver
//!
//! A general substitution key has 26! candidates, so the search is
//! heuristic:
//!
//! 1. Seed the key by matching ciphertext letters to English letters in
//!    frequency rank order.
//! 2. Anneal: propose random two-letter swaps and accept them by the change
//!    in n-gram log-likelihood, sometimes taking a worse key while the
//!    temperature is high.
//! 3. Hill climb from the best annealed key over all 325 swaps until a full
//!    pass finds no improvement.
//!
//! The whole run is repeated from perturbed seeds and the best key kept.
//! The RNG is seeded from the configuration, so results are reproducible.

use super::{Solution, Solver};
use crate::config::SubstitutionConfig;
use crate::frequency::{LetterCounts, ReferenceDistribution};
use crate::ngram::{letter_indices, LanguageModel};
use cryptan_cipher::{Cipher, CipherKey, CipherKind, ALPHABET_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Lowest fraction of the initial temperature the schedule decays to
const MIN_TEMPERATURE_FRACTION: f64 = 0.01;

type Mapping = [u8; ALPHABET_SIZE];

pub struct SubstitutionSolver {
    reference: ReferenceDistribution,
    model: Arc<LanguageModel>,
    config: SubstitutionConfig,
}

impl SubstitutionSolver {
    pub fn new(config: SubstitutionConfig) -> Self {
        Self::with_model(ReferenceDistribution::ENGLISH, LanguageModel::english(), config)
    }

    pub fn with_model(
        reference: ReferenceDistribution,
        model: Arc<LanguageModel>,
        config: SubstitutionConfig,
    ) -> Self {
        Self {
            reference,
            model,
            config,
        }
    }

    /// Frequency-rank key: the i-th most common ciphertext letter decrypts
    /// to the i-th most expected reference letter.
    pub fn seed_mapping(&self, ciphertext: &[u8]) -> Mapping {
        let cipher_rank = LetterCounts::from_text(ciphertext).rank_order();
        let plain_rank = self.reference.rank_order();
        let mut mapping = [0u8; ALPHABET_SIZE];
        for (&c, &p) in cipher_rank.iter().zip(plain_rank.iter()) {
            mapping[c as usize] = p;
        }
        mapping
    }

    fn temperature(&self, step: usize) -> f64 {
        let steps = self.config.steps.max(1);
        let progress = step as f64 / steps as f64;
        self.config.initial_temperature * (1.0 - progress).max(MIN_TEMPERATURE_FRACTION)
    }
}

/// Search state for one ciphertext
struct Search<'a> {
    model: &'a LanguageModel,
    letters: Vec<u8>,
    trials: usize,
}

impl Search<'_> {
    fn score(&mut self, mapping: &Mapping) -> f64 {
        self.trials += 1;
        self.model.log_likelihood_mapped(&self.letters, mapping)
    }

    /// Simulated annealing from `start`; returns the best key visited
    fn anneal(
        &mut self,
        solver: &SubstitutionSolver,
        start: Mapping,
        rng: &mut StdRng,
    ) -> (Mapping, f64) {
        let mut key = start;
        let mut score = self.score(&key);
        let mut best = (key, score);

        for step in 0..solver.config.steps {
            let (a, b) = random_pair(rng);
            key.swap(a, b);

            let candidate = self.score(&key);
            let delta = candidate - score;
            let accept =
                delta > 0.0 || rng.gen::<f64>() < (delta / solver.temperature(step)).exp();

            if accept {
                score = candidate;
                if score > best.1 {
                    best = (key, score);
                }
            } else {
                key.swap(a, b);
            }
        }

        best
    }

    /// First-improvement hill climb over every swap until a full pass
    /// finds nothing better
    fn converge(&mut self, mut key: Mapping, mut score: f64) -> (Mapping, f64) {
        loop {
            let mut improved = false;
            for a in 0..ALPHABET_SIZE {
                for b in (a + 1)..ALPHABET_SIZE {
                    key.swap(a, b);
                    let candidate = self.score(&key);
                    if candidate > score {
                        score = candidate;
                        improved = true;
                    } else {
                        key.swap(a, b);
                    }
                }
            }
            if !improved {
                return (key, score);
            }
        }
    }
}

fn random_pair(rng: &mut StdRng) -> (usize, usize) {
    let a = rng.gen_range(0..ALPHABET_SIZE);
    let mut b = rng.gen_range(0..ALPHABET_SIZE - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

fn perturb(key: &Mapping, rng: &mut StdRng, swaps: usize) -> Mapping {
    let mut key = *key;
    for _ in 0..swaps {
        let (a, b) = random_pair(rng);
        key.swap(a, b);
    }
    key
}

impl Solver for SubstitutionSolver {
    fn kind(&self) -> CipherKind {
        CipherKind::Substitution
    }

    fn solve(&self, ciphertext: &[u8]) -> Solution {
        let seed = self.seed_mapping(ciphertext);
        let letters = letter_indices(ciphertext);

        if letters.is_empty() {
            let mut plaintext = Vec::with_capacity(ciphertext.len());
            Cipher::substitution_decrypt_into(ciphertext, &seed, &mut plaintext);
            return Solution::new(CipherKey::Substitution(seed), plaintext, 0.0, 0);
        }

        let mut search = Search {
            model: &self.model,
            letters,
            trials: 0,
        };
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best: Option<(Mapping, f64)> = None;

        for restart in 0..self.config.restarts.max(1) {
            let start = if restart == 0 {
                seed
            } else {
                perturb(&seed, &mut rng, restart + 2)
            };

            let (key, score) = search.anneal(self, start, &mut rng);
            let (key, score) = search.converge(key, score);
            tracing::trace!(restart, score, "substitution restart finished");

            match &best {
                Some((_, current)) if *current >= score => {}
                _ => best = Some((key, score)),
            }
        }

        let (key, log_likelihood) = best.unwrap_or((seed, f64::NEG_INFINITY));
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        Cipher::substitution_decrypt_into(ciphertext, &key, &mut plaintext);

        let score = -log_likelihood / search.letters.len() as f64;
        let trials = search.trials;
        let solution = Solution::new(CipherKey::Substitution(key), plaintext, score, trials);
        tracing::debug!(
            key = %solution.key,
            score,
            trials,
            coverage = solution.coverage,
            "substitution solved"
        );
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::solve_substitution;
    use crate::testdata::UNSEEN_PASSAGES;
    use cryptan_cipher::ciphers::is_permutation;
    use cryptan_cipher::corpus::PASSAGES;
    use cryptan_cipher::{letter_agreement, Sampler};

    fn encipher(passage: &str, seed: u64) -> (Vec<u8>, Vec<u8>) {
        let mut sampler = Sampler::new(seed);
        let key = sampler.random_key(CipherKind::Substitution);
        let sample = sampler.sample_text(passage.as_bytes(), key).unwrap();
        (sample.plaintext, sample.ciphertext)
    }

    #[test]
    fn test_recovers_unseen_text() {
        let solver = SubstitutionSolver::new(SubstitutionConfig::default());
        for (passage, seed) in UNSEEN_PASSAGES.iter().zip([11, 12]) {
            let (plaintext, ciphertext) = encipher(passage, seed);
            let solution = solver.solve(&ciphertext);
            let agreement = letter_agreement(&plaintext, &solution.plaintext);
            assert!(agreement >= 0.85, "seed {seed}: agreement {agreement}");
            assert!(solution.coverage > 0.8, "seed {seed}: coverage {}", solution.coverage);
        }
    }

    #[test]
    fn test_seed_follows_frequency_rank() {
        let solver = SubstitutionSolver::new(SubstitutionConfig::default());
        // X is the most common ciphertext letter, Q the second
        let mapping = solver.seed_mapping(b"xxxx qqq zz");
        assert_eq!(mapping[(b'X' - b'A') as usize], b'E' - b'A');
        assert_eq!(mapping[(b'Q' - b'A') as usize], b'T' - b'A');
        assert_eq!(mapping[(b'Z' - b'A') as usize], b'A' - b'A');
        assert!(is_permutation(&mapping));
    }

    #[test]
    fn test_result_is_a_permutation_and_reproducible() {
        let (_, ciphertext) = encipher(PASSAGES[3], 5);
        let config = SubstitutionConfig {
            steps: 500,
            restarts: 2,
            ..SubstitutionConfig::default()
        };
        let first = solve_substitution(&ciphertext, &config);
        let second = solve_substitution(&ciphertext, &config);
        assert_eq!(first.key, second.key);
        assert_eq!(first.plaintext, second.plaintext);
        match first.key {
            CipherKey::Substitution(mapping) => assert!(is_permutation(&mapping)),
            other => panic!("unexpected key {other:?}"),
        }
    }

    #[test]
    fn test_preserves_case_and_punctuation() {
        let (_, ciphertext) = encipher(PASSAGES[1], 2);
        let config = SubstitutionConfig {
            steps: 200,
            restarts: 1,
            ..SubstitutionConfig::default()
        };
        let solution = solve_substitution(&ciphertext, &config);
        assert_eq!(solution.plaintext.len(), ciphertext.len());
        for (p, c) in solution.plaintext.iter().zip(ciphertext.iter()) {
            assert_eq!(p.is_ascii_uppercase(), c.is_ascii_uppercase());
            assert_eq!(p.is_ascii_lowercase(), c.is_ascii_lowercase());
            if !c.is_ascii_alphabetic() {
                assert_eq!(p, c);
            }
        }
    }

    #[test]
    fn test_letterless_input() {
        let solution = SubstitutionSolver::new(SubstitutionConfig::default()).solve(b"12, 34!");
        assert_eq!(solution.plaintext, b"12, 34!");
        assert_eq!(solution.trials, 0);
        assert_eq!(solution.score, 0.0);
    }

    #[test]
    fn test_trial_count() {
        let (_, ciphertext) = encipher(PASSAGES[2], 9);
        let config = SubstitutionConfig {
            steps: 100,
            restarts: 3,
            ..SubstitutionConfig::default()
        };
        let solution = solve_substitution(&ciphertext, &config);
        // Per restart: one initial score, one per step, at least one full
        // hill-climb pass
        assert!(solution.trials >= 3 * (1 + 100 + 325), "trials {}", solution.trials);
    }
}
