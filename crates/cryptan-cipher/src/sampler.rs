//! Ciphertext samples and the plaintext oracle
//!
//! `Sampler` picks a corpus passage, draws a random key for the requested
//! cipher and encrypts. `check_plaintext` is the correctness oracle used by
//! the trial harness.

use crate::ciphers::AFFINE_MULTIPLIERS;
use crate::corpus::PASSAGES;
use crate::{Cipher, CipherKey, CipherKind, Result, ALPHABET_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Vigenère keys drawn for samples are this long, inclusive
const VIGENERE_SAMPLE_LENGTHS: std::ops::RangeInclusive<usize> = 3..=8;

/// A plaintext, the key it was enciphered under and the result
#[derive(Debug, Clone)]
pub struct Sample {
    pub kind: CipherKind,
    pub key: CipherKey,
    pub plaintext: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Reproducible sampler
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Encrypt a random passage under a random key
    pub fn sample(&mut self, kind: CipherKind) -> Result<Sample> {
        let passage = PASSAGES[self.rng.gen_range(0..PASSAGES.len())];
        let key = self.random_key(kind);
        self.sample_text(passage.as_bytes(), key)
    }

    /// Encrypt caller-supplied plaintext under `key`
    pub fn sample_text(&mut self, plaintext: &[u8], key: CipherKey) -> Result<Sample> {
        let ciphertext = Cipher::encrypt(&key, plaintext)?;
        tracing::debug!(
            cipher = %key.kind(),
            key = %key,
            len = plaintext.len(),
            "generated sample"
        );
        Ok(Sample {
            kind: key.kind(),
            key,
            plaintext: plaintext.to_vec(),
            ciphertext,
        })
    }

    pub fn random_key(&mut self, kind: CipherKind) -> CipherKey {
        match kind {
            // Shift 0 would leave the text in the clear
            CipherKind::Rotation => CipherKey::Rotation(self.rng.gen_range(1..ALPHABET_SIZE as u8)),
            CipherKind::Affine => {
                let a = AFFINE_MULTIPLIERS[self.rng.gen_range(0..AFFINE_MULTIPLIERS.len())];
                let b = self.rng.gen_range(0..ALPHABET_SIZE as u8);
                CipherKey::Affine { a, b }
            }
            CipherKind::Vigenere => {
                let len = self.rng.gen_range(VIGENERE_SAMPLE_LENGTHS);
                CipherKey::Vigenere(
                    (0..len)
                        .map(|_| self.rng.gen_range(0..ALPHABET_SIZE as u8))
                        .collect(),
                )
            }
            CipherKind::Substitution => {
                let mut mapping = [0u8; ALPHABET_SIZE];
                for (i, m) in mapping.iter_mut().enumerate() {
                    *m = i as u8;
                }
                mapping.shuffle(&mut self.rng);
                CipherKey::Substitution(mapping)
            }
        }
    }
}

/// Oracle answer for one recovered plaintext
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    /// Byte-for-byte identical to the original plaintext
    pub matched: bool,
    /// Share of plaintext letters recovered correctly
    pub agreement: f64,
}

pub fn check_plaintext(sample: &Sample, plaintext: &[u8]) -> Verdict {
    Verdict {
        matched: sample.plaintext == plaintext,
        agreement: letter_agreement(&sample.plaintext, plaintext),
    }
}

/// Fraction of letter positions in `expected` that `actual` reproduces,
/// compared case-insensitively. Missing positions count as wrong.
pub fn letter_agreement(expected: &[u8], actual: &[u8]) -> f64 {
    let mut letters = 0usize;
    let mut agree = 0usize;
    for (i, &e) in expected.iter().enumerate() {
        if !e.is_ascii_alphabetic() {
            continue;
        }
        letters += 1;
        if actual.get(i).is_some_and(|a| a.eq_ignore_ascii_case(&e)) {
            agree += 1;
        }
    }
    if letters == 0 {
        1.0
    } else {
        agree as f64 / letters as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_is_reproducible() {
        let a = Sampler::new(42).sample(CipherKind::Vigenere).unwrap();
        let b = Sampler::new(42).sample(CipherKind::Vigenere).unwrap();
        assert_eq!(a.key, b.key);
        assert_eq!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_sample_decrypts_back() {
        let mut sampler = Sampler::new(7);
        for kind in CipherKind::ALL {
            let sample = sampler.sample(kind).unwrap();
            assert_eq!(sample.kind, kind);
            assert_eq!(sample.key.kind(), kind);
            let recovered = Cipher::decrypt(&sample.key, &sample.ciphertext).unwrap();
            assert_eq!(recovered, sample.plaintext);
        }
    }

    #[test]
    fn test_random_keys_are_valid() {
        let mut sampler = Sampler::new(1);
        for _ in 0..50 {
            match sampler.random_key(CipherKind::Rotation) {
                CipherKey::Rotation(s) => assert!((1..26).contains(&s)),
                other => panic!("unexpected {other:?}"),
            }
            match sampler.random_key(CipherKind::Affine) {
                CipherKey::Affine { a, b } => {
                    assert!(AFFINE_MULTIPLIERS.contains(&a));
                    assert!(b < 26);
                }
                other => panic!("unexpected {other:?}"),
            }
            match sampler.random_key(CipherKind::Vigenere) {
                CipherKey::Vigenere(k) => assert!(VIGENERE_SAMPLE_LENGTHS.contains(&k.len())),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_check_plaintext() {
        let mut sampler = Sampler::new(3);
        let sample = sampler.sample(CipherKind::Rotation).unwrap();
        let verdict = check_plaintext(&sample, &sample.plaintext.clone());
        assert!(verdict.matched);
        assert_eq!(verdict.agreement, 1.0);

        let verdict = check_plaintext(&sample, &sample.ciphertext);
        assert!(!verdict.matched);
        assert!(verdict.agreement < 0.2);
    }

    #[test]
    fn test_letter_agreement() {
        assert_eq!(letter_agreement(b"Ab, cd", b"aB, cx"), 0.75);
        assert_eq!(letter_agreement(b"abcd", b"ab"), 0.5);
        assert_eq!(letter_agreement(b"...", b""), 1.0);
    }
}
