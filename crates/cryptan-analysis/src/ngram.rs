//! Letter n-gram language model
//!
//! Bigram and trigram log-probabilities estimated from the embedded English
//! corpus and the common-word dictionary. Used as the fitness function of
//! the substitution solver, where single-letter frequencies alone cannot
//! separate letters of similar rank.
//!
//! The passages supply n-grams that run across word boundaries; the word
//! list, weighted by frequency, supplies the spelling of words the passages
//! never use.

use cryptan_cipher::corpus::corpus_text;
use cryptan_cipher::{Dictionary, ALPHABET_SIZE};
use lazy_static::lazy_static;
use std::sync::Arc;

/// Additive smoothing so unseen n-grams keep a finite log-probability
const SMOOTHING: f64 = 0.5;

/// Weight of one dictionary count against one n-gram of running text
const WORD_LIST_WEIGHT: f64 = 1.0 / 60.0;

const BIGRAMS: usize = ALPHABET_SIZE * ALPHABET_SIZE;
const TRIGRAMS: usize = BIGRAMS * ALPHABET_SIZE;

lazy_static! {
    static ref ENGLISH_MODEL: Arc<LanguageModel> = Arc::new(LanguageModel::train_with_words(
        corpus_text().as_bytes(),
        Dictionary::english(),
        WORD_LIST_WEIGHT,
    ));
}

pub struct LanguageModel {
    bigram: Vec<f64>,
    trigram: Vec<f64>,
}

impl LanguageModel {
    /// Shared model trained on the embedded corpus and English dictionary
    pub fn english() -> Arc<LanguageModel> {
        Arc::clone(&ENGLISH_MODEL)
    }

    /// Estimate log-probabilities from the letters of `text`. Word breaks
    /// and punctuation are dropped, so n-grams run across word boundaries.
    pub fn train(text: &[u8]) -> Self {
        let mut counts = NgramCounts::new();
        counts.add(&letter_indices(text), 1.0);
        counts.into_model()
    }

    /// Like `train`, plus the n-grams inside every dictionary word, each
    /// counted `word.count * weight` times
    pub fn train_with_words(text: &[u8], words: &Dictionary, weight: f64) -> Self {
        let mut counts = NgramCounts::new();
        counts.add(&letter_indices(text), 1.0);
        for entry in words.iter() {
            counts.add(&letter_indices(entry.word.as_bytes()), entry.count as f64 * weight);
        }
        tracing::debug!(words = words.len(), weight, "added dictionary to language model");
        counts.into_model()
    }

    pub fn bigram_log_prob(&self, a: u8, b: u8) -> f64 {
        self.bigram[bigram_index(a, b)]
    }

    pub fn trigram_log_prob(&self, a: u8, b: u8, c: u8) -> f64 {
        self.trigram[trigram_index(a, b, c)]
    }

    /// Log-likelihood of a stream of alphabet indices (each in [0, 26)).
    /// Higher is more English-like.
    pub fn log_likelihood(&self, letters: &[u8]) -> f64 {
        self.log_likelihood_mapped(letters, &IDENTITY)
    }

    /// Log-likelihood of `letters` after sending each one through `mapping`,
    /// without materialising the mapped stream.
    pub fn log_likelihood_mapped(&self, letters: &[u8], mapping: &[u8; ALPHABET_SIZE]) -> f64 {
        let mut total = 0.0;
        for w in letters.windows(2) {
            total += self.bigram[bigram_index(mapping[w[0] as usize], mapping[w[1] as usize])];
        }
        for w in letters.windows(3) {
            total += self.trigram[trigram_index(
                mapping[w[0] as usize],
                mapping[w[1] as usize],
                mapping[w[2] as usize],
            )];
        }
        total
    }
}

const IDENTITY: [u8; ALPHABET_SIZE] = {
    let mut table = [0u8; ALPHABET_SIZE];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        table[i] = i as u8;
        i += 1;
    }
    table
};

/// Alphabet indices of the letters in `text`, uppercase-folded
pub fn letter_indices(text: &[u8]) -> Vec<u8> {
    text.iter()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase() - b'A')
        .collect()
}

fn bigram_index(a: u8, b: u8) -> usize {
    a as usize * ALPHABET_SIZE + b as usize
}

fn trigram_index(a: u8, b: u8, c: u8) -> usize {
    (a as usize * ALPHABET_SIZE + b as usize) * ALPHABET_SIZE + c as usize
}

/// Weighted n-gram tallies before normalisation
struct NgramCounts {
    bigram: Vec<f64>,
    trigram: Vec<f64>,
    letters: usize,
}

impl NgramCounts {
    fn new() -> Self {
        Self {
            bigram: vec![0.0; BIGRAMS],
            trigram: vec![0.0; TRIGRAMS],
            letters: 0,
        }
    }

    fn add(&mut self, letters: &[u8], weight: f64) {
        for w in letters.windows(2) {
            self.bigram[bigram_index(w[0], w[1])] += weight;
        }
        for w in letters.windows(3) {
            self.trigram[trigram_index(w[0], w[1], w[2])] += weight;
        }
        self.letters += letters.len();
    }

    fn into_model(self) -> LanguageModel {
        tracing::debug!(letters = self.letters, "trained language model");
        LanguageModel {
            bigram: log_probabilities(&self.bigram),
            trigram: log_probabilities(&self.trigram),
        }
    }
}

fn log_probabilities(counts: &[f64]) -> Vec<f64> {
    let total: f64 = counts.iter().sum();
    let denominator = total + SMOOTHING * counts.len() as f64;
    counts
        .iter()
        .map(|&n| ((n + SMOOTHING) / denominator).ln())
        .collect()
}
