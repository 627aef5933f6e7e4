//! Letter frequency statistics
//!
//! The reference English distribution, per-sample letter counts, the
//! chi-squared goodness-of-fit score and a printable frequency report.

use crate::coincidence::index_of_coincidence_of_counts;
use crate::{Error, Result};
use cryptan_cipher::ALPHABET_SIZE;
use std::collections::HashMap;

/// Expected share of each letter A..Z in English text, in percent
pub const ENGLISH_PERCENT: [f64; ALPHABET_SIZE] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153,
    0.772, 4.025, 2.406, 6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056,
    2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Expected letter percentages a candidate plaintext is scored against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDistribution {
    percent: [f64; ALPHABET_SIZE],
}

impl ReferenceDistribution {
    pub const ENGLISH: ReferenceDistribution = ReferenceDistribution {
        percent: ENGLISH_PERCENT,
    };

    /// Every entry must be finite and strictly positive, otherwise the
    /// chi-squared denominator could vanish.
    pub fn new(percent: [f64; ALPHABET_SIZE]) -> Result<Self> {
        if let Some((i, p)) = percent
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(Error::InvalidDistribution(format!(
                "letter {} has expected frequency {p}",
                (b'A' + i as u8) as char
            )));
        }
        Ok(Self { percent })
    }

    pub fn percent(&self) -> &[f64; ALPHABET_SIZE] {
        &self.percent
    }

    /// Letters from most to least expected; ties keep alphabetical order
    pub fn rank_order(&self) -> [u8; ALPHABET_SIZE] {
        let mut letters: Vec<u8> = (0..ALPHABET_SIZE as u8).collect();
        letters.sort_by(|&a, &b| self.percent[b as usize].total_cmp(&self.percent[a as usize]));
        to_array(&letters)
    }
}

impl Default for ReferenceDistribution {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Raw per-letter occurrence counts of one sample (case-insensitive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: [usize; ALPHABET_SIZE],
    total: usize,
}

impl LetterCounts {
    pub fn from_text(text: &[u8]) -> Self {
        let mut counts = [0usize; ALPHABET_SIZE];
        let mut total = 0;
        for &c in text {
            if c.is_ascii_alphabetic() {
                counts[(c.to_ascii_uppercase() - b'A') as usize] += 1;
                total += 1;
            }
        }
        Self { counts, total }
    }

    pub fn counts(&self) -> &[usize; ALPHABET_SIZE] {
        &self.counts
    }

    /// Number of alphabetic symbols counted
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, letter: u8) -> usize {
        self.counts
            .get(letter.to_ascii_uppercase().wrapping_sub(b'A') as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Letters from most to least frequent; ties keep alphabetical order
    pub fn rank_order(&self) -> [u8; ALPHABET_SIZE] {
        let mut letters: Vec<u8> = (0..ALPHABET_SIZE as u8).collect();
        letters.sort_by(|&a, &b| self.counts[b as usize].cmp(&self.counts[a as usize]));
        to_array(&letters)
    }
}

/// Chi-squared statistic of observed counts against expected percentages.
/// Lower means closer to the reference. An empty sample scores 0.
pub fn chi_squared(
    observed: &[usize; ALPHABET_SIZE],
    expected_percent: &[f64; ALPHABET_SIZE],
    sample_length: usize,
) -> f64 {
    if sample_length == 0 {
        return 0.0;
    }
    let n = sample_length as f64;
    observed
        .iter()
        .zip(expected_percent.iter())
        .map(|(&o, &p)| {
            let expected = p * n / 100.0;
            let diff = o as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Chi-squared of a candidate text against `reference`
pub fn score_text(text: &[u8], reference: &ReferenceDistribution) -> f64 {
    let counts = LetterCounts::from_text(text);
    chi_squared(counts.counts(), reference.percent(), counts.total())
}

fn to_array(letters: &[u8]) -> [u8; ALPHABET_SIZE] {
    let mut out = [0u8; ALPHABET_SIZE];
    out.copy_from_slice(&letters[..ALPHABET_SIZE]);
    out
}

/// Frequency report for one text: letters, bigrams, IC and chi-squared
pub struct FrequencyAnalysis {
    pub letters: LetterCounts,
    pub bigrams: HashMap<String, usize>,
}

impl FrequencyAnalysis {
    pub fn analyze(text: &[u8]) -> Self {
        let letters = LetterCounts::from_text(text);
        let stream: Vec<u8> = text
            .iter()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let mut bigrams: HashMap<String, usize> = HashMap::new();
        for window in stream.windows(2) {
            let bigram = String::from_utf8_lossy(window).into_owned();
            *bigrams.entry(bigram).or_insert(0) += 1;
        }

        Self { letters, bigrams }
    }

    pub fn total_letters(&self) -> usize {
        self.letters.total()
    }

    /// Share of `letter` among all letters, in percent
    pub fn frequency_percent(&self, letter: u8) -> f64 {
        if self.letters.total() == 0 {
            return 0.0;
        }
        self.letters.get(letter) as f64 / self.letters.total() as f64 * 100.0
    }

    pub fn index_of_coincidence(&self) -> f64 {
        index_of_coincidence_of_counts(&self.letters)
    }

    pub fn chi_squared_english(&self) -> f64 {
        chi_squared(self.letters.counts(), &ENGLISH_PERCENT, self.letters.total())
    }

    /// Most frequent letters, skipping ones that never occur
    pub fn top_letters(&self, n: usize) -> Vec<(char, usize)> {
        self.letters
            .rank_order()
            .iter()
            .map(|&l| ((b'A' + l) as char, self.letters.counts()[l as usize]))
            .filter(|&(_, count)| count > 0)
            .take(n)
            .collect()
    }

    pub fn top_bigrams(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted: Vec<_> = self.bigrams.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        sorted.into_iter().take(n).map(|(s, &n)| (s.clone(), n)).collect()
    }

    /// Render as ASCII frequency chart
    pub fn render_ascii(&self) -> String {
        let mut lines = Vec::new();
        lines.push("FREQUENCY ANALYSIS".to_string());
        lines.push("═".repeat(40));

        let max_count = self.letters.counts().iter().copied().max().unwrap_or(0).max(1);
        let scale = 30.0 / max_count as f64;

        for letter in b'A'..=b'Z' {
            let count = self.letters.get(letter);
            let bar = "█".repeat((count as f64 * scale) as usize);
            let expected = ENGLISH_PERCENT[(letter - b'A') as usize];
            lines.push(format!(
                "{}: {:5.2}% ({:5.2}%) |{}",
                letter as char,
                self.frequency_percent(letter),
                expected,
                bar
            ));
        }

        lines.push(String::new());
        lines.push(format!("Index of Coincidence: {:.4}", self.index_of_coincidence()));
        lines.push(format!("Chi-squared (English): {:.4}", self.chi_squared_english()));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chi_squared_exact_fit_is_zero() {
        // 1000 letters distributed exactly as a uniform reference
        let uniform = ReferenceDistribution::new([100.0 / 26.0; 26]).unwrap();
        let observed = [10usize; 26];
        let score = chi_squared(&observed, uniform.percent(), 260);
        assert!(score.abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_chi_squared_prefers_english() {
        let english = b"It was the best of times and the worst of times, a season of light";
        let shifted = cryptan_cipher::Cipher::rotation_encrypt(english, 11);
        let reference = ReferenceDistribution::ENGLISH;
        assert!(score_text(english, &reference) < score_text(&shifted, &reference));
    }

    #[test]
    fn test_chi_squared_empty_sample() {
        assert_eq!(chi_squared(&[0; 26], &ENGLISH_PERCENT, 0), 0.0);
        assert_eq!(score_text(b"1234 !!", &ReferenceDistribution::ENGLISH), 0.0);
    }

    #[test]
    fn test_reference_rejects_zero_entries() {
        let mut percent = ENGLISH_PERCENT;
        percent[25] = 0.0;
        assert!(matches!(
            ReferenceDistribution::new(percent),
            Err(Error::InvalidDistribution(_))
        ));
        percent[25] = f64::NAN;
        assert!(ReferenceDistribution::new(percent).is_err());
    }

    #[test]
    fn test_english_rank_order() {
        let order = ReferenceDistribution::ENGLISH.rank_order();
        assert_eq!(&order[..4], &[b'E' - b'A', b'T' - b'A', b'A' - b'A', b'O' - b'A']);
        assert_eq!(order[25], b'Z' - b'A');
    }

    #[test]
    fn test_letter_counts() {
        let counts = LetterCounts::from_text(b"Hello, World!");
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.get(b'l'), 3);
        assert_eq!(counts.get(b'O'), 2);
        assert_eq!(counts.get(b'!'), 0);
        assert_eq!(counts.rank_order()[0], b'L' - b'A');
    }

    #[test]
    fn test_frequency_analysis() {
        let analysis = FrequencyAnalysis::analyze(b"AAABBC");
        let top = analysis.top_letters(2);
        assert_eq!(top, vec![('A', 3), ('B', 2)]);
        assert_eq!(analysis.top_bigrams(1), vec![("AA".to_string(), 2)]);
        assert!((analysis.frequency_percent(b'a') - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_ascii_lists_every_letter() {
        let chart = FrequencyAnalysis::analyze(b"hello world").render_ascii();
        assert!(chart.contains("L: 30.00%"));
        assert!(chart.contains("Z:  0.00%"));
        assert!(chart.contains("Index of Coincidence"));
    }
}
