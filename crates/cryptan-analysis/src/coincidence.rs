//! Index of coincidence and period estimation
//!
//! English text has an IC near 0.066, uniformly random letters near 0.038.
//! Splitting a polyalphabetic ciphertext by its true period gives groups
//! that are each monoalphabetic, so their average IC climbs back toward
//! the English value. That is the signal `estimate_key_length` follows.

use crate::frequency::LetterCounts;
use serde::Serialize;
use std::collections::HashMap;

/// Average group IC the key-length estimator aims for
pub const ENGLISH_TARGET_IC: f64 = 0.068;

/// Default upper bound on candidate periods
pub const DEFAULT_MAX_KEY_LENGTH: usize = 20;

/// Probability that two letters drawn from `text` are identical.
/// Fewer than two letters yields 0.
pub fn index_of_coincidence(text: &[u8]) -> f64 {
    index_of_coincidence_of_counts(&LetterCounts::from_text(text))
}

pub fn index_of_coincidence_of_counts(counts: &LetterCounts) -> f64 {
    let total = counts.total();
    if total <= 1 {
        return 0.0;
    }
    let pairs: usize = counts.counts().iter().map(|&n| n * n.saturating_sub(1)).sum();
    pairs as f64 / (total * (total - 1)) as f64
}

/// Split `text` into `period` interleaved groups; group g holds the bytes
/// at positions ≡ g (mod period), in their original order.
pub fn split_groups(text: &[u8], period: usize) -> Vec<Vec<u8>> {
    let period = period.max(1);
    let capacity = text.len().div_ceil(period);
    let mut groups: Vec<Vec<u8>> = (0..period).map(|_| Vec::with_capacity(capacity)).collect();
    for (i, &c) in text.iter().enumerate() {
        groups[i % period].push(c);
    }
    groups
}

/// Mean IC over the interleaved groups of `text` at `period`
pub fn average_group_ic(text: &[u8], period: usize) -> f64 {
    let groups = split_groups(text, period);
    let sum: f64 = groups.iter().map(|g| index_of_coincidence(g)).sum();
    sum / groups.len() as f64
}

/// Average group IC for one candidate period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodScore {
    pub period: usize,
    pub average_ic: f64,
}

/// Average group IC for every period in 1..=max_len
pub fn period_scores(text: &[u8], max_len: usize) -> Vec<PeriodScore> {
    (1..=max_len.max(1))
        .map(|period| PeriodScore {
            period,
            average_ic: average_group_ic(text, period),
        })
        .collect()
}

/// Period whose average group IC lies closest to `target_ic`.
/// The first (shortest) period wins ties; the result is at least 1.
pub fn estimate_key_length(text: &[u8], max_len: usize, target_ic: f64) -> usize {
    let mut best_period = 1;
    let mut best_diff = f64::INFINITY;

    for score in period_scores(text, max_len) {
        let diff = (score.average_ic - target_ic).abs();
        tracing::trace!(period = score.period, ic = score.average_ic, diff, "period candidate");
        if diff < best_diff {
            best_diff = diff;
            best_period = score.period;
        }
    }

    best_period
}

/// Kasiski examination: distances between repeated letter trigrams vote
/// for every divisor in 2..=max_len. Returns the five most voted periods,
/// most votes first, shorter periods first among equals.
pub fn kasiski_examination(text: &[u8], max_len: usize) -> Vec<usize> {
    let mut positions: HashMap<[u8; 3], Vec<usize>> = HashMap::new();

    for (i, window) in text.windows(3).enumerate() {
        if window.iter().all(|c| c.is_ascii_alphabetic()) {
            let trigram = [
                window[0].to_ascii_uppercase(),
                window[1].to_ascii_uppercase(),
                window[2].to_ascii_uppercase(),
            ];
            positions.entry(trigram).or_default().push(i);
        }
    }

    let mut votes: HashMap<usize, usize> = HashMap::new();
    for found in positions.values().filter(|p| p.len() > 1) {
        for pair in found.windows(2) {
            let dist = pair[1] - pair[0];
            for divisor in 2..=dist.min(max_len) {
                if dist % divisor == 0 {
                    *votes.entry(divisor).or_insert(0) += 1;
                }
            }
        }
    }

    let mut sorted: Vec<_> = votes.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.into_iter().take(5).map(|(k, _)| k).collect()
}
