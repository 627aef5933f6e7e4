//! Sample-crack-check harness
//!
//! For every cipher family, draw samples from the corpus, run the matching
//! solver on the ciphertext alone and ask the oracle whether the recovered
//! plaintext is right. The first failure stops the run.

use anyhow::{bail, Result};
use cryptan_analysis::Analyzer;
use cryptan_cipher::{check_plaintext, CipherKind, Sampler, Verdict};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrialRecord {
    pub kind: CipherKind,
    pub round: usize,
    pub key: String,
    pub recovered_key: String,
    pub verdict: Verdict,
    pub passed: bool,
}

/// Rotation and Affine are exhaustive searches and must match exactly.
/// The other solvers are judged by letter agreement.
pub fn passes(kind: CipherKind, verdict: &Verdict, min_agreement: f64) -> bool {
    match kind {
        CipherKind::Rotation | CipherKind::Affine => verdict.matched,
        CipherKind::Vigenere | CipherKind::Substitution => {
            verdict.matched || verdict.agreement >= min_agreement
        }
    }
}

pub fn run(
    analyzer: &Analyzer,
    sampler: &mut Sampler,
    rounds: usize,
    min_agreement: f64,
) -> Result<Vec<TrialRecord>> {
    let mut records = Vec::with_capacity(rounds * CipherKind::ALL.len());

    for kind in CipherKind::ALL {
        for round in 1..=rounds {
            let sample = sampler.sample(kind)?;
            let solution = analyzer.solve(kind, &sample.ciphertext);
            let verdict = check_plaintext(&sample, &solution.plaintext);
            let passed = passes(kind, &verdict, min_agreement);

            let record = TrialRecord {
                kind,
                round,
                key: sample.key.to_string(),
                recovered_key: solution.key.to_string(),
                verdict,
                passed,
            };

            if passed {
                tracing::info!(
                    cipher = %kind,
                    round,
                    agreement = verdict.agreement,
                    "cryptanalysis succeeded"
                );
                records.push(record);
            } else {
                tracing::error!(
                    cipher = %kind,
                    round,
                    key = %record.key,
                    recovered = %record.recovered_key,
                    agreement = verdict.agreement,
                    "cryptanalysis failed"
                );
                bail!(
                    "{} failed on round {round}: key {} recovered as {} ({:.1}% letters correct)",
                    kind.name(),
                    record.key,
                    record.recovered_key,
                    verdict.agreement * 100.0
                );
            }
        }
    }

    Ok(records)
}
