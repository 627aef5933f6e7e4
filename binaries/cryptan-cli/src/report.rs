//! Terminal rendering for solutions, samples and analysis reports

use cryptan_analysis::{FrequencyAnalysis, PeriodScore, Solution};
use cryptan_cipher::Sample;

/// Longest plaintext excerpt printed in summaries
const PREVIEW_LEN: usize = 72;

pub fn preview(text: &[u8]) -> String {
    let text = String::from_utf8_lossy(text);
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() > PREVIEW_LEN {
        let cut: String = flat.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

pub fn render_solution(solution: &Solution, full: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "\n  {} ({})",
        solution.kind.name().to_uppercase(),
        solution.kind.category()
    ));
    lines.push(format!("  {}", "=".repeat(40)));
    lines.push(format!("  Key:       {}", solution.key));
    lines.push(format!("  Score:     {:.4}", solution.score));
    lines.push(format!("  Trials:    {}", solution.trials));
    lines.push(format!("  Coverage:  {:.1}%", solution.coverage * 100.0));
    if full {
        lines.push(String::new());
        lines.push(solution.plaintext_lossy());
    } else {
        lines.push(format!("  Plaintext: {}", preview(&solution.plaintext)));
    }
    lines.join("\n")
}

pub fn render_sample(sample: &Sample) -> String {
    let mut lines = Vec::new();
    lines.push(format!("\n  SAMPLE ({})", sample.kind.name().to_uppercase()));
    lines.push(format!("  {}", "=".repeat(40)));
    lines.push(format!("  Key: {}", sample.key));
    lines.push(String::new());
    lines.push("  PLAINTEXT:".to_string());
    lines.push(String::from_utf8_lossy(&sample.plaintext).into_owned());
    lines.push(String::new());
    lines.push("  CIPHERTEXT:".to_string());
    lines.push(String::from_utf8_lossy(&sample.ciphertext).into_owned());
    lines.join("\n")
}

pub fn render_analysis(
    analysis: &FrequencyAnalysis,
    periods: &[PeriodScore],
    estimated: usize,
    kasiski: &[usize],
) -> String {
    let mut lines = Vec::new();
    lines.push("\n  FREQUENCY ANALYSIS".to_string());
    lines.push("  ==================\n".to_string());
    lines.push(format!("  Total letters: {}", analysis.total_letters()));
    lines.push(format!("  Index of Coincidence: {:.4}", analysis.index_of_coincidence()));
    lines.push(format!("  Chi-squared (English): {:.4}", analysis.chi_squared_english()));

    lines.push("\n  TOP 5 LETTERS:".to_string());
    for (c, count) in analysis.top_letters(5) {
        lines.push(format!(
            "    {} - {} ({:.2}%)",
            c,
            count,
            analysis.frequency_percent(c as u8)
        ));
    }

    lines.push("\n  TOP 5 BIGRAMS:".to_string());
    for (bigram, count) in analysis.top_bigrams(5) {
        lines.push(format!("    {bigram} - {count}"));
    }

    lines.push("\n  PERIOD ESTIMATION:".to_string());
    for score in periods {
        let marker = if score.period == estimated { " <" } else { "" };
        lines.push(format!("    {:>2}: {:.4}{marker}", score.period, score.average_ic));
    }
    lines.push(format!("  Estimated period: {estimated}"));

    let kasiski: Vec<String> = kasiski.iter().map(|k| k.to_string()).collect();
    if kasiski.is_empty() {
        lines.push("  Kasiski: no repeated trigrams".to_string());
    } else {
        lines.push(format!("  Kasiski candidates: {}", kasiski.join(", ")));
    }

    lines.join("\n")
}
