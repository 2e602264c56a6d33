use super::views::DistributionEntry;
use crate::scoring::{ScoredBroker, MAX_SCORE};

/// Brokers ordered by score, highest first. Ties keep input order.
pub fn score_distribution(scored: &[ScoredBroker]) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = scored
        .iter()
        .map(|entry| DistributionEntry {
            name: entry.record.name.clone(),
            score: entry.result.score,
            status: entry.result.status,
            status_label: entry.result.status.label(),
            color: entry.result.status.color(),
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Plain-text horizontal bar chart, one line per broker.
pub fn render_bar_chart(entries: &[DistributionEntry], width: usize) -> String {
    let name_width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let filled = usize::from(entry.score) * width / usize::from(MAX_SCORE);
            format!(
                "{:<name_width$} | {:<width$} {:>3} ({})",
                entry.name,
                "#".repeat(filled),
                entry.score,
                entry.status_label,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
