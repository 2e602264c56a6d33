use super::views::StatusCountEntry;
use crate::scoring::{ComplianceStatus, ScoredBroker};
use serde::Serialize;

/// Portfolio-level KPIs folded from per-broker results.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub broker_count: usize,
    pub average_score: f64,
    pub highest_score: u8,
    pub lowest_score: u8,
    pub status_counts: Vec<StatusCountEntry>,
}

impl PortfolioSummary {
    pub fn from_results(scored: &[ScoredBroker]) -> Self {
        let broker_count = scored.len();
        let total: u64 = scored
            .iter()
            .map(|entry| u64::from(entry.result.score))
            .sum();
        let average_score = if broker_count > 0 {
            total as f64 / broker_count as f64
        } else {
            0.0
        };

        let highest_score = scored
            .iter()
            .map(|entry| entry.result.score)
            .max()
            .unwrap_or(0);
        let lowest_score = scored
            .iter()
            .map(|entry| entry.result.score)
            .min()
            .unwrap_or(0);

        let status_counts = ComplianceStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: scored
                    .iter()
                    .filter(|entry| entry.result.status == status)
                    .count(),
            })
            .collect();

        Self {
            broker_count,
            average_score,
            highest_score,
            lowest_score,
            status_counts,
        }
    }

    pub fn count_for(&self, status: ComplianceStatus) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
