pub mod chart;
pub mod export;
mod summary;
pub mod views;

pub use chart::{render_bar_chart, score_distribution};
pub use export::{normalize_glyphs, report_file_name, ExportError, ReportFormat};
pub use summary::PortfolioSummary;
pub use views::{broker_views, DistributionEntry, ScoredBrokerView, StatusCountEntry};

use crate::intake::DataSource;
use crate::scoring::ScoredBroker;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Everything the presentation layer needs for one scored table.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub generated_at: NaiveDateTime,
    pub source: DataSource,
    pub summary: PortfolioSummary,
    pub brokers: Vec<ScoredBrokerView>,
    #[serde(skip)]
    pub distribution: Vec<DistributionEntry>,
}

impl ComplianceReport {
    pub fn build(source: DataSource, scored: &[ScoredBroker], generated_at: NaiveDateTime) -> Self {
        Self {
            generated_at,
            source,
            summary: PortfolioSummary::from_results(scored),
            brokers: broker_views(scored),
            distribution: score_distribution(scored),
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ExportError> {
        export::render(self, format)
    }

    pub fn file_name(&self, format: ReportFormat) -> String {
        report_file_name(self.generated_at, format)
    }
}
