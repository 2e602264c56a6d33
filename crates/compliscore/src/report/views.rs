use crate::scoring::{ComplianceCheck, ComplianceStatus, ScoredBroker};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredBrokerView {
    pub name: String,
    pub kyc_completed: bool,
    pub capital_adequacy_pct: f64,
    pub client_complaints: u32,
    pub reporting_delay_days: f64,
    pub score: u8,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub failed_checks: Vec<ComplianceCheck>,
    pub failed_labels: Vec<&'static str>,
}

impl ScoredBrokerView {
    pub fn failed_summary(&self) -> String {
        self.failed_labels.join(", ")
    }
}

impl From<&ScoredBroker> for ScoredBrokerView {
    fn from(scored: &ScoredBroker) -> Self {
        let record = &scored.record;
        let result = &scored.result;
        Self {
            name: record.name.clone(),
            kyc_completed: record.kyc_completed,
            capital_adequacy_pct: record.capital_adequacy_pct,
            client_complaints: record.client_complaints,
            reporting_delay_days: record.reporting_delay_days,
            score: result.score,
            status: result.status,
            status_label: result.status.label(),
            status_color: result.status.color(),
            failed_checks: result.failed_checks.clone(),
            failed_labels: result.failed_labels(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionEntry {
    pub name: String,
    pub score: u8,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub color: &'static str,
}

pub fn broker_views(scored: &[ScoredBroker]) -> Vec<ScoredBrokerView> {
    scored.iter().map(ScoredBrokerView::from).collect()
}
