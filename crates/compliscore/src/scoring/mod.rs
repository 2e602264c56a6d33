//! Broker compliance scoring.
//!
//! Five pass/fail checks worth 20 points each are summed into a score, which
//! then maps onto a status tier. Evaluation is pure: every record is scored in
//! isolation and the same record always yields the same result.

pub mod domain;
mod rules;

pub use domain::{
    BrokerRecord, ComplianceCheck, ComplianceStatus, EvaluationResult, RecordError, ScoredBroker,
    MAX_SCORE, POINTS_PER_CHECK,
};

use tracing::debug;

/// Stateless evaluator applying the check table to broker records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, record: &BrokerRecord) -> EvaluationResult {
        evaluate(record)
    }

    /// Order-preserving map over `records`.
    pub fn evaluate_all(&self, records: &[BrokerRecord]) -> Vec<ScoredBroker> {
        records
            .iter()
            .map(|record| ScoredBroker {
                record: record.clone(),
                result: self.evaluate(record),
            })
            .collect()
    }
}

pub fn evaluate(record: &BrokerRecord) -> EvaluationResult {
    let failed_checks = rules::failed_checks(record);
    let passed = ComplianceCheck::ordered().len() - failed_checks.len();
    let score = POINTS_PER_CHECK * passed as u8;
    let status = ComplianceStatus::from_score(score);

    debug!(
        broker = %record.name,
        score,
        status = status.label(),
        "evaluated broker"
    );

    EvaluationResult {
        score,
        failed_checks,
        status,
    }
}
