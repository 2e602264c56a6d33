use serde::{Deserialize, Serialize};

/// Points awarded for every passing check.
pub const POINTS_PER_CHECK: u8 = 20;

/// Highest attainable score, reached when every check passes.
pub const MAX_SCORE: u8 = POINTS_PER_CHECK * ComplianceCheck::ordered().len() as u8;

/// Validation errors raised when a record is built from untrusted values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("broker name must not be empty")]
    EmptyName,
    #[error("{field} must be a finite, non-negative number (found {value})")]
    InvalidNumber { field: &'static str, value: f64 },
}

/// One broker row after coercion. Only ever built from validated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerRecord {
    pub name: String,
    pub kyc_completed: bool,
    pub capital_adequacy_pct: f64,
    pub client_complaints: u32,
    pub reporting_delay_days: f64,
}

impl BrokerRecord {
    pub fn new(
        name: impl Into<String>,
        kyc_completed: bool,
        capital_adequacy_pct: f64,
        client_complaints: u32,
        reporting_delay_days: f64,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }

        ensure_non_negative("capital adequacy %", capital_adequacy_pct)?;
        ensure_non_negative("reporting delay (days)", reporting_delay_days)?;

        Ok(Self {
            name,
            kyc_completed,
            capital_adequacy_pct,
            client_complaints,
            reporting_delay_days,
        })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecordError::InvalidNumber { field, value })
    }
}

/// The five rules, listed in the order they are evaluated and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCheck {
    Kyc,
    CapitalAdequacy,
    Complaints,
    ReportingDelay,
    /// Derived from `Complaints` and `ReportingDelay`: failing either of those
    /// also fails this check, so a single root cause costs 40 points.
    MajorBreach,
}

impl ComplianceCheck {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Kyc,
            Self::CapitalAdequacy,
            Self::Complaints,
            Self::ReportingDelay,
            Self::MajorBreach,
        ]
    }

    /// Label reported when the check fails.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kyc => "KYC not completed",
            Self::CapitalAdequacy => "Capital adequacy < 100%",
            Self::Complaints => "Complaints > 2",
            Self::ReportingDelay => "Reporting delay > 1 day",
            Self::MajorBreach => "Major breaches present",
        }
    }
}

/// Status tier derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsAttention,
    NonCompliant,
}

impl ComplianceStatus {
    pub const COMPLIANT_FLOOR: u8 = 80;
    pub const NEEDS_ATTENTION_FLOOR: u8 = 50;

    pub const fn ordered() -> [Self; 3] {
        [Self::Compliant, Self::NeedsAttention, Self::NonCompliant]
    }

    pub const fn from_score(score: u8) -> Self {
        if score >= Self::COMPLIANT_FLOOR {
            Self::Compliant
        } else if score >= Self::NEEDS_ATTENTION_FLOOR {
            Self::NeedsAttention
        } else {
            Self::NonCompliant
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NeedsAttention => "Needs Attention",
            Self::NonCompliant => "Non-Compliant",
        }
    }

    /// Hex color used by tables and charts.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Compliant => "#2e7d32",
            Self::NeedsAttention => "#f9a825",
            Self::NonCompliant => "#c62828",
        }
    }
}

/// Outcome of scoring a single broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub failed_checks: Vec<ComplianceCheck>,
    pub status: ComplianceStatus,
}

impl EvaluationResult {
    pub fn failed_labels(&self) -> Vec<&'static str> {
        self.failed_checks
            .iter()
            .map(|check| check.label())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed_checks.is_empty()
    }
}

/// A broker row paired with its evaluation, as consumed by reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBroker {
    pub record: BrokerRecord,
    pub result: EvaluationResult,
}
