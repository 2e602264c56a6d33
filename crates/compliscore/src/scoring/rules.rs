use super::domain::{BrokerRecord, ComplianceCheck};

pub(crate) const MIN_CAPITAL_ADEQUACY_PCT: f64 = 100.0;
pub(crate) const MAX_CLIENT_COMPLAINTS: u32 = 2;
pub(crate) const MAX_REPORTING_DELAY_DAYS: f64 = 1.0;

pub(crate) fn passes(check: ComplianceCheck, record: &BrokerRecord) -> bool {
    match check {
        ComplianceCheck::Kyc => record.kyc_completed,
        ComplianceCheck::CapitalAdequacy => {
            record.capital_adequacy_pct >= MIN_CAPITAL_ADEQUACY_PCT
        }
        ComplianceCheck::Complaints => complaints_within_limit(record),
        ComplianceCheck::ReportingDelay => delay_within_limit(record),
        ComplianceCheck::MajorBreach => {
            complaints_within_limit(record) && delay_within_limit(record)
        }
    }
}

fn complaints_within_limit(record: &BrokerRecord) -> bool {
    record.client_complaints <= MAX_CLIENT_COMPLAINTS
}

fn delay_within_limit(record: &BrokerRecord) -> bool {
    record.reporting_delay_days <= MAX_REPORTING_DELAY_DAYS
}

pub(crate) fn failed_checks(record: &BrokerRecord) -> Vec<ComplianceCheck> {
    ComplianceCheck::ordered()
        .into_iter()
        .filter(|check| !passes(*check, record))
        .collect()
}
