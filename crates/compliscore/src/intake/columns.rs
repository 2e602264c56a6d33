pub const BROKER_NAME: &str = "Broker Name";
pub const KYC_COMPLETED: &str = "KYC Completed (Y/N)";
pub const CAPITAL_ADEQUACY: &str = "Capital Adequacy %";
pub const CLIENT_COMPLAINTS: &str = "Client Complaints";
pub const REPORTING_DELAY: &str = "Reporting Delay (days)";

/// Columns every input table must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    BROKER_NAME,
    KYC_COMPLETED,
    CAPITAL_ADEQUACY,
    CLIENT_COMPLAINTS,
    REPORTING_DELAY,
];

pub(crate) fn normalize_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Required columns absent from `headers`, in required order.
pub(crate) fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .map(|required| required.to_string())
        .collect()
}
