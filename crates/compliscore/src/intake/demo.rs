use super::columns::REQUIRED_COLUMNS;
use super::{parser, IntakeError};
use crate::scoring::BrokerRecord;

pub const DEFAULT_DEMO_ROWS: usize = 30;

/// Largest demo dataset that may be requested.
pub const MAX_DEMO_ROWS: usize = 10_000;

const BROKER_PREFIXES: [&str; 30] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Theta", "Lambda", "Orion", "Nova",
    "Apex", "Summit", "Pioneer", "Vertex", "Atlas", "Crown", "Harbor", "Cobalt", "Sterling",
    "Quantum", "Falcon", "Aurora", "Nimbus", "Horizon", "Frontier", "Regal", "Everest", "Beacon",
    "Crescent", "Keystone",
];

const BROKER_SUFFIXES: [&str; 10] = [
    "Securities",
    "Capital",
    "Investments",
    "Wealth",
    "Brokerage",
    "Advisors",
    "Markets",
    "Partners",
    "Financial",
    "Holdings",
];

fn broker_name(index: usize) -> String {
    let prefix = BROKER_PREFIXES[index % BROKER_PREFIXES.len()];
    let suffix = BROKER_SUFFIXES[(index * 3) % BROKER_SUFFIXES.len()];
    format!("{prefix} {suffix}")
}

/// Renders `rows` demo brokers as CSV text using the upload schema.
pub fn demo_csv(rows: usize) -> Result<String, IntakeError> {
    if rows > MAX_DEMO_ROWS {
        return Err(IntakeError::TooManyDemoRows {
            requested: rows,
            max: MAX_DEMO_ROWS,
        });
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REQUIRED_COLUMNS)?;

    for index in 0..rows {
        let kyc = if index % 3 != 0 { "Y" } else { "N" };
        let capital = 90 + (index * 11) % 40;
        let complaints = (index * 2) % 7;
        let delay = index % 4;

        writer.write_record([
            broker_name(index),
            kyc.to_string(),
            capital.to_string(),
            complaints.to_string(),
            delay.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| IntakeError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| {
        IntakeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

/// Demo brokers, decoded through the same parser as uploaded files.
pub fn demo_records(rows: usize) -> Result<Vec<BrokerRecord>, IntakeError> {
    let csv = demo_csv(rows)?;
    parser::parse_records(csv.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_names_cycle_prefixes_and_suffixes() {
        assert_eq!(broker_name(0), "Alpha Securities");
        assert_eq!(broker_name(1), "Beta Wealth");
        assert_eq!(broker_name(4), "Epsilon Investments");
        assert_eq!(broker_name(29), "Keystone Partners");
    }

    #[test]
    fn demo_rows_follow_fixed_spread() {
        let records = demo_records(DEFAULT_DEMO_ROWS).expect("demo data parses");

        assert_eq!(records.len(), DEFAULT_DEMO_ROWS);

        let first = &records[0];
        assert!(!first.kyc_completed);
        assert_eq!(first.capital_adequacy_pct, 90.0);
        assert_eq!(first.client_complaints, 0);
        assert_eq!(first.reporting_delay_days, 0.0);

        let fifth = &records[5];
        assert!(fifth.kyc_completed);
        assert_eq!(fifth.capital_adequacy_pct, 105.0);
        assert_eq!(fifth.client_complaints, 3);
        assert_eq!(fifth.reporting_delay_days, 1.0);

        assert!(records
            .iter()
            .all(|record| (90.0..130.0).contains(&record.capital_adequacy_pct)));
    }

    #[test]
    fn demo_data_is_deterministic() {
        assert_eq!(
            demo_csv(12).expect("demo csv"),
            demo_csv(12).expect("demo csv")
        );
    }

    #[test]
    fn zero_rows_is_rejected_like_an_empty_upload() {
        assert!(matches!(demo_records(0), Err(IntakeError::NoRows)));
    }

    #[test]
    fn oversized_demo_request_is_rejected_before_generation() {
        assert_eq!(
            demo_records(MAX_DEMO_ROWS).expect("limit is inclusive").len(),
            MAX_DEMO_ROWS
        );

        match demo_csv(MAX_DEMO_ROWS + 1) {
            Err(IntakeError::TooManyDemoRows { requested, max }) => {
                assert_eq!(requested, MAX_DEMO_ROWS + 1);
                assert_eq!(max, MAX_DEMO_ROWS);
            }
            other => panic!("expected too many demo rows, got {other:?}"),
        }
    }
}
