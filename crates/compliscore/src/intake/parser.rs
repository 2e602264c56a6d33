use super::columns::{self, normalize_header};
use super::IntakeError;
use crate::scoring::BrokerRecord;
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<BrokerRecord>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    let missing = columns::missing_columns(&headers);
    if !missing.is_empty() {
        return Err(IntakeError::MissingColumns(missing));
    }

    let header_record = StringRecord::from(headers);
    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let raw: RawBrokerRow = row.deserialize(Some(&header_record))?;
        records.push(raw.into_record(index + 1)?);
    }

    if records.is_empty() {
        return Err(IntakeError::NoRows);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RawBrokerRow {
    #[serde(
        rename = "Broker Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    name: Option<String>,
    #[serde(
        rename = "KYC Completed (Y/N)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    kyc_completed: Option<String>,
    #[serde(
        rename = "Capital Adequacy %",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    capital_adequacy: Option<String>,
    #[serde(
        rename = "Client Complaints",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    client_complaints: Option<String>,
    #[serde(
        rename = "Reporting Delay (days)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    reporting_delay: Option<String>,
}

impl RawBrokerRow {
    fn into_record(self, row: usize) -> Result<BrokerRecord, IntakeError> {
        let name = required(self.name, row, columns::BROKER_NAME)?;
        let kyc_raw = required(self.kyc_completed, row, columns::KYC_COMPLETED)?;
        let capital_raw = required(self.capital_adequacy, row, columns::CAPITAL_ADEQUACY)?;
        let complaints_raw = required(self.client_complaints, row, columns::CLIENT_COMPLAINTS)?;
        let delay_raw = required(self.reporting_delay, row, columns::REPORTING_DELAY)?;

        let kyc_completed = parse_yes_no(&kyc_raw)
            .ok_or_else(|| invalid(row, columns::KYC_COMPLETED, &kyc_raw, "expected Y or N"))?;
        let capital_adequacy_pct = parse_percentage(&capital_raw).ok_or_else(|| {
            invalid(row, columns::CAPITAL_ADEQUACY, &capital_raw, "expected a number")
        })?;
        let client_complaints = parse_count(&complaints_raw).ok_or_else(|| {
            invalid(
                row,
                columns::CLIENT_COMPLAINTS,
                &complaints_raw,
                "expected a non-negative whole number",
            )
        })?;
        let reporting_delay_days = parse_number(&delay_raw).ok_or_else(|| {
            invalid(
                row,
                columns::REPORTING_DELAY,
                &delay_raw,
                "expected a number of days",
            )
        })?;

        // Range checks on the numeric fields live in `BrokerRecord::new`.

        BrokerRecord::new(
            name,
            kyc_completed,
            capital_adequacy_pct,
            client_complaints,
            reporting_delay_days,
        )
        .map_err(|source| IntakeError::InvalidRecord { row, source })
    }
}

fn required(value: Option<String>, row: usize, column: &'static str) -> Result<String, IntakeError> {
    value.ok_or(IntakeError::MissingField { row, column })
}

fn invalid(row: usize, column: &'static str, value: &str, expected: &'static str) -> IntakeError {
    IntakeError::InvalidField {
        row,
        column,
        value: value.to_string(),
        expected,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_ascii_uppercase().as_str() {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn parse_percentage(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let without_sign = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_number(without_sign)
}

fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return Some(count);
    }

    // Spreadsheet exports often write whole numbers as "3.0".
    parse_number(trimmed)
        .filter(|number| {
            number.fract() == 0.0 && *number >= 0.0 && *number <= f64::from(u32::MAX)
        })
        .map(|number| number as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RecordError;
    use std::io::Cursor;

    const HEADER: &str = "Broker Name,KYC Completed (Y/N),Capital Adequacy %,Client Complaints,Reporting Delay (days)\n";

    fn parse(body: &str) -> Result<Vec<BrokerRecord>, IntakeError> {
        parse_records(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn yes_no_accepts_single_letters_case_insensitively() {
        assert_eq!(parse_yes_no(" y "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("Yes"), None);
        assert_eq!(parse_yes_no("no"), None);
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn counts_accept_integral_decimals_only() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("3.0"), Some(3));
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn percentage_tolerates_trailing_sign() {
        assert_eq!(parse_percentage("112%"), Some(112.0));
        assert_eq!(parse_percentage("98.5"), Some(98.5));
        assert_eq!(parse_percentage("abc"), None);
    }

    #[test]
    fn parses_rows_into_typed_records() {
        let records = parse("Alpha Securities, y ,120,1,0\nBeta Capital,N,95.5,4,2\n")
            .expect("valid table");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alpha Securities");
        assert!(records[0].kyc_completed);
        assert!(!records[1].kyc_completed);
        assert_eq!(records[1].capital_adequacy_pct, 95.5);
        assert_eq!(records[1].client_complaints, 4);
        assert_eq!(records[1].reporting_delay_days, 2.0);
    }

    #[test]
    fn ignores_extra_columns_and_column_order() {
        let csv = "Notes,Reporting Delay (days),Client Complaints,Capital Adequacy %,KYC Completed (Y/N),Broker Name\n\
watch,0,1,101,Y,Gamma Wealth\n";

        let records = parse_records(Cursor::new(csv)).expect("valid table");

        assert_eq!(records[0].name, "Gamma Wealth");
        assert_eq!(records[0].capital_adequacy_pct, 101.0);
    }

    #[test]
    fn empty_cell_is_reported_with_row_and_column() {
        let error = parse("Alpha Securities,Y,120,1,0\nBeta Capital,Y,,1,0\n")
            .expect_err("missing capital");

        match error {
            IntakeError::MissingField { row, column } => {
                assert_eq!(row, 2);
                assert_eq!(column, columns::CAPITAL_ADEQUACY);
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_capital_is_rejected() {
        let error = parse("Alpha Securities,Y,lots,1,0\n").expect_err("invalid capital");

        match error {
            IntakeError::InvalidField { column, value, .. } => {
                assert_eq!(column, columns::CAPITAL_ADEQUACY);
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let error = parse("").expect_err("no rows");

        assert!(matches!(error, IntakeError::NoRows));
    }

    #[test]
    fn spelled_out_kyc_answer_is_rejected() {
        let error = parse("Alpha Securities,YES,120,1,0\n").expect_err("YES is not a Y/N flag");

        match error {
            IntakeError::InvalidField { row, column, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, columns::KYC_COMPLETED);
                assert_eq!(value, "YES");
            }
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn negative_delay_fails_record_validation() {
        let error = parse("Alpha Securities,Y,120,1,0\nBeta Capital,Y,120,1,-2\n")
            .expect_err("negative delay rejected");

        match error {
            IntakeError::InvalidRecord { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(source, RecordError::InvalidNumber { .. }));
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }
}
