//! Broker table intake: resolves the effective input table and coerces each
//! row into a typed [`BrokerRecord`] before anything is scored.

pub mod columns;
pub mod demo;
mod parser;

pub use columns::REQUIRED_COLUMNS;
pub use demo::{demo_csv, demo_records, DEFAULT_DEMO_ROWS, MAX_DEMO_ROWS};

use crate::scoring::{BrokerRecord, RecordError};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Validation failures raised while loading a broker table.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}: missing value for '{column}'")]
    MissingField { row: usize, column: &'static str },
    #[error("row {row}: invalid value '{value}' for '{column}' ({expected})")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("row {row}: {source}")]
    InvalidRecord { row: usize, source: RecordError },
    #[error("input table contains no broker rows")]
    NoRows,
    #[error("demo dataset of {requested} rows exceeds the limit of {max}")]
    TooManyDemoRows { requested: usize, max: usize },
    #[error("unsupported file format '{file_name}': please upload a CSV file")]
    UnsupportedFormat { file_name: String },
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read broker table: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the effective table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DataSource {
    Upload { file_name: String },
    Demo { rows: usize },
}

impl DataSource {
    pub fn label(&self) -> String {
        match self {
            DataSource::Upload { file_name } => format!("Uploaded file ({file_name})"),
            DataSource::Demo { rows } => format!("Built-in demo dataset ({rows} brokers)"),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, DataSource::Demo { .. })
    }
}

/// Validated broker rows ready for scoring.
#[derive(Debug, Clone)]
pub struct BrokerTable {
    pub source: DataSource,
    pub records: Vec<BrokerRecord>,
}

/// Maps an optional user file onto the effective table, falling back to the
/// demo dataset when nothing was supplied.
#[derive(Debug, Clone)]
pub struct BrokerTableLoader {
    demo_rows: usize,
}

impl Default for BrokerTableLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_ROWS)
    }
}

impl BrokerTableLoader {
    pub fn new(demo_rows: usize) -> Self {
        Self { demo_rows }
    }

    pub fn demo_rows(&self) -> usize {
        self.demo_rows
    }

    pub fn load(&self, input: Option<&Path>) -> Result<BrokerTable, IntakeError> {
        match input {
            Some(path) => self.from_path(path),
            None => self.demo(),
        }
    }

    pub fn demo(&self) -> Result<BrokerTable, IntakeError> {
        info!(rows = self.demo_rows, "no input table supplied, using demo dataset");
        let records = demo_records(self.demo_rows)?;
        Ok(BrokerTable {
            source: DataSource::Demo {
                rows: self.demo_rows,
            },
            records,
        })
    }

    pub fn from_path(&self, path: &Path) -> Result<BrokerTable, IntakeError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ensure_csv(&file_name)?;

        let file = std::fs::File::open(path)?;
        self.from_reader(file_name, file)
    }

    pub fn from_csv_str(
        &self,
        file_name: impl Into<String>,
        csv: &str,
    ) -> Result<BrokerTable, IntakeError> {
        let file_name = file_name.into();
        ensure_csv(&file_name)?;
        self.from_reader(file_name, csv.as_bytes())
    }

    fn from_reader<R: Read>(&self, file_name: String, reader: R) -> Result<BrokerTable, IntakeError> {
        let records = parser::parse_records(reader).map_err(|err| {
            warn!(file = %file_name, error = %err, "rejected broker table");
            err
        })?;
        info!(file = %file_name, rows = records.len(), "loaded broker table");

        Ok(BrokerTable {
            source: DataSource::Upload { file_name },
            records,
        })
    }
}

fn ensure_csv(file_name: &str) -> Result<(), IntakeError> {
    let is_csv = Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(())
    } else {
        Err(IntakeError::UnsupportedFormat {
            file_name: file_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_falls_back_to_demo() {
        let table = BrokerTableLoader::new(8).load(None).expect("demo loads");

        assert_eq!(table.source, DataSource::Demo { rows: 8 });
        assert!(table.source.is_demo());
        assert_eq!(table.records.len(), 8);
    }

    #[test]
    fn spreadsheet_extensions_are_rejected() {
        let loader = BrokerTableLoader::default();
        let error = loader
            .from_csv_str("brokers.xlsx", "irrelevant")
            .expect_err("xlsx unsupported");

        match error {
            IntakeError::UnsupportedFormat { file_name } => assert_eq!(file_name, "brokers.xlsx"),
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(ensure_csv("BROKERS.CSV").is_ok());
        assert!(ensure_csv("brokers").is_err());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = BrokerTableLoader::default()
            .from_path(Path::new("./does-not-exist.csv"))
            .expect_err("expected io error");

        match error {
            IntakeError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn missing_columns_message_lists_every_column() {
        let error = BrokerTableLoader::default()
            .from_csv_str("brokers.csv", "Broker Name,Client Complaints\nAlpha,1\n")
            .expect_err("columns missing");

        assert_eq!(
            error.to_string(),
            "Missing required columns: KYC Completed (Y/N), Capital Adequacy %, Reporting Delay (days)"
        );
    }
}
