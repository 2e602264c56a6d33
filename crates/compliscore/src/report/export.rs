use super::ComplianceReport;
use crate::intake::columns::REQUIRED_COLUMNS;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const REPORT_TITLE: &str = "CompliScore \u{2013} Compliance Health Dashboard";
pub const REPORT_SUBTITLE: &str =
    "Low\u{2011}cost compliance monitoring for small and mid\u{2011}sized brokers";

const SCORE_COLUMN: &str = "Compliance Score";
const STATUS_COLUMN: &str = "Status";
const FAILED_CHECKS_COLUMN: &str = "Failed Checks";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown report format '{0}' (expected csv, json or text)")]
    UnknownFormat(String),
    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Csv,
    Json,
    #[default]
    Text,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn render(report: &ComplianceReport, format: ReportFormat) -> Result<String, ExportError> {
    match format {
        ReportFormat::Csv => to_csv(report),
        ReportFormat::Json => to_json(report),
        ReportFormat::Text => Ok(to_text(report)),
    }
}

/// `CompliScore_Report_<YYYYmmdd>_<HHMM>.<ext>`
pub fn report_file_name(generated_at: NaiveDateTime, format: ReportFormat) -> String {
    format!(
        "CompliScore_Report_{}.{}",
        generated_at.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

/// Input columns followed by score, status and the joined failed checks.
pub fn to_csv(report: &ComplianceReport) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.extend([SCORE_COLUMN, STATUS_COLUMN, FAILED_CHECKS_COLUMN]);
    writer.write_record(&header)?;

    for broker in &report.brokers {
        writer.write_record([
            broker.name.clone(),
            if broker.kyc_completed { "Y" } else { "N" }.to_string(),
            broker.capital_adequacy_pct.to_string(),
            broker.client_complaints.to_string(),
            broker.reporting_delay_days.to_string(),
            broker.score.to_string(),
            broker.status_label.to_string(),
            broker.failed_summary(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
}

pub fn to_json(report: &ComplianceReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn to_text(report: &ComplianceReport) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        REPORT_SUBTITLE.to_string(),
        String::new(),
        format!("Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M")),
        format!("Data source: {}", report.source.label()),
        format!("Average Score: {:.1}", summary.average_score),
        format!("Highest Score: {}", summary.highest_score),
        format!("Lowest Score: {}", summary.lowest_score),
        String::new(),
    ];

    let rows: Vec<[String; 4]> = report
        .brokers
        .iter()
        .map(|broker| {
            let failed = if broker.failed_labels.is_empty() {
                "-".to_string()
            } else {
                broker.failed_summary()
            };
            [
                broker.name.clone(),
                broker.score.to_string(),
                broker.status_label.to_string(),
                failed,
            ]
        })
        .collect();

    let header = [
        REQUIRED_COLUMNS[0].to_string(),
        SCORE_COLUMN.to_string(),
        STATUS_COLUMN.to_string(),
        FAILED_CHECKS_COLUMN.to_string(),
    ];
    let mut widths = [0usize; 4];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    lines.push(table_line(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| table_line(row, &widths)));

    normalize_glyphs(&lines.join("\n"))
}

fn table_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Replaces typographic dashes and quotes with their ASCII counterparts.
pub fn normalize_glyphs(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{2013}' | '\u{2014}' | '\u{2011}' | '\u{2212}' => '-',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .expect("valid date")
            .and_hms_opt(9, 5, 0)
            .expect("valid time")
    }

    #[test]
    fn format_parses_names_and_extensions() {
        assert_eq!("CSV".parse::<ReportFormat>().ok(), Some(ReportFormat::Csv));
        assert_eq!("txt".parse::<ReportFormat>().ok(), Some(ReportFormat::Text));
        assert!(matches!(
            "pdf".parse::<ReportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
        assert_eq!(
            ReportFormat::from_path(Path::new("out/report.json")),
            Some(ReportFormat::Json)
        );
        assert_eq!(ReportFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(
            report_file_name(timestamp(), ReportFormat::Csv),
            "CompliScore_Report_20250307_0905.csv"
        );
    }

    #[test]
    fn normalize_glyphs_maps_typography_to_ascii() {
        assert_eq!(
            normalize_glyphs("A\u{2013}B\u{2014}C\u{2011}D\u{2212}E \u{201c}q\u{201d} \u{2018}s\u{2019}"),
            "A-B-C-D-E \"q\" 's'"
        );
        assert_eq!(
            normalize_glyphs(REPORT_TITLE),
            "CompliScore - Compliance Health Dashboard"
        );
    }
}
