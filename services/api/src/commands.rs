use crate::render::render_console_report;
use chrono::Local;
use clap::Args;
use compliscore::config::AppConfig;
use compliscore::error::AppError;
use compliscore::intake::BrokerTableLoader;
use compliscore::report::{ComplianceReport, ReportFormat};
use compliscore::scoring::ScoringEngine;
use compliscore::telemetry;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV table to score. The built-in demo dataset is used when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Output format for stdout (text, csv or json)
    #[arg(long, default_value = "text", value_parser = crate::infra::parse_format)]
    pub(crate) format: ReportFormat,
    /// Write the report to this path; the format follows the file extension
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Append a score distribution chart to text output
    #[arg(long)]
    pub(crate) chart: bool,
    /// Number of demo brokers to generate when no input is given
    #[arg(long, value_parser = crate::infra::parse_demo_rows)]
    pub(crate) demo_rows: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of demo brokers to generate
    #[arg(long, value_parser = crate::infra::parse_demo_rows)]
    pub(crate) rows: Option<usize>,
    /// Write the report to this path; the format follows the file extension
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        format,
        export,
        chart,
        demo_rows,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let loader = BrokerTableLoader::new(demo_rows.unwrap_or(config.scoring.demo_rows));
    let report = build_report(&loader, input.as_deref())?;

    match format {
        ReportFormat::Text => println!("{}", render_console_report(&report, chart)),
        other => println!("{}", report.render(other)?),
    }

    if let Some(path) = export {
        write_export(&report, &path, format)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { rows, export } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let loader = BrokerTableLoader::new(rows.unwrap_or(config.scoring.demo_rows));
    let report = build_report(&loader, None)?;
    println!("{}", render_console_report(&report, true));

    if let Some(path) = export {
        write_export(&report, &path, ReportFormat::Text)?;
    }

    Ok(())
}

pub(crate) fn build_report(
    loader: &BrokerTableLoader,
    input: Option<&Path>,
) -> Result<ComplianceReport, AppError> {
    let table = loader.load(input)?;
    let scored = ScoringEngine::new().evaluate_all(&table.records);
    Ok(ComplianceReport::build(
        table.source,
        &scored,
        Local::now().naive_local(),
    ))
}

fn write_export(
    report: &ComplianceReport,
    path: &Path,
    fallback: ReportFormat,
) -> Result<(), AppError> {
    let format = ReportFormat::from_path(path).unwrap_or(fallback);
    let body = report.render(format)?;
    std::fs::write(path, body)?;
    info!(path = %path.display(), ?format, "report exported");
    println!("\nReport written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliscore::intake::DataSource;

    #[test]
    fn build_report_falls_back_to_demo_data() {
        let report = build_report(&BrokerTableLoader::new(9), None).expect("report builds");

        assert_eq!(report.source, DataSource::Demo { rows: 9 });
        assert_eq!(report.summary.broker_count, 9);
        assert_eq!(report.distribution.len(), 9);
    }

    #[test]
    fn export_format_follows_extension() {
        let report = build_report(&BrokerTableLoader::new(3), None).expect("report builds");
        let path = std::env::temp_dir().join(format!(
            "compliscore-export-{}.json",
            std::process::id()
        ));

        write_export(&report, &path, ReportFormat::Text).expect("export written");
        let written = std::fs::read_to_string(&path).expect("export readable");
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&written).expect("json export");
        assert_eq!(value["summary"]["broker_count"], 3);
    }
}
