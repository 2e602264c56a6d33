use compliscore::intake::MAX_DEMO_ROWS;
use compliscore::report::ReportFormat;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_format(raw: &str) -> Result<ReportFormat, String> {
    raw.parse::<ReportFormat>().map_err(|err| err.to_string())
}

pub(crate) fn parse_demo_rows(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(value) if (1..=MAX_DEMO_ROWS).contains(&value) => Ok(value),
        _ => Err(format!(
            "'{raw}' must be an integer between 1 and {MAX_DEMO_ROWS}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_demo_rows_rejects_out_of_range_and_text() {
        assert_eq!(parse_demo_rows("12"), Ok(12));
        assert_eq!(parse_demo_rows(&MAX_DEMO_ROWS.to_string()), Ok(MAX_DEMO_ROWS));
        assert!(parse_demo_rows("0").is_err());
        assert!(parse_demo_rows(&(MAX_DEMO_ROWS + 1).to_string()).is_err());
        assert!(parse_demo_rows("ten").is_err());
    }

    #[test]
    fn parse_format_surfaces_export_error_text() {
        assert_eq!(parse_format("csv"), Ok(ReportFormat::Csv));
        let message = parse_format("pdf").expect_err("pdf unsupported");
        assert!(message.contains("pdf"));
    }
}
