use compliscore::report::export::{REPORT_SUBTITLE, REPORT_TITLE};
use compliscore::report::{normalize_glyphs, render_bar_chart, ComplianceReport};

const CHART_WIDTH: usize = 40;

const TABLE_HEADER: [&str; 8] = [
    "Broker Name",
    "KYC",
    "Capital %",
    "Complaints",
    "Delay (days)",
    "Score",
    "Status",
    "Failed Checks",
];

pub(crate) fn render_console_report(report: &ComplianceReport, include_chart: bool) -> String {
    let mut out = Vec::new();
    out.push(format!("## {REPORT_TITLE}"));
    out.push(REPORT_SUBTITLE.to_string());

    if report.source.is_demo() {
        out.push("Demo mode: using built-in sample dataset.".to_string());
    } else {
        out.push(format!("Data source: {}", report.source.label()));
    }

    let summary = &report.summary;
    out.push(String::new());
    out.push(format!(
        "Average Score {:.1} | Highest Score {} | Lowest Score {}",
        summary.average_score, summary.highest_score, summary.lowest_score
    ));
    out.push(
        summary
            .status_counts
            .iter()
            .map(|entry| format!("{}: {}", entry.status_label, entry.count))
            .collect::<Vec<_>>()
            .join(" | "),
    );

    out.push(String::new());
    out.push("### Broker Compliance Table".to_string());
    let rows: Vec<Vec<String>> = report
        .brokers
        .iter()
        .map(|broker| {
            vec![
                broker.name.clone(),
                if broker.kyc_completed { "Y" } else { "N" }.to_string(),
                broker.capital_adequacy_pct.to_string(),
                broker.client_complaints.to_string(),
                broker.reporting_delay_days.to_string(),
                broker.score.to_string(),
                broker.status_label.to_string(),
                broker.failed_summary(),
            ]
        })
        .collect();
    out.extend(aligned_table(&TABLE_HEADER, &rows));

    if include_chart {
        out.push(String::new());
        out.push("### Compliance Scores Distribution".to_string());
        out.push(render_bar_chart(&report.distribution, CHART_WIDTH));
    }

    normalize_glyphs(&out.join("\n"))
}

fn aligned_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(header.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    lines
}
