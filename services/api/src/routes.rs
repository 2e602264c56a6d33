use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use compliscore::error::AppError;
use compliscore::intake::{BrokerTable, BrokerTableLoader, DataSource, IntakeError};
use compliscore::report::{
    ComplianceReport, DistributionEntry, PortfolioSummary, ReportFormat, ScoredBrokerView,
};
use compliscore::scoring::ScoringEngine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

const DEFAULT_UPLOAD_NAME: &str = "upload.csv";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) file_name: Option<String>,
    #[serde(default)]
    pub(crate) demo_rows: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(flatten)]
    pub(crate) table: ScoreRequest,
    #[serde(default)]
    pub(crate) format: ReportFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) data_source: DataSource,
    pub(crate) summary: PortfolioSummary,
    pub(crate) brokers: Vec<ScoredBrokerView>,
    pub(crate) distribution: Vec<DistributionEntry>,
}

pub(crate) fn scoring_router(loader: BrokerTableLoader) -> Router {
    Router::new()
        .route("/api/v1/brokers/score", post(score_endpoint))
        .route("/api/v1/brokers/report", post(report_endpoint))
        .with_state(Arc::new(loader))
}

pub(crate) fn with_service_routes(loader: BrokerTableLoader) -> Router {
    scoring_router(loader)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(loader): State<Arc<BrokerTableLoader>>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let report = build_report(&loader, payload)?;

    Ok(Json(ScoreResponse {
        data_source: report.source,
        summary: report.summary,
        brokers: report.brokers,
        distribution: report.distribution,
    }))
}

pub(crate) async fn report_endpoint(
    State(loader): State<Arc<BrokerTableLoader>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let ExportRequest { table, format } = payload;
    let report = build_report(&loader, table)?;
    let body = report.render(format)?;
    let file_name = report.file_name(format);

    let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_str(content_type.as_ref())
                    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

fn build_report(
    loader: &BrokerTableLoader,
    request: ScoreRequest,
) -> Result<ComplianceReport, AppError> {
    let table = load_table(loader, request)?;
    let scored = ScoringEngine::new().evaluate_all(&table.records);
    Ok(ComplianceReport::build(
        table.source,
        &scored,
        Local::now().naive_local(),
    ))
}

fn load_table(
    loader: &BrokerTableLoader,
    request: ScoreRequest,
) -> Result<BrokerTable, IntakeError> {
    let ScoreRequest {
        csv,
        file_name,
        demo_rows,
    } = request;

    match (csv, demo_rows) {
        (Some(csv), _) => loader.from_csv_str(
            file_name.unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string()),
            &csv,
        ),
        (None, Some(rows)) => BrokerTableLoader::new(rows).demo(),
        (None, None) => loader.demo(),
    }
}
