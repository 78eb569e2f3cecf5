use axum::{routing::post, Json, Router};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::info;

use crate::{
    aggregate::{aggregate_measurements, filter_range, ReportMetrics},
    models::{Measurement, RawMeasurement},
    Config,
};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/reports/metrics", post(handler))
}

/// Body of `POST /reports/metrics`.
#[derive(Debug, Deserialize)]
struct ReportRequest {
    measurements: Vec<RawMeasurement>,
    /// Inclusive start of the report period
    #[serde(default)]
    start: Option<DateTime<FixedOffset>>,
    /// Exclusive end of the report period
    #[serde(default)]
    end: Option<DateTime<FixedOffset>>,
}

async fn handler(Json(req): Json<ReportRequest>) -> Json<ReportMetrics> {
    // ---
    let measurements: Vec<Measurement> = req
        .measurements
        .iter()
        .map(RawMeasurement::to_measurement)
        .collect();
    let selected = filter_range(&measurements, req.start, req.end);
    let metrics = aggregate_measurements(&selected);

    info!(
        "POST /reports/metrics - {} of {} measurements over {} days",
        selected.len(),
        measurements.len(),
        metrics.daily_data.len()
    );
    Json(metrics)
}
