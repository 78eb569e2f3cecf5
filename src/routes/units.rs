use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    alerts::{alerts_for_change, build_unit_alert_message, build_uvc_alert_message},
    models::{Alert, RawUnit, StatusChange, Unit},
    status::{
        classify_unit_status, classify_uvc_status, uvc_hours_remaining, uvc_life_percentage,
        Status,
    },
    values::NumericInput,
    Config,
};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new()
        .route("/status/classify", post(classify))
        .route("/units/evaluate", post(evaluate))
}

/// Body of `POST /status/classify`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    volume: NumericInput,
    #[serde(default)]
    uvc_hours: NumericInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResponse {
    status: Status,
    uvc_status: Status,
    uvc_life_percentage: f64,
    uvc_hours_remaining: Option<f64>,
    unit_message: String,
    uvc_message: String,
}

async fn classify(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    // ---
    let volume = req.volume.to_f64();
    let hours = req.uvc_hours.to_f64();
    let name = req.name.as_deref().unwrap_or("unknown");

    let status = classify_unit_status(volume);
    let uvc_status = classify_uvc_status(hours);
    debug!(%status, %uvc_status, ?volume, ?hours, "POST /status/classify");

    Json(ClassifyResponse {
        status,
        uvc_status,
        uvc_life_percentage: uvc_life_percentage(hours),
        uvc_hours_remaining: hours.map(uvc_hours_remaining),
        unit_message: build_unit_alert_message(name, volume, status),
        uvc_message: build_uvc_alert_message(name, hours, uvc_status),
    })
}

/// Body of `POST /units/evaluate`: the unit as currently stored plus its
/// new cumulative totals. A missing total keeps the stored value.
/// The stored unit is normalized the same way as measurements.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateRequest {
    unit: RawUnit,
    #[serde(default)]
    total_volume: NumericInput,
    #[serde(default)]
    uvc_hours: NumericInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateResponse {
    unit: Unit,
    change: StatusChange,
    alerts: Vec<Alert>,
}

async fn evaluate(Json(req): Json<EvaluateRequest>) -> Json<EvaluateResponse> {
    // ---
    let mut unit = req.unit.to_unit();
    let total_volume = req.total_volume.to_f64().unwrap_or(unit.total_volume);
    let uvc_hours = req.uvc_hours.to_f64().unwrap_or(unit.uvc_hours);

    let change = unit.apply_totals(total_volume, uvc_hours);
    let alerts = alerts_for_change(&unit, &change);

    info!(
        unit_id = %unit.id,
        status = %change.status,
        uvc_status = %change.uvc_status,
        alerts = alerts.len(),
        "POST /units/evaluate"
    );

    Json(EvaluateResponse {
        unit,
        change,
        alerts,
    })
}
