use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    impact::{calculate_impact, liters_for_period, Period},
    Config,
};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/impact", get(handler))
}

/// Query parameters for `GET /impact`.
///
/// An explicit `liters` wins; otherwise the configured daily intake is
/// scaled by `period` (`day`, `month`, `year`, or `all` with `days`).
#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
    liters: Option<f64>,
    period: Option<String>,
    days: Option<u32>,
}

async fn handler(
    Query(params): Query<ImpactQuery>,
    State(config): State<Config>,
) -> impl IntoResponse {
    // ---
    debug!("GET /impact - {:?}", params);

    let liters = match params.liters {
        Some(liters) => liters,
        None => match parse_period(params.period.as_deref(), params.days) {
            Some(period) => liters_for_period(config.daily_intake_liters, period),
            None => {
                warn!("GET /impact - invalid period {:?}", params.period);
                return (
                    StatusCode::BAD_REQUEST,
                    Json("period must be day, month, year, or all with days"),
                )
                    .into_response();
            }
        },
    };

    if !liters.is_finite() || liters < 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json("liters must be a non-negative number"),
        )
            .into_response();
    }

    (StatusCode::OK, Json(calculate_impact(liters, &config.impact))).into_response()
}

fn parse_period(period: Option<&str>, days: Option<u32>) -> Option<Period> {
    // ---
    match period.unwrap_or("day") {
        "day" => Some(Period::Day),
        "month" => Some(Period::Month),
        "year" => Some(Period::Year),
        "all" => days.map(Period::AllTime),
        _ => None,
    }
}
