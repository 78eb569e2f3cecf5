//! Data models for units, measurements and alerts.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::status::{classify_unit_status, classify_uvc_status, Status};
use crate::values::NumericInput;

// ---

/// Raw measurement as stored by the telemetry ingestion.
///
/// Numeric fields may be numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasurement {
    // ---
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub volume: NumericInput,
    #[serde(default)]
    pub temperature: NumericInput,
    #[serde(default)]
    pub uvc_hours: NumericInput,
}

/// A single normalized sensor reading.
///
/// The timestamp keeps the offset it was recorded with; daily grouping uses
/// that offset as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    // ---
    pub timestamp: DateTime<FixedOffset>,
    pub volume: f64,
    pub temperature: f64,
    pub uvc_hours: f64,
}

impl RawMeasurement {
    // ---
    /// Normalize once at the boundary. Unusable numeric fields become `0.0`.
    pub fn to_measurement(&self) -> Measurement {
        // ---
        Measurement {
            timestamp: self.timestamp,
            volume: self.volume.to_f64().unwrap_or(0.0),
            temperature: self.temperature.to_f64().unwrap_or(0.0),
            uvc_hours: self.uvc_hours.to_f64().unwrap_or(0.0),
        }
    }
}

/// A monitored water treatment unit.
///
/// `status` and `uvc_status` are derived from the cumulative totals and are
/// rewritten whenever the totals change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    // ---
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub total_volume: f64,
    pub uvc_hours: f64,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub uvc_status: Status,
}

/// Unit document as stored by the dashboard.
///
/// Totals may be numbers or numeric strings. Stored statuses are read
/// leniently: anything unrecognized counts as `active`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUnit {
    // ---
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub total_volume: NumericInput,
    #[serde(default)]
    pub uvc_hours: NumericInput,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Status,
    #[serde(default, deserialize_with = "lenient_status")]
    pub uvc_status: Status,
}

impl RawUnit {
    // ---
    /// Normalize once at the boundary. Unusable totals become `0.0`; the
    /// stored statuses are kept as the previous state for transition checks.
    pub fn to_unit(&self) -> Unit {
        // ---
        Unit {
            id: self.id.clone(),
            name: self.name.clone(),
            company: self.company.clone(),
            total_volume: self.total_volume.to_f64().unwrap_or(0.0),
            uvc_hours: self.uvc_hours.to_f64().unwrap_or(0.0),
            status: self.status,
            uvc_status: self.uvc_status,
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StatusInput {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match StatusInput::deserialize(deserializer)? {
        StatusInput::Text(s) => s.parse().unwrap_or_default(),
        StatusInput::Other(_) => Status::Active,
    })
}

/// Previous and newly derived statuses after a unit's totals changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    // ---
    pub previous_status: Status,
    pub status: Status,
    pub previous_uvc_status: Status,
    pub uvc_status: Status,
}

impl StatusChange {
    // ---
    pub fn volume_changed(&self) -> bool {
        self.previous_status != self.status
    }

    pub fn uvc_changed(&self) -> bool {
        self.previous_uvc_status != self.uvc_status
    }
}

impl Unit {
    // ---
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company: Option<String>,
        total_volume: f64,
        uvc_hours: f64,
    ) -> Self {
        // ---
        Unit {
            id: id.into(),
            name: name.into(),
            company,
            total_volume,
            uvc_hours,
            status: classify_unit_status(Some(total_volume)),
            uvc_status: classify_uvc_status(Some(uvc_hours)),
        }
    }

    /// Store new cumulative totals and re-derive both statuses from them.
    ///
    /// Statuses are never sticky: a unit whose volume drops back below a
    /// threshold (e.g. after a meter reset) is downgraded.
    pub fn apply_totals(&mut self, total_volume: f64, uvc_hours: f64) -> StatusChange {
        // ---
        let previous_status = self.status;
        let previous_uvc_status = self.uvc_status;

        self.total_volume = total_volume;
        self.uvc_hours = uvc_hours;
        self.refresh_status();

        StatusChange {
            previous_status,
            status: self.status,
            previous_uvc_status,
            uvc_status: self.uvc_status,
        }
    }

    /// Recompute the derived status fields from the stored totals.
    pub fn refresh_status(&mut self) {
        self.status = classify_unit_status(Some(self.total_volume));
        self.uvc_status = classify_uvc_status(Some(self.uvc_hours));
    }

    /// Whether the stored statuses match what the totals classify to.
    pub fn statuses_consistent(&self) -> bool {
        self.status == classify_unit_status(Some(self.total_volume))
            && self.uvc_status == classify_uvc_status(Some(self.uvc_hours))
    }
}

/// Which threshold domain raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Volume,
    Uvc,
}

/// A notification raised when a unit enters `warning` or `urgent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    // ---
    pub id: Uuid,
    pub unit_id: String,
    pub kind: AlertKind,
    pub message: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    // ---
    /// Create an alert, or `None` for an `active` status or an empty message.
    pub fn new(
        unit_id: impl Into<String>,
        kind: AlertKind,
        message: String,
        status: Status,
    ) -> Option<Self> {
        // ---
        if !status.is_alerting() || message.is_empty() {
            return None;
        }

        Some(Alert {
            id: Uuid::new_v4(),
            unit_id: unit_id.into(),
            kind,
            message,
            status,
            created_at: Utc::now(),
        })
    }
}
