//! Three-level health classification for units and UVC lamps.
//!
//! Both classifiers fail open: a missing or non-numeric reading is reported
//! as [`Status::Active`] so an unavailable value never raises an alarm.
//!
//! ```
//! use mywater_fleet::status::{classify_unit_status, classify_uvc_status, Status};
//!
//! assert_eq!(classify_unit_status(Some(91_000.0)), Status::Warning);
//! assert_eq!(classify_uvc_status(Some(14_000.0)), Status::Urgent);
//! assert_eq!(classify_uvc_status(None), Status::Active);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// ---

/// Accumulated volume above which a unit needs attention.
pub const UNIT_WARNING_VOLUME: f64 = 90_000.0;

/// Accumulated volume above which a unit needs immediate action.
pub const UNIT_URGENT_VOLUME: f64 = 95_000.0;

/// Rated lifetime of a UVC lamp in operating hours.
pub const MAX_UVC_HOURS: f64 = 15_000.0;

/// First UVC hour count classified as warning.
pub const UVC_WARNING_THRESHOLD: f64 = 10_001.0;

/// First UVC hour count classified as urgent.
pub const UVC_URGENT_THRESHOLD: f64 = 14_000.0;

/// Health status shared by the volume and UVC domains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    // ---
    #[default]
    Active,
    Warning,
    Urgent,
}

impl Status {
    // ---
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Warning => "warning",
            Status::Urgent => "urgent",
        }
    }

    /// Whether entering this status should produce an alert.
    pub fn is_alerting(self) -> bool {
        !matches!(self, Status::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing never fails; unknown strings read as `active`.
impl FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "warning" => Status::Warning,
            "urgent" => Status::Urgent,
            _ => Status::Active,
        })
    }
}

/// Classify a unit by its accumulated volume.
///
/// `<= 90000` is active, `(90000, 95000]` warning, `> 95000` urgent.
pub fn classify_unit_status(volume: Option<f64>) -> Status {
    // ---
    let Some(volume) = volume.filter(|v| !v.is_nan()) else {
        return Status::Active;
    };

    if volume <= UNIT_WARNING_VOLUME {
        Status::Active
    } else if volume <= UNIT_URGENT_VOLUME {
        Status::Warning
    } else {
        Status::Urgent
    }
}

/// Classify a UVC lamp by its accumulated operating hours.
///
/// `< 10001` is active, `[10001, 14000)` warning, `>= 14000` urgent.
pub fn classify_uvc_status(hours: Option<f64>) -> Status {
    // ---
    let Some(hours) = hours.filter(|h| !h.is_nan()) else {
        return Status::Active;
    };

    if hours < UVC_WARNING_THRESHOLD {
        Status::Active
    } else if hours < UVC_URGENT_THRESHOLD {
        Status::Warning
    } else {
        Status::Urgent
    }
}

/// Percentage of the rated lamp life consumed, clamped to `[0, 100]`.
pub fn uvc_life_percentage(hours: Option<f64>) -> f64 {
    // ---
    match hours.filter(|h| !h.is_nan()) {
        Some(hours) => (hours / MAX_UVC_HOURS * 100.0).clamp(0.0, 100.0),
        None => 0.0,
    }
}

/// Hours left before the rated lamp life is reached.
///
/// Negative once a lamp is overdue; deliberately not clamped.
pub fn uvc_hours_remaining(hours: f64) -> f64 {
    MAX_UVC_HOURS - hours
}
