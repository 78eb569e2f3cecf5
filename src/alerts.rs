//! Alert message formatting for unit volume and UVC lamp status.
//!
//! The builders are pure formatters: an `active` status yields an empty
//! string and nothing is deduplicated here. [`alerts_for_change`] applies
//! the transition rule on top of them for callers that persist alerts.

use crate::models::{Alert, AlertKind, StatusChange, Unit};
use crate::status::{
    uvc_hours_remaining, Status, MAX_UVC_HOURS, UNIT_URGENT_VOLUME, UNIT_WARNING_VOLUME,
    UVC_URGENT_THRESHOLD, UVC_WARNING_THRESHOLD,
};
use crate::values::{format_number, format_optional};

// ---

/// Build the alert text for a unit's accumulated volume.
pub fn build_unit_alert_message(unit_name: &str, volume: Option<f64>, status: Status) -> String {
    // ---
    let volume = format_optional(volume);
    match status {
        Status::Active => String::new(),
        Status::Warning => format!(
            "Warning: unit {unit_name} has accumulated {volume} of treated volume, above the \
             warning threshold of {}. Please check the system and schedule maintenance.",
            format_number(UNIT_WARNING_VOLUME)
        ),
        Status::Urgent => format!(
            "Urgent: unit {unit_name} has accumulated {volume} of treated volume, above the \
             limit of {}. Immediate action required.",
            format_number(UNIT_URGENT_VOLUME)
        ),
    }
}

/// Build the alert text for a unit's UVC lamp hours.
///
/// The urgent variant reports the signed hours remaining, which is negative
/// for an overdue lamp.
pub fn build_uvc_alert_message(unit_name: &str, hours: Option<f64>, status: Status) -> String {
    // ---
    let formatted = format_optional(hours);
    match status {
        Status::Active => String::new(),
        Status::Warning => format!(
            "Warning: the UVC lamp of unit {unit_name} has {formatted} operating hours, above \
             the warning threshold of {}. Please schedule maintenance.",
            format_number(UVC_WARNING_THRESHOLD)
        ),
        Status::Urgent => format!(
            "Urgent: the UVC lamp of unit {unit_name} has {formatted} operating hours, above \
             the limit of {}. Hours remaining: {} of {}. Replacement required soon.",
            format_number(UVC_URGENT_THRESHOLD),
            format_optional(hours.map(uvc_hours_remaining)),
            format_number(MAX_UVC_HOURS)
        ),
    }
}

/// Alerts to record after a unit's totals were updated.
///
/// One alert per domain whose status changed into `warning` or `urgent`;
/// unchanged or recovering domains produce nothing.
pub fn alerts_for_change(unit: &Unit, change: &StatusChange) -> Vec<Alert> {
    // ---
    let mut alerts = Vec::new();

    if change.volume_changed() {
        let message = build_unit_alert_message(&unit.name, Some(unit.total_volume), change.status);
        if let Some(alert) = Alert::new(&unit.id, AlertKind::Volume, message, change.status) {
            tracing::debug!(unit_id = %unit.id, status = %change.status, "volume alert raised");
            alerts.push(alert);
        }
    }

    if change.uvc_changed() {
        let message = build_uvc_alert_message(&unit.name, Some(unit.uvc_hours), change.uvc_status);
        if let Some(alert) = Alert::new(&unit.id, AlertKind::Uvc, message, change.uvc_status) {
            tracing::debug!(unit_id = %unit.id, status = %change.uvc_status, "uvc alert raised");
            alerts.push(alert);
        }
    }

    alerts
}
