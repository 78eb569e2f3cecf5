//! Fleet rules for MYWATER water treatment units.
//!
//! Pure, synchronous rule modules shared by the dashboard and the report
//! generator, plus the HTTP gateway that serves them:
//! - [`status`] – volume and UVC lamp status thresholds
//! - [`alerts`] – alert messages and transition-triggered alerts
//! - [`aggregate`] – report metrics from raw measurements
//! - [`impact`] – bottled water, CO2 and plastic savings
//! - [`permissions`] – role and company capability checks
//!
//! Status and metric functions fail open (missing readings read as
//! `active` or zero); permission checks fail closed (no role, no access).
//! Nothing here performs I/O or holds shared state, so every function is
//! safe to call from any number of tasks.

pub mod aggregate;
pub mod alerts;
pub mod config;
pub mod impact;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod status;
pub mod values;

pub use config::Config;
pub use models::{Alert, AlertKind, Measurement, RawMeasurement, RawUnit, StatusChange, Unit};
pub use status::Status;
