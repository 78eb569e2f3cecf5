//! HTTP gateway for the rule modules.
//!
//! Each sibling file owns one group of endpoints and exports a subrouter;
//! this gateway merges them and attaches the shared [`Config`] state.

use axum::Router;

use crate::Config;

mod health;
mod impact;
mod permissions;
mod reports;
mod units;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(units::router())
        .merge(reports::router())
        .merge(impact::router())
        .merge(permissions::router())
        .merge(health::router())
        .with_state(config)
}
