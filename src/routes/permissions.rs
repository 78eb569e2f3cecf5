use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    permissions::{evaluate_permissions, Capabilities, UserRole},
    Config,
};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/permissions", post(handler))
}

/// Body of `POST /permissions`: the caller's claims and the target of the
/// check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionsRequest {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    target_company: Option<String>,
    #[serde(default)]
    target_role: Option<String>,
    #[serde(default)]
    is_self: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionsResponse {
    role: Option<UserRole>,
    #[serde(flatten)]
    capabilities: Capabilities,
}

/// Unknown role claims are treated as no role at all.
fn parse_role(claim: Option<&str>) -> Option<UserRole> {
    // ---
    let claim = claim?;
    match claim.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            warn!("Ignoring role claim: {}", e);
            None
        }
    }
}

async fn handler(Json(req): Json<PermissionsRequest>) -> Json<PermissionsResponse> {
    // ---
    let role = parse_role(req.role.as_deref());
    let target_role = parse_role(req.target_role.as_deref());
    let permissions = evaluate_permissions(role, req.company.as_deref());

    let capabilities =
        permissions.capabilities(req.target_company.as_deref(), target_role, req.is_self);
    debug!("POST /permissions - {:?} -> {:?}", role, capabilities);

    Json(PermissionsResponse {
        role: permissions.role(),
        capabilities,
    })
}
