//! Gateway Health API

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// False while no model credential is configured.
    pub model_configured: bool,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "phyassist",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.tutor.is_configured(),
    })
}
