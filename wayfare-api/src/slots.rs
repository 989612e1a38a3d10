use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use wayfare_booking::SlotVerdict;
use wayfare_shared::PackageType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotValidationRequest {
    pub package_type: PackageType,
    pub package_id: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/slots/validate", post(validate_slot))
}

/// A verdict is data, not an error: invalid requests still answer 200
async fn validate_slot(
    State(state): State<AppState>,
    Json(req): Json<SlotValidationRequest>,
) -> Json<SlotVerdict> {
    let verdict = state
        .slots
        .validate_slot(req.package_type, &req.package_id, &req.date, &req.time, req.guests)
        .await;
    Json(verdict)
}
