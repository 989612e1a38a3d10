use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wayfare_booking::{CartTotals, PricedItem, RawCartItem, SlotVerdict};

#[derive(Debug, Deserialize)]
pub struct CartValidationRequest {
    pub items: Vec<RawCartItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartValidationResponse {
    pub results: HashMap<String, SlotVerdict>,
    pub all_valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct CartTotalsRequest {
    pub items: Vec<PricedItem>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/cart/validate", post(validate_cart))
        .route("/v1/cart/totals", post(cart_totals))
}

async fn validate_cart(
    State(state): State<AppState>,
    Json(req): Json<CartValidationRequest>,
) -> Json<CartValidationResponse> {
    let results = state.cart.validate_cart_items(&req.items).await;
    let all_valid = results.values().all(|v| v.is_valid);
    Json(CartValidationResponse { results, all_valid })
}

async fn cart_totals(
    State(state): State<AppState>,
    Json(req): Json<CartTotalsRequest>,
) -> Result<Json<CartTotals>, AppError> {
    if req.items.iter().any(|item| item.unit_price < 0) {
        return Err(AppError::ValidationError(
            "Item price cannot be negative".to_string(),
        ));
    }
    Ok(Json(CartTotals::compute(&req.items, &state.rules)))
}
