//! Pricing route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::ResolvePriceRequest;
use super::responses::{PriceResponse, RulesResponse};
use super::table::Catalog;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/resolve", post(resolve))
        .route("/api/pricing/catalog", get(catalog))
        .route("/api/pricing/rules", get(rules))
}

/// Resolve the price of one selection; unpriced trips come back as a quote
pub async fn resolve(
    State(state): State<AppState>,
    body: std::result::Result<Json<ResolvePriceRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>> {
    let Json(req) = body?;
    let result = state.resolver.resolve_price(
        &req.service_type,
        &req.vehicle_type,
        &req.destination,
        &req.trip_option,
    );
    Ok(Json(result.into()))
}

pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.resolver.table().catalog())
}

pub async fn rules(State(state): State<AppState>) -> Json<RulesResponse> {
    let table = state.resolver.table();
    Json(RulesResponse {
        currency: table.currency().to_string(),
        count: table.rules().len(),
        rules: table.rules().to_vec(),
    })
}
