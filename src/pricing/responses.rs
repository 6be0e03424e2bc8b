//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use super::format::format_price;
use super::models::{PriceResult, PricingRule};

/// Response for price resolution
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub result: PriceResult,
    pub formatted: String,
}

impl From<PriceResult> for PriceResponse {
    fn from(result: PriceResult) -> Self {
        let formatted = format_price(&result);
        Self { result, formatted }
    }
}

/// Response listing the whole rate card
#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub currency: String,
    pub count: usize,
    pub rules: Vec<PricingRule>,
}
