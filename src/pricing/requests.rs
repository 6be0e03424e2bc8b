//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

/// Request to resolve a price
#[derive(Debug, Deserialize)]
pub struct ResolvePriceRequest {
    pub service_type: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_trip_option")]
    pub trip_option: String,
}

fn default_trip_option() -> String {
    "aller-simple".to_string()
}
