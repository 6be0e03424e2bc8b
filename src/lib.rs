//! Kairos Transport pricing and booking service

pub mod booking;
pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use axum::Router;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use booking::{BookingService, BookingStore};
use pricing::{PriceResolver, RuleTable};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PriceResolver>,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(table: Arc<RuleTable>, store: Arc<dyn BookingStore>) -> Self {
        let resolver = Arc::new(PriceResolver::new(table));
        Self {
            bookings: BookingService::new(resolver.clone(), store),
            resolver,
        }
    }
}

/// Build the HTTP application
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(pricing::router())
        .merge(booking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
