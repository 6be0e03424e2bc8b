//! Price resolution over the rate card.
//!
//! Pure lookups with a fixed fallback order. Nothing here fails: any input
//! that cannot be priced resolves to [`PriceResult::QuoteRequired`].

use std::sync::Arc;

use super::models::{PriceResult, PricingRule, RulePrice};
use super::table::RuleTable;
use super::vocabulary::{
    ServiceLabel, ServiceType, TripOption, VehicleType, Zone, AIRPORT_DESTINATION,
};

/// Which lookup produced a price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    Exact,
    RegionDayRate,
    DakarDayRate,
}

/// Resolves booking selections to prices
#[derive(Debug, Clone)]
pub struct PriceResolver {
    table: Arc<RuleTable>,
}

impl PriceResolver {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Resolve a price from caller-facing identifiers.
    ///
    /// # Arguments
    /// * `service_type` - `airport-transfer`, `dakar-rental` or `region-rental`
    /// * `vehicle_type` - vehicle slug, e.g. `berline`
    /// * `destination` - published destination name (ignored for the airport)
    /// * `trip_option` - option slug, or a rate-card label verbatim
    pub fn resolve_price(
        &self,
        service_type: &str,
        vehicle_type: &str,
        destination: &str,
        trip_option: &str,
    ) -> PriceResult {
        let (Some(service), Some(vehicle)) = (
            ServiceType::from_slug(service_type),
            VehicleType::from_slug(vehicle_type),
        ) else {
            tracing::debug!(service_type, vehicle_type, "Unknown service or vehicle, quote required");
            return PriceResult::QuoteRequired;
        };

        self.resolve(service, vehicle, destination, TripOption::parse(trip_option))
    }

    /// Resolve a price from already-parsed identifiers.
    ///
    /// `option` is `None` when the caller's option is not on the rate card;
    /// the exact lookup is then skipped but the day-rate fallbacks still apply.
    pub fn resolve(
        &self,
        service: ServiceType,
        vehicle: VehicleType,
        destination: &str,
        option: Option<TripOption>,
    ) -> PriceResult {
        match self.lookup(service, vehicle, destination, option) {
            Some((rule, step)) => {
                tracing::debug!(
                    service = service.slug(),
                    vehicle = vehicle.label(),
                    destination = %rule.destination,
                    option = rule.option.label(),
                    ?step,
                    "Price rule matched"
                );
                self.price_of(rule)
            }
            None => {
                tracing::debug!(
                    service = service.slug(),
                    vehicle = vehicle.label(),
                    destination,
                    ?option,
                    "No price rule, quote required"
                );
                PriceResult::QuoteRequired
            }
        }
    }

    fn lookup(
        &self,
        service: ServiceType,
        vehicle: VehicleType,
        destination: &str,
        option: Option<TripOption>,
    ) -> Option<(&PricingRule, MatchStep)> {
        let destination = match service {
            ServiceType::AirportTransfer => AIRPORT_DESTINATION,
            _ => destination,
        };
        if destination.trim().is_empty() {
            return None;
        }

        let exact = option.and_then(|option| {
            self.table
                .find(service.rule_service(), vehicle, destination, option)
        });
        if let Some(rule) = exact {
            return Some((rule, MatchStep::Exact));
        }

        match service {
            ServiceType::RegionRental => self
                .table
                .find(ServiceLabel::Rental, vehicle, destination, TripOption::FullDay)
                .map(|rule| (rule, MatchStep::RegionDayRate)),
            ServiceType::DakarRental => self
                .table
                .find_in_zone(Zone::Dakar, ServiceLabel::Rental, vehicle, TripOption::FullDay)
                .map(|rule| (rule, MatchStep::DakarDayRate)),
            ServiceType::AirportTransfer => None,
        }
    }

    fn price_of(&self, rule: &PricingRule) -> PriceResult {
        match rule.price {
            RulePrice::Fixed(amount) => PriceResult::Fixed {
                amount,
                currency: rule
                    .currency
                    .clone()
                    .unwrap_or_else(|| self.table.currency().to_string()),
            },
            RulePrice::Quote => PriceResult::QuoteRequired,
        }
    }
}
