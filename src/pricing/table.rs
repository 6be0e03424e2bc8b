//! The canonical rate card, loaded once and validated.
//!
//! Lookups are hash-indexed on the exact key; the table is never mutated after
//! [`RuleTable::from_rate_card`] returns.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use super::models::{PricingRule, RateCard, RulePrice, ZoneDestinations};
use super::vocabulary::{ServiceLabel, ServiceType, TripOption, VehicleType, Zone};

/// Rate card compiled into the binary
const EMBEDDED_RATE_CARD: &str = include_str!("../../data/pricing_rules.json");

/// Errors raised while loading the rate card
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Cannot read rate card {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed rate card: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate card has no rules")]
    Empty,

    #[error("Duplicate rule for {zone} / {destination} / {service} / {vehicle} / {option}")]
    DuplicateRule {
        zone: &'static str,
        destination: String,
        service: &'static str,
        vehicle: &'static str,
        option: &'static str,
    },

    #[error("Destination '{destination}' is listed under both {first} and {second}")]
    DestinationInSeveralZones {
        destination: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Destination '{destination}' is listed twice under {zone}")]
    DuplicateDestination {
        destination: String,
        zone: &'static str,
    },

    #[error("Rule destination '{destination}' is not published under zone {zone}")]
    UnlistedDestination {
        destination: String,
        zone: &'static str,
    },

    #[error("Rule for '{destination}' is priced in {found}, table currency is {expected}")]
    MixedCurrency {
        destination: String,
        expected: String,
        found: String,
    },

    #[error("Rule for '{destination}' has a zero price")]
    ZeroPrice { destination: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RuleKey {
    service: ServiceLabel,
    vehicle: VehicleType,
    destination: String,
    option: TripOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ZoneKey {
    zone: Zone,
    service: ServiceLabel,
    vehicle: VehicleType,
    option: TripOption,
}

/// Validated, indexed rate card
#[derive(Debug, Clone)]
pub struct RuleTable {
    currency: String,
    zones: Vec<ZoneDestinations>,
    rules: Vec<PricingRule>,
    exact: HashMap<RuleKey, usize>,
    by_zone: HashMap<ZoneKey, usize>,
    zone_of: HashMap<String, Zone>,
}

impl RuleTable {
    /// Load the rate card shipped with the binary
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_json(EMBEDDED_RATE_CARD)
    }

    /// Load a rate card from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, TableError> {
        let card: RateCard = serde_json::from_str(raw)?;
        Self::from_rate_card(card)
    }

    /// Validate and index a rate card.
    ///
    /// Returns the first validation failure found, in file order.
    pub fn from_rate_card(card: RateCard) -> Result<Self, TableError> {
        if card.rules.is_empty() {
            return Err(TableError::Empty);
        }

        let mut zone_of: HashMap<String, Zone> = HashMap::new();
        for listing in &card.zones {
            for destination in &listing.destinations {
                match zone_of.insert(destination.clone(), listing.zone) {
                    Some(first) if first == listing.zone => {
                        return Err(TableError::DuplicateDestination {
                            destination: destination.clone(),
                            zone: first.label(),
                        });
                    }
                    Some(first) => {
                        return Err(TableError::DestinationInSeveralZones {
                            destination: destination.clone(),
                            first: first.label(),
                            second: listing.zone.label(),
                        });
                    }
                    None => {}
                }
            }
        }

        let mut exact = HashMap::with_capacity(card.rules.len());
        let mut by_zone = HashMap::new();

        for (idx, rule) in card.rules.iter().enumerate() {
            if zone_of.get(&rule.destination) != Some(&rule.zone) {
                return Err(TableError::UnlistedDestination {
                    destination: rule.destination.clone(),
                    zone: rule.zone.label(),
                });
            }

            if let Some(found) = &rule.currency {
                if *found != card.currency {
                    return Err(TableError::MixedCurrency {
                        destination: rule.destination.clone(),
                        expected: card.currency.clone(),
                        found: found.clone(),
                    });
                }
            }

            if rule.price == RulePrice::Fixed(0) {
                return Err(TableError::ZeroPrice {
                    destination: rule.destination.clone(),
                });
            }

            // A destination lives in exactly one zone, so this key is as
            // selective as (zone, destination, service, vehicle, option).
            let key = RuleKey {
                service: rule.service,
                vehicle: rule.vehicle_type,
                destination: rule.destination.clone(),
                option: rule.option,
            };
            if exact.insert(key, idx).is_some() {
                return Err(TableError::DuplicateRule {
                    zone: rule.zone.label(),
                    destination: rule.destination.clone(),
                    service: rule.service.label(),
                    vehicle: rule.vehicle_type.label(),
                    option: rule.option.label(),
                });
            }

            // First row of the zone wins, in file order
            by_zone
                .entry(ZoneKey {
                    zone: rule.zone,
                    service: rule.service,
                    vehicle: rule.vehicle_type,
                    option: rule.option,
                })
                .or_insert(idx);
        }

        tracing::info!(
            rules = card.rules.len(),
            quote_only = card.rules.iter().filter(|r| r.is_quote_only()).count(),
            destinations = zone_of.len(),
            currency = %card.currency,
            "Rate card loaded"
        );

        Ok(Self {
            currency: card.currency,
            zones: card.zones,
            rules: card.rules,
            exact,
            by_zone,
            zone_of,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    pub fn zones(&self) -> &[ZoneDestinations] {
        &self.zones
    }

    /// Zone a published destination belongs to
    pub fn zone_of(&self, destination: &str) -> Option<Zone> {
        self.zone_of.get(destination).copied()
    }

    /// Find the rule matching all four fields exactly
    pub fn find(
        &self,
        service: ServiceLabel,
        vehicle: VehicleType,
        destination: &str,
        option: TripOption,
    ) -> Option<&PricingRule> {
        let key = RuleKey {
            service,
            vehicle,
            destination: destination.to_string(),
            option,
        };
        self.exact.get(&key).map(|&idx| &self.rules[idx])
    }

    /// Find the first rule of a zone, ignoring the destination
    pub fn find_in_zone(
        &self,
        zone: Zone,
        service: ServiceLabel,
        vehicle: VehicleType,
        option: TripOption,
    ) -> Option<&PricingRule> {
        let key = ZoneKey {
            zone,
            service,
            vehicle,
            option,
        };
        self.by_zone.get(&key).map(|&idx| &self.rules[idx])
    }

    /// Published choices for booking forms
    pub fn catalog(&self) -> Catalog {
        Catalog {
            currency: self.currency.clone(),
            zones: self.zones.clone(),
            services: ServiceType::ALL
                .into_iter()
                .map(|s| CatalogEntry {
                    id: s.slug(),
                    name: s.display_name(),
                    capacity: None,
                })
                .collect(),
            vehicles: VehicleType::ALL
                .into_iter()
                .map(|v| CatalogEntry {
                    id: v.slug(),
                    name: v.label(),
                    capacity: Some(v.capacity()),
                })
                .collect(),
            trip_options: TripOption::ALL
                .into_iter()
                .map(|o| CatalogEntry {
                    id: o.slug(),
                    name: o.label(),
                    capacity: None,
                })
                .collect(),
        }
    }
}

/// Enum-like choices offered to callers
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub currency: String,
    pub zones: Vec<ZoneDestinations>,
    pub services: Vec<CatalogEntry>,
    pub vehicles: Vec<CatalogEntry>,
    pub trip_options: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}
