//! Vocabulary shared by the resolver, booking and HTTP layers.
//!
//! Callers speak in short slugs (`airport-transfer`, `berline`, `aller-retour`)
//! while the rule table uses the French labels printed on the rate card
//! (`Transfert`, `Berline`, `Aller-retour`). Every translation between the two
//! goes through this module.

use serde::{Deserialize, Serialize};

/// Destination forced for every airport booking
pub const AIRPORT_DESTINATION: &str = "Aéroport (AIBD)";

/// Coarse geographic category of a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "Dans Dakar")]
    Dakar,
    #[serde(rename = "Banlieue")]
    Suburbs,
    #[serde(rename = "Aéroport")]
    Airport,
    #[serde(rename = "Régions")]
    Regions,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Dakar, Zone::Suburbs, Zone::Airport, Zone::Regions];

    pub fn label(self) -> &'static str {
        match self {
            Zone::Dakar => "Dans Dakar",
            Zone::Suburbs => "Banlieue",
            Zone::Airport => "Aéroport",
            Zone::Regions => "Régions",
        }
    }
}

/// Service label as written in the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceLabel {
    #[serde(rename = "Transfert")]
    Transfer,
    #[serde(rename = "Mise à disposition")]
    Rental,
}

impl ServiceLabel {
    pub fn label(self) -> &'static str {
        match self {
            ServiceLabel::Transfer => "Transfert",
            ServiceLabel::Rental => "Mise à disposition",
        }
    }
}

/// Service offered on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    AirportTransfer,
    DakarRental,
    RegionRental,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [
        ServiceType::AirportTransfer,
        ServiceType::DakarRental,
        ServiceType::RegionRental,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            ServiceType::AirportTransfer => "airport-transfer",
            ServiceType::DakarRental => "dakar-rental",
            ServiceType::RegionRental => "region-rental",
        }
    }

    /// Display name used on the booking form
    pub fn display_name(self) -> &'static str {
        match self {
            ServiceType::AirportTransfer => "Transfert à l'aéroport (AIBD)",
            ServiceType::DakarRental => "Mise à disposition à Dakar",
            ServiceType::RegionRental => "Mise à disposition en région",
        }
    }

    /// Service label searched first in the rule table.
    ///
    /// Region bookings are priced as transfers and only fall back to the
    /// rental day rate when no transfer rule exists.
    pub fn rule_service(self) -> ServiceLabel {
        match self {
            ServiceType::AirportTransfer | ServiceType::RegionRental => ServiceLabel::Transfer,
            ServiceType::DakarRental => ServiceLabel::Rental,
        }
    }

    /// Zone a booking for this service is filed under
    pub fn zone(self) -> Zone {
        match self {
            ServiceType::AirportTransfer => Zone::Airport,
            ServiceType::DakarRental => Zone::Dakar,
            ServiceType::RegionRental => Zone::Regions,
        }
    }
}

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "Berline")]
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    #[serde(rename = "Utilitaire")]
    Utility,
    #[serde(rename = "VAN (7 personnes)")]
    Van7,
    #[serde(rename = "Minibus 15 places")]
    Minibus15,
    #[serde(rename = "Minibus 28 places")]
    Minibus28,
    #[serde(rename = "Minibus 51 places")]
    Minibus51,
    #[serde(rename = "Toyota 9 places")]
    Toyota9,
}

impl VehicleType {
    pub const ALL: [VehicleType; 8] = [
        VehicleType::Sedan,
        VehicleType::Suv,
        VehicleType::Utility,
        VehicleType::Van7,
        VehicleType::Minibus15,
        VehicleType::Minibus28,
        VehicleType::Minibus51,
        VehicleType::Toyota9,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            VehicleType::Sedan => "berline",
            VehicleType::Suv => "suv",
            VehicleType::Utility => "utilitaire",
            VehicleType::Van7 => "van7",
            VehicleType::Minibus15 => "minibus15",
            VehicleType::Minibus28 => "minibus28",
            VehicleType::Minibus51 => "minibus51",
            VehicleType::Toyota9 => "toyota9",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Sedan => "Berline",
            VehicleType::Suv => "SUV",
            VehicleType::Utility => "Utilitaire",
            VehicleType::Van7 => "VAN (7 personnes)",
            VehicleType::Minibus15 => "Minibus 15 places",
            VehicleType::Minibus28 => "Minibus 28 places",
            VehicleType::Minibus51 => "Minibus 51 places",
            VehicleType::Toyota9 => "Toyota 9 places",
        }
    }

    /// Passenger seats
    pub fn capacity(self) -> u32 {
        match self {
            VehicleType::Sedan => 4,
            VehicleType::Suv | VehicleType::Utility => 6,
            VehicleType::Van7 => 7,
            VehicleType::Toyota9 => 9,
            VehicleType::Minibus15 => 15,
            VehicleType::Minibus28 => 28,
            VehicleType::Minibus51 => 51,
        }
    }
}

/// Trip or duration modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripOption {
    #[serde(rename = "Aller simple")]
    OneWay,
    #[serde(rename = "Aller-retour")]
    RoundTrip,
    #[serde(rename = "Une heure")]
    OneHour,
    #[serde(rename = "Au-delà de 3 heures (par heure)")]
    ExtraHour,
    #[serde(rename = "Demi-journée")]
    HalfDay,
    #[serde(rename = "Journée")]
    FullDay,
}

impl TripOption {
    pub const ALL: [TripOption; 6] = [
        TripOption::OneWay,
        TripOption::RoundTrip,
        TripOption::OneHour,
        TripOption::ExtraHour,
        TripOption::HalfDay,
        TripOption::FullDay,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.slug() == slug)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }

    /// Accepts a slug or, failing that, a rate-card label verbatim
    pub fn parse(input: &str) -> Option<Self> {
        Self::from_slug(input).or_else(|| Self::from_label(input))
    }

    pub fn slug(self) -> &'static str {
        match self {
            TripOption::OneWay => "aller-simple",
            TripOption::RoundTrip => "aller-retour",
            TripOption::OneHour => "une-heure",
            TripOption::ExtraHour => "au-dela-3h",
            TripOption::HalfDay => "demi-journee",
            TripOption::FullDay => "journee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripOption::OneWay => "Aller simple",
            TripOption::RoundTrip => "Aller-retour",
            TripOption::OneHour => "Une heure",
            TripOption::ExtraHour => "Au-delà de 3 heures (par heure)",
            TripOption::HalfDay => "Demi-journée",
            TripOption::FullDay => "Journée",
        }
    }

    pub fn is_round_trip(self) -> bool {
        matches!(self, TripOption::RoundTrip)
    }
}
