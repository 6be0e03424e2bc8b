//! Pricing data models.
//!
//! These mirror the rows of the published rate card and deserialize directly
//! from `data/pricing_rules.json`.

use serde::{Deserialize, Serialize};

use super::vocabulary::{ServiceLabel, TripOption, VehicleType, Zone};

/// Marker stored in place of an amount for quote-only rules
pub const QUOTE_MARKER: &str = "quote";

/// Price column of a rule: a fixed amount or "quote only"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRulePrice", into = "RawRulePrice")]
pub enum RulePrice {
    Fixed(u64),
    Quote,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRulePrice {
    Amount(u64),
    Marker(String),
}

impl TryFrom<RawRulePrice> for RulePrice {
    type Error = String;

    fn try_from(raw: RawRulePrice) -> Result<Self, Self::Error> {
        match raw {
            RawRulePrice::Amount(amount) => Ok(RulePrice::Fixed(amount)),
            RawRulePrice::Marker(marker) if marker == QUOTE_MARKER => Ok(RulePrice::Quote),
            RawRulePrice::Marker(marker) => Err(format!(
                "unknown price marker '{}', expected an amount or '{}'",
                marker, QUOTE_MARKER
            )),
        }
    }
}

impl From<RulePrice> for RawRulePrice {
    fn from(price: RulePrice) -> Self {
        match price {
            RulePrice::Fixed(amount) => RawRulePrice::Amount(amount),
            RulePrice::Quote => RawRulePrice::Marker(QUOTE_MARKER.to_string()),
        }
    }
}

/// One row of the rate card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    pub zone: Zone,
    pub destination: String,
    pub service: ServiceLabel,
    pub vehicle_type: VehicleType,
    pub option: TripOption,
    pub price: RulePrice,
    /// Falls back to the table currency when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl PricingRule {
    /// Check if the rule only says "ask for a quote"
    pub fn is_quote_only(&self) -> bool {
        matches!(self.price, RulePrice::Quote)
    }
}

/// Published destinations of a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDestinations {
    pub zone: Zone,
    pub destinations: Vec<String>,
}

/// On-disk shape of the rate card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    pub currency: String,
    pub zones: Vec<ZoneDestinations>,
    pub rules: Vec<PricingRule>,
}

/// Outcome of a price lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceResult {
    Fixed { amount: u64, currency: String },
    QuoteRequired,
}

impl PriceResult {
    pub fn amount(&self) -> Option<u64> {
        match self {
            PriceResult::Fixed { amount, .. } => Some(*amount),
            PriceResult::QuoteRequired => None,
        }
    }

    pub fn is_quote_required(&self) -> bool {
        matches!(self, PriceResult::QuoteRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_price_accepts_amount_and_marker() {
        let fixed: RulePrice = serde_json::from_str("25000").unwrap();
        assert_eq!(fixed, RulePrice::Fixed(25000));

        let quote: RulePrice = serde_json::from_str("\"quote\"").unwrap();
        assert_eq!(quote, RulePrice::Quote);
        assert_eq!(serde_json::to_string(&quote).unwrap(), "\"quote\"");
    }

    #[test]
    fn test_rule_price_rejects_unknown_marker() {
        let err = serde_json::from_str::<RulePrice>("\"devis\"").unwrap_err();
        assert!(err.to_string().contains("devis"));

        assert!(serde_json::from_str::<RulePrice>("-5").is_err());
    }

    #[test]
    fn test_rule_deserializes_from_rate_card_row() {
        let rule: PricingRule = serde_json::from_str(
            r#"{"zone": "Régions", "destination": "Saly", "service": "Mise à disposition",
                "vehicle_type": "Berline", "option": "Journée", "price": 55000}"#,
        )
        .unwrap();

        assert_eq!(rule.zone, Zone::Regions);
        assert_eq!(rule.service, ServiceLabel::Rental);
        assert_eq!(rule.option, TripOption::FullDay);
        assert_eq!(rule.price, RulePrice::Fixed(55000));
        assert!(rule.currency.is_none());
        assert!(!rule.is_quote_only());
    }

    #[test]
    fn test_price_result_json_shape() {
        let fixed = PriceResult::Fixed {
            amount: 40000,
            currency: "FCFA".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&fixed).unwrap(),
            serde_json::json!({"kind": "fixed", "amount": 40000, "currency": "FCFA"})
        );
        assert_eq!(
            serde_json::to_value(PriceResult::QuoteRequired).unwrap(),
            serde_json::json!({"kind": "quote_required"})
        );
        assert_eq!(fixed.amount(), Some(40000));
        assert!(PriceResult::QuoteRequired.is_quote_required());
    }
}
