//! Display formatting for prices.
//!
//! Pure functions, no table access.

use super::models::PriceResult;

/// Shown in place of an amount when no fixed price applies
pub const QUOTE_LABEL: &str = "Sur devis";

/// Render a price for display.
///
/// # Examples
/// ```
/// use kairos_web::pricing::{format_price, PriceResult};
///
/// let price = PriceResult::Fixed { amount: 55000, currency: "FCFA".to_string() };
/// assert_eq!(format_price(&price), "55 000 FCFA");
/// assert_eq!(format_price(&PriceResult::QuoteRequired), "Sur devis");
/// ```
pub fn format_price(result: &PriceResult) -> String {
    match result {
        PriceResult::Fixed { amount, currency } => {
            format!("{} {}", group_thousands(*amount), currency)
        }
        PriceResult::QuoteRequired => QUOTE_LABEL.to_string(),
    }
}

/// Insert a space between every group of three digits
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    grouped
}
