//! Pricing engine for Kairos Transport.
//!
//! Resolves a booking selection (service, vehicle, destination, trip option)
//! against the rate card to either a fixed FCFA amount or a quote request.

pub mod format;
pub mod models;
pub mod requests;
pub mod resolver;
pub mod responses;
pub mod routes;
pub mod table;
pub mod vocabulary;

// Re-export commonly used items
pub use format::{format_price, QUOTE_LABEL};
pub use models::{PriceResult, PricingRule, RulePrice};
pub use resolver::PriceResolver;
pub use routes::router;
pub use table::{Catalog, RuleTable, TableError};
