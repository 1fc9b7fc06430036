//! # peerprice Pricing
//!
//! Price recommendations from competitor evidence.
//!
//! Consumes the bridge relation produced by `peerprice-similarity` and
//! emits one [`PricingAnalysis`] per listing: descriptive statistics over
//! competitor prices, a similarity-weighted mean, and a quality-adjusted
//! recommended price band. Listings whose candidate pool came up empty get
//! an explicit insufficient-data outcome.

pub mod aggregate;

pub use aggregate::{PricedAnalysis, PricingAggregator, PricingAnalysis};
