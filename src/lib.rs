//! # peerprice
//!
//! A competitor similarity and price recommendation engine for
//! short-term rental listings.
//!
//! Given a flat collection of listing records, peerprice finds each
//! listing's 25 most comparable peers across five weighted factors
//! (location, property structure, quality, amenities, price) and derives
//! a recommended nightly price band from the peers' price distribution.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install peerprice
//! peerprice listings.json --out-dir ./out
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use peerprice::prelude::*;
//!
//! let mut a = Listing::new("loft-12");
//! a.price_per_night = Some(120.0);
//! let mut b = Listing::new("studio-7");
//! b.price_per_night = Some(110.0);
//! let listings = vec![a, b];
//!
//! // Rank competitors
//! let engine = SimilarityEngine::new(EngineConfig::default());
//! let ranking = engine.run(&listings);
//!
//! // Derive price recommendations
//! let analyses = PricingAggregator::new().analyze(&listings, &ranking.edges);
//! assert_eq!(analyses.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! peerprice is composed of several crates:
//!
//! - [`peerprice-core`](https://docs.rs/peerprice-core) - Listing model, haversine distance, statistics
//! - [`peerprice-similarity`](https://docs.rs/peerprice-similarity) - Component scorers, composite ranking, the bridge relation
//! - [`peerprice-pricing`](https://docs.rs/peerprice-pricing) - Competitor price aggregation and recommendations

// Re-export core types
pub use peerprice_core::{
    Error, Listing, ListingId, QualityTier, Result,
    geo, stats,
};

// Re-export the similarity engine
pub use peerprice_similarity::{
    CompetitorEdge, EngineConfig, PairScores, RankingOutput,
    SimilarityEngine, SimilarityWeights, WeightsError,
};

// Re-export pricing
pub use peerprice_pricing::{PricedAnalysis, PricingAggregator, PricingAnalysis};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CompetitorEdge, EngineConfig, Error, Listing, ListingId,
        PricedAnalysis, PricingAggregator, PricingAnalysis, QualityTier,
        RankingOutput, Result, SimilarityEngine, SimilarityWeights,
    };
}
