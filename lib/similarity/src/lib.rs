//! # peerprice Similarity
//!
//! Multi-factor competitor similarity for property listings.
//!
//! This crate scores how comparable two listings are across five
//! independent factors, combines them into a weighted composite, and
//! selects each listing's top competitors.
//!
//! ## Features
//!
//! - **Component Scorers**: location, property, quality, amenity and price
//!   similarity, each on a 0-100 scale
//! - **Validated Weights**: the composite weighting is asserted to sum to
//!   1.0, never assumed
//! - **Deterministic Ranking**: descending composite score with an
//!   ascending-id tie-break, so re-runs reproduce the same bridge
//! - **Parallel Batch Runs**: per-source passes fan out across a rayon
//!   pool over the read-only listing slice
//!
//! ## Example
//!
//! ```rust
//! use peerprice_similarity::{SimilarityEngine, EngineConfig};
//! use peerprice_core::Listing;
//!
//! let mut a = Listing::new("loft-12");
//! a.price_per_night = Some(120.0);
//! a.bedrooms = Some(2);
//! let mut b = Listing::new("studio-7");
//! b.price_per_night = Some(110.0);
//! b.bedrooms = Some(2);
//!
//! let engine = SimilarityEngine::new(EngineConfig::default());
//! let output = engine.run(&[a, b]);
//! assert_eq!(output.edges.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Listings   │────>│   Scorers   │────>│  Composite  │
//! │ (read-only) │     │ (per factor)│     │ (weighted)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Bridge    │<────│    Top-K    │
//!                     │   (edges)   │     │  (ranked)   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod engine;
pub mod rank;
pub mod score;
pub mod weights;

// Re-export main types for convenience
pub use engine::{EngineConfig, PairScores, RankingOutput, SimilarityEngine};
pub use rank::CompetitorEdge;
pub use weights::{SimilarityWeights, WeightsError};
