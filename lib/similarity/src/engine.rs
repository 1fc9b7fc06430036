//! Batch similarity engine.
//!
//! Scores every ordered pair of listings, ranks each listing's candidates
//! and emits the bridge relation. The per-source passes are independent -
//! the engine fans them out over a rayon thread pool against the read-only
//! listing slice. A failed source listing (invariant violation) is logged
//! and dropped; the run continues for every other listing.

use crate::rank::{select_top_k, Candidate, CompetitorEdge};
use crate::score;
use crate::weights::{SimilarityWeights, WeightsError};
use peerprice_core::{Listing, ListingId, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Pairwise similarity of one ordered listing pair. Transient - computed,
/// ranked, discarded.
#[derive(Debug, Clone, Copy)]
pub struct PairScores {
    pub location: f64,
    pub property: f64,
    pub quality: f64,
    pub amenity: f64,
    pub price: f64,
    /// Weighted composite, in [0, 100]
    pub overall: f64,
}

/// Configuration for a similarity run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Competitors retained per listing
    pub top_k: usize,
    /// Opt-in candidate pre-filter: only compare listings sharing the
    /// source's cluster. Changes the candidate set, never the formulas.
    pub same_cluster_only: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 25,
            same_cluster_only: false,
        }
    }
}

/// Result of a batch ranking run
#[derive(Debug, Default)]
pub struct RankingOutput {
    /// Bridge rows, grouped per source in input order
    pub edges: Vec<CompetitorEdge>,
    /// Sources whose edge set violated an invariant and was dropped
    pub skipped: Vec<ListingId>,
}

/// Competitor similarity engine holding validated weights and run config
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    weights: SimilarityWeights,
    config: EngineConfig,
}

impl SimilarityEngine {
    /// Create an engine with the default (production) weights.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            weights: SimilarityWeights::default(),
            config,
        }
    }

    /// Create an engine with custom weights. Fails unless the weights
    /// sum to 1.0.
    pub fn with_weights(
        config: EngineConfig,
        weights: SimilarityWeights,
    ) -> std::result::Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights, config })
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one ordered pair of distinct listings.
    ///
    /// Returns `None` when the pair is non-comparable (missing or
    /// non-positive reference price) - such pairs are excluded from
    /// ranking entirely rather than scored with a substitute.
    pub fn score_pair(&self, a: &Listing, b: &Listing) -> Option<PairScores> {
        let price = score::price_score(a, b)?;
        let location = score::location_score(a, b);
        let property = score::property_score(a, b);
        let quality = score::quality_score(a, b);
        let amenity = score::amenity_score(a, b);

        let w = &self.weights;
        let overall = location * w.location
            + property * w.property
            + quality * w.quality
            + amenity * w.amenity
            + price * w.price;

        Some(PairScores {
            location,
            property,
            quality,
            amenity,
            price,
            overall,
        })
    }

    /// Rank one source listing against the whole universe and keep the
    /// top K. Exhaustive O(n) per source, O(n^2) for a full run - the
    /// accepted dominant cost of exact competitor discovery.
    pub fn rank_source(&self, source: &Listing, listings: &[Listing]) -> Result<Vec<CompetitorEdge>> {
        let candidates: Vec<Candidate> = listings
            .iter()
            .filter(|other| other.id != source.id && other.available)
            .filter(|other| {
                if !self.config.same_cluster_only {
                    return true;
                }
                matches!(
                    (source.cluster_id, other.cluster_id),
                    (Some(a), Some(b)) if a == b
                )
            })
            .filter_map(|other| {
                let scores = self.score_pair(source, other)?;
                Some(Candidate {
                    id: other.id.clone(),
                    // score_pair verified the price exists
                    price: other.price_per_night.unwrap_or_default(),
                    scores,
                })
            })
            .collect();

        select_top_k(source, candidates, self.config.top_k)
    }

    /// Run the full batch: every listing ranked against every other.
    ///
    /// Listings are processed concurrently; results come back in input
    /// order, so the output is identical across re-runs on the same input.
    pub fn run(&self, listings: &[Listing]) -> RankingOutput {
        let processed = AtomicUsize::new(0);
        let total = listings.len();

        let per_source: Vec<(ListingId, Result<Vec<CompetitorEdge>>)> = listings
            .par_iter()
            .map(|source| {
                let result = self.rank_source(source, listings);
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % 10 == 0 {
                    debug!("Ranked {}/{} listings", done, total);
                }
                (source.id.clone(), result)
            })
            .collect();

        let mut output = RankingOutput::default();
        for (source_id, result) in per_source {
            match result {
                Ok(edges) => output.edges.extend(edges),
                Err(e) => {
                    warn!("Skipping listing {}: {}", source_id, e);
                    output.skipped.push(source_id);
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(n: usize) -> Vec<Listing> {
        (0..n)
            .map(|i| {
                let mut l = Listing::new(format!("l{:03}", i));
                l.latitude = Some(40.0 + i as f64 * 0.001);
                l.longitude = Some(-74.0);
                l.cluster_id = Some((i % 3) as i32);
                l.bedrooms = Some(1 + (i % 4) as u32);
                l.beds = Some(1 + (i % 5) as u32);
                l.baths = Some(1.0 + (i % 2) as f64);
                l.guests = Some(2 + (i % 6) as u32);
                l.rating = Some(3.5 + (i % 4) as f64 * 0.4);
                l.amenities = (0..(i % 5))
                    .map(|a| format!("amenity-{}", a))
                    .collect();
                l.price_per_night = Some(80.0 + (i % 10) as f64 * 15.0);
                l
            })
            .collect()
    }

    #[test]
    fn test_score_pair_composite_in_range() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let listings = universe(10);
        for a in &listings {
            for b in &listings {
                if a.id == b.id {
                    continue;
                }
                let scores = engine.score_pair(a, b).unwrap();
                assert!((0.0..=100.0).contains(&scores.overall));
            }
        }
    }

    #[test]
    fn test_score_pair_non_comparable() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let priced = &universe(1)[0];
        let unpriced = Listing::new("no-price");
        assert!(engine.score_pair(priced, &unpriced).is_none());
    }

    #[test]
    fn test_full_universe_gets_full_edge_sets() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let listings = universe(30);
        let output = engine.run(&listings);

        assert!(output.skipped.is_empty());
        // 30 sources, 29 candidates each, capped at 25
        assert_eq!(output.edges.len(), 30 * 25);
        for chunk in output.edges.chunks(25) {
            let ranks: Vec<u32> = chunk.iter().map(|e| e.rank).collect();
            assert_eq!(ranks, (1..=25).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn test_small_universe_yields_n_minus_one() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let listings = universe(4);
        let output = engine.run(&listings);
        assert_eq!(output.edges.len(), 4 * 3);
    }

    #[test]
    fn test_no_self_edges() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let output = engine.run(&universe(20));
        assert!(output.edges.iter().all(|e| e.source_id != e.competitor_id));
    }

    #[test]
    fn test_unavailable_listings_excluded_as_candidates() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let mut listings = universe(5);
        listings[2].available = false;

        let output = engine.run(&listings);
        let delisted = &listings[2].id;
        assert!(output.edges.iter().all(|e| e.competitor_id != *delisted));
        // But the delisted listing is still ranked as a source
        assert_eq!(
            output.edges.iter().filter(|e| e.source_id == *delisted).count(),
            4
        );
    }

    #[test]
    fn test_same_cluster_prefilter_shrinks_candidate_set() {
        let listings = universe(30);
        let exhaustive = SimilarityEngine::new(EngineConfig::default());
        let filtered = SimilarityEngine::new(EngineConfig {
            same_cluster_only: true,
            ..EngineConfig::default()
        });

        let source = &listings[0];
        let all = exhaustive.rank_source(source, &listings).unwrap();
        let clustered = filtered.rank_source(source, &listings).unwrap();

        assert!(clustered.len() < all.len());
        // 10 listings share cluster 0, minus the source itself
        assert_eq!(clustered.len(), 9);
    }

    #[test]
    fn test_run_is_deterministic() {
        let engine = SimilarityEngine::new(EngineConfig::default());
        let listings = universe(25);
        let first = engine.run(&listings);
        let second = engine.run(&listings);

        assert_eq!(first.edges.len(), second.edges.len());
        for (a, b) in first.edges.iter().zip(second.edges.iter()) {
            assert_eq!(a.source_id, b.source_id);
            assert_eq!(a.competitor_id, b.competitor_id);
            assert_eq!(a.rank, b.rank);
            assert_eq!(a.overall_score, b.overall_score);
            assert_eq!(a.weight, b.weight);
        }
    }

    #[test]
    fn test_custom_weights_must_validate() {
        let bad = SimilarityWeights {
            location: 0.9,
            ..SimilarityWeights::default()
        };
        assert!(SimilarityEngine::with_weights(EngineConfig::default(), bad).is_err());
    }
}
