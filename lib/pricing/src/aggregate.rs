//! Competitor pricing aggregation.
//!
//! Turns a listing's ranked competitor edges into price statistics and a
//! quality-adjusted recommendation band. A listing whose candidate pool
//! came up empty gets an explicit insufficient-data row - never a
//! fabricated recommendation.

use ahash::AHashMap;
use peerprice_core::stats::{self, serde_opt_round2, serde_round2, serde_round4};
use peerprice_core::{Listing, ListingId};
use peerprice_similarity::CompetitorEdge;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Quality adjustment is capped at +/-15% of the weighted mean.
const QUALITY_FACTOR_MIN: f64 = 0.85;
const QUALITY_FACTOR_MAX: f64 = 1.15;

/// Margin applied under the 25th / over the 75th percentile for the
/// recommended band.
const LOWER_BOUND_MARGIN: f64 = 0.95;
const UPPER_BOUND_MARGIN: f64 = 1.05;

/// Pricing analysis outcome for one listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PricingAnalysis {
    Priced(PricedAnalysis),
    /// The candidate pool was empty after exclusions; no numbers are
    /// fabricated for this listing.
    InsufficientData {
        listing_id: ListingId,
        competitor_count: u32,
    },
}

impl PricingAnalysis {
    pub fn listing_id(&self) -> &ListingId {
        match self {
            PricingAnalysis::Priced(p) => &p.listing_id,
            PricingAnalysis::InsufficientData { listing_id, .. } => listing_id,
        }
    }
}

/// Price statistics and recommendation for a listing with at least one
/// competitor. Prices round to 2 decimal places at serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedAnalysis {
    pub listing_id: ListingId,
    pub competitor_count: u32,

    #[serde(serialize_with = "serde_round2")]
    pub avg_competitor_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub median_competitor_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub min_competitor_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub max_competitor_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub percentile_25_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub percentile_75_price: f64,

    /// Competitor prices weighted by normalized similarity
    #[serde(serialize_with = "serde_round2")]
    pub weighted_avg_price: f64,
    /// How far the listing's own price sits above (+) or below (-) the
    /// weighted competitor mean, in percent. `None` when the listing has
    /// no usable own price.
    #[serde(serialize_with = "serde_opt_round2")]
    pub price_premium_discount: Option<f64>,

    /// Own rating relative to the competitor mean, clamped to [0.85, 1.15]
    #[serde(serialize_with = "serde_round4")]
    pub quality_factor: f64,
    #[serde(serialize_with = "serde_round2")]
    pub recommended_optimal_price: f64,
    #[serde(serialize_with = "serde_round2")]
    pub recommended_price_lower: f64,
    #[serde(serialize_with = "serde_round2")]
    pub recommended_price_upper: f64,

    /// Raised when lower <= optimal <= upper does not hold. The bounds
    /// derive from percentiles and the optimal from the weighted mean, so
    /// the chain can break on skewed pools - surfaced, not re-clamped.
    pub bounds_alert: bool,
}

/// Aggregates competitor prices into per-listing recommendations.
#[derive(Debug, Clone, Default)]
pub struct PricingAggregator;

impl PricingAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Analyze every listing against the bridge relation.
    ///
    /// Edges carry their competitor's price, so pricing math needs no
    /// lookups; the quality factor looks competitor ratings up in
    /// `listings` and treats unknown or unrated competitors as absent
    /// from the rating mean.
    pub fn analyze(&self, listings: &[Listing], edges: &[CompetitorEdge]) -> Vec<PricingAnalysis> {
        let ratings: AHashMap<&ListingId, f64> = listings
            .iter()
            .filter_map(|l| l.rating.map(|r| (&l.id, r)))
            .collect();

        let mut by_source: AHashMap<&ListingId, Vec<&CompetitorEdge>> = AHashMap::new();
        for edge in edges {
            by_source.entry(&edge.source_id).or_default().push(edge);
        }

        let analyses: Vec<PricingAnalysis> = listings
            .iter()
            .map(|listing| {
                let listing_edges = by_source.get(&listing.id).map(Vec::as_slice).unwrap_or(&[]);
                self.analyze_listing(listing, listing_edges, &ratings)
            })
            .collect();

        let insufficient = analyses
            .iter()
            .filter(|a| matches!(a, PricingAnalysis::InsufficientData { .. }))
            .count();
        info!(
            "Analyzed pricing for {} listings ({} with insufficient data)",
            analyses.len(),
            insufficient
        );

        analyses
    }

    /// Analyze a single listing given its kept competitor edges.
    pub fn analyze_listing(
        &self,
        listing: &Listing,
        edges: &[&CompetitorEdge],
        ratings: &AHashMap<&ListingId, f64>,
    ) -> PricingAnalysis {
        let mut prices: Vec<f64> = edges.iter().map(|e| e.competitor_price).collect();
        prices.sort_by(f64::total_cmp);

        let weighted_pairs: Vec<(f64, f64)> =
            edges.iter().map(|e| (e.competitor_price, e.weight)).collect();

        let (
            Some(avg),
            Some(median),
            Some(&min),
            Some(&max),
            Some(p25),
            Some(p75),
            Some(weighted),
        ) = (
            stats::mean(&prices),
            stats::median(&prices),
            prices.first(),
            prices.last(),
            stats::percentile(&prices, 25.0),
            stats::percentile(&prices, 75.0),
            stats::weighted_mean(&weighted_pairs),
        )
        else {
            return PricingAnalysis::InsufficientData {
                listing_id: listing.id.clone(),
                competitor_count: 0,
            };
        };

        let competitor_ratings: Vec<f64> = edges
            .iter()
            .filter_map(|e| ratings.get(&e.competitor_id).copied())
            .collect();
        let quality_factor = match (listing.rating, stats::mean(&competitor_ratings)) {
            (Some(own), Some(pool)) if pool > 0.0 => own / pool,
            _ => 1.0,
        }
        .clamp(QUALITY_FACTOR_MIN, QUALITY_FACTOR_MAX);

        let optimal = weighted * quality_factor;
        let lower = p25 * LOWER_BOUND_MARGIN;
        let upper = p75 * UPPER_BOUND_MARGIN;

        let premium = match listing.price_per_night {
            Some(own) if own > 0.0 && weighted > 0.0 => {
                Some((own - weighted) / weighted * 100.0)
            }
            _ => None,
        };

        PricingAnalysis::Priced(PricedAnalysis {
            listing_id: listing.id.clone(),
            competitor_count: edges.len() as u32,
            avg_competitor_price: avg,
            median_competitor_price: median,
            min_competitor_price: min,
            max_competitor_price: max,
            percentile_25_price: p25,
            percentile_75_price: p75,
            weighted_avg_price: weighted,
            price_premium_discount: premium,
            quality_factor,
            recommended_optimal_price: optimal,
            recommended_price_lower: lower,
            recommended_price_upper: upper,
            bounds_alert: !(lower <= optimal && optimal <= upper),
        })
    }
}
