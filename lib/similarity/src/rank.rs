//! Top-K competitor selection.
//!
//! Turns a source listing's scored candidates into ranked
//! [`CompetitorEdge`] rows: sort by composite score (descending, ascending
//! competitor id on ties), keep the best K, normalize scores into
//! per-source weights. The resulting edge set is verified against its
//! invariants before it leaves this module; a violation fails that source
//! listing only, never the run.

use crate::engine::PairScores;
use ordered_float::OrderedFloat;
use peerprice_core::{Error, Listing, ListingId, Result};
use peerprice_core::stats::{serde_round2, serde_round4};
use serde::{Deserialize, Serialize};

/// Tolerance for the per-source weight-sum invariant.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// One retained competitor relationship - a row of the bridge relation.
///
/// Scores and weights are kept at full precision in memory; serialization
/// rounds scores and prices to 2 decimal places and weights to 4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorEdge {
    pub source_id: ListingId,
    pub competitor_id: ListingId,
    /// 1-based, dense per source, ordered by descending composite score
    pub rank: u32,
    #[serde(serialize_with = "serde_round2")]
    pub overall_score: f64,
    #[serde(serialize_with = "serde_round2")]
    pub location_score: f64,
    #[serde(serialize_with = "serde_round2")]
    pub property_score: f64,
    #[serde(serialize_with = "serde_round2")]
    pub quality_score: f64,
    #[serde(serialize_with = "serde_round2")]
    pub amenity_score: f64,
    #[serde(serialize_with = "serde_round2")]
    pub price_score: f64,
    /// Composite score normalized so a source's weights sum to 1.0
    #[serde(serialize_with = "serde_round4")]
    pub weight: f64,
    /// Competitor nightly price, carried for the pricing aggregation
    #[serde(serialize_with = "serde_round2")]
    pub competitor_price: f64,
    /// Competitor price minus source price
    #[serde(serialize_with = "serde_round2")]
    pub price_difference: f64,
    /// Price difference as a percentage of the source price
    #[serde(serialize_with = "serde_round2")]
    pub price_diff_pct: f64,
}

/// A candidate that survived pairwise scoring, ready for ranking.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub id: ListingId,
    pub price: f64,
    pub scores: PairScores,
}

/// Rank a source listing's candidates and keep the top `k`.
///
/// Weights normalize the kept composite scores to sum to 1.0; if every kept
/// score is zero the weights fall back to uniform 1/N. The returned edges
/// are invariant-checked (no self-edge, dense ranks, weight sum).
pub(crate) fn select_top_k(
    source: &Listing,
    mut candidates: Vec<Candidate>,
    k: usize,
) -> Result<Vec<CompetitorEdge>> {
    candidates.sort_by(|a, b| {
        OrderedFloat(b.scores.overall)
            .cmp(&OrderedFloat(a.scores.overall))
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.truncate(k);

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let total: f64 = candidates.iter().map(|c| c.scores.overall).sum();
    let uniform = 1.0 / candidates.len() as f64;
    // Source price exists whenever edges exist: a priceless source has no
    // comparable pairs at all.
    let source_price = source.price_per_night.unwrap_or_default();

    let edges: Vec<CompetitorEdge> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let weight = if total > 0.0 {
                c.scores.overall / total
            } else {
                uniform
            };
            CompetitorEdge {
                source_id: source.id.clone(),
                competitor_id: c.id,
                rank: (i + 1) as u32,
                overall_score: c.scores.overall,
                location_score: c.scores.location,
                property_score: c.scores.property,
                quality_score: c.scores.quality,
                amenity_score: c.scores.amenity,
                price_score: c.scores.price,
                weight,
                competitor_price: c.price,
                price_difference: c.price - source_price,
                price_diff_pct: if source_price > 0.0 {
                    (c.price - source_price) / source_price * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    verify_edges(&source.id, &edges)?;
    Ok(edges)
}

/// Check the bridge invariants for one source listing's edge set.
fn verify_edges(source_id: &ListingId, edges: &[CompetitorEdge]) -> Result<()> {
    let mut weight_sum = 0.0;

    for (i, edge) in edges.iter().enumerate() {
        if edge.competitor_id == *source_id {
            return Err(Error::SelfEdge(source_id.clone()));
        }
        if edge.rank != (i + 1) as u32 {
            return Err(Error::InvalidRank {
                listing: source_id.clone(),
                rank: edge.rank,
            });
        }
        weight_sum += edge.weight;
    }

    if !edges.is_empty() && (weight_sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        return Err(Error::WeightSum {
            listing: source_id.clone(),
            sum: weight_sum,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, overall: f64) -> Candidate {
        Candidate {
            id: id.into(),
            price: 100.0,
            scores: PairScores {
                location: overall,
                property: overall,
                quality: overall,
                amenity: overall,
                price: overall,
                overall,
            },
        }
    }

    fn source() -> Listing {
        let mut l = Listing::new("src");
        l.price_per_night = Some(90.0);
        l
    }

    #[test]
    fn test_ranks_dense_and_sorted() {
        let candidates = vec![
            candidate("low", 20.0),
            candidate("high", 90.0),
            candidate("mid", 50.0),
        ];
        let edges = select_top_k(&source(), candidates, 25).unwrap();

        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].competitor_id, "high".into());
        assert_eq!(edges[1].competitor_id, "mid".into());
        assert_eq!(edges[2].competitor_id, "low".into());
        assert_eq!(
            edges.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_truncates_to_k() {
        let candidates = (0..40)
            .map(|i| candidate(&format!("c{:02}", i), i as f64))
            .collect();
        let edges = select_top_k(&source(), candidates, 25).unwrap();
        assert_eq!(edges.len(), 25);
        // Best score first
        assert_eq!(edges[0].competitor_id, "c39".into());
    }

    #[test]
    fn test_tie_break_ascending_id() {
        let candidates = vec![
            candidate("zeta", 50.0),
            candidate("alpha", 50.0),
            candidate("mike", 50.0),
        ];
        let edges = select_top_k(&source(), candidates, 25).unwrap();
        assert_eq!(edges[0].competitor_id, "alpha".into());
        assert_eq!(edges[1].competitor_id, "mike".into());
        assert_eq!(edges[2].competitor_id, "zeta".into());
    }

    #[test]
    fn test_weights_sum_to_one() {
        let candidates = (0..25)
            .map(|i| candidate(&format!("c{:02}", i), 10.0 + i as f64))
            .collect();
        let edges = select_top_k(&source(), candidates, 25).unwrap();
        let sum: f64 = edges.iter().map(|e| e.weight).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        // Higher score, higher weight
        assert!(edges[0].weight > edges[24].weight);
    }

    #[test]
    fn test_all_zero_scores_fall_back_to_uniform() {
        let candidates = (0..4).map(|i| candidate(&format!("c{}", i), 0.0)).collect();
        let edges = select_top_k(&source(), candidates, 25).unwrap();
        for edge in &edges {
            assert!((edge.weight - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_candidates() {
        let edges = select_top_k(&source(), Vec::new(), 25).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_price_context() {
        let candidates = vec![candidate("c", 80.0)];
        let edges = select_top_k(&source(), candidates, 25).unwrap();
        // Competitor at 100 vs source at 90
        assert!((edges[0].price_difference - 10.0).abs() < 1e-9);
        assert!((edges[0].price_diff_pct - 11.111).abs() < 0.001);
    }

    #[test]
    fn test_verify_rejects_self_edge() {
        let src = source();
        let candidates = vec![candidate("src", 50.0)];
        assert!(matches!(
            select_top_k(&src, candidates, 25),
            Err(Error::SelfEdge(_))
        ));
    }

    #[test]
    fn test_serialized_rounding() {
        let mut c = candidate("c", 33.333333);
        c.price = 123.456;
        let edges = select_top_k(&source(), vec![c], 25).unwrap();
        let json = serde_json::to_value(&edges[0]).unwrap();
        assert_eq!(json["overall_score"], 33.33);
        assert_eq!(json["weight"], 1.0);
        assert_eq!(json["competitor_price"], 123.46);
    }
}
