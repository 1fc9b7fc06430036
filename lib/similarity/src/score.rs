//! Component similarity scorers.
//!
//! Provides the five per-factor scoring functions used in competitor
//! similarity. All functions return a score in range [0.0, 100.0] where
//! 100.0 means identical. Missing attributes score as mismatches for the
//! affected term; they never raise. The one exception is pricing, where a
//! missing or non-positive reference price makes the pair non-comparable
//! ([`price_score`] returns `None`) - substituting a default there would
//! bias rankings against listings with missing price data.

use peerprice_core::{geo, Listing};

/// Bonus applied when two listings share a location cluster.
const SAME_CLUSTER_BONUS: f64 = 50.0;

/// Distance decay constant in kilometers: proximity contribution is
/// `100 * exp(-distance / DISTANCE_DECAY_KM)`.
const DISTANCE_DECAY_KM: f64 = 2.0;

/// Location similarity from cluster co-membership and physical proximity.
///
/// `(50 if same cluster) + 100 * exp(-distance_km / 2)`, clamped to 100.
/// The two signals are independent: listings without coordinates lose the
/// proximity term but can still earn the cluster bonus, and vice versa.
pub fn location_score(a: &Listing, b: &Listing) -> f64 {
    let cluster_bonus = match (a.cluster_id, b.cluster_id) {
        (Some(ca), Some(cb)) if ca == cb => SAME_CLUSTER_BONUS,
        _ => 0.0,
    };

    let proximity = if a.has_coordinates() && b.has_coordinates() {
        let km = geo::haversine_km(
            a.latitude.unwrap_or_default(),
            a.longitude.unwrap_or_default(),
            b.latitude.unwrap_or_default(),
            b.longitude.unwrap_or_default(),
        );
        100.0 * (-km / DISTANCE_DECAY_KM).exp()
    } else {
        0.0
    };

    (cluster_bonus + proximity).min(100.0)
}

/// Structural similarity from bedroom, guest-capacity, bed and bath deltas.
///
/// `(40 if bedrooms equal) + (30 if |guest diff| <= 2)
///  + 30 * max(0, 1 - (|bed diff| + |bath diff|) / 10)`
pub fn property_score(a: &Listing, b: &Listing) -> f64 {
    let bedroom_match = match (a.bedrooms, b.bedrooms) {
        (Some(x), Some(y)) if x == y => 40.0,
        _ => 0.0,
    };

    let guest_score = match (a.guests, b.guests) {
        (Some(x), Some(y)) if x.abs_diff(y) <= 2 => 30.0,
        _ => 0.0,
    };

    let bed_bath_score = match (a.beds, b.beds, a.baths, b.baths) {
        (Some(beds_a), Some(beds_b), Some(baths_a), Some(baths_b)) => {
            let diff = beds_a.abs_diff(beds_b) as f64 + (baths_a - baths_b).abs();
            30.0 * (1.0 - diff / 10.0).max(0.0)
        }
        _ => 0.0,
    };

    bedroom_match + guest_score + bed_bath_score
}

/// Quality similarity from rating alignment and tier co-membership.
///
/// `max(0, 100 - |rating diff| * 20) + (20 if same tier)`, clamped to
/// [0, 100]. Identical ratings max out the first term; the widest possible
/// gap on the 0-5 scale drives it to zero.
pub fn quality_score(a: &Listing, b: &Listing) -> f64 {
    let rating_term = match (a.rating, b.rating) {
        (Some(ra), Some(rb)) => (100.0 - (ra - rb).abs() * 20.0).max(0.0),
        _ => 0.0,
    };

    let tier_bonus = match (a.quality_tier, b.quality_tier) {
        (Some(ta), Some(tb)) if ta == tb => 20.0,
        _ => 0.0,
    };

    (rating_term + tier_bonus).clamp(0.0, 100.0)
}

/// Amenity similarity: Jaccard index over amenity-id sets, scaled to 100.
///
/// Two empty sets score 0 - no shared amenity information means no
/// similarity signal, not a perfect match.
pub fn amenity_score(a: &Listing, b: &Listing) -> f64 {
    if a.amenities.is_empty() && b.amenities.is_empty() {
        return 0.0;
    }

    let intersection = a.amenities.intersection(&b.amenities).count();
    let union = a.amenities.union(&b.amenities).count();

    if union == 0 {
        0.0
    } else {
        100.0 * intersection as f64 / union as f64
    }
}

/// Price similarity from the relative nightly-price delta, with the
/// candidate price as the reference.
///
/// `max(0, 100 - |pct diff| * 2)` where
/// `pct diff = (price_a - price_b) / price_b * 100`.
///
/// Returns `None` when either price is missing or the reference price is
/// not positive: the pair is non-comparable and must be excluded from
/// ranking rather than scored.
pub fn price_score(a: &Listing, b: &Listing) -> Option<f64> {
    let price_a = a.price_per_night?;
    let price_b = b.price_per_night?;
    if price_b <= 0.0 {
        return None;
    }

    let pct_diff = (price_a - price_b) / price_b * 100.0;
    Some((100.0 - pct_diff.abs() * 2.0).max(0.0))
}
