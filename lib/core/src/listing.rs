use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Listing identifier - source systems emit both numeric keys and string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Integer(u64),
    String(String),
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingId::Integer(i) => write!(f, "{}", i),
            ListingId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        ListingId::String(s)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        ListingId::String(s.to_string())
    }
}

impl From<u64> for ListingId {
    fn from(i: u64) -> Self {
        ListingId::Integer(i)
    }
}

/// Quality tier derived from the overall rating (0-5 scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    Exceptional,
    Excellent,
    Good,
    Fair,
}

impl QualityTier {
    /// Classify an overall quality score into a tier.
    ///
    /// Thresholds: > 4.8 Exceptional, > 4.5 Excellent, > 4.0 Good, else Fair.
    /// A missing score classifies as Fair.
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            Some(s) if s > 4.8 => QualityTier::Exceptional,
            Some(s) if s > 4.5 => QualityTier::Excellent,
            Some(s) if s > 4.0 => QualityTier::Good,
            _ => QualityTier::Fair,
        }
    }
}

/// A property listing as consumed by the similarity and pricing engines.
///
/// Produced externally (file, database, API - the engine does not care) and
/// read-only for the duration of a run. Attributes that the source system
/// could not provide are `None`; scorers treat them as mismatches rather
/// than errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Geographic coordinates in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Precomputed location cluster label (K-means assignment, input only)
    #[serde(default)]
    pub cluster_id: Option<i32>,

    // Structural attributes
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub beds: Option<u32>,
    /// Fractional baths (1.5, 2.5) are common in the source data
    #[serde(default)]
    pub baths: Option<f64>,
    #[serde(default)]
    pub guests: Option<u32>,

    // Quality attributes
    /// Overall rating on a 0-5 scale
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub quality_tier: Option<QualityTier>,

    /// Amenity identifiers
    #[serde(default)]
    pub amenities: AHashSet<String>,

    /// Currency-normalized nightly price
    #[serde(default)]
    pub price_per_night: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Unavailable listings never enter candidate pools but are still
    /// analyzed as sources
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Listing {
    /// Create a listing with only an id set; everything else defaults to
    /// missing. Mostly useful for building test fixtures incrementally.
    #[must_use]
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            latitude: None,
            longitude: None,
            cluster_id: None,
            bedrooms: None,
            beds: None,
            baths: None,
            guests: None,
            rating: None,
            quality_tier: None,
            amenities: AHashSet::new(),
            price_per_night: None,
            currency: None,
            available: true,
        }
    }

    /// True when both coordinates are present and finite
    pub fn has_coordinates(&self) -> bool {
        matches!(
            (self.latitude, self.longitude),
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite()
        )
    }
}
