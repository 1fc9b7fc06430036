//! Component weights for the composite similarity score.

use serde::{Deserialize, Serialize};

/// Tolerance when asserting that weights sum to 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Weights combining the five component scores into one composite score.
///
/// The defaults encode the production model: location dominates, then
/// structure, then quality, with amenities and price as refinements. The sum
/// must be exactly 1.0 - [`SimilarityWeights::validate`] asserts it rather
/// than assuming it, and the engine refuses to run with invalid weights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityWeights {
    pub location: f64,
    pub property: f64,
    pub quality: f64,
    pub amenity: f64,
    pub price: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            location: 0.35,
            property: 0.25,
            quality: 0.20,
            amenity: 0.10,
            price: 0.10,
        }
    }
}

impl SimilarityWeights {
    /// Validate the weights: no negative components, sum within 1e-6 of 1.0.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, w) in self.components() {
            if w < 0.0 {
                return Err(WeightsError::NegativeWeight(name));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(WeightsError::BadSum(sum));
        }

        Ok(())
    }

    /// Scale all components so they sum to 1.0. Errors on a non-positive or
    /// negative-component starting point.
    pub fn normalize(&mut self) -> Result<(), WeightsError> {
        for (name, w) in self.components() {
            if w < 0.0 {
                return Err(WeightsError::NegativeWeight(name));
            }
        }

        let sum = self.sum();
        if sum <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }

        self.location /= sum;
        self.property /= sum;
        self.quality /= sum;
        self.amenity /= sum;
        self.price /= sum;
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.location + self.property + self.quality + self.amenity + self.price
    }

    fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("location", self.location),
            ("property", self.property),
            ("quality", self.quality),
            ("amenity", self.amenity),
            ("price", self.price),
        ]
    }
}

/// Errors that can occur validating similarity weights
#[derive(Debug, Clone, thiserror::Error)]
pub enum WeightsError {
    #[error("Component '{0}' has negative weight")]
    NegativeWeight(&'static str),

    #[error("Weights sum to {0}, expected 1.0")]
    BadSum(f64),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}
