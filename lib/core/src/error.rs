use crate::listing::ListingId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),

    #[error("Self edge for listing {0}")]
    SelfEdge(ListingId),

    #[error("Duplicate or non-dense rank {rank} for listing {listing}")]
    InvalidRank { listing: ListingId, rank: u32 },

    #[error("Competitor weights for listing {listing} sum to {sum}, expected 1.0")]
    WeightSum { listing: ListingId, sum: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
