//! # peerprice Core
//!
//! Core library for the peerprice competitor analysis engine.
//!
//! This crate provides the shared data model and leaf utilities:
//!
//! - [`Listing`] - A property listing with location, structural, quality,
//!   amenity and pricing attributes
//! - [`ListingId`] - String or integer identifier, totally ordered for
//!   deterministic tie-breaks
//! - [`geo`] - Great-circle (haversine) distance
//! - [`stats`] - Mean, median, linear-interpolation percentiles, weighted mean
//!
//! ## Example
//!
//! ```rust
//! use peerprice_core::{Listing, geo};
//!
//! let mut a = Listing::new("loft-12");
//! a.latitude = Some(52.52);
//! a.longitude = Some(13.405);
//! a.price_per_night = Some(120.0);
//!
//! let mut b = Listing::new("studio-7");
//! b.latitude = Some(52.53);
//! b.longitude = Some(13.41);
//!
//! let km = geo::haversine_km(
//!     a.latitude.unwrap(), a.longitude.unwrap(),
//!     b.latitude.unwrap(), b.longitude.unwrap(),
//! );
//! assert!(km < 2.0);
//! ```

pub mod error;
pub mod geo;
pub mod listing;
pub mod stats;

pub use error::{Error, Result};
pub use listing::{Listing, ListingId, QualityTier};
