//! Great-circle distance between geographic points.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two (latitude, longitude)
/// pairs given in degrees.
///
/// Pure function. NaN or out-of-range inputs propagate as NaN output;
/// callers are expected to guard against missing coordinates before calling.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
