//! Great-circle computations.
//!
//! Platform-agnostic distance and bearing math on a spherical earth.
//! All coordinates use WGS84 (lat/lon in degrees) and all distances
//! are in kilometers.

use crate::gpx::GeoPoint;

/// Earth radius in kilometers (WGS84 mean).
const EARTH_RADIUS_KM: f64 = 6_371.0088;

/// Haversine distance between two points in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Initial bearing from point A to point B in degrees [0, 360).
pub fn bearing(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}

/// Point reached by travelling `distance_km` from `origin` along the
/// great circle with the given initial bearing.
pub fn destination(origin: &GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint {
        lat: lat2.to_degrees(),
        lon: lon2.to_degrees(),
    }
}

/// Point `distance_km` along the segment from `a` to `b`.
///
/// Clamps to `a` for non-positive distances and to `b` once the
/// distance reaches the segment length.
pub fn interpolate_along(a: &GeoPoint, b: &GeoPoint, distance_km: f64) -> GeoPoint {
    if distance_km <= 0.0 {
        return *a;
    }
    if distance_km >= haversine_km(a, b) {
        return *b;
    }
    destination(a, bearing(a, b), distance_km)
}

/// Running distance from the first point to each point, starting at 0.
pub fn cumulative_distances_km(points: &[GeoPoint]) -> Vec<f64> {
    let mut total = 0.0;
    let mut distances = Vec::with_capacity(points.len());
    if !points.is_empty() {
        distances.push(0.0);
    }
    for w in points.windows(2) {
        total += haversine_km(&w[0], &w[1]);
        distances.push(total);
    }
    distances
}

/// Total length of a path in kilometers.
pub fn track_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_km(&w[0], &w[1]))
        .sum()
}
