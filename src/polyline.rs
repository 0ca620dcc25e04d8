//! Decoder for the encoded polyline format returned by the directions API.
//!
//! See [Google's polyline
//! algorithm](https://developers.google.com/maps/documentation/utilities/polylinealgorithm).
//! Each coordinate is a zig-zag encoded delta from the previous one, scaled
//! by 1e5 and split into 5-bit chunks offset by 63.

use crate::gpx::GeoPoint;

const PRECISION: f64 = 1e5;

/// Decode an encoded polyline. Returns `None` on malformed input.
pub fn decode(encoded: &str) -> Option<Vec<GeoPoint>> {
    let mut bytes = encoded.bytes().peekable();
    let mut points = Vec::new();
    let (mut lat, mut lon) = (0i64, 0i64);

    while bytes.peek().is_some() {
        lat += read_value(&mut bytes)?;
        lon += read_value(&mut bytes)?;
        points.push(GeoPoint::new(lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Some(points)
}

/// Reads one zig-zag encoded signed value.
fn read_value(bytes: &mut impl Iterator<Item = u8>) -> Option<i64> {
    let mut result = 0i64;
    let mut shift = 0;
    loop {
        let chunk = i64::from(bytes.next()?.checked_sub(63)?);
        if chunk > 0x3f || shift > 60 {
            return None;
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk & 0x20 == 0 {
            break;
        }
    }
    Some(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
