//! Point-sequence conversion.
//!
//! Reduces a dense path to a bounded number of distance-spaced samples
//! (the elevation API caps how many locations one request may carry) and
//! maps per-sample values back onto every point of the original path.

use std::borrow::Cow;

use chrono::Duration;
use log::debug;

use crate::gpx::{GeoPoint, Track};
use crate::nav::{cumulative_distances_km, haversine_km, interpolate_along};

/// Resample `points` to at most roughly `max_count` points spaced evenly
/// by path distance.
///
/// Sequences that already fit are returned borrowed and untouched.
/// Otherwise the first point is kept and a new point is emitted every
/// `total_length / max_count` kilometers, so the result holds at most
/// `max_count + 1` points.
pub fn resample(points: &[GeoPoint], max_count: usize) -> Cow<'_, [GeoPoint]> {
    if points.len() <= max_count {
        return Cow::Borrowed(points);
    }
    let Some((first, rest)) = points.split_first() else {
        return Cow::Borrowed(points);
    };

    let total_km = cumulative_distances_km(points).last().copied().unwrap_or(0.0);
    if total_km <= 0.0 || !total_km.is_finite() {
        // Every point coincides, one of them describes the whole path.
        return Cow::Owned(vec![*first]);
    }
    let spacing_km = total_km / max_count as f64;

    let (_, _, resampled) = rest.iter().fold(
        (0.0, *first, vec![*first]),
        |(since_last, last, mut out), next| {
            let segment_km = haversine_km(&last, next);
            let since_last = since_last + segment_km;
            if since_last >= spacing_km {
                let leftover = since_last - spacing_km;
                let emitted = interpolate_along(&last, next, (segment_km - leftover).max(0.0));
                out.push(emitted);
                (0.0, emitted, out)
            } else {
                (since_last, *next, out)
            }
        },
    );

    debug!("resampled {} points to {}", points.len(), resampled.len());
    Cow::Owned(resampled)
}

/// Expand per-sample elevations back onto the original points.
///
/// Walks the samples with a cursor that only moves forward: each
/// original point takes the elevation of whichever of the current and
/// next sample is nearer, advancing on ties. Points past the last sample
/// reuse its elevation. Samples must follow the original path order.
///
/// Always returns one elevation per original point; without any samples
/// every point gets 0.
pub fn interpolate_elevations(
    original: &[GeoPoint],
    sampled: &[GeoPoint],
    elevations: &[f64],
) -> Vec<f64> {
    if elevations.len() == original.len() {
        return elevations.to_vec();
    }
    let Some(last) = sampled.len().min(elevations.len()).checked_sub(1) else {
        return vec![0.0; original.len()];
    };

    original
        .iter()
        .scan(0usize, |cursor, point| {
            if *cursor < last {
                let current = haversine_km(point, &sampled[*cursor]);
                let next = haversine_km(point, &sampled[*cursor + 1]);
                if next <= current {
                    *cursor += 1;
                }
            }
            Some(elevations[*cursor])
        })
        .collect()
}

/// An original path together with its reduced sampling.
#[derive(Debug, Clone)]
pub struct ResampledSet<'a> {
    original: &'a [GeoPoint],
    reduced: Cow<'a, [GeoPoint]>,
}

impl<'a> ResampledSet<'a> {
    pub fn new(original: &'a [GeoPoint], max_count: usize) -> Self {
        Self {
            original,
            reduced: resample(original, max_count),
        }
    }

    pub fn original(&self) -> &[GeoPoint] {
        self.original
    }

    pub fn reduced(&self) -> &[GeoPoint] {
        &self.reduced
    }

    /// True when the original already fit and was not reduced.
    pub fn is_identity(&self) -> bool {
        matches!(self.reduced, Cow::Borrowed(_))
    }

    /// Map elevations aligned with `reduced()` onto `original()`.
    pub fn expand(&self, elevations: &[f64]) -> Vec<f64> {
        interpolate_elevations(self.original, &self.reduced, elevations)
    }
}

/// Copy of `track` with every timestamp shifted by `offset`.
///
/// Points without a timestamp stay without one; a shift that would
/// overflow the calendar leaves that timestamp unchanged.
pub fn offset_times(track: &Track, offset: Duration) -> Track {
    let points = track
        .points
        .iter()
        .map(|point| {
            let mut shifted = point.clone();
            shifted.time = point
                .time
                .map(|t| t.checked_add_signed(offset).unwrap_or(t));
            shifted
        })
        .collect();

    Track {
        name: track.name.clone(),
        points,
    }
}
