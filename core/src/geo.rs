//! Great-circle distance and nearest-neighbour search.

use crate::types::Vehicle;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Distance in metres between two points, by the spherical law of cosines.
///
/// The cosine is clamped to [-1, 1]: rounding can push it just past 1 for
/// identical points (or past -1 for antipodes), where `acos` returns NaN.
pub fn great_circle_distance(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos();
    cosine.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_METERS
}

/// The candidate closest to `reference`.
///
/// Candidates fully equal to `reference` are skipped. Ties go to the first
/// candidate in slice order. Returns `None` when nothing is left.
pub fn nearest<'a>(reference: &Vehicle, candidates: &'a [Vehicle]) -> Option<&'a Vehicle> {
    let origin = reference.coordinates();
    candidates
        .iter()
        .filter(|candidate| *candidate != reference)
        .map(|candidate| (great_circle_distance(origin, candidate.coordinates()), candidate))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| candidate)
}
