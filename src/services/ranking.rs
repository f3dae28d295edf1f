// src/services/ranking.rs
// DOCUMENTATION: Proximity ranking of the results list
// PURPOSE: Order locations by driving distance, falling back to great-circle distance

use std::cmp::Ordering;

use crate::models::{LatLng, Location, SearchLocation};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters
/// Uses Haversine formula
pub fn haversine_meters(from: LatLng, to: LatLng) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_METERS * 2.0 * a.sqrt().asin()
}

/// Distance used for sorting
/// DOCUMENTATION: Prefers the distance-matrix value, else straight-line distance
pub fn effective_distance(location: &Location, origin: LatLng) -> f64 {
    match location.travel_distance_value {
        Some(meters) => meters as f64,
        None => haversine_meters(origin, location.coords),
    }
}

/// Display order of the location list
/// DOCUMENTATION: Returns `(original index, location)` pairs. Without a search
/// location the source order is kept; otherwise the list is sorted ascending by
/// effective distance. The sort is stable, so ties keep source order.
pub fn rank<'a>(
    locations: &'a [Location],
    search: Option<&SearchLocation>,
) -> Vec<(usize, &'a Location)> {
    let mut ranked: Vec<(usize, &Location)> = locations.iter().enumerate().collect();

    if let Some(search) = search {
        let origin = search.location;
        let mut keyed: Vec<(f64, (usize, &Location))> = ranked
            .into_iter()
            .map(|entry| (effective_distance(entry.1, origin), entry))
            .collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        ranked = keyed.into_iter().map(|(_, entry)| entry).collect();
    }

    ranked
}
