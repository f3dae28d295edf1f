// src/models/location.rs
// DOCUMENTATION: Core data structures for business locations
// PURPOSE: Locations as injected by the configuration payload and annotated per session

use geo_types::Point;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic coordinate in degrees
/// DOCUMENTATION: Same shape as the mapping platform's `{lat, lng}` literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct LatLng {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Stable textual form used in cache keys and request parameters
    pub fn to_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl From<LatLng> for Point<f64> {
    fn from(value: LatLng) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(value: Point<f64>) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

/// Driving distance returned by the distance matrix for one destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelDistance {
    /// Human readable text in the requested unit system (e.g., "12.3 km")
    pub text: String,
    /// Distance in meters
    pub value: u64,
}

/// A business location
/// DOCUMENTATION: Created once per session from the configuration payload,
/// annotated with travel distances as distance-matrix results arrive.
/// Never removed from the session's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Display title (required)
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// First address line
    #[serde(default)]
    pub address1: String,

    /// Second address line
    #[serde(default)]
    pub address2: String,

    /// Marker position
    #[validate]
    pub coords: LatLng,

    /// Mapping platform place identifier (enables the details panel)
    #[serde(default)]
    pub place_id: Option<String>,

    /// Travel distance text from the latest distance matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_distance_text: Option<String>,

    /// Travel distance in meters from the latest distance matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_distance_value: Option<u64>,
}

impl Location {
    /// Apply (or clear) a distance-matrix result
    pub fn annotate(&mut self, distance: Option<&TravelDistance>) {
        self.travel_distance_text = distance.map(|d| d.text.clone());
        self.travel_distance_value = distance.map(|d| d.value);
    }

    pub fn clear_travel_distance(&mut self) {
        self.annotate(None);
    }
}

/// The visitor's searched location
/// DOCUMENTATION: Replaced wholesale on every successful search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    /// Formatted address as returned by the platform
    pub address: String,
    /// Geocoded point
    pub location: LatLng,
}

impl SearchLocation {
    /// Country of the searched address: the last word of the formatted address
    pub fn country(&self) -> Option<&str> {
        self.address.split_whitespace().last()
    }
}
