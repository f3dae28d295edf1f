// src/models/maps.rs
// DOCUMENTATION: Data exchanged with the mapping platform capabilities
// PURPOSE: Platform-neutral shapes for geocoding, routing, place details and autocomplete

use serde::{Deserialize, Serialize};

use super::LatLng;

/// First geocoding match for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub location: LatLng,
}

/// Unit system for distance text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Imperial for visitors searching from the USA, metric everywhere else
    pub fn for_country(country: Option<&str>) -> Self {
        match country {
            Some("USA") => UnitSystem::Imperial,
            _ => UnitSystem::Metric,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

/// Text/value pair as reported by the platform (meters or seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

/// One maneuver of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Instruction markup as provided by the platform
    pub instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

/// A driving route between the search point and a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub summary: String,
    pub start_address: String,
    pub end_address: String,
    pub distance: TextValue,
    pub duration: TextValue,
    pub steps: Vec<RouteStep>,
    /// Encoded polyline for the renderer
    pub overview_polyline: String,
}

/// Opening hours section of place details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    /// One entry per weekday, e.g. "Monday: 9:00 AM – 5:00 PM"
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// Extended metadata for a place
/// DOCUMENTATION: Exactly the fields the details panel requests
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

/// Address prediction offered while the visitor types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompletePrediction {
    pub description: String,
    pub place_id: String,
}
