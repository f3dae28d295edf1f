// src/models/details.rs
// DOCUMENTATION: Details panel view model
// PURPOSE: Display-ready place details derived from the platform's raw fields

use serde::{Deserialize, Serialize};

use super::Location;

/// Consecutive days sharing the same hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Single day ("Wed") or range ("Mon - Fri")
    pub days: String,
    pub hours: String,
}

/// Five-unit star breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

/// Place details plus derived summaries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceDetailsView {
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    /// Hostname of `website`
    pub website_domain: Option<String>,
    /// Platform page for the place
    pub url: Option<String>,
    pub utc_offset_minutes: Option<i32>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub stars: Option<StarBreakdown>,
    pub price_level: Option<u8>,
    /// "$" repeated `price_level` times
    pub price_indicator: Option<String>,
    pub open_now: Option<bool>,
    pub opening_hours_summary: Option<Vec<DayHours>>,
}

/// Context for the details panel
#[derive(Debug, Clone, Serialize)]
pub struct DetailsView {
    pub index: usize,
    pub location: Location,
    /// Absent when the location has no place id, the capability is off
    /// or the lookup failed
    pub place: Option<PlaceDetailsView>,
}
