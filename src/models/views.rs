// src/models/views.rs
// DOCUMENTATION: View models returned to the page
// PURPOSE: Everything the page needs to render the list panel and the map

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LatLng, Route, SearchLocation};
use crate::config::MapOptions;

/// Which side panel is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Panel {
    #[default]
    List,
    Details(usize),
}

/// One row of the results list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    /// Position in the configured location list
    pub index: usize,
    pub title: String,
    pub address1: String,
    pub address2: String,
    pub travel_distance_text: Option<String>,
    pub has_details: bool,
    pub selected: bool,
}

/// The list panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub section_name: String,
    pub items: Vec<ResultItem>,
    /// Directions are only offered once the visitor has searched
    pub show_directions_button: bool,
    pub selected_index: Option<usize>,
    pub panel: Panel,
}

/// Rectangle the map should fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Marker layer, viewport and active route
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub markers: FeatureCollection,
    pub bounds: Option<MapBounds>,
    /// Set when the current selection asked the map to pan
    pub pan_to: Option<LatLng>,
    pub search_location: Option<SearchLocation>,
    pub route: Option<Route>,
    pub options: MapOptions,
}

/// Response for POST /sessions
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub results: ResultsView,
    pub map: MapView,
}
