// src/services/session.rs
// DOCUMENTATION: Per-visit locator state
// PURPOSE: One explicit state object per page visit, owned by the locator controller

use uuid::Uuid;

use crate::config::{Labels, MapOptions};
use crate::errors::LocatorError;
use crate::models::{
    GeocodeResult, LatLng, Location, MapBounds, MapView, Panel, ResultItem, ResultsView, Route,
    SearchLocation, TravelDistance,
};
use crate::services::lookup_cache::LookupCache;
use crate::services::{map_view, ranking};

/// Token captured when an outbound request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Generation counter for one family of requests
/// DOCUMENTATION: Starting a request (or invalidating) moves the generation
/// forward; a response may only be applied while its token is current.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn begin(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == token.0
    }
}

/// Locator session
#[derive(Debug)]
pub struct LocatorSession {
    pub id: Uuid,
    pub locations: Vec<Location>,
    pub search_location: Option<SearchLocation>,
    pub user_country: Option<String>,
    pub selected: Option<usize>,
    pub pan_to: Option<LatLng>,
    pub panel: Panel,
    pub active_route: Option<Route>,
    pub geocode_cache: LookupCache<GeocodeResult>,
    pub route_cache: LookupCache<Route>,
    /// Search requests: decides which geocode answer is applied
    pub searches: Generation,
    /// Applied search locations: decides which travel distances are applied
    pub annotations: Generation,
    pub directions: Generation,
}

impl LocatorSession {
    pub fn new(id: Uuid, locations: Vec<Location>) -> Self {
        Self {
            id,
            locations,
            search_location: None,
            user_country: None,
            selected: None,
            pan_to: None,
            panel: Panel::List,
            active_route: None,
            geocode_cache: LookupCache::new("geocode"),
            route_cache: LookupCache::new("directions"),
            searches: Generation::default(),
            annotations: Generation::default(),
            directions: Generation::default(),
        }
    }

    pub fn location(&self, index: usize) -> Result<&Location, LocatorError> {
        self.locations.get(index).ok_or_else(|| {
            LocatorError::InvalidInput(format!(
                "Location index {} out of range ({} locations)",
                index,
                self.locations.len()
            ))
        })
    }

    /// Replace the search location
    /// DOCUMENTATION: Travel annotations from the previous search no longer
    /// apply, and any displayed or pending route is dropped. Returns the token
    /// the travel distances for this search location must carry.
    pub fn apply_search_location(&mut self, search: SearchLocation) -> RequestToken {
        self.user_country = search.country().map(str::to_string);
        self.search_location = Some(search);
        for location in &mut self.locations {
            location.clear_travel_distance();
        }
        self.clear_directions();
        self.annotations.begin()
    }

    /// Forget the search location and cancel anything still in flight for it
    pub fn clear_search(&mut self) {
        self.search_location = None;
        self.user_country = None;
        self.searches.invalidate();
        self.annotations.invalidate();
        for location in &mut self.locations {
            location.clear_travel_distance();
        }
        self.clear_directions();
    }

    pub fn clear_directions(&mut self) {
        self.active_route = None;
        self.directions.invalidate();
    }

    /// Merge distance-matrix results (one per location, in order)
    pub fn apply_travel_distances(&mut self, distances: &[Option<TravelDistance>]) {
        for (index, location) in self.locations.iter_mut().enumerate() {
            location.annotate(distances.get(index).and_then(Option::as_ref));
        }
    }

    /// Select a location; a different selection drops the displayed route
    pub fn select(&mut self, index: usize, pan: bool) -> Result<(), LocatorError> {
        let coords = self.location(index)?.coords;
        if self.selected != Some(index) {
            self.clear_directions();
        }
        self.selected = Some(index);
        if pan {
            self.pan_to = Some(coords);
        }
        Ok(())
    }

    pub fn show_details(&mut self, index: usize) -> Result<(), LocatorError> {
        self.location(index)?;
        self.panel = Panel::Details(index);
        Ok(())
    }

    /// Back to the list; the selection is left alone
    pub fn back(&mut self) {
        self.panel = Panel::List;
    }

    /// Results list in display order
    pub fn results_view(&self, labels: &Labels) -> ResultsView {
        let search = self.search_location.as_ref();
        let items = ranking::rank(&self.locations, search)
            .into_iter()
            .map(|(index, location)| ResultItem {
                index,
                title: location.title.clone(),
                address1: location.address1.clone(),
                address2: location.address2.clone(),
                travel_distance_text: location.travel_distance_text.clone(),
                has_details: location.place_id.is_some(),
                selected: self.selected == Some(index),
            })
            .collect();

        ResultsView {
            section_name: labels.section_name(search.is_some(), self.locations.len()),
            items,
            show_directions_button: search.is_some(),
            selected_index: self.selected,
            panel: self.panel,
        }
    }

    pub fn bounds(&self) -> Option<MapBounds> {
        map_view::bounds(&self.locations, self.search_location.as_ref())
    }

    pub fn map_view(&self, options: &MapOptions) -> MapView {
        MapView {
            markers: map_view::markers(
                &self.locations,
                self.selected,
                self.search_location.as_ref(),
            ),
            bounds: self.bounds(),
            pan_to: self.pan_to,
            search_location: self.search_location.clone(),
            route: self.active_route.clone(),
            options: options.clone(),
        }
    }
}
