// src/services/locator.rs
// DOCUMENTATION: Locator controller
// PURPOSE: Runs every locator operation against one session, talking to the
// mapping platform without holding the session lock across outbound calls

use std::sync::Arc;
use uuid::Uuid;

use crate::config::LocatorConfiguration;
use crate::errors::LocatorError;
use crate::models::{
    AutocompletePrediction, DetailsView, GeocodeResult, MapView, ResultsView, Route,
    SearchInput, SearchLocation, SessionCreated, Suggestion, UnitSystem,
};
use crate::services::capabilities::CapabilitySet;
use crate::services::details_format::build_details_view;
use crate::services::lookup_cache::LookupCache;
use crate::services::map_view;
use crate::services::session::{LocatorSession, RequestToken};
use crate::services::session_store::{SessionStore, SharedSession};

pub struct Locator {
    configuration: Arc<LocatorConfiguration>,
    capabilities: CapabilitySet,
    sessions: Arc<SessionStore>,
}

impl Locator {
    pub fn new(
        configuration: Arc<LocatorConfiguration>,
        capabilities: CapabilitySet,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            configuration,
            capabilities,
            sessions,
        }
    }

    pub fn configuration(&self) -> &LocatorConfiguration {
        &self.configuration
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    async fn session(&self, id: Uuid) -> Result<SharedSession, LocatorError> {
        self.sessions
            .get(&id)
            .await
            .ok_or(LocatorError::SessionNotFound(id))
    }

    /// Start a visit with the configured locations in source order
    pub async fn create_session(&self) -> SessionCreated {
        let id = Uuid::new_v4();
        let session = LocatorSession::new(id, self.configuration.locations.clone());
        let results = session.results_view(&self.configuration.labels);
        let map = session.map_view(&self.configuration.map_options);
        self.sessions.insert(session).await;

        log::info!(
            "Session {} created with {} locations",
            id,
            self.configuration.locations.len()
        );

        SessionCreated {
            session_id: id,
            results,
            map,
        }
    }

    pub async fn end_session(&self, id: Uuid) -> Result<(), LocatorError> {
        if self.sessions.remove(&id).await {
            log::info!("Session {} ended", id);
            Ok(())
        } else {
            Err(LocatorError::SessionNotFound(id))
        }
    }

    pub async fn results(&self, id: Uuid) -> Result<ResultsView, LocatorError> {
        let handle = self.session(id).await?;
        let session = handle.lock().await;
        Ok(session.results_view(&self.configuration.labels))
    }

    pub async fn map(&self, id: Uuid) -> Result<MapView, LocatorError> {
        let handle = self.session(id).await?;
        let session = handle.lock().await;
        Ok(session.map_view(&self.configuration.map_options))
    }

    /// Search for the visitor's address
    /// DOCUMENTATION: Text is geocoded (session cache first), a resolved
    /// suggestion is used as is. The result becomes the search location only
    /// if no newer search started meanwhile, then travel distances follow.
    pub async fn search(&self, id: Uuid, input: SearchInput) -> Result<ResultsView, LocatorError> {
        let handle = self.session(id).await?;

        let (search, token) = match input {
            SearchInput::Resolved { address, location } => {
                if self.capabilities.geocoder.is_none() && self.capabilities.autocomplete.is_none() {
                    return Err(LocatorError::CapabilityDisabled("input"));
                }
                let token = handle.lock().await.searches.begin();
                (SearchLocation { address, location }, token)
            }
            SearchInput::Text(query) => {
                let geocoder = self.capabilities.geocoder()?.clone();
                if query.is_empty() {
                    return self.results(id).await;
                }

                let key = LookupCache::<GeocodeResult>::geocode_key(&query);
                let (cached, token, bounds) = {
                    let mut session = handle.lock().await;
                    let cached = session.geocode_cache.get(&key);
                    (cached, session.searches.begin(), session.bounds())
                };

                let result = match cached {
                    Some(result) => result,
                    None => {
                        log::debug!("Geocoding '{}' for session {}", query, id);
                        let found = geocoder
                            .geocode(&query, bounds)
                            .await?
                            .ok_or_else(|| LocatorError::AddressNotFound(query.clone()))?;
                        handle.lock().await.geocode_cache.set(key, found.clone());
                        found
                    }
                };

                (
                    SearchLocation {
                        address: result.formatted_address,
                        location: result.location,
                    },
                    token,
                )
            }
        };

        let annotations = {
            let mut session = handle.lock().await;
            if !session.searches.is_current(token) {
                log::debug!("Discarding superseded search result for session {}", id);
                return Ok(session.results_view(&self.configuration.labels));
            }
            log::info!("Session {} searching near '{}'", id, search.address);
            session.apply_search_location(search)
        };

        self.update_travel_times(&handle, annotations).await;

        let session = handle.lock().await;
        Ok(session.results_view(&self.configuration.labels))
    }

    /// Annotate locations with driving distances from the search location
    /// DOCUMENTATION: Failures are logged and the list keeps its
    /// straight-line ranking.
    async fn update_travel_times(&self, handle: &SharedSession, token: RequestToken) {
        let Some(matrix) = self.capabilities.distance_matrix.clone() else {
            return;
        };

        let (origin, destinations, units) = {
            let session = handle.lock().await;
            let Some(search) = session.search_location.as_ref() else {
                return;
            };
            let destinations: Vec<_> = session.locations.iter().map(|l| l.coords).collect();
            (
                search.location,
                destinations,
                UnitSystem::for_country(session.user_country.as_deref()),
            )
        };

        if destinations.is_empty() {
            return;
        }

        match matrix.travel_distances(origin, &destinations, units).await {
            Ok(distances) => {
                let mut session = handle.lock().await;
                if session.annotations.is_current(token) {
                    session.apply_travel_distances(&distances);
                } else {
                    log::debug!("Discarding superseded travel distances for session {}", session.id);
                }
            }
            Err(e) => log::warn!("Distance matrix failed: {}", e),
        }
    }

    pub async fn clear_search(&self, id: Uuid) -> Result<ResultsView, LocatorError> {
        let handle = self.session(id).await?;
        let mut session = handle.lock().await;
        session.clear_search();
        Ok(session.results_view(&self.configuration.labels))
    }

    pub async fn select(&self, id: Uuid, index: usize, pan: bool) -> Result<ResultsView, LocatorError> {
        let handle = self.session(id).await?;
        let mut session = handle.lock().await;
        session.select(index, pan)?;
        Ok(session.results_view(&self.configuration.labels))
    }

    /// Driving route from the search location to a location
    /// DOCUMENTATION: Selects the destination first; routes are cached per
    /// (origin, destination index). A route that arrives after the selection
    /// changed is cached but not displayed.
    pub async fn directions(&self, id: Uuid, index: usize) -> Result<Route, LocatorError> {
        let provider = self.capabilities.directions()?.clone();
        let handle = self.session(id).await?;

        let (origin, destination, key, token) = {
            let mut session = handle.lock().await;
            let destination = session.location(index)?.coords;
            let origin = session
                .search_location
                .as_ref()
                .map(|s| s.location)
                .ok_or_else(|| {
                    LocatorError::InvalidInput(
                        "Search for an address before asking for directions".to_string(),
                    )
                })?;
            session.select(index, false)?;

            let key = LookupCache::<Route>::route_key(origin, index);
            if let Some(route) = session.route_cache.get(&key) {
                session.active_route = Some(route.clone());
                return Ok(route);
            }
            (origin, destination, key, session.directions.begin())
        };

        let route = provider.route(origin, destination).await?;

        let mut session = handle.lock().await;
        session.route_cache.set(key, route.clone());
        if session.directions.is_current(token) {
            session.active_route = Some(route.clone());
        } else {
            log::debug!("Discarding superseded route for session {}", id);
        }
        Ok(route)
    }

    /// Open the details panel for a location
    /// DOCUMENTATION: The panel switches before the lookup; lookup failures
    /// are logged and the panel renders without place data.
    pub async fn show_details(&self, id: Uuid, index: usize) -> Result<DetailsView, LocatorError> {
        let handle = self.session(id).await?;
        let location = {
            let mut session = handle.lock().await;
            session.show_details(index)?;
            session.location(index)?.clone()
        };

        let place = match (&self.capabilities.details, location.place_id.as_deref()) {
            (Some(provider), Some(place_id)) => match provider.place_details(place_id).await {
                Ok(details) => Some(build_details_view(details)),
                Err(e) => {
                    log::warn!("Place details for {} failed: {}", place_id, e);
                    None
                }
            },
            _ => None,
        };

        Ok(DetailsView {
            index,
            location,
            place,
        })
    }

    pub async fn back(&self, id: Uuid) -> Result<ResultsView, LocatorError> {
        let handle = self.session(id).await?;
        let mut session = handle.lock().await;
        session.back();
        Ok(session.results_view(&self.configuration.labels))
    }

    /// Address predictions biased to the area covering all locations
    pub async fn autocomplete(
        &self,
        input: &str,
    ) -> Result<Vec<AutocompletePrediction>, LocatorError> {
        let provider = self.capabilities.autocomplete()?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let bounds = map_view::bounds(&self.configuration.locations, None);
        provider.predictions(input, bounds).await
    }

    /// Resolve a chosen prediction into a suggestion the search accepts
    pub async fn resolve_prediction(&self, place_id: &str) -> Result<Suggestion, LocatorError> {
        let provider = self.capabilities.autocomplete()?;
        let result = provider.resolve(place_id).await?;
        Ok(Suggestion {
            name: None,
            formatted_address: Some(result.formatted_address),
            location: Some(result.location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capabilities;
    use crate::models::{LatLng, Location, Panel, PlaceDetails};
    use crate::services::capabilities::fakes::FakeMaps;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    const GDL: LatLng = LatLng { lat: 20.6597, lng: -103.3496 };
    const MANZANILLO: LatLng = LatLng { lat: 19.0522, lng: -104.3158 };

    fn location(title: &str, lat: f64, lng: f64, place_id: Option<&str>) -> Location {
        Location {
            title: title.to_string(),
            address1: String::new(),
            address2: String::new(),
            coords: LatLng::new(lat, lng),
            place_id: place_id.map(str::to_string),
            travel_distance_text: None,
            travel_distance_value: None,
        }
    }

    fn all_capabilities() -> Capabilities {
        Capabilities {
            input: true,
            autocomplete: true,
            directions: true,
            distance_matrix: true,
            details: true,
        }
    }

    fn locator_with(capabilities: Capabilities, maps: Arc<FakeMaps>) -> Arc<Locator> {
        let configuration = LocatorConfiguration {
            capabilities,
            locations: vec![
                location("Tepic", 21.50, -104.89, Some("tepic-place")),
                location("Colima", 19.23, -103.72, None),
                location("Mérida", 20.97, -89.62, None),
            ],
            ..LocatorConfiguration::default()
        };
        Arc::new(Locator::new(
            Arc::new(configuration),
            CapabilitySet::from_platform(&capabilities, maps),
            Arc::new(SessionStore::new(Duration::from_secs(60))),
        ))
    }

    fn fake_maps() -> FakeMaps {
        FakeMaps::default()
            .with_address("Guadalajara", "Guadalajara, Jal., México", GDL)
            .with_address("Manzanillo", "Manzanillo, Col., México", MANZANILLO)
            .with_distances(GDL, &[Some(210_000), Some(900_000), None])
    }

    fn titles(view: &ResultsView) -> Vec<&str> {
        view.items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_session_lists_source_order() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));
        let created = locator.create_session().await;

        assert_eq!(titles(&created.results), vec!["Tepic", "Colima", "Mérida"]);
        assert_eq!(created.results.section_name, "All locations (3)");
        assert_eq!(created.map.markers.features.len(), 3);
        assert_ok!(locator.results(created.session_id).await);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));
        let id = Uuid::new_v4();
        assert!(matches!(
            locator.results(id).await,
            Err(LocatorError::SessionNotFound(missing)) if missing == id
        ));
        assert_err!(locator.end_session(id).await);
    }

    #[tokio::test]
    async fn test_search_ranks_by_travel_distance() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let view = assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        // Colima is nearer in a straight line, but the road to Tepic is shorter
        assert_eq!(titles(&view), vec!["Tepic", "Colima", "Mérida"]);
        assert_eq!(view.section_name, "Nearest locations (3)");
        assert!(view.show_directions_button);
        assert_eq!(view.items[0].travel_distance_text.as_deref(), Some("210.0 km"));
        assert_eq!(view.items[2].travel_distance_text, None);
        assert_eq!(FakeMaps::calls(&maps.distance_calls), 1);
    }

    #[tokio::test]
    async fn test_repeated_query_geocodes_once() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        for _ in 0..3 {
            assert_ok!(
                locator
                    .search(id, SearchInput::Text("Guadalajara".to_string()))
                    .await
            );
        }
        assert_eq!(FakeMaps::calls(&maps.geocode_calls), 1);
    }

    #[tokio::test]
    async fn test_unknown_address_leaves_state_unchanged() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));
        let id = locator.create_session().await.session_id;
        assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        let result = locator
            .search(id, SearchInput::Text("Atlantis".to_string()))
            .await;
        assert!(matches!(result, Err(LocatorError::AddressNotFound(_))));

        let map = assert_ok!(locator.map(id).await);
        assert_eq!(
            map.search_location.map(|s| s.address).as_deref(),
            Some("Guadalajara, Jal., México")
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_ignored() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let view = assert_ok!(locator.search(id, SearchInput::Text(String::new())).await);
        assert!(!view.show_directions_button);
        assert_eq!(FakeMaps::calls(&maps.geocode_calls), 0);
    }

    #[tokio::test]
    async fn test_resolved_suggestion_skips_geocoding() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let view = assert_ok!(
            locator
                .search(
                    id,
                    SearchInput::Resolved {
                        address: "Manzanillo, Col., México".to_string(),
                        location: MANZANILLO,
                    },
                )
                .await
        );
        assert_eq!(view.items[0].title, "Colima");
        assert_eq!(FakeMaps::calls(&maps.geocode_calls), 0);
    }

    #[tokio::test]
    async fn test_stale_geocode_is_discarded() {
        let maps = Arc::new(fake_maps());
        let gate = maps.gate_geocode("Guadalajara");
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let slow = {
            let locator = locator.clone();
            tokio::spawn(async move {
                locator
                    .search(id, SearchInput::Text("Guadalajara".to_string()))
                    .await
            })
        };
        gate.entered.notified().await;

        assert_ok!(
            locator
                .search(id, SearchInput::Text("Manzanillo".to_string()))
                .await
        );
        gate.release.notify_one();
        assert_ok!(assert_ok!(slow.await));

        let map = assert_ok!(locator.map(id).await);
        assert_eq!(
            map.search_location.map(|s| s.address).as_deref(),
            Some("Manzanillo, Col., México")
        );
        // The late answer is still cached for the next time it is asked
        let handle = locator.session(id).await.unwrap();
        let key = LookupCache::<GeocodeResult>::geocode_key("Guadalajara");
        assert!(handle.lock().await.geocode_cache.get(&key).is_some());
    }

    #[tokio::test]
    async fn test_failed_search_keeps_pending_distances() {
        let maps = Arc::new(fake_maps());
        let gate = maps.gate_distances();
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let first = {
            let locator = locator.clone();
            tokio::spawn(async move {
                locator
                    .search(id, SearchInput::Text("Guadalajara".to_string()))
                    .await
            })
        };
        gate.entered.notified().await;

        assert!(matches!(
            locator
                .search(id, SearchInput::Text("Atlantis".to_string()))
                .await,
            Err(LocatorError::AddressNotFound(_))
        ));
        gate.release.notify_one();
        assert_ok!(assert_ok!(first.await));

        let view = assert_ok!(locator.results(id).await);
        assert_eq!(titles(&view), vec!["Tepic", "Colima", "Mérida"]);
        assert_eq!(view.items[0].travel_distance_text.as_deref(), Some("210.0 km"));
    }

    #[tokio::test]
    async fn test_stale_distances_after_newer_search() {
        let maps = Arc::new(fake_maps().with_distances(
            MANZANILLO,
            &[Some(300_000), Some(95_000), Some(1_500_000)],
        ));
        let gate = maps.gate_distances();
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let first = {
            let locator = locator.clone();
            tokio::spawn(async move {
                locator
                    .search(id, SearchInput::Text("Guadalajara".to_string()))
                    .await
            })
        };
        gate.entered.notified().await;

        assert_ok!(
            locator
                .search(id, SearchInput::Text("Manzanillo".to_string()))
                .await
        );
        gate.release.notify_one();
        assert_ok!(assert_ok!(first.await));

        let view = assert_ok!(locator.results(id).await);
        assert_eq!(titles(&view), vec!["Colima", "Tepic", "Mérida"]);
        assert_eq!(view.items[0].travel_distance_text.as_deref(), Some("95.0 km"));
        assert_eq!(view.items[1].travel_distance_text.as_deref(), Some("300.0 km"));
    }

    #[tokio::test]
    async fn test_stale_distances_after_clear_search() {
        let maps = Arc::new(fake_maps());
        let gate = maps.gate_distances();
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let first = {
            let locator = locator.clone();
            tokio::spawn(async move {
                locator
                    .search(id, SearchInput::Text("Guadalajara".to_string()))
                    .await
            })
        };
        gate.entered.notified().await;

        assert_ok!(locator.clear_search(id).await);
        gate.release.notify_one();
        assert_ok!(assert_ok!(first.await));

        let view = assert_ok!(locator.results(id).await);
        assert_eq!(titles(&view), vec!["Tepic", "Colima", "Mérida"]);
        assert!(view.items.iter().all(|i| i.travel_distance_text.is_none()));
        assert!(!view.show_directions_button);
    }

    #[tokio::test]
    async fn test_clear_search() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));
        let id = locator.create_session().await.session_id;
        assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        let view = assert_ok!(locator.clear_search(id).await);
        assert_eq!(titles(&view), vec!["Tepic", "Colima", "Mérida"]);
        assert!(view.items.iter().all(|i| i.travel_distance_text.is_none()));
        assert!(!view.show_directions_button);
    }

    #[tokio::test]
    async fn test_distance_matrix_failure_is_silent() {
        let maps = Arc::new(fake_maps());
        *maps.fail_distance_matrix.lock().unwrap() = true;
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        let view = assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );
        // Straight-line ranking
        assert_eq!(titles(&view), vec!["Colima", "Tepic", "Mérida"]);
    }

    #[tokio::test]
    async fn test_directions_cached_per_pair() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;
        assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        let first = assert_ok!(locator.directions(id, 1).await);
        let second = assert_ok!(locator.directions(id, 1).await);
        assert_eq!(first, second);
        assert_eq!(FakeMaps::calls(&maps.directions_calls), 1);

        let map = assert_ok!(locator.map(id).await);
        assert!(map.route.is_some());
        let view = assert_ok!(locator.results(id).await);
        assert_eq!(view.selected_index, Some(1));
    }

    #[tokio::test]
    async fn test_directions_need_search_location() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));
        let id = locator.create_session().await.session_id;
        assert!(matches!(
            locator.directions(id, 0).await,
            Err(LocatorError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_route_is_not_displayed() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;
        assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        let gate = maps.gate_directions();
        let slow = {
            let locator = locator.clone();
            tokio::spawn(async move { locator.directions(id, 0).await })
        };
        gate.entered.notified().await;

        assert_ok!(locator.select(id, 2, true).await);
        gate.release.notify_one();
        assert_ok!(assert_ok!(slow.await));

        let map = assert_ok!(locator.map(id).await);
        assert!(map.route.is_none());
        assert_eq!(map.pan_to, Some(LatLng::new(20.97, -89.62)));

        // Asking again is served from the cache and displayed
        assert_ok!(locator.directions(id, 0).await);
        assert_eq!(FakeMaps::calls(&maps.directions_calls), 1);
        assert!(assert_ok!(locator.map(id).await).route.is_some());
    }

    #[tokio::test]
    async fn test_directions_failure_keeps_state() {
        let maps = Arc::new(fake_maps());
        *maps.fail_directions.lock().unwrap() = true;
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;
        assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );

        assert!(matches!(
            locator.directions(id, 0).await,
            Err(LocatorError::ExternalApiError(_))
        ));
        assert!(assert_ok!(locator.map(id).await).route.is_none());
    }

    #[tokio::test]
    async fn test_details_then_back_keeps_selection() {
        let maps = Arc::new(fake_maps().with_details(
            "tepic-place",
            PlaceDetails {
                rating: Some(4.3),
                price_level: Some(2),
                ..PlaceDetails::default()
            },
        ));
        let locator = locator_with(all_capabilities(), maps);
        let id = locator.create_session().await.session_id;

        assert_ok!(locator.select(id, 0, false).await);
        let details = assert_ok!(locator.show_details(id, 0).await);
        let place = details.place.expect("place details");
        assert_eq!(place.price_indicator.as_deref(), Some("$$"));
        assert_eq!(place.stars.map(|s| (s.full, s.half, s.empty)), Some((4, 1, 0)));
        assert_eq!(
            assert_ok!(locator.results(id).await).panel,
            Panel::Details(0)
        );

        let view = assert_ok!(locator.back(id).await);
        assert_eq!(view.panel, Panel::List);
        assert_eq!(view.selected_index, Some(0));
    }

    #[tokio::test]
    async fn test_details_without_place_data() {
        let maps = Arc::new(fake_maps());
        let locator = locator_with(all_capabilities(), maps.clone());
        let id = locator.create_session().await.session_id;

        // No place id: no lookup at all
        let details = assert_ok!(locator.show_details(id, 1).await);
        assert!(details.place.is_none());
        assert_eq!(FakeMaps::calls(&maps.details_calls), 0);

        // Lookup failure: panel still opens
        let details = assert_ok!(locator.show_details(id, 0).await);
        assert!(details.place.is_none());
        assert_eq!(details.location.title, "Tepic");
    }

    #[tokio::test]
    async fn test_disabled_capabilities() {
        let capabilities = Capabilities {
            input: true,
            ..Capabilities::default()
        };
        let maps = Arc::new(fake_maps());
        let locator = locator_with(capabilities, maps.clone());
        let id = locator.create_session().await.session_id;

        let view = assert_ok!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await
        );
        // No distance matrix: straight-line ranking, no annotations
        assert_eq!(titles(&view), vec!["Colima", "Tepic", "Mérida"]);
        assert_eq!(FakeMaps::calls(&maps.distance_calls), 0);

        assert!(matches!(
            locator.directions(id, 0).await,
            Err(LocatorError::CapabilityDisabled("directions"))
        ));
        assert!(matches!(
            locator.autocomplete("Guad").await,
            Err(LocatorError::CapabilityDisabled("autocomplete"))
        ));

        let details = assert_ok!(locator.show_details(id, 0).await);
        assert!(details.place.is_none());
    }

    #[tokio::test]
    async fn test_search_disabled_without_input() {
        let locator = locator_with(Capabilities::default(), Arc::new(fake_maps()));
        let id = locator.create_session().await.session_id;
        assert!(matches!(
            locator
                .search(id, SearchInput::Text("Guadalajara".to_string()))
                .await,
            Err(LocatorError::CapabilityDisabled("input"))
        ));
    }

    #[tokio::test]
    async fn test_autocomplete_and_resolve() {
        let locator = locator_with(all_capabilities(), Arc::new(fake_maps()));

        let predictions = assert_ok!(locator.autocomplete("Manz").await);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].description, "Manzanillo, Col., México");

        let suggestion = assert_ok!(locator.resolve_prediction(&predictions[0].place_id).await);
        assert_eq!(suggestion.location, Some(MANZANILLO));
        assert!(assert_ok!(locator.autocomplete("   ").await).is_empty());
    }
}
