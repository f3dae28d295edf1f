// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Platform web services client
// PURPOSE: Geocoding, Distance Matrix, Directions, Place Details and Autocomplete over HTTPS

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::errors::LocatorError;
use crate::models::{
    AutocompletePrediction, GeocodeResult, LatLng, MapBounds, PlaceDetails, Route, RouteStep,
    TextValue, TravelDistance, UnitSystem,
};
use crate::services::capabilities::{
    AddressAutocomplete, DirectionsProvider, DistanceMatrix, Geocoder, PlaceDetailsProvider,
};

/// Destinations per Distance Matrix request allowed by the platform
const MAX_MATRIX_DESTINATIONS: usize = 25;

/// Fields requested for the details panel
const DETAILS_FIELDS: &str = "formatted_phone_number,website,opening_hours,url,utc_offset_minutes,price_level,rating,user_ratings_total";

/// Google Maps Platform client
/// DOCUMENTATION: Handles authentication, throttling and response status for every API
pub struct GoogleMapsClient {
    /// HTTP client for making requests
    client: Client,
    /// Maps Platform API key
    api_key: String,
    /// Base URL, e.g. https://maps.googleapis.com/maps/api
    base_url: String,
    /// Shared throttle for all outbound calls
    limiter: DefaultDirectRateLimiter,
}

#[derive(Debug, Deserialize)]
struct ApiLatLng {
    lat: f64,
    lng: f64,
}

impl From<ApiLatLng> for LatLng {
    fn from(value: ApiLatLng) -> Self {
        LatLng::new(value.lat, value.lng)
    }
}

#[derive(Debug, Deserialize)]
struct ApiGeometry {
    location: ApiLatLng,
}

#[derive(Debug, Deserialize)]
struct ApiGeocodeResult {
    formatted_address: String,
    geometry: ApiGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<ApiGeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    #[serde(default)]
    html_instructions: String,
    distance: TextValue,
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: TextValue,
    duration: TextValue,
    #[serde(default)]
    start_address: String,
    #[serde(default)]
    end_address: String,
    #[serde(default)]
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    legs: Vec<ApiLeg>,
    overview_polyline: Option<ApiPolyline>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse<T> {
    status: String,
    result: Option<T>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<AutocompletePrediction>,
    error_message: Option<String>,
}

/// Map a platform `status` field onto the error taxonomy
/// DOCUMENTATION: OK and ZERO_RESULTS are successful calls; empty results are
/// the caller's business
fn check_status(
    api: &str,
    status: &str,
    error_message: Option<String>,
) -> Result<(), LocatorError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => {
            log::error!("{} quota exceeded", api);
            Err(LocatorError::RateLimitExceeded)
        }
        "REQUEST_DENIED" | "INVALID_REQUEST" => {
            let msg = error_message.unwrap_or_else(|| format!("{} status: {}", api, status));
            log::error!("{} request denied: {}", api, msg);
            Err(LocatorError::ExternalApiError(msg))
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("{} status: {}", api, other));
            log::error!("{} unexpected status: {}", api, msg);
            Err(LocatorError::ExternalApiError(msg))
        }
    }
}

fn bounds_param(bounds: &MapBounds) -> String {
    format!(
        "{},{}|{},{}",
        bounds.south, bounds.west, bounds.north, bounds.east
    )
}

/// Per-destination distances from the single origin row
fn distances_from_matrix(
    response: DistanceMatrixResponse,
    expected: usize,
) -> Vec<Option<TravelDistance>> {
    let elements = response
        .rows
        .into_iter()
        .next()
        .map(|row| row.elements)
        .unwrap_or_default();

    let mut distances: Vec<Option<TravelDistance>> = elements
        .into_iter()
        .map(|element| match (element.status.as_str(), element.distance) {
            ("OK", Some(distance)) => Some(TravelDistance {
                text: distance.text,
                value: distance.value,
            }),
            _ => None,
        })
        .collect();

    if distances.len() != expected {
        log::warn!(
            "Distance matrix returned {} elements for {} destinations",
            distances.len(),
            expected
        );
    }
    distances.resize(expected, None);
    distances
}

/// First route, single leg (no waypoints are ever requested)
fn route_from_response(response: DirectionsResponse) -> Option<Route> {
    let api_route = response.routes.into_iter().next()?;
    let leg = api_route.legs.into_iter().next()?;

    Some(Route {
        summary: api_route.summary,
        start_address: leg.start_address,
        end_address: leg.end_address,
        distance: leg.distance,
        duration: leg.duration,
        steps: leg
            .steps
            .into_iter()
            .map(|step| RouteStep {
                instructions: step.html_instructions,
                distance: step.distance,
                duration: step.duration,
            })
            .collect(),
        overview_polyline: api_route
            .overview_polyline
            .map(|p| p.points)
            .unwrap_or_default(),
    })
}

impl GoogleMapsClient {
    /// Create new Google Maps Platform client
    /// DOCUMENTATION: Initializes client with API key, throttle and request timeout
    pub fn new(
        api_key: String,
        requests_per_second: u32,
        timeout: Duration,
    ) -> Result<Self, LocatorError> {
        let rate = NonZeroU32::new(requests_per_second).ok_or_else(|| {
            LocatorError::ConfigError("requests per second must be greater than zero".to_string())
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocatorError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        })
    }

    /// Throttled GET returning the parsed JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        api: &str,
        path: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<T, LocatorError> {
        let url = format!("{}/{}", self.base_url, path);
        params.push(("key", self.api_key.clone()));

        self.limiter.until_ready().await;

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} request failed: {}", api, e);
                LocatorError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("{} error {}: {}", api, status, body);
            return Err(LocatorError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse {} response: {}", api, e);
            LocatorError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(
        &self,
        query: &str,
        bounds: Option<MapBounds>,
    ) -> Result<Option<GeocodeResult>, LocatorError> {
        let mut params = vec![("address", query.to_string())];
        if let Some(bounds) = bounds {
            params.push(("bounds", bounds_param(&bounds)));
        }

        log::debug!("Geocoding query: {}", query);

        let response: GeocodeResponse = self.get_json("Geocoding", "geocode/json", params).await?;
        check_status("Geocoding", &response.status, response.error_message)?;

        log::info!("Geocoding returned {} results", response.results.len());

        Ok(response.results.into_iter().next().map(|r| GeocodeResult {
            formatted_address: r.formatted_address,
            location: r.geometry.location.into(),
        }))
    }
}

#[async_trait]
impl DistanceMatrix for GoogleMapsClient {
    async fn travel_distances(
        &self,
        origin: LatLng,
        destinations: &[LatLng],
        units: UnitSystem,
    ) -> Result<Vec<Option<TravelDistance>>, LocatorError> {
        let mut distances = Vec::with_capacity(destinations.len());

        // The platform caps destinations per request; chunks keep destination order
        for chunk in destinations.chunks(MAX_MATRIX_DESTINATIONS) {
            let params = vec![
                ("origins", origin.to_param()),
                (
                    "destinations",
                    chunk
                        .iter()
                        .map(LatLng::to_param)
                        .collect::<Vec<_>>()
                        .join("|"),
                ),
                ("mode", "driving".to_string()),
                ("units", units.as_param().to_string()),
            ];

            log::debug!(
                "Distance matrix from {} to {} destinations",
                origin.to_param(),
                chunk.len()
            );

            let response: DistanceMatrixResponse = self
                .get_json("Distance Matrix", "distancematrix/json", params)
                .await?;
            check_status(
                "Distance Matrix",
                &response.status,
                response.error_message.clone(),
            )?;

            distances.extend(distances_from_matrix(response, chunk.len()));
        }

        Ok(distances)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMapsClient {
    async fn route(&self, origin: LatLng, destination: LatLng) -> Result<Route, LocatorError> {
        let params = vec![
            ("origin", origin.to_param()),
            ("destination", destination.to_param()),
            ("mode", "driving".to_string()),
        ];

        log::debug!(
            "Directions from {} to {}",
            origin.to_param(),
            destination.to_param()
        );

        let response: DirectionsResponse =
            self.get_json("Directions", "directions/json", params).await?;
        check_status("Directions", &response.status, response.error_message.clone())?;

        route_from_response(response)
            .ok_or_else(|| LocatorError::ExternalApiError("No route found".to_string()))
    }
}

#[async_trait]
impl PlaceDetailsProvider for GoogleMapsClient {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, LocatorError> {
        let params = vec![
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
        ];

        log::debug!("Place details lookup: place_id={}", place_id);

        let response: DetailsResponse<PlaceDetails> = self
            .get_json("Place Details", "place/details/json", params)
            .await?;

        if response.status != "OK" {
            check_status("Place Details", &response.status, response.error_message)?;
        }

        response.result.ok_or_else(|| {
            LocatorError::ExternalApiError(format!("Details status: {}", response.status))
        })
    }
}

#[async_trait]
impl AddressAutocomplete for GoogleMapsClient {
    async fn predictions(
        &self,
        input: &str,
        bounds: Option<MapBounds>,
    ) -> Result<Vec<AutocompletePrediction>, LocatorError> {
        let mut params = vec![
            ("input", input.to_string()),
            ("types", "geocode".to_string()),
        ];
        if let Some(bounds) = bounds {
            params.push(("locationbias", format!("rectangle:{}", bounds_param(&bounds))));
        }

        let response: AutocompleteResponse = self
            .get_json("Place Autocomplete", "place/autocomplete/json", params)
            .await?;
        check_status("Place Autocomplete", &response.status, response.error_message)?;

        Ok(response.predictions)
    }

    async fn resolve(&self, place_id: &str) -> Result<GeocodeResult, LocatorError> {
        #[derive(Deserialize)]
        struct ResolvedPlace {
            formatted_address: String,
            geometry: ApiGeometry,
        }

        let params = vec![
            ("place_id", place_id.to_string()),
            ("fields", "formatted_address,geometry".to_string()),
        ];

        let response: DetailsResponse<ResolvedPlace> = self
            .get_json("Place Details", "place/details/json", params)
            .await?;
        check_status("Place Details", &response.status, response.error_message)?;

        response
            .result
            .map(|place| GeocodeResult {
                formatted_address: place.formatted_address,
                location: place.geometry.location.into(),
            })
            .ok_or_else(|| LocatorError::AddressNotFound(place_id.to_string()))
    }
}
