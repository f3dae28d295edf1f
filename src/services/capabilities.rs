// src/services/capabilities.rs
// DOCUMENTATION: Capability interfaces over the mapping platform
// PURPOSE: Let the locator compose only the features the payload enables,
// and let tests substitute an in-memory platform

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Capabilities;
use crate::errors::LocatorError;
use crate::models::{
    AutocompletePrediction, GeocodeResult, LatLng, MapBounds, PlaceDetails, Route,
    TravelDistance, UnitSystem,
};

/// Free-text address resolution
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for `query`, biased towards `bounds`; `None` when nothing matched
    async fn geocode(
        &self,
        query: &str,
        bounds: Option<MapBounds>,
    ) -> Result<Option<GeocodeResult>, LocatorError>;
}

/// Batched driving distances from one origin
#[async_trait]
pub trait DistanceMatrix: Send + Sync {
    /// One entry per destination, in order; `None` where the element had no route
    async fn travel_distances(
        &self,
        origin: LatLng,
        destinations: &[LatLng],
        units: UnitSystem,
    ) -> Result<Vec<Option<TravelDistance>>, LocatorError>;
}

/// Driving routes
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn route(&self, origin: LatLng, destination: LatLng) -> Result<Route, LocatorError>;
}

/// Extended place metadata
#[async_trait]
pub trait PlaceDetailsProvider: Send + Sync {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, LocatorError>;
}

/// Address predictions while typing
#[async_trait]
pub trait AddressAutocomplete: Send + Sync {
    async fn predictions(
        &self,
        input: &str,
        bounds: Option<MapBounds>,
    ) -> Result<Vec<AutocompletePrediction>, LocatorError>;

    /// Resolve a chosen prediction to an address and point
    async fn resolve(&self, place_id: &str) -> Result<GeocodeResult, LocatorError>;
}

/// The capabilities a locator was built with
/// DOCUMENTATION: A disabled capability is simply absent
#[derive(Clone, Default)]
pub struct CapabilitySet {
    pub geocoder: Option<Arc<dyn Geocoder>>,
    pub distance_matrix: Option<Arc<dyn DistanceMatrix>>,
    pub directions: Option<Arc<dyn DirectionsProvider>>,
    pub details: Option<Arc<dyn PlaceDetailsProvider>>,
    pub autocomplete: Option<Arc<dyn AddressAutocomplete>>,
}

impl CapabilitySet {
    /// Compose a set from one platform client according to the payload's switches
    pub fn from_platform<P>(enabled: &Capabilities, platform: Arc<P>) -> Self
    where
        P: Geocoder
            + DistanceMatrix
            + DirectionsProvider
            + PlaceDetailsProvider
            + AddressAutocomplete
            + 'static,
    {
        let mut set = CapabilitySet::default();
        if enabled.input {
            set.geocoder = Some(platform.clone());
        }
        if enabled.distance_matrix {
            set.distance_matrix = Some(platform.clone());
        }
        if enabled.directions {
            set.directions = Some(platform.clone());
        }
        if enabled.details {
            set.details = Some(platform.clone());
        }
        if enabled.autocomplete {
            set.autocomplete = Some(platform);
        }
        set
    }

    pub fn geocoder(&self) -> Result<&Arc<dyn Geocoder>, LocatorError> {
        self.geocoder
            .as_ref()
            .ok_or(LocatorError::CapabilityDisabled("input"))
    }

    pub fn directions(&self) -> Result<&Arc<dyn DirectionsProvider>, LocatorError> {
        self.directions
            .as_ref()
            .ok_or(LocatorError::CapabilityDisabled("directions"))
    }

    pub fn autocomplete(&self) -> Result<&Arc<dyn AddressAutocomplete>, LocatorError> {
        self.autocomplete
            .as_ref()
            .ok_or(LocatorError::CapabilityDisabled("autocomplete"))
    }

    /// Names of the enabled capabilities, for start-up logging
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.geocoder.is_some() {
            names.push("input");
        }
        if self.autocomplete.is_some() {
            names.push("autocomplete");
        }
        if self.distance_matrix.is_some() {
            names.push("distanceMatrix");
        }
        if self.directions.is_some() {
            names.push("directions");
        }
        if self.details.is_some() {
            names.push("details");
        }
        names
    }
}
