// src/services/lookup_cache.rs
// DOCUMENTATION: Session-scoped lookup caches
// PURPOSE: Avoid repeat geocoding and directions calls within one visit

use std::collections::HashMap;

use crate::models::LatLng;

/// Unbounded key/value store holding the latest result per key
/// DOCUMENTATION: Lives as long as its session; nothing is evicted
#[derive(Debug)]
pub struct LookupCache<V> {
    name: &'static str,
    store: HashMap<String, V>,
}

impl<V: Clone> LookupCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            store: HashMap::new(),
        }
    }

    /// Key for a geocoding query: the exact (trimmed) query text
    pub fn geocode_key(query: &str) -> String {
        format!("geocode:{}", query)
    }

    /// Key for a route: origin point and destination index
    pub fn route_key(origin: LatLng, destination_index: usize) -> String {
        format!("route:{}:{}", origin.to_param(), destination_index)
    }

    /// Get cached value
    pub fn get(&self, key: &str) -> Option<V> {
        match self.store.get(key) {
            Some(value) => {
                log::debug!("{} cache HIT for key: {}", self.name, key);
                Some(value.clone())
            }
            None => {
                log::debug!("{} cache MISS for key: {}", self.name, key);
                None
            }
        }
    }

    /// Set cached value, replacing any previous result for the key
    pub fn set(&mut self, key: String, value: V) {
        log::debug!("{} cache SET for key: {}", self.name, key);
        self.store.insert(key, value);
    }
}
