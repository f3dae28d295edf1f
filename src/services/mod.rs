// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod capabilities;
pub mod details_format;
pub mod google_maps_client;
pub mod locator;
pub mod lookup_cache;
pub mod map_view;
pub mod ranking;
pub mod session;
pub mod session_store;

pub use capabilities::*;
pub use google_maps_client::GoogleMapsClient;
pub use locator::Locator;
pub use session_store::{start_cleanup_task, SessionStore};
