// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod autocomplete;
pub mod health;
pub mod sessions;

pub use autocomplete::config as autocomplete_config;
pub use health::config as health_config;
pub use sessions::config as sessions_config;
