// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps Platform API key (overrides the payload's mapsApiKey)
    pub google_maps_api_key: String,

    /// Path of the JSON locator payload (locations, capabilities, map options)
    pub locator_config_path: String,

    /// Idle time after which a locator session is dropped
    pub session_ttl_seconds: u64,

    /// How often expired sessions are swept
    pub session_cleanup_interval_seconds: u64,

    /// Outbound requests per second allowed towards the mapping platform
    pub maps_requests_per_second: u32,

    /// Per-request timeout for the mapping platform
    pub http_timeout_seconds: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env_or("SERVER_PORT", 8003),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),

            locator_config_path: env::var("LOCATOR_CONFIG_PATH")
                .unwrap_or_else(|_| "locator.json".to_string()),

            session_ttl_seconds: env_or("SESSION_TTL_SECONDS", 1800),

            session_cleanup_interval_seconds: env_or("SESSION_CLEANUP_INTERVAL_SECONDS", 300),

            maps_requests_per_second: env_or("MAPS_REQUESTS_PER_SECOND", 10),

            http_timeout_seconds: env_or("HTTP_TIMEOUT_SECONDS", 10),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.locator_config_path.is_empty() {
            return Err("LOCATOR_CONFIG_PATH is required".to_string());
        }

        if self.maps_requests_per_second == 0 {
            return Err("MAPS_REQUESTS_PER_SECOND must be greater than zero".to_string());
        }

        if self.session_ttl_seconds == 0 {
            return Err("SESSION_TTL_SECONDS must be greater than zero".to_string());
        }

        if self.session_cleanup_interval_seconds == 0 {
            return Err("SESSION_CLEANUP_INTERVAL_SECONDS must be greater than zero".to_string());
        }

        Ok(())
    }
}
