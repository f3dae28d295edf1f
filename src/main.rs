// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, locator payload, mapping client and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{Config, LocatorConfiguration};
use dotenv::dotenv;
use services::{start_cleanup_task, CapabilitySet, GoogleMapsClient, Locator, SessionStore};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    let config_error = config.validate().err();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Some(e) = config_error {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting store-locator service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Load the locator payload
    let configuration = match LocatorConfiguration::load(&config.locator_config_path) {
        Ok(configuration) => Arc::new(configuration),
        Err(e) => {
            log::error!("Failed to load locator payload: {:#}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} locations from {}",
        configuration.locations.len(),
        config.locator_config_path
    );

    // 5. Mapping platform client and enabled capabilities
    let api_key = if !config.google_maps_api_key.is_empty() {
        config.google_maps_api_key.clone()
    } else {
        log::warn!("GOOGLE_MAPS_API_KEY not configured - falling back to the payload's mapsApiKey");
        configuration.maps_api_key.clone().unwrap_or_default()
    };
    if api_key.is_empty() {
        log::warn!("No mapping platform API key configured; outbound calls will be denied");
    }

    let client = match GoogleMapsClient::new(
        api_key,
        config.maps_requests_per_second,
        Duration::from_secs(config.http_timeout_seconds),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("Failed to build mapping client: {}", e);
            std::process::exit(1);
        }
    };
    let capabilities = CapabilitySet::from_platform(&configuration.capabilities, client);
    log::info!("Enabled capabilities: {:?}", capabilities.enabled_names());

    // 6. Session store with idle expiry
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_seconds,
    )));
    start_cleanup_task(
        sessions.clone(),
        Duration::from_secs(config.session_cleanup_interval_seconds),
    );
    log::info!(
        "Started session cleanup task (idle TTL: {}s, interval: {}s)",
        config.session_ttl_seconds,
        config.session_cleanup_interval_seconds
    );

    let locator = Arc::new(Locator::new(configuration, capabilities, sessions));

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(web::Data::new(locator.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::sessions_config)
            .configure(handlers::autocomplete_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
