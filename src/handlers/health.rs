// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use crate::services::Locator;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

pub async fn health_check(locator: web::Data<Arc<Locator>>) -> impl Responder {
    let sessions = locator.sessions().stats().await;
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "store-locator",
        "version": env!("CARGO_PKG_VERSION"),
        "locations": locator.configuration().locations.len(),
        "sessions": sessions
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
