// src/handlers/autocomplete.rs
// DOCUMENTATION: Address autocomplete proxy
// PURPOSE: Predictions while typing and resolution of a chosen prediction

use crate::errors::LocatorError;
use crate::services::Locator;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Query parameters for GET /autocomplete
#[derive(Debug, Deserialize, Validate)]
pub struct AutocompleteQuery {
    #[validate(length(max = 256))]
    pub input: String,
}

/// GET /autocomplete?input=
pub async fn predictions(
    locator: web::Data<Arc<Locator>>,
    query: web::Query<AutocompleteQuery>,
) -> Result<impl Responder, LocatorError> {
    if let Err(e) = query.validate() {
        return Err(LocatorError::ValidationError(e.to_string()));
    }

    let predictions = locator.autocomplete(&query.input).await?;
    Ok(HttpResponse::Ok().json(predictions))
}

/// GET /autocomplete/{place_id}
/// Returns a suggestion ready to be posted to the search endpoint
pub async fn resolve(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<String>,
) -> Result<impl Responder, LocatorError> {
    let suggestion = locator.resolve_prediction(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(suggestion))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/autocomplete")
            .route("", web::get().to(predictions))
            .route("/{place_id}", web::get().to(resolve)),
    );
}
