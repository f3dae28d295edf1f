// src/handlers/sessions.rs
// DOCUMENTATION: HTTP handlers for locator sessions
// PURPOSE: Parse requests, call the locator, return view models

use crate::errors::LocatorError;
use crate::models::SearchRequest;
use crate::services::Locator;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Request body for POST /sessions/{id}/select
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
    /// Pan the map to the selected location
    #[serde(default)]
    pub pan: bool,
}

/// Request body for POST /sessions/{id}/directions
#[derive(Debug, Deserialize)]
pub struct DirectionsRequest {
    pub index: usize,
}

/// POST /sessions
/// Start a visit
pub async fn create_session(locator: web::Data<Arc<Locator>>) -> impl Responder {
    let created = locator.create_session().await;
    HttpResponse::Created().json(created)
}

/// DELETE /sessions/{id}
pub async fn end_session(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, LocatorError> {
    locator.end_session(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /sessions/{id}/results
pub async fn get_results(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, LocatorError> {
    let view = locator.results(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /sessions/{id}/map
pub async fn get_map(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, LocatorError> {
    let view = locator.map(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /sessions/{id}/search
/// Search by typed text or by a picked suggestion
pub async fn search(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
    req: web::Json<SearchRequest>,
) -> Result<impl Responder, LocatorError> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err(LocatorError::ValidationError(e.to_string()));
    }

    let input = req.into_inner().into_input()?;
    let view = locator.search(path.into_inner(), input).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// DELETE /sessions/{id}/search
pub async fn clear_search(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, LocatorError> {
    let view = locator.clear_search(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /sessions/{id}/select
pub async fn select(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
    req: web::Json<SelectRequest>,
) -> Result<impl Responder, LocatorError> {
    let view = locator
        .select(path.into_inner(), req.index, req.pan)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /sessions/{id}/directions
/// Driving route from the searched address to a location
pub async fn directions(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
    req: web::Json<DirectionsRequest>,
) -> Result<impl Responder, LocatorError> {
    let route = locator.directions(path.into_inner(), req.index).await?;
    Ok(HttpResponse::Ok().json(route))
}

/// GET /sessions/{id}/details/{index}
pub async fn show_details(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<(Uuid, usize)>,
) -> Result<impl Responder, LocatorError> {
    let (id, index) = path.into_inner();
    let view = locator.show_details(id, index).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /sessions/{id}/back
pub async fn back(
    locator: web::Data<Arc<Locator>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, LocatorError> {
    let view = locator.back(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessions")
            .route("", web::post().to(create_session))
            .route("/{id}", web::delete().to(end_session))
            .route("/{id}/results", web::get().to(get_results))
            .route("/{id}/map", web::get().to(get_map))
            .route("/{id}/search", web::post().to(search))
            .route("/{id}/search", web::delete().to(clear_search))
            .route("/{id}/select", web::post().to(select))
            .route("/{id}/directions", web::post().to(directions))
            .route("/{id}/details/{index}", web::get().to(show_details))
            .route("/{id}/back", web::post().to(back)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Capabilities, LocatorConfiguration};
    use crate::models::{LatLng, Location};
    use crate::services::fakes::FakeMaps;
    use crate::services::{CapabilitySet, SessionStore};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn locator() -> Arc<Locator> {
        let capabilities = Capabilities {
            input: true,
            directions: true,
            ..Capabilities::default()
        };
        let configuration = LocatorConfiguration {
            capabilities,
            locations: vec![
                Location {
                    title: "Zapopan".to_string(),
                    address1: "Av. Patria 1201".to_string(),
                    address2: "Zapopan, Jal.".to_string(),
                    coords: LatLng::new(20.7036, -103.4128),
                    place_id: None,
                    travel_distance_text: None,
                    travel_distance_value: None,
                },
                Location {
                    title: "Tlaquepaque".to_string(),
                    address1: "Av. Niños Héroes 40".to_string(),
                    address2: "Tlaquepaque, Jal.".to_string(),
                    coords: LatLng::new(20.6409, -103.3112),
                    place_id: None,
                    travel_distance_text: None,
                    travel_distance_value: None,
                },
            ],
            ..LocatorConfiguration::default()
        };
        let maps = FakeMaps::default().with_address(
            "Tonalá",
            "Tonalá, Jal., México",
            LatLng::new(20.6243, -103.2343),
        );
        Arc::new(Locator::new(
            Arc::new(configuration),
            CapabilitySet::from_platform(&capabilities, Arc::new(maps)),
            Arc::new(SessionStore::new(Duration::from_secs(60))),
        ))
    }

    #[actix_web::test]
    async fn test_session_flow() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(locator()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post().uri("/sessions").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["results"]["section_name"], "All locations (2)");

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/search", id))
            .set_json(json!({"query": "  Tonalá "}))
            .to_request();
        let results: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results["items"][0]["title"], "Tlaquepaque");
        assert_eq!(results["show_directions_button"], true);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/directions", id))
            .set_json(json!({"index": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}/map", id))
            .to_request();
        let map: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(map["markers"]["features"].as_array().unwrap().len(), 3);
        assert!(map["route"].is_object());

        let req = test::TestRequest::delete()
            .uri(&format!("/sessions/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}/results", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_error_responses() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(locator()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post().uri("/sessions").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/search", id))
            .set_json(json!({"query": "Atlantis"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "ADDRESS_NOT_FOUND");

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/search", id))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/select", id))
            .set_json(json!({"index": 7}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}/details/0", id))
            .to_request();
        let details: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(details["location"]["title"], "Zapopan");
        assert!(details["place"].is_null());

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/back", id))
            .to_request();
        let results: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results["panel"]["state"], "list");
    }
}
