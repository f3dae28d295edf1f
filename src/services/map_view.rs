// src/services/map_view.rs
// DOCUMENTATION: Marker layer and viewport for the page's map
// PURPOSE: Turn session state into GeoJSON markers and bounds to fit

use geo_types::{Coord, Point, Rect};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;

use crate::models::{LatLng, Location, MapBounds, SearchLocation};

fn point_feature(coords: LatLng, properties: JsonObject) -> Feature {
    let point: Point<f64> = coords.into();
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&point))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// One feature per location plus the visitor's marker when searching
pub fn markers(
    locations: &[Location],
    selected: Option<usize>,
    search: Option<&SearchLocation>,
) -> FeatureCollection {
    let mut features: Vec<Feature> = locations
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!("location"));
            properties.insert("index".to_string(), json!(index));
            properties.insert("title".to_string(), json!(location.title));
            properties.insert("selected".to_string(), json!(selected == Some(index)));
            point_feature(location.coords, properties)
        })
        .collect();

    if let Some(search) = search {
        let mut properties = JsonObject::new();
        properties.insert("kind".to_string(), json!("search"));
        properties.insert("title".to_string(), json!("My location"));
        properties.insert("address".to_string(), json!(search.address));
        features.push(point_feature(search.location, properties));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Smallest rectangle covering every location and the search point
pub fn bounds(locations: &[Location], search: Option<&SearchLocation>) -> Option<MapBounds> {
    locations
        .iter()
        .map(|l| l.coords)
        .chain(search.map(|s| s.location))
        .map(Point::from)
        .fold(None, |acc: Option<Rect<f64>>, point| {
            let rect = match acc {
                None => Rect::new(point.0, point.0),
                Some(rect) => Rect::new(
                    Coord {
                        x: rect.min().x.min(point.x()),
                        y: rect.min().y.min(point.y()),
                    },
                    Coord {
                        x: rect.max().x.max(point.x()),
                        y: rect.max().y.max(point.y()),
                    },
                ),
            };
            Some(rect)
        })
        .map(|rect| MapBounds {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        })
}
