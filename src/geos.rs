// src/geos.rs

use crate::domain::property::{PropertyRecord, PropertyType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Antalya city centre; used whenever nothing better is known.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 36.8969,
    lng: 30.7133,
};

/// Radius of the circle drawn instead of a pin for approximate locations.
pub const APPROXIMATE_RADIUS_M: u32 = 500;

/// Mean of the vertex coordinates of a parcel boundary.
///
/// This is the centroid of the vertices, not of the enclosed area. It is
/// only used to centre the map, where the difference does not matter.
/// No vertices gives `DEFAULT_CENTER`.
pub fn vertex_centroid(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = points.len() as f64;
    let (lat, lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    GeoPoint {
        lat: lat / n,
        lng: lng / n,
    }
}

/// Where a property's map should be centred.
pub fn map_center(record: &PropertyRecord) -> GeoPoint {
    if record.property_type == Some(PropertyType::Land) && !record.polygon.is_empty() {
        return vertex_centroid(&record.polygon);
    }
    record.location_map.unwrap_or(DEFAULT_CENTER)
}
