//! Geo data model: district ids, coordinates, features, and the sub-unit index.
//!
//! This module is the validation boundary for the static documents. Each
//! `parse_*` function takes the raw text of one document and either returns
//! typed features or a `MalformedDocument` error naming the document and the
//! first problem found. Nothing downstream inspects raw JSON.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use std::collections::HashMap;
use std::fmt;

use geojson::{FeatureCollection, GeoJson, Geometry};
use serde_json::Value;

use crate::error::ViewerError;

/// Property carrying the district code on district and label features.
pub const DISTRICT_PROPERTY: &str = "DISTRICT";

// =============================================================================
// IDS AND COORDINATES
// =============================================================================

/// String-normalized district code (`117` and `"117"` are the same district).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistrictId(String);

impl DistrictId {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Normalize a JSON property value. Integral floats lose their fraction
    /// (`117.0` -> `"117"`); anything other than a string or number is rejected.
    #[must_use]
    pub fn from_property(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self::new(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(Self(u.to_string()))
                } else {
                    n.as_f64().map(|f| Self(format!("{f}")))
                }
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DistrictId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Degenerate bounds covering a single point.
    #[must_use]
    pub fn at(point: LatLng) -> Self {
        Self { south_west: point, north_east: point }
    }

    /// Grow to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Smallest bounds containing both `self` and `other`.
    #[must_use]
    pub fn union(mut self, other: Bounds) -> Self {
        self.extend(other.south_west);
        self.extend(other.north_east);
        self
    }

    /// Bounds of all `points`, or `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::at(first);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }
}

// =============================================================================
// FEATURES
// =============================================================================

/// A closed ring of coordinates.
pub type Ring = Vec<LatLng>;

/// One or more polygons, each an exterior ring followed by holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub polygons: Vec<Vec<Ring>>,
}

impl Area {
    /// Bounds of every exterior ring, or `None` for an empty area.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(
            self.polygons
                .iter()
                .filter_map(|rings| rings.first())
                .flatten()
                .copied(),
        )
    }
}

/// A district polygon with its id. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictFeature {
    pub id: DistrictId,
    pub area: Area,
}

/// A sub-unit polygon; display only.
#[derive(Debug, Clone, PartialEq)]
pub struct SubUnitFeature {
    pub area: Area,
}

/// Label anchor for one district.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPoint {
    pub id: DistrictId,
    pub position: LatLng,
}

// =============================================================================
// DISTRICT INDEX
// =============================================================================

/// District id -> ordered sub-unit names. Read-only after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistrictIndex {
    entries: HashMap<DistrictId, Vec<String>>,
}

impl DistrictIndex {
    #[must_use]
    pub fn new(entries: HashMap<DistrictId, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Sub-units of `district` in stored order; empty when the id is unknown.
    #[must_use]
    pub fn sub_units(&self, district: &DistrictId) -> &[String] {
        self.entries.get(district).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, district: &DistrictId) -> bool {
        self.entries.contains_key(district)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the flat `{ "id": ["name", ...] }` index document.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the root is not an object or any value
    /// is not an array of strings.
    pub fn parse(document: &str, text: &str) -> Result<Self, ViewerError> {
        let root: Value = serde_json::from_str(text).map_err(|e| malformed(document, e.to_string()))?;
        let Value::Object(map) = root else {
            return Err(malformed(document, "expected an object of district id to name list"));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let Value::Array(items) = value else {
                return Err(malformed(document, format!("entry {key} is not an array")));
            };
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(name) => names.push(name),
                    other => {
                        return Err(malformed(document, format!("entry {key} holds non-string value {other}")));
                    }
                }
            }
            entries.insert(DistrictId::new(&key), names);
        }
        Ok(Self { entries })
    }
}

// =============================================================================
// DOCUMENT PARSING
// =============================================================================

/// Parse the district polygon collection. Every feature needs a `DISTRICT`
/// property and a polygon or multi-polygon geometry.
///
/// # Errors
///
/// Returns `MalformedDocument` on the first invalid feature.
pub fn parse_districts(document: &str, text: &str) -> Result<Vec<DistrictFeature>, ViewerError> {
    let collection = feature_collection(document, text)?;
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let id = district_of(document, i, feature.properties.as_ref())?;
            let area = area_of(document, i, feature.geometry.as_ref())?;
            Ok(DistrictFeature { id, area })
        })
        .collect()
}

/// Parse the sub-unit polygon collection.
///
/// # Errors
///
/// Returns `MalformedDocument` on the first feature without polygon geometry.
pub fn parse_sub_units(document: &str, text: &str) -> Result<Vec<SubUnitFeature>, ViewerError> {
    let collection = feature_collection(document, text)?;
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| Ok(SubUnitFeature { area: area_of(document, i, feature.geometry.as_ref())? }))
        .collect()
}

/// Parse the label point collection.
///
/// # Errors
///
/// Returns `MalformedDocument` on the first feature without a point geometry
/// or `DISTRICT` property.
pub fn parse_labels(document: &str, text: &str) -> Result<Vec<LabelPoint>, ViewerError> {
    let collection = feature_collection(document, text)?;
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let id = district_of(document, i, feature.properties.as_ref())?;
            let position = match feature.geometry.as_ref().map(|g| &g.value) {
                Some(geojson::Value::Point(position)) => lat_lng(document, i, position)?,
                _ => return Err(malformed(document, format!("feature {i} is not a point"))),
            };
            Ok(LabelPoint { id, position })
        })
        .collect()
}

fn feature_collection(document: &str, text: &str) -> Result<FeatureCollection, ViewerError> {
    match text.parse::<GeoJson>() {
        Ok(GeoJson::FeatureCollection(collection)) => Ok(collection),
        Ok(_) => Err(malformed(document, "expected a FeatureCollection")),
        Err(e) => Err(malformed(document, e.to_string())),
    }
}

fn district_of(
    document: &str,
    index: usize,
    properties: Option<&serde_json::Map<String, Value>>,
) -> Result<DistrictId, ViewerError> {
    properties
        .and_then(|p| p.get(DISTRICT_PROPERTY))
        .and_then(DistrictId::from_property)
        .ok_or_else(|| malformed(document, format!("feature {index} has no usable {DISTRICT_PROPERTY} property")))
}

fn area_of(document: &str, index: usize, geometry: Option<&Geometry>) -> Result<Area, ViewerError> {
    let polygons = match geometry.map(|g| &g.value) {
        Some(geojson::Value::Polygon(rings)) => vec![polygon(document, index, rings)?],
        Some(geojson::Value::MultiPolygon(polys)) => polys
            .iter()
            .map(|rings| polygon(document, index, rings))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(malformed(document, format!("feature {index} is not a polygon"))),
        None => return Err(malformed(document, format!("feature {index} has no geometry"))),
    };
    Ok(Area { polygons })
}

fn polygon(document: &str, index: usize, rings: &[Vec<Vec<f64>>]) -> Result<Vec<Ring>, ViewerError> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|p| lat_lng(document, index, p)).collect::<Result<Ring, _>>())
        .collect()
}

/// GeoJSON positions are `[lng, lat, ...]`.
fn lat_lng(document: &str, index: usize, position: &[f64]) -> Result<LatLng, ViewerError> {
    match position {
        [lng, lat, ..] if lat.is_finite() && lng.is_finite() => Ok(LatLng::new(*lat, *lng)),
        _ => Err(malformed(document, format!("feature {index} has an invalid position"))),
    }
}

fn malformed(document: &str, reason: impl Into<String>) -> ViewerError {
    ViewerError::MalformedDocument { document: document.to_string(), reason: reason.into() }
}
