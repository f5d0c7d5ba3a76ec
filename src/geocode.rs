//! Geocoding client and candidate model.
//!
//! DESIGN
//! ======
//! `Geocoder` is the seam between the search pipeline and the network, so
//! the pipeline can be driven by an in-memory double in tests.
//! `NominatimClient` is the production implementation: a hard-bounded search
//! inside the configured region's box, at most five candidates, with
//! structured address details. No request timeout is set on the search call;
//! a hung request leaves the disambiguation area untouched.

#[cfg(test)]
#[path = "geocode_test.rs"]
mod geocode_test;

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use serde::Deserialize;

use crate::config::{Region, ViewerConfig};
use crate::error::ViewerError;
use crate::geo::LatLng;

/// Maximum number of candidates requested per search.
pub const RESULT_LIMIT: u8 = 5;

// =============================================================================
// CANDIDATES
// =============================================================================

/// Structured address breakdown of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
}

impl Address {
    /// First present settlement-level field: city, town, village, or hamlet.
    #[must_use]
    pub fn settlement(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village, &self.hamlet]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.trim().is_empty())
    }
}

/// A raw geocoding hit. Coordinates stay strings until applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: Address,
}

impl Candidate {
    /// Parse the coordinate.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCandidate` naming the field that is not a finite number.
    pub fn position(&self) -> Result<LatLng, ViewerError> {
        let lat = parse_coordinate("lat", &self.lat)?;
        let lng = parse_coordinate("lon", &self.lon)?;
        Ok(LatLng::new(lat, lng))
    }

    /// Whether the address names `region` and has a settlement-level field.
    /// County-only and region-less matches are rejected.
    #[must_use]
    pub fn is_in_region(&self, region: &Region) -> bool {
        let names_region = self.address.state.as_deref().is_some_and(|state| {
            let state = state.trim();
            state.eq_ignore_ascii_case(&region.name) || state.eq_ignore_ascii_case(&region.abbreviation)
        });
        names_region && self.address.settlement().is_some()
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, ViewerError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ViewerError::MalformedCandidate { field, value: raw.to_string() }),
    }
}

/// Parse a geocoder response body: a JSON array of candidates.
///
/// # Errors
///
/// Returns `GeocodeResponse` if the body is not an array of candidates.
pub fn parse_candidates(body: &str) -> Result<Vec<Candidate>, ViewerError> {
    serde_json::from_str(body).map_err(|e| ViewerError::GeocodeResponse(format!("invalid candidate list: {e}")))
}

// =============================================================================
// QUERY
// =============================================================================

/// Whether `query` already names `region` by abbreviation or full name,
/// as whole tokens in any letter case.
#[must_use]
pub fn mentions_region(query: &str, region: &Region) -> bool {
    let tokens = tokenize(query);
    let abbreviation = region.abbreviation.to_lowercase();
    if tokens.iter().any(|t| *t == abbreviation) {
        return true;
    }
    let name = tokenize(&region.name);
    !name.is_empty() && tokens.windows(name.len()).any(|w| w == name.as_slice())
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Trim `raw` and append `, {abbreviation}` unless the region is already named.
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_query(raw: &str, region: &Region) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if mentions_region(trimmed, region) {
        return Some(trimmed.to_string());
    }
    let base = trimmed.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    Some(format!("{base}, {}", region.abbreviation))
}

/// A bounded geocoding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    /// Normalized free-text query.
    pub text: String,
    pub limit: u8,
    /// `west,north,east,south`.
    pub viewbox: String,
}

impl GeocodeQuery {
    #[must_use]
    pub fn bounded(text: String, region: &Region) -> Self {
        Self { text, limit: RESULT_LIMIT, viewbox: region.bbox.to_viewbox() }
    }

    /// Query-string parameters in request order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("limit", self.limit.to_string()),
            ("addressdetails", "1".to_string()),
            ("viewbox", self.viewbox.clone()),
            ("bounded", "1".to_string()),
            ("q", self.text.clone()),
        ]
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Address lookup service.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Run one bounded search and return raw candidates in service order.
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Candidate>, ViewerError>;
}

/// Nominatim-compatible HTTP geocoder.
pub struct NominatimClient {
    http: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(config: &ViewerConfig) -> Result<Self, ViewerError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ViewerError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.geocoder_url.clone() })
    }
}

#[async_trait::async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Candidate>, ViewerError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(&query.params())
            .send()
            .await
            .map_err(|e| ViewerError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ViewerError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(ViewerError::GeocodeResponse(format!("status {}", status.as_u16())));
        }
        parse_candidates(&body)
    }
}
