//! Viewer configuration parsed from environment variables.
//!
//! Everything that is fixed for a deployment lives here: where the static
//! geo documents are hosted, which geocoder to call, the single supported
//! region, and the permanently highlighted districts.

use crate::error::ViewerError;
use crate::geo::LatLng;

pub const DEFAULT_DATA_BASE_URL: &str = "https://pub-1bacdccb5e824653a18e55522bcb1ac4.r2.dev";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "district-viewer/0.1";
pub const DEFAULT_LABEL_MIN_ZOOM: f64 = 9.0;
pub const DEFAULT_RESULT_ZOOM: f64 = 13.0;
pub const DEFAULT_INITIAL_ZOOM: f64 = 7.0;
pub const DEFAULT_PREVIEW_LIMIT: usize = 25;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HIGHLIGHT_DISTRICTS: [&str; 6] = ["117", "89", "35", "32", "81", "105"];

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl BoundingBox {
    /// Render as the geocoder `viewbox` parameter: `west,north,east,south`.
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

/// The single region searches are constrained to.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Full name as reported in geocoder addresses (e.g. `North Carolina`).
    pub name: String,
    /// Standard two-letter abbreviation (e.g. `NC`).
    pub abbreviation: String,
    pub bbox: BoundingBox,
    /// Example query shown in no-match hints.
    pub example_query: String,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            name: "North Carolina".into(),
            abbreviation: "NC".into(),
            bbox: BoundingBox { west: -84.6, north: 36.7, east: -75.4, south: 33.8 },
            example_query: "Mebane, NC".into(),
        }
    }
}

/// File names of the four documents in the static store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNames {
    pub index: String,
    pub districts: String,
    pub sub_units: String,
    pub labels: String,
}

impl Default for DocumentNames {
    fn default() -> Self {
        Self {
            index: "precincts_by_district.json".into(),
            districts: "nc_house.geojson".into(),
            sub_units: "precincts.geojson".into(),
            labels: "house_labels.geojson".into(),
        }
    }
}

/// How a search resolution is treated when a newer search was issued meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Every resolution is applied, in resolution order.
    #[default]
    LastResolvedWins,
    /// Only the most recently issued search may change the map.
    LatestIssuedOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub data_base_url: String,
    pub documents: DocumentNames,
    pub geocoder_url: String,
    pub user_agent: String,
    pub region: Region,
    pub highlight_districts: Vec<String>,
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub result_zoom: f64,
    pub label_min_zoom: f64,
    pub preview_limit: usize,
    pub stale_policy: StalePolicy,
    pub connect_timeout_secs: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_base_url: DEFAULT_DATA_BASE_URL.into(),
            documents: DocumentNames::default(),
            geocoder_url: DEFAULT_GEOCODER_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            region: Region::default(),
            highlight_districts: DEFAULT_HIGHLIGHT_DISTRICTS.iter().map(ToString::to_string).collect(),
            initial_center: LatLng::new(35.5, -79.0),
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            result_zoom: DEFAULT_RESULT_ZOOM,
            label_min_zoom: DEFAULT_LABEL_MIN_ZOOM,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            stale_policy: StalePolicy::default(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ViewerConfig {
    /// Build typed viewer config from environment variables.
    ///
    /// Optional:
    /// - `VIEWER_DATA_BASE_URL`: static store base address
    /// - `VIEWER_GEOCODER_URL`: geocoding search endpoint
    /// - `VIEWER_USER_AGENT`: sent with geocoding requests
    /// - `VIEWER_LABEL_MIN_ZOOM`: default 9
    /// - `VIEWER_STALE_POLICY`: `last_resolved_wins` (default) or `latest_issued_only`
    /// - `VIEWER_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if a numeric or enum variable holds an unknown value.
    pub fn from_env() -> Result<Self, ViewerError> {
        let mut config = Self::default();

        if let Some(url) = env_var("VIEWER_DATA_BASE_URL") {
            config.data_base_url = trim_base_url(&url);
        }
        if let Some(url) = env_var("VIEWER_GEOCODER_URL") {
            config.geocoder_url = trim_base_url(&url);
        }
        if let Some(agent) = env_var("VIEWER_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(raw) = env_var("VIEWER_LABEL_MIN_ZOOM") {
            config.label_min_zoom = parse_zoom(&raw)?;
        }
        config.stale_policy = parse_stale_policy(env_var("VIEWER_STALE_POLICY").as_deref())?;
        if let Some(raw) = env_var("VIEWER_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ViewerError::ConfigParse(format!("invalid VIEWER_CONNECT_TIMEOUT_SECS: {raw}")))?;
        }

        Ok(config)
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_zoom(raw: &str) -> Result<f64, ViewerError> {
    match raw.trim().parse::<f64>() {
        Ok(zoom) if zoom.is_finite() && zoom >= 0.0 => Ok(zoom),
        _ => Err(ViewerError::ConfigParse(format!("invalid VIEWER_LABEL_MIN_ZOOM: {raw}"))),
    }
}

fn parse_stale_policy(raw: Option<&str>) -> Result<StalePolicy, ViewerError> {
    match raw.map_or("last_resolved_wins", str::trim) {
        "last_resolved_wins" => Ok(StalePolicy::LastResolvedWins),
        "latest_issued_only" => Ok(StalePolicy::LatestIssuedOnly),
        other => Err(ViewerError::ConfigParse(format!(
            "unsupported stale policy '{other}' (expected 'last_resolved_wins' or 'latest_issued_only')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
