//! Geo data loader: fetch and validate the four static documents.
//!
//! DESIGN
//! ======
//! Documents are fetched one after another and every one must succeed
//! before any overlay is built. The first non-success status or malformed
//! payload aborts the load; there is no retry and no partial result.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};

use crate::config::{DocumentNames, ViewerConfig};
use crate::error::ViewerError;
use crate::geo::{self, DistrictFeature, DistrictIndex, LabelPoint, SubUnitFeature};

/// Read-only document store.
#[async_trait::async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch the raw text of document `name`.
    ///
    /// Non-success responses must be reported as `LoadFailure`.
    async fn fetch_text(&self, name: &str) -> Result<String, ViewerError>;
}

/// Static object store reached over HTTP (`GET {base}/{name}`).
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(config: &ViewerConfig) -> Result<Self, ViewerError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ViewerError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.data_base_url.clone() })
    }
}

#[async_trait::async_trait]
impl DataStore for HttpStore {
    async fn fetch_text(&self, name: &str) -> Result<String, ViewerError> {
        let url = format!("{}/{}", self.base_url, name);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| ViewerError::Request(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::LoadFailure { document: name.to_string(), status: status.as_u16() });
        }
        response
            .text()
            .await
            .map_err(|e| ViewerError::Request(format!("{url}: {e}")))
    }
}

/// Everything loaded at initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoData {
    pub index: DistrictIndex,
    pub districts: Vec<DistrictFeature>,
    pub sub_units: Vec<SubUnitFeature>,
    pub labels: Vec<LabelPoint>,
}

/// Fetch and validate all four documents, index first.
///
/// # Errors
///
/// Returns the first `LoadFailure`, `Request`, or `MalformedDocument` error.
pub async fn load(store: &dyn DataStore, names: &DocumentNames) -> Result<GeoData, ViewerError> {
    let result = load_inner(store, names).await;
    match &result {
        Ok(data) => tracing::info!(
            districts = data.districts.len(),
            sub_units = data.sub_units.len(),
            labels = data.labels.len(),
            index_entries = data.index.len(),
            "geo data loaded"
        ),
        Err(e) => tracing::error!(error = %e, code = e.error_code(), "geo data load failed"),
    }
    result
}

async fn load_inner(store: &dyn DataStore, names: &DocumentNames) -> Result<GeoData, ViewerError> {
    let index = DistrictIndex::parse(&names.index, &store.fetch_text(&names.index).await?)?;
    let districts = geo::parse_districts(&names.districts, &store.fetch_text(&names.districts).await?)?;
    let sub_units = geo::parse_sub_units(&names.sub_units, &store.fetch_text(&names.sub_units).await?)?;
    let labels = geo::parse_labels(&names.labels, &store.fetch_text(&names.labels).await?)?;

    let unindexed = districts.iter().filter(|d| !index.contains(&d.id)).count();
    if unindexed > 0 {
        tracing::warn!(unindexed, "districts missing from sub-unit index; they will show no matches");
    }

    Ok(GeoData { index, districts, sub_units, labels })
}
