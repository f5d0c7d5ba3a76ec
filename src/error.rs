//! Viewer errors.
//!
//! DESIGN
//! ======
//! One error enum for the whole crate. Load errors are fatal to
//! initialization; geocoding errors are surfaced as non-blocking notices by
//! the search pipeline; `MalformedCandidate` propagates to the caller.
//! "No match" and "missing index entry" are outcomes, not errors.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors produced by viewer operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A geo-data document request returned a non-success status.
    #[error("failed to load {document} ({status})")]
    LoadFailure { document: String, status: u16 },

    /// An HTTP request failed before a response was received.
    #[error("request failed: {0}")]
    Request(String),

    /// A geo-data document had an unexpected shape.
    #[error("malformed document {document}: {reason}")]
    MalformedDocument { document: String, reason: String },

    /// The geocoding service returned a non-success status or unparseable body.
    #[error("geocoding response error: {0}")]
    GeocodeResponse(String),

    /// An applied candidate carried a coordinate that is not a number.
    #[error("malformed candidate coordinate {field}={value:?}")]
    MalformedCandidate { field: &'static str, value: String },
}

impl ViewerError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::LoadFailure { .. } => "E_LOAD_FAILURE",
            Self::Request(_) => "E_REQUEST",
            Self::MalformedDocument { .. } => "E_MALFORMED_DOCUMENT",
            Self::GeocodeResponse(_) => "E_GEOCODE_RESPONSE",
            Self::MalformedCandidate { .. } => "E_MALFORMED_CANDIDATE",
        }
    }

    /// Whether retrying the same operation could succeed.
    ///
    /// Nothing in the viewer retries automatically; hosts may use this to
    /// decide whether to offer a reload.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::LoadFailure { status: 429 | 500..=599, .. })
    }

    /// Whether this error belongs to the load phase and aborts initialization.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::LoadFailure { .. } | Self::MalformedDocument { .. } | Self::Request(_))
    }
}
