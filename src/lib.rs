//! Core of the electoral-district choropleth viewer.
//!
//! The crate owns everything the viewer decides: which district is selected
//! and how it is styled, when district labels are visible, what the summary
//! popup says, how an address search is normalized, filtered and applied, and
//! how the geo documents are fetched and parsed. The host map widget only
//! forwards UI events to [`viewer::ViewerCore`] and applies the resulting
//! [`action::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`viewer`] | Top-level event handlers in [`viewer::ViewerCore`] |
//! | [`action`] | Side effects the host applies to the map widget |
//! | [`config`] | Runtime configuration and environment overrides |
//! | [`error`] | Crate error type |
//! | [`geo`] | Geometry, district ids, and GeoJSON parsing |
//! | [`loader`] | Geo document fetching and the [`loader::DataStore`] seam |
//! | [`layers`] | Overlay layers and their attachment state |
//! | [`style`] | Path styles and label markup |
//! | [`selection`] | Single-district selection state machine |
//! | [`summary`] | Per-district sub-unit summary popup |
//! | [`labels`] | Zoom-driven label visibility |
//! | [`geocode`] | Geocoder candidates, query normalization, Nominatim client |
//! | [`search`] | Search ticketing, region filtering, result branching |

pub mod action;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod labels;
pub mod layers;
pub mod loader;
pub mod search;
pub mod selection;
pub mod style;
pub mod summary;
pub mod viewer;
