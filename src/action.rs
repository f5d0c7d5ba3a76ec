//! Instructions returned from state transitions for the host map surface to apply.
//!
//! The viewer core never touches rendering primitives. Every transition
//! returns a `Vec<Action>` in the order the host must apply them.

use crate::geo::{Bounds, DistrictId, LatLng};
use crate::style::PathStyle;

/// One of the three overlay collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Districts,
    SubUnits,
    Labels,
}

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Non-blocking hint; the user can keep interacting.
    Hint,
    /// Blocking alert; initialization could not complete.
    Fatal,
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Center the viewport on `center` at `zoom`.
    SetView { center: LatLng, zoom: f64 },
    /// Fit the viewport to `bounds`.
    FitBounds(Bounds),
    AddLayer(LayerKind),
    RemoveLayer(LayerKind),
    /// Restyle one district polygon.
    SetDistrictStyle { district: DistrictId, style: PathStyle },
    /// Open an info popup anchored to a district.
    OpenPopup { district: DistrictId, markup: String, max_width: u32 },
    /// Place the search marker. At most one exists.
    PlaceMarker(LatLng),
    RemoveMarker,
    /// Render the disambiguation list, one entry per display label.
    ShowCandidates(Vec<String>),
    /// Hide and empty the disambiguation list.
    ClearCandidates,
    Notify { level: NoticeLevel, message: String },
}
