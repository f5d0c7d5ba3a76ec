//! Feature layer manager: the three overlay collections and their attachment state.
//!
//! DESIGN
//! ======
//! `LayerSet` owns every loaded feature for the session. Each district gets a
//! base style at build time (highlight accent for highlight-set members,
//! plain otherwise); selection emphasis is layered on top by `selection` and
//! always reverts to this base. Attachment is tracked here so `attach` /
//! `detach` only emit an action on a real state change. Clicks on a district
//! polygon are routed by the host to `ViewerCore::on_district_click`.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use std::collections::{HashMap, HashSet};

use crate::action::{Action, LayerKind};
use crate::geo::{Bounds, DistrictFeature, DistrictId, LabelPoint, LatLng, SubUnitFeature};
use crate::style::{self, PathStyle};

/// A built label marker: anchor position plus rendered markup.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMarker {
    pub district: DistrictId,
    pub position: LatLng,
    pub markup: String,
    /// CSS class for the marker element.
    pub class_name: &'static str,
}

pub struct LayerSet {
    districts: Vec<DistrictFeature>,
    base_styles: HashMap<DistrictId, PathStyle>,
    sub_units: Vec<SubUnitFeature>,
    labels: Vec<LabelMarker>,
    attached: HashSet<LayerKind>,
}

impl LayerSet {
    /// Build all three collections. Nothing is attached yet.
    #[must_use]
    pub fn build(
        districts: Vec<DistrictFeature>,
        sub_units: Vec<SubUnitFeature>,
        labels: Vec<LabelPoint>,
        highlight: &HashSet<DistrictId>,
    ) -> Self {
        let base_styles = districts
            .iter()
            .map(|d| {
                let style =
                    if highlight.contains(&d.id) { style::DISTRICT_HIGHLIGHT } else { style::DISTRICT_DEFAULT };
                (d.id.clone(), style)
            })
            .collect();

        let labels = labels
            .into_iter()
            .map(|l| LabelMarker {
                markup: style::label_markup(l.id.as_str()),
                class_name: style::LABEL_CLASS,
                district: l.id,
                position: l.position,
            })
            .collect();

        Self { districts, base_styles, sub_units, labels, attached: HashSet::new() }
    }

    /// Style a district reverts to when not selected. Unknown ids get the plain style.
    #[must_use]
    pub fn base_style(&self, district: &DistrictId) -> PathStyle {
        self.base_styles
            .get(district)
            .copied()
            .unwrap_or(style::DISTRICT_DEFAULT)
    }

    /// Style shared by every sub-unit polygon.
    #[must_use]
    pub fn sub_unit_style(&self) -> PathStyle {
        style::SUB_UNIT
    }

    #[must_use]
    pub fn contains_district(&self, district: &DistrictId) -> bool {
        self.base_styles.contains_key(district)
    }

    #[must_use]
    pub fn districts(&self) -> &[DistrictFeature] {
        &self.districts
    }

    #[must_use]
    pub fn sub_units(&self) -> &[SubUnitFeature] {
        &self.sub_units
    }

    #[must_use]
    pub fn labels(&self) -> &[LabelMarker] {
        &self.labels
    }

    /// Attach `kind` to the view. Returns `None` if it was already attached.
    pub fn attach(&mut self, kind: LayerKind) -> Option<Action> {
        self.attached.insert(kind).then_some(Action::AddLayer(kind))
    }

    /// Detach `kind` from the view. Returns `None` if it was not attached.
    pub fn detach(&mut self, kind: LayerKind) -> Option<Action> {
        self.attached.remove(&kind).then_some(Action::RemoveLayer(kind))
    }

    #[must_use]
    pub fn is_attached(&self, kind: LayerKind) -> bool {
        self.attached.contains(&kind)
    }

    /// Union bounds of every district polygon.
    #[must_use]
    pub fn district_bounds(&self) -> Option<Bounds> {
        self.districts
            .iter()
            .filter_map(|d| d.area.bounds())
            .reduce(Bounds::union)
    }
}
