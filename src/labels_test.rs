use std::collections::HashSet;

use super::*;
use crate::geo::{DistrictId, LabelPoint, LatLng};

fn layers() -> LayerSet {
    LayerSet::build(
        vec![],
        vec![],
        vec![LabelPoint { id: DistrictId::new("1"), position: LatLng::new(35.0, -79.0) }],
        &HashSet::new(),
    )
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn shows_at_threshold() {
    assert_eq!(LabelVisibility::new(9.0).evaluate(9.0), Visibility::Show);
}

#[test]
fn shows_above_threshold() {
    assert_eq!(LabelVisibility::new(9.0).evaluate(13.0), Visibility::Show);
}

#[test]
fn hides_just_below_threshold() {
    assert_eq!(LabelVisibility::new(9.0).evaluate(8.999), Visibility::Hide);
    assert_eq!(LabelVisibility::new(9.0).evaluate(8.0), Visibility::Hide);
}

#[test]
fn evaluate_ignores_manual_toggle() {
    let mut labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    labels.set_enabled(false, 10.0, &mut layers);
    assert_eq!(labels.evaluate(10.0), Visibility::Show);
}

// =============================================================
// on_zoom
// =============================================================

#[test]
fn zoom_in_attaches_once() {
    let labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    assert_eq!(labels.on_zoom(9.0, &mut layers), Some(Action::AddLayer(LayerKind::Labels)));
    assert_eq!(labels.on_zoom(10.0, &mut layers), None);
    assert!(layers.is_attached(LayerKind::Labels));
}

#[test]
fn zoom_out_detaches_attached_layer() {
    let labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    layers.attach(LayerKind::Labels);
    assert_eq!(labels.on_zoom(7.0, &mut layers), Some(Action::RemoveLayer(LayerKind::Labels)));
    assert_eq!(labels.on_zoom(6.0, &mut layers), None);
}

#[test]
fn initial_attachment_does_not_override_threshold() {
    let labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    layers.attach(LayerKind::Labels);
    labels.on_zoom(7.0, &mut layers);
    assert!(!layers.is_attached(LayerKind::Labels));
}

// =============================================================
// Manual toggle
// =============================================================

#[test]
fn unchecking_detaches() {
    let mut labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    labels.on_zoom(10.0, &mut layers);
    assert_eq!(labels.set_enabled(false, 10.0, &mut layers), Some(Action::RemoveLayer(LayerKind::Labels)));
    assert!(!labels.is_enabled());
}

#[test]
fn checking_below_threshold_keeps_labels_hidden() {
    let mut labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    labels.set_enabled(false, 7.0, &mut layers);
    assert_eq!(labels.set_enabled(true, 7.0, &mut layers), None);
    assert!(!layers.is_attached(LayerKind::Labels));
}

#[test]
fn checking_above_threshold_shows_labels() {
    let mut labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    labels.set_enabled(false, 11.0, &mut layers);
    assert_eq!(labels.set_enabled(true, 11.0, &mut layers), Some(Action::AddLayer(LayerKind::Labels)));
}

#[test]
fn disabled_labels_stay_hidden_on_zoom_in() {
    let mut labels = LabelVisibility::new(9.0);
    let mut layers = layers();
    labels.set_enabled(false, 7.0, &mut layers);
    assert_eq!(labels.on_zoom(12.0, &mut layers), None);
    assert!(!layers.is_attached(LayerKind::Labels));
}
