//! Label visibility controller: zoom-driven on/off switch for the label layer.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use crate::action::{Action, LayerKind};
use crate::layers::LayerSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Show,
    Hide,
}

/// Labels show at `zoom >= min_zoom` unless the user switched them off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelVisibility {
    min_zoom: f64,
    enabled: bool,
}

impl LabelVisibility {
    #[must_use]
    pub fn new(min_zoom: f64) -> Self {
        Self { min_zoom, enabled: true }
    }

    /// Threshold check only; ignores the manual toggle.
    #[must_use]
    pub fn evaluate(&self, zoom: f64) -> Visibility {
        if zoom >= self.min_zoom { Visibility::Show } else { Visibility::Hide }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-evaluate after a zoom change. A disabled controller leaves the
    /// layer detached.
    pub fn on_zoom(&self, zoom: f64, layers: &mut LayerSet) -> Option<Action> {
        if !self.enabled {
            return layers.detach(LayerKind::Labels);
        }
        let action = match self.evaluate(zoom) {
            Visibility::Show => layers.attach(LayerKind::Labels),
            Visibility::Hide => layers.detach(LayerKind::Labels),
        };
        if action.is_some() {
            tracing::debug!(zoom, visible = layers.is_attached(LayerKind::Labels), "label visibility changed");
        }
        action
    }

    /// Manual toggle. Unchecking detaches; checking re-runs the threshold
    /// instead of showing unconditionally.
    pub fn set_enabled(&mut self, enabled: bool, zoom: f64, layers: &mut LayerSet) -> Option<Action> {
        self.enabled = enabled;
        self.on_zoom(zoom, layers)
    }
}
