//! Selection state machine for district polygons.
//!
//! States: `Unselected`, `Selected(id)`. The only transition is `select`;
//! there is no explicit deselect. Selecting a new district first restores the
//! previous one to its own base style (highlight accent or plain), so at most
//! one district is ever in selection emphasis.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::action::Action;
use crate::geo::DistrictId;
use crate::style::{self, PathStyle};

/// Popup width cap in CSS pixels.
pub const POPUP_MAX_WIDTH: u32 = 420;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(DistrictId),
}

impl Selection {
    #[must_use]
    pub fn selected(&self) -> Option<&DistrictId> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }

    /// Select `district` and open its popup with `markup`.
    ///
    /// Re-selecting the current district only re-opens the popup.
    pub fn select(
        &mut self,
        district: DistrictId,
        base_style: impl Fn(&DistrictId) -> PathStyle,
        markup: String,
    ) -> Vec<Action> {
        let mut actions = Vec::with_capacity(3);
        let popup = Action::OpenPopup { district: district.clone(), markup, max_width: POPUP_MAX_WIDTH };

        if self.selected() == Some(&district) {
            tracing::debug!(%district, "reopening popup for selected district");
            actions.push(popup);
            return actions;
        }

        if let Self::Selected(previous) = std::mem::take(self) {
            tracing::debug!(%previous, "restoring base style");
            let style = base_style(&previous);
            actions.push(Action::SetDistrictStyle { district: previous, style });
        }

        tracing::debug!(%district, "district selected");
        actions.push(Action::SetDistrictStyle { district: district.clone(), style: style::DISTRICT_SELECTED });
        actions.push(popup);
        *self = Self::Selected(district);
        actions
    }
}
