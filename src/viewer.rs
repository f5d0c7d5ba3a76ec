//! Viewer core: owns all session state and maps each UI event to one
//! state transition.
//!
//! DESIGN
//! ======
//! `ViewerCore` is driven by a single event loop through `&mut self`; there
//! are no locks and no ambient globals. Each handler documents its effect and
//! returns the `Action`s the host must apply, in order. The core keeps its
//! own mirror of what the host shows (attached layers, selected district,
//! marker, disambiguation list) so transitions can be decided without
//! querying the renderer.
//!
//! Searches are split into `begin_search` / `resolve_search` so a host can
//! keep processing other events while the geocoder call is in flight.
//! `search` is the sequential convenience wrapper.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use std::collections::HashSet;

use crate::action::{Action, LayerKind, NoticeLevel};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::geo::{DistrictId, DistrictIndex, LatLng};
use crate::geocode::{Candidate, Geocoder};
use crate::labels::LabelVisibility;
use crate::layers::LayerSet;
use crate::loader::{self, DataStore, GeoData};
use crate::search::{self, Branch, SearchOutcome, SearchState, SearchTicket};
use crate::selection::Selection;
use crate::summary;

/// Blocking alert shown when initialization fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Map failed to load. Check the console for details.";

/// Hint shown when the geocoder call itself fails.
pub const LOOKUP_FAILURE_MESSAGE: &str = "Address lookup failed. Please try again.";

/// Outcome of a resolved search plus the actions to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub outcome: SearchOutcome,
    pub actions: Vec<Action>,
}

impl Resolved {
    fn new(outcome: SearchOutcome, actions: Vec<Action>) -> Self {
        Self { outcome, actions }
    }
}

pub struct ViewerCore {
    config: ViewerConfig,
    index: DistrictIndex,
    layers: LayerSet,
    selection: Selection,
    labels: LabelVisibility,
    search: SearchState,
    marker: Option<LatLng>,
    zoom: f64,
}

impl ViewerCore {
    // --- Initialization ---

    /// Build overlays from loaded data and produce the initial view.
    ///
    /// The district and label layers are attached immediately, the viewport
    /// is fitted to the districts, and labels are then evaluated against the
    /// initial zoom. The host reports the post-fit zoom via `on_zoom_end`.
    #[must_use]
    pub fn initialize(config: ViewerConfig, data: GeoData) -> (Self, Vec<Action>) {
        let highlight: HashSet<DistrictId> = config
            .highlight_districts
            .iter()
            .map(|raw| DistrictId::new(raw))
            .collect();
        let layers = LayerSet::build(data.districts, data.sub_units, data.labels, &highlight);

        let mut core = Self {
            labels: LabelVisibility::new(config.label_min_zoom),
            search: SearchState::new(config.stale_policy),
            zoom: config.initial_zoom,
            index: data.index,
            layers,
            selection: Selection::default(),
            marker: None,
            config,
        };

        let mut actions = vec![Action::SetView { center: core.config.initial_center, zoom: core.config.initial_zoom }];
        actions.extend(core.layers.attach(LayerKind::Districts));
        actions.extend(core.layers.attach(LayerKind::Labels));
        if let Some(bounds) = core.layers.district_bounds() {
            actions.push(Action::FitBounds(bounds));
        }
        actions.extend(core.labels.on_zoom(core.zoom, &mut core.layers));

        tracing::info!(districts = core.layers.districts().len(), zoom = core.zoom, "viewer initialized");
        (core, actions)
    }

    /// Load all geo data from `store`, then initialize.
    ///
    /// # Errors
    ///
    /// Returns the load error; no overlay is built. The host should show
    /// [`load_failure_alert`] and stop.
    pub async fn start(config: ViewerConfig, store: &dyn DataStore) -> Result<(Self, Vec<Action>), ViewerError> {
        let data = loader::load(store, &config.documents).await?;
        Ok(Self::initialize(config, data))
    }

    // --- District selection ---

    /// A district polygon was clicked. Unknown ids are ignored.
    pub fn on_district_click(&mut self, district: &DistrictId) -> Vec<Action> {
        if !self.layers.contains_district(district) {
            tracing::warn!(%district, "click on unknown district ignored");
            return Vec::new();
        }
        let markup = summary::build_summary(
            &self.config.region.abbreviation,
            district,
            &self.index,
            self.config.preview_limit,
        )
        .to_markup();
        let layers = &self.layers;
        self.selection
            .select(district.clone(), |id| layers.base_style(id), markup)
    }

    // --- Layer visibility ---

    /// The viewport finished zooming.
    pub fn on_zoom_end(&mut self, zoom: f64) -> Vec<Action> {
        self.zoom = zoom;
        self.labels
            .on_zoom(zoom, &mut self.layers)
            .into_iter()
            .collect()
    }

    /// The sub-unit checkbox changed.
    pub fn on_sub_units_toggled(&mut self, checked: bool) -> Vec<Action> {
        let action = if checked {
            self.layers.attach(LayerKind::SubUnits)
        } else {
            self.layers.detach(LayerKind::SubUnits)
        };
        action.into_iter().collect()
    }

    /// The label checkbox changed. Checking re-runs the zoom threshold.
    pub fn on_labels_toggled(&mut self, checked: bool) -> Vec<Action> {
        self.labels
            .set_enabled(checked, self.zoom, &mut self.layers)
            .into_iter()
            .collect()
    }

    // --- Address search ---

    /// Issue a search for `raw`. Returns `None` (and issues nothing) for blank input.
    pub fn begin_search(&mut self, raw: &str) -> Option<SearchTicket> {
        self.search.begin(raw, &self.config.region)
    }

    /// Apply the geocoder's answer for `ticket`.
    ///
    /// Geocoder failures become a non-blocking hint and leave the map
    /// untouched. Stale tickets are discarded only under
    /// `StalePolicy::LatestIssuedOnly`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCandidate` when the single surviving match has an
    /// unparseable coordinate; nothing is changed in that case.
    pub fn resolve_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<Candidate>, ViewerError>,
    ) -> Result<Resolved, ViewerError> {
        if self.search.is_stale(ticket) {
            tracing::warn!(seq = ticket.seq, latest = self.search.latest(), "stale search result discarded");
            return Ok(Resolved::new(SearchOutcome::Superseded, Vec::new()));
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(seq = ticket.seq, error = %e, code = e.error_code(), "geocoding failed");
                return Ok(Resolved::new(SearchOutcome::Failed, vec![hint(LOOKUP_FAILURE_MESSAGE.to_string())]));
            }
        };
        let raw_count = raw.len();

        match search::branch(raw, &self.config.region) {
            Branch::NoMatch(reason) => {
                tracing::warn!(seq = ticket.seq, raw_count, ?reason, "address search found no match");
                self.search.clear_candidates();
                let message = reason.hint(&self.config.region);
                Ok(Resolved::new(SearchOutcome::NoMatch(reason), vec![Action::ClearCandidates, hint(message)]))
            }
            Branch::Single(candidate) => {
                let position = candidate.position()?;
                tracing::info!(seq = ticket.seq, label = %candidate.display_name, "address search matched");
                self.search.clear_candidates();
                let mut actions = vec![Action::ClearCandidates];
                actions.extend(self.place_marker(position));
                Ok(Resolved::new(SearchOutcome::Applied(position), actions))
            }
            Branch::Multiple(candidates) => {
                let count = candidates.len();
                tracing::info!(seq = ticket.seq, count, "address search needs disambiguation");
                let labels = candidates.iter().map(|c| c.display_name.clone()).collect();
                self.search.set_candidates(candidates);
                Ok(Resolved::new(SearchOutcome::Disambiguation(count), vec![Action::ShowCandidates(labels)]))
            }
        }
    }

    /// Run a whole search against `geocoder`.
    ///
    /// Holds `&mut self` across the request; hosts that must keep handling
    /// events meanwhile use `begin_search` / `resolve_search` instead.
    ///
    /// # Errors
    ///
    /// See [`ViewerCore::resolve_search`].
    pub async fn search(&mut self, geocoder: &dyn Geocoder, raw: &str) -> Result<Resolved, ViewerError> {
        let Some(ticket) = self.begin_search(raw) else {
            return Ok(Resolved::new(SearchOutcome::Ignored, Vec::new()));
        };
        let result = geocoder.geocode(&ticket.query).await;
        self.resolve_search(&ticket, result)
    }

    /// The user picked entry `index` from the disambiguation list.
    /// Out-of-range picks are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCandidate` if the chosen entry's coordinate does not
    /// parse; the list stays open.
    pub fn on_candidate_chosen(&mut self, index: usize) -> Result<Vec<Action>, ViewerError> {
        let Some(candidate) = self.search.candidates().get(index).cloned() else {
            tracing::warn!(index, available = self.search.candidates().len(), "candidate pick out of range");
            return Ok(Vec::new());
        };
        let mut actions = self.apply_candidate(&candidate)?;
        self.search.clear_candidates();
        actions.push(Action::ClearCandidates);
        Ok(actions)
    }

    // --- Result application ---

    /// Move the viewport to `candidate` and mark it, replacing any prior marker.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCandidate` if latitude or longitude is not a number.
    pub fn apply_candidate(&mut self, candidate: &Candidate) -> Result<Vec<Action>, ViewerError> {
        let position = candidate.position()?;
        Ok(self.place_marker(position))
    }

    fn place_marker(&mut self, position: LatLng) -> Vec<Action> {
        let mut actions = Vec::with_capacity(3);
        if self.marker.take().is_some() {
            actions.push(Action::RemoveMarker);
        }
        actions.push(Action::PlaceMarker(position));
        actions.push(Action::SetView { center: position, zoom: self.config.result_zoom });
        self.marker = Some(position);
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &DistrictIndex {
        &self.index
    }

    #[must_use]
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// The currently selected district, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&DistrictId> {
        self.selection.selected()
    }

    /// Position of the search marker, if one is placed.
    #[must_use]
    pub fn marker(&self) -> Option<LatLng> {
        self.marker
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Candidates currently listed for disambiguation.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        self.search.candidates()
    }
}

/// The blocking alert a host shows when [`ViewerCore::start`] fails.
#[must_use]
pub fn load_failure_alert() -> Action {
    Action::Notify { level: NoticeLevel::Fatal, message: LOAD_FAILURE_MESSAGE.to_string() }
}

fn hint(message: String) -> Action {
    Action::Notify { level: NoticeLevel::Hint, message }
}
