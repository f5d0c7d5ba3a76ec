//! Address search pipeline: ticketing, region filtering, and result branching.
//!
//! DESIGN
//! ======
//! A search is split around its only suspension point. `SearchState::begin`
//! normalizes the query and issues a ticket carrying a monotonic sequence
//! number; the host awaits the geocoder; `branch` then decides between
//! no-match, a single auto-applied result, and a disambiguation list.
//! Whether a resolution older than the latest issued ticket may still touch
//! the map is governed by `StalePolicy`.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::config::{Region, StalePolicy};
use crate::geo::LatLng;
use crate::geocode::{self, Candidate, GeocodeQuery};

/// One issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: GeocodeQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// The geocoder returned nothing.
    NoResults,
    /// Results existed but none was a settlement inside the region.
    OutsideRegion,
}

impl NoMatchReason {
    /// User-facing hint for this reason.
    #[must_use]
    pub fn hint(self, region: &Region) -> String {
        match self {
            Self::NoResults => format!(
                "No match found. Try adding your city/town and '{}' (example: '{}').",
                region.abbreviation, region.example_query
            ),
            Self::OutsideRegion => format!(
                "No {} match found. Try adding city/town + {} (example: '{}').",
                region.name, region.abbreviation, region.example_query
            ),
        }
    }
}

/// Final state of one search invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank input; no request was issued.
    Ignored,
    /// A single match was applied to the viewport.
    Applied(LatLng),
    /// Several matches were listed for the user to choose from.
    Disambiguation(usize),
    NoMatch(NoMatchReason),
    /// The geocoder call failed; the map was left untouched.
    Failed,
    /// A newer search was issued before this one resolved; discarded.
    Superseded,
}

/// Filtered geocoder results, ready to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    NoMatch(NoMatchReason),
    Single(Candidate),
    Multiple(Vec<Candidate>),
}

/// Filter raw candidates to the region and pick the branch.
#[must_use]
pub fn branch(raw: Vec<Candidate>, region: &Region) -> Branch {
    if raw.is_empty() {
        return Branch::NoMatch(NoMatchReason::NoResults);
    }
    let mut matches: Vec<Candidate> = raw.into_iter().filter(|c| c.is_in_region(region)).collect();
    match matches.len() {
        0 => Branch::NoMatch(NoMatchReason::OutsideRegion),
        1 => Branch::Single(matches.remove(0)),
        _ => Branch::Multiple(matches),
    }
}

/// Search bookkeeping owned by the viewer: sequence counter and the
/// candidates currently offered for disambiguation.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    issued: u64,
    policy: StalePolicy,
    candidates: Vec<Candidate>,
}

impl SearchState {
    #[must_use]
    pub fn new(policy: StalePolicy) -> Self {
        Self { issued: 0, policy, candidates: Vec::new() }
    }

    /// Normalize `raw` and issue a ticket. Blank input issues nothing.
    pub fn begin(&mut self, raw: &str, region: &Region) -> Option<SearchTicket> {
        let text = geocode::normalize_query(raw, region)?;
        self.issued += 1;
        tracing::info!(seq = self.issued, query = %text, "address search issued");
        Some(SearchTicket { seq: self.issued, query: GeocodeQuery::bounded(text, region) })
    }

    /// Sequence number of the most recently issued ticket.
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.issued
    }

    /// Whether `ticket` must be discarded under the configured policy.
    #[must_use]
    pub fn is_stale(&self, ticket: &SearchTicket) -> bool {
        match self.policy {
            StalePolicy::LastResolvedWins => false,
            StalePolicy::LatestIssuedOnly => ticket.seq < self.issued,
        }
    }

    /// Candidates currently listed for disambiguation.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
    }
}
