use super::*;
use crate::geocode::Address;

// =============================================================
// Helpers
// =============================================================

fn region() -> Region {
    Region::default()
}

fn nc_town(name: &str) -> Candidate {
    Candidate {
        display_name: format!("{name}, North Carolina"),
        lat: "35.9".into(),
        lon: "-79.0".into(),
        address: Address { state: Some("North Carolina".into()), town: Some(name.into()), ..Address::default() },
    }
}

fn county_only() -> Candidate {
    Candidate {
        display_name: "Wake County, North Carolina".into(),
        lat: "35.8".into(),
        lon: "-78.6".into(),
        address: Address { state: Some("North Carolina".into()), county: Some("Wake County".into()), ..Address::default() },
    }
}

fn virginia() -> Candidate {
    Candidate {
        display_name: "Danville, Virginia".into(),
        lat: "36.58".into(),
        lon: "-79.39".into(),
        address: Address { state: Some("Virginia".into()), city: Some("Danville".into()), ..Address::default() },
    }
}

// =============================================================
// branch
// =============================================================

#[test]
fn empty_results_are_no_results() {
    assert_eq!(branch(vec![], &region()), Branch::NoMatch(NoMatchReason::NoResults));
}

#[test]
fn filtered_out_results_are_outside_region() {
    assert_eq!(branch(vec![county_only(), virginia()], &region()), Branch::NoMatch(NoMatchReason::OutsideRegion));
}

#[test]
fn single_survivor_is_single() {
    let result = branch(vec![virginia(), nc_town("Mebane"), county_only()], &region());
    assert_eq!(result, Branch::Single(nc_town("Mebane")));
}

#[test]
fn several_survivors_keep_service_order() {
    let result = branch(vec![nc_town("Cary"), virginia(), nc_town("Apex"), nc_town("Holly Springs")], &region());
    let Branch::Multiple(list) = result else {
        panic!("expected multiple, got {result:?}");
    };
    let names: Vec<_> = list.iter().map(|c| c.address.town.as_deref().unwrap()).collect();
    assert_eq!(names, ["Cary", "Apex", "Holly Springs"]);
}

// =============================================================
// Hints
// =============================================================

#[test]
fn hints_name_region_and_example() {
    let no_results = NoMatchReason::NoResults.hint(&region());
    assert_eq!(no_results, "No match found. Try adding your city/town and 'NC' (example: 'Mebane, NC').");
    let outside = NoMatchReason::OutsideRegion.hint(&region());
    assert!(outside.starts_with("No North Carolina match found."));
}

// =============================================================
// SearchState
// =============================================================

#[test]
fn blank_query_issues_no_ticket() {
    let mut state = SearchState::default();
    assert_eq!(state.begin("  \t ", &region()), None);
    assert_eq!(state.latest(), 0);
}

#[test]
fn tickets_are_monotonic_and_normalized() {
    let mut state = SearchState::default();
    let first = state.begin("123 Main St", &region()).unwrap();
    let second = state.begin("Mebane, nc", &region()).unwrap();
    assert_eq!(first.seq, 1);
    assert_eq!(second.seq, 2);
    assert_eq!(first.query.text, "123 Main St, NC");
    assert_eq!(second.query.text, "Mebane, nc");
    assert_eq!(first.query.limit, 5);
}

#[test]
fn last_resolved_wins_never_marks_stale() {
    let mut state = SearchState::new(StalePolicy::LastResolvedWins);
    let old = state.begin("a", &region()).unwrap();
    state.begin("b", &region()).unwrap();
    assert!(!state.is_stale(&old));
}

#[test]
fn latest_issued_only_marks_older_tickets_stale() {
    let mut state = SearchState::new(StalePolicy::LatestIssuedOnly);
    let old = state.begin("a", &region()).unwrap();
    let new = state.begin("b", &region()).unwrap();
    assert!(state.is_stale(&old));
    assert!(!state.is_stale(&new));
}

#[test]
fn candidates_can_be_set_and_cleared() {
    let mut state = SearchState::default();
    state.set_candidates(vec![nc_town("Cary"), nc_town("Apex")]);
    assert_eq!(state.candidates().len(), 2);
    state.clear_candidates();
    assert!(state.candidates().is_empty());
}
