use super::*;

// =============================================================
// Helpers
// =============================================================

/// District "117" is a highlight-set member; everything else is plain.
fn base_style(id: &DistrictId) -> PathStyle {
    if id.as_str() == "117" { style::DISTRICT_HIGHLIGHT } else { style::DISTRICT_DEFAULT }
}

fn id(raw: &str) -> DistrictId {
    DistrictId::new(raw)
}

fn styled(actions: &[Action]) -> Vec<(DistrictId, PathStyle)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::SetDistrictStyle { district, style } => Some((district.clone(), *style)),
            _ => None,
        })
        .collect()
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn default_is_unselected() {
    assert_eq!(Selection::default(), Selection::Unselected);
    assert_eq!(Selection::default().selected(), None);
}

#[test]
fn first_selection_applies_emphasis_and_opens_popup() {
    let mut sel = Selection::default();
    let actions = sel.select(id("5"), base_style, "<p>5</p>".into());

    assert_eq!(
        actions,
        vec![
            Action::SetDistrictStyle { district: id("5"), style: style::DISTRICT_SELECTED },
            Action::OpenPopup { district: id("5"), markup: "<p>5</p>".into(), max_width: POPUP_MAX_WIDTH },
        ]
    );
    assert_eq!(sel.selected(), Some(&id("5")));
}

#[test]
fn selecting_another_restores_previous_plain_style_first() {
    let mut sel = Selection::default();
    sel.select(id("5"), base_style, String::new());
    let actions = sel.select(id("6"), base_style, String::new());

    assert_eq!(styled(&actions), vec![(id("5"), style::DISTRICT_DEFAULT), (id("6"), style::DISTRICT_SELECTED)]);
    assert_eq!(sel.selected(), Some(&id("6")));
}

#[test]
fn highlight_member_reverts_to_highlight_not_plain() {
    let mut sel = Selection::default();
    sel.select(id("117"), base_style, String::new());
    let actions = sel.select(id("6"), base_style, String::new());

    assert_eq!(styled(&actions)[0], (id("117"), style::DISTRICT_HIGHLIGHT));
}

#[test]
fn reselecting_current_only_reopens_popup() {
    let mut sel = Selection::default();
    sel.select(id("5"), base_style, "a".into());
    let actions = sel.select(id("5"), base_style, "b".into());

    assert_eq!(actions, vec![Action::OpenPopup { district: id("5"), markup: "b".into(), max_width: POPUP_MAX_WIDTH }]);
    assert_eq!(sel.selected(), Some(&id("5")));
}

#[test]
fn a_then_b_then_a_keeps_single_emphasis() {
    let mut sel = Selection::default();
    let mut emphasized: std::collections::HashMap<DistrictId, PathStyle> = std::collections::HashMap::new();

    for next in ["117", "6", "117"] {
        for (district, style) in styled(&sel.select(id(next), base_style, String::new())) {
            emphasized.insert(district, style);
        }
        let selected_count = emphasized
            .values()
            .filter(|s| **s == style::DISTRICT_SELECTED)
            .count();
        assert_eq!(selected_count, 1);
    }

    assert_eq!(emphasized[&id("117")], style::DISTRICT_SELECTED);
    assert_eq!(emphasized[&id("6")], style::DISTRICT_DEFAULT);
}
