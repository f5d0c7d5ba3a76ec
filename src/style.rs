//! Path styles for the overlay layers and markup for label markers.

// ── Styles ──────────────────────────────────────────────────────

/// Stroke and fill for a vector path, in the host renderer's terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

/// Plain district outline.
pub const DISTRICT_DEFAULT: PathStyle =
    PathStyle { color: "#111", weight: 1.0, opacity: 1.0, fill_color: "#000", fill_opacity: 0.08 };

/// Permanent accent for highlight-set districts.
pub const DISTRICT_HIGHLIGHT: PathStyle =
    PathStyle { color: "#FF9999", weight: 3.0, opacity: 1.0, fill_color: "#FF9999", fill_opacity: 0.4 };

/// Selection emphasis, layered over whichever base style the district had.
pub const DISTRICT_SELECTED: PathStyle =
    PathStyle { color: "#111", weight: 3.0, opacity: 1.0, fill_color: "#000", fill_opacity: 0.22 };

/// Sub-unit outlines. Unfilled.
pub const SUB_UNIT: PathStyle =
    PathStyle { color: "#555", weight: 1.0, opacity: 0.6, fill_color: "#555", fill_opacity: 0.0 };

// ── Markup ──────────────────────────────────────────────────────

/// CSS class the host attaches to label markers.
pub const LABEL_CLASS: &str = "district-label";

/// Inline markup for a district label marker.
#[must_use]
pub fn label_markup(text: &str) -> String {
    format!(
        "<div style=\"font-size:11px;font-weight:800;color:#111;background:rgba(255,255,255,0.75);\
border:1px solid rgba(0,0,0,0.25);border-radius:4px;padding:1px 5px;line-height:14px;text-align:center;\">{}</div>",
        escape_html(text)
    )
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
