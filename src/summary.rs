//! Summary panel builder: the popup content for a selected district.
//!
//! The preview shows at most `limit` sub-units, followed by a remainder line
//! when truncated. The copy block always holds the complete list, so
//! truncation never affects what a user can export. Output depends only on
//! the district id and the index contents; list order is the index's stored
//! order.

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;

use crate::geo::{DistrictId, DistrictIndex};
use crate::style::escape_html;

/// Placeholder shown when a district has no sub-units in the index.
pub const EMPTY_PLACEHOLDER: &str = "No precincts matched";

/// Structured summary of one district, borrowed from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub title: String,
    pub preview: &'a [String],
    pub remaining: usize,
    pub all: &'a [String],
}

/// Look up `district` and split its sub-units into preview and remainder.
#[must_use]
pub fn build_summary<'a>(
    region_abbreviation: &str,
    district: &DistrictId,
    index: &'a DistrictIndex,
    limit: usize,
) -> Summary<'a> {
    let all = index.sub_units(district);
    let shown = all.len().min(limit);
    Summary {
        title: format!("{region_abbreviation} House District {district}"),
        preview: &all[..shown],
        remaining: all.len() - shown,
        all,
    }
}

impl Summary<'_> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Full comma-joined list for copying.
    #[must_use]
    pub fn copy_text(&self) -> String {
        self.all.join(", ")
    }

    /// Render the popup markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let lines = if self.preview.is_empty() {
            format!("<em>{EMPTY_PLACEHOLDER}</em>")
        } else {
            self.preview
                .iter()
                .map(|name| escape_html(name))
                .collect::<Vec<_>>()
                .join("<br>")
        };

        let mut html = String::new();
        html.push_str("<div style=\"font-family:system-ui,Arial;font-size:13px;line-height:1.25\">");
        html.push_str(&format!(
            "<div style=\"font-size:16px;font-weight:800;margin-bottom:6px\">{}</div>",
            escape_html(&self.title)
        ));
        html.push_str(&format!("<div style=\"margin-bottom:6px\"><strong>Precincts:</strong> {}</div>", self.total()));
        html.push_str(
            "<div style=\"max-height:180px;overflow:auto;padding:8px;border:1px solid #ddd;\
border-radius:6px;background:#fafafa\">",
        );
        html.push_str(&lines);
        if self.remaining > 0 {
            html.push_str(&format!("<br><br><strong>\u{2026}and {} more</strong>", self.remaining));
        }
        html.push_str("</div>");
        html.push_str("<div style=\"margin-top:10px\"><strong>Copy precinct list:</strong>");
        html.push_str(
            "<div style=\"padding:8px;border:1px dashed #bbb;border-radius:6px;background:#fff;\
word-break:break-word\">",
        );
        html.push_str(&escape_html(&self.copy_text()));
        html.push_str("</div></div></div>");
        html
    }
}
