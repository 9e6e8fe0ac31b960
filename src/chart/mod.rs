//! Declarative chart descriptions
//!
//! Each submodule is a pure mapper from artifact data to a
//! [`ChartDescription`]: axes (with fixed domains where the design calls for
//! them), series, per-point labels and tooltip fields, and, for the timeline,
//! leader annotations. No mapper touches I/O or shared state; whatever
//! actually draws the chart (the D3 report page, or any other consumer of
//! the JSON bundle) gets everything it needs from the description.
//!
//! - [`age`]: current-age bar chart, Y fixed to [50,105]
//! - [`probability`]: succession-probability bar chart over contenders only,
//!   Y fixed to [0,100]
//! - [`timeline`]: probability-over-time line chart with downsampling and
//!   segment-leader annotations

pub mod age;
pub mod probability;
pub mod timeline;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub use timeline::{downsample, leader_annotations, Annotation};

/// Line colors for apostle series, assigned by position in seniority order.
pub const PALETTE: [&str; 15] = [
    "#1f77b4", // blue
    "#ff7f0e", // orange
    "#2ca02c", // green
    "#d62728", // red
    "#9467bd", // purple
    "#8c564b", // brown
    "#e377c2", // pink
    "#7f7f7f", // gray
    "#bcbd22", // olive
    "#17becf", // cyan
    "#393b79", // dark blue
    "#637939", // dark green
    "#8c6d31", // dark gold
    "#843c39", // dark red
    "#7b4173", // dark purple
];

/// Color for the series at `index`, cycling when the palette runs out.
pub fn color_of(palette: &[&'static str], index: usize) -> &'static str {
    palette[index % palette.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Axis description. A `domain` of `Some([lo, hi])` is fixed: renderers clip
/// out-of-range values rather than rescaling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    /// Explicit tick positions (category or date values) with display labels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ticks: Vec<Tick>,
    /// Suffix appended to numeric tick labels, e.g. "%".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_suffix: Option<String>,
}

impl Axis {
    pub fn auto() -> Self {
        Axis {
            label: None,
            domain: None,
            ticks: Vec::new(),
            tick_suffix: None,
        }
    }

    pub fn fixed(lo: f64, hi: f64) -> Self {
        Axis {
            domain: Some([lo, hi]),
            ..Axis::auto()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub value: String,
    pub label: String,
}

/// One line in a tooltip: a caption and an already-formatted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipField {
    pub label: String,
    pub value: String,
}

impl TooltipField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        TooltipField {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single plotted point. `label` is the on-chart label (bar tops); tooltip
/// fields carry the hover detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: String,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<TooltipField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<Point>,
}

/// Language-neutral chart description: everything a renderer needs, nothing
/// about how to draw it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub title: String,
    pub subtitle: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// Parse the date prefix of an artifact date string. Timeline dates may be
/// day-precision ("2026-03-01") or month-precision ("2026-03").
fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    if let Ok(d) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        return Some(d);
    }
    let month = s.get(..7).unwrap_or(s);
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// "March 5, 1951" style, falling back to the raw string when unparseable.
pub fn format_long_date(s: &str) -> String {
    match parse_date(s) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => s.to_string(),
    }
}

/// "Mar 1951" style for timeline tooltips.
pub fn format_month_year(s: &str) -> String {
    match parse_date(s) {
        Some(d) => d.format("%b %Y").to_string(),
        None => s.to_string(),
    }
}

/// Calendar year, for axis tick labels.
pub fn year_of(s: &str) -> Option<i32> {
    parse_date(s).map(|d| d.year())
}

/// True for dates in January; the timeline X axis ticks on those.
pub fn is_january(s: &str) -> bool {
    parse_date(s).map(|d| d.month() == 1).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PALETTE TESTS
    // ==========================================================================

    #[test]
    fn test_color_of_indexes_by_position() {
        assert_eq!(color_of(&PALETTE, 0), "#1f77b4");
        assert_eq!(color_of(&PALETTE, 14), "#7b4173");
    }

    #[test]
    fn test_color_of_wraps_past_palette_end() {
        assert_eq!(color_of(&PALETTE, 15), color_of(&PALETTE, 0));
        assert_eq!(color_of(&PALETTE, 31), color_of(&PALETTE, 1));
    }

    // ==========================================================================
    // DATE FORMATTING TESTS
    // ==========================================================================

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("1932-08-12"), "August 12, 1932");
        assert_eq!(format_long_date("1984-05-03"), "May 3, 1984");
    }

    #[test]
    fn test_format_month_year_day_and_month_precision() {
        assert_eq!(format_month_year("2026-03-01"), "Mar 2026");
        assert_eq!(format_month_year("2026-03"), "Mar 2026");
    }

    #[test]
    fn test_unparseable_date_passes_through() {
        assert_eq!(format_long_date("soon"), "soon");
        assert_eq!(format_month_year("soon"), "soon");
        assert_eq!(year_of("soon"), None);
    }

    #[test]
    fn test_timestamp_prefix_parses() {
        assert_eq!(year_of("2026-03-01T06:00:00Z"), Some(2026));
    }

    #[test]
    fn test_is_january() {
        assert!(is_january("2026-01-01"));
        assert!(is_january("2026-01"));
        assert!(!is_january("2026-02-01"));
    }

    #[test]
    fn test_fixed_axis_domain() {
        let axis = Axis::fixed(50.0, 105.0);
        assert_eq!(axis.domain, Some([50.0, 105.0]));
        assert!(Axis::auto().domain.is_none());
    }
}
