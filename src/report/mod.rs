//! Report generation
//!
//! Composes the page model (summary tiles plus the three chart
//! descriptions) from one freshly loaded artifact, then writes it in one of
//! two formats:
//!
//! - **HTML**: self-contained page with D3 visualizations and site chrome
//! - **JSON**: the serialized page model for programmatic consumption
//!
//! # Usage
//!
//! ```ignore
//! use prophet_tracker::report;
//!
//! // Picks format by extension; anything but .json renders HTML
//! report::generate("report.html", &data)?;
//! report::generate("charts.json", &data)?;
//! ```

pub mod html;
pub mod json;

use crate::chart::{self, ChartDescription};
use crate::data::ApostlesData;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Write a report in the format implied by the file extension.
pub fn generate<P: AsRef<Path>>(path: P, data: &ApostlesData) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, data),
        _ => html::write(&mut file, data),
    }
}

/// The three headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTiles {
    pub total_apostles: usize,
    /// Mean age, rounded to the nearest whole year.
    pub average_age: i64,
    pub simulation_runs: u64,
}

impl SummaryTiles {
    pub fn from_data(data: &ApostlesData) -> Self {
        SummaryTiles {
            total_apostles: data.metadata.total_apostles,
            average_age: data.mean_age().round() as i64,
            simulation_runs: data.metadata.simulation_runs,
        }
    }
}

/// Everything a renderer needs for the page, derived from one artifact read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    pub generated_at: String,
    pub description: String,
    pub summary: SummaryTiles,
    pub age_chart: ChartDescription,
    pub probability_chart: ChartDescription,
    pub timeline_chart: ChartDescription,
}

impl PageModel {
    pub fn compose(data: &ApostlesData) -> Self {
        PageModel {
            generated_at: data.metadata.generated_at.clone(),
            description: data.metadata.description.clone(),
            summary: SummaryTiles::from_data(data),
            age_chart: chart::age::describe(&data.apostles),
            probability_chart: chart::probability::describe(&data.apostles),
            timeline_chart: chart::timeline::describe(&data.timeline, &data.apostles),
        }
    }
}
