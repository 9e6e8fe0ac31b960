//! Prophet Tracker - Succession probability visualization
//!
//! Prophet Tracker reads the static JSON artifact emitted by the succession
//! simulation job (`apostles.json`) and renders it as charts: current ages,
//! succession probabilities, and probability over time with "leadership era"
//! annotations.
//!
//! # Overview
//!
//! This crate does no simulation and no persistence. The artifact is
//! produced entirely out of process by a Monte Carlo job and treated as
//! immutable input here; every render parses a fresh copy and maps it
//! through pure chart-description builders to an HTML or JSON report.
//!
//! # Pipeline
//!
//! 1. **Load** ([`data`]): one whole-file read and parse. Fails closed on a
//!    missing or malformed artifact, tolerates shape oddities that parse.
//! 2. **Describe** ([`chart`]): pure mappers produce declarative chart
//!    descriptions: axes with fixed domains, series in seniority order,
//!    formatted labels and tooltips, and the timeline's leader annotations.
//! 3. **Render** ([`report`]): summary tiles plus the three descriptions
//!    become a self-contained D3 HTML page or a JSON bundle.
//!
//! # Quick Start
//!
//! ```no_run
//! use prophet_tracker::{data, report};
//!
//! let artifact = data::load("apostles.json")?;
//! report::generate("report.html", &artifact)?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Leadership Eras
//!
//! The timeline chart labels each maximal contiguous run of samples where a
//! single apostle holds the strictly highest probability, placing one label
//! at the run's midpoint. See [`chart::timeline`] for the exact leader and
//! tie-break rules.
//!
//! # Modules
//!
//! - [`data`]: artifact schema, loading, opt-in validation
//! - [`chart`]: declarative chart descriptions and the annotation algorithm
//! - [`report`]: HTML and JSON report writers
//! - [`serve`]: local web server over the rendered report

pub mod chart;
pub mod data;
pub mod report;
pub mod serve;

pub use chart::{downsample, leader_annotations, Annotation, ChartDescription};
pub use data::{Apostle, ApostlesData, Role, TimelineEntry};
pub use report::{PageModel, SummaryTiles};
