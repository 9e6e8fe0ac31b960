//! Artifact schema and loading
//!
//! The simulation job (external to this tool) emits a single JSON artifact,
//! `apostles.json`, and everything here treats it as immutable input:
//!
//! - `metadata`: when it was generated, how many simulation runs produced it
//! - `apostles`: one entry per official, sorted by ascending seniority
//! - `timeline`: chronological snapshots mapping each last name to a
//!   probability percent for that date
//!
//! # Roles
//!
//! On the wire the incumbent is the apostle *without* `probability` /
//! `probabilityPercent` fields. Rather than duck-typing on field presence,
//! the parsed model carries an explicit [`Role`]: either `Incumbent` or
//! `Contender` with both probability forms. Serialization round-trips back
//! to the optional-field wire shape.
//!
//! # Tolerance
//!
//! Loading fails closed on missing or unparseable artifacts and nothing
//! else. Shape problems that still parse (percentages not summing to 100,
//! a non-senior apostle without a probability) render visually wrong but
//! never crash. [`validate`] exists for callers who want those invariants
//! checked up front; the render path never calls it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Artifact-level metadata written by the simulation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: String,
    pub total_apostles: usize,
    pub simulation_runs: u64,
    pub description: String,
}

/// Succession role, made explicit instead of inferred from optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// Current office holder; carries no succession probability by convention.
    Incumbent,
    /// Everyone else, with probability in [0,1] and its percent form.
    Contender {
        probability: f64,
        probability_percent: f64,
    },
}

impl Role {
    pub fn is_incumbent(&self) -> bool {
        matches!(self, Role::Incumbent)
    }

    /// Percent form of the succession probability, if any.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Role::Incumbent => None,
            Role::Contender {
                probability_percent,
                ..
            } => Some(*probability_percent),
        }
    }
}

/// One tracked official.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawApostle", into = "RawApostle")]
pub struct Apostle {
    pub id: u32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub full_name: String,
    /// Fractional years.
    pub age: f64,
    /// ISO-8601 date string.
    pub birth_date: String,
    /// ISO-8601 date string.
    pub ordination_date: String,
    pub years_in_quorum: u32,
    /// Rank by ordination date; 1 = most senior. Unique across the list.
    pub seniority: u32,
    pub role: Role,
}

/// Wire shape: role flattened into optional probability fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApostle {
    id: u32,
    first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    middle_name: Option<String>,
    last_name: String,
    full_name: String,
    age: f64,
    birth_date: String,
    ordination_date: String,
    years_in_quorum: u32,
    seniority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    probability_percent: Option<f64>,
}

impl From<RawApostle> for Apostle {
    fn from(raw: RawApostle) -> Self {
        let role = match raw.probability {
            Some(probability) => Role::Contender {
                probability,
                probability_percent: raw
                    .probability_percent
                    .unwrap_or(probability * 100.0),
            },
            None => Role::Incumbent,
        };
        Apostle {
            id: raw.id,
            first_name: raw.first_name,
            middle_name: raw.middle_name,
            last_name: raw.last_name,
            full_name: raw.full_name,
            age: raw.age,
            birth_date: raw.birth_date,
            ordination_date: raw.ordination_date,
            years_in_quorum: raw.years_in_quorum,
            seniority: raw.seniority,
            role,
        }
    }
}

impl From<Apostle> for RawApostle {
    fn from(apostle: Apostle) -> Self {
        let (probability, probability_percent) = match apostle.role {
            Role::Incumbent => (None, None),
            Role::Contender {
                probability,
                probability_percent,
            } => (Some(probability), Some(probability_percent)),
        };
        RawApostle {
            id: apostle.id,
            first_name: apostle.first_name,
            middle_name: apostle.middle_name,
            last_name: apostle.last_name,
            full_name: apostle.full_name,
            age: apostle.age,
            birth_date: apostle.birth_date,
            ordination_date: apostle.ordination_date,
            years_in_quorum: apostle.years_in_quorum,
            seniority: apostle.seniority,
            probability,
            probability_percent,
        }
    }
}

/// One probability snapshot: a date plus last-name → percent values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl TimelineEntry {
    /// Percent value for a name at this date; absent names read as 0.
    pub fn value_of(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }
}

/// The artifact root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApostlesData {
    pub metadata: Metadata,
    pub apostles: Vec<Apostle>,
    pub timeline: Vec<TimelineEntry>,
}

impl ApostlesData {
    /// Arithmetic mean age across the list. 0 for an empty list.
    pub fn mean_age(&self) -> f64 {
        if self.apostles.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.apostles.iter().map(|a| a.age).sum();
        sum / self.apostles.len() as f64
    }

    /// Last names in seniority (input) order; the timeline is keyed by these.
    pub fn last_names(&self) -> Vec<String> {
        self.apostles.iter().map(|a| a.last_name.clone()).collect()
    }
}

/// Read and parse the artifact. Fails closed: a missing file or malformed
/// JSON is an error, there is no partial result.
pub fn load<P: AsRef<Path>>(path: P) -> io::Result<ApostlesData> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}

/// Parse an in-memory artifact.
pub fn parse(contents: &str) -> io::Result<ApostlesData> {
    serde_json::from_str(contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// How far per-date percentages may drift from 100 before `validate` flags them.
const SUM_TOLERANCE: f64 = 2.0;

/// Check artifact invariants the renderer deliberately does not enforce.
/// Returns human-readable findings; empty means clean.
pub fn validate(data: &ApostlesData) -> Vec<String> {
    let mut issues = Vec::new();
    let n = data.apostles.len();

    if data.metadata.total_apostles != n {
        issues.push(format!(
            "metadata.totalApostles is {} but {} apostles are listed",
            data.metadata.total_apostles, n
        ));
    }

    // Seniority must be a permutation of 1..=N in ascending order
    let mut seen = vec![false; n];
    for (i, apostle) in data.apostles.iter().enumerate() {
        let s = apostle.seniority as usize;
        if s < 1 || s > n {
            issues.push(format!(
                "{}: seniority {} outside 1..={}",
                apostle.last_name, s, n
            ));
        } else if seen[s - 1] {
            issues.push(format!("{}: duplicate seniority {}", apostle.last_name, s));
        } else {
            seen[s - 1] = true;
        }
        if i + 1 != s {
            issues.push(format!(
                "{}: listed at position {} but seniority is {}",
                apostle.last_name,
                i + 1,
                s
            ));
        }
    }

    for apostle in &data.apostles {
        match &apostle.role {
            Role::Incumbent => {
                if apostle.seniority != 1 {
                    issues.push(format!(
                        "{}: no probability but seniority {} (only the most senior should lack one)",
                        apostle.last_name, apostle.seniority
                    ));
                }
            }
            Role::Contender {
                probability,
                probability_percent,
            } => {
                if apostle.seniority == 1 {
                    issues.push(format!(
                        "{}: most senior apostle carries a probability",
                        apostle.last_name
                    ));
                }
                if !(0.0..=1.0).contains(probability) {
                    issues.push(format!(
                        "{}: probability {} outside [0,1]",
                        apostle.last_name, probability
                    ));
                }
                if !(0.0..=100.0).contains(probability_percent) {
                    issues.push(format!(
                        "{}: probabilityPercent {} outside [0,100]",
                        apostle.last_name, probability_percent
                    ));
                }
                if (probability * 100.0 - probability_percent).abs() > 0.5 {
                    issues.push(format!(
                        "{}: probability {} and probabilityPercent {} disagree",
                        apostle.last_name, probability, probability_percent
                    ));
                }
            }
        }
    }

    // ISO date strings sort lexicographically, so string order is date order
    for pair in data.timeline.windows(2) {
        if pair[1].date < pair[0].date {
            issues.push(format!(
                "timeline out of order: {} follows {}",
                pair[1].date, pair[0].date
            ));
        }
    }

    let known: Vec<&str> = data.apostles.iter().map(|a| a.last_name.as_str()).collect();
    for entry in &data.timeline {
        let sum: f64 = entry.values.values().sum();
        if (sum - 100.0).abs() > SUM_TOLERANCE {
            issues.push(format!(
                "{}: percentages sum to {:.1}, expected ~100",
                entry.date, sum
            ));
        }
        for name in entry.values.keys() {
            if !known.contains(&name.as_str()) {
                issues.push(format!("{}: unknown name '{}'", entry.date, name));
            }
        }
    }

    issues
}
