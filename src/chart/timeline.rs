//! Probability-over-time line chart
//!
//! One line per apostle over the downsampled timeline, plus one label per
//! "leadership era": every maximal contiguous run of samples where a single
//! apostle holds the strictly highest probability gets exactly one
//! annotation at the run's temporal midpoint. That keeps eras identifiable
//! without labeling every sample.
//!
//! # Leader rule
//!
//! At each sample the leader is the name with the strictly greatest value
//! (missing names read as 0). The comparison is `>`, not `>=`, so on an
//! exact tie the name scanned first (earlier in seniority order) wins.
//! A sample where every value is 0 has no leader: it joins no run, emits no
//! label, and two equal-leader runs on either side of it stay separate runs.
//!
//! # Downsampling
//!
//! Display keeps every third raw entry plus, always, the final one. The
//! annotation pass runs on the downsampled series, so a leadership run
//! shorter than the stride can be missed. That coarsening is the intended
//! precision/readability trade-off; do not move annotation to the raw
//! timeline without accepting the extra label density.

use crate::chart::{
    color_of, is_january, year_of, Axis, ChartDescription, ChartKind, Point, Series, Tick,
    TooltipField, PALETTE,
};
use crate::data::{Apostle, TimelineEntry};
use serde::Serialize;

/// Keep every DISPLAY_STRIDE-th raw entry for rendering.
const DISPLAY_STRIDE: usize = 3;

/// One era label: the leading apostle at the midpoint of their run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub name: String,
    pub date: String,
    pub probability: f64,
    pub color: String,
}

/// Thin the timeline for display: every third entry plus the final entry,
/// order preserved. The terminal entry is never dropped, whatever the
/// stride alignment.
pub fn downsample(timeline: &[TimelineEntry]) -> Vec<TimelineEntry> {
    timeline
        .iter()
        .enumerate()
        .filter(|(i, _)| i % DISPLAY_STRIDE == 0 || *i == timeline.len() - 1)
        .map(|(_, entry)| entry.clone())
        .collect()
}

/// Compute one annotation per maximal constant-leader run, placed at the
/// run's midpoint index. `color_for` must be total over `names`.
pub fn leader_annotations(
    sampled: &[TimelineEntry],
    names: &[String],
    color_for: impl Fn(&str) -> String,
) -> Vec<Annotation> {
    // Leader per sample; None when every value is 0
    let leaders: Vec<Option<&str>> = sampled
        .iter()
        .map(|entry| {
            let mut max = 0.0;
            let mut top = None;
            for name in names {
                let value = entry.value_of(name);
                if value > max {
                    max = value;
                    top = Some(name.as_str());
                }
            }
            top
        })
        .collect();

    let mut annotations = Vec::new();
    let mut seg_start = 0;

    for i in 1..=leaders.len() {
        if i == leaders.len() || leaders[i] != leaders[seg_start] {
            if let Some(name) = leaders[seg_start] {
                let mid = (seg_start + (i - 1)) / 2;
                let entry = &sampled[mid];
                annotations.push(Annotation {
                    name: name.to_string(),
                    date: entry.date.clone(),
                    probability: entry.value_of(name),
                    color: color_for(name),
                });
            }
            seg_start = i;
        }
    }

    annotations
}

/// Build the timeline chart description: downsampled series per apostle in
/// seniority order, January year ticks, era annotations.
pub fn describe(timeline: &[TimelineEntry], apostles: &[Apostle]) -> ChartDescription {
    let names: Vec<String> = apostles.iter().map(|a| a.last_name.clone()).collect();
    let sampled = downsample(timeline);

    let color_for = |name: &str| -> String {
        names
            .iter()
            .position(|n| n == name)
            .map(|i| color_of(&PALETTE, i).to_string())
            .unwrap_or_else(|| PALETTE[0].to_string())
    };

    let annotations = leader_annotations(&sampled, &names, color_for);

    let series = names
        .iter()
        .enumerate()
        .map(|(idx, name)| Series {
            name: name.clone(),
            color: color_of(&PALETTE, idx).to_string(),
            points: sampled
                .iter()
                .map(|entry| {
                    let value = entry.value_of(name);
                    Point {
                        x: entry.date.clone(),
                        y: value,
                        label: None,
                        tooltip: vec![TooltipField::new(
                            crate::chart::format_month_year(&entry.date),
                            format!("{:.1}%", value),
                        )],
                    }
                })
                .collect(),
        })
        .collect();

    let ticks = sampled
        .iter()
        .filter(|entry| is_january(&entry.date))
        .map(|entry| Tick {
            value: entry.date.clone(),
            label: year_of(&entry.date)
                .map(|y| y.to_string())
                .unwrap_or_else(|| entry.date.clone()),
        })
        .collect();

    ChartDescription {
        kind: ChartKind::Line,
        title: "Prophet Probability Over Time".to_string(),
        subtitle: "Probability of being the current church president at each point in time"
            .to_string(),
        x_axis: Axis {
            ticks,
            ..Axis::auto()
        },
        y_axis: Axis {
            tick_suffix: Some("%".to_string()),
            ..Axis::fixed(0.0, 100.0)
        },
        series,
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Role;

    // ==========================================================================
    // ANNOTATION ALGORITHM TESTS
    // ==========================================================================
    //
    // Every maximal constant-leader run gets exactly one label at its
    // midpoint. Ties break to the first name scanned; all-zero samples have
    // no leader and never merge the runs around them.
    // ==========================================================================

    fn entry(date: &str, values: &[(&str, f64)]) -> TimelineEntry {
        TimelineEntry {
            date: date.to_string(),
            values: values
                .iter()
                .map(|(name, v)| (name.to_string(), *v))
                .collect(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn plain_color(_: &str) -> String {
        "#000000".to_string()
    }

    #[test]
    fn test_leader_handoff_two_runs() {
        // A leads at 0 and 1, B takes over at 2: run [0,1] labels at index 0,
        // run [2,2] labels at index 2
        let sampled = vec![
            entry("2020-01", &[("A", 70.0), ("B", 30.0)]),
            entry("2020-02", &[("A", 55.0), ("B", 45.0)]),
            entry("2020-03", &[("A", 10.0), ("B", 90.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);

        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].name, "A");
        assert_eq!(anns[0].date, "2020-01");
        assert!((anns[0].probability - 70.0).abs() < 1e-9);
        assert_eq!(anns[1].name, "B");
        assert_eq!(anns[1].date, "2020-03");
        assert!((anns[1].probability - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_run_labels_midpoint() {
        let sampled = vec![
            entry("2020-01", &[("A", 60.0)]),
            entry("2020-02", &[("A", 61.0)]),
            entry("2020-03", &[("A", 62.0)]),
            entry("2020-04", &[("A", 63.0)]),
            entry("2020-05", &[("A", 64.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A"]), plain_color);

        // Run [0,4], midpoint floor(4/2) = 2
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].date, "2020-03");
        assert!((anns[0].probability - 62.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_length_run_midpoint_floors() {
        let sampled = vec![
            entry("2020-01", &[("A", 60.0)]),
            entry("2020-02", &[("A", 61.0)]),
            entry("2020-03", &[("A", 62.0)]),
            entry("2020-04", &[("A", 63.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A"]), plain_color);

        // Run [0,3], midpoint floor(3/2) = 1
        assert_eq!(anns[0].date, "2020-02");
    }

    #[test]
    fn test_length_one_run_labels_itself() {
        let sampled = vec![
            entry("2020-01", &[("A", 60.0), ("B", 40.0)]),
            entry("2020-02", &[("A", 40.0), ("B", 60.0)]),
            entry("2020-03", &[("A", 60.0), ("B", 40.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);

        assert_eq!(anns.len(), 3);
        assert_eq!(anns[0].date, "2020-01");
        assert_eq!(anns[1].date, "2020-02");
        assert_eq!(anns[2].date, "2020-03");
    }

    #[test]
    fn test_tie_breaks_to_first_name_in_order() {
        let sampled = vec![entry("2020-01", &[("A", 50.0), ("B", 50.0)])];

        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);
        assert_eq!(anns[0].name, "A");

        // Scan order decides, not the data
        let anns = leader_annotations(&sampled, &names(&["B", "A"]), plain_color);
        assert_eq!(anns[0].name, "B");
    }

    #[test]
    fn test_all_zero_sample_has_no_leader() {
        let sampled = vec![entry("2020-01", &[("A", 0.0), ("B", 0.0)])];
        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);
        assert!(anns.is_empty());
    }

    #[test]
    fn test_zero_gap_splits_equal_leader_runs() {
        // A leads, then an all-zero sample, then A leads again: the gap has
        // no leader and the two A runs stay separate
        let sampled = vec![
            entry("2020-01", &[("A", 60.0)]),
            entry("2020-02", &[("A", 61.0)]),
            entry("2020-03", &[("A", 0.0)]),
            entry("2020-04", &[("A", 62.0)]),
            entry("2020-05", &[("A", 63.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A"]), plain_color);

        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].date, "2020-01"); // midpoint of [0,1]
        assert_eq!(anns[1].date, "2020-04"); // midpoint of [3,4]
    }

    #[test]
    fn test_missing_name_reads_as_zero() {
        // B is absent from the sample entirely; A still leads with any value
        let sampled = vec![entry("2020-01", &[("A", 0.1)])];
        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].name, "A");
    }

    #[test]
    fn test_empty_names_yields_no_annotations() {
        let sampled = vec![entry("2020-01", &[("A", 60.0)])];
        let anns = leader_annotations(&sampled, &[], plain_color);
        assert!(anns.is_empty());
    }

    #[test]
    fn test_empty_timeline_yields_no_annotations() {
        let anns = leader_annotations(&[], &names(&["A"]), plain_color);
        assert!(anns.is_empty());
    }

    #[test]
    fn test_annotation_carries_color() {
        let sampled = vec![entry("2020-01", &[("A", 60.0)])];
        let anns = leader_annotations(&sampled, &names(&["A"]), |name| {
            assert_eq!(name, "A");
            "#d62728".to_string()
        });
        assert_eq!(anns[0].color, "#d62728");
    }

    #[test]
    fn test_runs_cover_every_defined_leader_index() {
        // Alternating leaders with a zero gap: count of annotations equals
        // count of maximal runs, and every defined-leader index falls in one
        let sampled = vec![
            entry("2020-01", &[("A", 60.0), ("B", 10.0)]),
            entry("2020-02", &[("A", 60.0), ("B", 10.0)]),
            entry("2020-03", &[("A", 10.0), ("B", 60.0)]),
            entry("2020-04", &[("A", 0.0), ("B", 0.0)]),
            entry("2020-05", &[("A", 10.0), ("B", 60.0)]),
        ];
        let anns = leader_annotations(&sampled, &names(&["A", "B"]), plain_color);

        // Runs: A[0,1], B[2,2], gap, B[4,4]
        assert_eq!(anns.len(), 3);
        assert_eq!(
            anns.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "B"]
        );
    }

    // ==========================================================================
    // DOWNSAMPLING TESTS
    // ==========================================================================

    fn numbered_timeline(len: usize) -> Vec<TimelineEntry> {
        (0..len)
            .map(|i| entry(&format!("2020-{:02}", i + 1), &[("A", i as f64)]))
            .collect()
    }

    #[test]
    fn test_downsample_keeps_every_third() {
        let sampled = downsample(&numbered_timeline(7));
        let dates: Vec<&str> = sampled.iter().map(|e| e.date.as_str()).collect();
        // Indices 0, 3, 6; 6 is also the terminal entry
        assert_eq!(dates, vec!["2020-01", "2020-04", "2020-07"]);
    }

    #[test]
    fn test_downsample_always_keeps_terminal_entry() {
        // len 8: stride lands on 0,3,6 and index 7 is kept regardless
        let sampled = downsample(&numbered_timeline(8));
        let dates: Vec<&str> = sampled.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-01", "2020-04", "2020-07", "2020-08"]);
    }

    #[test]
    fn test_downsample_preserves_order() {
        let sampled = downsample(&numbered_timeline(10));
        let values: Vec<f64> = sampled.iter().map(|e| e.value_of("A")).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, sorted);
    }

    #[test]
    fn test_downsample_single_entry() {
        let sampled = downsample(&numbered_timeline(1));
        assert_eq!(sampled.len(), 1);
    }

    #[test]
    fn test_downsample_empty() {
        assert!(downsample(&[]).is_empty());
    }

    // ==========================================================================
    // CHART DESCRIPTION TESTS
    // ==========================================================================

    fn apostle(last_name: &str, seniority: u32) -> Apostle {
        Apostle {
            id: seniority,
            first_name: "Test".to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            full_name: format!("Test {}", last_name),
            age: 80.0,
            birth_date: "1946-01-01".to_string(),
            ordination_date: "2004-10-07".to_string(),
            years_in_quorum: 21,
            seniority,
            role: Role::Incumbent,
        }
    }

    #[test]
    fn test_describe_one_series_per_apostle_in_order() {
        let timeline = vec![entry("2026-01-01", &[("Oaks", 60.0), ("Holland", 40.0)])];
        let chart = describe(&timeline, &[apostle("Oaks", 1), apostle("Holland", 2)]);

        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Oaks");
        assert_eq!(chart.series[0].color, PALETTE[0]);
        assert_eq!(chart.series[1].name, "Holland");
        assert_eq!(chart.series[1].color, PALETTE[1]);
    }

    #[test]
    fn test_describe_annotation_color_matches_series() {
        let timeline = vec![entry("2026-01-01", &[("Oaks", 40.0), ("Holland", 60.0)])];
        let chart = describe(&timeline, &[apostle("Oaks", 1), apostle("Holland", 2)]);

        assert_eq!(chart.annotations.len(), 1);
        assert_eq!(chart.annotations[0].name, "Holland");
        assert_eq!(chart.annotations[0].color, chart.series[1].color);
    }

    #[test]
    fn test_describe_january_year_ticks() {
        let timeline = vec![
            entry("2025-01-01", &[("Oaks", 60.0)]),
            entry("2025-04-01", &[("Oaks", 60.0)]),
            entry("2025-07-01", &[("Oaks", 60.0)]),
            entry("2025-10-01", &[("Oaks", 60.0)]),
            entry("2026-01-01", &[("Oaks", 60.0)]),
        ];
        let chart = describe(&timeline, &[apostle("Oaks", 1)]);

        // Downsample keeps 0, 3, 4; January samples are indices 0 and 4
        let labels: Vec<&str> = chart.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["2025", "2026"]);
    }

    #[test]
    fn test_describe_tooltip_one_decimal() {
        let timeline = vec![entry("2026-03-01", &[("Oaks", 62.123)])];
        let chart = describe(&timeline, &[apostle("Oaks", 1)]);
        let tooltip = &chart.series[0].points[0].tooltip[0];
        assert_eq!(tooltip.label, "Mar 2026");
        assert_eq!(tooltip.value, "62.1%");
    }

    #[test]
    fn test_describe_annotations_run_on_downsampled_series() {
        // Raw timeline has a one-sample takeover at index 1 that the stride
        // skips; the annotation pass must not see it
        let timeline = vec![
            entry("2026-01-01", &[("Oaks", 60.0), ("Holland", 40.0)]),
            entry("2026-02-01", &[("Oaks", 10.0), ("Holland", 90.0)]),
            entry("2026-03-01", &[("Oaks", 60.0), ("Holland", 40.0)]),
            entry("2026-04-01", &[("Oaks", 60.0), ("Holland", 40.0)]),
        ];
        let chart = describe(&timeline, &[apostle("Oaks", 1), apostle("Holland", 2)]);

        // Sampled indices: 0, 3. Both led by Oaks, one run, one label
        assert_eq!(chart.annotations.len(), 1);
        assert_eq!(chart.annotations[0].name, "Oaks");
    }
}
