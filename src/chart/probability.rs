//! Succession-probability bar chart
//!
//! Contenders only: the incumbent has no probability by convention and the
//! role match below excludes it exhaustively rather than by checking for a
//! missing field. Bar labels round the percent to a whole number; tooltips
//! show one decimal. Y domain pinned to [0,100].

use crate::chart::{
    format_long_date, Axis, ChartDescription, ChartKind, Point, Series, TooltipField,
};
use crate::data::{Apostle, Role};

const BAR_COLOR: &str = "#0C4A6E";

/// Build the probability chart description over the contenders, kept in
/// seniority (input) order.
pub fn describe(apostles: &[Apostle]) -> ChartDescription {
    let points = apostles
        .iter()
        .filter_map(|apostle| match apostle.role {
            Role::Incumbent => None,
            Role::Contender {
                probability_percent,
                ..
            } => Some(Point {
                x: apostle.last_name.clone(),
                y: probability_percent,
                label: Some(format!("{}%", probability_percent.round() as i64)),
                tooltip: tooltip(apostle, probability_percent),
            }),
        })
        .collect();

    ChartDescription {
        kind: ChartKind::Bar,
        title: "Succession Probability".to_string(),
        subtitle: "Based on actuarial life expectancy modeling".to_string(),
        x_axis: Axis::auto(),
        y_axis: Axis::fixed(0.0, 100.0),
        series: vec![Series {
            name: "Probability".to_string(),
            color: BAR_COLOR.to_string(),
            points,
        }],
        annotations: Vec::new(),
    }
}

fn tooltip(apostle: &Apostle, percent: f64) -> Vec<TooltipField> {
    vec![
        TooltipField::new("", apostle.full_name.clone()),
        TooltipField::new("Chance", format!("{:.1}%", percent)),
        TooltipField::new("Age", format!("{} years", apostle.age.floor() as i64)),
        TooltipField::new("Years in Quorum", apostle.years_in_quorum.to_string()),
        TooltipField::new("Seniority", format!("#{}", apostle.seniority)),
        TooltipField::new("Ordained", format_long_date(&apostle.ordination_date)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incumbent(last_name: &str) -> Apostle {
        make(last_name, 1, Role::Incumbent)
    }

    fn contender(last_name: &str, seniority: u32, percent: f64) -> Apostle {
        make(
            last_name,
            seniority,
            Role::Contender {
                probability: percent / 100.0,
                probability_percent: percent,
            },
        )
    }

    fn make(last_name: &str, seniority: u32, role: Role) -> Apostle {
        Apostle {
            id: seniority,
            first_name: "Test".to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            full_name: format!("Test {}", last_name),
            age: 80.5,
            birth_date: "1945-03-20".to_string(),
            ordination_date: "2004-10-07".to_string(),
            years_in_quorum: 21,
            seniority,
            role,
        }
    }

    #[test]
    fn test_incumbent_excluded_contenders_kept() {
        // A has no probability, B and C do: chart shows exactly B and C
        let chart = describe(&[
            incumbent("A"),
            contender("B", 2, 60.0),
            contender("C", 3, 40.0),
        ]);
        let names: Vec<&str> = chart.series[0]
            .points
            .iter()
            .map(|p| p.x.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_domain_fixed_at_0_100() {
        let chart = describe(&[contender("B", 2, 250.0)]);
        assert_eq!(chart.y_axis.domain, Some([0.0, 100.0]));
    }

    #[test]
    fn test_bar_label_rounds_tooltip_keeps_decimal() {
        let chart = describe(&[contender("B", 2, 42.7)]);
        let point = &chart.series[0].points[0];
        assert_eq!(point.label.as_deref(), Some("43%"));
        assert!(point
            .tooltip
            .contains(&TooltipField::new("Chance", "42.7%")));
    }

    #[test]
    fn test_contenders_keep_seniority_order() {
        // Lower value first in the input stays first in the chart
        let chart = describe(&[
            incumbent("A"),
            contender("B", 2, 5.0),
            contender("C", 3, 95.0),
        ]);
        let values: Vec<f64> = chart.series[0].points.iter().map(|p| p.y).collect();
        assert_eq!(values, vec![5.0, 95.0]);
    }

    #[test]
    fn test_all_incumbents_yields_empty_points() {
        let chart = describe(&[incumbent("A")]);
        assert!(chart.series[0].points.is_empty());
    }
}
