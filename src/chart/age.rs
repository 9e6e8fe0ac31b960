//! Current-age bar chart
//!
//! One bar per apostle in seniority (input) order, labeled with the floored
//! age. The Y domain is pinned to [50,105] so the chart reads the same
//! across artifact generations; out-of-range ages clip rather than rescale.

use crate::chart::{
    format_long_date, Axis, ChartDescription, ChartKind, Point, Series, TooltipField,
};
use crate::data::Apostle;

const AGE_DOMAIN: [f64; 2] = [50.0, 105.0];
const BAR_COLOR: &str = "#081D58";

/// Build the age chart description. Never re-sorts: bar order is list order.
pub fn describe(apostles: &[Apostle]) -> ChartDescription {
    let points = apostles
        .iter()
        .map(|apostle| Point {
            x: apostle.last_name.clone(),
            y: apostle.age,
            label: Some(format!("{}", apostle.age.floor() as i64)),
            tooltip: tooltip(apostle),
        })
        .collect();

    ChartDescription {
        kind: ChartKind::Bar,
        title: "Current Age of Apostles".to_string(),
        subtitle: "Ordered by seniority (ordination date)".to_string(),
        x_axis: Axis::auto(),
        y_axis: Axis::fixed(AGE_DOMAIN[0], AGE_DOMAIN[1]),
        series: vec![Series {
            name: "Age".to_string(),
            color: BAR_COLOR.to_string(),
            points,
        }],
        annotations: Vec::new(),
    }
}

fn tooltip(apostle: &Apostle) -> Vec<TooltipField> {
    vec![
        TooltipField::new("", apostle.full_name.clone()),
        TooltipField::new("Age", format!("{} years", apostle.age.floor() as i64)),
        TooltipField::new("Birth Date", format_long_date(&apostle.birth_date)),
        TooltipField::new("Ordained", format_long_date(&apostle.ordination_date)),
        TooltipField::new("Years in Quorum", apostle.years_in_quorum.to_string()),
        TooltipField::new("Seniority", format!("#{}", apostle.seniority)),
    ]
}
