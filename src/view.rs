//! Display values derived from the selected period and the last snapshot.
//! Nothing here touches the network.

use crate::models::{DashboardSnapshot, Transaction};
use crate::period::{Granularity, Period, PeriodMode};
use chrono::NaiveDate;
use serde::Serialize;

pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Projection {
    Shown {
        value: f64,
        compared_percent: Option<f64>,
    },
    NotApplicable,
}

/// Horizontal line the bars are compared against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub subtitle: String,
    pub granularity: Granularity,
    /// Days with spending; only meaningful for daily charts.
    pub active_days: Option<usize>,
    pub projection: Projection,
    pub monthly_average: Option<f64>,
    pub reference: Option<ReferenceLine>,
}

pub fn derive(period: Period, snapshot: Option<&DashboardSnapshot>, today: NaiveDate) -> DerivedView {
    let granularity = period.granularity();
    let daily = granularity == Granularity::Daily;

    let projection = match (period, snapshot.and_then(|s| s.projected_month_end)) {
        (Period::ThisMonth, Some(value)) => Projection::Shown {
            value,
            compared_percent: snapshot.and_then(|s| s.projected_month_end_compared_percent),
        },
        _ => Projection::NotApplicable,
    };

    let monthly_average = if daily {
        None
    } else {
        snapshot.and_then(|s| s.avg_monthly_spend)
    };

    DerivedView {
        subtitle: period.label(today),
        granularity,
        active_days: if daily {
            snapshot.map(|s| s.data_points.len())
        } else {
            None
        },
        projection,
        monthly_average,
        reference: snapshot.and_then(|s| reference_line(granularity, s)),
    }
}

fn reference_line(granularity: Granularity, snapshot: &DashboardSnapshot) -> Option<ReferenceLine> {
    let monthly = snapshot
        .avg_monthly_spend
        .filter(|value| granularity == Granularity::Monthly && *value > 0.0);
    let line = match monthly {
        Some(value) => ReferenceLine {
            value,
            label: "Average monthly spend",
        },
        None => ReferenceLine {
            value: snapshot.overall_avg_per_day,
            label: "Average per day",
        },
    };
    (line.value > 0.0).then_some(line)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub amount: f64,
    pub above_reference: bool,
    pub diff_from_reference: Option<f64>,
    pub diff_percent: Option<f64>,
    pub is_today: bool,
    pub is_selected: bool,
}

pub fn chart_bars(
    period: Period,
    snapshot: Option<&DashboardSnapshot>,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<ChartBar> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };
    let granularity = period.granularity();
    let daily = granularity == Granularity::Daily;
    let reference = reference_line(granularity, snapshot).map(|line| line.value);
    let today = today.to_string();
    let selected = selected.map(|date| date.to_string());

    snapshot
        .data_points
        .iter()
        .map(|(label, amount)| {
            let diff = reference.map(|value| amount - value);
            ChartBar {
                label: label.clone(),
                amount: *amount,
                above_reference: diff.is_some_and(|diff| diff > 0.0),
                diff_from_reference: diff,
                diff_percent: diff.zip(reference).map(|(diff, value)| diff / value * 100.0),
                is_today: daily && *label == today,
                is_selected: daily && selected.as_deref() == Some(label.as_str()),
            }
        })
        .collect()
}

pub fn format_amount(value: f64, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

pub fn format_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: Option<NaiveDate>,
    pub loading: bool,
    pub error: Option<String>,
    pub transactions: Vec<Transaction>,
    pub truncated: bool,
}

/// Everything the page needs to render one state of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub token: String,
    pub mode: PeriodMode,
    pub loading: bool,
    pub error: Option<String>,
    pub snapshot: Option<DashboardSnapshot>,
    pub derived: DerivedView,
    pub bars: Vec<ChartBar>,
    pub day: DayView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            total_spent: 300.0,
            avg_per_day: 100.0,
            overall_avg_per_day: 100.0,
            avg_monthly_spend: Some(2500.0),
            projected_month_end: Some(3100.0),
            projected_month_end_compared_percent: Some(12.5),
            data_points: BTreeMap::from([
                ("2024-03-12".to_string(), 50.0),
                ("2024-03-13".to_string(), 100.0),
                ("2024-03-14".to_string(), 150.0),
            ]),
            ..DashboardSnapshot::default()
        }
    }

    #[test]
    fn projection_shown_for_this_month_only() {
        let view = derive(Period::ThisMonth, Some(&snapshot()), today());
        assert_eq!(
            view.projection,
            Projection::Shown {
                value: 3100.0,
                compared_percent: Some(12.5)
            }
        );

        for period in [
            Period::Ytd,
            Period::Year { year: 2024 },
            Period::Month { year: 2024, month: 3 },
        ] {
            assert_eq!(derive(period, Some(&snapshot()), today()).projection, Projection::NotApplicable);
        }
    }

    #[test]
    fn missing_projection_is_not_applicable() {
        let mut snapshot = snapshot();
        snapshot.projected_month_end = None;
        let view = derive(Period::ThisMonth, Some(&snapshot), today());
        assert_eq!(view.projection, Projection::NotApplicable);
        assert_eq!(derive(Period::ThisMonth, None, today()).projection, Projection::NotApplicable);
    }

    #[test]
    fn monthly_average_only_for_year_views() {
        assert_eq!(derive(Period::Ytd, Some(&snapshot()), today()).monthly_average, Some(2500.0));
        assert_eq!(derive(Period::ThisMonth, Some(&snapshot()), today()).monthly_average, None);

        let mut without = snapshot();
        without.avg_monthly_spend = None;
        assert_eq!(derive(Period::Year { year: 2023 }, Some(&without), today()).monthly_average, None);
    }

    #[test]
    fn active_days_and_granularity() {
        let daily = derive(Period::Month { year: 2024, month: 3 }, Some(&snapshot()), today());
        assert_eq!(daily.active_days, Some(3));
        assert_eq!(daily.granularity, Granularity::Daily);
        assert_eq!(daily.subtitle, "March 2024");

        let monthly = derive(Period::Year { year: 2023 }, Some(&snapshot()), today());
        assert_eq!(monthly.active_days, None);
        assert_eq!(monthly.granularity, Granularity::Monthly);
    }

    #[test]
    fn reference_follows_granularity() {
        let daily = derive(Period::ThisMonth, Some(&snapshot()), today());
        assert_eq!(daily.reference.map(|line| line.label), Some("Average per day"));

        let monthly = derive(Period::Ytd, Some(&snapshot()), today());
        assert_eq!(
            monthly.reference,
            Some(ReferenceLine {
                value: 2500.0,
                label: "Average monthly spend"
            })
        );

        let mut flat = snapshot();
        flat.overall_avg_per_day = 0.0;
        assert!(derive(Period::ThisMonth, Some(&flat), today()).reference.is_none());
    }

    #[test]
    fn bars_mark_today_selection_and_reference() {
        let selected = NaiveDate::from_ymd_opt(2024, 3, 12);
        let bars = chart_bars(Period::ThisMonth, Some(&snapshot()), selected, today());
        assert_eq!(bars.len(), 3);

        assert!(bars[0].is_selected);
        assert!(!bars[0].above_reference);
        assert_eq!(bars[0].diff_percent, Some(-50.0));

        assert!(!bars[1].above_reference);
        assert!(bars[2].is_today);
        assert!(bars[2].above_reference);
    }

    #[test]
    fn monthly_bars_are_never_today_or_selected() {
        let mut snapshot = snapshot();
        snapshot.data_points = BTreeMap::from([("2024-03-14".to_string(), 10.0)]);
        let bars = chart_bars(Period::Ytd, Some(&snapshot), Some(today()), today());
        assert!(!bars[0].is_today);
        assert!(!bars[0].is_selected);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_amount(1234.5, "TL"), "1234.50 TL");
        assert_eq!(format_percent(12.345), "+12.3%");
        assert_eq!(format_percent(-4.0), "-4.0%");
    }
}
