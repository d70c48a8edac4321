//! Reporting period selection and its compact string token.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The period sent to the dashboard endpoint as the `period` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodMode {
    ThisMonth,
    Month,
    Ytd,
    Year,
}

impl PeriodMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodMode::ThisMonth => "THIS_MONTH",
            PeriodMode::Month => "MONTH",
            PeriodMode::Ytd => "YTD",
            PeriodMode::Year => "YEAR",
        }
    }
}

/// Bucket size used by the spending chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

/// The currently selected reporting period.
///
/// `year` and `month` only exist on the variants that need them, so a
/// `Month` without a month cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    ThisMonth,
    Month {
        year: i32,
        month: u32,
    },
    Ytd,
    Year {
        year: i32,
    },
}

impl Period {
    /// Parses a selector token, resolving missing numbers against today's date.
    pub fn parse(token: &str) -> Period {
        Period::parse_at(token, Local::now().date_naive())
    }

    /// Parses a selector token. Never fails: anything unrecognised is `ThisMonth`.
    pub fn parse_at(token: &str, today: NaiveDate) -> Period {
        let parts: Vec<&str> = token.trim().split(':').collect();
        match parts.as_slice() {
            ["THIS_MONTH"] => Period::ThisMonth,
            ["YTD"] => Period::Ytd,
            ["MONTH", year, month] => Period::Month {
                year: parse_year(year, today),
                month: month
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|month| (1..=12).contains(month))
                    .unwrap_or_else(|| today.month()),
            },
            ["YEAR", year] => Period::Year {
                year: parse_year(year, today),
            },
            _ => Period::ThisMonth,
        }
    }

    pub fn token(&self) -> String {
        match self {
            Period::ThisMonth => "THIS_MONTH".to_string(),
            Period::Month { year, month } => format!("MONTH:{year}:{month}"),
            Period::Ytd => "YTD".to_string(),
            Period::Year { year } => format!("YEAR:{year}"),
        }
    }

    pub fn mode(&self) -> PeriodMode {
        match self {
            Period::ThisMonth => PeriodMode::ThisMonth,
            Period::Month { .. } => PeriodMode::Month,
            Period::Ytd => PeriodMode::Ytd,
            Period::Year { .. } => PeriodMode::Year,
        }
    }

    /// Query pairs for the dashboard endpoint: `period`, then `month` and
    /// `year` when the variant carries them.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("period", self.mode().as_str().to_string())];
        match self {
            Period::Month { year, month } => {
                query.push(("month", month.to_string()));
                query.push(("year", year.to_string()));
            }
            Period::Year { year } => query.push(("year", year.to_string())),
            Period::ThisMonth | Period::Ytd => {}
        }
        query
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Ytd | Period::Year { .. } => Granularity::Monthly,
            Period::ThisMonth | Period::Month { .. } => Granularity::Daily,
        }
    }

    /// Day drill-down only makes sense when the chart shows one bar per day.
    pub fn allows_drilldown(&self) -> bool {
        self.granularity() == Granularity::Daily
    }

    /// Human readable subtitle, e.g. "March 2024" or "Year to Date 2026".
    pub fn label(&self, today: NaiveDate) -> String {
        match self {
            Period::ThisMonth => "This Month".to_string(),
            Period::Month { year, month } => format!("{} {year}", month_name(*month)),
            Period::Ytd => format!("Year to Date {}", today.year()),
            Period::Year { year } => format!("Year {year}"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// One option of the month picker.
#[derive(Debug, Clone, Serialize)]
pub struct MonthChoice {
    pub month: u32,
    pub name: &'static str,
}

pub fn month_choices() -> Vec<MonthChoice> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| MonthChoice {
            month: index as u32 + 1,
            name,
        })
        .collect()
}

/// Years offered by the picker: two either side of the current year.
pub fn year_choices(today: NaiveDate) -> Vec<i32> {
    let year = today.year();
    (year - 2..=year + 2).collect()
}

fn parse_year(value: &str, today: NaiveDate) -> i32 {
    value.trim().parse::<i32>().unwrap_or_else(|_| today.year())
}
