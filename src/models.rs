use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KPIs for one period as returned by the dashboard endpoint.
///
/// `data_points` keys are `YYYY-MM-DD` or `YYYY-MM` labels, so the map's
/// ordering is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub avg_per_day: f64,
    #[serde(default)]
    pub overall_avg_per_day: f64,
    pub avg_monthly_spend: Option<f64>,
    pub projected_month_end: Option<f64>,
    pub projected_month_end_compared_percent: Option<f64>,
    pub previous_period_spent: Option<f64>,
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub data_points: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub merchant: String,
    pub amount: f64,
    #[serde(default)]
    pub raw_description: String,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub is_subscription: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(default)]
    pub content: Vec<Transaction>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl TransactionPage {
    /// True when the server reports more matching rows than this page holds.
    pub fn is_truncated(&self) -> bool {
        self.total_elements
            .is_some_and(|total| total > self.content.len() as u64)
    }
}

#[derive(Debug, Deserialize)]
pub struct PeriodPayload {
    pub period: String,
}

#[derive(Debug, Deserialize)]
pub struct DayPayload {
    pub date: String,
}
