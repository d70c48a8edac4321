use crate::drilldown::{DayDrilldown, DayFetch};
use crate::errors::ApiError;
use crate::fetcher::{DashboardFetcher, DashboardRequest};
use crate::models::{DashboardSnapshot, TransactionPage};
use crate::period::Period;
use crate::view::{DashboardView, DayView, chart_bars, derive};
use chrono::NaiveDate;
use tracing::info;

/// Single owner of the dashboard state: the selected period, the KPI load
/// and the day drill-down. All transitions are synchronous; network calls
/// happen outside and report back through the `apply_*` methods.
#[derive(Debug)]
pub struct DashboardSession {
    period: Period,
    dashboard: DashboardFetcher,
    drilldown: DayDrilldown,
}

impl DashboardSession {
    pub fn new(day_page_size: u32) -> Self {
        Self {
            period: Period::default(),
            dashboard: DashboardFetcher::default(),
            drilldown: DayDrilldown::new(day_page_size),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Handles a token from the period selector. Selecting the current period
    /// again reloads it.
    pub fn select_token(&mut self, token: &str, today: NaiveDate) -> DashboardRequest {
        self.select(Period::parse_at(token, today))
    }

    pub fn select(&mut self, period: Period) -> DashboardRequest {
        if period != self.period {
            info!(from = %self.period, to = %period, "period changed");
        }
        self.period = period;
        self.drilldown.clear();
        self.dashboard.begin(period)
    }

    /// Reloads the current period, keeping any day selection.
    pub fn reload(&mut self) -> DashboardRequest {
        self.dashboard.begin(self.period)
    }

    pub fn click_day(&mut self, date: NaiveDate) -> Option<DayFetch> {
        self.drilldown.select(self.period, date)
    }

    pub fn close_day(&mut self) {
        self.drilldown.clear();
    }

    pub fn apply_dashboard(
        &mut self,
        request: DashboardRequest,
        result: Result<DashboardSnapshot, ApiError>,
    ) -> bool {
        self.dashboard.finish(request, result)
    }

    pub fn apply_day(&mut self, fetch: &DayFetch, result: Result<TransactionPage, ApiError>) -> bool {
        self.drilldown.finish(fetch, result)
    }

    pub fn view(&self, today: NaiveDate) -> DashboardView {
        let state = self.dashboard.state();
        let snapshot = self.dashboard.snapshot();
        let selected = self.drilldown.selected();
        DashboardView {
            token: self.period.token(),
            mode: self.period.mode(),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            snapshot: snapshot.cloned(),
            derived: derive(self.period, snapshot, today),
            bars: chart_bars(self.period, snapshot, selected, today),
            day: DayView {
                date: selected,
                loading: self.drilldown.state().is_loading(),
                error: self.drilldown.state().error().map(str::to_string),
                transactions: self.drilldown.transactions().to_vec(),
                truncated: self.drilldown.is_truncated(),
            },
        }
    }
}
