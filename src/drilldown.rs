//! Transactions behind a single bar of the daily spending chart.

use crate::api::TransactionQuery;
use crate::errors::ApiError;
use crate::fetcher::{LoadState, Sequence, Ticket};
use crate::models::{Transaction, TransactionPage};
use crate::period::Period;
use chrono::NaiveDate;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DayFetch {
    pub ticket: Ticket,
    pub date: NaiveDate,
    pub query: TransactionQuery,
}

#[derive(Debug)]
pub struct DayDrilldown {
    page_size: u32,
    sequence: Sequence,
    selected: Option<NaiveDate>,
    state: LoadState<Vec<Transaction>>,
    truncated: bool,
}

impl DayDrilldown {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            sequence: Sequence::default(),
            selected: None,
            state: LoadState::Idle,
            truncated: false,
        }
    }

    /// Selects `date` and starts its fetch. Has no effect for periods charted
    /// per month.
    pub fn select(&mut self, period: Period, date: NaiveDate) -> Option<DayFetch> {
        if !period.allows_drilldown() {
            debug!(%period, %date, "ignoring day selection for monthly chart");
            return None;
        }

        self.selected = Some(date);
        self.state = LoadState::Loading;
        self.truncated = false;
        Some(DayFetch {
            ticket: self.sequence.next(),
            date,
            query: TransactionQuery::single_day(date, self.page_size),
        })
    }

    pub fn finish(&mut self, fetch: &DayFetch, result: Result<TransactionPage, ApiError>) -> bool {
        if !self.sequence.is_current(fetch.ticket) {
            debug!(date = %fetch.date, "discarding stale day transactions");
            return false;
        }

        self.state = match result {
            Ok(page) => {
                self.truncated = page.is_truncated();
                if self.truncated {
                    warn!(
                        date = %fetch.date,
                        shown = page.content.len(),
                        total = ?page.total_elements,
                        "day has more transactions than one page holds"
                    );
                }
                LoadState::Loaded(page.content)
            }
            Err(err) => {
                warn!(date = %fetch.date, "day transactions load failed: {err}");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    /// Drops the selection and anything still in flight for it.
    pub fn clear(&mut self) {
        self.sequence.invalidate();
        self.selected = None;
        self.state = LoadState::Idle;
        self.truncated = false;
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn state(&self) -> &LoadState<Vec<Transaction>> {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.state.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
