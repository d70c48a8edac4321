//! Request lifecycle for the dashboard KPIs.

use crate::errors::ApiError;
use crate::models::DashboardSnapshot;
use crate::period::Period;
use tracing::{debug, warn};

/// Tag handed out when a request starts. A result is only applied if its
/// ticket is still the newest one issued by the same [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Sequence {
    issued: u64,
}

impl Sequence {
    pub fn next(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Makes every outstanding ticket stale without starting a new request.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// A dashboard request that has been started but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRequest {
    pub ticket: Ticket,
    pub period: Period,
}

#[derive(Debug, Default)]
pub struct DashboardFetcher {
    sequence: Sequence,
    state: LoadState<DashboardSnapshot>,
}

impl DashboardFetcher {
    /// Starts a load for `period`. The previous snapshot is dropped because it
    /// no longer describes what is being requested.
    pub fn begin(&mut self, period: Period) -> DashboardRequest {
        self.state = LoadState::Loading;
        DashboardRequest {
            ticket: self.sequence.next(),
            period,
        }
    }

    /// Applies a finished request. Returns false when the result was stale and
    /// got discarded.
    pub fn finish(
        &mut self,
        request: DashboardRequest,
        result: Result<DashboardSnapshot, ApiError>,
    ) -> bool {
        if !self.sequence.is_current(request.ticket) {
            debug!(period = %request.period, "discarding stale dashboard response");
            return false;
        }

        self.state = match result {
            Ok(snapshot) => LoadState::Loaded(snapshot),
            Err(err) => {
                warn!(period = %request.period, "dashboard load failed: {err}");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn state(&self) -> &LoadState<DashboardSnapshot> {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.state.data()
    }
}
