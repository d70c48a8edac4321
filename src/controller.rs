use crate::api::DashboardApi;
use crate::fetcher::DashboardRequest;
use crate::session::DashboardSession;
use crate::view::DashboardView;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives a [`DashboardSession`] against the spending API.
///
/// The session lock is only held while a transition is applied, never across
/// a network call, so a newer request can start while an older one is still
/// in flight. The sequence tickets decide which result is kept.
pub struct DashboardController<A> {
    api: Arc<A>,
    session: Arc<Mutex<DashboardSession>>,
}

impl<A> Clone for DashboardController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: Arc::clone(&self.session),
        }
    }
}

impl<A: DashboardApi> DashboardController<A> {
    pub fn new(api: A, day_page_size: u32) -> Self {
        Self {
            api: Arc::new(api),
            session: Arc::new(Mutex::new(DashboardSession::new(day_page_size))),
        }
    }

    /// Loads the default period. Called once when the dashboard starts.
    pub async fn start(&self) -> DashboardView {
        let request = self.session.lock().await.reload();
        self.load(request).await
    }

    pub async fn change_period(&self, token: &str) -> DashboardView {
        let request = self.session.lock().await.select_token(token, today());
        self.load(request).await
    }

    pub async fn retry(&self) -> DashboardView {
        let request = self.session.lock().await.reload();
        self.load(request).await
    }

    pub async fn select_day(&self, date: NaiveDate) -> DashboardView {
        let fetch = self.session.lock().await.click_day(date);
        let Some(fetch) = fetch else {
            return self.view().await;
        };

        let result = self.api.transactions(&fetch.query).await;
        let mut session = self.session.lock().await;
        session.apply_day(&fetch, result);
        session.view(today())
    }

    pub async fn close_day(&self) -> DashboardView {
        let mut session = self.session.lock().await;
        session.close_day();
        session.view(today())
    }

    pub async fn view(&self) -> DashboardView {
        self.session.lock().await.view(today())
    }

    async fn load(&self, request: DashboardRequest) -> DashboardView {
        let result = self.api.dashboard(request.period).await;
        let mut session = self.session.lock().await;
        session.apply_dashboard(request, result);
        session.view(today())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransactionQuery;
    use crate::errors::ApiError;
    use crate::models::{DashboardSnapshot, TransactionPage};
    use crate::period::Period;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::oneshot;

    /// Fake API whose `YTD` answer waits until the test releases it.
    #[derive(Default)]
    struct GatedApi {
        gate: StdMutex<Option<oneshot::Receiver<()>>>,
        calls: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl DashboardApi for GatedApi {
        async fn dashboard(&self, period: Period) -> Result<DashboardSnapshot, ApiError> {
            self.calls.lock().unwrap().push(period.token());
            let gate = if period == Period::Ytd {
                self.gate.lock().unwrap().take()
            } else {
                None
            };
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(DashboardSnapshot {
                total_spent: if period == Period::Ytd { 1.0 } else { 2.0 },
                ..DashboardSnapshot::default()
            })
        }

        async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("transactions {:?}", query.start_date));
            Ok(TransactionPage::default())
        }
    }

    #[tokio::test]
    async fn slow_older_request_does_not_overwrite_newer() {
        let (release, gate) = oneshot::channel();
        let api = GatedApi {
            gate: StdMutex::new(Some(gate)),
            ..GatedApi::default()
        };
        let controller = DashboardController::new(api, 100);

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.change_period("YTD").await })
        };
        while controller.api.calls.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }

        let fast = controller.change_period("YEAR:2023").await;
        assert_eq!(fast.snapshot.map(|s| s.total_spent), Some(2.0));

        release.send(()).unwrap();
        slow.await.unwrap();

        let view = controller.view().await;
        assert_eq!(view.token, "YEAR:2023");
        assert_eq!(view.snapshot.map(|s| s.total_spent), Some(2.0));
    }

    #[tokio::test]
    async fn day_click_under_ytd_issues_no_request() {
        let controller = DashboardController::new(GatedApi::default(), 100);
        controller.change_period("MONTH:2024:3").await;
        controller.change_period("YTD").await;
        controller
            .select_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .await;

        let calls = controller.api.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["MONTH:2024:3", "YTD"]);
    }
}
