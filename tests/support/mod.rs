//! In-process stand-in for the spending API.

#![allow(dead_code)]

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct Backend {
    pub requests: Arc<Mutex<Vec<String>>>,
    pub fail: Arc<AtomicBool>,
    pub fail_transactions: Arc<AtomicBool>,
    pub ytd_delay_ms: Arc<AtomicU64>,
}

impl Backend {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_transactions_failing(&self, fail: bool) {
        self.fail_transactions.store(fail, Ordering::SeqCst);
    }

    pub fn set_ytd_delay(&self, delay: Duration) {
        self.ytd_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

pub struct RunningBackend {
    pub base_url: String,
    pub backend: Backend,
}

/// Serves the fake API on the current runtime.
pub async fn spawn_backend() -> RunningBackend {
    let backend = Backend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let port = listener.local_addr().unwrap().port();
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend stopped");
    });
    RunningBackend {
        base_url: format!("http://127.0.0.1:{port}/api"),
        backend,
    }
}

/// Serves the fake API on its own thread so it outlives any single test runtime.
pub fn spawn_backend_thread() -> RunningBackend {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("fake backend runtime");
        runtime.block_on(async move {
            let running = spawn_backend().await;
            tx.send(running).expect("report fake backend");
            std::future::pending::<()>().await;
        });
    });
    rx.recv().expect("fake backend started")
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/transactions", get(transactions))
        .with_state(backend)
}

async fn dashboard(
    State(backend): State<Backend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push(format!("dashboard?{}", raw.unwrap_or_default()));

    if backend.fail.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response();
    }

    let period = params.get("period").map(String::as_str).unwrap_or("THIS_MONTH");
    if period == "YTD" {
        let delay = backend.ytd_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    Json(snapshot_for(period)).into_response()
}

fn snapshot_for(period: &str) -> Value {
    match period {
        "YTD" | "YEAR" => json!({
            "totalSpent": if period == "YTD" { 300.0 } else { 400.0 },
            "avgPerDay": 10.0,
            "overallAvgPerDay": 10.0,
            "avgMonthlySpend": 150.0,
            "projectedMonthEnd": null,
            "projectedMonthEndComparedPercent": null,
            "dataPoints": { "2024-01": 100.0, "2024-02": 200.0 }
        }),
        "MONTH" => json!({
            "totalSpent": 200.0,
            "avgPerDay": 20.0,
            "overallAvgPerDay": 15.0,
            "avgMonthlySpend": null,
            "projectedMonthEnd": null,
            "projectedMonthEndComparedPercent": null,
            "dataPoints": { "2024-03-01": 120.0, "2024-03-02": 80.0 }
        }),
        _ => json!({
            "totalSpent": 100.0,
            "avgPerDay": 50.0,
            "overallAvgPerDay": 40.0,
            "avgMonthlySpend": null,
            "projectedMonthEnd": 1500.0,
            "projectedMonthEndComparedPercent": 7.5,
            "dataPoints": { "2024-03-01": 60.0, "2024-03-02": 40.0 }
        }),
    }
}

async fn transactions(
    State(backend): State<Backend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push(format!("transactions?{}", raw.unwrap_or_default()));

    if backend.fail_transactions.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "ledger offline").into_response();
    }

    let date = params.get("startDate").cloned().unwrap_or_default();
    Json(json!({
        "content": [
            {
                "id": 1,
                "merchant": "Corner Market",
                "amount": 42.5,
                "rawDescription": format!("CORNER MARKET {date}"),
                "transactionDate": date
            }
        ],
        "totalElements": 1,
        "totalPages": 1
    }))
    .into_response()
}
