//! Client for the external spending API.

use crate::errors::ApiError;
use crate::models::{DashboardSnapshot, TransactionPage};
use crate::period::Period;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Query for the transactions listing, limited to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub size: u32,
}

impl TransactionQuery {
    /// Every transaction booked on `date`, in one page of `size`.
    pub fn single_day(date: NaiveDate, size: u32) -> Self {
        Self {
            start_date: date,
            end_date: date,
            size,
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startDate", self.start_date.to_string()),
            ("endDate", self.end_date.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}

#[async_trait]
pub trait DashboardApi: Send + Sync + 'static {
    async fn dashboard(&self, period: Period) -> Result<DashboardSnapshot, ApiError>;

    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    http: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| ApiError::Url(format!("{base_url}: {err}")))?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, ?query, "api request");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(ApiError::Decode)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn dashboard(&self, period: Period) -> Result<DashboardSnapshot, ApiError> {
        self.get("dashboard", &period.query()).await
    }

    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError> {
        self.get("transactions", &query.pairs()).await
    }
}
