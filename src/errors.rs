use axum::http::StatusCode;

/// Failure talking to the spending API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach the spending API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("spending API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response from the spending API: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid API URL: {0}")]
    Url(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
