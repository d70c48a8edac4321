use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/period", post(handlers::period_form))
        .route("/retry", post(handlers::retry_form))
        .route("/day", post(handlers::day_form))
        .route("/day/close", post(handlers::close_day_form))
        .route("/api/view", get(handlers::get_view))
        .route("/api/period", post(handlers::change_period))
        .route("/api/retry", post(handlers::retry))
        .route("/api/day", post(handlers::select_day))
        .route("/api/day/close", post(handlers::close_day))
        .with_state(state)
}
