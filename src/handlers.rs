use crate::errors::AppError;
use crate::models::{DayPayload, PeriodPayload};
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::DashboardView;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.view().await;
    Html(render_index(&view, &state.currency, Local::now().date_naive()))
}

pub async fn get_view(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.controller.view().await)
}

pub async fn change_period(
    State(state): State<AppState>,
    Json(payload): Json<PeriodPayload>,
) -> Json<DashboardView> {
    Json(state.controller.change_period(&payload.period).await)
}

pub async fn retry(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.controller.retry().await)
}

pub async fn select_day(
    State(state): State<AppState>,
    Json(payload): Json<DayPayload>,
) -> Result<Json<DashboardView>, AppError> {
    let date = parse_date(&payload.date)?;
    Ok(Json(state.controller.select_day(date).await))
}

pub async fn close_day(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.controller.close_day().await)
}

pub async fn period_form(
    State(state): State<AppState>,
    Form(payload): Form<PeriodPayload>,
) -> Redirect {
    state.controller.change_period(&payload.period).await;
    Redirect::to("/")
}

pub async fn retry_form(State(state): State<AppState>) -> Redirect {
    state.controller.retry().await;
    Redirect::to("/")
}

pub async fn day_form(
    State(state): State<AppState>,
    Form(payload): Form<DayPayload>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&payload.date)?;
    state.controller.select_day(date).await;
    Ok(Redirect::to("/"))
}

pub async fn close_day_form(State(state): State<AppState>) -> Redirect {
    state.controller.close_day().await;
    Redirect::to("/")
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be formatted as YYYY-MM-DD"))
}
